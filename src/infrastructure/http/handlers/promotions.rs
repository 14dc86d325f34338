//! Promotions HTTP handlers

use std::sync::Arc;

use warp::Reply;

use crate::application::services::promotions_service::{
    AdminDecideRequest, CreatePromotionRequest, PromotionsService, SubmitPromotionProofRequest,
};
use crate::domain::promotions::Placement;
use crate::infrastructure::http::models::{json_response, parse_identity, ListQuery, SelectQuery};
use crate::shared::error::AppError;
use uuid::Uuid;

pub async fn handle_promotion_create(
    body: CreatePromotionRequest,
    user_header: String,
    service: Arc<PromotionsService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let result = match parse_identity(&user_header) {
        Ok(owner) => service.create(owner, body).await,
        Err(e) => Err(e),
    };
    Ok(json_response(result))
}

pub async fn handle_promotion_proof(
    promotion_id: Uuid,
    body: SubmitPromotionProofRequest,
    user_header: String,
    service: Arc<PromotionsService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let result = match parse_identity(&user_header) {
        Ok(owner) => service.submit_proof(promotion_id, owner, body).await,
        Err(e) => Err(e),
    };
    Ok(json_response(result))
}

pub async fn handle_promotion_cancel(
    promotion_id: Uuid,
    user_header: String,
    service: Arc<PromotionsService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let result = match parse_identity(&user_header) {
        Ok(owner) => service.cancel(promotion_id, owner).await,
        Err(e) => Err(e),
    };
    Ok(json_response(result))
}

pub async fn handle_promotions_list(
    query: ListQuery,
    user_header: String,
    service: Arc<PromotionsService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let result = match (parse_identity(&user_header), query.promotion_filter()) {
        (Ok(owner), Ok(filter)) => Ok(service.list_for_owner(owner, &filter).await),
        (Err(e), _) | (_, Err(e)) => Err(e),
    };
    Ok(json_response(result))
}

pub async fn handle_admin_promotions_list(
    query: ListQuery,
    admin_header: String,
    service: Arc<PromotionsService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let result = match (parse_identity(&admin_header), query.promotion_filter()) {
        (Ok(_), Ok(filter)) => Ok(service.admin_list(&filter).await),
        (Err(e), _) | (_, Err(e)) => Err(e),
    };
    Ok(json_response(result))
}

pub async fn handle_admin_promotion_get(
    promotion_id: Uuid,
    admin_header: String,
    service: Arc<PromotionsService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let result = match parse_identity(&admin_header) {
        Ok(_) => service.admin_get(promotion_id).await,
        Err(e) => Err(e),
    };
    Ok(json_response(result))
}

pub async fn handle_admin_promotion_decide(
    promotion_id: Uuid,
    body: AdminDecideRequest,
    admin_header: String,
    service: Arc<PromotionsService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let result = match parse_identity(&admin_header) {
        Ok(admin) => service.admin_decide(promotion_id, admin, body).await,
        Err(e) => Err(e),
    };
    Ok(json_response(result))
}

/// Public: currently live promotions for a placement
pub async fn handle_active_promotions(
    placement: String,
    query: SelectQuery,
    service: Arc<PromotionsService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let result = match placement.parse::<Placement>() {
        Ok(placement) => Ok(service
            .select_active(placement, query.category.as_deref())
            .await),
        Err(e) => Err(AppError::Validation(e)),
    };
    Ok(json_response(result))
}

/// Public: count a click on a live promotion
pub async fn handle_promotion_click(
    promotion_id: Uuid,
    service: Arc<PromotionsService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let result = service.record_click(promotion_id).await;
    Ok(json_response(result))
}
