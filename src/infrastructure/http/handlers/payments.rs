//! Payments HTTP handlers

use std::sync::Arc;

use warp::Reply;

use crate::application::services::payments_service::{
    AdminSetStatusRequest, CreatePaymentRequest, PaymentsService, SubmitProofRequest,
};
use crate::infrastructure::http::models::{json_response, parse_identity, ListQuery};
use uuid::Uuid;

pub async fn handle_payment_create(
    body: CreatePaymentRequest,
    user_header: String,
    service: Arc<PaymentsService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let result = match parse_identity(&user_header) {
        Ok(user) => service.create(user, body).await,
        Err(e) => Err(e),
    };
    Ok(json_response(result))
}

pub async fn handle_payment_proof(
    payment_id: Uuid,
    body: SubmitProofRequest,
    user_header: String,
    service: Arc<PaymentsService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let result = match parse_identity(&user_header) {
        Ok(user) => service.submit_proof(payment_id, user, body).await,
        Err(e) => Err(e),
    };
    Ok(json_response(result))
}

pub async fn handle_payments_list(
    query: ListQuery,
    user_header: String,
    service: Arc<PaymentsService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let result = match (parse_identity(&user_header), query.payment_filter()) {
        (Ok(user), Ok(filter)) => Ok(service.list_for_user(user, &filter).await),
        (Err(e), _) | (_, Err(e)) => Err(e),
    };
    Ok(json_response(result))
}

pub async fn handle_admin_payments_list(
    query: ListQuery,
    admin_header: String,
    service: Arc<PaymentsService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let result = match (parse_identity(&admin_header), query.payment_filter()) {
        (Ok(_), Ok(filter)) => Ok(service.admin_list(&filter).await),
        (Err(e), _) | (_, Err(e)) => Err(e),
    };
    Ok(json_response(result))
}

pub async fn handle_admin_payment_get(
    payment_id: Uuid,
    admin_header: String,
    service: Arc<PaymentsService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let result = match parse_identity(&admin_header) {
        Ok(_) => service.admin_get(payment_id).await,
        Err(e) => Err(e),
    };
    Ok(json_response(result))
}

pub async fn handle_admin_payment_status(
    payment_id: Uuid,
    body: AdminSetStatusRequest,
    admin_header: String,
    service: Arc<PaymentsService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let result = match parse_identity(&admin_header) {
        Ok(admin) => service.admin_set_status(payment_id, admin, body).await,
        Err(e) => Err(e),
    };
    Ok(json_response(result))
}
