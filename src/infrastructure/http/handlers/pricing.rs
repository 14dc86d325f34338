//! Pricing HTTP handlers

use std::sync::Arc;

use warp::Reply;

use crate::application::services::pricing_service::PricingService;
use crate::domain::pricing::PricingConfig;
use crate::infrastructure::http::models::{json_response, parse_identity};
use crate::shared::error::AppResult;

/// Public: price table plus enabled chains only
pub async fn handle_public_pricing(
    service: Arc<PricingService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let public = service.sanitized().await;
    Ok(json_response(AppResult::Ok(public)))
}

/// Admin: replace the pricing configuration
pub async fn handle_admin_pricing_update(
    body: PricingConfig,
    admin_header: String,
    service: Arc<PricingService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let result = match parse_identity(&admin_header) {
        Ok(_) => {
            service.update(body).await;
            Ok(service.config().await)
        }
        Err(e) => Err(e),
    };
    Ok(json_response(result))
}
