//! HTTP routes module

pub mod health;
pub mod payments;
pub mod pricing;
pub mod promotions;

use std::sync::Arc;
use warp::Filter;

use crate::application::services::{PaymentsService, PricingService, PromotionsService};
use crate::config::AppConfig;
use crate::infrastructure::http::models::handle_rejection;

pub use health::HealthRoutes;
pub use payments::PaymentsRoutes;
pub use pricing::PricingRoutes;
pub use promotions::PromotionsRoutes;

/// Compose the full route tree
pub fn build_routes(
    config: AppConfig,
    payments: Arc<PaymentsService>,
    promotions: Arc<PromotionsService>,
    pricing: Arc<PricingService>,
) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
    HealthRoutes::create_routes()
        .or(PaymentsRoutes::create_routes(config.clone(), payments))
        .or(PromotionsRoutes::create_routes(config.clone(), promotions))
        .or(PricingRoutes::create_routes(config, pricing))
        .recover(handle_rejection)
        .with(warp::trace::request())
}
