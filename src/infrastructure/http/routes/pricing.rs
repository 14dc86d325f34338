//! Pricing routes

use std::sync::Arc;
use warp::Filter;

use crate::application::services::pricing_service::PricingService;
use crate::config::AppConfig;
use crate::infrastructure::http::handlers::{handle_admin_pricing_update, handle_public_pricing};

pub struct PricingRoutes;

impl PricingRoutes {
    pub fn create_routes(
        config: AppConfig,
        service: Arc<PricingService>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let public = warp::path("public")
            .and(warp::path("pricing"))
            .and(warp::path::end())
            .and(warp::get())
            .and(Self::with_service(service.clone()))
            .and_then(handle_public_pricing);

        let admin_update = warp::path("admin")
            .and(warp::path("pricing"))
            .and(warp::path::end())
            .and(warp::put())
            .and(warp::body::content_length_limit(
                config.server.max_request_size as u64,
            ))
            .and(warp::body::json())
            .and(warp::header::<String>("x-admin-id"))
            .and(Self::with_service(service))
            .and_then(handle_admin_pricing_update);

        public.or(admin_update)
    }

    fn with_service(
        service: Arc<PricingService>,
    ) -> impl Filter<Extract = (Arc<PricingService>,), Error = std::convert::Infallible> + Clone
    {
        warp::any().map(move || service.clone())
    }
}
