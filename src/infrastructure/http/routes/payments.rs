//! Payments routes

use std::sync::Arc;
use uuid::Uuid;
use warp::Filter;

use crate::application::services::payments_service::PaymentsService;
use crate::config::AppConfig;
use crate::infrastructure::http::handlers::{
    handle_admin_payment_get, handle_admin_payment_status, handle_admin_payments_list,
    handle_payment_create, handle_payment_proof, handle_payments_list,
};
use crate::infrastructure::http::models::ListQuery;

pub struct PaymentsRoutes;

impl PaymentsRoutes {
    pub fn create_routes(
        config: AppConfig,
        service: Arc<PaymentsService>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let max_body = config.server.max_request_size as u64;

        let create = warp::path("payments")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::json())
            .and(warp::header::<String>("x-user-id"))
            .and(Self::with_service(service.clone()))
            .and_then(handle_payment_create);

        let proof = warp::path("payments")
            .and(warp::path::param::<Uuid>())
            .and(warp::path("proof"))
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::json())
            .and(warp::header::<String>("x-user-id"))
            .and(Self::with_service(service.clone()))
            .and_then(handle_payment_proof);

        let list_mine = warp::path("payments")
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::query::<ListQuery>())
            .and(warp::header::<String>("x-user-id"))
            .and(Self::with_service(service.clone()))
            .and_then(handle_payments_list);

        let admin_list = warp::path("admin")
            .and(warp::path("payments"))
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::query::<ListQuery>())
            .and(warp::header::<String>("x-admin-id"))
            .and(Self::with_service(service.clone()))
            .and_then(handle_admin_payments_list);

        let admin_get = warp::path("admin")
            .and(warp::path("payments"))
            .and(warp::path::param::<Uuid>())
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::header::<String>("x-admin-id"))
            .and(Self::with_service(service.clone()))
            .and_then(handle_admin_payment_get);

        let admin_status = warp::path("admin")
            .and(warp::path("payments"))
            .and(warp::path::param::<Uuid>())
            .and(warp::path("status"))
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::json())
            .and(warp::header::<String>("x-admin-id"))
            .and(Self::with_service(service))
            .and_then(handle_admin_payment_status);

        create
            .or(proof)
            .or(list_mine)
            .or(admin_status)
            .or(admin_get)
            .or(admin_list)
    }

    fn with_service(
        service: Arc<PaymentsService>,
    ) -> impl Filter<Extract = (Arc<PaymentsService>,), Error = std::convert::Infallible> + Clone
    {
        warp::any().map(move || service.clone())
    }
}
