//! Promotions routes

use std::sync::Arc;
use uuid::Uuid;
use warp::Filter;

use crate::application::services::promotions_service::PromotionsService;
use crate::config::AppConfig;
use crate::infrastructure::http::handlers::{
    handle_active_promotions, handle_admin_promotion_decide, handle_admin_promotion_get,
    handle_admin_promotions_list, handle_promotion_cancel, handle_promotion_click,
    handle_promotion_create, handle_promotion_proof, handle_promotions_list,
};
use crate::infrastructure::http::models::{ListQuery, SelectQuery};

pub struct PromotionsRoutes;

impl PromotionsRoutes {
    pub fn create_routes(
        config: AppConfig,
        service: Arc<PromotionsService>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let max_body = config.server.max_request_size as u64;

        let create = warp::path("promotions")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::json())
            .and(warp::header::<String>("x-user-id"))
            .and(Self::with_service(service.clone()))
            .and_then(handle_promotion_create);

        let proof = warp::path("promotions")
            .and(warp::path::param::<Uuid>())
            .and(warp::path("proof"))
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::json())
            .and(warp::header::<String>("x-user-id"))
            .and(Self::with_service(service.clone()))
            .and_then(handle_promotion_proof);

        let cancel = warp::path("promotions")
            .and(warp::path::param::<Uuid>())
            .and(warp::path("cancel"))
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::header::<String>("x-user-id"))
            .and(Self::with_service(service.clone()))
            .and_then(handle_promotion_cancel);

        let list_mine = warp::path("promotions")
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::query::<ListQuery>())
            .and(warp::header::<String>("x-user-id"))
            .and(Self::with_service(service.clone()))
            .and_then(handle_promotions_list);

        let admin_list = warp::path("admin")
            .and(warp::path("promotions"))
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::query::<ListQuery>())
            .and(warp::header::<String>("x-admin-id"))
            .and(Self::with_service(service.clone()))
            .and_then(handle_admin_promotions_list);

        let admin_get = warp::path("admin")
            .and(warp::path("promotions"))
            .and(warp::path::param::<Uuid>())
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::header::<String>("x-admin-id"))
            .and(Self::with_service(service.clone()))
            .and_then(handle_admin_promotion_get);

        let admin_decide = warp::path("admin")
            .and(warp::path("promotions"))
            .and(warp::path::param::<Uuid>())
            .and(warp::path("decision"))
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::json())
            .and(warp::header::<String>("x-admin-id"))
            .and(Self::with_service(service.clone()))
            .and_then(handle_admin_promotion_decide);

        let active = warp::path("public")
            .and(warp::path("promotions"))
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::query::<SelectQuery>())
            .and(Self::with_service(service.clone()))
            .and_then(handle_active_promotions);

        let click = warp::path("public")
            .and(warp::path("promotions"))
            .and(warp::path::param::<Uuid>())
            .and(warp::path("click"))
            .and(warp::path::end())
            .and(warp::post())
            .and(Self::with_service(service))
            .and_then(handle_promotion_click);

        create
            .or(proof)
            .or(cancel)
            .or(list_mine)
            .or(admin_decide)
            .or(admin_get)
            .or(admin_list)
            .or(click)
            .or(active)
    }

    fn with_service(
        service: Arc<PromotionsService>,
    ) -> impl Filter<Extract = (Arc<PromotionsService>,), Error = std::convert::Infallible> + Clone
    {
        warp::any().map(move || service.clone())
    }
}
