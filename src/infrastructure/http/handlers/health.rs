//! Health check handler

use serde_json::json;
use warp::Reply;

pub async fn handle_health_request() -> Result<impl Reply, warp::reject::Rejection> {
    Ok(warp::reply::json(&json!({
        "status": "healthy",
        "service": "marketpay-server",
        "timestamp": chrono::Utc::now(),
    })))
}
