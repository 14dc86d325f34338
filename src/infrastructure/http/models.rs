//! HTTP models and response helpers

use crate::domain::payments::{PaymentStatus, PaymentType};
use crate::domain::promotions::{Placement, PromotionStatus};
use crate::infrastructure::adapters::{PaymentFilter, PromotionFilter};
use crate::shared::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query parameters accepted by the listing endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub payment_type: Option<String>,
    pub placement: Option<String>,
}

impl ListQuery {
    pub fn payment_filter(&self) -> AppResult<PaymentFilter> {
        let status = match &self.status {
            Some(s) => Some(parse_payment_status(s)?),
            None => None,
        };
        let payment_type = match &self.payment_type {
            Some(t) => Some(t.parse::<PaymentType>().map_err(AppError::Validation)?),
            None => None,
        };
        Ok(PaymentFilter {
            status,
            payment_type,
        })
    }

    pub fn promotion_filter(&self) -> AppResult<PromotionFilter> {
        let status = match &self.status {
            Some(s) => Some(parse_promotion_status(s)?),
            None => None,
        };
        let placement = match &self.placement {
            Some(p) => Some(p.parse::<Placement>().map_err(AppError::Validation)?),
            None => None,
        };
        Ok(PromotionFilter { status, placement })
    }
}

/// Query parameters for the public active-promotions endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectQuery {
    pub category: Option<String>,
}

/// Structured failure body returned at the request boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub kind: String,
    pub message: String,
}

impl ErrorBody {
    pub fn from_error(e: &AppError) -> Self {
        Self {
            error: ErrorDetail {
                kind: e.kind().to_string(),
                message: e.to_string(),
            },
        }
    }
}

/// Turn a service result into a JSON reply with the mapped status code
pub fn json_response<T: Serialize>(
    result: AppResult<T>,
) -> warp::reply::WithStatus<warp::reply::Json> {
    match result {
        Ok(value) => {
            warp::reply::with_status(warp::reply::json(&value), warp::http::StatusCode::OK)
        }
        Err(e) => warp::reply::with_status(
            warp::reply::json(&ErrorBody::from_error(&e)),
            e.http_status_code(),
        ),
    }
}

/// Map filter-level rejections into the structured failure body, so a
/// missing header or a malformed body never surfaces warp's plain-text
/// default reply
pub async fn handle_rejection(
    rejection: warp::Rejection,
) -> Result<warp::reply::WithStatus<warp::reply::Json>, std::convert::Infallible> {
    let error = if rejection.is_not_found() {
        AppError::NotFound("no such route".into())
    } else if let Some(e) = rejection.find::<AppError>() {
        e.clone()
    } else if let Some(missing) = rejection.find::<warp::reject::MissingHeader>() {
        match missing.name() {
            "x-user-id" | "x-admin-id" => {
                AppError::Authorization(format!("missing {} header", missing.name()))
            }
            name => AppError::Validation(format!("missing {} header", name)),
        }
    } else if let Some(e) = rejection.find::<warp::filters::body::BodyDeserializeError>() {
        AppError::Validation(e.to_string())
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        AppError::Validation("method not allowed for this route".into())
    } else {
        AppError::Internal(format!("unhandled rejection: {:?}", rejection))
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorBody::from_error(&error)),
        error.http_status_code(),
    ))
}

/// Parse a caller identity header value
pub fn parse_identity(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::Authorization("invalid caller identity".into()))
}

fn parse_payment_status(s: &str) -> AppResult<PaymentStatus> {
    match s.to_lowercase().as_str() {
        "pending" => Ok(PaymentStatus::Pending),
        "submitted" => Ok(PaymentStatus::Submitted),
        "under_review" => Ok(PaymentStatus::UnderReview),
        "verified" => Ok(PaymentStatus::Verified),
        "rejected" => Ok(PaymentStatus::Rejected),
        "refunded" => Ok(PaymentStatus::Refunded),
        other => Err(AppError::Validation(format!(
            "unknown payment status: {}",
            other
        ))),
    }
}

fn parse_promotion_status(s: &str) -> AppResult<PromotionStatus> {
    match s.to_lowercase().as_str() {
        "awaiting_payment" => Ok(PromotionStatus::AwaitingPayment),
        "submitted" => Ok(PromotionStatus::Submitted),
        "under_review" => Ok(PromotionStatus::UnderReview),
        "active" => Ok(PromotionStatus::Active),
        "expired" => Ok(PromotionStatus::Expired),
        "rejected" => Ok(PromotionStatus::Rejected),
        "cancelled" => Ok(PromotionStatus::Cancelled),
        other => Err(AppError::Validation(format!(
            "unknown promotion status: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identity() {
        let id = Uuid::new_v4();
        assert_eq!(parse_identity(&id.to_string()).unwrap(), id);
        assert!(parse_identity("not-a-uuid").is_err());
    }

    #[test]
    fn test_payment_filter_parsing() {
        let query = ListQuery {
            status: Some("verified".to_string()),
            payment_type: Some("listing_fee".to_string()),
            placement: None,
        };
        let filter = query.payment_filter().unwrap();
        assert_eq!(filter.status, Some(PaymentStatus::Verified));
        assert_eq!(filter.payment_type, Some(PaymentType::ListingFee));
    }

    #[test]
    fn test_bad_status_is_validation_error() {
        let query = ListQuery {
            status: Some("paid".to_string()),
            payment_type: None,
            placement: None,
        };
        assert!(query.payment_filter().is_err());
        assert!(query.promotion_filter().is_err());
    }
}
