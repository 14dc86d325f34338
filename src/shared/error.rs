//! Error handling module
//!
//! This module provides centralized error handling for the application.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Pricing not configured: {0}")]
    PricingUnconfigured(String),

    #[error("Activation failed for {payment_type}: {reason}")]
    Activation { payment_type: String, reason: String },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code for this error
    pub fn http_status_code(&self) -> warp::http::StatusCode {
        match self {
            AppError::Validation(_) => warp::http::StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => warp::http::StatusCode::NOT_FOUND,
            AppError::Authorization(_) => warp::http::StatusCode::FORBIDDEN,
            AppError::Conflict(_) => warp::http::StatusCode::CONFLICT,
            AppError::PricingUnconfigured(_) => warp::http::StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Activation { .. } => warp::http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => warp::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable tag used in failure responses
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::Authorization(_) => "authorization",
            AppError::Conflict(_) => "conflict",
            AppError::PricingUnconfigured(_) => "pricing_unconfigured",
            AppError::Activation { .. } => "activation",
            AppError::Internal(_) => "internal",
        }
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

// Implement warp::reject::Reject for AppError
impl warp::reject::Reject for AppError {}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
