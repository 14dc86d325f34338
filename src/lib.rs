//! Marketpay Server - payment and promotion lifecycle engine
//!
//! This library turns manually-verified, off-chain cryptocurrency payments
//! into time-bounded paid features for marketplace listings: featured
//! placement, listing fees, application fees, and slot-rotated homepage and
//! category promotions with automatic expiration.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::AppConfig;
pub use infrastructure::http::HttpServer;
pub use shared::error::{AppError, AppResult};
