//! Application services module
//!
//! Lifecycle orchestration for payments, promotions, pricing, activation,
//! and the expiration sweep.

pub mod activation;
pub mod payments_service;
pub mod pricing_service;
pub mod promotions_service;
pub mod sweep;

pub use activation::{ActivationHandler, ActivationRegistry};
pub use payments_service::PaymentsService;
pub use pricing_service::PricingService;
pub use promotions_service::PromotionsService;
pub use sweep::{ExpirationSweep, SweepReport};
