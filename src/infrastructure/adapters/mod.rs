//! Infrastructure adapters module
//!
//! This module contains adapters for storage and external collaborators.

pub mod catalog_directory;
pub mod notifier;
pub mod payments_store;
pub mod pricing_store;
pub mod promotions_store;
pub mod qr;

// Re-export all adapters
pub use catalog_directory::CatalogDirectory;
pub use notifier::LoggingNotifier;
pub use payments_store::{PaymentFilter, PaymentsStore};
pub use pricing_store::PricingStore;
pub use promotions_store::{InsertOutcome, PromotionFilter, PromotionsStore};
pub use qr::DataUrlQrRenderer;
