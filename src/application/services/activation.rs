//! Service activation dispatcher
//!
//! Applies the feature-specific side effect once a payment is verified.
//! Handlers are registered per payment type at startup; unknown types are a
//! logged no-op so new types can ship before their activation lands. A
//! handler failure is logged and swallowed: the payment record stays
//! verified and operators reconcile from the logs.

use crate::domain::catalog::ListingCatalog;
use crate::domain::payments::{ItemRef, Payment, PaymentType};
use crate::shared::error::{AppError, AppResult};
use crate::shared::logging::LoggingUtils;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// One activation side effect
#[async_trait]
pub trait ActivationHandler: Send + Sync {
    async fn activate(&self, payment: &Payment) -> AppResult<()>;
}

/// Registry mapping payment type to its activation handler
#[derive(Default)]
pub struct ActivationRegistry {
    handlers: HashMap<PaymentType, Box<dyn ActivationHandler>>,
}

impl ActivationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the standard handlers wired to the catalog
    pub fn with_defaults(catalog: Arc<dyn ListingCatalog>) -> Self {
        let mut registry = Self::new();
        registry.register(
            PaymentType::FeaturedListing,
            Box::new(FeaturedListingActivation {
                catalog: catalog.clone(),
            }),
        );
        registry.register(
            PaymentType::ListingFee,
            Box::new(ListingFeeActivation {
                catalog: catalog.clone(),
            }),
        );
        registry.register(
            PaymentType::ApplicationFee,
            Box::new(ApplicationFeeActivation { catalog }),
        );
        // service_payment has no downstream side effect: the payer is buying
        // a service from the item's owner, not a platform feature.
        registry
    }

    pub fn register(&mut self, payment_type: PaymentType, handler: Box<dyn ActivationHandler>) {
        self.handlers.insert(payment_type, handler);
    }

    /// Run the side effect for a verified payment. Never fails: errors and
    /// unknown types are logged and absorbed.
    pub async fn dispatch(&self, payment: &Payment) {
        match self.handlers.get(&payment.payment_type) {
            Some(handler) => {
                if let Err(e) = handler.activate(payment).await {
                    LoggingUtils::log_activation_failure(
                        &payment.id.to_string(),
                        payment.payment_type.as_str(),
                        &e.to_string(),
                    );
                }
            }
            None => {
                info!(
                    payment_id = %payment.id,
                    payment_type = %payment.payment_type.as_str(),
                    "No activation handler registered; skipping"
                );
            }
        }
    }
}

fn listing_target(payment: &Payment) -> AppResult<uuid::Uuid> {
    match payment.item {
        ItemRef::Listing(id) => Ok(id),
        _ => Err(AppError::Activation {
            payment_type: payment.payment_type.as_str().to_string(),
            reason: format!("target is a {}, expected a listing", payment.item.kind().as_str()),
        }),
    }
}

fn paid_duration(payment: &Payment) -> AppResult<Duration> {
    let days = payment.metadata.duration_days.ok_or_else(|| AppError::Activation {
        payment_type: payment.payment_type.as_str().to_string(),
        reason: "no duration recorded on the payment".to_string(),
    })?;
    Ok(Duration::days(days as i64))
}

/// Marks the target listing featured until now + paid duration
struct FeaturedListingActivation {
    catalog: Arc<dyn ListingCatalog>,
}

#[async_trait]
impl ActivationHandler for FeaturedListingActivation {
    async fn activate(&self, payment: &Payment) -> AppResult<()> {
        let listing = listing_target(payment)?;
        let until = Utc::now() + paid_duration(payment)?;
        self.catalog.mark_featured_until(listing, until).await
    }
}

/// Marks the target listing active with a paid-until date
struct ListingFeeActivation {
    catalog: Arc<dyn ListingCatalog>,
}

#[async_trait]
impl ActivationHandler for ListingFeeActivation {
    async fn activate(&self, payment: &Payment) -> AppResult<()> {
        let listing = listing_target(payment)?;
        let until = Utc::now() + paid_duration(payment)?;
        self.catalog.mark_active_until(listing, until).await
    }
}

/// Marks the target application as submitted
struct ApplicationFeeActivation {
    catalog: Arc<dyn ListingCatalog>,
}

#[async_trait]
impl ActivationHandler for ApplicationFeeActivation {
    async fn activate(&self, payment: &Payment) -> AppResult<()> {
        match payment.item {
            ItemRef::Application(id) => self.catalog.mark_application_submitted(id).await,
            _ => Err(AppError::Activation {
                payment_type: payment.payment_type.as_str().to_string(),
                reason: format!(
                    "target is a {}, expected an application",
                    payment.item.kind().as_str()
                ),
            }),
        }
    }
}
