//! Payment lifecycle service
//!
//! Orchestrates payment creation, proof submission, and admin verification.
//! Ownership rules: for most payment types the caller must own the target
//! item; for service_payment the rule is inverted, the caller is paying the
//! item's owner and must not be that owner.

use crate::application::services::activation::ActivationRegistry;
use crate::application::services::pricing_service::PricingService;
use crate::domain::catalog::{ListingCatalog, NotificationKind, Notifier, QrRenderer};
use crate::domain::payments::{
    generate_reference, ItemRef, Payment, PaymentMetadata, PaymentProof, PaymentStatus,
    PaymentType, PricingSnapshot, RefundInfo,
};
use crate::domain::pricing::Chain;
use crate::infrastructure::adapters::{PaymentFilter, PaymentsStore, PromotionsStore};
use crate::shared::error::{AppError, AppResult};
use crate::shared::logging::LoggingUtils;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Fixed currency for caller-priced service payments
const SERVICE_PAYMENT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub item: ItemRef,
    pub payment_type: String,
    pub chain: String,
    pub duration_days: Option<u32>,
    pub custom_amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreatedResponse {
    pub payment: Payment,
    pub wallet_address: String,
    pub amount: f64,
    pub currency: String,
    pub chain: Chain,
    pub qr_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitProofRequest {
    pub tx_hash: String,
    pub screenshot: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSetStatusRequest {
    pub status: String,
    pub notes: Option<String>,
}

pub struct PaymentsService {
    pricing: Arc<PricingService>,
    store: PaymentsStore,
    promotions: PromotionsStore,
    catalog: Arc<dyn ListingCatalog>,
    qr: Arc<dyn QrRenderer>,
    notifier: Arc<dyn Notifier>,
    activations: Arc<ActivationRegistry>,
}

impl PaymentsService {
    pub fn new(
        pricing: Arc<PricingService>,
        store: PaymentsStore,
        promotions: PromotionsStore,
        catalog: Arc<dyn ListingCatalog>,
        qr: Arc<dyn QrRenderer>,
        notifier: Arc<dyn Notifier>,
        activations: Arc<ActivationRegistry>,
    ) -> Self {
        Self {
            pricing,
            store,
            promotions,
            catalog,
            qr,
            notifier,
            activations,
        }
    }

    /// Create a payment in `pending`, snapshotting the resolved price and
    /// wallet. Fails on a duplicate open payment for the same tuple.
    pub async fn create(
        &self,
        user: Uuid,
        req: CreatePaymentRequest,
    ) -> AppResult<PaymentCreatedResponse> {
        let payment_type: PaymentType =
            req.payment_type.parse().map_err(AppError::Validation)?;
        let chain: Chain = req.chain.parse().map_err(AppError::Validation)?;

        self.check_target(user, req.item, payment_type).await?;

        let (amount, currency, duration_days, description) = match payment_type {
            PaymentType::ServicePayment => {
                let amount = req
                    .custom_amount
                    .ok_or_else(|| AppError::Validation("custom_amount is required".into()))?;
                if amount <= 0.0 {
                    return Err(AppError::Validation("custom_amount must be positive".into()));
                }
                (
                    amount,
                    SERVICE_PAYMENT_CURRENCY.to_string(),
                    None,
                    "Service payment".to_string(),
                )
            }
            _ => {
                let row = self
                    .pricing
                    .resolve_price(payment_type.as_str(), req.duration_days)
                    .await?;
                let description = if row.duration_days > 0 {
                    format!("{}, {} days", payment_type.as_str(), row.duration_days)
                } else {
                    payment_type.as_str().to_string()
                };
                (
                    row.amount,
                    row.currency,
                    Some(row.duration_days),
                    description,
                )
            }
        };

        let wallet_address = self.pricing.require_wallet(chain).await?;
        // QR rendering is best effort; the address string stands on its own
        let qr_image = self.qr.render_qr(&wallet_address).ok();

        let now = Utc::now();
        let mut payment = Payment {
            id: Uuid::new_v4(),
            reference: generate_reference(),
            user,
            item: req.item,
            payment_type,
            pricing: PricingSnapshot {
                amount,
                currency: currency.clone(),
                chain,
                description,
            },
            proof: PaymentProof {
                wallet_address: wallet_address.clone(),
                ..Default::default()
            },
            metadata: PaymentMetadata {
                duration_days,
                custom_amount: req.custom_amount,
            },
            status: PaymentStatus::Pending,
            timeline: vec![],
            refund: None,
            created_at: now,
            updated_at: now,
        };
        payment.transition(PaymentStatus::Pending, Some("payment created".into()), Some(user));

        let payment = self.store.insert(payment).await?;

        Ok(PaymentCreatedResponse {
            payment,
            wallet_address,
            amount,
            currency,
            chain,
            qr_image,
        })
    }

    /// Record proof of payment and move to `submitted`. Only the owning user
    /// may call; legal from pending, submitted, under_review, and rejected
    /// (resubmission after rejection is allowed).
    pub async fn submit_proof(
        &self,
        payment_id: Uuid,
        caller: Uuid,
        req: SubmitProofRequest,
    ) -> AppResult<Payment> {
        if req.tx_hash.trim().is_empty() {
            return Err(AppError::Validation("tx_hash is required".into()));
        }

        self.store
            .update(payment_id, |payment| {
                if payment.user != caller {
                    return Err(AppError::Authorization(
                        "only the payment owner may submit proof".into(),
                    ));
                }
                if !payment.status.accepts_proof() {
                    LoggingUtils::log_transition_denied(
                        "payment",
                        &payment.id.to_string(),
                        payment.status.as_str(),
                        PaymentStatus::Submitted.as_str(),
                    );
                    return Err(AppError::Validation(format!(
                        "proof not accepted from status {}",
                        payment.status.as_str()
                    )));
                }

                payment.proof.tx_hash = Some(req.tx_hash.clone());
                payment.proof.screenshot = req.screenshot.clone();
                let from = payment.status;
                payment.transition(PaymentStatus::Submitted, None, Some(caller));
                LoggingUtils::log_transition(
                    "payment",
                    &payment.id.to_string(),
                    from.as_str(),
                    payment.status.as_str(),
                    &caller.to_string(),
                );
                Ok(payment.clone())
            })
            .await
    }

    /// Admin status update. Verification stamps the reviewer and triggers the
    /// activation dispatch; activation failures never revert the status.
    pub async fn admin_set_status(
        &self,
        payment_id: Uuid,
        admin: Uuid,
        req: AdminSetStatusRequest,
    ) -> AppResult<Payment> {
        let next = parse_admin_status(&req.status)?;
        let notes = req.notes.clone();

        let payment = self
            .store
            .update(payment_id, |payment| {
                if !payment.status.admin_can_transition_to(next) {
                    LoggingUtils::log_transition_denied(
                        "payment",
                        &payment.id.to_string(),
                        payment.status.as_str(),
                        next.as_str(),
                    );
                    return Err(AppError::Validation(format!(
                        "cannot move payment from {} to {}",
                        payment.status.as_str(),
                        next.as_str()
                    )));
                }

                match next {
                    PaymentStatus::Verified => {
                        payment.proof.verified_at = Some(Utc::now());
                        payment.proof.reviewed_by = Some(admin);
                    }
                    PaymentStatus::Refunded => {
                        let reason = notes
                            .clone()
                            .filter(|n| !n.trim().is_empty())
                            .ok_or_else(|| {
                                AppError::Validation("refund requires a reason".into())
                            })?;
                        payment.refund = Some(RefundInfo {
                            reason,
                            refunded_at: Utc::now(),
                            refunded_by: admin,
                        });
                    }
                    _ => {}
                }

                let from = payment.status;
                payment.transition(next, notes.clone(), Some(admin));
                LoggingUtils::log_transition(
                    "payment",
                    &payment.id.to_string(),
                    from.as_str(),
                    next.as_str(),
                    &admin.to_string(),
                );
                Ok(payment.clone())
            })
            .await?;

        // Downstream effects run after the record is committed
        match payment.status {
            PaymentStatus::Verified => {
                self.activations.dispatch(&payment).await;
                self.notify(payment.user, NotificationKind::PaymentVerified, &payment)
                    .await;
            }
            PaymentStatus::Rejected => {
                self.notify(payment.user, NotificationKind::PaymentRejected, &payment)
                    .await;
            }
            _ => {}
        }

        Ok(payment)
    }

    pub async fn list_for_user(&self, user: Uuid, filter: &PaymentFilter) -> Vec<Payment> {
        self.store.list_for_user(user, filter).await
    }

    pub async fn admin_list(&self, filter: &PaymentFilter) -> Vec<Payment> {
        self.store.list_all(filter).await
    }

    pub async fn admin_get(&self, payment_id: Uuid) -> AppResult<Payment> {
        self.store
            .get(payment_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("payment {}", payment_id)))
    }

    /// Verify the target exists and the caller's relationship to it holds
    async fn check_target(
        &self,
        user: Uuid,
        item: ItemRef,
        payment_type: PaymentType,
    ) -> AppResult<()> {
        let owner = match item {
            ItemRef::Listing(id) => {
                let listing = self
                    .catalog
                    .find_listing(id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("listing {}", id)))?;
                listing.owner
            }
            ItemRef::Application(id) => {
                let application = self
                    .catalog
                    .find_application(id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("application {}", id)))?;
                application.owner
            }
            ItemRef::Promotion(id) => {
                let promotion = self
                    .promotions
                    .get(id)
                    .await
                    .ok_or_else(|| AppError::NotFound(format!("promotion {}", id)))?;
                promotion.owner
            }
        };

        match payment_type {
            PaymentType::ServicePayment => {
                // Inverted rule: the caller pays the owner for a service
                if owner == user {
                    return Err(AppError::Authorization(
                        "cannot create a service payment for your own item".into(),
                    ));
                }
            }
            PaymentType::FeaturedListing | PaymentType::ListingFee => {
                if !matches!(item, ItemRef::Listing(_)) {
                    return Err(AppError::Validation(format!(
                        "{} requires a listing target",
                        payment_type.as_str()
                    )));
                }
                if owner != user {
                    return Err(AppError::Authorization(
                        "caller does not own the target item".into(),
                    ));
                }
            }
            PaymentType::ApplicationFee => {
                if !matches!(item, ItemRef::Application(_)) {
                    return Err(AppError::Validation(
                        "application_fee requires an application target".into(),
                    ));
                }
                if owner != user {
                    return Err(AppError::Authorization(
                        "caller does not own the target item".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    async fn notify(&self, user: Uuid, kind: NotificationKind, payment: &Payment) {
        if let Err(e) = self.notifier.notify(user, kind, &payment.reference).await {
            warn!(
                payment_id = %payment.id,
                error = %e,
                "Notification failed; status change already applied"
            );
        }
    }
}

/// Parse an admin-requested target status. Only statuses an admin can ever
/// set are accepted here; pending and submitted are owned by the payer flow.
fn parse_admin_status(s: &str) -> AppResult<PaymentStatus> {
    match s.to_lowercase().as_str() {
        "under_review" => Ok(PaymentStatus::UnderReview),
        "verified" => Ok(PaymentStatus::Verified),
        "rejected" => Ok(PaymentStatus::Rejected),
        "refunded" => Ok(PaymentStatus::Refunded),
        other => Err(AppError::Validation(format!(
            "not an admin-settable status: {}",
            other
        ))),
    }
}
