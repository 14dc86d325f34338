//! Promotion scheduling service
//!
//! The promotion path parallels the payment lifecycle but owns its schedule:
//! approval computes the concrete active window, and read-time selection
//! applies the slot rotation policy. Duplicate creation is deliberately soft,
//! returning the open promotion for the same (listing, placement) so a payer
//! can continue where they left off.

use crate::application::services::pricing_service::PricingService;
use crate::domain::catalog::{ListingCatalog, NotificationKind, Notifier, QrRenderer};
use crate::domain::pricing::{Chain, RotationStrategy};
use crate::domain::promotions::{
    Placement, Promotion, PromotionMetrics, PromotionPricing, PromotionProof, PromotionStatus,
    Schedule,
};
use crate::infrastructure::adapters::{InsertOutcome, PromotionFilter, PromotionsStore};
use crate::shared::error::{AppError, AppResult};
use crate::shared::logging::LoggingUtils;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePromotionRequest {
    pub listing: Uuid,
    pub placement: String,
    pub duration_days: u32,
    pub chain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionCreatedResponse {
    pub promotion: Promotion,
    pub wallet_address: String,
    pub amount: f64,
    pub currency: String,
    pub chain: Chain,
    pub qr_image: Option<String>,
    /// True when an open promotion for the same (listing, placement) was
    /// returned instead of a new record
    pub existing_promotion: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPromotionProofRequest {
    pub tx_hash: String,
    pub screenshot: Option<String>,
}

/// Admin decision on a reviewed promotion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    Review,
    Approve,
    Reject,
    Expire,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDecideRequest {
    pub action: AdminAction,
    pub duration_days_override: Option<u32>,
}

pub struct PromotionsService {
    pricing: Arc<PricingService>,
    store: PromotionsStore,
    catalog: Arc<dyn ListingCatalog>,
    qr: Arc<dyn QrRenderer>,
    notifier: Arc<dyn Notifier>,
}

impl PromotionsService {
    pub fn new(
        pricing: Arc<PricingService>,
        store: PromotionsStore,
        catalog: Arc<dyn ListingCatalog>,
        qr: Arc<dyn QrRenderer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            pricing,
            store,
            catalog,
            qr,
            notifier,
        }
    }

    /// Create a promotion in `awaiting_payment`, or return the open one for
    /// the same (listing, placement).
    pub async fn create(
        &self,
        owner: Uuid,
        req: CreatePromotionRequest,
    ) -> AppResult<PromotionCreatedResponse> {
        let placement: Placement = req.placement.parse().map_err(AppError::Validation)?;
        let chain: Chain = req.chain.parse().map_err(AppError::Validation)?;

        let listing = self
            .catalog
            .find_listing(req.listing)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("listing {}", req.listing)))?;
        if listing.owner != owner {
            return Err(AppError::Authorization(
                "caller does not own the listing".into(),
            ));
        }
        if !listing.approved_and_active {
            return Err(AppError::Validation(
                "listing must be approved and active before promotion".into(),
            ));
        }

        // Duplicate check comes before pricing resolution: a payer retrying
        // an open request gets their record back even if the config has
        // drifted since the first create
        if let Some(existing) = self.store.find_open(listing.id, placement).await {
            return Ok(self.existing_response(existing));
        }

        let row = self
            .pricing
            .resolve_price(placement.as_str(), Some(req.duration_days))
            .await?;
        let wallet_address = self.pricing.require_wallet(chain).await?;
        let qr_image = self.qr.render_qr(&wallet_address).ok();

        let now = Utc::now();
        let promotion = Promotion {
            id: Uuid::new_v4(),
            listing: listing.id,
            owner,
            placement,
            listing_category: listing.category.clone(),
            pricing: PromotionPricing {
                placement,
                duration_days: row.duration_days,
                amount: row.amount,
                currency: row.currency.clone(),
                chain,
            },
            proof: PromotionProof {
                wallet_address: wallet_address.clone(),
                ..Default::default()
            },
            schedule: None,
            metrics: PromotionMetrics::default(),
            status: PromotionStatus::AwaitingPayment,
            created_at: now,
            updated_at: now,
        };

        // The in-lock guard stays to close the race between the lookup above
        // and this insert
        match self.store.insert_or_existing(promotion).await {
            InsertOutcome::Inserted(promotion) => Ok(PromotionCreatedResponse {
                promotion,
                wallet_address,
                amount: row.amount,
                currency: row.currency,
                chain,
                qr_image,
                existing_promotion: false,
            }),
            InsertOutcome::Existing(existing) => Ok(self.existing_response(existing)),
        }
    }

    /// Response for the duplicate path, echoing the existing record's own
    /// captured payment details rather than a fresh pricing resolution
    fn existing_response(&self, promotion: Promotion) -> PromotionCreatedResponse {
        let qr_image = self.qr.render_qr(&promotion.proof.wallet_address).ok();
        PromotionCreatedResponse {
            wallet_address: promotion.proof.wallet_address.clone(),
            amount: promotion.pricing.amount,
            currency: promotion.pricing.currency.clone(),
            chain: promotion.pricing.chain,
            qr_image,
            existing_promotion: true,
            promotion,
        }
    }

    /// Record proof of payment and move to `submitted`
    pub async fn submit_proof(
        &self,
        promotion_id: Uuid,
        owner: Uuid,
        req: SubmitPromotionProofRequest,
    ) -> AppResult<Promotion> {
        if req.tx_hash.trim().is_empty() {
            return Err(AppError::Validation("tx_hash is required".into()));
        }

        self.store
            .update(promotion_id, |promotion| {
                if promotion.owner != owner {
                    return Err(AppError::Authorization(
                        "only the promotion owner may submit proof".into(),
                    ));
                }
                if !promotion.status.accepts_proof() {
                    LoggingUtils::log_transition_denied(
                        "promotion",
                        &promotion.id.to_string(),
                        promotion.status.as_str(),
                        PromotionStatus::Submitted.as_str(),
                    );
                    return Err(AppError::Validation(format!(
                        "proof not accepted from status {}",
                        promotion.status.as_str()
                    )));
                }

                promotion.proof.tx_hash = Some(req.tx_hash.clone());
                promotion.proof.screenshot = req.screenshot.clone();
                let from = promotion.status;
                promotion.status = PromotionStatus::Submitted;
                promotion.updated_at = Utc::now();
                LoggingUtils::log_transition(
                    "promotion",
                    &promotion.id.to_string(),
                    from.as_str(),
                    promotion.status.as_str(),
                    &owner.to_string(),
                );
                Ok(promotion.clone())
            })
            .await
    }

    /// Admin decision. Approval computes the active window from now plus the
    /// paid (or overridden) duration; expire is a manual early termination.
    pub async fn admin_decide(
        &self,
        promotion_id: Uuid,
        admin: Uuid,
        req: AdminDecideRequest,
    ) -> AppResult<Promotion> {
        let promotion = self
            .store
            .update(promotion_id, |promotion| {
                let from = promotion.status;
                let now = Utc::now();

                match req.action {
                    AdminAction::Review => {
                        if from != PromotionStatus::Submitted {
                            return Err(illegal(promotion, PromotionStatus::UnderReview));
                        }
                        promotion.status = PromotionStatus::UnderReview;
                    }
                    AdminAction::Approve => {
                        if !matches!(
                            from,
                            PromotionStatus::Submitted | PromotionStatus::UnderReview
                        ) {
                            return Err(illegal(promotion, PromotionStatus::Active));
                        }
                        let days = req
                            .duration_days_override
                            .unwrap_or(promotion.pricing.duration_days);
                        promotion.schedule = Some(Schedule {
                            start_at: now,
                            end_at: now + Duration::days(days as i64),
                        });
                        promotion.proof.verified_at = Some(now);
                        promotion.proof.reviewed_by = Some(admin);
                        promotion.status = PromotionStatus::Active;
                    }
                    AdminAction::Reject => {
                        if !matches!(
                            from,
                            PromotionStatus::Submitted | PromotionStatus::UnderReview
                        ) {
                            return Err(illegal(promotion, PromotionStatus::Rejected));
                        }
                        promotion.status = PromotionStatus::Rejected;
                    }
                    AdminAction::Expire => {
                        if from != PromotionStatus::Active {
                            return Err(illegal(promotion, PromotionStatus::Expired));
                        }
                        if let Some(schedule) = promotion.schedule.as_mut() {
                            schedule.end_at = now;
                        }
                        promotion.status = PromotionStatus::Expired;
                    }
                }

                promotion.updated_at = now;
                LoggingUtils::log_transition(
                    "promotion",
                    &promotion.id.to_string(),
                    from.as_str(),
                    promotion.status.as_str(),
                    &admin.to_string(),
                );
                Ok(promotion.clone())
            })
            .await?;

        match promotion.status {
            PromotionStatus::Active => {
                self.notify(&promotion, NotificationKind::PromotionApproved).await
            }
            PromotionStatus::Rejected => {
                self.notify(&promotion, NotificationKind::PromotionRejected).await
            }
            _ => {}
        }

        Ok(promotion)
    }

    /// Owner cancellation, legal before any admin decision
    pub async fn cancel(&self, promotion_id: Uuid, owner: Uuid) -> AppResult<Promotion> {
        self.store
            .update(promotion_id, |promotion| {
                if promotion.owner != owner {
                    return Err(AppError::Authorization(
                        "only the promotion owner may cancel".into(),
                    ));
                }
                if !matches!(
                    promotion.status,
                    PromotionStatus::AwaitingPayment | PromotionStatus::Submitted
                ) {
                    return Err(illegal(promotion, PromotionStatus::Cancelled));
                }
                promotion.status = PromotionStatus::Cancelled;
                promotion.updated_at = Utc::now();
                Ok(promotion.clone())
            })
            .await
    }

    /// Count a click on a currently live promotion
    pub async fn record_click(&self, promotion_id: Uuid) -> AppResult<Promotion> {
        self.store
            .update(promotion_id, |promotion| {
                let now = Utc::now();
                if !promotion.is_live(now) {
                    return Err(AppError::Validation("promotion is not active".into()));
                }
                promotion.metrics.clicks += 1;
                promotion.metrics.last_click_at = Some(now);
                Ok(promotion.clone())
            })
            .await
    }

    /// Read-time selection for a placement. Homepage applies the configured
    /// rotation strategy and the slot cap; category_top returns every live
    /// match newest first. No writes happen here.
    pub async fn select_active(
        &self,
        placement: Placement,
        category: Option<&str>,
    ) -> Vec<Promotion> {
        let now = Utc::now();
        match placement {
            Placement::Homepage => {
                let mut live = self.store.select_live(Placement::Homepage, None, now).await;
                let config = self.pricing.config().await;
                if config.settings.rotation == RotationStrategy::Random {
                    use rand::seq::SliceRandom;
                    live.shuffle(&mut rand::rng());
                }
                live.truncate(config.limits.homepage_max_slots);
                live
            }
            Placement::CategoryTop => {
                self.store
                    .select_live(Placement::CategoryTop, category, now)
                    .await
            }
        }
    }

    pub async fn list_for_owner(&self, owner: Uuid, filter: &PromotionFilter) -> Vec<Promotion> {
        self.store.list_for_owner(owner, filter).await
    }

    pub async fn admin_list(&self, filter: &PromotionFilter) -> Vec<Promotion> {
        self.store.list_all(filter).await
    }

    pub async fn admin_get(&self, promotion_id: Uuid) -> AppResult<Promotion> {
        self.store
            .get(promotion_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("promotion {}", promotion_id)))
    }

    async fn notify(&self, promotion: &Promotion, kind: NotificationKind) {
        if let Err(e) = self
            .notifier
            .notify(promotion.owner, kind, &promotion.id.to_string())
            .await
        {
            warn!(
                promotion_id = %promotion.id,
                error = %e,
                "Notification failed; status change already applied"
            );
        }
    }
}

fn illegal(promotion: &Promotion, to: PromotionStatus) -> AppError {
    LoggingUtils::log_transition_denied(
        "promotion",
        &promotion.id.to_string(),
        promotion.status.as_str(),
        to.as_str(),
    );
    AppError::Validation(format!(
        "cannot move promotion from {} to {}",
        promotion.status.as_str(),
        to.as_str()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ListingSummary;
    use crate::infrastructure::adapters::{
        CatalogDirectory, DataUrlQrRenderer, LoggingNotifier, PricingStore,
    };

    struct Fixture {
        service: PromotionsService,
        pricing: Arc<PricingService>,
        store: PromotionsStore,
        catalog: Arc<CatalogDirectory>,
        owner: Uuid,
        listing: Uuid,
    }

    async fn fixture() -> Fixture {
        let pricing = Arc::new(PricingService::new(PricingStore::new()));
        let mut config = pricing.config().await;
        config.wallets.insert(Chain::Btc, "addr1".to_string());
        pricing.update(config).await;

        let catalog = Arc::new(CatalogDirectory::new());
        let owner = Uuid::new_v4();
        let listing = Uuid::new_v4();
        catalog
            .upsert_listing(ListingSummary {
                id: listing,
                owner,
                category: "vehicles".to_string(),
                approved_and_active: true,
            })
            .await;

        let store = PromotionsStore::new();
        let service = PromotionsService::new(
            pricing.clone(),
            store.clone(),
            catalog.clone(),
            Arc::new(DataUrlQrRenderer::new()),
            Arc::new(LoggingNotifier::new()),
        );

        Fixture {
            service,
            pricing,
            store,
            catalog,
            owner,
            listing,
        }
    }

    fn homepage_request(listing: Uuid) -> CreatePromotionRequest {
        CreatePromotionRequest {
            listing,
            placement: "homepage".to_string(),
            duration_days: 7,
            chain: "btc".to_string(),
        }
    }

    async fn approved_promotion(f: &Fixture, listing: Uuid) -> Promotion {
        let created = f.service.create(f.owner, homepage_request(listing)).await.unwrap();
        f.service
            .submit_proof(
                created.promotion.id,
                f.owner,
                SubmitPromotionProofRequest {
                    tx_hash: "abc123".to_string(),
                    screenshot: None,
                },
            )
            .await
            .unwrap();
        f.service
            .admin_decide(
                created.promotion.id,
                Uuid::new_v4(),
                AdminDecideRequest {
                    action: AdminAction::Approve,
                    duration_days_override: None,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_prices_by_placement() {
        let f = fixture().await;
        let created = f.service.create(f.owner, homepage_request(f.listing)).await.unwrap();

        assert_eq!(created.amount, 50.0);
        assert_eq!(created.wallet_address, "addr1");
        assert!(!created.existing_promotion);
        assert_eq!(created.promotion.status, PromotionStatus::AwaitingPayment);
        assert!(created.promotion.schedule.is_none());
        assert_eq!(created.promotion.listing_category, "vehicles");
    }

    #[tokio::test]
    async fn test_duplicate_create_returns_existing() {
        let f = fixture().await;
        let first = f.service.create(f.owner, homepage_request(f.listing)).await.unwrap();
        let second = f.service.create(f.owner, homepage_request(f.listing)).await.unwrap();

        assert!(second.existing_promotion);
        assert_eq!(second.promotion.id, first.promotion.id);
        assert_eq!(second.wallet_address, "addr1");
    }

    #[tokio::test]
    async fn test_duplicate_create_survives_pricing_drift() {
        let f = fixture().await;
        let first = f.service.create(f.owner, homepage_request(f.listing)).await.unwrap();

        // Wallet cleared and the paid duration de-listed after the first
        // create; the retry must still return the open record
        let mut config = f.pricing.config().await;
        config.wallets.insert(Chain::Btc, String::new());
        config.prices.insert("homepage".to_string(), vec![]);
        f.pricing.update(config).await;

        let retry = f.service.create(f.owner, homepage_request(f.listing)).await.unwrap();
        assert!(retry.existing_promotion);
        assert_eq!(retry.promotion.id, first.promotion.id);
        assert_eq!(retry.wallet_address, "addr1");
        assert_eq!(retry.amount, 50.0);
    }

    #[tokio::test]
    async fn test_unapproved_listing_is_rejected() {
        let f = fixture().await;
        let unapproved = Uuid::new_v4();
        f.catalog
            .upsert_listing(ListingSummary {
                id: unapproved,
                owner: f.owner,
                category: "vehicles".to_string(),
                approved_and_active: false,
            })
            .await;

        let result = f.service.create(f.owner, homepage_request(unapproved)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_approval_computes_window() {
        let f = fixture().await;
        let before = Utc::now();
        let promotion = approved_promotion(&f, f.listing).await;
        let after = Utc::now();

        assert_eq!(promotion.status, PromotionStatus::Active);
        let schedule = promotion.schedule.unwrap();
        assert!(schedule.start_at >= before && schedule.start_at <= after);
        assert_eq!(schedule.end_at - schedule.start_at, Duration::days(7));
        assert!(promotion.proof.verified_at.is_some());
    }

    #[tokio::test]
    async fn test_approval_honors_duration_override() {
        let f = fixture().await;
        let created = f.service.create(f.owner, homepage_request(f.listing)).await.unwrap();
        f.service
            .submit_proof(
                created.promotion.id,
                f.owner,
                SubmitPromotionProofRequest {
                    tx_hash: "abc123".to_string(),
                    screenshot: None,
                },
            )
            .await
            .unwrap();

        let promotion = f
            .service
            .admin_decide(
                created.promotion.id,
                Uuid::new_v4(),
                AdminDecideRequest {
                    action: AdminAction::Approve,
                    duration_days_override: Some(14),
                },
            )
            .await
            .unwrap();

        let schedule = promotion.schedule.unwrap();
        assert_eq!(schedule.end_at - schedule.start_at, Duration::days(14));
    }

    #[tokio::test]
    async fn test_approve_from_awaiting_payment_is_illegal() {
        let f = fixture().await;
        let created = f.service.create(f.owner, homepage_request(f.listing)).await.unwrap();

        let result = f
            .service
            .admin_decide(
                created.promotion.id,
                Uuid::new_v4(),
                AdminDecideRequest {
                    action: AdminAction::Approve,
                    duration_days_override: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(
            f.service.admin_get(created.promotion.id).await.unwrap().status,
            PromotionStatus::AwaitingPayment
        );
    }

    #[tokio::test]
    async fn test_admin_decision_table_closure() {
        use PromotionStatus::*;
        let all = [
            AwaitingPayment,
            Submitted,
            UnderReview,
            Active,
            Expired,
            Rejected,
            Cancelled,
        ];
        let actions = [
            AdminAction::Review,
            AdminAction::Approve,
            AdminAction::Reject,
            AdminAction::Expire,
        ];
        let allowed = |action: AdminAction, from: PromotionStatus| match action {
            AdminAction::Review => from == Submitted,
            AdminAction::Approve | AdminAction::Reject => {
                matches!(from, Submitted | UnderReview)
            }
            AdminAction::Expire => from == Active,
        };

        let f = fixture().await;
        for from in all {
            for action in actions {
                let now = Utc::now();
                let promotion = Promotion {
                    id: Uuid::new_v4(),
                    listing: Uuid::new_v4(),
                    owner: f.owner,
                    placement: Placement::Homepage,
                    listing_category: "vehicles".to_string(),
                    pricing: PromotionPricing {
                        placement: Placement::Homepage,
                        duration_days: 7,
                        amount: 50.0,
                        currency: "USD".to_string(),
                        chain: Chain::Btc,
                    },
                    proof: PromotionProof::default(),
                    schedule: None,
                    metrics: PromotionMetrics::default(),
                    status: from,
                    created_at: now,
                    updated_at: now,
                };
                let id = promotion.id;
                f.store.insert_or_existing(promotion).await;

                let result = f
                    .service
                    .admin_decide(
                        id,
                        Uuid::new_v4(),
                        AdminDecideRequest {
                            action,
                            duration_days_override: None,
                        },
                    )
                    .await;
                assert_eq!(
                    result.is_ok(),
                    allowed(action, from),
                    "{:?} from {:?}",
                    action,
                    from
                );
                if result.is_err() {
                    // Denied decisions leave the record untouched
                    assert_eq!(f.store.get(id).await.unwrap().status, from);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_manual_expire_clamps_end_at() {
        let f = fixture().await;
        let promotion = approved_promotion(&f, f.listing).await;

        let expired = f
            .service
            .admin_decide(
                promotion.id,
                Uuid::new_v4(),
                AdminDecideRequest {
                    action: AdminAction::Expire,
                    duration_days_override: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(expired.status, PromotionStatus::Expired);
        assert!(expired.schedule.unwrap().end_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_record_click_only_when_live() {
        let f = fixture().await;
        let created = f.service.create(f.owner, homepage_request(f.listing)).await.unwrap();

        let early = f.service.record_click(created.promotion.id).await;
        assert!(matches!(early, Err(AppError::Validation(_))));

        let promotion = approved_promotion(&f, f.listing).await;
        assert_eq!(promotion.id, created.promotion.id);

        let clicked = f.service.record_click(promotion.id).await.unwrap();
        assert_eq!(clicked.metrics.clicks, 1);
        assert!(clicked.metrics.last_click_at.is_some());

        let clicked_again = f.service.record_click(promotion.id).await.unwrap();
        assert_eq!(clicked_again.metrics.clicks, 2);
    }

    #[tokio::test]
    async fn test_owner_cancel_before_decision() {
        let f = fixture().await;
        let created = f.service.create(f.owner, homepage_request(f.listing)).await.unwrap();

        let stranger = f.service.cancel(created.promotion.id, Uuid::new_v4()).await;
        assert!(matches!(stranger, Err(AppError::Authorization(_))));

        let cancelled = f.service.cancel(created.promotion.id, f.owner).await.unwrap();
        assert_eq!(cancelled.status, PromotionStatus::Cancelled);
    }

    async fn seed_listings(f: &Fixture, count: usize) -> Vec<Uuid> {
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            let id = Uuid::new_v4();
            f.catalog
                .upsert_listing(ListingSummary {
                    id,
                    owner: f.owner,
                    category: "vehicles".to_string(),
                    approved_and_active: true,
                })
                .await;
            ids.push(id);
        }
        ids
    }

    #[tokio::test]
    async fn test_homepage_rotation_respects_slot_cap() {
        let f = fixture().await;
        for listing in seed_listings(&f, 12).await {
            approved_promotion(&f, listing).await;
        }

        let shown = f.service.select_active(Placement::Homepage, None).await;
        assert_eq!(shown.len(), 10);
    }

    #[tokio::test]
    async fn test_random_rotation_still_bounded() {
        let f = fixture().await;
        let mut config = f.pricing.config().await;
        config.settings.rotation = RotationStrategy::Random;
        config.limits.homepage_max_slots = 3;
        f.pricing.update(config).await;

        for listing in seed_listings(&f, 5).await {
            approved_promotion(&f, listing).await;
        }

        let shown = f.service.select_active(Placement::Homepage, None).await;
        assert_eq!(shown.len(), 3);
    }

    #[tokio::test]
    async fn test_category_top_is_uncapped_and_filtered() {
        let f = fixture().await;
        let listings = seed_listings(&f, 2).await;
        for listing in &listings {
            let created = f
                .service
                .create(
                    f.owner,
                    CreatePromotionRequest {
                        listing: *listing,
                        placement: "category_top".to_string(),
                        duration_days: 7,
                        chain: "btc".to_string(),
                    },
                )
                .await
                .unwrap();
            f.service
                .submit_proof(
                    created.promotion.id,
                    f.owner,
                    SubmitPromotionProofRequest {
                        tx_hash: "abc123".to_string(),
                        screenshot: None,
                    },
                )
                .await
                .unwrap();
            f.service
                .admin_decide(
                    created.promotion.id,
                    Uuid::new_v4(),
                    AdminDecideRequest {
                        action: AdminAction::Approve,
                        duration_days_override: None,
                    },
                )
                .await
                .unwrap();
        }

        let vehicles = f
            .service
            .select_active(Placement::CategoryTop, Some("vehicles"))
            .await;
        assert_eq!(vehicles.len(), 2);

        let housing = f
            .service
            .select_active(Placement::CategoryTop, Some("housing"))
            .await;
        assert!(housing.is_empty());
    }
}
