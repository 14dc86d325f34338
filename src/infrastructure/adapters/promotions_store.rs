//! In-memory promotions store
//!
//! Mirrors the payments store's locking discipline: mutations run under the
//! write lock, and the (listing, placement) duplicate guard is checked inside
//! the same critical section as the insert. Read-time selection of live
//! promotions takes only the read lock and never writes.

use crate::domain::promotions::{Placement, Promotion, PromotionStatus};
use crate::shared::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Filters for promotion listing queries
#[derive(Debug, Clone, Default)]
pub struct PromotionFilter {
    pub status: Option<PromotionStatus>,
    pub placement: Option<Placement>,
}

impl PromotionFilter {
    fn matches(&self, promotion: &Promotion) -> bool {
        self.status.map(|s| promotion.status == s).unwrap_or(true)
            && self
                .placement
                .map(|p| promotion.placement == p)
                .unwrap_or(true)
    }
}

/// Outcome of a guarded insert
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    Inserted(Promotion),
    /// An open promotion already exists for this (listing, placement);
    /// the caller gets it back instead of an error.
    Existing(Promotion),
}

/// Abstraction for persisting promotion records
#[derive(Clone, Default)]
pub struct PromotionsStore {
    records: Arc<tokio::sync::RwLock<HashMap<Uuid, Promotion>>>,
}

impl PromotionsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless an open promotion for the same (listing, placement)
    /// already exists, in which case that record is returned.
    pub async fn insert_or_existing(&self, promotion: Promotion) -> InsertOutcome {
        let mut records = self.records.write().await;

        if let Some(existing) = records.values().find(|p| {
            p.status.is_open()
                && p.listing == promotion.listing
                && p.placement == promotion.placement
        }) {
            return InsertOutcome::Existing(existing.clone());
        }

        records.insert(promotion.id, promotion.clone());
        InsertOutcome::Inserted(promotion)
    }

    pub async fn get(&self, id: Uuid) -> Option<Promotion> {
        self.records.read().await.get(&id).cloned()
    }

    /// Open promotion for a (listing, placement), if any
    pub async fn find_open(&self, listing: Uuid, placement: Placement) -> Option<Promotion> {
        self.records
            .read()
            .await
            .values()
            .find(|p| p.status.is_open() && p.listing == listing && p.placement == placement)
            .cloned()
    }

    /// Atomic read-modify-write on one record. The closure runs under the
    /// write lock; returning an error leaves the record unchanged.
    pub async fn update<R, F>(&self, id: Uuid, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut Promotion) -> AppResult<R>,
    {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("promotion {}", id)))?;
        let mut candidate = record.clone();
        let result = f(&mut candidate)?;
        *record = candidate;
        Ok(result)
    }

    pub async fn list_for_owner(&self, owner: Uuid, filter: &PromotionFilter) -> Vec<Promotion> {
        let records = self.records.read().await;
        let mut matches: Vec<Promotion> = records
            .values()
            .filter(|p| p.owner == owner && filter.matches(p))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches
    }

    pub async fn list_all(&self, filter: &PromotionFilter) -> Vec<Promotion> {
        let records = self.records.read().await;
        let mut matches: Vec<Promotion> = records
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches
    }

    /// Live promotions for a placement, newest first. Category filtering uses
    /// the category snapshot taken at creation, so no join is needed.
    /// Read-only by design; rotation and slot caps are applied by the caller.
    pub async fn select_live(
        &self,
        placement: Placement,
        category: Option<&str>,
        now: DateTime<Utc>,
    ) -> Vec<Promotion> {
        let records = self.records.read().await;
        let mut matches: Vec<Promotion> = records
            .values()
            .filter(|p| {
                p.placement == placement
                    && p.is_live(now)
                    && category
                        .map(|c| p.listing_category.eq_ignore_ascii_case(c))
                        .unwrap_or(true)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches
    }

    /// Ids of active promotions whose window has elapsed
    pub async fn due_for_expiry(&self, now: DateTime<Utc>) -> Vec<Uuid> {
        let records = self.records.read().await;
        records
            .values()
            .filter(|p| {
                p.status == PromotionStatus::Active
                    && p.schedule.as_ref().map(|s| s.end_at <= now).unwrap_or(false)
            })
            .map(|p| p.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::Chain;
    use crate::domain::promotions::{
        PromotionMetrics, PromotionPricing, PromotionProof, Schedule,
    };
    use chrono::Duration;

    fn sample_promotion(listing: Uuid, placement: Placement, status: PromotionStatus) -> Promotion {
        let now = Utc::now();
        Promotion {
            id: Uuid::new_v4(),
            listing,
            owner: Uuid::new_v4(),
            placement,
            listing_category: "vehicles".to_string(),
            pricing: PromotionPricing {
                placement,
                duration_days: 7,
                amount: 50.0,
                currency: "USD".to_string(),
                chain: Chain::Btc,
            },
            proof: PromotionProof::default(),
            schedule: None,
            metrics: PromotionMetrics::default(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn with_window(mut promotion: Promotion, start_offset_days: i64, end_offset_days: i64) -> Promotion {
        let now = Utc::now();
        promotion.schedule = Some(Schedule {
            start_at: now + Duration::days(start_offset_days),
            end_at: now + Duration::days(end_offset_days),
        });
        promotion
    }

    #[tokio::test]
    async fn test_insert_then_duplicate_returns_existing() {
        let store = PromotionsStore::new();
        let listing = Uuid::new_v4();
        let first = sample_promotion(listing, Placement::Homepage, PromotionStatus::AwaitingPayment);
        let first_id = first.id;

        match store.insert_or_existing(first).await {
            InsertOutcome::Inserted(_) => {}
            InsertOutcome::Existing(_) => panic!("fresh insert reported as existing"),
        }

        let duplicate =
            sample_promotion(listing, Placement::Homepage, PromotionStatus::AwaitingPayment);
        match store.insert_or_existing(duplicate).await {
            InsertOutcome::Existing(existing) => assert_eq!(existing.id, first_id),
            InsertOutcome::Inserted(_) => panic!("duplicate was inserted"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_guard_is_per_placement() {
        let store = PromotionsStore::new();
        let listing = Uuid::new_v4();
        store
            .insert_or_existing(sample_promotion(
                listing,
                Placement::Homepage,
                PromotionStatus::AwaitingPayment,
            ))
            .await;

        let other_placement =
            sample_promotion(listing, Placement::CategoryTop, PromotionStatus::AwaitingPayment);
        assert!(matches!(
            store.insert_or_existing(other_placement).await,
            InsertOutcome::Inserted(_)
        ));
    }

    #[tokio::test]
    async fn test_terminal_promotion_does_not_block_new_one() {
        let store = PromotionsStore::new();
        let listing = Uuid::new_v4();
        store
            .insert_or_existing(sample_promotion(
                listing,
                Placement::Homepage,
                PromotionStatus::Expired,
            ))
            .await;

        let fresh = sample_promotion(listing, Placement::Homepage, PromotionStatus::AwaitingPayment);
        assert!(matches!(
            store.insert_or_existing(fresh).await,
            InsertOutcome::Inserted(_)
        ));
    }

    #[tokio::test]
    async fn test_select_live_respects_window_and_category() {
        let store = PromotionsStore::new();
        let live = with_window(
            sample_promotion(Uuid::new_v4(), Placement::CategoryTop, PromotionStatus::Active),
            -1,
            1,
        );
        let elapsed = with_window(
            sample_promotion(Uuid::new_v4(), Placement::CategoryTop, PromotionStatus::Active),
            -3,
            -1,
        );
        store.insert_or_existing(live.clone()).await;
        store.insert_or_existing(elapsed).await;

        let now = Utc::now();
        let hits = store
            .select_live(Placement::CategoryTop, Some("vehicles"), now)
            .await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, live.id);

        let misses = store
            .select_live(Placement::CategoryTop, Some("housing"), now)
            .await;
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn test_due_for_expiry_only_returns_elapsed_active() {
        let store = PromotionsStore::new();
        let elapsed = with_window(
            sample_promotion(Uuid::new_v4(), Placement::Homepage, PromotionStatus::Active),
            -10,
            -1,
        );
        let running = with_window(
            sample_promotion(Uuid::new_v4(), Placement::Homepage, PromotionStatus::Active),
            -1,
            5,
        );
        let already_expired = with_window(
            sample_promotion(Uuid::new_v4(), Placement::Homepage, PromotionStatus::Expired),
            -10,
            -1,
        );
        store.insert_or_existing(elapsed.clone()).await;
        store.insert_or_existing(running).await;
        store.insert_or_existing(already_expired).await;

        let due = store.due_for_expiry(Utc::now()).await;
        assert_eq!(due, vec![elapsed.id]);
    }
}
