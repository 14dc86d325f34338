//! Expiration sweep
//!
//! Periodic batch task that moves active promotions whose window has elapsed
//! into `expired`. Idempotent: only records still `active` are transitioned,
//! so a concurrent or repeated run cannot double-transition anything. A
//! failure on one record is logged and the batch continues.

use crate::domain::promotions::PromotionStatus;
use crate::infrastructure::adapters::PromotionsStore;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Summary of one sweep run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub scanned: usize,
    pub expired: usize,
    pub failures: usize,
}

pub struct ExpirationSweep {
    store: PromotionsStore,
}

impl ExpirationSweep {
    pub fn new(store: PromotionsStore) -> Self {
        Self { store }
    }

    /// Run one sweep over all due promotions
    pub async fn run_once(&self) -> SweepReport {
        let now = Utc::now();
        let due = self.store.due_for_expiry(now).await;
        let mut report = SweepReport {
            scanned: due.len(),
            ..Default::default()
        };

        for id in due {
            let result = self
                .store
                .update(id, |promotion| {
                    // Status may have changed since the scan; only expire
                    // what is still active
                    if promotion.status != PromotionStatus::Active {
                        return Ok(false);
                    }
                    promotion.status = PromotionStatus::Expired;
                    promotion.updated_at = Utc::now();
                    Ok(true)
                })
                .await;

            match result {
                Ok(true) => report.expired += 1,
                Ok(false) => {}
                Err(e) => {
                    report.failures += 1;
                    error!(promotion_id = %id, error = %e, "Sweep failed for record; continuing");
                }
            }
        }

        if report.expired > 0 || report.failures > 0 {
            info!(
                scanned = report.scanned,
                expired = report.expired,
                failures = report.failures,
                "Expiration sweep completed"
            );
        }
        report
    }

    /// Spawn the periodic sweep loop
    pub fn spawn(self: Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                self.run_once().await;
            }
        })
    }
}
