//! Promotions domain models and types
//!
//! A `Promotion` places one listing into one advertising slot for a paid
//! duration. Unlike the generic payment path it carries its proof slot inline
//! and owns a concrete schedule once approved. The active window is the
//! half-open interval `[start_at, end_at)`.

use crate::domain::pricing::Chain;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Advertising slot type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Homepage,
    CategoryTop,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Homepage => "homepage",
            Placement::CategoryTop => "category_top",
        }
    }
}

impl std::str::FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "homepage" => Ok(Placement::Homepage),
            "category_top" => Ok(Placement::CategoryTop),
            _ => Err(format!("unsupported placement: {}", s)),
        }
    }
}

/// Promotion lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PromotionStatus {
    AwaitingPayment,
    Submitted,
    UnderReview,
    Active,
    Expired,
    Rejected,
    Cancelled,
}

impl PromotionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromotionStatus::AwaitingPayment => "awaiting_payment",
            PromotionStatus::Submitted => "submitted",
            PromotionStatus::UnderReview => "under_review",
            PromotionStatus::Active => "active",
            PromotionStatus::Expired => "expired",
            PromotionStatus::Rejected => "rejected",
            PromotionStatus::Cancelled => "cancelled",
        }
    }

    /// A non-terminal promotion blocks creation of a duplicate for the same
    /// (listing, placement) pair; the create path returns it instead.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            PromotionStatus::AwaitingPayment
                | PromotionStatus::Submitted
                | PromotionStatus::UnderReview
                | PromotionStatus::Active
        )
    }

    /// Whether a proof submission is legal from this status
    pub fn accepts_proof(&self) -> bool {
        matches!(
            self,
            PromotionStatus::AwaitingPayment
                | PromotionStatus::Submitted
                | PromotionStatus::UnderReview
                | PromotionStatus::Rejected
        )
    }
}

/// Pricing captured at creation time, immutable afterwards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionPricing {
    pub placement: Placement,
    pub duration_days: u32,
    pub amount: f64,
    pub currency: String,
    pub chain: Chain,
}

/// Inline proof-of-payment slot
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PromotionProof {
    pub wallet_address: String,
    pub tx_hash: Option<String>,
    pub screenshot: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
}

/// Concrete active window, set at approval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

/// Click counters; monotonically increasing
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PromotionMetrics {
    pub clicks: u64,
    pub last_click_at: Option<DateTime<Utc>>,
}

/// Promotion record persisted in the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    pub id: Uuid,
    pub listing: Uuid,
    pub owner: Uuid,
    pub placement: Placement,
    /// Copied from the listing at creation for category_top filtering
    pub listing_category: String,
    pub pricing: PromotionPricing,
    pub proof: PromotionProof,
    pub schedule: Option<Schedule>,
    pub metrics: PromotionMetrics,
    pub status: PromotionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Promotion {
    /// Currently shown to the public: approved and inside the active window
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.status == PromotionStatus::Active
            && self
                .schedule
                .as_ref()
                .map(|s| s.start_at <= now && now < s.end_at)
                .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_promotion(status: PromotionStatus, schedule: Option<Schedule>) -> Promotion {
        let now = Utc::now();
        Promotion {
            id: Uuid::new_v4(),
            listing: Uuid::new_v4(),
            owner: Uuid::new_v4(),
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
            schedule,
            metrics: PromotionMetrics::default(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_live_window_is_half_open() {
        let now = Utc::now();
        let schedule = Schedule {
            start_at: now - Duration::days(1),
            end_at: now + Duration::days(1),
        };
        let promotion = sample_promotion(PromotionStatus::Active, Some(schedule.clone()));
        assert!(promotion.is_live(now));
        assert!(promotion.is_live(schedule.start_at));
        assert!(!promotion.is_live(schedule.end_at));
    }

    #[test]
    fn test_active_without_schedule_is_not_live() {
        let promotion = sample_promotion(PromotionStatus::Active, None);
        assert!(!promotion.is_live(Utc::now()));
    }

    #[test]
    fn test_expired_is_not_live_even_inside_window() {
        let now = Utc::now();
        let schedule = Schedule {
            start_at: now - Duration::days(1),
            end_at: now + Duration::days(1),
        };
        let promotion = sample_promotion(PromotionStatus::Expired, Some(schedule));
        assert!(!promotion.is_live(now));
    }

    #[test]
    fn test_open_statuses() {
        assert!(PromotionStatus::AwaitingPayment.is_open());
        assert!(PromotionStatus::Active.is_open());
        assert!(!PromotionStatus::Expired.is_open());
        assert!(!PromotionStatus::Rejected.is_open());
        assert!(!PromotionStatus::Cancelled.is_open());
    }

    #[test]
    fn test_proof_accepted_after_rejection() {
        assert!(PromotionStatus::Rejected.accepts_proof());
        assert!(!PromotionStatus::Active.accepts_proof());
        assert!(!PromotionStatus::Expired.accepts_proof());
    }
}
