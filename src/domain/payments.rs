//! Payments domain models and types
//!
//! A `Payment` records one request to pay for one feature on one target item.
//! Status changes only happen through the lifecycle operations in the
//! application layer; every change appends one timeline entry. Records are
//! never deleted so the timeline doubles as the audit trail.

use crate::domain::pricing::Chain;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of target entities a payment can reference
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Listing,
    Promotion,
    Application,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Listing => "listing",
            ItemKind::Promotion => "promotion",
            ItemKind::Application => "application",
        }
    }
}

/// Polymorphic reference to the entity being paid for.
///
/// The variant selects the target collection; the id points into it. This is
/// a lookup key, not ownership.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ItemRef {
    Listing(Uuid),
    Promotion(Uuid),
    Application(Uuid),
}

impl ItemRef {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemRef::Listing(_) => ItemKind::Listing,
            ItemRef::Promotion(_) => ItemKind::Promotion,
            ItemRef::Application(_) => ItemKind::Application,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            ItemRef::Listing(id) | ItemRef::Promotion(id) | ItemRef::Application(id) => *id,
        }
    }
}

/// Paid feature types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    FeaturedListing,
    ListingFee,
    ApplicationFee,
    ServicePayment,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::FeaturedListing => "featured_listing",
            PaymentType::ListingFee => "listing_fee",
            PaymentType::ApplicationFee => "application_fee",
            PaymentType::ServicePayment => "service_payment",
        }
    }
}

impl std::str::FromStr for PaymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "featured_listing" => Ok(PaymentType::FeaturedListing),
            "listing_fee" => Ok(PaymentType::ListingFee),
            "application_fee" => Ok(PaymentType::ApplicationFee),
            "service_payment" => Ok(PaymentType::ServicePayment),
            _ => Err(format!("unsupported payment type: {}", s)),
        }
    }
}

/// Payment lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Submitted,
    UnderReview,
    Verified,
    Rejected,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Submitted => "submitted",
            PaymentStatus::UnderReview => "under_review",
            PaymentStatus::Verified => "verified",
            PaymentStatus::Rejected => "rejected",
            PaymentStatus::Refunded => "refunded",
        }
    }

    /// A non-terminal payment blocks creation of a duplicate for the same
    /// (user, item, type) tuple.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Pending | PaymentStatus::Submitted | PaymentStatus::UnderReview
        )
    }

    /// Whether a proof submission is legal from this status
    pub fn accepts_proof(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Pending
                | PaymentStatus::Submitted
                | PaymentStatus::UnderReview
                | PaymentStatus::Rejected
        )
    }

    /// Whether an admin may move a payment from `self` to `next`
    pub fn admin_can_transition_to(&self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (PaymentStatus::Submitted, PaymentStatus::UnderReview)
                | (PaymentStatus::Submitted, PaymentStatus::Verified)
                | (PaymentStatus::Submitted, PaymentStatus::Rejected)
                | (PaymentStatus::UnderReview, PaymentStatus::Verified)
                | (PaymentStatus::UnderReview, PaymentStatus::Rejected)
                | (PaymentStatus::Verified, PaymentStatus::Refunded)
        )
    }
}

/// Pricing captured at creation time; immutable afterwards so later price
/// table edits cannot change what a payer owes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingSnapshot {
    pub amount: f64,
    pub currency: String,
    pub chain: Chain,
    pub description: String,
}

/// Mutable proof-of-payment slot
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaymentProof {
    /// Payout address shown to the payer
    pub wallet_address: String,
    pub tx_hash: Option<String>,
    pub screenshot: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
}

/// Feature-specific extra data captured at creation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaymentMetadata {
    /// Duration of the purchased feature, where applicable
    pub duration_days: Option<u32>,
    /// Caller-supplied amount for the service_payment type
    pub custom_amount: Option<f64>,
}

/// One entry in the append-only status history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
    pub updated_by: Option<Uuid>,
}

/// Refund details, populated only when status reaches refunded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundInfo {
    pub reason: String,
    pub refunded_at: DateTime<Utc>,
    pub refunded_by: Uuid,
}

/// Payment record persisted in the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    /// Human-readable reference, format PAY<year><5 digits>
    pub reference: String,
    pub user: Uuid,
    pub item: ItemRef,
    pub payment_type: PaymentType,
    pub pricing: PricingSnapshot,
    pub proof: PaymentProof,
    pub metadata: PaymentMetadata,
    pub status: PaymentStatus,
    pub timeline: Vec<TimelineEntry>,
    pub refund: Option<RefundInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Apply a status change and append the matching timeline entry.
    /// Callers must have validated the transition first.
    pub fn transition(&mut self, next: PaymentStatus, notes: Option<String>, actor: Option<Uuid>) {
        let now = Utc::now();
        self.status = next;
        self.updated_at = now;
        self.timeline.push(TimelineEntry {
            status: next.as_str().to_string(),
            timestamp: now,
            notes,
            updated_by: actor,
        });
    }
}

/// Generate a human-readable payment reference: PAY + year + 5 random digits.
/// Collisions are possible; the store retries on conflict.
pub fn generate_reference() -> String {
    use rand::Rng;
    let year = Utc::now().year();
    let suffix: u32 = rand::rng().random_range(0..100_000);
    format!("PAY{}{:05}", year, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payment(status: PaymentStatus) -> Payment {
        let now = Utc::now();
        Payment {
            id: Uuid::new_v4(),
            reference: generate_reference(),
            user: Uuid::new_v4(),
            item: ItemRef::Listing(Uuid::new_v4()),
            payment_type: PaymentType::FeaturedListing,
            pricing: PricingSnapshot {
                amount: 25.0,
                currency: "USD".to_string(),
                chain: Chain::Btc,
                description: "Featured listing, 7 days".to_string(),
            },
            proof: PaymentProof::default(),
            metadata: PaymentMetadata::default(),
            status,
            timeline: vec![],
            refund: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_reference_format() {
        let reference = generate_reference();
        assert!(reference.starts_with("PAY"));
        assert_eq!(reference.len(), 3 + 4 + 5);
        assert!(reference[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_open_statuses() {
        assert!(PaymentStatus::Pending.is_open());
        assert!(PaymentStatus::Submitted.is_open());
        assert!(PaymentStatus::UnderReview.is_open());
        assert!(!PaymentStatus::Verified.is_open());
        assert!(!PaymentStatus::Rejected.is_open());
        assert!(!PaymentStatus::Refunded.is_open());
    }

    #[test]
    fn test_proof_accepted_after_rejection() {
        assert!(PaymentStatus::Rejected.accepts_proof());
        assert!(!PaymentStatus::Verified.accepts_proof());
        assert!(!PaymentStatus::Refunded.accepts_proof());
    }

    #[test]
    fn test_admin_transition_table_closure() {
        use PaymentStatus::*;
        let all = [Pending, Submitted, UnderReview, Verified, Rejected, Refunded];
        let allowed = [
            (Submitted, UnderReview),
            (Submitted, Verified),
            (Submitted, Rejected),
            (UnderReview, Verified),
            (UnderReview, Rejected),
            (Verified, Refunded),
        ];
        for from in all {
            for to in all {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    from.admin_can_transition_to(to),
                    expected,
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_transition_appends_exactly_one_timeline_entry() {
        let mut payment = sample_payment(PaymentStatus::Pending);
        assert!(payment.timeline.is_empty());
        payment.transition(PaymentStatus::Submitted, Some("proof in".to_string()), None);
        assert_eq!(payment.status, PaymentStatus::Submitted);
        assert_eq!(payment.timeline.len(), 1);
        assert_eq!(payment.timeline[0].status, "submitted");
    }

    #[test]
    fn test_proof_wire_shape() {
        let value = serde_json::to_value(PaymentProof::default()).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        assert_eq!(
            keys,
            ["reviewed_by", "screenshot", "tx_hash", "verified_at", "wallet_address"]
        );
    }

    #[test]
    fn test_item_ref_tagging() {
        let id = Uuid::new_v4();
        let item = ItemRef::Application(id);
        assert_eq!(item.kind(), ItemKind::Application);
        assert_eq!(item.id(), id);
    }
}
