//! Collaborator interfaces
//!
//! The payment core does not own listings, applications, email, or QR
//! rendering. It talks to them through these traits; the infrastructure
//! layer provides the adapters.

use crate::shared::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimal view of a listing needed by the payment core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSummary {
    pub id: Uuid,
    pub owner: Uuid,
    pub category: String,
    /// Passed moderation and currently visible
    pub approved_and_active: bool,
}

/// Minimal view of an application (e.g. to an education program)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSummary {
    pub id: Uuid,
    pub owner: Uuid,
}

/// Read and mutation hooks on the listing/application store
#[async_trait]
pub trait ListingCatalog: Send + Sync {
    async fn find_listing(&self, id: Uuid) -> AppResult<Option<ListingSummary>>;

    async fn find_application(&self, id: Uuid) -> AppResult<Option<ApplicationSummary>>;

    /// Mark a listing featured until the given date
    async fn mark_featured_until(&self, id: Uuid, until: DateTime<Utc>) -> AppResult<()>;

    /// Mark a listing active/approved with a paid-until date
    async fn mark_active_until(&self, id: Uuid, until: DateTime<Utc>) -> AppResult<()>;

    /// Mark an application as submitted
    async fn mark_application_submitted(&self, id: Uuid) -> AppResult<()>;
}

/// Notification kinds sent on admin decisions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    PaymentVerified,
    PaymentRejected,
    PromotionApproved,
    PromotionRejected,
}

/// Outbound notification sender. Failures must never block a status
/// transition; callers log and continue.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user: Uuid, kind: NotificationKind, context: &str) -> AppResult<()>;
}

/// QR code renderer for wallet addresses. A failure is non-fatal; the raw
/// address string remains usable without an image.
pub trait QrRenderer: Send + Sync {
    fn render_qr(&self, wallet_address: &str) -> AppResult<String>;
}
