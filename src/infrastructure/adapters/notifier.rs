//! Logging notification sender
//!
//! Outbound email is an external collaborator; this adapter records the
//! intent in the logs. Callers treat any failure as non-blocking.

use crate::domain::catalog::{NotificationKind, Notifier};
use crate::shared::error::AppResult;
use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct LoggingNotifier;

impl LoggingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn notify(&self, user: Uuid, kind: NotificationKind, context: &str) -> AppResult<()> {
        info!(
            user = %user,
            kind = ?kind,
            context = %context,
            "Notification dispatched"
        );
        Ok(())
    }
}
