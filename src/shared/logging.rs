//! Logging utilities module
//!
//! This module provides centralized logging functionality and utilities.

use tracing::{error, info, warn};

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified level
    pub fn initialize(level: &str) -> crate::shared::error::AppResult<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .finish();

        tracing::subscriber::set_global_default(subscriber).map_err(|e| {
            crate::shared::error::AppError::Internal(format!("Failed to initialize logging: {}", e))
        })?;

        Ok(())
    }

    /// Log a status transition on a payment or promotion record
    pub fn log_transition(record_kind: &str, record_id: &str, from: &str, to: &str, actor: &str) {
        info!(
            record_kind = %record_kind,
            record_id = %record_id,
            from = %from,
            to = %to,
            actor = %actor,
            "Status transition applied"
        );
    }

    /// Log a rejected transition attempt
    pub fn log_transition_denied(record_kind: &str, record_id: &str, from: &str, to: &str) {
        warn!(
            record_kind = %record_kind,
            record_id = %record_id,
            from = %from,
            to = %to,
            "Illegal status transition attempted"
        );
    }

    /// Log a downstream activation failure that was swallowed on purpose
    pub fn log_activation_failure(payment_id: &str, payment_type: &str, reason: &str) {
        error!(
            payment_id = %payment_id,
            payment_type = %payment_type,
            reason = %reason,
            "Activation side effect failed; payment remains verified"
        );
    }
}
