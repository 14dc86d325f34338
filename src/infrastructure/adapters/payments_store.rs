//! In-memory payments store
//!
//! Single source of truth for payment records. All mutations go through
//! `update`, which applies the caller's closure while holding the write lock
//! so two concurrent admin actions cannot both win a transition. The
//! duplicate-request guard and reference uniqueness are enforced inside the
//! same critical section as the insert.

use crate::domain::payments::{generate_reference, Payment, PaymentStatus, PaymentType};
use crate::shared::error::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Filters for payment listing queries
#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub status: Option<PaymentStatus>,
    pub payment_type: Option<PaymentType>,
}

impl PaymentFilter {
    fn matches(&self, payment: &Payment) -> bool {
        self.status.map(|s| payment.status == s).unwrap_or(true)
            && self
                .payment_type
                .map(|t| payment.payment_type == t)
                .unwrap_or(true)
    }
}

/// Abstraction for persisting payment records
#[derive(Clone, Default)]
pub struct PaymentsStore {
    records: Arc<tokio::sync::RwLock<HashMap<Uuid, Payment>>>,
}

impl PaymentsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new payment, enforcing the duplicate-request guard: at most
    /// one non-terminal payment per (user, item, payment_type). The reference
    /// is regenerated until unique within the same lock.
    pub async fn insert(&self, mut payment: Payment) -> AppResult<Payment> {
        let mut records = self.records.write().await;

        let duplicate = records.values().any(|existing| {
            existing.status.is_open()
                && existing.user == payment.user
                && existing.item == payment.item
                && existing.payment_type == payment.payment_type
        });
        if duplicate {
            return Err(AppError::Conflict(format!(
                "an open {} payment already exists for this item",
                payment.payment_type.as_str()
            )));
        }

        while records.values().any(|p| p.reference == payment.reference) {
            payment.reference = generate_reference();
        }

        records.insert(payment.id, payment.clone());
        Ok(payment)
    }

    pub async fn get(&self, id: Uuid) -> Option<Payment> {
        self.records.read().await.get(&id).cloned()
    }

    /// Atomic read-modify-write on one record. The closure runs under the
    /// write lock; returning an error leaves the record unchanged.
    pub async fn update<R, F>(&self, id: Uuid, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut Payment) -> AppResult<R>,
    {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("payment {}", id)))?;
        let mut candidate = record.clone();
        let result = f(&mut candidate)?;
        *record = candidate;
        Ok(result)
    }

    pub async fn list_for_user(&self, user: Uuid, filter: &PaymentFilter) -> Vec<Payment> {
        let records = self.records.read().await;
        let mut matches: Vec<Payment> = records
            .values()
            .filter(|p| p.user == user && filter.matches(p))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches
    }

    pub async fn list_all(&self, filter: &PaymentFilter) -> Vec<Payment> {
        let records = self.records.read().await;
        let mut matches: Vec<Payment> = records
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches
    }
}
