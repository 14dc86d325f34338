//! In-memory listing/application directory
//!
//! Stand-in for the marketplace's own CRUD backend, which is an external
//! collaborator to the payment core. It carries just enough state to resolve
//! ownership and moderation checks and to receive activation side effects.

use crate::domain::catalog::{ApplicationSummary, ListingCatalog, ListingSummary};
use crate::shared::error::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Listing entry with activation side-effect fields
#[derive(Debug, Clone)]
pub struct ListingEntry {
    pub summary: ListingSummary,
    pub featured_until: Option<DateTime<Utc>>,
    pub paid_until: Option<DateTime<Utc>>,
}

/// Application entry with its submission flag
#[derive(Debug, Clone)]
pub struct ApplicationEntry {
    pub summary: ApplicationSummary,
    pub submitted: bool,
}

#[derive(Clone, Default)]
pub struct CatalogDirectory {
    listings: Arc<tokio::sync::RwLock<HashMap<Uuid, ListingEntry>>>,
    applications: Arc<tokio::sync::RwLock<HashMap<Uuid, ApplicationEntry>>>,
}

impl CatalogDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert_listing(&self, summary: ListingSummary) {
        self.listings.write().await.insert(
            summary.id,
            ListingEntry {
                summary,
                featured_until: None,
                paid_until: None,
            },
        );
    }

    pub async fn upsert_application(&self, summary: ApplicationSummary) {
        self.applications.write().await.insert(
            summary.id,
            ApplicationEntry {
                summary,
                submitted: false,
            },
        );
    }

    pub async fn listing_entry(&self, id: Uuid) -> Option<ListingEntry> {
        self.listings.read().await.get(&id).cloned()
    }

    pub async fn application_entry(&self, id: Uuid) -> Option<ApplicationEntry> {
        self.applications.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl ListingCatalog for CatalogDirectory {
    async fn find_listing(&self, id: Uuid) -> AppResult<Option<ListingSummary>> {
        Ok(self
            .listings
            .read()
            .await
            .get(&id)
            .map(|e| e.summary.clone()))
    }

    async fn find_application(&self, id: Uuid) -> AppResult<Option<ApplicationSummary>> {
        Ok(self
            .applications
            .read()
            .await
            .get(&id)
            .map(|e| e.summary.clone()))
    }

    async fn mark_featured_until(&self, id: Uuid, until: DateTime<Utc>) -> AppResult<()> {
        let mut listings = self.listings.write().await;
        let entry = listings
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("listing {}", id)))?;
        entry.featured_until = Some(until);
        Ok(())
    }

    async fn mark_active_until(&self, id: Uuid, until: DateTime<Utc>) -> AppResult<()> {
        let mut listings = self.listings.write().await;
        let entry = listings
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("listing {}", id)))?;
        entry.summary.approved_and_active = true;
        entry.paid_until = Some(until);
        Ok(())
    }

    async fn mark_application_submitted(&self, id: Uuid) -> AppResult<()> {
        let mut applications = self.applications.write().await;
        let entry = applications
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("application {}", id)))?;
        entry.submitted = true;
        Ok(())
    }
}
