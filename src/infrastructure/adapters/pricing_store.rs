//! Pricing configuration store
//!
//! Holds the single pricing record for the deployment. First access seeds the
//! hard-coded bootstrap defaults under the write lock, so exactly one caller
//! performs the one-time migration. Admin updates are last-writer-wins.

use crate::domain::pricing::PricingConfig;
use std::sync::Arc;
use tracing::info;

#[derive(Clone, Default)]
pub struct PricingStore {
    record: Arc<tokio::sync::RwLock<Option<PricingConfig>>>,
}

impl PricingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the config, seeding defaults on first access
    pub async fn get_or_init_default(&self) -> PricingConfig {
        if let Some(config) = self.record.read().await.as_ref() {
            return config.clone();
        }

        let mut slot = self.record.write().await;
        // Re-check: another writer may have seeded between the locks
        if slot.is_none() {
            info!("No pricing configuration found; seeding bootstrap defaults");
            *slot = Some(PricingConfig::bootstrap_default());
        }
        slot.as_ref().cloned().unwrap_or_else(PricingConfig::bootstrap_default)
    }

    /// Replace the whole config (admin update, last-writer-wins)
    pub async fn replace(&self, config: PricingConfig) {
        *self.record.write().await = Some(config);
    }
}
