//! Pricing resolution service
//!
//! Resolves (feature, duration) pairs to price rows and chains to payout
//! wallet addresses against the singleton pricing configuration. Missing
//! configuration is always surfaced, never defaulted: silently picking a
//! price would let a payer send funds nobody can reconcile.

use crate::domain::pricing::{Chain, PriceRow, PricingConfig};
use crate::infrastructure::adapters::PricingStore;
use crate::shared::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One chain offered to payers in the public pricing view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainAvailability {
    pub chain: Chain,
    pub enabled: bool,
}

/// Sanitized pricing view exposed publicly: the price table plus only the
/// chains that can actually receive funds. Wallet addresses are withheld
/// until a concrete payment is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicPricing {
    pub prices: HashMap<String, Vec<PriceRow>>,
    pub chains: Vec<ChainAvailability>,
}

pub struct PricingService {
    store: PricingStore,
}

impl PricingService {
    pub fn new(store: PricingStore) -> Self {
        Self { store }
    }

    pub async fn config(&self) -> PricingConfig {
        self.store.get_or_init_default().await
    }

    /// Resolve the price row for a feature. With a duration the row must
    /// match exactly; without one, fixed-price features use the first
    /// configured row.
    pub async fn resolve_price(
        &self,
        feature: &str,
        duration_days: Option<u32>,
    ) -> AppResult<PriceRow> {
        let config = self.store.get_or_init_default().await;
        let table = config.prices.get(feature).ok_or_else(|| {
            AppError::PricingUnconfigured(format!("no price table for {}", feature))
        })?;

        match duration_days {
            Some(days) => table
                .iter()
                .find(|row| row.duration_days == days)
                .cloned()
                .ok_or_else(|| {
                    AppError::PricingUnconfigured(format!(
                        "no {}-day price configured for {}",
                        days, feature
                    ))
                }),
            None => table.first().cloned().ok_or_else(|| {
                AppError::PricingUnconfigured(format!("price table for {} is empty", feature))
            }),
        }
    }

    /// Wallet address for a chain; empty string means the chain is disabled
    pub async fn resolve_wallet(&self, chain: Chain) -> String {
        self.store.get_or_init_default().await.wallet_address(chain)
    }

    /// Wallet address for a chain, failing if none is configured
    pub async fn require_wallet(&self, chain: Chain) -> AppResult<String> {
        let address = self.resolve_wallet(chain).await;
        if address.is_empty() {
            return Err(AppError::PricingUnconfigured(format!(
                "no wallet configured for {}",
                chain.as_str()
            )));
        }
        Ok(address)
    }

    /// Public view: price table plus enabled chains only
    pub async fn sanitized(&self) -> PublicPricing {
        let config = self.store.get_or_init_default().await;
        let chains = config
            .enabled_chains()
            .into_iter()
            .map(|chain| ChainAvailability {
                chain,
                enabled: true,
            })
            .collect();
        PublicPricing {
            prices: config.prices.clone(),
            chains,
        }
    }

    /// Admin replacement of the whole config, last-writer-wins
    pub async fn update(&self, config: PricingConfig) {
        self.store.replace(config).await;
    }
}
