//! Pricing domain models and types
//!
//! The pricing configuration is a single record per deployment. It holds the
//! price table per paid feature, the payout wallet address per chain, display
//! limits, and the homepage rotation strategy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported payment chains
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Chain {
    Btc,
    Eth,
    UsdtErc20,
    UsdtTrc20,
}

impl Chain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Btc => "btc",
            Chain::Eth => "eth",
            Chain::UsdtErc20 => "usdt_erc20",
            Chain::UsdtTrc20 => "usdt_trc20",
        }
    }

    pub const ALL: [Chain; 4] = [Chain::Btc, Chain::Eth, Chain::UsdtErc20, Chain::UsdtTrc20];
}

impl std::str::FromStr for Chain {
    type Err = String;

    /// Parses a chain tag, normalizing common aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "btc" | "bitcoin" => Ok(Chain::Btc),
            "eth" | "ethereum" => Ok(Chain::Eth),
            "usdt_erc20" | "usdt-erc20" | "erc20" => Ok(Chain::UsdtErc20),
            "usdt_trc20" | "usdt-trc20" | "trc20" => Ok(Chain::UsdtTrc20),
            _ => Err(format!("unsupported chain: {}", s)),
        }
    }
}

/// One priced duration option for a feature
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRow {
    pub duration_days: u32,
    pub amount: f64,
    pub currency: String,
}

impl PriceRow {
    pub fn new(duration_days: u32, amount: f64, currency: &str) -> Self {
        Self {
            duration_days,
            amount,
            currency: currency.to_string(),
        }
    }
}

/// Display limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingLimits {
    /// Maximum promotions shown simultaneously on the homepage
    pub homepage_max_slots: usize,
}

impl Default for PricingLimits {
    fn default() -> Self {
        Self {
            homepage_max_slots: 10,
        }
    }
}

/// Homepage rotation strategy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RotationStrategy {
    #[default]
    Recent,
    Random,
}

/// Rotation and display settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PricingSettings {
    pub rotation: RotationStrategy,
}

/// The pricing configuration record (singleton per deployment)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Feature tag -> ordered duration/price options
    pub prices: HashMap<String, Vec<PriceRow>>,

    /// Chain -> payout wallet address; empty string means the chain is disabled
    pub wallets: HashMap<Chain, String>,

    pub limits: PricingLimits,

    pub settings: PricingSettings,
}

impl PricingConfig {
    /// Bootstrap defaults: non-empty price tables, no wallets configured.
    /// Wallets must be filled in by an admin before any chain is offered.
    pub fn bootstrap_default() -> Self {
        let mut prices = HashMap::new();
        prices.insert(
            "featured_listing".to_string(),
            vec![
                PriceRow::new(7, 25.0, "USD"),
                PriceRow::new(14, 45.0, "USD"),
                PriceRow::new(30, 80.0, "USD"),
            ],
        );
        prices.insert(
            "listing_fee".to_string(),
            vec![PriceRow::new(30, 10.0, "USD")],
        );
        prices.insert(
            "application_fee".to_string(),
            vec![PriceRow::new(0, 15.0, "USD")],
        );
        prices.insert(
            "homepage".to_string(),
            vec![
                PriceRow::new(7, 50.0, "USD"),
                PriceRow::new(14, 90.0, "USD"),
                PriceRow::new(30, 160.0, "USD"),
            ],
        );
        prices.insert(
            "category_top".to_string(),
            vec![
                PriceRow::new(7, 30.0, "USD"),
                PriceRow::new(14, 55.0, "USD"),
                PriceRow::new(30, 100.0, "USD"),
            ],
        );

        let wallets = Chain::ALL
            .iter()
            .map(|c| (*c, String::new()))
            .collect::<HashMap<_, _>>();

        Self {
            prices,
            wallets,
            limits: PricingLimits::default(),
            settings: PricingSettings::default(),
        }
    }

    /// Wallet address for a chain; empty string when unset
    pub fn wallet_address(&self, chain: Chain) -> String {
        self.wallets.get(&chain).cloned().unwrap_or_default()
    }

    /// Chains that can actually receive funds
    pub fn enabled_chains(&self) -> Vec<Chain> {
        Chain::ALL
            .iter()
            .copied()
            .filter(|c| !self.wallet_address(*c).is_empty())
            .collect()
    }
}
