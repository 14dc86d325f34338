//! HTTP server implementation
//!
//! Wires stores, services, the activation registry, and the expiration sweep
//! together, then serves the route tree. Designed for deployment behind a
//! reverse proxy that handles SSL, compression, and CORS.

use crate::application::services::{
    ActivationRegistry, ExpirationSweep, PaymentsService, PricingService, PromotionsService,
};
use crate::config::AppConfig;
use crate::infrastructure::adapters::{
    CatalogDirectory, DataUrlQrRenderer, LoggingNotifier, PaymentsStore, PricingStore,
    PromotionsStore,
};
use crate::infrastructure::http::routes::build_routes;
use crate::shared::error::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use warp::{Filter, Reply};

pub struct HttpServer {
    config: AppConfig,
    payments: Arc<PaymentsService>,
    promotions: Arc<PromotionsService>,
    pricing: Arc<PricingService>,
    sweep: Arc<ExpirationSweep>,
    catalog: Arc<CatalogDirectory>,
}

impl HttpServer {
    /// Create a new server instance with all services wired
    pub async fn new(config: AppConfig) -> AppResult<Self> {
        let pricing_store = PricingStore::new();
        let payments_store = PaymentsStore::new();
        let promotions_store = PromotionsStore::new();
        let catalog = Arc::new(CatalogDirectory::new());
        let qr = Arc::new(DataUrlQrRenderer::new());
        let notifier = Arc::new(LoggingNotifier::new());

        let pricing = Arc::new(PricingService::new(pricing_store));
        // Seed the config record up front so the first request never races
        // the bootstrap
        pricing.config().await;

        let activations = Arc::new(ActivationRegistry::with_defaults(catalog.clone()));
        let payments = Arc::new(PaymentsService::new(
            pricing.clone(),
            payments_store,
            promotions_store.clone(),
            catalog.clone(),
            qr.clone(),
            notifier.clone(),
            activations,
        ));
        let promotions = Arc::new(PromotionsService::new(
            pricing.clone(),
            promotions_store.clone(),
            catalog.clone(),
            qr,
            notifier,
        ));
        let sweep = Arc::new(ExpirationSweep::new(promotions_store));

        Ok(Self {
            config,
            payments,
            promotions,
            pricing,
            sweep,
            catalog,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Listing/application directory, exposed for seeding by the embedding
    /// application
    pub fn catalog(&self) -> Arc<CatalogDirectory> {
        self.catalog.clone()
    }

    /// Run the server and the periodic expiration sweep
    pub async fn run(self) -> AppResult<()> {
        let addr: std::net::SocketAddr = self
            .config
            .server_address()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

        if self.config.sweep.enabled {
            let interval = Duration::from_secs(self.config.sweep.interval_seconds);
            info!(interval_seconds = self.config.sweep.interval_seconds, "Starting expiration sweep task");
            self.sweep.clone().spawn(interval);
        }

        let routes = build_routes(
            self.config.clone(),
            self.payments,
            self.promotions,
            self.pricing,
        );

        info!("Starting HTTP server on {}", addr);
        warp::serve(routes).run(addr).await;

        Ok(())
    }

    /// Route tree without binding a socket, for tests
    pub fn routes(&self) -> impl Filter<Extract = impl Reply, Error = std::convert::Infallible> + Clone {
        build_routes(
            self.config.clone(),
            self.payments.clone(),
            self.promotions.clone(),
            self.pricing.clone(),
        )
    }

    /// Pricing service handle, exposed for startup configuration
    pub fn pricing(&self) -> Arc<PricingService> {
        self.pricing.clone()
    }
}
