use marketpay_server::shared::logging::LoggingUtils;
use marketpay_server::{AppConfig, HttpServer};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration first so the log level is honored
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = LoggingUtils::initialize(&config.logging.level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Marketpay Server...");

    let server = match HttpServer::new(config).await {
        Ok(server) => {
            info!("Server initialized successfully");
            server
        }
        Err(e) => {
            error!("Failed to initialize server: {}", e);
            std::process::exit(1);
        }
    };

    info!("Server starting on {}", server.config().server_address());

    if let Err(e) = server.run().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
