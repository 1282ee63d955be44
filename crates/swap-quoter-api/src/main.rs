use std::sync::Arc;

use swap_quoter::api::ApiServer;
use swap_quoter::config::AppConfig;
use swap_quoter::QuoteEngine;
use tokio::signal;
use tracing::{error, info};

const DEFAULT_API_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let config_path = std::env::var("QUOTER_CONFIG").ok();
    let config = AppConfig::load_from_file(config_path.as_deref())?;
    let addr = std::env::var("API_ADDR").unwrap_or_else(|_| DEFAULT_API_ADDR.to_string());

    let engine = QuoteEngine::from_config(&config)?;
    info!(
        venues = engine.venues().len(),
        fee = engine.fees().fee_promille(),
        slippage = engine.fees().slippage_promille(),
        "quote engine ready"
    );
    let server = ApiServer::new(Arc::new(engine));

    tokio::select! {
        res = server.start(&addr) => {
            if let Err(e) = &res {
                error!("API server stopped: {}", e);
            }
            res
        }
        _ = signal::ctrl_c() => {
            info!("Shutting down");
            Ok(())
        }
    }
}
