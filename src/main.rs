use std::env;

use pay_component_engine::api::{AppState, create_router};
use pay_component_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // ─── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pay_component_engine=info")),
        )
        .init();

    // ─── Config ───────────────────────────────────────────────────────────────
    let config_dir = env::var("PAY_ENGINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr = env::var("PAY_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        components = config.components().len(),
        "Configuration loaded"
    );

    // ─── Router ───────────────────────────────────────────────────────────────
    let app = create_router(AppState::new(config));

    // ─── Start Server ─────────────────────────────────────────────────────────
    info!("Pay component engine listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
