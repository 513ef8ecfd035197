use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use medfind_core::GeminiClient;
use medfind_core::config::{
    FinderConfig, api_base_from_env_value, api_key_from_env_values, model_from_env_value,
    timeout_from_env_value,
};

/// Main entry point for the Medicine Finder service
///
/// Resolves configuration once, builds the Gemini client and serves the REST
/// API (with Swagger UI at `/swagger-ui`).
///
/// # Environment Variables
/// - `MEDFIND_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `GEMINI_API_KEY`: Gemini API key (falls back to `API_KEY`)
/// - `MEDFIND_MODEL`: model name (default: "gemini-2.5-flash")
/// - `MEDFIND_API_BASE`: Gemini API base URL
/// - `MEDFIND_TIMEOUT_SECS`: per-request timeout in seconds (default: 30)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medfind_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("medfind_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("MEDFIND_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let api_key = api_key_from_env_values(
        std::env::var("GEMINI_API_KEY").ok(),
        std::env::var("API_KEY").ok(),
    )?;
    let cfg = FinderConfig::new(
        api_key,
        model_from_env_value(std::env::var("MEDFIND_MODEL").ok()),
        api_base_from_env_value(std::env::var("MEDFIND_API_BASE").ok()),
        timeout_from_env_value(std::env::var("MEDFIND_TIMEOUT_SECS").ok())?,
    )?;

    tracing::info!("++ Starting Medicine Finder REST on {}", rest_addr);
    tracing::info!(
        "++ Alternatives service: model {} at {}",
        cfg.model(),
        cfg.api_base()
    );

    let client = GeminiClient::new(&cfg)?;
    api_rest::serve(&rest_addr, AppState::new(Arc::new(client))).await
}
