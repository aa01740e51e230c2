mod config;
mod errors;
mod form;
mod profile;
mod routes;
mod state;
mod text_source;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::text_source::PdfTextSource;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV prefill API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Form: {} ({} mapped fields), profile schema: {:?}",
        config.form_base_url,
        config.form_mapping.len(),
        config.profile_schema
    );

    if !config.mapping_covers_schema() {
        warn!(
            "FORM_FIELD_MAPPING shares no field names with the {:?} profile schema; \
             links prefilled from extracted profiles will carry no parameters",
            config.profile_schema
        );
    }

    let state = AppState::new(config.clone(), Arc::new(PdfTextSource));

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
