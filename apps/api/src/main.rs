mod config;
mod cv;
mod errors;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::cv::extractor::LibraryTextExtractor;
use crate::cv::segmenter::Segmenter;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Autofill API v{}", env!("CARGO_PKG_VERSION"));

    // Dictionaries: built-in unless CV_DICTIONARY_PATH points at an override
    let dictionaries = config.load_dictionaries()?;
    info!(
        skills = dictionaries.skills.len(),
        languages = dictionaries.languages.len(),
        suggestion_domains = dictionaries.skill_suggestions.len(),
        custom = config.dictionary_path.is_some(),
        "CV dictionaries loaded"
    );
    let segmenter = Arc::new(Segmenter::new(dictionaries)?);

    let state = AppState {
        config: config.clone(),
        extractor: Arc::new(LibraryTextExtractor),
        segmenter,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!(
        max_upload_bytes = config.max_upload_bytes,
        "Listening on {addr}"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
