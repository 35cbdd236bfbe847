//! MathWise Tutor relay server

use mathwise_tutor::api::{create_router, AppState};
use mathwise_tutor::config::ServerConfig;
use mathwise_tutor::llm::{LlmService, LoggingService, OpenRouterService};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mathwise_tutor=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = ServerConfig::from_env();

    if config.llm.api_key.is_none() {
        tracing::warn!("OPENROUTER_API_KEY is not set; every relay call will fail upstream.");
    }

    // Initialize LLM provider
    let provider: Arc<dyn LlmService> = Arc::new(OpenRouterService::new(&config.llm)?);
    let provider = Arc::new(LoggingService::new(provider));
    tracing::info!(
        model = %provider.model_id(),
        endpoint = %config.llm.base_url,
        "LLM provider initialized"
    );

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(AppState::new(provider))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("MathWise Tutor server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
