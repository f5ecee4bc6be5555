use bookall_relay::{AppConfig, AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookall_relay=info,tower_http=info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("🚀 Starting bookall relay");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Provider: {}", config.provider.base_url);
    info!("   - Display: {}", config.provider.display);
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    if !config.has_credentials() {
        warn!("⚠️  NAVER_CLIENT_ID / NAVER_CLIENT_SECRET not set, provider calls will be rejected");
    }

    let app = create_router(AppState::from_config(&config));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("📡 Available endpoints:");
    info!("   GET  /                  - Liveness");
    info!("   GET  /health            - Health check");
    info!("   GET  /search?keyword=   - Search books");
    info!("   POST /start             - Start batch keyword job");
    info!("   GET  /status/{{job_id}}   - Batch job status");
    info!("   POST /download          - Export rows as xlsx");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
