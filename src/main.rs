use anyhow::Context;
use produtos_api::{
    build_repository, infrastructure::config::load_config, infrastructure::logger::Logger, router,
    AppState, ProdutoService,
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    Logger::init(config.logging.tracing_level()?);

    info!("Starting produtos-api...");

    let repository = build_repository(&config)
        .await
        .context("failed to initialize storage")?;
    let state = AppState::new(ProdutoService::new(repository));
    let app = router(state, config.http.request_timeout());

    let addr = config.http.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("🚀 produtos-api listening on http://{}", listener.local_addr()?);
    info!("   GET    /api/produtos - list produtos");
    info!("   POST   /api/salvar   - save a produto");
    info!("   GET    /health       - health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
