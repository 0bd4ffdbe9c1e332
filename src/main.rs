use anyhow::Context;
use clap::Parser;
use sector_proxy::utils::{logger, validation::Validate};
use sector_proxy::{create_router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting sector-proxy");
    if config.verbose {
        tracing::debug!(
            "Server config: host={}, port={}, static_dir={}, ai_model={}",
            config.host,
            config.port,
            config.static_dir,
            config.ai_model
        );
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    tracing::info!("------------------------------------------------");
    if config.has_ai_key() {
        tracing::info!("✅ AI SYSTEM ONLINE");
    } else {
        tracing::error!("❌ MISSING AI KEY");
    }
    tracing::info!("------------------------------------------------");

    let addr = config.bind_addr();
    let state = AppState::from_config(config).context("failed to build HTTP client")?;
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!("> SYSTEM ONLINE: http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
