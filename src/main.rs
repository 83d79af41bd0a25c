use std::sync::Arc;

use vidshare_backend::api;
use vidshare_backend::config;
use vidshare_backend::search::{SearchService, SqliteSearchStore};
use vidshare_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vidshare_backend::init_tracing();

    // Load configuration / 加载配置
    let app_config = config::load_config().map_err(anyhow::Error::msg)?;
    tracing::info!("Server will listen on {}:{}", app_config.server.host, app_config.server.port);

    let pool = vidshare_backend::open_database(&app_config).await?;

    let store = Arc::new(SqliteSearchStore::new(pool.clone()));
    let search = SearchService::new(store, app_config.search.clone());
    let state = Arc::new(AppState::new(search));

    let app = api::router(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C / 等待退出信号
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
