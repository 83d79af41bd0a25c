pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod search;
pub mod seed;
pub mod state;

/// Initialize tracing with RUST_LOG override / 初始化日志
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidshare_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Open the configured database and apply migrations / 打开数据库并迁移
pub async fn open_database(app_config: &config::AppConfig) -> anyhow::Result<sqlx::SqlitePool> {
    let data_dir = app_config.get_data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        tracing::info!("Created data directory: {:?}", data_dir);
    }

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| app_config.get_database_url());

    let pool = db::connect(&database_url).await?;
    db::run_migrations(&pool).await?;
    Ok(pool)
}
