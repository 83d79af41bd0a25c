//! Demo data tool / 演示数据工具
//!
//! Usage: vidshare-seed [seed|cleanup]

use vidshare_backend::{config, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vidshare_backend::init_tracing();

    let command = std::env::args().nth(1).unwrap_or_else(|| "seed".to_string());

    let app_config = config::load_config().map_err(anyhow::Error::msg)?;
    let pool = vidshare_backend::open_database(&app_config).await?;

    let result = match command.as_str() {
        "seed" => seed::seed_demo_data(&pool).await,
        "cleanup" => seed::cleanup(&pool).await,
        other => Err(anyhow::anyhow!("Unknown command '{}', expected 'seed' or 'cleanup'", other)),
    };

    pool.close().await;
    result
}
