use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// Open the connection pool (WAL mode) / 打开数据库连接池（WAL模式）
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await?;

    tracing::info!("Database connected: {}", database_url);
    Ok(pool)
}

/// Run database migrations / 运行数据库迁移
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            avatar_url TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One channel per user / 每个用户最多一个频道
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS channels (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            handle TEXT NOT NULL UNIQUE,
            description TEXT,
            avatar_url TEXT,
            banner_url TEXT,
            subscriber_count INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS videos (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            status TEXT NOT NULL DEFAULT 'uploading'
                CHECK (status IN ('uploading', 'processing', 'ready', 'failed')),
            views INTEGER NOT NULL DEFAULT 0,
            duration_seconds INTEGER,
            thumbnail_url TEXT,
            hls_url TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Lowercased copies of searchable text, folded in Rust / 搜索用小写字段（Rust侧转换）
    for (table, column) in FOLDED_COLUMNS {
        ensure_column(pool, table, column).await?;
    }

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_videos_user ON videos(user_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_videos_status_views ON videos(status, views DESC)")
        .execute(pool)
        .await?;

    fill_folded_columns(pool).await?;

    tracing::debug!("Database migrations applied");
    Ok(())
}

/// Shadow columns holding `str::to_lowercase` of the searchable text
const FOLDED_COLUMNS: &[(&str, &str)] = &[
    ("channels", "name_lower"),
    ("channels", "handle_lower"),
    ("channels", "description_lower"),
    ("videos", "title_lower"),
    ("videos", "description_lower"),
];

/// Add a nullable TEXT column if the table lacks it / 缺失时添加列
async fn ensure_column(pool: &SqlitePool, table: &str, column: &str) -> Result<()> {
    let existing: Vec<(String,)> = sqlx::query_as(&format!("SELECT name FROM pragma_table_info('{}')", table))
        .fetch_all(pool)
        .await?;

    if !existing.iter().any(|(name,)| name == column) {
        sqlx::query(&format!("ALTER TABLE {} ADD COLUMN {} TEXT", table, column))
            .execute(pool)
            .await?;
        tracing::info!("Added column {}.{}", table, column);
    }
    Ok(())
}

/// Fold rows whose shadow columns are still empty / 补全缺失的小写字段
///
/// Covers rows written by tools that do not maintain the `*_lower` columns.
pub async fn fill_folded_columns(pool: &SqlitePool) -> Result<()> {
    let channels: Vec<(String, String, String, Option<String>)> = sqlx::query_as(
        "SELECT id, name, handle, description FROM channels \
         WHERE name_lower IS NULL OR handle_lower IS NULL \
            OR (description IS NOT NULL AND description_lower IS NULL)",
    )
    .fetch_all(pool)
    .await?;

    for (id, name, handle, description) in &channels {
        sqlx::query("UPDATE channels SET name_lower = ?, handle_lower = ?, description_lower = ? WHERE id = ?")
            .bind(name.to_lowercase())
            .bind(handle.to_lowercase())
            .bind(description.as_deref().map(str::to_lowercase))
            .bind(id)
            .execute(pool)
            .await?;
    }

    let videos: Vec<(String, String, Option<String>)> = sqlx::query_as(
        "SELECT id, title, description FROM videos \
         WHERE title_lower IS NULL \
            OR (description IS NOT NULL AND description_lower IS NULL)",
    )
    .fetch_all(pool)
    .await?;

    for (id, title, description) in &videos {
        sqlx::query("UPDATE videos SET title_lower = ?, description_lower = ? WHERE id = ?")
            .bind(title.to_lowercase())
            .bind(description.as_deref().map(str::to_lowercase))
            .bind(id)
            .execute(pool)
            .await?;
    }

    if !channels.is_empty() || !videos.is_empty() {
        tracing::info!("Folded search text for {} channels, {} videos", channels.len(), videos.len());
    }
    Ok(())
}

/// Single-connection in-memory pool for tests / 测试用内存数据库
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}
