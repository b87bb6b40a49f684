use sqlx::{Pool, Sqlite};
use anyhow::Result;

/// 创建 media 表（已存在时跳过）
pub async fn ensure_schema(pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS media (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            date_watched TEXT NOT NULL DEFAULT '',
            year TEXT NOT NULL DEFAULT '',
            media_type TEXT NOT NULL DEFAULT '',
            thumbnail TEXT NOT NULL DEFAULT '',
            imdb_id TEXT NOT NULL DEFAULT '',
            rating TEXT NOT NULL DEFAULT '',
            watched INTEGER NOT NULL DEFAULT 0,
            version INTEGER NOT NULL DEFAULT 1
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_media_watched ON media (watched)")
        .execute(pool)
        .await?;

    Ok(())
}

/// 验证数据库schema完整性
pub async fn verify_schema(pool: &Pool<Sqlite>) -> Result<()> {
    let exists = sqlx::query("SELECT name FROM sqlite_master WHERE type='table' AND name=?")
        .bind("media")
        .fetch_optional(pool)
        .await?;

    if exists.is_none() {
        return Err(anyhow::anyhow!("Required table 'media' does not exist"));
    }

    tracing::debug!("Database schema verification completed successfully");
    Ok(())
}

/// 获取数据库统计信息
pub async fn get_database_stats(pool: &Pool<Sqlite>) -> Result<DatabaseStats> {
    let media_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM media")
        .fetch_one(pool)
        .await?;

    let watched_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM media WHERE watched = 1")
        .fetch_one(pool)
        .await?;

    Ok(DatabaseStats {
        media_count,
        watched_count,
    })
}

/// 数据库统计信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseStats {
    pub media_count: i64,
    pub watched_count: i64,
}

impl DatabaseStats {
    pub fn to_watch_count(&self) -> i64 {
        self.media_count - self.watched_count
    }
}
