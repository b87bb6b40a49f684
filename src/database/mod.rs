use sqlx::{sqlite::{SqlitePoolOptions, SqliteConnectOptions}, Pool, Sqlite};
use anyhow::Result;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::Config;

pub mod schema;
pub mod repository;
pub mod query_builder;

pub use repository::{MediaRepository, SqliteMediaRepository, StoreError, StoreResult, QUERY_TIMEOUT};
pub use query_builder::MediaQueryBuilder;

#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
    media: Arc<dyn MediaRepository>,
}

impl Database {
    pub async fn new(config: &Config) -> Result<Self> {
        tracing::info!("Connecting to database: {}", config.database_url);

        // 配置 SQLite 连接选项
        let connect_options = SqliteConnectOptions::from_str(&config.database_url)?
            .busy_timeout(std::time::Duration::from_secs(30));  // 设置忙等待超时

        let pool = SqlitePoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect_with(connect_options)
            .await?;

        Self::from_pool(pool).await
    }

    /// 在已有连接池上完成建表和校验
    pub async fn from_pool(pool: Pool<Sqlite>) -> Result<Self> {
        schema::ensure_schema(&pool).await?;
        schema::verify_schema(&pool).await?;

        let stats = schema::get_database_stats(&pool).await?;
        tracing::info!(
            "Database initialized - Media: {}, Watched: {}, To watch: {}",
            stats.media_count,
            stats.watched_count,
            stats.to_watch_count()
        );

        let media = Arc::new(SqliteMediaRepository::new(pool.clone()));

        Ok(Self { pool, media })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub fn media(&self) -> &Arc<dyn MediaRepository> {
        &self.media
    }

    /// 获取数据库统计信息
    pub async fn get_stats(&self) -> Result<schema::DatabaseStats> {
        schema::get_database_stats(&self.pool).await
    }

    /// 验证数据库完整性
    pub async fn verify_integrity(&self) -> Result<()> {
        schema::verify_schema(&self.pool).await
    }
}
