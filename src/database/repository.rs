use async_trait::async_trait;
use sqlx::{Pool, Sqlite};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use super::query_builder::{MediaQueryBuilder, MEDIA_COLUMNS};
use crate::models::{Filters, MediaItem, WatchedFilter};

/// 每次数据库调用的超时时间
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// 存储层错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    RecordNotFound,

    #[error("database call timed out after {0:?}")]
    Timeout(Duration),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// 媒体仓库接口
///
/// 每个操作都是一次独立的数据库往返，不做自动重试。
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// 插入新记录，并把数据库生成的 id/version/imdbID 写回 `media`
    async fn insert(&self, media: &mut MediaItem) -> StoreResult<()>;
    async fn get(&self, id: i64) -> StoreResult<MediaItem>;
    async fn delete(&self, id: i64) -> StoreResult<()>;
    /// `watched` 为原始的三态查询值
    async fn get_all(&self, watched: &str, filters: &Filters) -> StoreResult<Vec<MediaItem>>;
}

/// SQLite 媒体仓库实现
#[derive(Clone)]
pub struct SqliteMediaRepository {
    pool: Pool<Sqlite>,
}

impl SqliteMediaRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

/// 给数据库调用加上超时
async fn with_timeout<T, F>(fut: F) -> StoreResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(QUERY_TIMEOUT, fut).await {
        Ok(result) => result.map_err(StoreError::from),
        Err(_) => Err(StoreError::Timeout(QUERY_TIMEOUT)),
    }
}

#[async_trait]
impl MediaRepository for SqliteMediaRepository {
    async fn insert(&self, media: &mut MediaItem) -> StoreResult<()> {
        let query = sqlx::query_as::<_, (i64, i32, String)>(
            r#"
            INSERT INTO media (title, date_watched, year, media_type, thumbnail, imdb_id, rating, watched)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, version, imdb_id
            "#,
        )
        .bind(&media.title)
        .bind(&media.date_watched)
        .bind(&media.year)
        .bind(&media.media_type)
        .bind(&media.thumbnail)
        .bind(&media.imdb_id)
        .bind(&media.rating)
        .bind(media.watched);

        let (id, version, imdb_id) = with_timeout(query.fetch_one(&self.pool)).await?;

        media.id = id;
        media.version = version;
        media.imdb_id = imdb_id;

        Ok(())
    }

    async fn get(&self, id: i64) -> StoreResult<MediaItem> {
        // id 从 1 开始自增，小于 1 的不可能存在，省掉一次查询
        if id < 1 {
            return Err(StoreError::RecordNotFound);
        }

        let sql = format!("SELECT {} FROM media WHERE id = ?", MEDIA_COLUMNS);
        let media = with_timeout(
            sqlx::query_as::<_, MediaItem>(&sql)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await?;

        media.ok_or(StoreError::RecordNotFound)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        if id < 1 {
            return Err(StoreError::RecordNotFound);
        }

        let result = with_timeout(
            sqlx::query("DELETE FROM media WHERE id = ?")
                .bind(id)
                .execute(&self.pool),
        )
        .await?;

        // 没有受影响的行：删除时记录已经不存在
        if result.rows_affected() == 0 {
            return Err(StoreError::RecordNotFound);
        }

        Ok(())
    }

    async fn get_all(&self, watched: &str, filters: &Filters) -> StoreResult<Vec<MediaItem>> {
        let mut query = MediaQueryBuilder::new()
            .with_watched(WatchedFilter::from_query(watched))
            .with_sorting(filters)
            .with_pagination(filters)
            .build();

        // fetch_all 在任意一行解码失败时整体返回错误
        let media = with_timeout(query.build_query_as::<MediaItem>().fetch_all(&self.pool)).await?;

        Ok(media)
    }
}
