use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::Validator;

/// 标题最大长度（字节）
pub const MAX_TITLE_BYTES: usize = 500;

/// 媒体条目
///
/// `id` 和 `version` 由数据库分配，客户端无法提供。
/// `version` 是乐观锁令牌，每次成功更新都应递增。
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct MediaItem {
    pub id: i64,
    pub title: String,
    #[serde(rename = "dateWatched")]
    pub date_watched: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub year: String,
    #[serde(rename = "mediaType")]
    pub media_type: String,
    pub thumbnail: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub rating: String,
    pub watched: bool,
    pub version: i32,
}

/// 创建媒体请求
///
/// 所有字段可选；未知字段直接拒绝。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreateMediaRequest {
    pub title: String,
    #[serde(rename = "dateWatched")]
    pub date_watched: String,
    pub year: String,
    #[serde(rename = "mediaType")]
    pub media_type: String,
    pub thumbnail: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub rating: String,
    pub watched: bool,
}

impl MediaItem {
    /// 从创建请求构建（id/version 留空，等待数据库分配）
    pub fn from_create_request(req: CreateMediaRequest) -> Self {
        Self {
            id: 0,
            title: req.title,
            date_watched: req.date_watched,
            year: req.year,
            media_type: req.media_type,
            thumbnail: req.thumbnail,
            imdb_id: req.imdb_id,
            rating: req.rating,
            watched: req.watched,
            version: 0,
        }
    }
}

/// 持久化前的字段检查
pub fn validate_media(v: &mut Validator, media: &MediaItem) {
    v.check(!media.title.is_empty(), "title", "must be provided");
    v.check(
        media.title.len() <= MAX_TITLE_BYTES,
        "title",
        "must not be more than 500 bytes long",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str) -> MediaItem {
        MediaItem::from_create_request(CreateMediaRequest {
            title: title.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_title_must_be_provided() {
        let mut v = Validator::new();
        validate_media(&mut v, &item(""));
        assert_eq!(v.errors()["title"], "must be provided");
    }

    #[test]
    fn test_title_length_limit_in_bytes() {
        let mut v = Validator::new();
        validate_media(&mut v, &item(&"a".repeat(500)));
        assert!(v.valid());

        let mut v = Validator::new();
        validate_media(&mut v, &item(&"a".repeat(501)));
        assert_eq!(v.errors()["title"], "must not be more than 500 bytes long");

        // 167 个三字节字符 = 501 字节
        let mut v = Validator::new();
        validate_media(&mut v, &item(&"影".repeat(167)));
        assert!(!v.valid());
    }

    #[test]
    fn test_serialized_field_names() {
        let mut media = item("Arrival");
        media.id = 1;
        media.version = 1;
        media.imdb_id = "tt2543164".to_string();

        let value = serde_json::to_value(&media).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["imdbID"], "tt2543164");
        assert_eq!(value["dateWatched"], "");
        assert_eq!(value["watched"], false);
        // 空年份不输出
        assert!(value.get("year").is_none());

        media.year = "2016".to_string();
        let value = serde_json::to_value(&media).unwrap();
        assert_eq!(value["year"], "2016");
    }

    #[test]
    fn test_create_request_defaults_missing_fields() {
        let req: CreateMediaRequest =
            serde_json::from_str(r#"{"title": "Arrival", "watched": true}"#).unwrap();
        assert_eq!(req.title, "Arrival");
        assert!(req.watched);
        assert!(req.rating.is_empty());
    }

    #[test]
    fn test_create_request_rejects_server_assigned_fields() {
        assert!(serde_json::from_str::<CreateMediaRequest>(r#"{"id": 7}"#).is_err());
        assert!(serde_json::from_str::<CreateMediaRequest>(r#"{"version": 2}"#).is_err());
    }
}
