use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::Response,
};

use crate::models::filters::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT};
use crate::models::{
    validate_media, CreateMediaRequest, Filters, MediaItem, Validator, MEDIA_SORT_SAFELIST,
};
use super::error::{ApiError, ApiResult};
use super::query::{read_int, read_string, QueryParams};
use super::request::JsonBody;
use super::response::{write_json, Envelope};
use super::AppState;

/// 媒体资源路径前缀
pub const MEDIA_PATH: &str = "/v1/movies";

/// 解析路径中的 id：必须是正的十进制 64 位整数
pub fn read_id_param(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id >= 1)
}

/// 路径参数提取失败（例如不是合法的 UTF-8）同样视为找不到资源
fn path_id(path: Result<Path<String>, PathRejection>) -> ApiResult<i64> {
    path.ok()
        .and_then(|Path(raw)| read_id_param(&raw))
        .ok_or(ApiError::NotFound)
}

/// 新建媒体
pub async fn create_media(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateMediaRequest>,
) -> ApiResult<Response> {
    let mut media = MediaItem::from_create_request(input);

    let mut v = Validator::new();
    validate_media(&mut v, &media);
    if !v.valid() {
        return Err(ApiError::Validation(v.into_errors()));
    }

    state.database.media().insert(&mut media).await?;
    tracing::info!("Media created - id: {}, title: {}", media.id, media.title);

    let location = format!("{}/{}", MEDIA_PATH, media.id);
    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        HeaderValue::from_str(&location).map_err(|e| ApiError::Internal(e.to_string()))?,
    );

    Ok(write_json(
        StatusCode::CREATED,
        &Envelope::CreatedMedia(media),
        Some(headers),
    )?)
}

/// 获取单个媒体
pub async fn show_media(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Response> {
    let id = path_id(path)?;
    let media = state.database.media().get(id).await?;

    Ok(write_json(StatusCode::OK, &Envelope::MediaDetail(media), None)?)
}

/// 删除媒体
pub async fn delete_media(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Response> {
    let id = path_id(path)?;
    state.database.media().delete(id).await?;
    tracing::info!("Media deleted - id: {}", id);

    let message = format!("Movie with id {} successfully deleted", id);
    Ok(write_json(StatusCode::OK, &Envelope::Message(message), None)?)
}

/// 媒体列表
///
/// 查询参数：`watched`（三态）、`page`、`page_size`、`sort`。
/// 只有显式给出 `page` 或 `page_size` 时才分页，否则返回全部匹配的记录。
pub async fn list_media(
    State(state): State<AppState>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(params) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let mut v = Validator::new();

    let watched = read_string(&params, "watched", "");
    let page = read_int(&params, "page", DEFAULT_PAGE, &mut v);
    let page_size = read_int(&params, "page_size", DEFAULT_PAGE_SIZE, &mut v);
    let sort = read_string(&params, "sort", DEFAULT_SORT);

    let Some(filters) = Filters::validate(&mut v, page, page_size, &sort, MEDIA_SORT_SAFELIST)
    else {
        return Err(ApiError::Validation(v.into_errors()));
    };
    let filters = if is_paged(&params) {
        filters
    } else {
        filters.without_paging()
    };

    let media = state.database.media().get_all(&watched, &filters).await?;

    Ok(write_json(StatusCode::OK, &Envelope::MediaList(media), None)?)
}

fn is_paged(params: &QueryParams) -> bool {
    !read_string(params, "page", "").is_empty() || !read_string(params, "page_size", "").is_empty()
}

/// 已知路径上不支持的方法
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_id_param() {
        assert_eq!(read_id_param("1"), Some(1));
        assert_eq!(read_id_param("9223372036854775807"), Some(i64::MAX));
        assert_eq!(read_id_param("0"), None);
        assert_eq!(read_id_param("-5"), None);
        assert_eq!(read_id_param("abc"), None);
        assert_eq!(read_id_param("1.0"), None);
        assert_eq!(read_id_param("9223372036854775808"), None);
    }

    #[test]
    fn test_path_rejection_is_not_found() {
        assert_eq!(path_id(Ok(Path("7".to_string()))).ok(), Some(7));
        assert!(matches!(path_id(Ok(Path("0".to_string()))), Err(ApiError::NotFound)));
    }

    #[test]
    fn test_paging_only_when_requested() {
        let params = |pairs: &[(&str, &str)]| -> QueryParams {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };

        assert!(!is_paged(&params(&[])));
        assert!(!is_paged(&params(&[("sort", "-title"), ("watched", "true")])));
        assert!(!is_paged(&params(&[("page", "")])));
        assert!(is_paged(&params(&[("page", "2")])));
        assert!(is_paged(&params(&[("page_size", "5")])));
    }
}
