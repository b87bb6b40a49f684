use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use thiserror::Error;

use super::error::ApiError;

/// 请求体大小上限（1MB）
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// 请求体解码错误
///
/// 请求体过大没有单独的信息，读取错误原样透传到 `Other`。
/// 截断的 JSON 只给出笼统的提示，不带位置。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("body must not be empty")]
    Empty,

    #[error("body contains badly-formed JSON (at character {offset})")]
    BadlyFormed { offset: usize },

    #[error("body contains badly-formed JSON")]
    Truncated,

    #[error("body contains incorrect JSON type for field \"{field}\"")]
    IncorrectType { field: String },

    #[error("body contains incorrect JSON type (at character {offset})")]
    IncorrectTypeAt { offset: usize },

    #[error("{0}")]
    Other(String),
}

/// 把请求体解码为 `T`
///
/// 只接受目标结构中声明过的字段（目标类型需设置 `deny_unknown_fields`）。
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty);
    }

    let mut de = serde_json::Deserializer::from_slice(body);
    let value = match serde_path_to_error::deserialize::<_, T>(&mut de) {
        Ok(value) => value,
        Err(err) => {
            let field = err.path().to_string();
            return Err(classify(body, err.into_inner(), Some(field)));
        }
    };

    // 第一个 JSON 值之后只允许空白
    de.end().map_err(|e| classify(body, e, None))?;

    Ok(value)
}

fn classify(body: &[u8], err: serde_json::Error, field: Option<String>) -> DecodeError {
    let offset = byte_offset(body, err.line(), err.column());

    match err.classify() {
        Category::Syntax => DecodeError::BadlyFormed { offset },
        Category::Eof => DecodeError::Truncated,
        // 类型不匹配只能从 serde 的 `invalid type: ...` 信息前缀识别
        Category::Data if err.to_string().starts_with("invalid type") => match field {
            Some(field) if !field.is_empty() && field != "." => DecodeError::IncorrectType { field },
            _ => DecodeError::IncorrectTypeAt { offset },
        },
        _ => DecodeError::Other(err.to_string()),
    }
}

/// 由行列号换算出字节偏移
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    let preceding: usize = body
        .split(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    preceding + column
}

/// JSON 请求体提取器
///
/// 读取上限为 [`MAX_BODY_BYTES`]，任何解码失败都以 400 返回。
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|e| ApiError::BadRequest(DecodeError::Other(e.to_string()).to_string()))?;

        decode(&bytes)
            .map(JsonBody)
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}
