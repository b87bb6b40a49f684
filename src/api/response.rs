use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Response,
};
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::models::MediaItem;

/// 成功响应的外层包装，每种响应只包一层键
#[derive(Debug, Clone)]
pub enum Envelope {
    /// `{"media": {...}}`
    CreatedMedia(MediaItem),
    /// `{"media": [...]}`
    MediaList(Vec<MediaItem>),
    /// `{"movie": {...}}`
    MediaDetail(MediaItem),
    /// `{"message": "..."}`
    Message(String),
}

impl Envelope {
    pub fn key(&self) -> &'static str {
        match self {
            Envelope::CreatedMedia(_) | Envelope::MediaList(_) => "media",
            Envelope::MediaDetail(_) => "movie",
            Envelope::Message(_) => "message",
        }
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Envelope::CreatedMedia(media) | Envelope::MediaDetail(media) => {
                map.serialize_entry(self.key(), media)?
            }
            Envelope::MediaList(media) => map.serialize_entry(self.key(), media)?,
            Envelope::Message(message) => map.serialize_entry(self.key(), message)?,
        }
        map.end()
    }
}

/// 以制表符缩进序列化，末尾追加换行
pub fn encode_pretty<T: Serialize + ?Sized>(data: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::with_capacity(128);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// 构建 JSON 响应
///
/// 先完成序列化，失败时直接返回错误，不会产生只写了一半的响应。
/// 调用方提供的响应头按名称覆盖同名头。
pub fn write_json<T: Serialize + ?Sized>(
    status: StatusCode,
    data: &T,
    headers: Option<HeaderMap>,
) -> Result<Response, serde_json::Error> {
    let body = encode_pretty(data)?;

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;

    let response_headers = response.headers_mut();
    if let Some(headers) = headers {
        for name in headers.keys() {
            response_headers.remove(name);
            for value in headers.get_all(name) {
                response_headers.append(name.clone(), value.clone());
            }
        }
    }
    response_headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Ok(response)
}
