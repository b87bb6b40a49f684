use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use std::fmt;

use super::response::write_json;
use crate::database::StoreError;
use crate::models::FieldErrors;

/// 统一的API错误类型
#[derive(Debug)]
pub enum ApiError {
    /// 字段验证失败
    Validation(FieldErrors),
    /// 请求体格式错误、过大或类型不符
    BadRequest(String),
    /// 未找到资源
    NotFound,
    /// 版本冲突（更新时 version 不匹配）
    EditConflict,
    /// 不支持的 HTTP 方法
    MethodNotAllowed(Method),
    /// 存储层错误
    Store(StoreError),
    /// 内部服务器错误
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(errors) => write!(f, "Validation error: {:?}", errors),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound => write!(f, "Not found"),
            ApiError::EditConflict => write!(f, "Edit conflict"),
            ApiError::MethodNotAllowed(method) => write!(f, "Method not allowed: {}", method),
            ApiError::Store(e) => write!(f, "Store error: {}", e),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// 从存储层错误转换
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RecordNotFound => ApiError::NotFound,
            _ => ApiError::Store(err),
        }
    }
}

/// 从sqlx::Error转换
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::from(err).into()
    }
}

/// 从anyhow::Error转换
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// 序列化失败
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("failed to encode response: {}", err))
    }
}

const SERVER_ERROR_MESSAGE: &str =
    "the server encountered a problem and could not process your request";

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::EditConflict => StatusCode::CONFLICT,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回给客户端的错误内容（内部错误细节只写日志）
    fn client_message(&self) -> Value {
        match self {
            ApiError::Validation(errors) => json!(errors),
            ApiError::BadRequest(msg) => json!(msg),
            ApiError::NotFound => json!("the requested resource could not be found"),
            ApiError::EditConflict => {
                json!("unable to update the record due to an edit conflict, please try again")
            }
            ApiError::MethodNotAllowed(method) => {
                json!(format!("the {} method is not supported for this resource", method))
            }
            ApiError::Store(e) => {
                tracing::error!("Store error: {}", e);
                json!(SERVER_ERROR_MESSAGE)
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                json!(SERVER_ERROR_MESSAGE)
            }
        }
    }
}

/// 实现IntoResponse，将错误转换为HTTP响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({ "error": self.client_message() });

        match write_json(status, &body, None) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Failed to encode error response: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;
