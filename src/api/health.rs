use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
};
use serde_json::json;

use super::AppState;
use super::error::{ApiError, ApiResult};
use super::response::write_json;

/// 健康检查端点
pub async fn healthcheck(
    State(state): State<AppState>,
) -> ApiResult<Response> {
    // 检查数据库连接
    state.database.verify_integrity().await
        .map_err(|e| {
            tracing::error!("Health check failed: {}", e);
            ApiError::Internal("Database connection failed".to_string())
        })?;

    let stats = state.database.get_stats().await?;

    let body = json!({
        "status": "available",
        "system_info": {
            "environment": state.config.environment,
            "version": env!("CARGO_PKG_VERSION"),
        },
        "database": {
            "status": "connected",
            "media_count": stats.media_count,
            "watched_count": stats.watched_count,
            "to_watch_count": stats.to_watch_count(),
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    Ok(write_json(StatusCode::OK, &body, None)?)
}
