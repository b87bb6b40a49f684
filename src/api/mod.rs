pub mod media;
pub mod health;
pub mod error;
pub mod query;
pub mod request;
pub mod response;
pub mod static_files;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{config::Config, database::Database};
use media::{method_not_allowed, MEDIA_PATH};

#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(database: Database, config: Config) -> Self {
        Self {
            database,
            config: Arc::new(config),
        }
    }
}

/// 构建完整路由
pub fn router(state: AppState) -> Router {
    let static_routes = static_files::routes(&state.config.static_dir);

    Router::new()
        .route(
            "/v1/healthcheck",
            get(health::healthcheck).fallback(method_not_allowed),
        )
        .route(
            MEDIA_PATH,
            get(media::list_media)
                .post(media::create_media)
                .fallback(method_not_allowed),
        )
        .route(
            &format!("{}/:id", MEDIA_PATH),
            get(media::show_media)
                .delete(media::delete_media)
                .fallback(method_not_allowed),
        )
        .merge(static_routes)
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
