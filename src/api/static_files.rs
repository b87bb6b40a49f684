use axum::Router;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

/// 前端路由，统一返回 index.html 交给前端路由处理
pub const SPA_ROUTES: &[&str] = &["/to-watch", "/watched", "/search"];

/// 静态资源与 SPA 回退
///
/// 其余未匹配的路径从静态目录查找，不存在时返回 404。
pub fn routes<S>(static_dir: &Path) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let index = static_dir.join("index.html");

    let mut router = Router::new();
    for route in SPA_ROUTES {
        router = router.route_service(route, ServeFile::new(&index));
    }

    router.fallback_service(ServeDir::new(static_dir))
}
