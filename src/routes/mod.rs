// HTTP routes

mod banners;
mod http;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::service::ClickStats;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) stats: Arc<ClickStats>,
}

pub fn app(stats: Arc<ClickStats>) -> Router {
    let state = AppState { stats };
    Router::new()
        .route("/", get(|| async { "Hello from bannerstats!" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/counter/{banner_id}", get(banners::click_handler)) // GET /counter/:id
        .route("/stats/{banner_id}", post(banners::stats_handler)) // POST /stats/:id
        .route("/snapshot", get(banners::snapshot_handler)) // GET /snapshot
        .route("/admin/reset", post(banners::reset_handler)) // POST /admin/reset
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
