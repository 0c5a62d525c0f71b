// Click and stats handlers. Banner ids are 1-based on the wire, 0-based in the store.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::error::StatsError;
use crate::models::{BannerStat, Counter, StatsRequest, StatsResponse};

/// Error body `{"error": "..."}` with a status code.
pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({ "error": self.1 }))).into_response()
    }
}

impl From<StatsError> for ApiError {
    fn from(e: StatsError) -> Self {
        ApiError(StatusCode::BAD_REQUEST, e.to_string())
    }
}

/// Parses a 1-based wire id into a store id.
fn store_id(raw: &str, capacity: usize) -> Result<usize, ApiError> {
    let bid: usize = raw.trim().parse().map_err(|_| {
        ApiError(StatusCode::BAD_REQUEST, "Invalid banner ID format".into())
    })?;
    if bid < 1 || bid > capacity {
        return Err(ApiError(
            StatusCode::BAD_REQUEST,
            format!("Banner ID must be between 1 and {}", capacity),
        ));
    }
    Ok(bid - 1)
}

/// GET /counter/{banner_id}: registers one click.
pub(super) async fn click_handler(
    Path(banner_id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let id = store_id(&banner_id, state.stats.capacity())?;
    state.stats.increment(id)?;
    Ok(Json(serde_json::json!({
        "bannerID": id + 1,
        "success": true,
    })))
}

/// POST /stats/{banner_id}: history for one banner within `from`/`to`.
pub(super) async fn stats_handler(
    Path(banner_id): Path<String>,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StatsResponse>, ApiError> {
    let id = store_id(&banner_id, state.stats.capacity())?;
    let request: StatsRequest = if body.iter().all(u8::is_ascii_whitespace) {
        StatsRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|_| ApiError(StatusCode::BAD_REQUEST, "Invalid JSON body".into()))?
    };

    let points = state
        .stats
        .query_str(id, request.from.as_deref(), request.to.as_deref())?;
    let name = state.stats.counter(id)?.name;

    if points.is_empty() {
        tracing::debug!(banner_id = id + 1, "no statistics found for banner");
    }
    Ok(Json(StatsResponse {
        stats: points
            .into_iter()
            .map(|p| BannerStat {
                ts: p.captured_at,
                name: name.clone(),
                v: p.count,
            })
            .collect(),
    }))
}

/// GET /snapshot: live non-zero counters.
pub(super) async fn snapshot_handler(State(state): State<AppState>) -> impl IntoResponse {
    let counters: Vec<Counter> = state.stats.snapshot().into_values().collect();
    Json(serde_json::json!({ "counters": counters }))
}

/// POST /admin/reset: zeroes every live counter.
pub(super) async fn reset_handler(State(state): State<AppState>) -> StatusCode {
    state.stats.reset_all();
    StatusCode::NO_CONTENT
}
