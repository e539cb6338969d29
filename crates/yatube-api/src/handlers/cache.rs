//! Page cache administration

use axum::{extract::State, Json};
use yatube_service::{CacheClearResponse, PageCacheService};

use crate::extractors::OptionalAuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Drop every cached page so the next index request renders fresh
///
/// POST /cache/clear
pub async fn clear_cache(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
) -> ApiResult<Json<CacheClearResponse>> {
    let response = PageCacheService::new(state.service_context())
        .clear(viewer.actor())
        .await?;
    Ok(Json(response))
}
