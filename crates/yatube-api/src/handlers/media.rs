//! Uploaded image download

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use yatube_service::MediaService;

use crate::response::ApiResult;
use crate::state::AppState;

/// GET /media/{*path}
pub async fn serve_media(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<Response> {
    let image = MediaService::new(state.service_context())
        .get_image(path.trim_start_matches('/'))
        .await?;

    Ok((
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static(image.format.content_type()),
        )],
        image.bytes,
    )
        .into_response())
}
