//! Serving stored label photos back to their owner

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::auth::AuthUser;
use crate::error::Result;
use crate::intake::ImageStore;
use crate::state::AppState;

/// Create the uploads router
pub fn router() -> Router<AppState> {
    Router::new().route("/:filename", get(serve_upload))
}

/// GET /uploads/:filename
async fn serve_upload(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse> {
    let data = state.images().open(&filename).await?;
    let content_type = ImageStore::content_type(&filename);

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "max-age=3600"),
        ],
        data,
    ))
}
