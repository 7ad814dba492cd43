use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use confcat_application::TagDto;

use crate::ServerState;
use crate::error::ApiError;

pub(crate) async fn list_tags(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<TagDto>>, ApiError> {
    Ok(Json(state.tags.list_tags().await?))
}
