use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use confcat_application::CategoryDto;
use confcat_core::category::CategoryId;

use crate::ServerState;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};

pub(crate) async fn list_categories(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<CategoryDto>>, ApiError> {
    Ok(Json(state.categories.list_categories().await?))
}

pub(crate) async fn get_category(
    State(state): State<Arc<ServerState>>,
    ApiPath(id): ApiPath<CategoryId>,
) -> Result<Json<CategoryDto>, ApiError> {
    state
        .categories
        .get_category(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("category {} not found", id)))
}

pub(crate) async fn create_category(
    State(state): State<Arc<ServerState>>,
    ApiJson(dto): ApiJson<CategoryDto>,
) -> Result<(StatusCode, Json<CategoryDto>), ApiError> {
    let created = state.categories.create_category(dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn update_category(
    State(state): State<Arc<ServerState>>,
    ApiPath(id): ApiPath<CategoryId>,
    ApiJson(dto): ApiJson<CategoryDto>,
) -> Result<StatusCode, ApiError> {
    state.categories.update_category(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn delete_category(
    State(state): State<Arc<ServerState>>,
    ApiPath(id): ApiPath<CategoryId>,
) -> Result<StatusCode, ApiError> {
    state.categories.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
