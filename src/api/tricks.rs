//! Trick resource endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ListTricksResponse, TrickRepresentation};
use crate::domain::storage::EntityId;

/// GET /tricks
pub async fn list_tricks(
    State(state): State<AppState>,
) -> Result<Json<ListTricksResponse>, ApiError> {
    debug!("Listing tricks");

    let repository = state.repositories.trick_repository().await?;
    let tricks: Vec<TrickRepresentation> = repository
        .list()
        .await?
        .iter()
        .map(TrickRepresentation::from)
        .collect();
    let total = tricks.len();

    Ok(Json(ListTricksResponse { tricks, total }))
}

/// POST /tricks
pub async fn create_trick(
    State(state): State<AppState>,
    Json(request): Json<TrickRepresentation>,
) -> Result<(StatusCode, Json<TrickRepresentation>), ApiError> {
    debug!(name = %request.name, "Creating trick");

    let trick = request.into_trick()?;
    let repository = state.repositories.trick_repository().await?;
    let created = repository.create(trick).await?;

    Ok((StatusCode::CREATED, Json(TrickRepresentation::from(&created))))
}

/// GET /tricks/{id}
pub async fn get_trick(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TrickRepresentation>, ApiError> {
    debug!(trick_id = %id, "Retrieving trick");

    let repository = state.repositories.trick_repository().await?;
    let trick = repository
        .retrieve(&EntityId::new(id.as_str()))
        .await?
        .ok_or_else(|| trick_not_found(&id))?;

    Ok(Json(TrickRepresentation::from(&trick)))
}

/// PUT /tricks/{id}
pub async fn update_trick(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<TrickRepresentation>,
) -> Result<Json<TrickRepresentation>, ApiError> {
    debug!(trick_id = %id, "Updating trick");

    let trick = request.into_trick()?;
    let repository = state.repositories.trick_repository().await?;
    let id = EntityId::new(id);

    if !repository.exists(&id).await? {
        return Err(trick_not_found(id.as_str()));
    }

    let updated = repository.update(&id, trick).await?;

    Ok(Json(TrickRepresentation::from(&updated)))
}

/// DELETE /tricks/{id}
pub async fn delete_trick(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(trick_id = %id, "Deleting trick");

    let repository = state.repositories.trick_repository().await?;

    if !repository.delete(&EntityId::new(id.as_str())).await? {
        return Err(trick_not_found(&id));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn trick_not_found(id: &str) -> ApiError {
    ApiError::not_found(format!("Trick '{}' does not exist", id))
}
