//! Movie resource endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ListMoviesResponse, MovieRepresentation};
use crate::domain::storage::EntityId;

/// GET /movies
pub async fn list_movies(
    State(state): State<AppState>,
) -> Result<Json<ListMoviesResponse>, ApiError> {
    debug!("Listing movies");

    let repository = state.repositories.movie_repository().await?;
    let movies: Vec<MovieRepresentation> = repository
        .list()
        .await?
        .iter()
        .map(MovieRepresentation::from)
        .collect();
    let total = movies.len();

    Ok(Json(ListMoviesResponse { movies, total }))
}

/// POST /movies
pub async fn create_movie(
    State(state): State<AppState>,
    Json(request): Json<MovieRepresentation>,
) -> Result<(StatusCode, Json<MovieRepresentation>), ApiError> {
    debug!(title = %request.title, "Creating movie");

    let movie = request.into_movie()?;
    let repository = state.repositories.movie_repository().await?;
    let created = repository.create(movie).await?;

    Ok((StatusCode::CREATED, Json(MovieRepresentation::from(&created))))
}

/// GET /movies/{id}
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MovieRepresentation>, ApiError> {
    debug!(movie_id = %id, "Retrieving movie");

    let repository = state.repositories.movie_repository().await?;
    let movie = repository
        .retrieve(&EntityId::new(id.as_str()))
        .await?
        .ok_or_else(|| movie_not_found(&id))?;

    Ok(Json(MovieRepresentation::from(&movie)))
}

/// PUT /movies/{id}
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MovieRepresentation>,
) -> Result<Json<MovieRepresentation>, ApiError> {
    debug!(movie_id = %id, "Updating movie");

    let movie = request.into_movie()?;
    let repository = state.repositories.movie_repository().await?;
    let id = EntityId::new(id);

    if !repository.exists(&id).await? {
        return Err(movie_not_found(id.as_str()));
    }

    let updated = repository.update(&id, movie).await?;

    Ok(Json(MovieRepresentation::from(&updated)))
}

/// DELETE /movies/{id}
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(movie_id = %id, "Deleting movie");

    let repository = state.repositories.movie_repository().await?;

    if !repository.delete(&EntityId::new(id.as_str())).await? {
        return Err(movie_not_found(&id));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn movie_not_found(id: &str) -> ApiError {
    ApiError::not_found(format!(
        "Movie with the following identifier does not exist: {}",
        id
    ))
}
