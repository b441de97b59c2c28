//! Handlers for the `/movies` collection.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use movies_core::error::CoreError;
use movies_core::movie::{validate_movie, validate_movie_patch};
use movies_db::parse_movie_id;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::query::MovieListParams;
use crate::response::{MessageResponse, UpdateMovieResponse};
use crate::state::AppState;

fn not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Movie",
        id: id.to_string(),
    })
}

/// GET /movies
///
/// List all movies, optionally filtered by a case-insensitive genre substring.
pub async fn list_movies(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<MovieListParams>,
) -> AppResult<impl IntoResponse> {
    let movies = state.store.list(params.genre_filter()).await?;

    Ok(Json(movies))
}

/// GET /movies/{id}
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let movie_id = parse_movie_id(&id)?;
    let movie = state
        .store
        .find_by_id(movie_id)
        .await?
        .ok_or_else(|| not_found(&id))?;

    Ok(Json(movie))
}

/// POST /movies
///
/// Validates the body against the full schema before anything is stored.
pub async fn create_movie(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> AppResult<impl IntoResponse> {
    let input = validate_movie(&body).map_err(CoreError::Validation)?;
    let movie = state.store.create(input).await?;

    tracing::info!(movie_id = %movie.id, title = %movie.title, "Movie created");

    Ok((StatusCode::CREATED, Json(movie)))
}

/// PATCH /movies/{id}
///
/// Replaces only the submitted fields and returns the post-update record.
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<Value>,
) -> AppResult<impl IntoResponse> {
    let patch = validate_movie_patch(&body).map_err(CoreError::Validation)?;
    let movie_id = parse_movie_id(&id)?;

    let updated_movie = state
        .store
        .update(movie_id, &patch)
        .await?
        .ok_or_else(|| not_found(&id))?;

    tracing::info!(movie_id = %id, "Movie updated");

    Ok(Json(UpdateMovieResponse {
        message: "Movie updated successfully",
        updated_movie,
    }))
}

/// DELETE /movies/{id}
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let movie_id = parse_movie_id(&id)?;

    if !state.store.delete(movie_id).await? {
        return Err(not_found(&id));
    }

    tracing::info!(movie_id = %id, "Movie deleted");

    Ok(Json(MessageResponse {
        message: "Movie deleted successfully",
    }))
}
