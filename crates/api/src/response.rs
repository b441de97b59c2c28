//! Shared response body types for API handlers.

use movies_core::movie::Movie;
use serde::Serialize;

/// `{ "message": ... }` body used by the welcome and delete endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Body returned by `PATCH /movies/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieResponse {
    pub message: &'static str,
    pub updated_movie: Movie,
}
