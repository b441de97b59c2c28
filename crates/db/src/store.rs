//! The storage seam between handlers and the movies collection.

use async_trait::async_trait;
use movies_core::movie::{Movie, MoviePatch, NewMovie};
use mongodb::bson::oid::ObjectId;

use crate::error::DbError;

/// Persistence operations over the single movies collection.
///
/// Every write is a single-document operation; nothing is retried here.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// List movies, optionally keeping only those with a genre tag that
    /// contains `genre` (case-insensitive).
    async fn list(&self, genre: Option<&str>) -> Result<Vec<Movie>, DbError>;

    /// Find a movie by its identifier.
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Movie>, DbError>;

    /// Persist a validated movie and return it with its assigned identifier.
    async fn create(&self, movie: NewMovie) -> Result<Movie, DbError>;

    /// Apply `patch` and return the post-update record, or `None` if no movie
    /// has that identifier.
    async fn update(&self, id: ObjectId, patch: &MoviePatch) -> Result<Option<Movie>, DbError>;

    /// Delete a movie. Returns `true` if a record was actually removed.
    async fn delete(&self, id: ObjectId) -> Result<bool, DbError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), DbError>;
}
