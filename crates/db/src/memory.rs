//! Process-local [`MovieStore`] with the same semantics as [`MovieRepo`].
//!
//! Records live for the lifetime of the process, in insertion order.
//!
//! [`MovieRepo`]: crate::repositories::MovieRepo

use async_trait::async_trait;
use movies_core::movie::{Movie, MoviePatch, NewMovie};
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::error::DbError;
use crate::store::MovieStore;

#[derive(Debug, Default)]
pub struct MemoryMovieStore {
    movies: RwLock<Vec<Movie>>,
}

impl MemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.movies.read().await.is_empty()
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    async fn list(&self, genre: Option<&str>) -> Result<Vec<Movie>, DbError> {
        let movies = self.movies.read().await;
        Ok(movies
            .iter()
            .filter(|m| genre.map_or(true, |g| m.matches_genre(g)))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Movie>, DbError> {
        let hex = id.to_hex();
        let movies = self.movies.read().await;
        Ok(movies.iter().find(|m| m.id == hex).cloned())
    }

    async fn create(&self, movie: NewMovie) -> Result<Movie, DbError> {
        let movie = Movie::from_new(ObjectId::new().to_hex(), movie);
        self.movies.write().await.push(movie.clone());
        Ok(movie)
    }

    async fn update(&self, id: ObjectId, patch: &MoviePatch) -> Result<Option<Movie>, DbError> {
        let hex = id.to_hex();
        let mut movies = self.movies.write().await;
        Ok(movies.iter_mut().find(|m| m.id == hex).map(|movie| {
            movie.apply(patch);
            movie.clone()
        }))
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, DbError> {
        let hex = id.to_hex();
        let mut movies = self.movies.write().await;
        let before = movies.len();
        movies.retain(|m| m.id != hex);
        Ok(movies.len() < before)
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
