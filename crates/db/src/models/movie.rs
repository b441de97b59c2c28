//! BSON document shape of the `movies` collection.

use movies_core::movie::{Genre, Movie, NewMovie};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A document from the `movies` collection.
///
/// Mirrors [`Movie`] but keeps the identifier as a native [`ObjectId`] so it
/// is stored and queried as one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub year: i32,
    pub genre: Vec<Genre>,
    pub rate: i32,
    pub director: String,
    pub duration: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

impl MovieDocument {
    pub fn new(id: ObjectId, movie: NewMovie) -> Self {
        Self {
            id,
            title: movie.title,
            year: movie.year,
            genre: movie.genre,
            rate: movie.rate,
            director: movie.director,
            duration: movie.duration,
            poster: movie.poster,
        }
    }
}

impl From<MovieDocument> for Movie {
    fn from(doc: MovieDocument) -> Self {
        Movie {
            id: doc.id.to_hex(),
            title: doc.title,
            year: doc.year,
            genre: doc.genre,
            rate: doc.rate,
            director: doc.director,
            duration: doc.duration,
            poster: doc.poster,
        }
    }
}
