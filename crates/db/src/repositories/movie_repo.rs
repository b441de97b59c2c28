//! MongoDB-backed repository for the `movies` collection.

use async_trait::async_trait;
use futures::TryStreamExt;
use movies_core::movie::{Movie, MoviePatch, NewMovie};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};

use crate::error::DbError;
use crate::models::movie::MovieDocument;
use crate::store::MovieStore;

/// Provides CRUD operations for movies over a single collection.
///
/// Cloning is cheap: the underlying client handle is shared.
#[derive(Clone)]
pub struct MovieRepo {
    db: Database,
    movies: Collection<MovieDocument>,
}

impl MovieRepo {
    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        let db = client.database(database);
        let movies = db.collection::<MovieDocument>(collection);
        Self { db, movies }
    }
}

/// Build the list filter for an optional genre substring.
///
/// The substring is escaped so regex metacharacters in the query string
/// match literally; `$regex` on an array field matches any element.
fn genre_filter(genre: Option<&str>) -> Document {
    match genre {
        Some(g) => doc! {
            "genre": { "$regex": regex::escape(g), "$options": "i" }
        },
        None => doc! {},
    }
}

#[async_trait]
impl MovieStore for MovieRepo {
    async fn list(&self, genre: Option<&str>) -> Result<Vec<Movie>, DbError> {
        let docs: Vec<MovieDocument> = self
            .movies
            .find(genre_filter(genre))
            .await?
            .try_collect()
            .await?;

        Ok(docs.into_iter().map(Movie::from).collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Movie>, DbError> {
        let doc = self.movies.find_one(doc! { "_id": id }).await?;
        Ok(doc.map(Movie::from))
    }

    async fn create(&self, movie: NewMovie) -> Result<Movie, DbError> {
        let doc = MovieDocument::new(ObjectId::new(), movie);
        self.movies.insert_one(&doc).await?;

        tracing::debug!(movie_id = %doc.id, "Inserted movie document");
        Ok(doc.into())
    }

    async fn update(&self, id: ObjectId, patch: &MoviePatch) -> Result<Option<Movie>, DbError> {
        // `$set: {}` is rejected by the server; an empty patch is a read.
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let set = mongodb::bson::to_document(patch)?;
        let doc = self
            .movies
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        Ok(doc.map(Movie::from))
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, DbError> {
        let result = self.movies.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), DbError> {
        crate::health_check(&self.db).await
    }
}
