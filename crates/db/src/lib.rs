//! Data access for the movies collection.
//!
//! Handlers talk to storage only through the [`MovieStore`] trait. Two
//! implementations exist: [`MovieRepo`] over a MongoDB collection and
//! [`MemoryMovieStore`] for tests and database-less local runs.

pub mod error;
pub mod id;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

use mongodb::bson::doc;
use mongodb::{Client, Database};

pub use error::DbError;
pub use id::parse_movie_id;
pub use memory::MemoryMovieStore;
pub use mongodb::bson::oid::ObjectId;
pub use repositories::MovieRepo;
pub use store::MovieStore;

/// Create the process-wide MongoDB client.
///
/// The driver keeps its own connection pool per server, so one client is
/// built at startup and shared for the lifetime of the process.
pub async fn connect(uri: &str) -> Result<Client, DbError> {
    let client = Client::with_uri_str(uri).await?;
    Ok(client)
}

/// Round-trip a `ping` command to verify the server is reachable.
pub async fn health_check(db: &Database) -> Result<(), DbError> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
