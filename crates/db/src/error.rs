/// Errors raised by the data access layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The identifier is not a 24-character hex object id.
    #[error("Malformed identifier: {0}")]
    MalformedId(String),

    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("BSON serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),
}
