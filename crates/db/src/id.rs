//! Parsing of client-supplied movie identifiers.

use mongodb::bson::oid::ObjectId;

use crate::error::DbError;

/// Parse a path identifier into an [`ObjectId`].
///
/// Only the canonical 24-character hex form is accepted.
pub fn parse_movie_id(raw: &str) -> Result<ObjectId, DbError> {
    ObjectId::parse_str(raw).map_err(|_| DbError::MalformedId(raw.to_string()))
}
