//! Domain types and validation for the movies service.
//!
//! Pure logic only: nothing in this crate touches the network or the
//! database, so the API and storage layers can share one definition of
//! what a valid movie is.

pub mod error;
pub mod movie;
pub mod validation;
