//! Request handlers.
//!
//! Each handler performs exactly one store call, with validation before
//! writes, and maps failures via [`AppError`](crate::error::AppError).

pub mod movies;
