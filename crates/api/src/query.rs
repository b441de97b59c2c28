//! Query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /movies` (`?genre=`).
#[derive(Debug, Default, Deserialize)]
pub struct MovieListParams {
    pub genre: Option<String>,
}

impl MovieListParams {
    /// The genre filter to apply, treating an empty value as no filter.
    pub fn genre_filter(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.is_empty())
    }
}
