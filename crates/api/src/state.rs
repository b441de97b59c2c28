use std::sync::Arc;

use movies_db::MovieStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Movie persistence, built once at startup and shared by every request.
    pub store: Arc<dyn MovieStore>,
}
