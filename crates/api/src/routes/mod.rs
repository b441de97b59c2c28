pub mod health;
pub mod movies;

use axum::routing::get;
use axum::{Json, Router};

use crate::response::MessageResponse;
use crate::state::AppState;

/// GET / -- welcome message.
async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the movies API!",
    })
}

/// Build the full route tree.
///
/// ```text
/// GET    /               welcome
/// GET    /health         service and database health
/// GET    /movies         list (optional ?genre=)
/// POST   /movies         create
/// GET    /movies/{id}    get
/// PATCH  /movies/{id}    partial update
/// DELETE /movies/{id}    delete
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .merge(health::router())
        .merge(movies::router())
}
