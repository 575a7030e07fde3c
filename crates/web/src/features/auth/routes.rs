use axum::{Router, routing::get};

use crate::state::AppState;

use super::handlers::{callback, start};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/start", get(start))
        .route("/callback", get(callback))
}
