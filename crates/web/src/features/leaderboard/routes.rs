use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::handlers::{get_leaderboard, leaderboard_page, refresh_leaderboard};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(leaderboard_page))
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/leaderboard/refresh", post(refresh_leaderboard))
}
