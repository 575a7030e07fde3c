use axum::{
    Json,
    extract::{Query, State},
    response::Html,
};
use leaderboard::LeaderboardView;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{error::WebResult, state::AppState};

/// The `active-only` checkbox.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ToggleQuery {
    /// Only show participants on an active streak
    #[serde(default)]
    pub active_only: bool,
}

/// Leaderboard page rendered from the held snapshot. Never re-fetches.
pub async fn leaderboard_page(
    State(state): State<AppState>,
    Query(toggle): Query<ToggleQuery>,
) -> WebResult<Html<String>> {
    let html = state.leaderboard.render_html(toggle.active_only).await?;
    Ok(Html(html))
}

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(ToggleQuery),
    responses(
        (status = 200, description = "Leaderboard view rendered from the last load", body = LeaderboardView),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(toggle): Query<ToggleQuery>,
) -> Json<LeaderboardView> {
    Json(state.leaderboard.view(toggle.active_only).await)
}

#[utoipa::path(
    post,
    path = "/api/leaderboard/refresh",
    responses(
        (status = 200, description = "Payload re-fetched; unfiltered view of the result", body = LeaderboardView)
    ),
    tag = "leaderboard"
)]
pub async fn refresh_leaderboard(State(state): State<AppState>) -> Json<LeaderboardView> {
    Json(state.leaderboard.refresh().await)
}
