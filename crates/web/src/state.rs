use std::sync::Arc;

use crate::features::{auth::GithubOAuth, leaderboard::LeaderboardService};

#[derive(Clone)]
pub struct AppState {
    pub leaderboard: Arc<LeaderboardService>,
    pub oauth: Arc<GithubOAuth>,
}
