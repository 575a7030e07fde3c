use askama::Template;

use super::{COLUMN_COUNT, LeaderboardView};

/// Full leaderboard page. Autoescaping is on: every record field, stat and error
/// message is HTML-escaped before it reaches the markup.
#[derive(Template)]
#[template(path = "leaderboard.html")]
pub struct LeaderboardPage<'a> {
    pub view: &'a LeaderboardView,
    pub active_only: bool,
    pub columns: usize,
}

impl<'a> LeaderboardPage<'a> {
    pub fn new(view: &'a LeaderboardView, active_only: bool) -> Self {
        Self {
            view,
            active_only,
            columns: COLUMN_COUNT,
        }
    }
}

pub fn render_page(view: &LeaderboardView, active_only: bool) -> askama::Result<String> {
    LeaderboardPage::new(view, active_only).render()
}
