use leaderboard::{Leaderboard, LeaderboardView, PayloadSource};
use tokio::sync::{Mutex, RwLock};

/// Shares one pipeline context between request handlers.
///
/// Exactly one load runs at a time. The network await happens outside the state
/// lock and the snapshot is swapped under a short write lock, so readers only ever
/// see a complete state.
pub struct LeaderboardService {
    board: RwLock<Leaderboard>,
    refresh_gate: Mutex<()>,
    source: Box<dyn PayloadSource>,
}

impl LeaderboardService {
    pub fn new(board: Leaderboard, source: Box<dyn PayloadSource>) -> Self {
        Self {
            board: RwLock::new(board),
            refresh_gate: Mutex::new(()),
            source,
        }
    }

    /// Re-runs the load phase and returns the fresh unfiltered view.
    pub async fn refresh(&self) -> LeaderboardView {
        let _gate = self.refresh_gate.lock().await;

        tracing::info!("Loading leaderboard from {}", self.source.describe());
        let outcome = Leaderboard::load(self.source.as_ref()).await;

        let mut board = self.board.write().await;
        board.apply(outcome);
        board.view(false)
    }

    pub async fn view(&self, active_only: bool) -> LeaderboardView {
        self.board.read().await.view(active_only)
    }

    pub async fn render_html(&self, active_only: bool) -> askama::Result<String> {
        self.board.read().await.render_html(active_only)
    }
}
