use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

/// Failures of the load phase. All of them collapse the view the same way.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to fetch leaderboard: {status}")]
    Fetch { status: u16 },

    #[error("Failed to parse leaderboard: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to reach leaderboard source: {0}")]
    Request(#[from] reqwest::Error),
}
