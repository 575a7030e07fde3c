//! Producer side of the leaderboard: turns per-user daily logs into the
//! `leaderboard.json` payload and a Markdown summary.

pub mod daily;
pub mod error;
pub mod layout;
pub mod logs;
pub mod report;
pub mod stats;
pub mod update;

pub use error::{ImporterError, Result};
pub use layout::TrackerLayout;
pub use stats::UserStats;
pub use update::update_leaderboard;
