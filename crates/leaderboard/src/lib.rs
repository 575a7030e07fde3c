//! Rendering pipeline for the 100 Days of Code leaderboard.
//!
//! fetch → normalize → filter → present → format, with [`Leaderboard`] as the
//! context object that holds the last loaded state.

pub mod error;
pub mod fetch;
pub mod filter;
pub mod format;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod present;

pub use error::{LoadError, Result};
pub use fetch::{HttpSource, PayloadSource};
pub use format::DateFormatter;
pub use models::{DATA_FILE, ParticipantRecord, RenderState};
pub use pipeline::{Leaderboard, Snapshot};
pub use present::{LeaderboardView, PresentationStyle, StatsView, TableRow, TableView};
