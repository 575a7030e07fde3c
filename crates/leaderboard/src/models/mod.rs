mod participant;
mod state;

pub use participant::{ParticipantRecord, display_text};
pub use state::RenderState;

/// Path of the payload relative to the site root.
pub const DATA_FILE: &str = "data/leaderboard.json";
