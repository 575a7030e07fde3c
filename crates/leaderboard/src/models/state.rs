use super::ParticipantRecord;

/// The last successfully fetched payload, already normalized.
///
/// Replaced wholesale on every successful load and never patched in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderState {
    pub users: Vec<ParticipantRecord>,
    pub generated_at: Option<String>,
}

impl RenderState {
    pub fn participant_count(&self) -> usize {
        self.users.len()
    }

    /// Sum of logged days across every participant, filtered or not.
    pub fn total_logged_days(&self) -> u64 {
        self.users.iter().map(ParticipantRecord::logged_days).sum()
    }
}
