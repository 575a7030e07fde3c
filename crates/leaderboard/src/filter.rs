use crate::models::ParticipantRecord;

/// Restricts the sequence to active streaks when `active_only` is set.
///
/// Order is always the payload's order; nothing here re-ranks.
pub fn filter(users: &[ParticipantRecord], active_only: bool) -> Vec<&ParticipantRecord> {
    users
        .iter()
        .filter(|record| !active_only || record.is_active())
        .collect()
}
