use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    Result,
    layout::TrackerLayout,
    logs,
    report,
    stats::{self, UserStats},
};

/// Rebuilds every generated artifact from the logs and returns the ranked stats.
///
/// Nothing is written when there are no logs.
pub async fn update_leaderboard(
    layout: &TrackerLayout,
    today: NaiveDate,
    generated_at: DateTime<Utc>,
) -> Result<Vec<UserStats>> {
    let logs = logs::load_all(layout).await?;
    if logs.is_empty() {
        tracing::info!("No logs found. Add files to {} and rerun.", layout.relative(&layout.logs_dir()));
        return Ok(Vec::new());
    }

    let mut stats: Vec<UserStats> = logs
        .into_iter()
        .map(|log| stats::compute_stats(log, today))
        .collect();
    stats::rank(&mut stats);

    report::write_json(&layout.data_file(), &stats, generated_at).await?;
    report::write_json(&layout.website_data_file(), &stats, generated_at).await?;
    report::write_markdown(&layout.docs_file(), &stats, generated_at).await?;

    tracing::info!("Updated leaderboard for {} participant(s).", stats.len());
    Ok(stats)
}
