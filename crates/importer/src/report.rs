use std::{fmt::Write as _, path::Path};

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::Serialize;

use crate::{Result, stats::UserStats};

#[derive(Debug, Serialize)]
pub struct LeaderboardDocument<'a> {
    pub generated_at: String,
    pub users: &'a [UserStats],
}

impl<'a> LeaderboardDocument<'a> {
    pub fn new(users: &'a [UserStats], generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: generated_at
                .trunc_subsecs(0)
                .to_rfc3339_opts(SecondsFormat::Secs, false),
            users,
        }
    }
}

pub async fn write_json(path: &Path, stats: &[UserStats], generated_at: DateTime<Utc>) -> Result<()> {
    let document = LeaderboardDocument::new(stats, generated_at);
    let json = serde_json::to_string_pretty(&document)?;
    write_file(path, json).await
}

pub fn render_markdown(stats: &[UserStats], generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str("# Community Leaderboard\n\n");
    let _ = writeln!(
        out,
        "Last updated: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out.push_str(
        "| Rank | User | Days Logged | Current Streak | Longest Streak | Last Activity | Status | Highlight |\n",
    );
    out.push_str(
        "| ---- | ---- | ----------- | -------------- | -------------- | ------------- | ------ | --------- |\n",
    );

    for (index, item) in stats.iter().enumerate() {
        let last_update = item
            .last_update
            .map(|date| date.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} | {} |",
            index + 1,
            item.user,
            item.total_days,
            item.current_streak,
            item.longest_streak,
            last_update,
            item.status(),
            item.highlight.replace('|', "\\|"),
        );
    }

    out
}

pub async fn write_markdown(path: &Path, stats: &[UserStats], generated_at: DateTime<Utc>) -> Result<()> {
    write_file(path, render_markdown(stats, generated_at)).await
}

async fn write_file(path: &Path, contents: String) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, contents).await?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn sample() -> Vec<UserStats> {
        vec![UserStats {
            user: "ada".to_string(),
            total_days: 3,
            current_streak: 2,
            longest_streak: 3,
            active_streak: true,
            last_update: NaiveDate::from_ymd_opt(2025, 1, 5),
            first_day: NaiveDate::from_ymd_opt(2025, 1, 1),
            highlight: "a | b".to_string(),
            days_since_update: Some(0),
        }]
    }

    fn at_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_document_shape() {
        let stats = sample();
        let value = serde_json::to_value(LeaderboardDocument::new(&stats, at_noon())).unwrap();

        assert_eq!(value["generated_at"], "2025-01-05T12:00:00+00:00");
        assert_eq!(value["users"][0]["last_update"], "2025-01-05");
        assert_eq!(value["users"][0]["first_day"], "2025-01-01");
        assert_eq!(value["users"][0]["active_streak"], true);
        assert_eq!(value["users"][0]["days_since_update"], 0);
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let markdown = render_markdown(&sample(), at_noon());

        assert!(markdown.starts_with("# Community Leaderboard\n\nLast updated: 2025-01-05 12:00:00 UTC\n"));
        assert!(markdown.contains("| 1 | ada | 3 | 2 | 3 | 2025-01-05 | active | a \\| b |"));
    }
}
