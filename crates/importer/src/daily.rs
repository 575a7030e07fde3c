use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    ImporterError, Result,
    layout::TrackerLayout,
    logs::{DATE_FORMAT, LogEntry, UserLog},
};

pub const CHALLENGE_DAYS: u32 = 100;
pub const MIN_SUMMARY_CHARS: usize = 20;
pub const DEFAULT_HIGHLIGHT: &str = "Another day of progress!";
pub const MAX_USERNAME_CHARS: usize = 39;

/// What a participant reports for today.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub summary: String,
    pub technologies: Vec<String>,
    pub links: Vec<String>,
    pub highlight: Option<String>,
}

/// GitHub login rules: ASCII letters, digits and inner hyphens. The name
/// becomes a file name under `logs/users/`.
pub fn validate_username(user: &str) -> Result<()> {
    if user.is_empty() {
        return Err(ImporterError::ValidationError(
            "Username cannot be empty".to_string(),
        ));
    }

    let well_formed = user.len() <= MAX_USERNAME_CHARS
        && user.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !user.starts_with('-')
        && !user.ends_with('-');
    if !well_formed {
        return Err(ImporterError::ValidationError(format!(
            "'{}' is not a valid GitHub username",
            user
        )));
    }
    Ok(())
}

/// Loads a user's log, or starts an empty one.
pub async fn load_or_create(layout: &TrackerLayout, user: &str) -> Result<UserLog> {
    validate_username(user)?;
    let path = layout.user_log(user);
    if !tokio::fs::try_exists(&path).await? {
        return Ok(UserLog {
            user: user.to_string(),
            entries: Vec::new(),
        });
    }

    let content = tokio::fs::read_to_string(&path).await?;
    Ok(serde_json::from_str(&content)?)
}

pub async fn save(layout: &TrackerLayout, log: &UserLog) -> Result<()> {
    validate_username(&log.user)?;
    tokio::fs::create_dir_all(layout.logs_dir()).await?;
    let path = layout.user_log(&log.user);
    tokio::fs::write(&path, serde_json::to_string_pretty(log)?).await?;
    tracing::info!("Log saved to {}", path.display());
    Ok(())
}

/// Appends today's entry and returns its day number.
pub fn record_day(
    log: &mut UserLog,
    entry: NewEntry,
    today: NaiveDate,
    now: NaiveDateTime,
) -> Result<u32> {
    let today_text = today.format(DATE_FORMAT).to_string();
    if log.entries.iter().any(|existing| existing.date == today_text) {
        return Err(ImporterError::LogError(format!(
            "{} already logged today; come back tomorrow to continue the streak",
            log.user
        )));
    }

    if let Some(days_since) = days_since_last(log, today)
        && days_since > 1
    {
        tracing::warn!(
            "Last log for {} was {} days ago, the current streak will reset",
            log.user,
            days_since
        );
    }

    let day = log.entries.len() as u32 + 1;
    if day > CHALLENGE_DAYS {
        return Err(ImporterError::LogError(format!(
            "{} has already completed {} days",
            log.user, CHALLENGE_DAYS
        )));
    }

    let summary = entry.summary.trim().to_string();
    if summary.chars().count() < MIN_SUMMARY_CHARS {
        return Err(ImporterError::ValidationError(format!(
            "Summary must be at least {} characters",
            MIN_SUMMARY_CHARS
        )));
    }

    let technologies: Vec<String> = entry
        .technologies
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect();
    if technologies.is_empty() {
        return Err(ImporterError::ValidationError(
            "Add at least one technology".to_string(),
        ));
    }

    let highlight = entry
        .highlight
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| DEFAULT_HIGHLIGHT.to_string());

    log.entries.push(LogEntry {
        day: i64::from(day),
        date: today_text,
        summary,
        technologies,
        links: entry
            .links
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect(),
        highlight: Some(highlight),
        timestamp: Some(now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()),
        extra: Default::default(),
    });

    Ok(day)
}

fn days_since_last(log: &UserLog, today: NaiveDate) -> Option<i64> {
    let last = log.entries.last()?;
    let date = NaiveDate::parse_from_str(&last.date, DATE_FORMAT).ok()?;
    Some((today - date).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()
    }

    fn now() -> NaiveDateTime {
        today().and_hms_opt(9, 30, 0).unwrap()
    }

    fn entry() -> NewEntry {
        NewEntry {
            summary: "Built the leaderboard renderer".to_string(),
            technologies: vec!["rust".to_string(), " ".to_string(), "axum ".to_string()],
            links: vec![],
            highlight: None,
        }
    }

    fn empty_log() -> UserLog {
        UserLog {
            user: "ada".to_string(),
            entries: Vec::new(),
        }
    }

    #[test]
    fn test_first_entry() {
        let mut log = empty_log();
        let day = record_day(&mut log, entry(), today(), now()).unwrap();

        assert_eq!(day, 1);
        let saved = &log.entries[0];
        assert_eq!(saved.date, "2025-01-05");
        assert_eq!(saved.technologies, vec!["rust", "axum"]);
        assert_eq!(saved.highlight.as_deref(), Some(DEFAULT_HIGHLIGHT));
        assert_eq!(saved.timestamp.as_deref(), Some("2025-01-05T09:30:00.000000"));
    }

    #[test]
    fn test_second_entry_same_day_is_refused() {
        let mut log = empty_log();
        record_day(&mut log, entry(), today(), now()).unwrap();

        let error = record_day(&mut log, entry(), today(), now()).unwrap_err();
        assert!(matches!(error, ImporterError::LogError(_)));
        assert_eq!(log.entries.len(), 1);
    }

    #[test]
    fn test_short_summary_is_refused() {
        let mut log = empty_log();
        let short = NewEntry {
            summary: "too short".to_string(),
            ..entry()
        };
        assert!(matches!(
            record_day(&mut log, short, today(), now()),
            Err(ImporterError::ValidationError(_))
        ));
    }

    #[test]
    fn test_missing_technologies_is_refused() {
        let mut log = empty_log();
        let bare = NewEntry {
            technologies: vec![" ".to_string()],
            ..entry()
        };
        assert!(record_day(&mut log, bare, today(), now()).is_err());
        assert!(log.entries.is_empty());
    }

    #[test]
    fn test_day_past_challenge_is_refused() {
        let mut log = empty_log();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for offset in 0..CHALLENGE_DAYS {
            let day = start + chrono::Days::new(offset as u64);
            record_day(&mut log, entry(), day, now()).unwrap();
        }

        let error = record_day(&mut log, entry(), today(), now()).unwrap_err();
        assert!(error.to_string().contains("completed 100 days"));
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("ada").is_ok());
        assert!(validate_username("grace-hopper42").is_ok());
        assert!(validate_username(&"a".repeat(39)).is_ok());

        let too_long = "a".repeat(40);
        for bad in ["", "-ada", "ada-", "a.b", "ada/../bob", "ada lovelace", too_long.as_str()] {
            assert!(
                matches!(validate_username(bad), Err(ImporterError::ValidationError(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_path_like_username_never_touches_disk() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("repo");
        let layout = TrackerLayout::new(root.clone());

        let error = load_or_create(&layout, "../../../outside").await.unwrap_err();
        assert!(matches!(error, ImporterError::ValidationError(_)));

        let mut log = UserLog {
            user: "../../../outside".to_string(),
            entries: Vec::new(),
        };
        record_day(&mut log, entry(), today(), now()).unwrap();
        assert!(save(&layout, &log).await.is_err());

        assert!(!dir.path().join("outside.json").exists());
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let layout = TrackerLayout::new(dir.path());

        let mut log = load_or_create(&layout, "ada").await.unwrap();
        assert!(log.entries.is_empty());

        record_day(&mut log, entry(), today(), now()).unwrap();
        save(&layout, &log).await.unwrap();

        assert_eq!(load_or_create(&layout, "ada").await.unwrap(), log);
    }
}
