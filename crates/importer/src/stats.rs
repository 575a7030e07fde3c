use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::logs::{Entry, ValidatedLog};

const HIGHLIGHT_WIDTH: usize = 80;
const HIGHLIGHT_PLACEHOLDER: &str = "…";

/// One participant's row in the generated payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user: String,
    pub total_days: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub active_streak: bool,
    pub last_update: Option<NaiveDate>,
    pub first_day: Option<NaiveDate>,
    pub highlight: String,
    pub days_since_update: Option<i64>,
}

impl UserStats {
    pub fn status(&self) -> &'static str {
        if self.active_streak { "active" } else { "paused" }
    }
}

pub fn compute_stats(log: ValidatedLog, today: NaiveDate) -> UserStats {
    let mut entries = log.entries;
    entries.sort_by_key(|entry| entry.date);

    let dates: Vec<NaiveDate> = entries.iter().map(|entry| entry.date).collect();
    let highlight = entries
        .last()
        .map(|entry: &Entry| shorten(&entry.summary, HIGHLIGHT_WIDTH, HIGHLIGHT_PLACEHOLDER))
        .unwrap_or_default();

    let last_update = dates.last().copied();
    let days_since_update = last_update.map(|last| (today - last).num_days());

    UserStats {
        user: log.user,
        total_days: entries.len(),
        current_streak: current_streak(&dates),
        longest_streak: longest_streak(&dates),
        active_streak: days_since_update.is_some_and(|days| days <= 1),
        last_update,
        first_day: dates.first().copied(),
        highlight,
        days_since_update,
    }
}

/// Length of the consecutive-day run ending at the latest date.
pub fn current_streak(dates: &[NaiveDate]) -> u32 {
    if dates.is_empty() {
        return 0;
    }

    let run = dates
        .windows(2)
        .rev()
        .take_while(|pair| (pair[1] - pair[0]).num_days() == 1)
        .count();
    run as u32 + 1
}

pub fn longest_streak(dates: &[NaiveDate]) -> u32 {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<NaiveDate> = None;

    for &date in dates {
        current = match previous {
            Some(prev) if (date - prev).num_days() == 1 => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(date);
    }

    longest
}

/// Ranking: current streak, then longest streak (both descending), then the most
/// recently active, then user name case-insensitively.
pub fn rank(stats: &mut [UserStats]) {
    stats.sort_by(compare);
}

fn compare(a: &UserStats, b: &UserStats) -> Ordering {
    b.current_streak
        .cmp(&a.current_streak)
        .then(b.longest_streak.cmp(&a.longest_streak))
        .then(
            a.days_since_update
                .unwrap_or(i64::MAX)
                .cmp(&b.days_since_update.unwrap_or(i64::MAX)),
        )
        .then_with(|| a.user.to_lowercase().cmp(&b.user.to_lowercase()))
}

/// Collapses whitespace and truncates at a word boundary so the result, including
/// `placeholder`, fits in `width` characters.
pub fn shorten(text: &str, width: usize, placeholder: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let collapsed = words.join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(placeholder.chars().count());
    let mut line = String::new();
    let mut line_len = 0;
    for word in words {
        let word_len = word.chars().count();
        let needed = if line.is_empty() { word_len } else { word_len + 1 };
        if line_len + needed > budget {
            break;
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
        line_len += needed;
    }

    line.push_str(placeholder);
    line
}
