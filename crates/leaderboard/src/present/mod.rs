//! Turns normalized records into display-ready views.
//!
//! Views hold plain display strings. Escaping happens once, when a view is emitted
//! as HTML by [`page`].

pub mod page;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    format::DateFormatter,
    models::{ParticipantRecord, RenderState, display_text},
};

/// Placeholder for an absent "last updated" value.
pub const EM_DASH: &str = "—";

/// Number of table columns; placeholder rows span all of them.
pub const COLUMN_COUNT: usize = 8;

const EMPTY_MESSAGE: &str = "No entries yet. Be the first to log your progress!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PresentationStyle {
    #[default]
    Classic,
    /// Medal ranks, emoji status badges and a dash for missing highlights.
    Enhanced,
}

impl PresentationStyle {
    fn rank_label(self, rank: usize) -> String {
        match (self, rank) {
            (Self::Enhanced, 1) => "🥇".to_string(),
            (Self::Enhanced, 2) => "🥈".to_string(),
            (Self::Enhanced, 3) => "🥉".to_string(),
            _ => rank.to_string(),
        }
    }

    fn status_label(self, active: bool) -> &'static str {
        match (self, active) {
            (Self::Classic, true) => "active",
            (Self::Classic, false) => "paused",
            (Self::Enhanced, true) => "🔥 Active",
            (Self::Enhanced, false) => "💤 Paused",
        }
    }

    fn highlight_label(self, highlight: Option<String>) -> String {
        match self {
            Self::Classic => highlight.unwrap_or_default(),
            Self::Enhanced => highlight.unwrap_or_else(|| EM_DASH.to_string()),
        }
    }

    fn empty_message(self) -> String {
        match self {
            Self::Classic => EMPTY_MESSAGE.to_string(),
            Self::Enhanced => format!("{EMPTY_MESSAGE} 🚀"),
        }
    }

    fn error_message(self, message: &str) -> String {
        match self {
            Self::Classic => message.to_string(),
            Self::Enhanced => format!("❌ {message}"),
        }
    }
}

impl FromStr for PresentationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "enhanced" => Ok(Self::Enhanced),
            other => Err(format!("unknown presentation style '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TableRow {
    pub rank: String,
    pub user: String,
    pub total_days: String,
    pub current_streak: String,
    pub longest_streak: String,
    pub last_update: String,
    pub status: String,
    pub highlight: String,
}

/// Body of the leaderboard table: either data rows or one full-width message row.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TableView {
    pub rows: Vec<TableRow>,
    pub placeholder: Option<String>,
}

impl TableView {
    pub fn with_rows(rows: Vec<TableRow>) -> Self {
        Self {
            rows,
            placeholder: None,
        }
    }

    pub fn with_placeholder(message: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            placeholder: Some(message.into()),
        }
    }

    /// Number of `<tr>` elements the body renders.
    pub fn row_count(&self) -> usize {
        if self.placeholder.is_some() {
            1
        } else {
            self.rows.len()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatsView {
    pub participant_count: String,
    pub total_days: String,
    pub last_updated: String,
}

impl StatsView {
    pub fn zeroed() -> Self {
        Self {
            participant_count: "0".to_string(),
            total_days: "0".to_string(),
            last_updated: EM_DASH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LeaderboardView {
    pub table: TableView,
    pub stats: StatsView,
}

/// Rank is the 1-based position in the order received.
pub fn render_table(
    records: &[&ParticipantRecord],
    style: PresentationStyle,
    formatter: &DateFormatter,
) -> TableView {
    if records.is_empty() {
        return TableView::with_placeholder(style.empty_message());
    }

    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| TableRow {
            rank: style.rank_label(index + 1),
            user: display_text(&record.user),
            total_days: display_text(&record.total_days),
            current_streak: display_text(&record.current_streak),
            longest_streak: display_text(&record.longest_streak),
            last_update: formatter.format_date(record.last_update_text().as_deref()),
            status: style.status_label(record.is_active()).to_string(),
            highlight: style.highlight_label(record.highlight_text()),
        })
        .collect();

    TableView::with_rows(rows)
}

/// Headline numbers. Always computed over the full, unfiltered state: the
/// active-only toggle narrows the table but never these counters.
pub fn render_stats(state: &RenderState, formatter: &DateFormatter) -> StatsView {
    StatsView {
        participant_count: state.participant_count().to_string(),
        total_days: state.total_logged_days().to_string(),
        last_updated: match state.generated_at.as_deref() {
            Some(stamp) => formatter.format_date_time(Some(stamp)),
            None => EM_DASH.to_string(),
        },
    }
}

/// Uniform failure view: one message row, zeroed counters.
pub fn render_error(error: &dyn fmt::Display, style: PresentationStyle) -> LeaderboardView {
    LeaderboardView {
        table: TableView::with_placeholder(style.error_message(&error.to_string())),
        stats: StatsView::zeroed(),
    }
}
