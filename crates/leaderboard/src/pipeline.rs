use crate::{
    error::Result,
    fetch::PayloadSource,
    filter::filter,
    format::DateFormatter,
    models::RenderState,
    normalize::normalize,
    present::{self, LeaderboardView, PresentationStyle},
};

/// What the last load produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Snapshot {
    /// Nothing loaded yet; renders as an empty leaderboard.
    #[default]
    Pending,
    Ready(RenderState),
    /// The message of the error that ended the last load.
    Failed(String),
}

/// Explicit pipeline context: owns the render state and the presentation settings.
///
/// Loading is the only async step. Rendering is synchronous and never touches the
/// network, so toggling the filter only re-runs filter and presenter.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    snapshot: Snapshot,
    style: PresentationStyle,
    formatter: DateFormatter,
}

impl Leaderboard {
    pub fn new(style: PresentationStyle, formatter: DateFormatter) -> Self {
        Self {
            snapshot: Snapshot::Pending,
            style,
            formatter,
        }
    }

    /// Load phase: fetch and normalize, without touching any held state.
    pub async fn load(source: &dyn PayloadSource) -> Result<RenderState> {
        let raw = source.load().await?;
        Ok(normalize(&raw))
    }

    /// Replaces the snapshot wholesale. A failure drops previously loaded data.
    pub fn apply(&mut self, outcome: Result<RenderState>) {
        self.snapshot = match outcome {
            Ok(state) => {
                tracing::info!(
                    "Leaderboard loaded: {} participant(s), generated at {}",
                    state.participant_count(),
                    state.generated_at.as_deref().unwrap_or("unknown")
                );
                Snapshot::Ready(state)
            }
            Err(error) => {
                tracing::error!("Failed to load leaderboard: {}", error);
                Snapshot::Failed(error.to_string())
            }
        };
    }

    pub async fn refresh(&mut self, source: &dyn PayloadSource) {
        let outcome = Self::load(source).await;
        self.apply(outcome);
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Render phase.
    pub fn view(&self, active_only: bool) -> LeaderboardView {
        let empty = RenderState::default();
        let state = match &self.snapshot {
            Snapshot::Ready(state) => state,
            Snapshot::Pending => &empty,
            Snapshot::Failed(message) => return present::render_error(message, self.style),
        };

        let records = filter(&state.users, active_only);

        LeaderboardView {
            table: present::render_table(&records, self.style, &self.formatter),
            stats: present::render_stats(state, &self.formatter),
        }
    }

    pub fn render_html(&self, active_only: bool) -> askama::Result<String> {
        present::page::render_page(&self.view(active_only), active_only)
    }
}
