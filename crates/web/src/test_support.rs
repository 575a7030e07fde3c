use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{Router, response::Response};
use leaderboard::{Leaderboard, LoadError, PayloadSource};
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::{
    config::GithubConfig,
    features::{auth::GithubOAuth, leaderboard::LeaderboardService},
    routes,
    state::AppState,
};

pub const SITE_URL: &str = "https://board.test";

pub enum FakeSource {
    Payload(Value),
    Status(u16),
}

#[async_trait::async_trait]
impl PayloadSource for FakeSource {
    async fn load(&self) -> leaderboard::Result<Value> {
        match self {
            Self::Payload(payload) => Ok(payload.clone()),
            Self::Status(status) => Err(LoadError::Fetch { status: *status }),
        }
    }

    fn describe(&self) -> String {
        "fake source".to_string()
    }
}

/// Records how often it is loaded and how many loads overlapped.
pub struct CountingSource {
    payload: Value,
    calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            calls: Arc::default(),
            in_flight: Arc::default(),
            peak: Arc::default(),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    pub fn peak_in_flight(&self) -> Arc<AtomicUsize> {
        self.peak.clone()
    }
}

#[async_trait::async_trait]
impl PayloadSource for CountingSource {
    async fn load(&self) -> leaderboard::Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(10)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(self.payload.clone())
    }

    fn describe(&self) -> String {
        "counting source".to_string()
    }
}

pub fn payload_of_five() -> Value {
    json!({
        "generated_at": "2025-01-05T12:00:00+00:00",
        "users": [
            { "user": "ada", "total_days": 10, "current_streak": 4, "active_streak": true },
            { "user": "bob", "total_days": 4, "current_streak": 0, "active_streak": false },
            { "user": "cy", "total_days": 6, "current_streak": 2, "active_streak": true },
            { "user": "di", "total_days": 1, "current_streak": 0 },
            { "user": "ed", "total_days": 2, "current_streak": 0, "active_streak": false }
        ]
    })
}

fn no_github() -> GithubConfig {
    GithubConfig {
        client_id: None,
        client_secret: None,
        oauth_base: "https://github.com".to_string(),
        api_base: "https://api.github.com".to_string(),
    }
}

fn state_with(source: Box<dyn PayloadSource>, github: GithubConfig) -> AppState {
    AppState {
        leaderboard: Arc::new(LeaderboardService::new(Leaderboard::default(), source)),
        oauth: Arc::new(GithubOAuth::new(&github, SITE_URL).unwrap()),
    }
}

/// Router whose pipeline has already loaded `payload`, which is also served
/// from the returned data directory.
pub async fn app_with_payload(payload: Value) -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("leaderboard.json"),
        serde_json::to_vec_pretty(&payload).unwrap(),
    )
    .unwrap();

    let state = state_with(Box::new(FakeSource::Payload(payload)), no_github());
    state.leaderboard.refresh().await;

    (routes::app(state, dir.path()), dir)
}

/// Router whose initial load failed with `status`.
pub async fn app_with_status(status: u16) -> Router {
    let state = state_with(Box::new(FakeSource::Status(status)), no_github());
    state.leaderboard.refresh().await;
    routes::app(state, Path::new("does-not-exist"))
}

pub fn app_with_github(github: GithubConfig) -> Router {
    let state = state_with(Box::new(FakeSource::Payload(json!({}))), github);
    routes::app(state, Path::new("does-not-exist"))
}

pub async fn read_body(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
