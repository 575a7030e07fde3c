use reqwest::header::{CACHE_CONTROL, PRAGMA};
use serde_json::Value;

use crate::error::{LoadError, Result};

/// Where the payload comes from. The load phase is the only suspension point of
/// the pipeline.
#[async_trait::async_trait]
pub trait PayloadSource: Send + Sync {
    async fn load(&self) -> Result<Value>;

    fn describe(&self) -> String;
}

/// Fetches the payload over plain unauthenticated HTTP, bypassing caches.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait::async_trait]
impl PayloadSource for HttpSource {
    async fn load(&self) -> Result<Value> {
        load(&self.client, &self.url).await
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Single attempt: no retry, no timeout, no backoff.
pub async fn load(client: &reqwest::Client, url: &str) -> Result<Value> {
    tracing::debug!("Fetching leaderboard payload from {}", url);

    let response = client
        .get(url)
        .header(CACHE_CONTROL, "no-cache")
        .header(PRAGMA, "no-cache")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Fetch {
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    let payload = serde_json::from_slice(&body)?;

    Ok(payload)
}
