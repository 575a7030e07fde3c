use std::{fmt, path::PathBuf};

use anyhow::{Context, Result};
use leaderboard::{DATA_FILE, PresentationStyle};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub data_url: String,
    pub locale: String,
    pub style: PresentationStyle,
    pub site_url: String,
    pub github: GithubConfig,
}

#[derive(Clone)]
pub struct GithubConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub oauth_base: String,
    pub api_base: String,
}

impl fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("oauth_base", &self.oauth_base)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = var("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match var("PORT") {
            Some(port) => port.parse().context("PORT must be a number")?,
            None => 8888,
        };
        let style = match var("LEADERBOARD_STYLE") {
            Some(style) => style
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Cannot load LEADERBOARD_STYLE env variable")?,
            None => PresentationStyle::default(),
        };
        let site_url = var("URL")
            .unwrap_or_else(|| format!("http://{}:{}", host, port))
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            data_dir: var("DATA_DIR").unwrap_or_else(|| "data".to_string()).into(),
            data_url: var("LEADERBOARD_DATA_URL")
                .unwrap_or_else(|| format!("http://{}:{}/{}", host, port, DATA_FILE)),
            locale: var("LEADERBOARD_LOCALE").unwrap_or_else(|| "en_US".to_string()),
            style,
            site_url,
            github: GithubConfig {
                client_id: var("GITHUB_CLIENT_ID"),
                client_secret: var("GITHUB_CLIENT_SECRET"),
                oauth_base: var("GITHUB_OAUTH_BASE")
                    .unwrap_or_else(|| "https://github.com".to_string()),
                api_base: var("GITHUB_API_BASE")
                    .unwrap_or_else(|| "https://api.github.com".to_string()),
            },
            host,
            port,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
