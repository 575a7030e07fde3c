use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

use crate::{
    config::GithubConfig,
    error::{WebError, WebResult},
};

const SCOPE: &str = "repo";
const CALLBACK_PATH: &str = "/auth/callback";
const COMPLETE_PATH: &str = "/log-oauth-complete.html";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
}

/// GitHub OAuth redirect dance: build the authorize URL, then trade a callback
/// code for a token and the user's login.
pub struct GithubOAuth {
    client: reqwest::Client,
    client_id: Option<String>,
    client_secret: Option<String>,
    oauth_base: String,
    api_base: String,
    site_url: String,
}

impl GithubOAuth {
    pub fn new(config: &GithubConfig, site_url: &str) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("100-days-leaderboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            oauth_base: config.oauth_base.trim_end_matches('/').to_string(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            site_url: site_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn authorize_url(&self) -> WebResult<String> {
        let client_id = self
            .client_id
            .as_deref()
            .ok_or_else(|| WebError::Config("GitHub OAuth not configured".to_string()))?;

        let redirect_uri = format!("{}{}", self.site_url, CALLBACK_PATH);
        let url = Url::parse_with_params(
            &format!("{}/login/oauth/authorize", self.oauth_base),
            &[
                ("client_id", client_id),
                ("redirect_uri", redirect_uri.as_str()),
                ("scope", SCOPE),
            ],
        )
        .map_err(|e| WebError::Config(format!("Invalid GitHub OAuth base URL: {}", e)))?;

        Ok(url.into())
    }

    /// Exchanges `code` and returns the completion page URL carrying the token and
    /// username.
    pub async fn complete(&self, code: &str) -> WebResult<String> {
        let (Some(client_id), Some(client_secret)) =
            (self.client_id.as_deref(), self.client_secret.as_deref())
        else {
            return Err(WebError::Config("OAuth not configured".to_string()));
        };

        let access_token = self.exchange_code(client_id, client_secret, code).await?;
        let login = self.fetch_login(&access_token).await?;
        tracing::info!("GitHub OAuth completed for {}", login);

        let url = Url::parse_with_params(
            &format!("{}{}", self.site_url, COMPLETE_PATH),
            &[("token", access_token.as_str()), ("username", login.as_str())],
        )
        .map_err(|e| WebError::Config(format!("Invalid site URL: {}", e)))?;

        Ok(url.into())
    }

    async fn exchange_code(&self, client_id: &str, client_secret: &str, code: &str) -> WebResult<String> {
        let token: TokenResponse = self
            .client
            .post(format!("{}/login/oauth/access_token", self.oauth_base))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&json!({
                "client_id": client_id,
                "client_secret": client_secret,
                "code": code,
            }))
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = token.error {
            return Err(WebError::Upstream(token.error_description.unwrap_or(error)));
        }

        token
            .access_token
            .ok_or_else(|| WebError::Upstream("GitHub did not return an access token".to_string()))
    }

    async fn fetch_login(&self, access_token: &str) -> WebResult<String> {
        let user: GithubUser = self
            .client
            .get(format!("{}/user", self.api_base))
            .header(reqwest::header::AUTHORIZATION, format!("token {}", access_token))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(user.login)
    }
}
