use std::sync::Arc;

use anyhow::Context;
use leaderboard::{DateFormatter, HttpSource, Leaderboard};

mod config;
mod error;
mod features;
mod openapi;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use config::Config;
use features::{auth::GithubOAuth, leaderboard::LeaderboardService};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting 100 Days of Code leaderboard");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded successfully");

    let formatter = DateFormatter::for_locale_name(&config.locale)
        .with_context(|| format!("Unsupported LEADERBOARD_LOCALE '{}'", config.locale))?;

    let leaderboard = Arc::new(LeaderboardService::new(
        Leaderboard::new(config.style, formatter),
        Box::new(HttpSource::new(config.data_url.clone())),
    ));

    if config.github.client_id.is_none() {
        tracing::warn!("GITHUB_CLIENT_ID not set, OAuth endpoints will answer 500");
    }
    let oauth = Arc::new(
        GithubOAuth::new(&config.github, &config.site_url)
            .context("Failed to build GitHub HTTP client")?,
    );

    let state = AppState {
        leaderboard: leaderboard.clone(),
        oauth,
    };
    let app = routes::app(state, &config.data_dir);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Serving {} at /data", config.data_dir.display());
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    // The listener is already bound, so a self-hosted payload URL is reachable.
    tokio::spawn(async move {
        leaderboard.refresh().await;
    });

    axum::serve(listener, app).await?;

    Ok(())
}
