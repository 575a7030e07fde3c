use std::path::PathBuf;

use clap::{Parser, Subcommand};
use importer::{
    TrackerLayout,
    daily::{self, NewEntry},
    update_leaderboard,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "100 Days of Code log keeper and leaderboard generator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Repository root holding logs/, data/, docs/ and website/
    #[arg(long, env = "TRACKER_ROOT", default_value = ".")]
    root: PathBuf,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild data/leaderboard.json, website/data/leaderboard.json and docs/LEADERBOARD.md
    Update,
    /// Append today's entry to a user's log
    Log {
        #[arg(short, long)]
        user: String,

        #[arg(short, long)]
        summary: String,

        #[arg(short, long, value_delimiter = ',', required = true)]
        technologies: Vec<String>,

        #[arg(long)]
        link: Option<String>,

        #[arg(long)]
        highlight: Option<String>,

        /// Skip regenerating the leaderboard afterwards
        #[arg(long)]
        no_update: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tracker={},importer={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let layout = TrackerLayout::new(cli.root);

    match cli.command {
        Commands::Update => {
            handle_update(&layout).await?;
        }
        Commands::Log {
            user,
            summary,
            technologies,
            link,
            highlight,
            no_update,
        } => {
            let entry = NewEntry {
                summary,
                technologies,
                links: link.into_iter().collect(),
                highlight,
            };
            handle_log(&layout, user.trim(), entry, no_update).await?;
        }
    }

    Ok(())
}

async fn handle_update(layout: &TrackerLayout) -> Result<(), Box<dyn std::error::Error>> {
    let now = chrono::Utc::now();
    let stats = update_leaderboard(layout, now.date_naive(), now).await?;

    for (index, item) in stats.iter().enumerate() {
        let last_update = item
            .last_update
            .map(|date| date.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        tracing::info!(
            "{:>2}. {:<20} days={:<3} current={:<2} longest={:<2} status={:<6} last={}",
            index + 1,
            item.user,
            item.total_days,
            item.current_streak,
            item.longest_streak,
            item.status(),
            last_update
        );
    }

    Ok(())
}

async fn handle_log(
    layout: &TrackerLayout,
    user: &str,
    entry: NewEntry,
    no_update: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let now = chrono::Local::now().naive_local();
    let mut log = daily::load_or_create(layout, user).await?;
    let day = daily::record_day(&mut log, entry, now.date(), now)?;
    daily::save(layout, &log).await?;

    if no_update {
        tracing::info!("Skipping leaderboard update, run `tracker update` before committing");
    } else if let Err(e) = handle_update(layout).await {
        tracing::warn!("Failed to update leaderboard: {}", e);
    }

    tracing::info!(
        "Day {} logged for {}, {} day(s) left",
        day,
        user,
        daily::CHALLENGE_DAYS.saturating_sub(day)
    );

    Ok(())
}
