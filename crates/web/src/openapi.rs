use utoipa::OpenApi;

use crate::features::{auth, leaderboard};

#[derive(OpenApi)]
#[openapi(
    paths(
        leaderboard::handlers::get_leaderboard,
        leaderboard::handlers::refresh_leaderboard,
        auth::handlers::start,
        auth::handlers::callback,
    ),
    components(
        schemas(
            ::leaderboard::LeaderboardView,
            ::leaderboard::TableView,
            ::leaderboard::TableRow,
            ::leaderboard::StatsView,
        )
    ),
    tags(
        (name = "leaderboard", description = "Rendered leaderboard views"),
        (name = "auth", description = "GitHub OAuth redirect endpoints"),
    )
)]
pub struct ApiDoc;
