pub mod auth;
pub mod leaderboard;
