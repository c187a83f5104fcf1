pub mod bots;
pub mod leaderboard;
