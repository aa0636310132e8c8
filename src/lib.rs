pub mod leaderboard;
pub mod models;
pub mod ordering;
pub mod scoring;
pub mod setup;
pub mod snapshot;
pub mod weight;
