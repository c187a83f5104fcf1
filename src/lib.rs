//! # Race Dashboard
//!
//! Bot statistics and an all-time leaderboard built from yearly race results.
//!
//! ## Architecture
//!
//! - **models**: Race records, tiers and the derived per-bot aggregates
//! - **fetch**: Race data sources (HTTP static files or a local directory)
//! - **loader**: Concurrent loading of every year's race file
//! - **calculate**: Bot statistics, leaderboard and race history reductions
//! - **views**: View state for the bot statistics and leaderboard tabs
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod fetch;
pub mod loader;
pub mod models;
pub mod views;

pub use models::*;
