//! Core data models for the race dashboard.

mod bot_stat;
mod contestant;
mod race;
mod year;

pub use bot_stat::*;
pub use contestant::*;
pub use race::*;
pub use year::*;
