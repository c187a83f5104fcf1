use std::path::PathBuf;
use std::sync::Arc;

use crate::fetch::RaceSource;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RaceSource>,

    /// First year of the per-year race files
    pub first_year: i32,

    /// Local data directory exposed under `/data`, if any
    pub data_dir: Option<PathBuf>,
}
