use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::views::{HeaderCell, LeaderboardRow, LeaderboardView, SortColumn, SortOrder, SortState};

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub sort: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub sort: SortState,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<LeaderboardRow>,
}

#[derive(Debug, Serialize)]
pub struct OpenBotResponse {
    pub link: String,
    pub tab: Option<String>,
}

fn sort_state(params: &LeaderboardParams) -> Result<SortState, ApiError> {
    let column = match params.sort.as_deref() {
        Some(s) => Some(s.parse::<SortColumn>().map_err(ApiError::BadRequest)?),
        None => None,
    };
    let order = match params.order.as_deref() {
        Some(s) => Some(s.parse::<SortOrder>().map_err(ApiError::BadRequest)?),
        None => None,
    };
    Ok(SortState::from_parts(column, order))
}

pub async fn leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let sort = sort_state(&params)?;

    let mut view = LeaderboardView::new(sort);
    view.fetch(state.source.as_ref()).await;

    Ok(Json(LeaderboardResponse {
        sort: view.sort(),
        headers: view.headers(),
        rows: view.rows(),
    }))
}

/// Follow a leaderboard row to the bot statistics view.
pub async fn open_bot(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<OpenBotResponse>, ApiError> {
    let tab: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&tab);

    let mut view = LeaderboardView::default().with_tab_change(Box::new(move |route: &str| {
        if let Ok(mut tab) = sink.lock() {
            *tab = Some(route.to_string());
        }
    }));
    view.fetch(state.source.as_ref()).await;

    let link = view
        .open_bot(&name)
        .ok_or_else(|| ApiError::NotFound(format!("No contestant named {}", name)))?;
    let tab = tab.lock().ok().and_then(|t| t.clone());

    Ok(Json(OpenBotResponse { link, tab }))
}
