use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{BotOption, RacePoint};
use crate::loader::load_years;
use crate::models::{current_year, years_until_now, BotStat, ALL_YEARS};
use crate::views::{BotsView, Dashboard};

#[derive(Debug, Deserialize)]
pub struct BotStatsParams {
    pub year: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BotStatsResponse {
    pub year: String,
    pub search: Option<String>,
    pub race_count: usize,
    pub options: Vec<BotOption>,
    pub stats: Vec<BotStat>,
    pub selected: Option<BotStat>,
    pub dashboard: Option<Dashboard>,
    pub history: Vec<RacePoint>,
}

#[derive(Debug, Serialize)]
pub struct YearsResponse {
    /// Years requested from the source
    pub requested: Vec<String>,

    /// Years that loaded successfully
    pub available: Vec<String>,

    pub all: &'static str,
    pub default_year: String,
}

/// Accept `"all"` or a four-digit year.
fn validate_year(year: &str) -> Result<(), ApiError> {
    if year == ALL_YEARS || (year.len() == 4 && year.parse::<i32>().is_ok()) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Invalid year: {}", year)))
    }
}

pub async fn list_years(State(state): State<AppState>) -> Result<Json<YearsResponse>, ApiError> {
    let requested = years_until_now(state.first_year);
    let races = load_years(state.source.clone(), &requested).await;
    let available = races.years().into_iter().map(str::to_string).collect();

    Ok(Json(YearsResponse {
        requested,
        available,
        all: ALL_YEARS,
        default_year: current_year().to_string(),
    }))
}

pub async fn bot_stats(
    State(state): State<AppState>,
    Query(params): Query<BotStatsParams>,
) -> Result<Json<BotStatsResponse>, ApiError> {
    let year = params
        .year
        .unwrap_or_else(|| current_year().to_string());
    validate_year(&year)?;

    let races = load_years(state.source.clone(), &years_until_now(state.first_year)).await;

    let mut view = BotsView::new(year, params.search);
    view.set_races(races);

    Ok(Json(BotStatsResponse {
        year: view.year().to_string(),
        search: view.search().map(str::to_string),
        race_count: view.records().len(),
        options: view.options().to_vec(),
        stats: view.stats().to_vec(),
        selected: view.selected().cloned(),
        dashboard: view.dashboard(),
        history: view.history(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::fetch::DirSource;
    use crate::models::current_year;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn write_year(dir: &std::path::Path, year: i32, races: &str) {
        let races_dir = dir.join("races");
        std::fs::create_dir_all(&races_dir).unwrap();
        std::fs::write(races_dir.join(format!("{}.json", year)), races).unwrap();
    }

    /// Two years of data; the year before that has no file.
    fn setup_test_state(dir: &std::path::Path) -> AppState {
        let this_year = current_year();
        write_year(
            dir,
            this_year,
            r#"[{"data":{"winner":["Ana"],"A":["Bo"],"B":[],"C":["Cy"],"prize":{"winner":10,"A":5,"B":1}}}]"#,
        );
        write_year(
            dir,
            this_year - 1,
            r#"[{"data":{"winner":["Bo"],"A":["Ana"],"B":["Cy"],"C":[],"prize":{"winner":10,"A":5,"B":1}}}]"#,
        );
        AppState {
            source: Arc::new(DirSource::new(dir.to_path_buf())),
            first_year: this_year - 2,
            data_dir: Some(dir.to_path_buf()),
        }
    }

    #[tokio::test]
    async fn test_list_years_skips_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));
        let (status, json) = get_json(app, "/api/years").await;

        let this_year = current_year();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["requested"].as_array().unwrap().len(), 3);
        assert_eq!(
            json["available"],
            serde_json::json!([(this_year - 1).to_string(), this_year.to_string()])
        );
        assert_eq!(json["all"], "all");
    }

    #[tokio::test]
    async fn test_bot_stats_with_search() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));
        let (status, json) = get_json(app, "/api/bots?year=all&search=Ana").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["race_count"], 2);
        assert_eq!(json["options"][0]["value"], "Ana");
        assert_eq!(json["selected"]["bot"], "Ana");
        assert_eq!(json["selected"]["winner"], 1);
        assert_eq!(json["selected"]["A"], 1);
        assert_eq!(json["dashboard"]["counters"][0]["label"], "Winner");
        assert_eq!(json["history"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_bot_stats_default_year() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));
        let (status, json) = get_json(app, "/api/bots?search=Cy").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["year"], current_year().to_string());
        assert_eq!(json["race_count"], 1);
        assert_eq!(json["selected"]["C"], 1);
        assert_eq!(json["selected"]["B"], 0);
    }

    #[tokio::test]
    async fn test_bot_stats_unknown_search() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));
        let (status, json) = get_json(app, "/api/bots?year=all&search=Nobody").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["search"], "Nobody");
        assert!(json["selected"].is_null());
        assert!(json["dashboard"].is_null());
        assert_eq!(json["history"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_bot_stats_missing_year_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));
        let uri = format!("/api/bots?year={}", current_year() - 2);
        let (status, json) = get_json(app, &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["race_count"], 0);
        assert_eq!(json["options"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_bot_stats_invalid_year() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));
        let (status, json) = get_json(app, "/api/bots?year=last").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_data_passthrough() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));
        let uri = format!("/data/races/{}.json", current_year());
        let (status, json) = get_json(app, &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["data"]["winner"][0], "Ana");
    }
}
