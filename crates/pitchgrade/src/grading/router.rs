use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::TeamId;
use super::repository::{RosterError, RosterRepository, StatSource};
use super::service::{EvaluationError, GradingService};

/// Router builder exposing the grading, trade, and opponent endpoints.
pub fn grading_router<S, R>(service: Arc<GradingService<S, R>>) -> Router
where
    S: StatSource + 'static,
    R: RosterRepository + 'static,
{
    Router::new()
        .route("/api/profiles", get(profiles_handler::<S, R>))
        .route(
            "/api/teams/:team_id/recommend-lineup",
            get(lineup_handler::<S, R>),
        )
        .route("/api/teams/:team_id/players", get(team_players_handler::<S, R>))
        .route("/api/trade/evaluate", post(trade_handler::<S, R>))
        .route(
            "/api/opponent/:opponent_team_id/weaknesses",
            get(weaknesses_handler::<S, R>),
        )
        .route(
            "/api/opponent/:opponent_team_id/counter-lineup/:team_id",
            get(counter_lineup_handler::<S, R>),
        )
        .route("/api/pitchers/search", get(search_handler::<S, R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    pub profile: Option<String>,
}

impl ProfileQuery {
    fn key(&self) -> Option<&str> {
        self.profile
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Trade request body; side lists default to empty when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeRequest {
    #[serde(rename = "sideA", default)]
    pub side_a: Vec<String>,
    #[serde(rename = "sideB", default)]
    pub side_b: Vec<String>,
    #[serde(default)]
    pub profile: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
}

pub(crate) async fn profiles_handler<S, R>(
    State(service): State<Arc<GradingService<S, R>>>,
) -> Response
where
    S: StatSource + 'static,
    R: RosterRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.profiles())).into_response()
}

pub(crate) async fn lineup_handler<S, R>(
    State(service): State<Arc<GradingService<S, R>>>,
    Path(team_id): Path<u64>,
    Query(query): Query<ProfileQuery>,
) -> Response
where
    S: StatSource + 'static,
    R: RosterRepository + 'static,
{
    match service.recommend_lineup(TeamId(team_id), query.key()) {
        Ok(recommendation) => (StatusCode::OK, axum::Json(recommendation)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn team_players_handler<S, R>(
    State(service): State<Arc<GradingService<S, R>>>,
    Path(team_id): Path<u64>,
    Query(query): Query<ProfileQuery>,
) -> Response
where
    S: StatSource + 'static,
    R: RosterRepository + 'static,
{
    match service.team_grades(TeamId(team_id), query.key()) {
        Ok(grades) => (StatusCode::OK, axum::Json(grades)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn trade_handler<S, R>(
    State(service): State<Arc<GradingService<S, R>>>,
    axum::Json(request): axum::Json<TradeRequest>,
) -> Response
where
    S: StatSource + 'static,
    R: RosterRepository + 'static,
{
    let profile = request
        .profile
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());
    match service.evaluate_trade(&request.side_a, &request.side_b, profile) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn weaknesses_handler<S, R>(
    State(service): State<Arc<GradingService<S, R>>>,
    Path(opponent_team_id): Path<u64>,
) -> Response
where
    S: StatSource + 'static,
    R: RosterRepository + 'static,
{
    match service.analyze_opponent(TeamId(opponent_team_id)) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn counter_lineup_handler<S, R>(
    State(service): State<Arc<GradingService<S, R>>>,
    Path((opponent_team_id, team_id)): Path<(u64, u64)>,
    Query(query): Query<ProfileQuery>,
) -> Response
where
    S: StatSource + 'static,
    R: RosterRepository + 'static,
{
    match service.counter_lineup(TeamId(opponent_team_id), TeamId(team_id), query.key()) {
        Ok(counter) => (StatusCode::OK, axum::Json(counter)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn search_handler<S, R>(
    State(service): State<Arc<GradingService<S, R>>>,
    Query(query): Query<SearchQuery>,
) -> Response
where
    S: StatSource + 'static,
    R: RosterRepository + 'static,
{
    let Some(name) = query
        .name
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
    else {
        let payload = json!({
            "error": "query parameter 'name' is required",
        });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    };

    match service.search(name) {
        Ok(hits) => (StatusCode::OK, axum::Json(hits)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: EvaluationError) -> Response {
    let message = err.to_string();
    match err {
        EvaluationError::Roster(RosterError::NotFound(team_id)) => {
            let payload = json!({
                "error": message,
                "team_id": team_id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        EvaluationError::Upstream {
            profile,
            roster_size,
            ..
        } => {
            let payload = json!({
                "error": message,
                "retryable": true,
                "profile": profile,
                "roster_size": roster_size,
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        EvaluationError::Lookup(_) => {
            let payload = json!({
                "error": message,
                "retryable": true,
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        EvaluationError::Roster(RosterError::Unavailable(_)) => {
            let payload = json!({
                "error": message,
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
