use std::{fmt::Display, sync::Arc};

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, error};

use crate::{
    bar_standard::BarStandard,
    calculator::PlateCalculator,
    error::{ParseError, WaitlistError},
    load_request::parse_kg,
    one_rep_max::{PercentageRow, estimate_one_rep_max, percentage_table},
    plate::Plate,
    waitlist::{
        service::{SignupOutcome, WaitlistService},
        signup::SignupRequest,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub waitlist: Arc<WaitlistService>,
}

type ApiError = (StatusCode, Json<Value>);

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/waitlist", post(join_waitlist))
        .route("/api/plates", get(plates))
        .route("/api/one-rep-max", get(one_rep_max))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

fn bad_request(message: impl Display) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message.to_string() })))
}

fn internal_error() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Could not join the waitlist. Please try again later." })),
    )
}

pub async fn join_waitlist(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(|rejection| bad_request(rejection.body_text()))?;

    let waitlist = Arc::clone(&state.waitlist);
    let joined = tokio::task::spawn_blocking(move || waitlist.join(request))
        .await
        .map_err(|e| {
            error!(error = %e, "waitlist task did not complete");
            internal_error()
        })?;

    match joined {
        Ok(SignupOutcome::Joined) => Ok(Json(json!({ "success": true }))),
        Ok(SignupOutcome::AlreadyJoined) => Ok(Json(json!({ "already": true }))),
        Err(e @ WaitlistError::MissingField(_)) => Err(bad_request(e)),
        Err(e) => {
            error!(error = %e, "waitlist signup failed");
            Err(internal_error())
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PlatesQuery {
    pub total: Option<String>,
    pub standard: Option<String>,
    pub without: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatesResponse {
    pub standard: BarStandard,
    pub total: f64,
    pub bar: f64,
    pub achieved: f64,
    pub per_side: f64,
    pub remainder: f64,
    pub exact: bool,
    pub exceeded: bool,
    pub summary: String,
    pub plates: Vec<PlateCount>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateCount {
    #[serde(flatten)]
    pub plate: Plate,
    pub per_side: usize,
}

impl PlatesQuery {
    /// Builds the calculator this query describes and the total it asks for.
    ///
    /// # Errors
    /// If the total is missing, or any weight or the standard does not parse.
    pub fn calculator(&self) -> Result<(PlateCalculator, f64), ParseError> {
        let total = parse_kg(self.total.as_deref().ok_or(ParseError::Missing("total"))?)?;
        let standard = self
            .standard
            .as_deref()
            .map(str::parse::<BarStandard>)
            .transpose()?
            .unwrap_or_default();

        let mut calculator = PlateCalculator::new(standard);
        for kg in self.without.as_deref().unwrap_or_default().split(',') {
            if !kg.trim().is_empty() {
                calculator.set_available(parse_kg(kg)?, false);
            }
        }

        Ok((calculator, total))
    }
}

pub async fn plates(Query(query): Query<PlatesQuery>) -> Result<Json<PlatesResponse>, ApiError> {
    let (calculator, total) = query.calculator().map_err(bad_request)?;
    let result = calculator.resolve(total);

    Ok(Json(PlatesResponse {
        standard: calculator.standard(),
        total,
        bar: result.bar_kg(),
        achieved: result.achieved_kg(),
        per_side: result.per_side_kg(),
        remainder: result.remainder_kg(),
        exact: result.is_exact(),
        exceeded: calculator.exceeds_ceiling(total),
        summary: result.summary(),
        plates: result
            .loaded()
            .iter()
            .map(|(plate, count)| PlateCount {
                plate: *plate,
                per_side: *count,
            })
            .collect(),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct OneRepMaxQuery {
    pub weight: Option<String>,
    pub reps: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OneRepMaxResponse {
    pub one_rep_max: f64,
    pub percentages: Vec<PercentageRow>,
}

pub async fn one_rep_max(Query(query): Query<OneRepMaxQuery>) -> Result<Json<OneRepMaxResponse>, ApiError> {
    let weight = query
        .weight
        .as_deref()
        .ok_or(ParseError::Missing("weight"))
        .and_then(parse_kg)
        .map_err(bad_request)?;
    let reps = query
        .reps
        .as_deref()
        .ok_or(ParseError::Missing("reps"))
        .and_then(|r| r.trim().parse::<u32>().map_err(|_| ParseError::Reps(r.to_string())))
        .map_err(bad_request)?;

    let estimate = estimate_one_rep_max(weight, reps);
    Ok(Json(OneRepMaxResponse {
        one_rep_max: estimate,
        percentages: percentage_table(estimate),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(total: Option<&str>, standard: Option<&str>, without: Option<&str>) -> PlatesQuery {
        PlatesQuery {
            total: total.map(str::to_string),
            standard: standard.map(str::to_string),
            without: without.map(str::to_string),
        }
    }

    #[test]
    fn query_disables_listed_plates() {
        let (calculator, total) = query(Some("100"), Some("pl"), Some("25, 20")).calculator().unwrap();
        assert_eq!(total, 100.0);
        assert_eq!(calculator.standard(), BarStandard::Powerlifting);
        assert!(!calculator.is_available(25.0));
        assert!(!calculator.is_available(20.0));
        assert!(calculator.is_available(15.0));
    }

    #[test]
    fn query_requires_a_total() {
        assert_eq!(
            query(None, None, None).calculator().unwrap_err(),
            ParseError::Missing("total")
        );
        assert!(query(Some("100"), Some("olympic"), None).calculator().is_err());
        assert!(query(Some("100"), None, Some("ten")).calculator().is_err());
    }
}
