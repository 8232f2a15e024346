//! HTTP handlers for flight lookups.

use crate::AppState;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Datelike;
use flightdesk_db::{DataError, FlightData};
use flightdesk_types::{parse_flight_date, parse_flight_id, AirportCode, FlightRow};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Query parameters for `GET /flights/date`.
#[derive(Debug, Deserialize)]
pub struct DateParams {
    /// Date as `DD/MM/YYYY`.
    pub date: Option<String>,
}

/// Query parameters for `GET /flights/delays/airline`.
#[derive(Debug, Deserialize)]
pub struct AirlineParams {
    /// Substring of the airline name.
    pub airline: Option<String>,
}

/// Query parameters for `GET /flights/delays/airport`.
#[derive(Debug, Deserialize)]
pub struct AirportParams {
    /// Three-letter IATA code of the origin airport.
    pub airport: Option<String>,
}

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<DataError> for ApiError {
    fn from(e: DataError) -> Self {
        match e {
            DataError::Unavailable(_) => {
                ApiError::ServiceUnavailable("Flight data store unavailable".to_string())
            }
            DataError::InvalidDate { .. } => ApiError::BadRequest(e.to_string()),
            DataError::Query(_) => ApiError::InternalServerError("Flight lookup failed".to_string()),
        }
    }
}

const INVALID_DATE: &str = "Invalid date format. Use DD/MM/YYYY.";
const INVALID_AIRPORT: &str = "Invalid IATA code. Use a valid 3-letter code.";

/// Runs a lookup on the blocking pool.
async fn lookup<F>(state: Arc<AppState>, f: F) -> Result<Vec<FlightRow>, ApiError>
where
    F: FnOnce(&FlightData) -> Result<Vec<FlightRow>, DataError> + Send + 'static,
{
    let rows = tokio::task::spawn_blocking(move || f(&state.data))
        .await
        .map_err(|e| ApiError::InternalServerError(format!("task join error: {}", e)))??;
    Ok(rows)
}

fn non_empty(rows: Vec<FlightRow>, message: &str) -> Result<Json<Vec<FlightRow>>, ApiError> {
    if rows.is_empty() {
        Err(ApiError::NotFound(message.to_string()))
    } else {
        Ok(Json(rows))
    }
}

/// Handler for `GET /flight/{id}`.
pub async fn get_flight_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<FlightRow>, ApiError> {
    let flight_id = parse_flight_id(&raw_id)
        .map_err(|_| ApiError::BadRequest("Invalid flight ID.".to_string()))?;

    let rows = lookup(state, move |data| data.flight_by_id(flight_id)).await?;

    rows.into_iter()
        .next()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Flight not found".to_string()))
}

/// Handler for `GET /flights/date?date=DD/MM/YYYY`.
pub async fn get_flights_by_date_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<DateParams>,
) -> Result<Json<Vec<FlightRow>>, ApiError> {
    let raw = params
        .date
        .ok_or_else(|| ApiError::BadRequest(INVALID_DATE.to_string()))?;
    let date =
        parse_flight_date(&raw).map_err(|_| ApiError::BadRequest(INVALID_DATE.to_string()))?;

    let rows = lookup(state, move |data| {
        data.flights_by_date(date.day(), date.month(), date.year())
    })
    .await?;

    non_empty(rows, "No flights found for this date.")
}

/// Handler for `GET /flights/delays/airline?airline=<name>`.
pub async fn get_delays_by_airline_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<AirlineParams>,
) -> Result<Json<Vec<FlightRow>>, ApiError> {
    let airline = params
        .airline
        .ok_or_else(|| ApiError::BadRequest("Missing airline parameter.".to_string()))?;

    let rows = lookup(state, move |data| data.delayed_flights_by_airline(&airline)).await?;

    non_empty(rows, "No delays found for this airline.")
}

/// Handler for `GET /flights/delays/airport?airport=<IATA>`.
pub async fn get_delays_by_airport_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<AirportParams>,
) -> Result<Json<Vec<FlightRow>>, ApiError> {
    let airport = params
        .airport
        .as_deref()
        .map(AirportCode::parse)
        .ok_or_else(|| ApiError::BadRequest(INVALID_AIRPORT.to_string()))?
        .map_err(|_| ApiError::BadRequest(INVALID_AIRPORT.to_string()))?;

    let rows = lookup(state, move |data| {
        data.delayed_flights_by_airport(airport.as_str())
    })
    .await?;

    non_empty(rows, "No delays found for this airport.")
}
