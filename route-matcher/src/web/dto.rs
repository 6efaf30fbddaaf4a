//! Data transfer objects for web requests and responses.

use serde::Serialize;
use serde_json::Value;

use crate::domain::{Coordinate, InvalidCoordinate};
use crate::matcher::Itinerary;

/// Why a route request was rejected before matching.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    /// Body is not JSON, or lacks `lat`/`lng`
    #[error("missing required coordinate fields (need 'lat' and 'lng')")]
    MissingCoordinate,

    /// `lat` or `lng` is neither a number nor a numeric string
    #[error("'{0}' must be a number")]
    NotNumeric(&'static str),

    /// Coordinate is out of range
    #[error(transparent)]
    OutOfRange(#[from] InvalidCoordinate),
}

/// Extract the user's click position from a request body.
///
/// Both `lat` and `lng` must be present. Each may be a JSON number or a
/// string holding one.
pub fn user_coordinate(payload: &Value) -> Result<Coordinate, RequestError> {
    let (Some(lat), Some(lng)) = (payload.get("lat"), payload.get("lng")) else {
        return Err(RequestError::MissingCoordinate);
    };
    let lat = number_field("lat", lat)?;
    let lng = number_field("lng", lng)?;
    Ok(Coordinate::new(lat, lng)?)
}

fn number_field(name: &'static str, value: &Value) -> Result<f64, RequestError> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or(RequestError::NotNumeric(name))
}

/// Successful route response.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Always true
    pub success: bool,

    #[serde(flatten)]
    pub itinerary: Itinerary,
}

impl RouteResponse {
    /// Wrap an itinerary.
    pub fn new(itinerary: Itinerary) -> Self {
        Self {
            success: true,
            itinerary,
        }
    }
}

/// Failed route response.
///
/// Only the fields relevant to the failure are present.
#[derive(Debug, Default, Serialize)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,

    /// Human-readable reason
    pub message: String,

    /// The rejected request body (invalid input only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_data: Option<Value>,

    /// Destinations examined (not-found only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_endpoints: Option<usize>,

    /// Candidates that were tried (not-found only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_count: Option<usize>,

    /// Error kind (server errors only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}
