//! HTTP route handlers.

use std::path::Path;
use std::time::Duration;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde_json::Value;
use tower_http::services::ServeDir;
use tracing::{debug, error, warn};

use crate::matcher::{Itinerary, RouteSelector, SelectError, present};

use super::dto::*;
use super::state::AppState;
use super::templates::IndexTemplate;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/get_route", post(get_route))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Map page.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let origin = state.catalog.origin();
    let template = IndexTemplate {
        origin_lat: origin.lat(),
        origin_lng: origin.lng(),
        route_count: state.catalog.len(),
    };
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Find the best route to the clicked position.
async fn get_route(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RouteResponse>, AppError> {
    // Parse manually so malformed bodies are echoed back rather than rejected
    // by the extractor
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    debug!(%payload, "route request");

    let user = user_coordinate(&payload).map_err(|e| AppError::InvalidInput {
        message: e.to_string(),
        received: payload.clone(),
    })?;

    let catalog = state.catalog.clone();
    let config = state.matcher.clone();
    let itinerary: Itinerary = run_within_budget(state.request_budget, move || {
        RouteSelector::new(&catalog, &config)
            .select(user)
            .map(|selection| present(&selection))
    })
    .await??;

    Ok(Json(RouteResponse::new(itinerary)))
}

/// Run CPU-bound work off the async runtime, giving up after `budget`.
async fn run_within_budget<T, F>(budget: Duration, work: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::time::timeout(budget, tokio::task::spawn_blocking(work))
        .await
        .map_err(|_| AppError::Internal {
            error_type: "Timeout".to_string(),
            message: format!("route lookup exceeded {} ms", budget.as_millis()),
        })?
        .map_err(|e| AppError::Internal {
            error_type: "JoinError".to_string(),
            message: e.to_string(),
        })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    InvalidInput { message: String, received: Value },
    NotFound(SelectError),
    Internal { error_type: String, message: String },
}

impl From<SelectError> for AppError {
    fn from(e: SelectError) -> Self {
        AppError::NotFound(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InvalidInput { message, received } => {
                warn!(%message, "rejected route request");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        message,
                        received_data: Some(received),
                        ..Default::default()
                    },
                )
            }
            AppError::NotFound(e) => {
                debug!(error = %e, "no route found");
                let candidate_count = match e {
                    SelectError::NoProcessableCandidates { candidates, .. } => Some(candidates),
                    SelectError::NoSuitableRoute { .. } => None,
                };
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        message: e.to_string(),
                        checked_endpoints: Some(e.checked_endpoints()),
                        candidate_count,
                        ..Default::default()
                    },
                )
            }
            AppError::Internal {
                error_type,
                message,
            } => {
                error!(%error_type, %message, "route lookup failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        message: format!("server error: {message}"),
                        error_type: Some(error_type),
                        ..Default::default()
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RouteCatalog, RouteCatalogBuilder};
    use crate::domain::{Coordinate, Step, StepMode};
    use crate::matcher::MatcherConfig;
    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn origin() -> Coordinate {
        coord(24.80818, 121.0405)
    }

    fn app(catalog: RouteCatalog) -> Router {
        let state = AppState::new(catalog, MatcherConfig::default(), Duration::from_secs(2));
        create_router(state, "static")
    }

    fn sample_catalog() -> RouteCatalog {
        let dest = coord(24.79, 121.01);
        RouteCatalogBuilder::new(origin())
            .route(
                dest,
                vec![
                    Step::located(StepMode::Transit("Bus 182".into()), "HSR", "08:05", origin()),
                    Step::transfer_walk("Zhubei"),
                    Step::located(StepMode::Transit("Bus 182".into()), "Terminus", "08:40", dest),
                ],
            )
            .build()
    }

    async fn post_route(app: Router, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/get_route")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_check() {
        let response = app(sample_catalog())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_lng_is_invalid_input() {
        let (status, body) = post_route(app(sample_catalog()), r#"{"lat": 24.79}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["received_data"], serde_json::json!({"lat": 24.79}));
        assert!(body.get("checked_endpoints").is_none());
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_input() {
        let (status, body) = post_route(app(sample_catalog()), "lat=24.79").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["received_data"], Value::Null);
    }

    #[tokio::test]
    async fn empty_catalog_is_not_found() {
        let (status, body) = post_route(
            app(RouteCatalog::empty(origin())),
            r#"{"lat": 24.79, "lng": 121.01}"#,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "no suitable route");
        assert_eq!(body["checked_endpoints"], 0);
    }

    #[tokio::test]
    async fn finds_route() {
        let (status, body) =
            post_route(app(sample_catalog()), r#"{"lat": "24.7905", "lng": "121.0105"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["total_time"], "35:00");
        assert_eq!(body["arrival_time"], "08:40");
        assert_eq!(
            body["simplified_path"],
            serde_json::json!([
                ["Bus 182", "HSR", "08:05"],
                ["transfer_walk", "Zhubei"],
                ["Bus 182", "Terminus", "08:40"]
            ])
        );
        assert_eq!(body["coordinate_path"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["debug_info"]["trim_reason"], "not trimmed");
    }

    async fn error_body(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn internal_error_is_server_error() {
        let (status, body) = error_body(AppError::Internal {
            error_type: "Timeout".to_string(),
            message: "route lookup exceeded 0 ms".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error_type"], "Timeout");
        assert_eq!(body["message"], "server error: route lookup exceeded 0 ms");
        assert!(body.get("received_data").is_none());
    }

    #[tokio::test]
    async fn unprocessable_candidates_report_counts() {
        let (status, body) = error_body(AppError::from(SelectError::NoProcessableCandidates {
            checked_endpoints: 3,
            candidates: 2,
        }))
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["checked_endpoints"], 3);
        assert_eq!(body["candidate_count"], 2);
        assert!(body.get("error_type").is_none());
    }

    #[tokio::test]
    async fn slow_lookup_times_out() {
        let result = run_within_budget(Duration::from_millis(10), || {
            std::thread::sleep(Duration::from_millis(500));
        })
        .await;

        match result {
            Err(AppError::Internal { error_type, .. }) => assert_eq!(error_type, "Timeout"),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn panicking_lookup_is_join_error() {
        let result: Result<(), AppError> =
            run_within_budget(Duration::from_secs(5), || panic!("lookup failed")).await;

        match result {
            Err(AppError::Internal { error_type, .. }) => assert_eq!(error_type, "JoinError"),
            other => panic!("expected join error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fast_lookup_returns_value() {
        let result = run_within_budget(Duration::from_secs(5), || 42).await;
        assert!(matches!(result, Ok(42)));
    }
}
