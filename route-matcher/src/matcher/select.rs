//! Choosing the best route for a user's click.
//!
//! The selector ranks every destination in the catalog by distance from the
//! user, takes the nearest few that have a path, trims and times each one,
//! and keeps the fastest. A candidate that cannot be timed is logged and
//! dropped without affecting the others.

use chrono::Duration;
use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::RouteCatalog;
use crate::domain::{Coordinate, RouteKey, RouteRecord, Step};

use super::config::MatcherConfig;
use super::duration::{DurationError, path_duration};
use super::rank::rank_endpoints;
use super::trim::{TrimReason, trim_path};

/// Error from route selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// None of the nearest destinations has a usable path
    #[error("no suitable route")]
    NoSuitableRoute { checked_endpoints: usize },

    /// Every candidate failed trimming or timing
    #[error("no candidate could be processed")]
    NoProcessableCandidates {
        checked_endpoints: usize,
        candidates: usize,
    },
}

impl SelectError {
    /// Number of destinations examined before giving up.
    pub fn checked_endpoints(&self) -> usize {
        match self {
            SelectError::NoSuitableRoute { checked_endpoints }
            | SelectError::NoProcessableCandidates {
                checked_endpoints, ..
            } => *checked_endpoints,
        }
    }
}

/// Why a single candidate was dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("route {route_key}: {source}")]
pub struct CandidateError {
    pub route_key: RouteKey,
    #[source]
    pub source: DurationError,
}

/// A route under consideration, before trimming.
#[derive(Debug, Clone)]
pub struct CandidateRoute<'a> {
    /// Position in the nearest-first ranking.
    pub rank: usize,
    pub record: &'a RouteRecord,
    /// Distance from the user to the route's destination, in metres.
    pub distance_m: f64,
}

/// One located step, flattened for map display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinatePoint {
    pub stop: Option<String>,
    pub mode: String,
    pub time: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

impl CoordinatePoint {
    /// Flatten the located steps of `path`, in order.
    pub fn from_path(path: &[Step]) -> Vec<Self> {
        path.iter()
            .filter_map(|step| {
                let at = step.coordinate?;
                Some(Self {
                    stop: step.stop_name.clone(),
                    mode: step.mode.label().to_string(),
                    time: step.time.clone(),
                    lat: at.lat(),
                    lng: at.lng(),
                })
            })
            .collect()
    }
}

/// How trimming went for a processed route.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimReport {
    pub original_len: usize,
    pub trimmed_len: usize,
    pub reason: TrimReason,
    /// Distance from the user to the route's destination, in metres.
    pub distance_to_user_m: f64,
}

/// A candidate after trimming and timing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedRoute {
    pub route_key: RouteKey,
    pub rank: usize,
    pub path: Vec<Step>,
    pub total: Duration,
    pub coordinates: Vec<CoordinatePoint>,
    pub report: TrimReport,
}

/// The winning route plus counters describing the search.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub best: ProcessedRoute,
    pub checked_endpoints: usize,
    pub candidate_count: usize,
    pub processed_count: usize,
}

/// Picks the fastest precomputed route ending near a user's click.
pub struct RouteSelector<'a> {
    catalog: &'a RouteCatalog,
    config: &'a MatcherConfig,
}

impl<'a> RouteSelector<'a> {
    /// Create a new selector over `catalog`.
    pub fn new(catalog: &'a RouteCatalog, config: &'a MatcherConfig) -> Self {
        Self { catalog, config }
    }

    /// Select the best route for a user at `user`.
    pub fn select(&self, user: Coordinate) -> Result<Selection, SelectError> {
        let (candidates, checked_endpoints) = self.candidates(user);
        if candidates.is_empty() {
            return Err(SelectError::NoSuitableRoute { checked_endpoints });
        }

        let candidate_count = candidates.len();
        let processed: Vec<ProcessedRoute> = candidates
            .iter()
            .filter_map(|candidate| match self.process(candidate, user) {
                Ok(route) => Some(route),
                Err(e) => {
                    warn!(error = %e, "dropping candidate route");
                    None
                }
            })
            .collect();

        let processed_count = processed.len();
        // min_by_key keeps the first of equal minima, i.e. the nearer route
        let best = processed
            .into_iter()
            .min_by_key(|route| route.total)
            .ok_or(SelectError::NoProcessableCandidates {
                checked_endpoints,
                candidates: candidate_count,
            })?;

        debug!(
            route = %best.route_key,
            total_secs = best.total.num_seconds(),
            reason = %best.report.reason,
            "selected route"
        );

        Ok(Selection {
            best,
            checked_endpoints,
            candidate_count,
            processed_count,
        })
    }

    /// The nearest destinations that have a usable path, and how many
    /// destinations were examined to find them.
    pub fn candidates(&self, user: Coordinate) -> (Vec<CandidateRoute<'a>>, usize) {
        let ranked = rank_endpoints(user, self.catalog.records());

        let mut checked = 0;
        let mut candidates = Vec::new();
        for endpoint in ranked.into_iter().take(self.config.max_candidates) {
            checked += 1;
            let record = endpoint.record;
            if !record.is_usable() {
                debug!(route = %record.key, "skipping route without a path");
                continue;
            }
            debug!(
                route = %record.key,
                distance_m = endpoint.distance_m,
                "found candidate route"
            );
            candidates.push(CandidateRoute {
                rank: candidates.len(),
                record,
                distance_m: endpoint.distance_m,
            });
        }

        (candidates, checked)
    }

    /// Trim and time one candidate.
    pub fn process(
        &self,
        candidate: &CandidateRoute<'_>,
        user: Coordinate,
    ) -> Result<ProcessedRoute, CandidateError> {
        let record = candidate.record;
        let trimmed = trim_path(&record.path, record.destination, user, self.config);
        let total = path_duration(&trimmed.steps).map_err(|source| CandidateError {
            route_key: record.key.clone(),
            source,
        })?;

        Ok(ProcessedRoute {
            route_key: record.key.clone(),
            rank: candidate.rank,
            coordinates: CoordinatePoint::from_path(&trimmed.steps),
            report: TrimReport {
                original_len: record.path.len(),
                trimmed_len: trimmed.steps.len(),
                reason: trimmed.reason,
                distance_to_user_m: candidate.distance_m,
            },
            path: trimmed.steps,
            total,
        })
    }
}

#[cfg(test)]
#[path = "select_tests.rs"]
mod tests;
