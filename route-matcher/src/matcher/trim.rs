//! Trimming a precomputed path to where the traveller effectively arrives.
//!
//! A path runs from the catalog origin to a fixed destination, but the user
//! clicked somewhere near that destination, not on it. Walking the path in
//! order, the first step that is either close to the route's own endpoint or
//! close to the click becomes an Arrival step and everything after it is
//! dropped.

use std::fmt;

use crate::domain::{Coordinate, Step, distance};

use super::config::MatcherConfig;

/// Why a path was (or was not) trimmed.
#[derive(Debug, Clone, PartialEq)]
pub enum TrimReason {
    /// A step before the final one lies within the endpoint radius of the
    /// route's destination.
    NearRouteEndpoint { index: usize, distance_m: f64 },

    /// A step lies within the user radius of the click.
    NearUserClick { index: usize, distance_m: f64 },

    /// No step triggered either rule; the path is unchanged.
    NotTrimmed,
}

impl TrimReason {
    /// Index of the step that became the Arrival, if any.
    pub fn trim_index(&self) -> Option<usize> {
        match self {
            TrimReason::NearRouteEndpoint { index, .. } | TrimReason::NearUserClick { index, .. } => {
                Some(*index)
            }
            TrimReason::NotTrimmed => None,
        }
    }
}

impl fmt::Display for TrimReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrimReason::NearRouteEndpoint { distance_m, .. } => {
                write!(f, "near route endpoint ({distance_m:.2} m, before final stop)")
            }
            TrimReason::NearUserClick { distance_m, .. } => {
                write!(f, "near user click position ({distance_m:.2} m)")
            }
            TrimReason::NotTrimmed => f.write_str("not trimmed"),
        }
    }
}

/// A path after trimming.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimmedPath {
    pub steps: Vec<Step>,
    pub reason: TrimReason,
}

/// Trim `path` for a user at `user` on a route ending at `destination`.
///
/// Only steps that are located and carry a parsable time can end the path.
/// Other steps (walks, steps with a missing or malformed time) are copied
/// through unchanged. For an eligible step the endpoint rule is checked
/// before the user rule, and the endpoint rule never fires on the final
/// step. The first step that fires wins.
///
/// The result is a prefix of `path` whose last element is replaced by an
/// Arrival step when a rule fired; it is never longer than `path`.
pub fn trim_path(
    path: &[Step],
    destination: Coordinate,
    user: Coordinate,
    config: &MatcherConfig,
) -> TrimmedPath {
    let mut steps = Vec::with_capacity(path.len());
    let last = path.len().saturating_sub(1);

    for (index, step) in path.iter().enumerate() {
        if let Some(position) = step.trim_point() {
            let to_endpoint = distance(position, destination);
            if index != last && to_endpoint <= config.endpoint_radius_m {
                steps.push(step.to_arrival());
                return TrimmedPath {
                    steps,
                    reason: TrimReason::NearRouteEndpoint {
                        index,
                        distance_m: to_endpoint,
                    },
                };
            }

            let to_user = distance(position, user);
            if to_user <= config.user_radius_m {
                steps.push(step.to_arrival());
                return TrimmedPath {
                    steps,
                    reason: TrimReason::NearUserClick {
                        index,
                        distance_m: to_user,
                    },
                };
            }
        }

        steps.push(step.clone());
    }

    TrimmedPath {
        steps,
        reason: TrimReason::NotTrimmed,
    }
}
