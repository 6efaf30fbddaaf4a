//! Route matching.
//!
//! This module answers: "the user clicked here; which precomputed route
//! should they take, and where along it do they get off?"
//!
//! Destinations are ranked by distance from the click ([`rank_endpoints`]),
//! the nearest few paths are trimmed to the point where the traveller
//! effectively arrives ([`trim_path`]) and timed ([`path_duration`]), and
//! [`RouteSelector`] keeps the fastest. [`present`] formats the winner.

mod config;
mod duration;
mod present;
mod rank;
mod select;
mod trim;

pub use config::MatcherConfig;
pub use duration::{DurationError, path_duration};
pub use present::{
    DebugInfo, DetailedStep, Itinerary, SimplifiedStep, format_duration, present, simplify_step,
};
pub use rank::{RankedEndpoint, rank_endpoints};
pub use select::{
    CandidateError, CandidateRoute, CoordinatePoint, ProcessedRoute, RouteSelector, SelectError,
    Selection, TrimReport,
};
pub use trim::{TrimReason, TrimmedPath, trim_path};
