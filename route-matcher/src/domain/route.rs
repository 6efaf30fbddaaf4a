//! Precomputed route records.

use std::fmt;

use super::{Coordinate, Step};

/// Composite identifier of a route: `"origin→destination"`.
///
/// Whole-degree values keep a trailing `.0`, so keys written by other tools
/// for the same catalog match.
///
/// ```
/// use route_matcher::domain::{Coordinate, RouteKey};
///
/// let origin = Coordinate::new(24.80818, 121.0405).unwrap();
/// let dest = Coordinate::new(24.79, 121.01).unwrap();
/// assert_eq!(
///     RouteKey::new(origin, dest).as_str(),
///     "24.80818,121.0405→24.79,121.01"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey(String);

impl RouteKey {
    /// Build the key for the route from `origin` to `destination`.
    pub fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self(format!(
            "{},{}→{},{}",
            key_number(origin.lat()),
            key_number(origin.lng()),
            key_number(destination.lat()),
            key_number(destination.lng()),
        ))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn key_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A precomputed path from the catalog origin to one destination.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub key: RouteKey,
    pub destination: Coordinate,
    /// Steps in travel order.
    pub path: Vec<Step>,
}

impl RouteRecord {
    /// Create a record keyed from `origin` to `destination`.
    pub fn new(origin: Coordinate, destination: Coordinate, path: Vec<Step>) -> Self {
        Self {
            key: RouteKey::new(origin, destination),
            destination,
            path,
        }
    }

    /// A record can only become a candidate if it has at least one step.
    pub fn is_usable(&self) -> bool {
        !self.path.is_empty()
    }
}
