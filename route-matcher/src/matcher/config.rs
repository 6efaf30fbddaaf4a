//! Matching configuration.

/// Thresholds and limits for route matching.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Maximum number of nearest destinations examined per request.
    pub max_candidates: usize,

    /// A located step this close to the route's destination (metres) ends
    /// the path, unless it is already the last step.
    pub endpoint_radius_m: f64,

    /// A located step this close to the user's click (metres) ends the path.
    pub user_radius_m: f64,
}

impl MatcherConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_candidates: usize, endpoint_radius_m: f64, user_radius_m: f64) -> Self {
        Self {
            max_candidates,
            endpoint_radius_m,
            user_radius_m,
        }
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_candidates: 3,
            endpoint_radius_m: 200.0,
            user_radius_m: 50.0,
        }
    }
}
