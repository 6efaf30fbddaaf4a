//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::RouteCatalog;
use crate::matcher::MatcherConfig;

/// Shared application state.
///
/// The catalog is read-only after startup, so handlers share it without
/// locking.
#[derive(Clone)]
pub struct AppState {
    /// Routes from the shared origin
    pub catalog: Arc<RouteCatalog>,

    /// Matching thresholds
    pub matcher: Arc<MatcherConfig>,

    /// Upper bound on one route lookup
    pub request_budget: Duration,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: RouteCatalog, matcher: MatcherConfig, request_budget: Duration) -> Self {
        Self {
            catalog: Arc::new(catalog),
            matcher: Arc::new(matcher),
            request_budget,
        }
    }
}
