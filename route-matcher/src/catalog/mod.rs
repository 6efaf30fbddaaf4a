//! The route catalog.
//!
//! The catalog holds every precomputed route from one fixed origin. It is
//! loaded once at startup (see [`load_catalog`]) and is read-only afterwards:
//! the only way to build one is through [`RouteCatalogBuilder`].

mod error;
mod load;

use std::collections::HashMap;

use crate::domain::{Coordinate, RouteKey, RouteRecord, Step};

pub use error::CatalogError;
pub use load::{load_catalog, parse_catalog};

/// Immutable set of precomputed routes sharing one origin.
///
/// Records keep their load order, which decides ranking ties.
#[derive(Debug, Clone)]
pub struct RouteCatalog {
    origin: Coordinate,
    records: Vec<RouteRecord>,
    index: HashMap<RouteKey, usize>,
}

impl RouteCatalog {
    /// An empty catalog for `origin`.
    pub fn empty(origin: Coordinate) -> Self {
        Self {
            origin,
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The shared departure point of every route.
    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    /// All records, in load order.
    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    /// Look up a record by key.
    pub fn get(&self, key: &RouteKey) -> Option<&RouteRecord> {
        self.index.get(key).map(|&idx| &self.records[idx])
    }

    /// Returns the number of routes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the catalog has no routes.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Builder for a [`RouteCatalog`].
///
/// ```
/// use route_matcher::catalog::RouteCatalogBuilder;
/// use route_matcher::domain::{Coordinate, Step};
///
/// let origin = Coordinate::new(24.80818, 121.0405).unwrap();
/// let catalog = RouteCatalogBuilder::new(origin)
///     .route(Coordinate::new(24.79, 121.01).unwrap(), vec![Step::walk("Gate")])
///     .build();
/// assert_eq!(catalog.len(), 1);
/// ```
#[derive(Debug)]
pub struct RouteCatalogBuilder {
    inner: RouteCatalog,
}

impl RouteCatalogBuilder {
    /// Start a catalog for routes leaving `origin`.
    pub fn new(origin: Coordinate) -> Self {
        Self {
            inner: RouteCatalog::empty(origin),
        }
    }

    /// Add the route to `destination`.
    ///
    /// A route with the same key replaces the earlier one in place, keeping
    /// the earlier position in load order.
    pub fn route(mut self, destination: Coordinate, path: Vec<Step>) -> Self {
        self.insert(destination, path);
        self
    }

    /// Non-consuming form of [`route`](Self::route). Returns true if an
    /// existing route was replaced.
    pub fn insert(&mut self, destination: Coordinate, path: Vec<Step>) -> bool {
        let record = RouteRecord::new(self.inner.origin, destination, path);
        match self.inner.index.get(&record.key) {
            Some(&idx) => {
                self.inner.records[idx] = record;
                true
            }
            None => {
                self.inner
                    .index
                    .insert(record.key.clone(), self.inner.records.len());
                self.inner.records.push(record);
                false
            }
        }
    }

    /// Finish building.
    pub fn build(self) -> RouteCatalog {
        self.inner
    }
}
