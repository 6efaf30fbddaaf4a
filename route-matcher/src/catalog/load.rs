//! Loading the catalog from a JSON export of the route store.
//!
//! The file holds either one document or an array of documents. Each
//! document maps an arbitrary key to a route entry:
//!
//! ```json
//! {
//!   "_id": {"$oid": "..."},
//!   "route-17": {
//!     "destination": [24.79, 121.01],
//!     "path": [
//!       ["walk", "Hsinchu HSR Station"],
//!       ["Bus 182", "HSR Station", "08:05", [24.8082, 121.0405]],
//!       ["arrival", "Final Stop", "08:40", [24.79, 121.01]]
//!     ]
//!   }
//! }
//! ```
//!
//! Entries that are not route objects are ignored. Malformed routes and
//! steps are logged and skipped; they never fail the whole load.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::{CatalogError, RouteCatalog, RouteCatalogBuilder};
use crate::domain::{Coordinate, Step, StepMode};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Many(Vec<Map<String, Value>>),
    One(Map<String, Value>),
}

/// A route entry. The store's Chinese field names are accepted too; when both
/// spellings are present the English one wins.
#[derive(Debug, Deserialize)]
struct RawRoute {
    #[serde(default)]
    destination: Option<[f64; 2]>,

    #[serde(default, rename = "目的地座標")]
    destination_zh: Option<[f64; 2]>,

    #[serde(default)]
    path: Option<Vec<Value>>,

    #[serde(default, rename = "路徑")]
    path_zh: Option<Vec<Value>>,
}

/// Why a single step was skipped.
#[derive(Debug, thiserror::Error)]
enum StepError {
    #[error("step is not an array")]
    NotAnArray,

    #[error("step has no mode label")]
    MissingMode,
}

/// Read and parse the catalog file at `path`.
pub fn load_catalog(path: &Path, origin: Coordinate) -> Result<RouteCatalog, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&contents, origin)?;
    info!(
        path = %path.display(),
        routes = catalog.len(),
        "loaded route catalog"
    );
    Ok(catalog)
}

/// Parse a catalog from JSON text.
pub fn parse_catalog(json: &str, origin: Coordinate) -> Result<RouteCatalog, CatalogError> {
    let documents = match serde_json::from_str::<CatalogFile>(json)? {
        CatalogFile::Many(docs) => docs,
        CatalogFile::One(doc) => vec![doc],
    };

    let mut builder = RouteCatalogBuilder::new(origin);
    for (name, value) in documents.iter().flat_map(|doc| doc.iter()) {
        if let Some((destination, path)) = parse_route(name, value)
            && builder.insert(destination, path)
        {
            debug!(entry = %name, "route replaced an earlier entry with the same key");
        }
    }

    Ok(builder.build())
}

/// Convert one document entry into a destination and its path.
fn parse_route(name: &str, value: &Value) -> Option<(Coordinate, Vec<Step>)> {
    if !value.is_object() {
        debug!(entry = %name, "skipping non-route entry");
        return None;
    }

    let raw = match RawRoute::deserialize(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(entry = %name, error = %e, "skipping malformed route");
            return None;
        }
    };

    let [lat, lng] = raw.destination.or(raw.destination_zh)?;
    let destination = match Coordinate::new(lat, lng) {
        Ok(c) => c,
        Err(e) => {
            warn!(entry = %name, error = %e, "skipping route with invalid destination");
            return None;
        }
    };

    let path = raw
        .path
        .or(raw.path_zh)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .filter_map(|(idx, raw_step)| match parse_step(raw_step) {
            Ok(step) => Some(step),
            Err(e) => {
                warn!(entry = %name, step = idx, error = %e, "skipping malformed step");
                None
            }
        })
        .collect();

    Some((destination, path))
}

/// Convert a positional `[mode, stop, time, [lat, lng]]` array into a step.
fn parse_step(raw: &Value) -> Result<Step, StepError> {
    let fields = raw.as_array().ok_or(StepError::NotAnArray)?;
    let mode = fields
        .first()
        .and_then(Value::as_str)
        .ok_or(StepError::MissingMode)?;

    Ok(Step {
        mode: StepMode::from_label(mode),
        stop_name: fields.get(1).and_then(text),
        time: fields.get(2).and_then(text),
        coordinate: fields.get(3).and_then(coordinate),
    })
}

/// Field text: strings as-is, null as absent, anything else in JSON form.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn coordinate(value: &Value) -> Option<Coordinate> {
    let pair = value.as_array()?;
    let [lat, lng] = pair.as_slice() else {
        return None;
    };
    Coordinate::new(lat.as_f64()?, lng.as_f64()?).ok()
}
