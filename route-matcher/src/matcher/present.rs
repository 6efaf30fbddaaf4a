//! Formatting a selected route for display.

use chrono::Duration;
use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};

use crate::domain::Step;

use super::select::{CoordinatePoint, Selection};

/// A route ready to send to the client.
#[derive(Debug, Clone, Serialize)]
pub struct Itinerary {
    /// Total travel time, e.g. "35:00" or "1:05:00".
    pub total_time: String,

    /// Time at the final step, if it has one.
    pub arrival_time: Option<String>,

    /// One short entry per step.
    pub simplified_path: Vec<SimplifiedStep>,

    /// Every trimmed step in catalog form.
    pub detailed_path: Vec<DetailedStep>,

    /// Located steps, for drawing on a map.
    pub coordinate_path: Vec<CoordinatePoint>,

    pub debug_info: DebugInfo,
}

/// A step reduced to what the itinerary list shows.
///
/// Serialises as a JSON array: `[mode, stop]` or `[mode, stop, time]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SimplifiedStep {
    Brief(String, Option<String>),
    Timed(String, Option<String>, Option<String>),
}

/// A step in catalog form: `[mode, stop, time, [lat, lng]]`, with as many
/// elements as the step has fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedStep(pub Step);

impl Serialize for DetailedStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let step = &self.0;
        let len = step.field_count();
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(step.mode.label())?;
        if len >= 2 {
            seq.serialize_element(&step.stop_name)?;
        }
        if len >= 3 {
            seq.serialize_element(&step.time)?;
        }
        if let Some(at) = step.coordinate {
            seq.serialize_element(&[at.lat(), at.lng()])?;
        }
        seq.end()
    }
}

/// Diagnostics describing how the route was chosen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugInfo {
    pub checked_endpoints: usize,
    pub candidate_count: usize,
    pub processed_count: usize,
    pub selected_route_key: String,
    pub total_seconds: i64,
    pub original_path_len: usize,
    pub trimmed_path_len: usize,
    pub trim_reason: String,
    pub distance_to_user_m: f64,
}

/// Build the client-facing itinerary for a selection.
pub fn present(selection: &Selection) -> Itinerary {
    let best = &selection.best;
    let report = &best.report;

    Itinerary {
        total_time: format_duration(best.total),
        arrival_time: best.path.last().and_then(|step| step.time.clone()),
        simplified_path: best.path.iter().filter_map(simplify_step).collect(),
        detailed_path: best.path.iter().cloned().map(DetailedStep).collect(),
        coordinate_path: best.coordinates.clone(),
        debug_info: DebugInfo {
            checked_endpoints: selection.checked_endpoints,
            candidate_count: selection.candidate_count,
            processed_count: selection.processed_count,
            selected_route_key: best.route_key.to_string(),
            total_seconds: best.total.num_seconds(),
            original_path_len: report.original_len,
            trimmed_path_len: report.trimmed_len,
            trim_reason: report.reason.to_string(),
            distance_to_user_m: report.distance_to_user_m,
        },
    }
}

/// Reduce a step for the itinerary list.
///
/// Walks, transfer walks and arrivals keep mode and stop. Transit steps keep
/// mode, stop and time, and are dropped if they have no time field. Steps
/// without a stop are dropped.
pub fn simplify_step(step: &Step) -> Option<SimplifiedStep> {
    let fields = step.field_count();
    if fields < 2 {
        return None;
    }

    let mode = step.mode.label().to_string();
    if step.mode.is_untimed_summary() {
        Some(SimplifiedStep::Brief(mode, step.stop_name.clone()))
    } else if fields >= 3 {
        Some(SimplifiedStep::Timed(
            mode,
            step.stop_name.clone(),
            step.time.clone(),
        ))
    } else {
        None
    }
}

/// Render a duration as `H:MM:SS`, dropping a leading `"0:"`.
///
/// Negative durations are shown with a signed day count and a positive time
/// of day, e.g. `-1 day, 23:50:00` for minus ten minutes.
///
/// ```
/// use chrono::Duration;
/// use route_matcher::matcher::format_duration;
///
/// assert_eq!(format_duration(Duration::minutes(35)), "35:00");
/// assert_eq!(format_duration(Duration::minutes(65)), "1:05:00");
/// assert_eq!(format_duration(Duration::minutes(-10)), "-1 day, 23:50:00");
/// ```
pub fn format_duration(duration: Duration) -> String {
    const DAY: i64 = 24 * 60 * 60;

    let total = duration.num_seconds();
    let days = total.div_euclid(DAY);
    let rem = total.rem_euclid(DAY);
    let clock = format!("{}:{:02}:{:02}", rem / 3600, (rem % 3600) / 60, rem % 60);

    let text = match days {
        0 => clock,
        1 | -1 => format!("{days} day, {clock}"),
        _ => format!("{days} days, {clock}"),
    };

    match text.strip_prefix("0:") {
        Some(rest) => rest.to_string(),
        None => text,
    }
}
