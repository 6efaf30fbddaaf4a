//! Elapsed time along a path.

use chrono::Duration;

use crate::domain::Step;

/// Error from scoring a path's duration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    /// Nothing to measure
    #[error("path is empty")]
    EmptyPath,

    /// Fewer than two steps carry a time, so there is nothing to span
    #[error("path has {0} timed step(s), at least 2 are needed")]
    TooFewSteps(usize),

    /// A boundary step has a time that is not `HH:MM`
    #[error("step {index} has no HH:MM time (found {value:?})")]
    UnparsableTime { index: usize, value: Option<String> },
}

/// Time from the first timed step to the last timed step of `path`.
///
/// Steps without a time field, such as a leading walk, do not bound the
/// path. A boundary step whose time is present but unparsable is an error.
/// Both times are read on the same day, so a path that crosses midnight
/// comes out negative. That is left to the caller to interpret.
pub fn path_duration(path: &[Step]) -> Result<Duration, DurationError> {
    if path.is_empty() {
        return Err(DurationError::EmptyPath);
    }

    let mut timed = path
        .iter()
        .enumerate()
        .filter(|(_, step)| step.time.is_some());
    let ((first_idx, first), (last_idx, last)) = match (timed.next(), timed.next_back()) {
        (Some(first), Some(last)) => (first, last),
        (Some(_), None) => return Err(DurationError::TooFewSteps(1)),
        _ => return Err(DurationError::TooFewSteps(0)),
    };

    let time_at = |index: usize, step: &Step| {
        step.parsed_time()
            .ok_or_else(|| DurationError::UnparsableTime {
                index,
                value: step.time.clone(),
            })
    };

    let start = time_at(first_idx, first)?;
    let end = time_at(last_idx, last)?;
    Ok(end.signed_duration_since(start))
}
