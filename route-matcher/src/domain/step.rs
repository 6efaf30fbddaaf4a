//! Steps of a precomputed route path.

use std::fmt;

use super::{Coordinate, WallTime};

/// What the traveller is doing at a step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepMode {
    /// Riding a transit line. The label names the line or vehicle.
    Transit(String),
    /// Walking, typically to or from the first/last stop.
    Walk,
    /// Walking between two stops to change lines.
    TransferWalk,
    /// Final step of a path.
    Arrival,
}

impl StepMode {
    /// Interpret a catalog mode label.
    ///
    /// English labels are matched case-insensitively. The labels used by the
    /// original route store are also recognised. Anything else is taken to be
    /// the name of a transit line.
    ///
    /// ```
    /// use route_matcher::domain::StepMode;
    ///
    /// assert_eq!(StepMode::from_label("walk"), StepMode::Walk);
    /// assert_eq!(StepMode::from_label("步行轉乘"), StepMode::TransferWalk);
    /// assert_eq!(
    ///     StepMode::from_label("Bus 182"),
    ///     StepMode::Transit("Bus 182".to_string())
    /// );
    /// ```
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case("walk") || trimmed == "走路" {
            StepMode::Walk
        } else if trimmed.eq_ignore_ascii_case("transfer_walk") || trimmed == "步行轉乘" {
            StepMode::TransferWalk
        } else if trimmed.eq_ignore_ascii_case("arrival") || trimmed == "抵達" {
            StepMode::Arrival
        } else {
            StepMode::Transit(label.to_string())
        }
    }

    /// The label used on the wire.
    pub fn label(&self) -> &str {
        match self {
            StepMode::Transit(line) => line,
            StepMode::Walk => "walk",
            StepMode::TransferWalk => "transfer_walk",
            StepMode::Arrival => "arrival",
        }
    }

    /// True for Walk, TransferWalk and Arrival, whose summaries omit the time.
    pub fn is_untimed_summary(&self) -> bool {
        !matches!(self, StepMode::Transit(_))
    }
}

impl fmt::Display for StepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One waypoint or action along a path.
///
/// Fields are positional in the catalog (`[mode, stop, time, [lat, lng]]`),
/// so a later field is only meaningful when the earlier ones exist. A step is
/// *located* when it carries a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub mode: StepMode,
    pub stop_name: Option<String>,
    /// Raw time text. May be unparsable; see [`Step::parsed_time`].
    pub time: Option<String>,
    pub coordinate: Option<Coordinate>,
}

impl Step {
    /// A walking step with no time or position.
    pub fn walk(stop_name: impl Into<String>) -> Self {
        Self {
            mode: StepMode::Walk,
            stop_name: Some(stop_name.into()),
            time: None,
            coordinate: None,
        }
    }

    /// A transfer walk with no time or position.
    pub fn transfer_walk(stop_name: impl Into<String>) -> Self {
        Self {
            mode: StepMode::TransferWalk,
            ..Self::walk(stop_name)
        }
    }

    /// A timed step without a position.
    pub fn timed(mode: StepMode, stop_name: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            mode,
            stop_name: Some(stop_name.into()),
            time: Some(time.into()),
            coordinate: None,
        }
    }

    /// A timed step at a known position.
    pub fn located(
        mode: StepMode,
        stop_name: impl Into<String>,
        time: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            coordinate: Some(coordinate),
            ..Self::timed(mode, stop_name, time)
        }
    }

    /// Number of positional fields this step carries (1 to 4).
    pub fn field_count(&self) -> usize {
        if self.coordinate.is_some() {
            4
        } else if self.time.is_some() {
            3
        } else if self.stop_name.is_some() {
            2
        } else {
            1
        }
    }

    /// The step time, if present and in "HH:MM" form.
    pub fn parsed_time(&self) -> Option<WallTime> {
        self.time
            .as_deref()
            .and_then(|t| WallTime::parse_hhmm(t).ok())
    }

    /// True if the step has a time string that does not parse.
    pub fn has_unparsable_time(&self) -> bool {
        self.time.is_some() && self.parsed_time().is_none()
    }

    /// True if the step carries a coordinate.
    pub fn is_located(&self) -> bool {
        self.coordinate.is_some()
    }

    /// The coordinate of a step that can end a path: located and timed.
    pub fn trim_point(&self) -> Option<Coordinate> {
        self.parsed_time().and(self.coordinate)
    }

    /// An Arrival step at the same stop, time and position.
    pub fn to_arrival(&self) -> Self {
        Self {
            mode: StepMode::Arrival,
            ..self.clone()
        }
    }
}
