//! Domain types for the route matcher.
//!
//! This module contains the core domain model: coordinates, wall-clock
//! times, path steps and route records. Types that carry invariants enforce
//! them at construction time, so code that receives them can trust their
//! validity.

mod coordinate;
mod route;
mod step;
mod time;

pub use coordinate::{Coordinate, InvalidCoordinate, ParseCoordinateError, distance};
pub use route::{RouteKey, RouteRecord};
pub use step::{Step, StepMode};
pub use time::{TimeError, WallTime};
