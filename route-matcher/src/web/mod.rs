//! Web layer for the route matcher.
//!
//! Serves the map page and answers route requests for clicked positions.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
