//! Askama templates for the web frontend.

use askama::Template;

/// Map page: click a destination to request a route.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub route_count: usize,
}
