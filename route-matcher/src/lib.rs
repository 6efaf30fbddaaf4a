//! Route matcher server.
//!
//! A web application that answers: "I clicked here on the map, which of the
//! known routes from the origin gets me there fastest?"

pub mod catalog;
pub mod config;
pub mod domain;
pub mod matcher;
pub mod web;
