//! GGS Core - domain models, spherical geometry, and point resolution
//!
//! This crate contains the core domain logic for the GGS records backend:
//! coordinate/sphere math, proximity-aware geo-point deduplication, the
//! inspection-card model with its closed vocabularies, and the ports the
//! persistence and notification collaborators implement.

pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod notify;
pub mod ports;
pub mod resolver;

pub use error::{GgsError, Result};
