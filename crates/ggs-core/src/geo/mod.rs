//! Spherical geometry for geo-point matching
//!
//! Raw latitude/longitude differences are not metrically comparable (a degree
//! of longitude shrinks toward the poles), so point deduplication needs exact
//! great-circle distances. An exact-distance scan over the whole dataset is
//! too costly, hence the angular-precision conversions here that bound a
//! cheap axis-aligned pre-filter before the exact check.

pub mod coord;
pub mod sphere;

pub use coord::{round_to, Coord, LatLon, COORD_DECIMALS};
pub use sphere::{
    arc_length, correct_precision_for_latitude, precision_for_radius, Point3, SearchArea,
    EARTH_RADIUS_M, MAX_SEARCH_LENGTH_M,
};
