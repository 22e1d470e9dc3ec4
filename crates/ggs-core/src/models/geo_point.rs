use crate::geo::Coord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a deduplicated geo point
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PointId(pub Uuid);

impl PointId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Reference to the administrative subject (region) owning a point
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SubjectId(pub i32);

/// A unique, deduplicated survey-point location.
///
/// Many cards share one point. No two rows may carry the same
/// (latitude, longitude) pair at the stored precision; the store enforces
/// that invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub id: PointId,
    pub latitude: f64,
    pub longitude: f64,
    pub subject: SubjectId,
}

impl GeoPoint {
    pub fn coord(&self) -> Coord {
        Coord::new(self.latitude, self.longitude)
    }
}

/// A point the resolver decided to create; the store assigns nothing, the
/// coordinates arrive already rounded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub subject: SubjectId,
}
