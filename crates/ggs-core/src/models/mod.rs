//! Domain models for GGS inspection records

pub mod card;
pub mod geo_point;
pub mod sign;
pub mod vocab;

pub use card::{
    Card, CardId, CardSnapshot, CardStatus, Contact, CoordinateView, PropertyView, Verdict,
};
pub use geo_point::{GeoPoint, NewGeoPoint, PointId, SubjectId};
pub use sign::{Material, PillarMaterial, Sign, SignGeometry, SignType, SignalKind};
pub use vocab::{Covering, Detected, Possible, Property, Reading, Saving, Vocabulary};
