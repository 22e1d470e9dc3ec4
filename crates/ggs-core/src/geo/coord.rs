use serde::{Deserialize, Serialize};

/// Decimal places kept on degree values. Repeated update/compare cycles on a
/// coordinate must not drift, so every mutation rounds to this precision.
pub const COORD_DECIMALS: i32 = 10;

/// Round a value to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// A latitude/longitude pair in a single angular unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

/// A geographic coordinate carrying both its degree and radian form.
///
/// The two representations are always kept in sync: constructors and
/// `update` recompute the radians from the rounded degrees. Out-of-range
/// input is a caller error, not a recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    deg: LatLon,
    rad: LatLon,
}

impl Coord {
    /// Build a coordinate, rounding degrees to [`COORD_DECIMALS`].
    ///
    /// # Panics
    ///
    /// Panics if |latitude| > 90 or |longitude| > 180.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self::rounded(latitude, longitude, COORD_DECIMALS)
    }

    /// Build a coordinate with an explicit rounding precision.
    ///
    /// # Panics
    ///
    /// Panics if |latitude| > 90 or |longitude| > 180.
    pub fn rounded(latitude: f64, longitude: f64, decimals: i32) -> Self {
        let mut coord = Self {
            deg: LatLon { latitude: 0.0, longitude: 0.0 },
            rad: LatLon { latitude: 0.0, longitude: 0.0 },
        };
        coord.set(latitude, longitude, decimals);
        coord
    }

    /// Replace both representations in place.
    ///
    /// Used by the nearest-candidate scan to walk a candidate list without
    /// allocating a fresh coordinate per row.
    pub fn update(&mut self, latitude: f64, longitude: f64) {
        self.set(latitude, longitude, COORD_DECIMALS);
    }

    fn set(&mut self, latitude: f64, longitude: f64, decimals: i32) {
        assert!(
            latitude.abs() <= 90.0,
            "latitude {} out of range [-90, 90]",
            latitude
        );
        assert!(
            longitude.abs() <= 180.0,
            "longitude {} out of range [-180, 180]",
            longitude
        );

        self.deg.latitude = round_to(latitude, decimals);
        self.deg.longitude = round_to(longitude, decimals);
        self.rad.latitude = self.deg.latitude.to_radians();
        self.rad.longitude = self.deg.longitude.to_radians();
    }

    pub fn degrees(&self) -> LatLon {
        self.deg
    }

    pub fn radians(&self) -> LatLon {
        self.rad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_and_radians_stay_in_sync() {
        let mut coord = Coord::new(45.0, 90.0);
        assert_eq!(coord.degrees().latitude, 45.0);
        assert!((coord.radians().latitude - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert!((coord.radians().longitude - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        coord.update(-30.0, 60.0);
        assert_eq!(coord.degrees().latitude, -30.0);
        assert!((coord.radians().latitude - (-30f64).to_radians()).abs() < 1e-12);
        assert!((coord.radians().longitude - 60f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_rounding_on_construction() {
        let coord = Coord::rounded(55.75580000004, 37.61730000006, 10);
        assert_eq!(coord.degrees().latitude, 55.7558);
        assert_eq!(coord.degrees().longitude, 37.6173000001);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(1.235, 2), 1.24);
        assert_eq!(round_to(-1.005, 1), -1.0);
        assert_eq!(round_to(42.0, 0), 42.0);
    }

    #[test]
    #[should_panic(expected = "latitude")]
    fn test_latitude_out_of_range_panics() {
        Coord::new(90.5, 0.0);
    }

    #[test]
    #[should_panic(expected = "longitude")]
    fn test_longitude_out_of_range_panics() {
        Coord::new(0.0, -180.5);
    }
}
