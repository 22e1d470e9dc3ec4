use crate::geo::coord::Coord;

/// Earth's mean radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_300.0;

/// Half the sphere's circumference; no two surface points are farther apart
pub const MAX_SEARCH_LENGTH_M: f64 = EARTH_RADIUS_M * std::f64::consts::PI;

/// A 3D Cartesian projection of a [`Coord`] onto the Earth sphere.
///
/// Derived and cached: recompute with [`Point3::update`] when the underlying
/// coordinate changes. Used only to compute great-circle distances; never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn from_coord(coord: &Coord) -> Self {
        let mut point = Self { x: 0.0, y: 0.0, z: 0.0 };
        point.update(coord);
        point
    }

    /// Recompute the projection for a new coordinate, in place
    pub fn update(&mut self, coord: &Coord) {
        let c = coord.radians();
        self.x = EARTH_RADIUS_M * c.latitude.cos() * c.longitude.cos();
        self.y = EARTH_RADIUS_M * c.latitude.cos() * c.longitude.sin();
        self.z = EARTH_RADIUS_M * c.latitude.sin();
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn dot(&self, other: &Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Straight-line chord distance between two projected points.
    ///
    /// Always a lower bound on the surface distance; use [`arc_length`] where
    /// the exact great-circle distance matters.
    pub fn distance(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Great-circle distance in meters between two projected points.
///
/// `R * acos(a.b / (|a| * |b|))`. The cosine is clamped to [-1, 1] so that
/// float drift on near-identical points cannot produce a NaN.
///
/// # Panics
///
/// Panics if either point has zero norm. A degenerate projection means an
/// invalid coordinate reached this stage, which is a caller error that must
/// not be silently mapped to a zero distance.
pub fn arc_length(a: &Point3, b: &Point3) -> f64 {
    let norm_a = a.norm();
    let norm_b = b.norm();
    assert!(
        norm_a != 0.0 && norm_b != 0.0,
        "degenerate projection with zero norm"
    );
    let cos = (a.dot(b) / (norm_a * norm_b)).clamp(-1.0, 1.0);
    EARTH_RADIUS_M * cos.acos()
}

/// Convert a linear search radius into an angular latitude delta in degrees.
///
/// Small-angle approximation `radius / R`, valid because radius << R.
///
/// # Panics
///
/// Panics if the radius exceeds half the sphere's circumference; such a
/// search is meaningless.
pub fn precision_for_radius(radius_m: f64) -> f64 {
    assert!(
        radius_m <= MAX_SEARCH_LENGTH_M,
        "search radius {} exceeds half circumference {}",
        radius_m,
        MAX_SEARCH_LENGTH_M
    );
    (radius_m / EARTH_RADIUS_M).to_degrees()
}

/// Widen a latitude precision into a longitude precision at a given latitude.
///
/// Meridians converge toward the poles, so a longitude bounding box must
/// widen by `1 / cos(latitude)`. Exactly at the poles every longitude is
/// equidistant and the returned width is 0.
pub fn correct_precision_for_latitude(coord: &Coord, precision_deg: f64) -> f64 {
    if coord.degrees().latitude.abs() >= 90.0 {
        return 0.0;
    }
    precision_deg / coord.radians().latitude.cos()
}

/// The angular window a bounding-box candidate query must cover.
///
/// The latitude band is fixed; the longitude band widens per candidate row by
/// the candidate's own latitude, and at |lat| = 90 any longitude matches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchArea {
    center: Coord,
    precision_deg: f64,
}

impl SearchArea {
    pub fn new(center: Coord, precision_deg: f64) -> Self {
        Self { center, precision_deg }
    }

    /// Build the window for a merge radius in meters around a coordinate
    pub fn around(center: Coord, radius_m: f64) -> Self {
        Self::new(center, precision_for_radius(radius_m))
    }

    pub fn center(&self) -> &Coord {
        &self.center
    }

    /// Inclusive latitude bounds of the window
    pub fn lat_bounds(&self) -> (f64, f64) {
        let lat = self.center.degrees().latitude;
        (lat - self.precision_deg, lat + self.precision_deg)
    }

    /// Whether a stored (latitude, longitude) row falls inside the window
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        let center = self.center.degrees();
        if (center.latitude - latitude).abs() > self.precision_deg {
            return false;
        }
        if latitude.abs() >= 90.0 {
            // All meridians meet at the poles
            return true;
        }
        let lon_precision = self.precision_deg / latitude.to_radians().cos();
        (center.longitude - longitude).abs() <= lon_precision
    }
}
