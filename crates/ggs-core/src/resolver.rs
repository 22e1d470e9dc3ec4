//! Proximity-aware geo-point resolution.
//!
//! Given a newly reported reading, decide whether it refers to an
//! already-known point within the merge radius or must become a new row.
//! A bounding-box pre-filter (owned by the store) narrows the candidates,
//! then an exact great-circle scan picks the nearest with a deterministic
//! tie-break.

use crate::config::GeoConfig;
use crate::error::{GgsError, Result};
use crate::geo::{arc_length, round_to, Coord, Point3, SearchArea};
use crate::models::{GeoPoint, NewGeoPoint, PointId, SubjectId};
use crate::ports::GeoPointStore;

/// Outcome of a resolve-or-create decision
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// An existing point within the merge radius was reused. Its stored
    /// subject association is left untouched.
    Existing(GeoPoint),
    /// No candidate qualified; a fresh row was persisted
    Created(GeoPoint),
}

impl Resolution {
    pub fn point(&self) -> &GeoPoint {
        match self {
            Self::Existing(point) | Self::Created(point) => point,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Find the candidate nearest to the probe coordinate.
///
/// Distances are rounded to `distance_decimals` before comparison; a strict
/// minimum always wins. On a tie the candidate matching the optional
/// `preferred` id wins, otherwise the first-encountered minimum is kept, so
/// the result is deterministic for a stable input order. The id-preference
/// rule is optional documented behavior; `None` gives the safe default.
pub fn nearest_candidate<'a>(
    probe: &Coord,
    candidates: &'a [GeoPoint],
    preferred: Option<PointId>,
    distance_decimals: i32,
) -> Option<&'a GeoPoint> {
    let center = Point3::from_coord(probe);

    // One scratch coordinate/projection pair reused across the scan
    let mut scratch_coord = Coord::new(0.0, 0.0);
    let mut scratch_point = Point3::from_coord(&scratch_coord);

    let mut best: Option<(&GeoPoint, f64)> = None;
    for candidate in candidates {
        scratch_coord.update(candidate.latitude, candidate.longitude);
        scratch_point.update(&scratch_coord);
        let distance = round_to(arc_length(&center, &scratch_point), distance_decimals);

        match best {
            None => best = Some((candidate, distance)),
            Some((_, best_distance)) if distance < best_distance => {
                best = Some((candidate, distance));
            }
            Some((_, best_distance)) if distance == best_distance => {
                if preferred.is_some_and(|id| id == candidate.id) {
                    best = Some((candidate, distance));
                }
            }
            Some(_) => {}
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Decides reuse-or-create for incoming readings against a point store
pub struct PointResolver<'a, S: GeoPointStore + ?Sized> {
    store: &'a S,
    config: &'a GeoConfig,
}

impl<'a, S: GeoPointStore + ?Sized> PointResolver<'a, S> {
    pub fn new(store: &'a S, config: &'a GeoConfig) -> Self {
        Self { store, config }
    }

    /// Resolve a reading to an existing point or create a new one.
    ///
    /// Coordinates must already be range-validated upstream; out-of-range
    /// values panic. If the create loses a uniqueness race to a concurrent
    /// submission, the winner's row is fetched and reused instead of
    /// surfacing the conflict.
    pub async fn resolve_or_create(
        &self,
        latitude: f64,
        longitude: f64,
        subject: SubjectId,
        preferred: Option<PointId>,
    ) -> Result<Resolution> {
        let coord = Coord::rounded(latitude, longitude, self.config.coordinate_decimals.value);
        let area = SearchArea::around(coord, self.config.merge_radius_m.value);

        if let Some(existing) = self.find_nearest(&coord, &area, preferred).await? {
            return Ok(Resolution::Existing(existing));
        }

        let degrees = coord.degrees();
        let new = NewGeoPoint {
            latitude: degrees.latitude,
            longitude: degrees.longitude,
            subject,
        };
        match self.store.create_point(&new).await {
            Ok(point) => {
                tracing::debug!(point = %point.id.0, "created new geo point");
                Ok(Resolution::Created(point))
            }
            Err(GgsError::DuplicateCoordinates { .. }) => {
                // Lost the race: a concurrent submission persisted the same
                // rounded coordinates first. Its row is inside the window
                // now, so re-resolve against it.
                tracing::debug!("create lost uniqueness race, re-resolving");
                let winner = self.find_nearest(&coord, &area, preferred).await?.ok_or(
                    GgsError::DuplicateCoordinates {
                        latitude: degrees.latitude,
                        longitude: degrees.longitude,
                    },
                )?;
                Ok(Resolution::Existing(winner))
            }
            Err(err) => Err(err),
        }
    }

    async fn find_nearest(
        &self,
        coord: &Coord,
        area: &SearchArea,
        preferred: Option<PointId>,
    ) -> Result<Option<GeoPoint>> {
        let candidates = self.store.fetch_candidates(area).await?;
        tracing::debug!(candidates = candidates.len(), "bounding-box pre-filter");
        Ok(nearest_candidate(
            coord,
            &candidates,
            preferred,
            self.config.distance_decimals.value,
        )
        .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn point(id: u128, latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint {
            id: PointId(Uuid::from_u128(id)),
            latitude,
            longitude,
            subject: SubjectId(25),
        }
    }

    #[test]
    fn test_nearest_picks_closest() {
        let probe = Coord::new(55.7558, 37.6173);
        let candidates = vec![
            point(1, 55.7560, 37.6173),
            point(2, 55.7558, 37.6174), // ~6m east, closest
            point(3, 55.7555, 37.6170),
        ];
        let nearest = nearest_candidate(&probe, &candidates, None, 2).unwrap();
        assert_eq!(nearest.id, PointId(Uuid::from_u128(2)));
    }

    #[test]
    fn test_empty_candidate_set_yields_none() {
        let probe = Coord::new(55.7558, 37.6173);
        assert!(nearest_candidate(&probe, &[], None, 2).is_none());
    }

    #[test]
    fn test_tie_break_keeps_first_encountered() {
        let probe = Coord::new(55.7558, 37.6173);
        // Symmetric offsets east and west: identical distances after rounding
        let candidates =
            vec![point(1, 55.7558, 37.6174), point(2, 55.7558, 37.6172)];
        for _ in 0..10 {
            let nearest = nearest_candidate(&probe, &candidates, None, 2).unwrap();
            assert_eq!(
                nearest.id,
                PointId(Uuid::from_u128(1)),
                "stable input order must give a stable winner"
            );
        }
    }

    #[test]
    fn test_tie_break_honors_preferred_id() {
        let probe = Coord::new(55.7558, 37.6173);
        let candidates =
            vec![point(1, 55.7558, 37.6174), point(2, 55.7558, 37.6172)];
        let preferred = PointId(Uuid::from_u128(2));
        let nearest = nearest_candidate(&probe, &candidates, Some(preferred), 2).unwrap();
        assert_eq!(nearest.id, preferred);
    }

    #[test]
    fn test_preferred_id_does_not_override_strict_minimum() {
        let probe = Coord::new(55.7558, 37.6173);
        let candidates =
            vec![point(1, 55.7558, 37.6174), point(2, 55.7560, 37.6180)];
        let preferred = PointId(Uuid::from_u128(2));
        let nearest = nearest_candidate(&probe, &candidates, Some(preferred), 2).unwrap();
        assert_eq!(
            nearest.id,
            PointId(Uuid::from_u128(1)),
            "the hint only applies to exact ties"
        );
    }
}
