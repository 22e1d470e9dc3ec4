//! In-memory storage implementations for development and testing.
//!
//! These implementations use `RwLock::unwrap()` intentionally. Lock poisoning
//! only occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state. A SQL backend would enforce the same invariants
//! with a unique constraint and a transaction around resolve-or-create.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ggs_core::error::{GgsError, Result};
use ggs_core::geo::SearchArea;
use ggs_core::models::{
    Card, CardId, CardSnapshot, Contact, CoordinateView, GeoPoint, NewGeoPoint, PointId, SubjectId,
    Verdict,
};
use ggs_core::ports::{CardStore, GeoPointStore};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Exact-bits key over rounded coordinates; the uniqueness constraint holds
/// at the stored precision, so bit equality is the right comparison
fn coord_key(latitude: f64, longitude: f64) -> (u64, u64) {
    (latitude.to_bits(), longitude.to_bits())
}

#[derive(Debug, Default)]
struct PointInner {
    points: HashMap<PointId, GeoPoint>,
    by_coords: HashMap<(u64, u64), PointId>,
}

/// In-memory implementation of [`GeoPointStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryPointStore {
    inner: Arc<RwLock<PointInner>>,
}

impl MemoryPointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a point by id (not part of the port; used when assembling
    /// snapshots and in tests)
    pub fn get(&self, id: PointId) -> Option<GeoPoint> {
        self.inner.read().unwrap().points.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl GeoPointStore for MemoryPointStore {
    async fn fetch_candidates(&self, area: &SearchArea) -> Result<Vec<GeoPoint>> {
        let inner = self.inner.read().unwrap();
        let mut candidates: Vec<GeoPoint> = inner
            .points
            .values()
            .filter(|point| area.contains(point.latitude, point.longitude))
            .cloned()
            .collect();

        // Stable iteration order backs the resolver's first-minimum tie-break
        candidates.sort_by(|a, b| {
            (a.latitude, a.longitude, a.id)
                .partial_cmp(&(b.latitude, b.longitude, b.id))
                .expect("stored coordinates are never NaN")
        });
        Ok(candidates)
    }

    async fn create_point(&self, new: &NewGeoPoint) -> Result<GeoPoint> {
        let mut inner = self.inner.write().unwrap();
        let key = coord_key(new.latitude, new.longitude);
        if inner.by_coords.contains_key(&key) {
            return Err(GgsError::DuplicateCoordinates {
                latitude: new.latitude,
                longitude: new.longitude,
            });
        }

        let point = GeoPoint {
            id: PointId::generate(),
            latitude: new.latitude,
            longitude: new.longitude,
            subject: new.subject,
        };
        inner.by_coords.insert(key, point.id);
        inner.points.insert(point.id, point.clone());
        tracing::debug!(point = %point.id.0, "persisted geo point");
        Ok(point)
    }
}

/// Display names of an administrative subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectInfo {
    pub name: String,
    pub district: String,
}

#[derive(Debug, Default)]
struct CardInner {
    cards: HashMap<CardId, Card>,
    photos: HashMap<CardId, Vec<PathBuf>>,
}

/// In-memory implementation of [`CardStore`].
///
/// Holds a handle to the point store so snapshots can resolve a card's
/// coordinates and subject names. Cards are never removed (audit retention).
#[derive(Debug, Clone)]
pub struct MemoryCardStore {
    points: MemoryPointStore,
    subjects: Arc<RwLock<HashMap<SubjectId, SubjectInfo>>>,
    inner: Arc<RwLock<CardInner>>,
}

impl MemoryCardStore {
    pub fn new(points: MemoryPointStore) -> Self {
        Self {
            points,
            subjects: Arc::new(RwLock::new(HashMap::new())),
            inner: Arc::new(RwLock::new(CardInner::default())),
        }
    }

    /// Register the display names for a subject reference
    pub fn register_subject(&self, id: SubjectId, name: &str, district: &str) {
        self.subjects.write().unwrap().insert(
            id,
            SubjectInfo { name: name.to_string(), district: district.to_string() },
        );
    }

    /// Attach resolved photo paths to a card
    pub fn attach_photos(&self, card: CardId, photos: Vec<PathBuf>) {
        self.inner.write().unwrap().photos.insert(card, photos);
    }
}

#[async_trait]
impl CardStore for MemoryCardStore {
    async fn insert_card(&self, card: &Card) -> Result<CardId> {
        let mut inner = self.inner.write().unwrap();
        inner.cards.insert(card.id, card.clone());
        Ok(card.id)
    }

    async fn get_card(&self, id: CardId) -> Result<Option<Card>> {
        Ok(self.inner.read().unwrap().cards.get(&id).cloned())
    }

    async fn adjudicate_card(
        &self,
        id: CardId,
        inspector: &Contact,
        verdict: Verdict,
        at: DateTime<Utc>,
    ) -> Result<Card> {
        let mut inner = self.inner.write().unwrap();
        let card = inner
            .cards
            .get_mut(&id)
            .ok_or(GgsError::CardNotFound { id: id.0 })?;
        card.adjudicate(inspector, verdict, at)?;
        Ok(card.clone())
    }

    async fn load_snapshot(&self, id: CardId) -> Result<Option<CardSnapshot>> {
        let inner = self.inner.read().unwrap();
        let Some(card) = inner.cards.get(&id) else {
            return Ok(None);
        };

        let point = self
            .points
            .get(card.point)
            .ok_or(GgsError::MissingSnapshotField { name: "coordinates" })?;
        let subject = self
            .subjects
            .read()
            .unwrap()
            .get(&point.subject)
            .cloned()
            .ok_or(GgsError::MissingSnapshotField { name: "federal_subject" })?;

        Ok(Some(CardSnapshot {
            card: card.clone(),
            coordinates: CoordinateView {
                latitude: point.latitude,
                longitude: point.longitude,
                federal_subject: subject.name,
                federal_district: subject.district,
            },
            photos: inner.photos.get(&id).cloned().unwrap_or_default(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ggs_core::geo::Coord;

    fn new_point(latitude: f64, longitude: f64) -> NewGeoPoint {
        NewGeoPoint { latitude, longitude, subject: SubjectId(25) }
    }

    #[tokio::test]
    async fn test_create_and_fetch_in_window() {
        let store = MemoryPointStore::new();
        store.create_point(&new_point(55.7558, 37.6173)).await.unwrap();
        store.create_point(&new_point(55.9, 37.6173)).await.unwrap();

        let area = SearchArea::around(Coord::new(55.7558, 37.6174), 30.0);
        let candidates = store.fetch_candidates(&area).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].latitude, 55.7558);
    }

    #[tokio::test]
    async fn test_duplicate_coordinates_rejected() {
        let store = MemoryPointStore::new();
        store.create_point(&new_point(55.7558, 37.6173)).await.unwrap();
        let err = store.create_point(&new_point(55.7558, 37.6173)).await.unwrap_err();
        assert!(matches!(err, GgsError::DuplicateCoordinates { .. }));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_candidates_come_back_in_stable_order() {
        let store = MemoryPointStore::new();
        store.create_point(&new_point(55.7559, 37.6173)).await.unwrap();
        store.create_point(&new_point(55.7557, 37.6173)).await.unwrap();
        store.create_point(&new_point(55.7558, 37.6173)).await.unwrap();

        let area = SearchArea::around(Coord::new(55.7558, 37.6173), 30.0);
        let first = store.fetch_candidates(&area).await.unwrap();
        let second = store.fetch_candidates(&area).await.unwrap();
        assert_eq!(first, second);
        assert!(first.windows(2).all(|pair| pair[0].latitude <= pair[1].latitude));
    }
}
