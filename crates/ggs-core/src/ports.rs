//! Ports the persistence collaborator implements.
//!
//! The core performs no I/O itself: candidate fetches and writes are owned
//! by the storage layer behind these traits. The one consistency requirement
//! is that `create_point` is atomic with respect to concurrent submissions
//! and reports a lost uniqueness race as
//! [`GgsError::DuplicateCoordinates`](crate::GgsError::DuplicateCoordinates)
//! so the resolver can re-resolve instead of erroring out.

use crate::error::Result;
use crate::geo::SearchArea;
use crate::models::{Card, CardId, CardSnapshot, Contact, GeoPoint, NewGeoPoint, Verdict};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Port for geo-point storage
#[async_trait]
pub trait GeoPointStore: Send + Sync {
    /// Bounding-box pre-filter: every stored point whose coordinates fall
    /// inside the search window
    async fn fetch_candidates(&self, area: &SearchArea) -> Result<Vec<GeoPoint>>;

    /// Persist a new point. Fails with `DuplicateCoordinates` if a point
    /// with the same rounded coordinates already exists.
    async fn create_point(&self, new: &NewGeoPoint) -> Result<GeoPoint>;
}

/// Port for card storage
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Persist a freshly submitted card
    async fn insert_card(&self, card: &Card) -> Result<CardId>;

    /// Fetch a card by id
    async fn get_card(&self, id: CardId) -> Result<Option<Card>>;

    /// Apply a single-step inspector adjudication and return the updated row
    async fn adjudicate_card(
        &self,
        id: CardId,
        inspector: &Contact,
        verdict: Verdict,
        at: DateTime<Utc>,
    ) -> Result<Card>;

    /// Assemble the read-only snapshot the renderer consumes
    async fn load_snapshot(&self, id: CardId) -> Result<Option<CardSnapshot>>;
}
