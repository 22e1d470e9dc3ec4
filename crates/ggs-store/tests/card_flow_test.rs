//! Submission-to-snapshot flow across the point and card stores.

use chrono::{NaiveDate, TimeZone, Utc};
use ggs_core::config::GeoConfig;
use ggs_core::error::GgsError;
use ggs_core::models::{
    Card, CardId, CardStatus, Contact, Covering, Detected, Possible, Property, Reading, Saving,
    Sign, SignType, SubjectId, Verdict,
};
use ggs_core::ports::CardStore;
use ggs_core::resolver::PointResolver;
use ggs_store::{MemoryCardStore, MemoryPointStore};
use std::path::PathBuf;

fn executor() -> Contact {
    Contact {
        first_name: "иван".to_string(),
        second_name: "сидоров".to_string(),
        third_name: "петрович".to_string(),
        email: "executor@example.org".to_string(),
        is_staff: false,
    }
}

fn inspector() -> Contact {
    Contact {
        first_name: "анна".to_string(),
        second_name: "кузнецова".to_string(),
        third_name: "ивановна".to_string(),
        email: "inspector@example.org".to_string(),
        is_staff: true,
    }
}

fn card(point: ggs_core::models::PointId, submitter: &Contact) -> Card {
    Card {
        id: CardId::generate(),
        status: Card::initial_status(submitter.is_staff),
        point,
        executor: submitter.clone(),
        inspector: None,
        execute_date: NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
        datetime_creation: Utc.with_ymd_and_hms(2024, 6, 14, 10, 0, 0).unwrap(),
        datetime_inspection: None,
        identification_pillar: Property::new(Detected::Detected),
        monolith_one: Property::new(Saving::Saved),
        monolith_two: Property::new(Covering::Covered),
        monolith_three_and_four: Property::new(Covering::Uncovered),
        outdoor_sign: Property::new(Saving::Saved),
        orp_one: Property::new(Saving::Saved),
        orp_two: Property::new(Saving::Unsaved),
        trench: Property::new(Reading::Readable),
        satellite_surveillance: Property::new(Possible::ConditionallyPossible),
        type_of_sign: Sign::new(SignType::NoSign),
        sign_height: 5.0,
        sign_height_above_ground_level: -0.2,
        point_index: Some("IV-12".to_string()),
        name_point: Some("Лесная, 2 класс".to_string()),
        year_of_laying: Some(1975),
        type_of_center: None,
        height_above_sea_level: Some(96.0),
        trapezoids: None,
    }
}

#[tokio::test]
async fn test_submit_adjudicate_and_snapshot() {
    let points = MemoryPointStore::new();
    let cards = MemoryCardStore::new(points.clone());
    cards.register_subject(SubjectId(25), "Приморский край", "Дальневосточный ФО");

    let config = GeoConfig::with_defaults();
    let resolution = PointResolver::new(&points, &config)
        .resolve_or_create(43.1155, 131.8855, SubjectId(25), None)
        .await
        .unwrap();

    let submitter = executor();
    let submitted = card(resolution.point().id, &submitter);
    assert_eq!(submitted.status, CardStatus::Sending, "plain users submit as sending");

    let id = cards.insert_card(&submitted).await.unwrap();
    cards.attach_photos(id, vec![PathBuf::from("/media/photos/2024/06/14/p1.jpg")]);

    let at = Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap();
    let reviewed = cards.adjudicate_card(id, &inspector(), Verdict::Accept, at).await.unwrap();
    assert_eq!(reviewed.status, CardStatus::Success);
    assert_eq!(reviewed.datetime_inspection, Some(at));

    let snapshot = cards.load_snapshot(id).await.unwrap().unwrap();
    assert_eq!(snapshot.card.status, CardStatus::Success);
    assert_eq!(snapshot.coordinates.latitude, 43.1155);
    assert_eq!(snapshot.coordinates.federal_subject, "Приморский край");
    assert_eq!(snapshot.photos.len(), 1);
}

#[tokio::test]
async fn test_adjudicated_card_cannot_be_readjudicated() {
    let points = MemoryPointStore::new();
    let cards = MemoryCardStore::new(points.clone());

    let config = GeoConfig::with_defaults();
    let resolution = PointResolver::new(&points, &config)
        .resolve_or_create(43.1155, 131.8855, SubjectId(25), None)
        .await
        .unwrap();

    let id = cards.insert_card(&card(resolution.point().id, &executor())).await.unwrap();

    let at = Utc::now();
    cards.adjudicate_card(id, &inspector(), Verdict::Reject, at).await.unwrap();
    let err = cards.adjudicate_card(id, &inspector(), Verdict::Accept, at).await.unwrap_err();
    assert!(matches!(err, GgsError::StatusTransition { from: CardStatus::Denied, .. }));
}

#[tokio::test]
async fn test_snapshot_without_registered_subject_fails_loudly() {
    let points = MemoryPointStore::new();
    let cards = MemoryCardStore::new(points.clone());

    let config = GeoConfig::with_defaults();
    let resolution = PointResolver::new(&points, &config)
        .resolve_or_create(43.1155, 131.8855, SubjectId(99), None)
        .await
        .unwrap();

    let id = cards.insert_card(&card(resolution.point().id, &executor())).await.unwrap();
    let err = cards.load_snapshot(id).await.unwrap_err();
    assert!(matches!(err, GgsError::MissingSnapshotField { name: "federal_subject" }));
}

#[tokio::test]
async fn test_missing_card_snapshot_is_none() {
    let cards = MemoryCardStore::new(MemoryPointStore::new());
    let absent = cards.load_snapshot(CardId::generate()).await.unwrap();
    assert!(absent.is_none());
}
