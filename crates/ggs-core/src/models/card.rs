//! The inspection card: status state machine, the nine structured property
//! fields, and the read-only snapshot the renderer consumes.

use crate::error::{GgsError, Result};
use crate::models::geo_point::PointId;
use crate::models::sign::Sign;
use crate::models::vocab::{Covering, Detected, Possible, Property, Reading, Saving, Vocabulary};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Identifier of one inspection card
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CardId(pub Uuid);

impl CardId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Card review status.
///
/// `Sending` is the pre-review state of a submission by a plain user;
/// staff submissions start at `Pending`. A single inspector action moves an
/// open card to `Success` or `Denied`; there are no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Sending,
    Pending,
    Success,
    Denied,
}

impl CardStatus {
    pub const ALL: [CardStatus; 4] =
        [Self::Pending, Self::Sending, Self::Success, Self::Denied];

    /// Every status a staff listing shows (the pre-review `Sending` state is
    /// a user-only variant)
    pub const WITHOUT_SENDING: [CardStatus; 3] = [Self::Pending, Self::Success, Self::Denied];

    pub fn value(&self) -> &'static str {
        match self {
            Self::Sending => "sending",
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Denied => "denied",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sending => "Отправлено",
            Self::Pending => "В процессе проверки",
            Self::Success => "Принято",
            Self::Denied => "Отвергнуто",
        }
    }

    /// Whether an inspector may still adjudicate this card
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Sending | Self::Pending)
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// An inspector's single-step decision on an open card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accept,
    Reject,
}

impl Verdict {
    pub fn status(&self) -> CardStatus {
        match self {
            Self::Accept => CardStatus::Success,
            Self::Reject => CardStatus::Denied,
        }
    }
}

/// Executor or inspector identity as the card stores it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub first_name: String,
    pub second_name: String,
    pub third_name: String,
    pub email: String,
    pub is_staff: bool,
}

impl Contact {
    /// "Surname Name Patronymic", each part capitalized
    pub fn full_name(&self) -> String {
        [&self.second_name, &self.first_name, &self.third_name]
            .iter()
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One inspection record for a GGS point.
///
/// Rows are never physically deleted; adjudicated cards are retained for
/// audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub status: CardStatus,
    pub point: PointId,
    pub executor: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspector: Option<Contact>,
    pub execute_date: NaiveDate,
    pub datetime_creation: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime_inspection: Option<DateTime<Utc>>,

    pub identification_pillar: Property<Detected>,
    pub monolith_one: Property<Saving>,
    pub monolith_two: Property<Covering>,
    pub monolith_three_and_four: Property<Covering>,
    pub outdoor_sign: Property<Saving>,
    pub orp_one: Property<Saving>,
    pub orp_two: Property<Saving>,
    pub trench: Property<Reading>,
    pub satellite_surveillance: Property<Possible>,

    pub type_of_sign: Sign,
    pub sign_height: f64,
    pub sign_height_above_ground_level: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_point: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_laying: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_of_center: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_above_sea_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trapezoids: Option<String>,
}

/// Read-only view over one of the nine structured property fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyView<'a> {
    /// Display label of the field itself
    pub label: &'static str,
    /// Display label of the stored state value
    pub state_label: &'static str,
    pub recommendation: Option<&'a str>,
}

impl Card {
    /// The nine structured property field names, in layout order
    pub const PROPERTY_FIELDS: [&'static str; 9] = [
        "identification_pillar",
        "monolith_one",
        "monolith_two",
        "monolith_three_and_four",
        "outdoor_sign",
        "orp_one",
        "orp_two",
        "trench",
        "satellite_surveillance",
    ];

    /// Display label of a property field, `None` for unknown names.
    ///
    /// Static metadata: templates resolve labels at construction time and
    /// must fail fast on a name the card type does not declare.
    pub fn property_label(name: &str) -> Option<&'static str> {
        Some(match name {
            "identification_pillar" => "Опознавательный столб",
            "monolith_one" => "Монолит I",
            "monolith_two" => "Монолит II",
            "monolith_three_and_four" => "Монолиты III и IV",
            "outdoor_sign" => "Наружный знак",
            "orp_one" => "ОРП I",
            "orp_two" => "ОРП II",
            "trench" => "Окопка",
            "satellite_surveillance" => "Спутниковое наблюдение",
            _ => return None,
        })
    }

    /// View a property field by name, `None` for unknown names
    pub fn property(&self, name: &str) -> Option<PropertyView<'_>> {
        let label = Self::property_label(name)?;
        let (state_label, recommendation) = match name {
            "identification_pillar" => view(&self.identification_pillar),
            "monolith_one" => view(&self.monolith_one),
            "monolith_two" => view(&self.monolith_two),
            "monolith_three_and_four" => view(&self.monolith_three_and_four),
            "outdoor_sign" => view(&self.outdoor_sign),
            "orp_one" => view(&self.orp_one),
            "orp_two" => view(&self.orp_two),
            "trench" => view(&self.trench),
            "satellite_surveillance" => view(&self.satellite_surveillance),
            _ => return None,
        };
        Some(PropertyView { label, state_label, recommendation })
    }

    /// Initial status of a fresh submission
    pub fn initial_status(submitter_is_staff: bool) -> CardStatus {
        if submitter_is_staff {
            CardStatus::Pending
        } else {
            CardStatus::Sending
        }
    }

    /// Single-step inspector adjudication.
    ///
    /// Only a staff contact may transition a card, and only away from an
    /// open status. Stamps the inspection time and records the inspector.
    pub fn adjudicate(
        &mut self,
        inspector: &Contact,
        verdict: Verdict,
        at: DateTime<Utc>,
    ) -> Result<()> {
        if !inspector.is_staff {
            return Err(GgsError::NotInspector);
        }
        if !self.status.is_open() {
            return Err(GgsError::StatusTransition {
                from: self.status,
                to: verdict.status(),
            });
        }
        self.status = verdict.status();
        self.inspector = Some(inspector.clone());
        self.datetime_inspection = Some(at);
        Ok(())
    }
}

fn view<C: Vocabulary>(property: &Property<C>) -> (&'static str, Option<&str>) {
    (property.state_label(), property.recommendation.as_deref())
}

/// Coordinate fields of a card as the renderer displays them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateView {
    pub latitude: f64,
    pub longitude: f64,
    pub federal_subject: String,
    pub federal_district: String,
}

impl CoordinateView {
    /// Hemisphere-prefixed degree strings, e.g. `["N55.7558°", "E37.6173°"]`
    pub fn printable(&self) -> [String; 2] {
        let lat_sign = if self.latitude >= 0.0 { "N" } else { "S" };
        let lon_sign = if self.longitude >= 0.0 { "E" } else { "W" };
        [
            format!("{}{}\u{b0}", lat_sign, self.latitude.abs()),
            format!("{}{}\u{b0}", lon_sign, self.longitude.abs()),
        ]
    }
}

/// Read-only render input assembled by the persistence collaborator:
/// the card, its resolved coordinate view, and photo paths on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub card: Card,
    pub coordinates: CoordinateView,
    pub photos: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sign::SignType;
    use chrono::TimeZone;

    fn staff(name: &str) -> Contact {
        Contact {
            first_name: name.to_string(),
            second_name: "петров".to_string(),
            third_name: "иванович".to_string(),
            email: format!("{}@example.org", name),
            is_staff: true,
        }
    }

    fn plain_user() -> Contact {
        Contact { is_staff: false, ..staff("user") }
    }

    pub(crate) fn sample_card(status: CardStatus) -> Card {
        Card {
            id: CardId::generate(),
            status,
            point: PointId::generate(),
            executor: plain_user(),
            inspector: None,
            execute_date: NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
            datetime_creation: Utc.with_ymd_and_hms(2024, 6, 14, 10, 0, 0).unwrap(),
            datetime_inspection: None,
            identification_pillar: Property::new(Detected::Detected),
            monolith_one: Property::new(Saving::Saved),
            monolith_two: Property::new(Covering::Covered),
            monolith_three_and_four: Property::new(Covering::Covered),
            outdoor_sign: Property::new(Saving::Unsaved).with_recommendation("восстановить"),
            orp_one: Property::new(Saving::Saved),
            orp_two: Property::new(Saving::Saved),
            trench: Property::new(Reading::Readable),
            satellite_surveillance: Property::new(Possible::Possible),
            type_of_sign: Sign::new(SignType::NoSign),
            sign_height: 4.5,
            sign_height_above_ground_level: 0.3,
            point_index: Some("II-34".to_string()),
            name_point: None,
            year_of_laying: Some(1987),
            type_of_center: None,
            height_above_sea_level: Some(141.2),
            trapezoids: None,
        }
    }

    #[test]
    fn test_initial_status_depends_on_role() {
        assert_eq!(Card::initial_status(true), CardStatus::Pending);
        assert_eq!(Card::initial_status(false), CardStatus::Sending);
    }

    #[test]
    fn test_adjudicate_accepts_open_card() {
        let mut card = sample_card(CardStatus::Pending);
        let inspector = staff("inspector");
        let at = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap();
        card.adjudicate(&inspector, Verdict::Accept, at).unwrap();
        assert_eq!(card.status, CardStatus::Success);
        assert_eq!(card.datetime_inspection, Some(at));
        assert_eq!(card.inspector.as_ref().unwrap().email, inspector.email);
    }

    #[test]
    fn test_adjudicate_rejects_from_sending() {
        let mut card = sample_card(CardStatus::Sending);
        let at = Utc::now();
        card.adjudicate(&staff("inspector"), Verdict::Reject, at).unwrap();
        assert_eq!(card.status, CardStatus::Denied);
    }

    #[test]
    fn test_adjudicated_card_is_terminal() {
        let mut card = sample_card(CardStatus::Success);
        let err = card.adjudicate(&staff("inspector"), Verdict::Reject, Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            GgsError::StatusTransition { from: CardStatus::Success, to: CardStatus::Denied }
        ));
    }

    #[test]
    fn test_plain_user_cannot_adjudicate() {
        let mut card = sample_card(CardStatus::Pending);
        let err = card.adjudicate(&plain_user(), Verdict::Accept, Utc::now()).unwrap_err();
        assert!(matches!(err, GgsError::NotInspector));
        assert_eq!(card.status, CardStatus::Pending, "a refused transition must not mutate");
    }

    #[test]
    fn test_without_sending_set() {
        assert!(!CardStatus::WITHOUT_SENDING.contains(&CardStatus::Sending));
        assert_eq!(CardStatus::WITHOUT_SENDING.len(), CardStatus::ALL.len() - 1);
    }

    #[test]
    fn test_property_lookup_by_name() {
        let card = sample_card(CardStatus::Pending);
        let property = card.property("outdoor_sign").unwrap();
        assert_eq!(property.label, "Наружный знак");
        assert_eq!(property.state_label, "не сохранился");
        assert_eq!(property.recommendation, Some("восстановить"));
    }

    #[test]
    fn test_property_lookup_unknown_name() {
        let card = sample_card(CardStatus::Pending);
        assert!(card.property("no_such_field").is_none());
        assert!(Card::property_label("no_such_field").is_none());
    }

    #[test]
    fn test_every_declared_property_field_resolves() {
        let card = sample_card(CardStatus::Pending);
        for name in Card::PROPERTY_FIELDS {
            assert!(card.property(name).is_some(), "field {} must resolve", name);
        }
    }

    #[test]
    fn test_full_name_capitalizes_parts() {
        assert_eq!(plain_user().full_name(), "Петров User Иванович");
    }

    #[test]
    fn test_printable_coordinates() {
        let view = CoordinateView {
            latitude: 55.7558,
            longitude: -37.6173,
            federal_subject: "Приморский край".to_string(),
            federal_district: "ДФО".to_string(),
        };
        assert_eq!(view.printable(), ["N55.7558\u{b0}", "W37.6173\u{b0}"]);
    }

    #[test]
    fn test_card_json_round_trip() {
        let card = sample_card(CardStatus::Pending);
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }
}
