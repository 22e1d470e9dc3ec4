//! Closed property vocabularies.
//!
//! Each of the nine card property fields stores a `{value, recommendation,
//! comment}` object whose value is drawn from one of these enumerations. The
//! sets are closed: anything outside them is a data-integrity error at the
//! boundary that accepted the input.

use crate::error::{GgsError, Result};
use serde::{Deserialize, Serialize};

/// A closed machine-value/display-label enumeration
pub trait Vocabulary: Sized + Copy + 'static {
    /// Machine name of the vocabulary, used in integrity errors
    const NAME: &'static str;
    /// Every member, in declaration order
    const ALL: &'static [Self];

    /// Machine value stored on the wire
    fn value(&self) -> &'static str;

    /// Human display label
    fn label(&self) -> &'static str;

    /// Resolve a stored machine value against the closed set
    fn parse(value: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|choice| choice.value() == value)
            .ok_or_else(|| GgsError::UnknownChoice {
                vocabulary: Self::NAME,
                value: value.to_string(),
            })
    }
}

/// Whether the marker was found at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Detected {
    Detected,
    Undetected,
}

impl Vocabulary for Detected {
    const NAME: &'static str = "detected";
    const ALL: &'static [Self] = &[Self::Detected, Self::Undetected];

    fn value(&self) -> &'static str {
        match self {
            Self::Detected => "detected",
            Self::Undetected => "undetected",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Detected => "обнаружен",
            Self::Undetected => "не обнаружен",
        }
    }
}

/// Whether a component survived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Saving {
    Saved,
    Unsaved,
}

impl Vocabulary for Saving {
    const NAME: &'static str = "saving";
    const ALL: &'static [Self] = &[Self::Saved, Self::Unsaved];

    fn value(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Unsaved => "unsaved",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Saved => "сохранился",
            Self::Unsaved => "не сохранился",
        }
    }
}

/// Whether a monolith was opened up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Covering {
    Covered,
    Uncovered,
}

impl Vocabulary for Covering {
    const NAME: &'static str = "covering";
    const ALL: &'static [Self] = &[Self::Covered, Self::Uncovered];

    fn value(&self) -> &'static str {
        match self {
            Self::Covered => "covered",
            Self::Uncovered => "uncovered",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Covered => "не вскрывался",
            Self::Uncovered => "вскрывался",
        }
    }
}

/// Whether an inscription is legible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reading {
    Readable,
    Unreadable,
}

impl Vocabulary for Reading {
    const NAME: &'static str = "reading";
    const ALL: &'static [Self] = &[Self::Readable, Self::Unreadable];

    fn value(&self) -> &'static str {
        match self {
            Self::Readable => "readable",
            Self::Unreadable => "unreadable",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Readable => "читается",
            Self::Unreadable => "не читается",
        }
    }
}

/// Whether satellite observation is feasible at the marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Possible {
    Possible,
    ConditionallyPossible,
    Impossible,
}

impl Vocabulary for Possible {
    const NAME: &'static str = "possible";
    const ALL: &'static [Self] = &[Self::Possible, Self::ConditionallyPossible, Self::Impossible];

    fn value(&self) -> &'static str {
        match self {
            Self::Possible => "possible",
            Self::ConditionallyPossible => "conditionally_possible",
            Self::Impossible => "impossible",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Possible => "возможно",
            Self::ConditionallyPossible => "условно возможно",
            Self::Impossible => "невозможно",
        }
    }
}

/// One structured property field on a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property<C> {
    pub value: C,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl<C: Vocabulary> Property<C> {
    pub fn new(value: C) -> Self {
        Self { value, recommendation: None, comment: None }
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    /// Display label of the stored state value
    pub fn state_label(&self) -> &'static str {
        self.value.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolves_machine_values() {
        assert_eq!(Detected::parse("detected").unwrap(), Detected::Detected);
        assert_eq!(
            Possible::parse("conditionally_possible").unwrap(),
            Possible::ConditionallyPossible
        );
    }

    #[test]
    fn test_parse_rejects_values_outside_closed_set() {
        let err = Saving::parse("maybe").unwrap_err();
        assert!(matches!(
            err,
            GgsError::UnknownChoice { vocabulary: "saving", .. }
        ));
    }

    #[test]
    fn test_property_round_trips_as_json() {
        let property = Property::new(Covering::Uncovered).with_recommendation("восстановить");
        let json = serde_json::to_value(&property).unwrap();
        assert_eq!(json["value"], "uncovered");
        assert_eq!(json["recommendation"], "восстановить");

        let back: Property<Covering> = serde_json::from_value(json).unwrap();
        assert_eq!(back, property);
    }

    #[test]
    fn test_state_label() {
        assert_eq!(Property::new(Reading::Unreadable).state_label(), "не читается");
    }
}
