//! The type-of-sign tagged variant.
//!
//! Each sign kind declares its own nested sub-vocabularies: a pyramid has a
//! material and a geometry, a tur has a pillar material, a missing sign has
//! nothing. Validation happens when the wire form is decoded; a value that
//! made it into [`SignType`] is structurally complete by construction.

use crate::error::{GgsError, Result};
use crate::models::vocab::Vocabulary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Signal construction complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Simple,
    Complex,
}

impl Vocabulary for SignalKind {
    const NAME: &'static str = "type";
    const ALL: &'static [Self] = &[Self::Simple, Self::Complex];

    fn value(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Complex => "complex",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Simple => "простой",
            Self::Complex => "сложный",
        }
    }
}

/// Construction material of pyramids and tripods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Wood,
    Metalic,
}

impl Vocabulary for Material {
    const NAME: &'static str = "material";
    const ALL: &'static [Self] = &[Self::Wood, Self::Metalic];

    fn value(&self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Metalic => "metalic",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Wood => "деревянный",
            Self::Metalic => "металлический",
        }
    }
}

/// Face count of pyramids and tripods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignGeometry {
    Trihedron,
    Tetrahedron,
}

impl Vocabulary for SignGeometry {
    const NAME: &'static str = "geometry";
    const ALL: &'static [Self] = &[Self::Trihedron, Self::Tetrahedron];

    fn value(&self) -> &'static str {
        match self {
            Self::Trihedron => "trihedron",
            Self::Tetrahedron => "tetrahedron",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Trihedron => "трехгранная",
            Self::Tetrahedron => "четырехгранная",
        }
    }
}

/// Pillar material of a tur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillarMaterial {
    Concrete,
    Stone,
    Brick,
}

impl Vocabulary for PillarMaterial {
    const NAME: &'static str = "pillar";
    const ALL: &'static [Self] = &[Self::Concrete, Self::Stone, Self::Brick];

    fn value(&self) -> &'static str {
        match self {
            Self::Concrete => "concrete",
            Self::Stone => "stone",
            Self::Brick => "brick",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Concrete => "бетонный",
            Self::Stone => "каменный",
            Self::Brick => "кирпичный",
        }
    }
}

/// The outdoor sign found (or not found) at a marker, with the sub-properties
/// its kind requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignType {
    Signal { kind: SignalKind },
    Pyramid { material: Material, geometry: SignGeometry },
    Tripod { material: Material, geometry: SignGeometry },
    Tur { pillar: PillarMaterial },
    NoSign,
}

impl SignType {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Signal { .. } => "signal",
            Self::Pyramid { .. } => "pyramid",
            Self::Tripod { .. } => "tripod",
            Self::Tur { .. } => "tur",
            Self::NoSign => "no_sign",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Signal { .. } => "сигнал",
            Self::Pyramid { .. } => "пирамида",
            Self::Tripod { .. } => "штатив",
            Self::Tur { .. } => "тур",
            Self::NoSign => "знак отсутствует",
        }
    }

    /// Build a sign from its wire parts, enforcing that every sub-property
    /// the tag declares is present and drawn from that tag's allowed set
    pub fn from_parts(value: &str, properties: &BTreeMap<String, String>) -> Result<Self> {
        match value {
            "signal" => Ok(Self::Signal {
                kind: parse_sub(properties, "signal", "type")?,
            }),
            "pyramid" => Ok(Self::Pyramid {
                material: parse_sub(properties, "pyramid", "material")?,
                geometry: parse_sub(properties, "pyramid", "geometry")?,
            }),
            "tripod" => Ok(Self::Tripod {
                material: parse_sub(properties, "tripod", "material")?,
                geometry: parse_sub(properties, "tripod", "geometry")?,
            }),
            "tur" => Ok(Self::Tur {
                pillar: parse_sub(properties, "tur", "pillar")?,
            }),
            "no_sign" => Ok(Self::NoSign),
            other => Err(GgsError::UnknownChoice {
                vocabulary: "type_of_sign",
                value: other.to_string(),
            }),
        }
    }

    fn properties(&self) -> BTreeMap<String, String> {
        let mut properties = BTreeMap::new();
        match self {
            Self::Signal { kind } => {
                properties.insert("type".to_string(), kind.value().to_string());
            }
            Self::Pyramid { material, geometry } | Self::Tripod { material, geometry } => {
                properties.insert("material".to_string(), material.value().to_string());
                properties.insert("geometry".to_string(), geometry.value().to_string());
            }
            Self::Tur { pillar } => {
                properties.insert("pillar".to_string(), pillar.value().to_string());
            }
            Self::NoSign => {}
        }
        properties
    }

    /// Human description: the tag label followed by one line per declared
    /// sub-property, each capitalized. One line for `NoSign`, up to three
    /// for pyramids and tripods.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = vec![capitalize(self.label())];
        match self {
            Self::Signal { kind } => {
                lines.push(capitalize(&format!("тип {}", kind.label())));
            }
            Self::Pyramid { material, geometry } | Self::Tripod { material, geometry } => {
                lines.push(capitalize(&format!("материал {}", material.label())));
                lines.push(capitalize(&format!("геометрия {}", geometry.label())));
            }
            Self::Tur { pillar } => {
                lines.push(capitalize(&format!("столб {}", pillar.label())));
            }
            Self::NoSign => {}
        }
        lines
    }
}

fn parse_sub<C: Vocabulary>(
    properties: &BTreeMap<String, String>,
    sign: &'static str,
    name: &'static str,
) -> Result<C> {
    let raw = properties
        .get(name)
        .ok_or(GgsError::MissingSubProperty { sign, name })?;
    C::parse(raw)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The full `type_of_sign` field: tagged sign variant plus the shared
/// recommendation/comment pair, in the `{value, properties, recommendation,
/// comment}` wire shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SignRepr", into = "SignRepr")]
pub struct Sign {
    pub sign: SignType,
    pub recommendation: Option<String>,
    pub comment: Option<String>,
}

impl Sign {
    pub fn new(sign: SignType) -> Self {
        Self { sign, recommendation: None, comment: None }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SignRepr {
    value: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

impl TryFrom<SignRepr> for Sign {
    type Error = GgsError;

    fn try_from(repr: SignRepr) -> Result<Self> {
        Ok(Self {
            sign: SignType::from_parts(&repr.value, &repr.properties)?,
            recommendation: repr.recommendation,
            comment: repr.comment,
        })
    }
}

impl From<Sign> for SignRepr {
    fn from(sign: Sign) -> Self {
        Self {
            value: sign.sign.value().to_string(),
            properties: sign.sign.properties(),
            recommendation: sign.recommendation,
            comment: sign.comment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_pyramid_describes_three_lines() {
        let sign = SignType::from_parts(
            "pyramid",
            &props(&[("material", "wood"), ("geometry", "trihedron")]),
        )
        .unwrap();
        let lines = sign.describe();
        assert_eq!(
            lines,
            vec!["Пирамида", "Материал деревянный", "Геометрия трехгранная"]
        );
    }

    #[test]
    fn test_no_sign_describes_one_line() {
        assert_eq!(SignType::NoSign.describe(), vec!["Знак отсутствует"]);
    }

    #[test]
    fn test_tur_describes_pillar() {
        let sign = SignType::Tur { pillar: PillarMaterial::Brick };
        assert_eq!(sign.describe(), vec!["Тур", "Столб кирпичный"]);
    }

    #[test]
    fn test_missing_sub_property_is_integrity_error() {
        let err =
            SignType::from_parts("pyramid", &props(&[("material", "wood")])).unwrap_err();
        assert!(matches!(
            err,
            GgsError::MissingSubProperty { sign: "pyramid", name: "geometry" }
        ));
    }

    #[test]
    fn test_sub_value_outside_closed_set_is_rejected() {
        let err = SignType::from_parts(
            "tur",
            &props(&[("pillar", "plastic")]),
        )
        .unwrap_err();
        assert!(matches!(err, GgsError::UnknownChoice { vocabulary: "pillar", .. }));
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = SignType::from_parts("obelisk", &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, GgsError::UnknownChoice { vocabulary: "type_of_sign", .. }));
    }

    #[test]
    fn test_sign_wire_round_trip() {
        let json = serde_json::json!({
            "value": "pyramid",
            "properties": {"material": "wood", "geometry": "tetrahedron"},
            "recommendation": "покрасить"
        });
        let sign: Sign = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(
            sign.sign,
            SignType::Pyramid {
                material: Material::Wood,
                geometry: SignGeometry::Tetrahedron
            }
        );
        assert_eq!(serde_json::to_value(&sign).unwrap(), json);
    }

    #[test]
    fn test_no_sign_wire_form_omits_properties() {
        let sign = Sign::new(SignType::NoSign);
        let json = serde_json::to_value(&sign).unwrap();
        assert_eq!(json, serde_json::json!({"value": "no_sign"}));
    }

    #[test]
    fn test_incomplete_wire_form_fails_deserialization() {
        let json = serde_json::json!({"value": "tripod", "properties": {"material": "metalic"}});
        let result: std::result::Result<Sign, _> = serde_json::from_value(json);
        assert!(result.is_err(), "tripod without geometry must not deserialize");
    }
}
