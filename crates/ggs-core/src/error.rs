//! Error types for the GGS core

use crate::models::card::CardStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GgsError {
    // Data integrity errors
    #[error("value '{value}' is not in the '{vocabulary}' vocabulary")]
    UnknownChoice {
        vocabulary: &'static str,
        value: String,
    },

    #[error("sign type '{sign}' requires sub-property '{name}'")]
    MissingSubProperty {
        sign: &'static str,
        name: &'static str,
    },

    #[error("card has no property field named '{name}'")]
    UnknownCardField { name: String },

    #[error("card snapshot is missing '{name}'")]
    MissingSnapshotField { name: &'static str },

    // State machine errors
    #[error("card status cannot change from '{from}' to '{to}'")]
    StatusTransition { from: CardStatus, to: CardStatus },

    #[error("only a staff inspector may adjudicate a card")]
    NotInspector,

    // Storage errors
    #[error("a geo point already exists at ({latitude}, {longitude})")]
    DuplicateCoordinates { latitude: f64, longitude: f64 },

    #[error("card not found: {id}")]
    CardNotFound { id: uuid::Uuid },

    // Configuration errors
    #[error("invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, GgsError>;
