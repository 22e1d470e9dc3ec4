//! Table templates for the property and signature sections.
//!
//! A template expands into a short list of cell tuples rather than a single
//! pair: the property templates pair a three-header row with a three-value
//! row, and the signature templates add the role caption and date above the
//! name line. Field labels resolve at construction time so a misspelled
//! field name fails before any snapshot is touched.

use crate::cell::{Align, Cell, Span, Style, TableCell};
use crate::nodes::{heading_cell, value_cell};
use ggs_core::models::{Card, CardSnapshot};
use ggs_core::{GgsError, Result};

/// One multi-tuple block of the layout
pub trait TableTemplate {
    fn render(&self, snapshot: &CardSnapshot) -> Result<Vec<Vec<TableCell>>>;
}

/// Header-plus-state-plus-recommendation block for one of the nine
/// structured property fields
#[derive(Debug)]
pub struct PropertyTableTemplate {
    field: &'static str,
    label: &'static str,
}

impl PropertyTableTemplate {
    pub fn new(field: &'static str) -> Result<Self> {
        let label = Card::property_label(field).ok_or_else(|| GgsError::UnknownCardField {
            name: field.to_string(),
        })?;
        Ok(Self { field, label })
    }
}

impl TableTemplate for PropertyTableTemplate {
    fn render(&self, snapshot: &CardSnapshot) -> Result<Vec<Vec<TableCell>>> {
        let property = snapshot
            .card
            .property(self.field)
            .ok_or_else(|| GgsError::UnknownCardField { name: self.field.to_string() })?;

        let headers: Vec<TableCell> = vec![
            heading_cell(self.label).into(),
            heading_cell("Состояние").into(),
            heading_cell("Рекомендация").into(),
        ];
        let values: Vec<TableCell> = vec![
            Span::Col.into(),
            value_cell(property.state_label).into(),
            value_cell(property.recommendation.unwrap_or("-")).into(),
        ];
        Ok(vec![headers, values])
    }
}

/// Property templates for all nine structured fields, in layout order
pub fn property_templates() -> Result<Vec<PropertyTableTemplate>> {
    Card::PROPERTY_FIELDS.into_iter().map(PropertyTableTemplate::new).collect()
}

fn caption_cell(text: &str) -> Cell {
    Cell::text(text).aligned(Align::Left).styled(Style::bold(11.0))
}

fn date_cell(text: String) -> Cell {
    Cell::text(text)
        .aligned(Align::Left)
        .styled(Style::italic(10.0))
        .padded((0.0, 0.0, 0.0, 10.0))
}

fn name_cell(text: String) -> Cell {
    Cell::text(text).aligned(Align::Left).styled(Style::italic(11.0))
}

/// "Составил" block: caption with the creation date, then the executor name
pub struct ExecutorSignatureTemplate;

impl TableTemplate for ExecutorSignatureTemplate {
    fn render(&self, snapshot: &CardSnapshot) -> Result<Vec<Vec<TableCell>>> {
        let created = snapshot.card.datetime_creation.format("%d.%m.%Y %H:%M").to_string();
        Ok(vec![
            vec![caption_cell("Составил").into(), date_cell(created).into()],
            vec![Span::Col.into(), name_cell(snapshot.card.executor.full_name()).into()],
        ])
    }
}

/// "Проверил" block: caption with the inspection time, then the inspector
/// name. Errs when the card has not been adjudicated yet.
pub struct InspectorSignatureTemplate;

impl TableTemplate for InspectorSignatureTemplate {
    fn render(&self, snapshot: &CardSnapshot) -> Result<Vec<Vec<TableCell>>> {
        let inspector = snapshot
            .card
            .inspector
            .as_ref()
            .ok_or(GgsError::MissingSnapshotField { name: "inspector" })?;
        let inspected = snapshot
            .card
            .datetime_inspection
            .ok_or(GgsError::MissingSnapshotField { name: "datetime_inspection" })?;

        let inspected = inspected.format("%d.%m.%Y %H:%M").to_string();
        Ok(vec![
            vec![caption_cell("Проверил").into(), date_cell(inspected).into()],
            vec![Span::Col.into(), name_cell(inspector.full_name()).into()],
        ])
    }
}
