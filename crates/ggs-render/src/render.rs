//! The card renderer: drives the fixed four-page section sequence.
//!
//! Page layout is constant across cards; only the cell content varies.
//! Section lists and templates are built once at construction so that a bad
//! field name surfaces when the renderer is created, not mid-document.

use crate::document::{BordersLayout, DocumentSink, HeadingsDisplay, TableParams};
use crate::nodes::{header_nodes, main_nodes, represent, Node, PhotosNode};
use crate::table::dynamic_row_table;
use crate::template::{
    property_templates, ExecutorSignatureTemplate, InspectorSignatureTemplate,
    PropertyTableTemplate, TableTemplate,
};
use ggs_core::models::CardSnapshot;
use ggs_core::Result;

const HEADER_COLS: usize = 2;
const MAIN_COLS: usize = 2;
const PROPERTY_COLS: usize = 4;
const PHOTO_COLS: usize = 1;
const SIGNATURE_COLS: usize = 2;

/// Renders one card snapshot into a document sink
pub struct CardRenderer {
    header: Vec<Box<dyn Node>>,
    main: Vec<Box<dyn Node>>,
    properties: Vec<PropertyTableTemplate>,
}

impl CardRenderer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            header: header_nodes(),
            main: main_nodes(),
            properties: property_templates()?,
        })
    }

    /// Emit the full document: header and main info, the nine property
    /// blocks, the photo page, and the signature page.
    pub fn render(&self, snapshot: &CardSnapshot, sink: &mut dyn DocumentSink) -> Result<()> {
        tracing::debug!(card_id = %snapshot.card.id.0, "rendering card");

        self.render_summary_page(snapshot, sink)?;
        self.render_property_page(snapshot, sink)?;
        self.render_photo_page(snapshot, sink)?;
        self.render_signature_page(snapshot, sink)?;
        Ok(())
    }

    fn render_summary_page(
        &self,
        snapshot: &CardSnapshot,
        sink: &mut dyn DocumentSink,
    ) -> Result<()> {
        sink.begin_page()?;

        let header = represent(&self.header, snapshot)?;
        sink.table(&dynamic_row_table(&header, HEADER_COLS), &TableParams::default())?;
        sink.spacer(5.0)?;

        let main = represent(&self.main, snapshot)?;
        sink.table(&dynamic_row_table(&main, MAIN_COLS), &TableParams::default())?;
        Ok(())
    }

    fn render_property_page(
        &self,
        snapshot: &CardSnapshot,
        sink: &mut dyn DocumentSink,
    ) -> Result<()> {
        sink.begin_page()?;
        let params = TableParams::default().with_headings(HeadingsDisplay::OnTopOfEveryPage);
        for template in &self.properties {
            let tuples = template.render(snapshot)?;
            sink.table(&dynamic_row_table(&tuples, PROPERTY_COLS), &params)?;
            sink.spacer(6.0)?;
        }
        Ok(())
    }

    fn render_photo_page(
        &self,
        snapshot: &CardSnapshot,
        sink: &mut dyn DocumentSink,
    ) -> Result<()> {
        sink.begin_page()?;
        let photos = represent(&[Box::new(PhotosNode) as Box<dyn Node>], snapshot)?;
        let params = TableParams::default()
            .with_headings(HeadingsDisplay::OnTopOfEveryPage)
            .with_gutters(1.0, 3.0);
        sink.table(&dynamic_row_table(&photos, PHOTO_COLS), &params)?;
        Ok(())
    }

    fn render_signature_page(
        &self,
        snapshot: &CardSnapshot,
        sink: &mut dyn DocumentSink,
    ) -> Result<()> {
        sink.begin_page()?;
        let params = TableParams::default()
            .with_borders(BordersLayout::None)
            .with_gutters(0.0, 0.0);

        let executor = ExecutorSignatureTemplate.render(snapshot)?;
        sink.table(&dynamic_row_table(&executor, SIGNATURE_COLS), &params)?;
        sink.rule()?;
        sink.spacer(5.0)?;

        let inspector = InspectorSignatureTemplate.render(snapshot)?;
        sink.table(&dynamic_row_table(&inspector, SIGNATURE_COLS), &params)?;
        sink.rule()?;
        Ok(())
    }
}
