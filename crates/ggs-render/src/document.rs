//! Document sink port and table parameters.
//!
//! The renderer emits an ordered sequence of page breaks, span-padded table
//! blocks, spacers, and rules. The sink owns everything physical: page
//! geometry, fonts, headers/footers, and the output encoding.

use crate::cell::{Align, TableCell};
use ggs_core::Result;

/// Whether heading rows repeat when a table crosses a page break
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingsDisplay {
    #[default]
    None,
    OnTopOfEveryPage,
}

/// Border layout of a table block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BordersLayout {
    #[default]
    All,
    None,
}

/// Per-table layout parameters handed to the sink alongside the rows
#[derive(Debug, Clone, PartialEq)]
pub struct TableParams {
    pub align: Align,
    pub first_row_as_headings: bool,
    pub repeat_headings: HeadingsDisplay,
    pub borders_layout: BordersLayout,
    pub gutter_width: f32,
    pub gutter_height: f32,
}

impl Default for TableParams {
    fn default() -> Self {
        Self {
            align: Align::Center,
            first_row_as_headings: false,
            repeat_headings: HeadingsDisplay::None,
            borders_layout: BordersLayout::All,
            gutter_width: 1.0,
            gutter_height: 1.0,
        }
    }
}

impl TableParams {
    pub fn with_headings(mut self, repeat: HeadingsDisplay) -> Self {
        self.first_row_as_headings = true;
        self.repeat_headings = repeat;
        self
    }

    pub fn with_borders(mut self, borders: BordersLayout) -> Self {
        self.borders_layout = borders;
        self
    }

    pub fn with_gutters(mut self, width: f32, height: f32) -> Self {
        self.gutter_width = width;
        self.gutter_height = height;
        self
    }
}

/// Port for paginated document output
pub trait DocumentSink {
    /// Start a new page
    fn begin_page(&mut self) -> Result<()>;

    /// Emit one table block; every row carries the same cell count
    fn table(&mut self, rows: &[Vec<TableCell>], params: &TableParams) -> Result<()>;

    /// Vertical whitespace inside the current page
    fn spacer(&mut self, height: f32) -> Result<()>;

    /// Full-width horizontal rule
    fn rule(&mut self) -> Result<()>;
}

/// One recorded table block
#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock {
    pub rows: Vec<Vec<TableCell>>,
    pub params: TableParams,
}

/// One recorded page of blocks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub tables: Vec<TableBlock>,
}

/// In-memory sink recording the emitted structure.
///
/// Used by tests and by collaborators that post-process the block sequence
/// instead of writing a physical document directly.
#[derive(Debug, Clone, Default)]
pub struct BufferedDocument {
    pages: Vec<Page>,
}

impl BufferedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Crude text rendering: one line per row, cells joined by pipes.
    /// Span markers render as empty fields.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for (index, page) in self.pages.iter().enumerate() {
            if index > 0 {
                out.push_str("\u{c}");
            }
            for block in &page.tables {
                for row in &block.rows {
                    let line: Vec<&str> = row
                        .iter()
                        .map(|cell| {
                            cell.as_content().and_then(|c| c.text.as_deref()).unwrap_or("")
                        })
                        .collect();
                    out.push_str(&line.join(" | "));
                    out.push('\n');
                }
                out.push('\n');
            }
        }
        out
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        self.pages.last_mut().expect("page list is non-empty")
    }
}

impl DocumentSink for BufferedDocument {
    fn begin_page(&mut self) -> Result<()> {
        self.pages.push(Page::default());
        Ok(())
    }

    fn table(&mut self, rows: &[Vec<TableCell>], params: &TableParams) -> Result<()> {
        self.current_page().tables.push(TableBlock {
            rows: rows.to_vec(),
            params: params.clone(),
        });
        Ok(())
    }

    fn spacer(&mut self, _height: f32) -> Result<()> {
        Ok(())
    }

    fn rule(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    #[test]
    fn test_buffered_document_records_pages_and_blocks() {
        let mut doc = BufferedDocument::new();
        doc.begin_page().unwrap();
        doc.table(&[vec![Cell::text("a").into(), Cell::text("b").into()]], &TableParams::default())
            .unwrap();
        doc.begin_page().unwrap();
        doc.table(&[vec![Cell::text("c").into()]], &TableParams::default()).unwrap();

        assert_eq!(doc.pages().len(), 2);
        assert_eq!(doc.pages()[0].tables.len(), 1);
        let text = doc.to_plain_text();
        assert!(text.contains("a | b"));
        assert!(text.contains('\u{c}'), "pages are separated by a form feed");
    }
}
