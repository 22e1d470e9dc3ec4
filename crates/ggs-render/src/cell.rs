//! Table cells and span markers.
//!
//! A cell carries only the hints the document sink needs: text or an image
//! reference, alignment, an emphasis style, and padding. Unset fields fall
//! back to a template cell via [`Cell::merge`], mirroring how each section
//! keeps one heading template and one value template.

use std::path::PathBuf;

/// Horizontal cell alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Font emphasis for a cell style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Regular,
    Bold,
    Italic,
}

/// Visual style hints for a cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub emphasis: Emphasis,
    pub size_pt: f32,
    pub fill: Option<(u8, u8, u8)>,
}

impl Style {
    pub fn bold(size_pt: f32) -> Self {
        Self { emphasis: Emphasis::Bold, size_pt, fill: None }
    }

    pub fn italic(size_pt: f32) -> Self {
        Self { emphasis: Emphasis::Italic, size_pt, fill: None }
    }

    pub fn with_fill(mut self, fill: (u8, u8, u8)) -> Self {
        self.fill = Some(fill);
        self
    }
}

/// One content cell of a table block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub text: Option<String>,
    pub align: Option<Align>,
    pub style: Option<Style>,
    pub image: Option<PathBuf>,
    pub image_fill_width: Option<bool>,
    /// (top, right, bottom, left)
    pub padding: Option<(f32, f32, f32, f32)>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), ..Self::default() }
    }

    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self { image: Some(path.into()), ..Self::default() }
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn styled(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn padded(mut self, padding: (f32, f32, f32, f32)) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn fill_width(mut self) -> Self {
        self.image_fill_width = Some(true);
        self
    }

    /// Fill unset fields from a template cell; fields set on `self` win
    pub fn merge(self, template: &Cell) -> Cell {
        Cell {
            text: self.text.or_else(|| template.text.clone()),
            align: self.align.or(template.align),
            style: self.style.or(template.style),
            image: self.image.or_else(|| template.image.clone()),
            image_fill_width: self.image_fill_width.or(template.image_fill_width),
            padding: self.padding.or(template.padding),
        }
    }
}

/// Merge marker padding a ragged table out to its full column count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// Merge with the cell above
    Row,
    /// Merge with the cell to the left
    Col,
}

/// A slot in an output table row
#[derive(Debug, Clone, PartialEq)]
pub enum TableCell {
    Content(Cell),
    Span(Span),
}

impl From<Cell> for TableCell {
    fn from(cell: Cell) -> Self {
        Self::Content(cell)
    }
}

impl From<Span> for TableCell {
    fn from(span: Span) -> Self {
        Self::Span(span)
    }
}

impl TableCell {
    pub fn as_content(&self) -> Option<&Cell> {
        match self {
            Self::Content(cell) => Some(cell),
            Self::Span(_) => None,
        }
    }

    pub fn is_span(&self, span: Span) -> bool {
        matches!(self, Self::Span(s) if *s == span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_own_fields() {
        let template = Cell::text("fallback").aligned(Align::Center).styled(Style::bold(12.0));
        let merged = Cell::text("own").aligned(Align::Left).merge(&template);
        assert_eq!(merged.text.as_deref(), Some("own"));
        assert_eq!(merged.align, Some(Align::Left));
        assert_eq!(merged.style, Some(Style::bold(12.0)), "unset style falls back");
    }

    #[test]
    fn test_merge_keeps_template_padding() {
        let template = Cell::default().padded((0.0, 5.0, 0.0, 5.0));
        let merged = Cell::text("x").merge(&template);
        assert_eq!(merged.padding, Some((0.0, 5.0, 0.0, 5.0)));
    }
}
