//! GGS Render - card-to-document layout
//!
//! A declarative pipeline turning a read-only card snapshot into span-padded
//! table blocks for a paginated document sink: node descriptors pull fields
//! into header/value cell pairs, the row batcher packs them into a fixed
//! column count, and the renderer drives the fixed section sequence. The
//! sink owns pagination, fonts, and physical output.

pub mod cell;
pub mod document;
pub mod nodes;
pub mod render;
pub mod table;
pub mod template;

pub use cell::{Align, Cell, Emphasis, Span, Style, TableCell};
pub use document::{BufferedDocument, DocumentSink, HeadingsDisplay, TableParams};
pub use render::CardRenderer;
pub use table::dynamic_row_table;
