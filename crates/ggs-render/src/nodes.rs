//! Node descriptors for the header, main-info, and photo sections.
//!
//! Each node pulls one field out of the card snapshot and yields a cell
//! tuple: a heading cell followed by one or more value cells. The snapshot
//! is an explicit parameter so concurrent renders can never observe each
//! other's card.

use crate::cell::{Align, Cell, Style, TableCell};
use ggs_core::models::CardSnapshot;
use ggs_core::Result;
use std::fmt::Display;

/// Heading-cell style shared by every section
pub(crate) fn heading_cell(text: impl Into<String>) -> Cell {
    Cell::text(text)
        .aligned(Align::Left)
        .styled(Style::bold(12.0).with_fill((137, 173, 191)))
        .padded((0.0, 5.0, 0.0, 5.0))
}

/// Value-cell style shared by every section
pub(crate) fn value_cell(text: impl Into<String>) -> Cell {
    Cell::text(text)
        .aligned(Align::Center)
        .styled(Style::italic(11.0).with_fill((225, 236, 236)))
}

/// Format an optional value with a unit suffix, or a dash placeholder
pub(crate) fn format_or_dash<T: Display>(value: Option<T>, suffix: &str) -> String {
    match value {
        Some(value) => format!("{}{}", value, suffix),
        None => "-".to_string(),
    }
}

/// "Выше/Ниже уровня земли на …м" for the upper-mark height field
pub(crate) fn printable_sign_height(height: f64) -> String {
    let direction = if height >= 0.0 { "Выше" } else { "Ниже" };
    format!("{} уровня земли на {}м", direction, height.abs())
}

/// One field descriptor: pulls a cell tuple out of the snapshot
pub trait Node {
    fn to_representation(&self, snapshot: &CardSnapshot) -> Result<Vec<TableCell>>;
}

fn pair(header: &str, value: String) -> Vec<TableCell> {
    vec![heading_cell(header).into(), value_cell(value).into()]
}

pub struct ExecuteDateNode;

impl Node for ExecuteDateNode {
    fn to_representation(&self, snapshot: &CardSnapshot) -> Result<Vec<TableCell>> {
        let date = snapshot.card.execute_date.format("%d.%m.%Y");
        Ok(pair("Дата проведения работ", date.to_string()))
    }
}

/// Fixed institution banner; a single value cell with no heading
pub struct InstitutionNode;

impl Node for InstitutionNode {
    fn to_representation(&self, _snapshot: &CardSnapshot) -> Result<Vec<TableCell>> {
        Ok(vec![value_cell("Управление Росреестра по Приморскому краю").into()])
    }
}

pub struct FederalSubjectNode;

impl Node for FederalSubjectNode {
    fn to_representation(&self, snapshot: &CardSnapshot) -> Result<Vec<TableCell>> {
        Ok(pair("Субъект РФ", snapshot.coordinates.federal_subject.clone()))
    }
}

pub struct ExecutorInfoNode;

impl Node for ExecutorInfoNode {
    fn to_representation(&self, snapshot: &CardSnapshot) -> Result<Vec<TableCell>> {
        Ok(pair("Кем выполнены работы", snapshot.card.executor.full_name()))
    }
}

pub struct CoordinatesNode;

impl Node for CoordinatesNode {
    fn to_representation(&self, snapshot: &CardSnapshot) -> Result<Vec<TableCell>> {
        Ok(pair("Координаты пункта", snapshot.coordinates.printable().join("      ")))
    }
}

pub struct PointIndexNode;

impl Node for PointIndexNode {
    fn to_representation(&self, snapshot: &CardSnapshot) -> Result<Vec<TableCell>> {
        let value = format_or_dash(snapshot.card.point_index.as_deref(), "");
        Ok(pair("№ по каталогу/индекс пункта", value))
    }
}

pub struct PointNameNode;

impl Node for PointNameNode {
    fn to_representation(&self, snapshot: &CardSnapshot) -> Result<Vec<TableCell>> {
        let value = format_or_dash(snapshot.card.name_point.as_deref(), "");
        Ok(pair("Название пункта, класс, № марки", value))
    }
}

pub struct YearOfLayingNode;

impl Node for YearOfLayingNode {
    fn to_representation(&self, snapshot: &CardSnapshot) -> Result<Vec<TableCell>> {
        let value = format_or_dash(snapshot.card.year_of_laying, "г");
        Ok(pair("Год закладки", value))
    }
}

pub struct SignHeightNode;

impl Node for SignHeightNode {
    fn to_representation(&self, snapshot: &CardSnapshot) -> Result<Vec<TableCell>> {
        Ok(pair("Высота знака", format!("{}м", snapshot.card.sign_height)))
    }
}

pub struct TypeOfCenterNode;

impl Node for TypeOfCenterNode {
    fn to_representation(&self, snapshot: &CardSnapshot) -> Result<Vec<TableCell>> {
        let value = format_or_dash(snapshot.card.type_of_center.as_deref(), "");
        Ok(pair("Тип центра", value))
    }
}

pub struct HeightAboveSeaLevelNode;

impl Node for HeightAboveSeaLevelNode {
    fn to_representation(&self, snapshot: &CardSnapshot) -> Result<Vec<TableCell>> {
        let value = format_or_dash(snapshot.card.height_above_sea_level, "м");
        Ok(pair("Высота над уровнем моря", value))
    }
}

pub struct TrapezoidsNode;

impl Node for TrapezoidsNode {
    fn to_representation(&self, snapshot: &CardSnapshot) -> Result<Vec<TableCell>> {
        let value = format_or_dash(snapshot.card.trapezoids.as_deref(), "");
        Ok(pair("Трапеции", value))
    }
}

/// Type of sign: the tag label plus one value line per declared sub-property
pub struct TypeOfSignNode;

impl Node for TypeOfSignNode {
    fn to_representation(&self, snapshot: &CardSnapshot) -> Result<Vec<TableCell>> {
        let mut tuple: Vec<TableCell> = vec![heading_cell("Тип знака").into()];
        for line in snapshot.card.type_of_sign.sign.describe() {
            tuple.push(value_cell(line).into());
        }
        Ok(tuple)
    }
}

pub struct SignHeightAboveGroundLevelNode;

impl Node for SignHeightAboveGroundLevelNode {
    fn to_representation(&self, snapshot: &CardSnapshot) -> Result<Vec<TableCell>> {
        let height = snapshot.card.sign_height_above_ground_level;
        Ok(pair("Высота верхней марки", printable_sign_height(height)))
    }
}

/// Photo attachments: a centered heading over one image cell per photo
pub struct PhotosNode;

impl Node for PhotosNode {
    fn to_representation(&self, snapshot: &CardSnapshot) -> Result<Vec<TableCell>> {
        let mut tuple: Vec<TableCell> =
            vec![heading_cell("Фотографии пункта").aligned(Align::Center).into()];
        for photo in &snapshot.photos {
            tuple.push(Cell::image(photo).fill_width().into());
        }
        Ok(tuple)
    }
}

/// The header section, in layout order
pub fn header_nodes() -> Vec<Box<dyn Node>> {
    vec![
        Box::new(ExecuteDateNode),
        Box::new(InstitutionNode),
        Box::new(FederalSubjectNode),
        Box::new(ExecutorInfoNode),
        Box::new(CoordinatesNode),
    ]
}

/// The main-info section, in layout order
pub fn main_nodes() -> Vec<Box<dyn Node>> {
    vec![
        Box::new(PointIndexNode),
        Box::new(PointNameNode),
        Box::new(YearOfLayingNode),
        Box::new(SignHeightNode),
        Box::new(TypeOfCenterNode),
        Box::new(HeightAboveSeaLevelNode),
        Box::new(TrapezoidsNode),
        Box::new(TypeOfSignNode),
        Box::new(SignHeightAboveGroundLevelNode),
    ]
}

/// Evaluate a node list into cell tuples against one snapshot
pub fn represent(nodes: &[Box<dyn Node>], snapshot: &CardSnapshot) -> Result<Vec<Vec<TableCell>>> {
    nodes.iter().map(|node| node.to_representation(snapshot)).collect()
}
