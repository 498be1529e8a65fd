//! Core types for floor documents

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height of an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }
}

/// Placement of an element on the canvas
///
/// `rotation` is in degrees, clockwise. Elements without an explicit
/// rotation are unrotated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl Bounds {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            rotation: None,
        }
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Top-left corner
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Check if this box contains a point (edges inclusive)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Check if this box overlaps another; touching edges do not count
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Check if `other` lies entirely inside this box
    pub fn encloses(&self, other: &Bounds) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Same box moved by `delta`
    pub fn translate(&self, delta: Point) -> Bounds {
        Bounds {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }

    /// Same box with its origin moved to `origin`
    pub fn at(&self, origin: Point) -> Bounds {
        Bounds {
            x: origin.x,
            y: origin.y,
            ..*self
        }
    }
}

/// Identifier of an element, unique within a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Kind-specific data of a floor element
///
/// Serialized with a `type` discriminant next to the element's shared
/// fields, e.g. `{"id": "el-1", "x": 0, ..., "type": "table", "tableNumber": "4", "seats": 2}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ElementKind {
    Table {
        table_number: String,
        seats: u32,
        /// Backend table record this element is linked to
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table_id: Option<String>,
    },
    TableGroup {
        table_numbers: Vec<String>,
        seats: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table_ids: Option<Vec<String>>,
    },
    Bar {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Zone {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    Wall,
    Entrance {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl ElementKind {
    /// The wire discriminant of this kind
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Table { .. } => "table",
            ElementKind::TableGroup { .. } => "tableGroup",
            ElementKind::Bar { .. } => "bar",
            ElementKind::Zone { .. } => "zone",
            ElementKind::Wall => "wall",
            ElementKind::Entrance { .. } => "entrance",
        }
    }

    /// Tables and table groups seat guests
    pub fn is_seating(&self) -> bool {
        matches!(
            self,
            ElementKind::Table { .. } | ElementKind::TableGroup { .. }
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One placeable object on the floor plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorElement {
    pub id: ElementId,
    #[serde(flatten)]
    pub bounds: Bounds,
    /// Zone element this element belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<ElementId>,
    /// Paint and selection order, higher on top
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<u32>,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl FloorElement {
    pub fn new(id: impl Into<ElementId>, bounds: Bounds, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            bounds,
            zone_id: None,
            z_index: None,
            kind,
        }
    }

    pub fn with_zone(mut self, zone_id: impl Into<ElementId>) -> Self {
        self.zone_id = Some(zone_id.into());
        self
    }

    pub fn with_z_index(mut self, z_index: u32) -> Self {
        self.z_index = Some(z_index);
        self
    }
}

fn initial_version() -> u32 {
    1
}

/// The canonical representation of one venue floor plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorDocument {
    pub id: String,
    #[serde(alias = "tenantId")]
    pub venue_id: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub elements: Vec<FloorElement>,
    #[serde(default = "initial_version")]
    pub version: u32,
}

impl FloorDocument {
    /// Create the first layout of a venue: no elements, version 1
    pub fn new(venue_id: impl Into<String>, name: impl Into<String>, width: f64, height: f64) -> Self {
        let venue_id = venue_id.into();
        Self {
            id: format!("canvas-{}-1", venue_id),
            venue_id,
            name: name.into(),
            width,
            height,
            elements: Vec::new(),
            version: initial_version(),
        }
    }

    /// Replace the element list
    pub fn with_elements(mut self, elements: Vec<FloorElement>) -> Self {
        self.elements = elements;
        self
    }

    /// The canvas rectangle anchored at the origin
    pub fn canvas_bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.height)
    }

    pub fn element(&self, id: &str) -> Option<&FloorElement> {
        self.elements.iter().find(|el| el.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    /// Highest z-index in use; elements without one count as 0
    pub fn max_z_index(&self) -> u32 {
        self.elements
            .iter()
            .map(|el| el.z_index.unwrap_or(0))
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_edges() {
        let b = Bounds::new(10.0, 20.0, 80.0, 40.0);
        assert_eq!(b.right(), 90.0);
        assert_eq!(b.bottom(), 60.0);
        assert_eq!(b.center(), Point::new(50.0, 40.0));
    }

    #[test]
    fn test_bounds_intersects_ignores_touching_edges() {
        let a = Bounds::new(0.0, 0.0, 80.0, 80.0);
        let b = Bounds::new(80.0, 0.0, 80.0, 80.0);
        let c = Bounds::new(79.0, 79.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_translate_keeps_size_and_rotation() {
        let b = Bounds::new(0.0, 0.0, 60.0, 20.0).with_rotation(90.0);
        let moved = b.translate(Point::new(40.0, -10.0));
        assert_eq!(moved, Bounds::new(40.0, -10.0, 60.0, 20.0).with_rotation(90.0));
    }

    #[test]
    fn test_initial_document() {
        let doc = FloorDocument::new("venue-1", "Main Hall", 1200.0, 800.0);
        assert_eq!(doc.id, "canvas-venue-1-1");
        assert_eq!(doc.venue_id, "venue-1");
        assert!(doc.elements.is_empty());
        assert_eq!(doc.version, 1);
    }

    #[test]
    fn test_max_z_index_treats_missing_as_zero() {
        let doc = FloorDocument::new("v", "n", 100.0, 100.0).with_elements(vec![
            FloorElement::new("a", Bounds::new(0.0, 0.0, 10.0, 10.0), ElementKind::Wall),
            FloorElement::new("b", Bounds::new(0.0, 0.0, 10.0, 10.0), ElementKind::Wall)
                .with_z_index(7),
        ]);
        assert_eq!(doc.max_z_index(), 7);
        assert_eq!(FloorDocument::new("v", "n", 1.0, 1.0).max_z_index(), 0);
    }

    #[test]
    fn test_kind_names_match_wire_discriminants() {
        let group = ElementKind::TableGroup {
            table_numbers: vec![],
            seats: 0,
            table_ids: None,
        };
        assert_eq!(group.name(), "tableGroup");
        assert!(group.is_seating());
        assert!(!ElementKind::Wall.is_seating());
    }
}
