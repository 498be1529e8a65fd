//! Lint pass for detecting floor plan defects.
//!
//! Runs over a complete document and reports mechanical issues without
//! rejecting the document: repeated ids, degenerate sizes, elements placed
//! off the canvas, seating that overlaps, and dangling zone references.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::types::{ElementId, ElementKind, FloorDocument, FloorElement};

/// A lint warning about a floor plan defect
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
    /// Elements involved, in document order
    pub elements: Vec<ElementId>,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    DuplicateId,
    Size,
    Bounds,
    Overlap,
    Zone,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::DuplicateId => write!(f, "duplicate-id"),
            LintCategory::Size => write!(f, "size"),
            LintCategory::Bounds => write!(f, "bounds"),
            LintCategory::Overlap => write!(f, "overlap"),
            LintCategory::Zone => write!(f, "zone"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Run all lint checks on a document.
pub fn check(doc: &FloorDocument) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_duplicate_ids(doc, &mut warnings);
    check_sizes(doc, &mut warnings);
    check_canvas_bounds(doc, &mut warnings);
    check_seating_overlaps(doc, &mut warnings);
    check_zone_references(doc, &mut warnings);
    warnings
}

fn display_name(el: &FloorElement) -> String {
    match &el.kind {
        ElementKind::Table { table_number, .. } => format!("table {} (\"{}\")", table_number, el.id),
        ElementKind::Zone { name, .. } => format!("zone {} (\"{}\")", name, el.id),
        kind => format!("{} \"{}\"", kind, el.id),
    }
}

fn check_duplicate_ids(doc: &FloorDocument, warnings: &mut Vec<LintWarning>) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for el in &doc.elements {
        *counts.entry(el.id.as_str()).or_default() += 1;
    }

    let mut reported = HashSet::new();
    for el in &doc.elements {
        let count = counts[el.id.as_str()];
        if count > 1 && reported.insert(el.id.as_str()) {
            warnings.push(LintWarning {
                category: LintCategory::DuplicateId,
                message: format!("id \"{}\" is used by {} elements", el.id, count),
                elements: vec![el.id.clone()],
            });
        }
    }
}

fn check_sizes(doc: &FloorDocument, warnings: &mut Vec<LintWarning>) {
    for el in &doc.elements {
        if !(el.bounds.w > 0.0 && el.bounds.h > 0.0) {
            warnings.push(LintWarning {
                category: LintCategory::Size,
                message: format!(
                    "{} has non-positive size {}x{}",
                    display_name(el),
                    el.bounds.w,
                    el.bounds.h
                ),
                elements: vec![el.id.clone()],
            });
        }
    }
}

fn check_canvas_bounds(doc: &FloorDocument, warnings: &mut Vec<LintWarning>) {
    let canvas = doc.canvas_bounds();
    for el in &doc.elements {
        if !canvas.encloses(&el.bounds) {
            warnings.push(LintWarning {
                category: LintCategory::Bounds,
                message: format!(
                    "{} at ({}, {}) extends past the {}x{} canvas",
                    display_name(el),
                    el.bounds.x,
                    el.bounds.y,
                    doc.width,
                    doc.height
                ),
                elements: vec![el.id.clone()],
            });
        }
    }
}

// Zones, walls and bars legitimately sit under or against tables, so only
// seating is compared against seating.
fn check_seating_overlaps(doc: &FloorDocument, warnings: &mut Vec<LintWarning>) {
    let seating: Vec<&FloorElement> = doc
        .elements
        .iter()
        .filter(|el| el.kind.is_seating())
        .collect();

    for (i, a) in seating.iter().enumerate() {
        for b in &seating[i + 1..] {
            if a.bounds.intersects(&b.bounds) {
                warnings.push(LintWarning {
                    category: LintCategory::Overlap,
                    message: format!("{} overlaps {}", display_name(a), display_name(b)),
                    elements: vec![a.id.clone(), b.id.clone()],
                });
            }
        }
    }
}

fn check_zone_references(doc: &FloorDocument, warnings: &mut Vec<LintWarning>) {
    let zones: HashSet<&str> = doc
        .elements
        .iter()
        .filter(|el| matches!(el.kind, ElementKind::Zone { .. }))
        .map(|el| el.id.as_str())
        .collect();

    for el in &doc.elements {
        if let Some(zone_id) = &el.zone_id {
            if !zones.contains(zone_id.as_str()) {
                warnings.push(LintWarning {
                    category: LintCategory::Zone,
                    message: format!(
                        "{} references missing zone \"{}\"",
                        display_name(el),
                        zone_id
                    ),
                    elements: vec![el.id.clone()],
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::types::Bounds;

    fn table(id: &str, number: &str, x: f64, y: f64) -> FloorElement {
        FloorElement::new(
            id,
            Bounds::new(x, y, 80.0, 80.0),
            ElementKind::Table {
                table_number: number.to_string(),
                seats: 4,
                table_id: None,
            },
        )
    }

    fn doc(elements: Vec<FloorElement>) -> FloorDocument {
        FloorDocument::new("v", "Hall", 800.0, 600.0).with_elements(elements)
    }

    #[test]
    fn test_clean_document_has_no_warnings() {
        let d = doc(vec![table("a", "1", 0.0, 0.0), table("b", "2", 100.0, 0.0)]);
        assert!(check(&d).is_empty());
    }

    #[test]
    fn test_overlapping_tables() {
        let d = doc(vec![table("a", "1", 0.0, 0.0), table("b", "2", 40.0, 40.0)]);
        let warnings = check(&d);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::Overlap);
        assert_eq!(
            warnings[0].elements,
            vec![ElementId::from("a"), ElementId::from("b")]
        );
    }

    #[test]
    fn test_table_on_zone_is_not_an_overlap() {
        let zone = FloorElement::new(
            "z",
            Bounds::new(0.0, 0.0, 200.0, 120.0),
            ElementKind::Zone {
                name: "Patio".to_string(),
                color: None,
            },
        );
        let d = doc(vec![zone, table("a", "1", 10.0, 10.0).with_zone("z")]);
        assert!(check(&d).is_empty());
    }

    #[test]
    fn test_off_canvas_element() {
        let d = doc(vec![table("a", "1", 760.0, 0.0)]);
        let warnings = check(&d);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::Bounds);
    }

    #[test]
    fn test_duplicate_ids_reported_once() {
        let d = doc(vec![
            table("a", "1", 0.0, 0.0),
            table("a", "2", 200.0, 0.0),
            table("a", "3", 400.0, 0.0),
        ]);
        let dupes: Vec<_> = check(&d)
            .into_iter()
            .filter(|w| w.category == LintCategory::DuplicateId)
            .collect();
        assert_eq!(dupes.len(), 1);
        assert!(dupes[0].message.contains("3 elements"));
    }

    #[test]
    fn test_dangling_zone_reference() {
        let d = doc(vec![table("a", "1", 0.0, 0.0).with_zone("gone")]);
        let warnings = check(&d);
        assert_eq!(warnings.len(), 1);
        insta::assert_snapshot!(
            warnings[0].to_string(),
            @r#"[zone] table 1 ("a") references missing zone "gone""#
        );
    }

    #[test]
    fn test_zero_size_element() {
        let mut el = table("a", "1", 0.0, 0.0);
        el.bounds.w = 0.0;
        let warnings = check(&doc(vec![el]));
        assert!(warnings.iter().any(|w| w.category == LintCategory::Size));
    }
}
