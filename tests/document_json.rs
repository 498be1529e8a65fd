//! Integration tests for the floor document wire format, actions, and lint

use floor_editor::document::{lint, LintCategory};
use floor_editor::{
    reduce, Action, Bounds, DocumentError, EditorState, ElementKind, FloorDocument, FloorElement,
};
use pretty_assertions::assert_eq;

const MAIN_HALL: &str = include_str!("fixtures/main_hall.json");

fn main_hall() -> FloorDocument {
    FloorDocument::from_json(MAIN_HALL).expect("fixture should parse")
}

#[test]
fn test_fixture_parses_every_kind() {
    let doc = main_hall();
    assert_eq!(doc.id, "canvas-venue-7-1");
    assert_eq!(doc.venue_id, "venue-7");
    assert_eq!(doc.version, 4);
    assert_eq!(doc.elements.len(), 6);

    let kinds: Vec<_> = doc.elements.iter().map(|e| e.kind.name()).collect();
    assert_eq!(
        kinds,
        vec!["zone", "table", "tableGroup", "bar", "wall", "entrance"]
    );

    let table = doc.element("el-table-1").unwrap();
    assert_eq!(
        table.kind,
        ElementKind::Table {
            table_number: "1".to_string(),
            seats: 4,
            table_id: Some("tbl-001".to_string()),
        }
    );
    assert_eq!(table.zone_id.as_ref().map(|z| z.as_str()), Some("el-zone-patio"));

    let bar = doc.element("el-bar").unwrap();
    assert_eq!(bar.bounds, Bounds::new(800.0, 40.0, 120.0, 60.0).with_rotation(90.0));
    assert_eq!(doc.element("el-wall").unwrap().z_index, None);
    assert_eq!(doc.max_z_index(), 4);
}

#[test]
fn test_fixture_is_valid_and_lint_clean() {
    let doc = main_hall();
    assert!(doc.validate().is_ok());
    assert_eq!(lint::check(&doc), vec![]);
}

#[test]
fn test_serialized_element_shape() {
    let doc = main_hall();
    let value = serde_json::to_value(doc.element("el-table-1").unwrap()).unwrap();
    assert_eq!(value["type"], "table");
    assert_eq!(value["tableNumber"], "1");
    assert_eq!(value["tableId"], "tbl-001");
    assert_eq!(value["zoneId"], "el-zone-patio");
    assert_eq!(value["zIndex"], 2);
    assert_eq!(value["x"], 40.0);
    assert!(value.get("rotation").is_none());

    let wall = serde_json::to_value(doc.element("el-wall").unwrap()).unwrap();
    assert_eq!(wall["type"], "wall");
    assert!(wall.get("zIndex").is_none());
    assert!(wall.get("zoneId").is_none());
}

#[test]
fn test_pretty_json_reloads_identically() {
    let doc = main_hall();
    let json = doc.to_json_pretty().unwrap();
    assert!(json.contains("\"venueId\": \"venue-7\""));
    assert_eq!(FloorDocument::from_json(&json).unwrap(), doc);
}

#[test]
fn test_tenant_id_alias_and_defaults() {
    let doc = FloorDocument::from_json(
        r#"{"id": "c", "tenantId": "t-1", "name": "Loft", "width": 300, "height": 200}"#,
    )
    .unwrap();
    assert_eq!(doc.venue_id, "t-1");
    assert!(doc.elements.is_empty());
    assert_eq!(doc.version, 1);
}

#[test]
fn test_malformed_json_is_error() {
    let err = FloorDocument::from_json(r#"{"id": "c", "elements": [}"#).unwrap_err();
    assert!(matches!(err, DocumentError::Json(_)));
}

#[test]
fn test_validate_rejects_broken_documents() {
    let mut doc = main_hall();
    let mut copy = doc.elements[1].clone();
    copy.bounds.x += 10.0;
    doc.elements.push(copy);
    assert!(matches!(
        doc.validate(),
        Err(DocumentError::DuplicateId { ref id }) if id.as_str() == "el-table-1"
    ));

    let mut doc = main_hall();
    doc.elements[4].bounds.w = 0.0;
    assert!(matches!(doc.validate(), Err(DocumentError::InvalidSize { .. })));
}

#[test]
fn test_lint_reports_each_category() {
    let mut doc = main_hall();
    // Overlaps table 1 and points at a zone that does not exist
    let mut stray = doc.elements[1].clone();
    stray.id = "el-stray".into();
    stray.bounds = Bounds::new(60.0, 460.0, 80.0, 80.0);
    stray.zone_id = Some("el-missing-zone".into());
    doc.elements.push(stray);

    let mut off_canvas = doc.elements[5].clone();
    off_canvas.id = "el-door-2".into();
    off_canvas.bounds.x = 1180.0;
    doc.elements.push(off_canvas);

    let duplicate = doc.elements[4].clone();
    doc.elements.push(duplicate);

    let mut flat = doc.elements[3].clone();
    flat.id = "el-flat".into();
    flat.bounds.h = 0.0;
    doc.elements.push(flat);

    let categories: Vec<LintCategory> = lint::check(&doc).iter().map(|w| w.category).collect();
    for expected in [
        LintCategory::DuplicateId,
        LintCategory::Size,
        LintCategory::Bounds,
        LintCategory::Overlap,
        LintCategory::Zone,
    ] {
        assert!(
            categories.contains(&expected),
            "missing {} in {:?}",
            expected,
            categories
        );
    }
}

#[test]
fn test_actions_from_json_drive_the_reducer() {
    let state = EditorState::new(main_hall());

    let update = Action::from_json(
        r#"{"type": "UPDATE_ELEMENT",
            "payload": {"id": "el-table-1", "bounds": {"x": 10, "y": 450, "w": 80, "h": 80}, "seats": 6}}"#,
    )
    .unwrap();
    let state = reduce(state, update);
    let table = state.layout().element("el-table-1").unwrap();
    assert_eq!(table.bounds.origin().x, 10.0);
    match &table.kind {
        ElementKind::Table { seats, .. } => assert_eq!(*seats, 6),
        other => panic!("Expected table, got {:?}", other),
    }

    let add = Action::from_json(
        r#"{"type": "ADD_ELEMENT",
            "payload": {"element": {"id": "el-new", "type": "bar", "x": 0, "y": 0, "w": 0, "h": 0},
                        "x": 900, "y": 600}}"#,
    )
    .unwrap();
    let state = reduce(state, add);
    let bar: &FloorElement = state.layout().element("el-new").unwrap();
    assert_eq!(bar.bounds, Bounds::new(900.0, 600.0, 80.0, 80.0));
    assert_eq!(bar.z_index, Some(5));

    let remove =
        Action::from_json(r#"{"type": "REMOVE_ELEMENT", "payload": {"id": "el-wall"}}"#).unwrap();
    let state = reduce(state, remove);
    assert!(!state.layout().contains("el-wall"));

    let state = reduce(state, Action::from_json(r#"{"type": "UNDO"}"#).unwrap());
    assert!(state.layout().contains("el-wall"));
    assert_eq!(state.history().len(), 4);
    assert_eq!(state.history_index(), 2);
}

#[test]
fn test_action_serializes_with_type_and_payload() {
    let action = Action::RemoveElement { id: "el-1".into() };
    let value = serde_json::to_value(&action).unwrap();
    assert_eq!(value, serde_json::json!({"type": "REMOVE_ELEMENT", "payload": {"id": "el-1"}}));
}
