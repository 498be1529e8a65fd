//! End-to-end tests replaying edit scripts against a venue floor

use floor_editor::document::lint;
use floor_editor::editor::UnknownKindPolicy;
use floor_editor::{
    apply_script_with_config, parse, Bounds, EditError, Editor, EditorConfig, EditorState,
    ElementKind, FloorDocument, Interpreter, Point, ScriptError, SequentialIds,
};
use pretty_assertions::assert_eq;

const MAIN_HALL: &str = include_str!("fixtures/main_hall.json");
const EVENING: &str = include_str!("fixtures/evening.floor");

fn main_hall() -> FloorDocument {
    FloorDocument::from_json(MAIN_HALL).expect("fixture should parse")
}

fn run(source: &str) -> Result<EditorState, EditError> {
    apply_script_with_config(
        main_hall(),
        source,
        &EditorConfig::default(),
        SequentialIds::default(),
    )
}

fn bounds_of(state: &EditorState, id: &str) -> Bounds {
    state
        .layout()
        .element(id)
        .unwrap_or_else(|| panic!("{} should be on the floor", id))
        .bounds
}

#[test]
fn test_evening_setup() {
    let state = run(EVENING).unwrap();
    let layout = state.layout();

    // Six original elements plus five new ones; the door removal was undone
    assert_eq!(layout.elements.len(), 11);
    assert!(layout.contains("el-door"));
    assert!(state.can_redo());
    assert_eq!(state.history().len(), 12);
    assert_eq!(state.history_index(), 10);

    let ids: Vec<_> = layout.elements[6..].iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["el-1", "el-2", "el-3", "el-4", "el-5"]);

    let terrace = layout.element("el-1").unwrap();
    assert_eq!(terrace.bounds, Bounds::new(620.0, 420.0, 200.0, 120.0));
    assert_eq!(
        terrace.kind,
        ElementKind::Zone {
            name: "Terrace".to_string(),
            color: Some("#ccaa66".to_string()),
        }
    );
    assert_eq!(terrace.z_index, Some(5));

    // Moved by a relative offset after being placed
    let t10 = layout.element("el-2").unwrap();
    assert_eq!(t10.bounds.origin(), Point::new(640.0, 460.0));
    assert_eq!(t10.zone_id.as_ref().map(|z| z.as_str()), Some("el-1"));

    let banquet = layout.element("el-4").unwrap();
    assert_eq!(banquet.bounds, Bounds::new(640.0, 600.0, 240.0, 80.0));
    match &banquet.kind {
        ElementKind::TableGroup {
            table_numbers,
            seats,
            ..
        } => {
            assert_eq!(table_numbers, &vec!["20", "21", "22"]);
            assert_eq!(*seats, 12);
        }
        other => panic!("Expected table group, got {:?}", other),
    }

    // The duplicate keeps its source's zone and paint order
    let t12 = layout.element("el-5").unwrap();
    assert_eq!(t12.bounds.origin(), Point::new(840.0, 440.0));
    assert_eq!(t12.zone_id.as_ref().map(|z| z.as_str()), Some("el-1"));
    assert_eq!(t12.z_index, layout.element("el-3").unwrap().z_index);
    match &t12.kind {
        ElementKind::Table { table_number, .. } => assert_eq!(table_number, "12"),
        other => panic!("Expected table, got {:?}", other),
    }

    assert_eq!(bounds_of(&state, "el-table-1").origin(), Point::new(500.0, 440.0));
    match &layout.element("el-group-1").unwrap().kind {
        ElementKind::TableGroup { seats, .. } => assert_eq!(*seats, 10),
        other => panic!("Expected table group, got {:?}", other),
    }

    assert_eq!(lint::check(layout), vec![]);
}

#[test]
fn test_evening_setup_can_be_walked_back() {
    let mut state = run(EVENING).unwrap();
    while state.can_undo() {
        state = state.reduce(floor_editor::Action::Undo);
    }
    assert_eq!(state.layout(), &main_hall());
}

#[test]
fn test_interpreter_keeps_bindings() {
    let script = parse(EVENING).unwrap();
    let mut editor = Editor::from_config(
        main_hall(),
        &EditorConfig::default(),
        SequentialIds::default(),
    );
    let mut interpreter = Interpreter::new(&mut editor);
    interpreter.run(&script).unwrap();

    for (name, id) in [
        ("terrace", "el-1"),
        ("t10", "el-2"),
        ("t11", "el-3"),
        ("banquet", "el-4"),
        ("t12", "el-5"),
    ] {
        assert_eq!(interpreter.binding(name).map(|id| id.as_str()), Some(id));
    }
    assert_eq!(interpreter.bindings().len(), 5);
}

#[test]
fn test_unknown_name_suggests_bound_names() {
    let source = format!("{}\nmove t13 by 10, 0", EVENING);
    let err = run(&source).unwrap_err();
    match &err {
        EditError::Script(ScriptError::UnknownReference { name, suggestions, .. }) => {
            assert_eq!(name, "t13");
            assert!(suggestions.iter().any(|s| s == "t12"), "{:?}", suggestions);
        }
        other => panic!("Expected unknown reference, got {:?}", other),
    }

    let rendered = err.format(&source, "evening.floor");
    assert!(rendered.contains("evening.floor"));
    assert!(rendered.contains("t13"));
    assert!(rendered.contains("t12"));
}

#[test]
fn test_unknown_id_suggests_layout_ids() {
    let err = run(r#"remove "el-tabel-1""#).unwrap_err();
    match err {
        EditError::Script(ScriptError::ElementNotFound { id, suggestions, .. }) => {
            assert_eq!(id, "el-tabel-1");
            assert_eq!(suggestions.first().map(String::as_str), Some("el-table-1"));
        }
        other => panic!("Expected element not found, got {:?}", other),
    }
}

#[test]
fn test_first_error_stops_the_run() {
    let source = "add wall w1 at 0, 0\nupdate w1 [seats: 4]\nadd wall w2";
    let err = run(source).unwrap_err();
    let span = match &err {
        EditError::Script(e @ ScriptError::UnknownField { .. }) => e.span().clone(),
        other => panic!("Expected unknown field, got {:?}", other),
    };
    assert_eq!(&source[span], "seats");
}

#[test]
fn test_parse_errors_report_position() {
    let source = "add table t1 [number: \"1\", seats: 4] at 10\nundo";
    let err = run(source).unwrap_err();
    let errors = match &err {
        EditError::Parse(errors) => errors,
        other => panic!("Expected parse errors, got {:?}", other),
    };
    assert!(!errors.is_empty());
    assert!(errors[0].span().start >= source.find("at").unwrap());
    assert!(err.format(source, "bad.floor").contains("bad.floor"));
}

#[test]
fn test_grid_config_snaps_script_geometry() {
    let config = EditorConfig::from_str(
        r#"
        [grid]
        cell_size = 40
        snap = true
        "#,
    )
    .unwrap();
    let state = apply_script_with_config(
        main_hall(),
        "add table t1 [number: \"9\", seats: 2] at 655, 418\nresize t1 to 90, 50\nmove t1 by 15, 25",
        &config,
        SequentialIds::default(),
    )
    .unwrap();
    assert_eq!(bounds_of(&state, "el-1"), Bounds::new(640.0, 440.0, 80.0, 40.0));
}

#[test]
fn test_reject_policy_fails_unknown_kinds() {
    let config = EditorConfig::new().with_unknown_kind_policy(UnknownKindPolicy::Reject);
    let source = "add wall\nadd sofa s1 at 10, 10";
    let err = apply_script_with_config(main_hall(), source, &config, SequentialIds::default())
        .unwrap_err();
    match &err {
        EditError::Script(e @ ScriptError::Factory { .. }) => {
            assert_eq!(&source[e.span().clone()], "sofa");
        }
        other => panic!("Expected factory error, got {:?}", other),
    }

    // The default policy builds a wall instead
    let state = run(source).unwrap();
    let sofa = state.layout().element("el-2").unwrap();
    assert_eq!(sofa.kind, ElementKind::Wall);
    assert_eq!(sofa.bounds.origin(), Point::new(10.0, 10.0));
}

#[test]
fn test_resize_respects_configured_minimum() {
    let config = EditorConfig::new().with_min_size(60.0, 30.0);
    let state = apply_script_with_config(
        main_hall(),
        r#"resize "el-bar" to 10, 10"#,
        &config,
        SequentialIds::default(),
    )
    .unwrap();
    let bar = bounds_of(&state, "el-bar");
    assert_eq!((bar.w, bar.h), (60.0, 30.0));
    assert_eq!(bar.rotation, Some(90.0));
}

#[test]
fn test_add_over_top_z_index_does_not_overflow() {
    let state = run("add wall top [z: 4294967295]\nadd wall").unwrap();
    let layout = state.layout();
    assert_eq!(layout.element("el-1").unwrap().z_index, Some(u32::MAX));
    assert_eq!(layout.element("el-2").unwrap().z_index, Some(u32::MAX));
    assert_eq!(layout.elements.len(), 8);
}
