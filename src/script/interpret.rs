//! Replays parsed edit scripts against an [`Editor`]

use std::collections::HashMap;

use tracing::debug;

use crate::document::{ElementId, ElementKind, FloorElement, Point, Size};
use crate::editor::{Editor, ElementPatch, ElementToAdd, IdGenerator};
use crate::interaction::{DragResizeMode, DragTracker, GridSnap, ResizeTracker, DEFAULT_MIN_SIZE};
use crate::parser::ast::*;

use super::error::ScriptError;
use super::find_similar;

/// Fields every element accepts
const GEOMETRY_FIELDS: &[&str] = &["x", "y", "w", "h", "rotation"];

/// Fields only accepted when adding
const PLACEMENT_FIELDS: &[&str] = &["zone", "z"];

/// Which kind-specific fields a statement may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KindFields {
    Table,
    TableGroup,
    Bar,
    Zone,
    Wall,
    Entrance,
    Unknown,
}

impl KindFields {
    fn for_add(kind: &str) -> Self {
        match kind {
            "table" => Self::Table,
            "group" | "tableGroup" | "table_group" => Self::TableGroup,
            "bar" => Self::Bar,
            "zone" => Self::Zone,
            "wall" => Self::Wall,
            "entrance" => Self::Entrance,
            _ => Self::Unknown,
        }
    }

    fn of(kind: &ElementKind) -> Self {
        match kind {
            ElementKind::Table { .. } => Self::Table,
            ElementKind::TableGroup { .. } => Self::TableGroup,
            ElementKind::Bar { .. } => Self::Bar,
            ElementKind::Zone { .. } => Self::Zone,
            ElementKind::Wall => Self::Wall,
            ElementKind::Entrance { .. } => Self::Entrance,
        }
    }

    fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Table => &["number", "seats"],
            Self::TableGroup => &["numbers", "seats"],
            Self::Bar | Self::Entrance => &["label"],
            Self::Zone => &["name", "color"],
            Self::Wall | Self::Unknown => &[],
        }
    }
}

/// Field block checked against the keys a statement accepts
struct Fields<'a> {
    owner: String,
    fields: &'a [Spanned<Field>],
    span: Span,
}

impl<'a> Fields<'a> {
    fn check(
        owner: impl Into<String>,
        fields: &'a [Spanned<Field>],
        allowed: &[&str],
        span: Span,
    ) -> Result<Self, ScriptError> {
        let owner = owner.into();
        for field in fields {
            let key = field.node.key.node.as_str();
            if !allowed.contains(&key) {
                return Err(ScriptError::unknown_field(
                    owner,
                    key,
                    field.node.key.span.clone(),
                    find_similar(allowed.iter().copied(), key, 2),
                ));
            }
        }
        Ok(Self {
            owner,
            fields,
            span,
        })
    }

    /// Last occurrence wins
    fn get(&self, key: &str) -> Option<&'a Spanned<Value>> {
        self.fields
            .iter()
            .rev()
            .find(|f| f.node.key.node.as_str() == key)
            .map(|f| &f.node.value)
    }

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn required<T>(&self, key: &'static str, value: Option<T>) -> Result<T, ScriptError> {
        value.ok_or_else(|| ScriptError::missing_field(self.owner.clone(), key, self.span.clone()))
    }

    fn number(&self, key: &str) -> Result<Option<f64>, ScriptError> {
        match self.get(key) {
            None => Ok(None),
            Some(Spanned {
                node: Value::Number(n),
                ..
            }) => Ok(Some(*n)),
            Some(other) => Err(mismatch(key, "number", other)),
        }
    }

    /// Positive length, used for `w` and `h`
    fn length(&self, key: &str) -> Result<Option<f64>, ScriptError> {
        match self.number(key)? {
            Some(n) if !(n > 0.0) => Err(ScriptError::invalid_value(
                key,
                format!("must be positive, got {}", n),
                self.span_of(key),
            )),
            other => Ok(other),
        }
    }

    fn count(&self, key: &str) -> Result<Option<u32>, ScriptError> {
        match self.number(key)? {
            None => Ok(None),
            Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => Ok(Some(n as u32)),
            Some(n) => Err(ScriptError::invalid_value(
                key,
                format!("expected a whole number, got {}", n),
                self.span_of(key),
            )),
        }
    }

    fn text(&self, key: &str) -> Result<Option<String>, ScriptError> {
        match self.get(key) {
            None => Ok(None),
            Some(Spanned {
                node: Value::String(s),
                ..
            }) => Ok(Some(s.clone())),
            Some(other) => Err(mismatch(key, "string", other)),
        }
    }

    fn color(&self, key: &str) -> Result<Option<String>, ScriptError> {
        match self.get(key) {
            None => Ok(None),
            Some(Spanned {
                node: Value::Color(s) | Value::String(s),
                ..
            }) => Ok(Some(s.clone())),
            Some(other) => Err(mismatch(key, "color", other)),
        }
    }

    /// Table numbers may be written as strings or bare numbers
    fn table_number(&self, key: &str) -> Result<Option<String>, ScriptError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => table_number(key, value).map(Some),
        }
    }

    fn table_numbers(&self, key: &str) -> Result<Option<Vec<String>>, ScriptError> {
        match self.get(key) {
            None => Ok(None),
            Some(Spanned {
                node: Value::List(items),
                ..
            }) => items
                .iter()
                .map(|item| table_number(key, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(other) => Err(mismatch(key, "list", other)),
        }
    }

    fn span_of(&self, key: &str) -> Span {
        self.get(key)
            .map(|v| v.span.clone())
            .unwrap_or_else(|| self.span.clone())
    }
}

fn mismatch(key: &str, expected: &'static str, found: &Spanned<Value>) -> ScriptError {
    ScriptError::field_type(key, expected, found.node.type_name(), found.span.clone())
}

fn table_number(key: &str, value: &Spanned<Value>) -> Result<String, ScriptError> {
    match &value.node {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(mismatch(key, "string", value)),
    }
}

/// Replays statements in order, binding script names to generated ids
///
/// Statements run one at a time against the editor, so a failing statement
/// leaves every earlier edit in place (and undoable).
pub struct Interpreter<'e, G> {
    editor: &'e mut Editor<G>,
    bindings: HashMap<String, ElementId>,
    snap: Option<GridSnap>,
    min_size: Size,
}

impl<'e, G: IdGenerator> Interpreter<'e, G> {
    pub fn new(editor: &'e mut Editor<G>) -> Self {
        Self {
            editor,
            bindings: HashMap::new(),
            snap: None,
            min_size: Size::new(DEFAULT_MIN_SIZE, DEFAULT_MIN_SIZE),
        }
    }

    /// Snap positions and explicit sizes to `snap`
    pub fn with_snap(mut self, snap: Option<GridSnap>) -> Self {
        self.snap = snap;
        self
    }

    /// Smallest size `resize` may produce
    pub fn with_min_size(mut self, min_width: f64, min_height: f64) -> Self {
        self.min_size = Size::new(min_width, min_height);
        self
    }

    /// Id bound to `name`, if any
    pub fn binding(&self, name: &str) -> Option<&ElementId> {
        self.bindings.get(name)
    }

    pub fn bindings(&self) -> &HashMap<String, ElementId> {
        &self.bindings
    }

    /// Run every statement, stopping at the first error
    pub fn run(&mut self, script: &Script) -> Result<(), ScriptError> {
        for statement in &script.statements {
            self.execute(statement)?;
        }
        Ok(())
    }

    pub fn execute(&mut self, statement: &Spanned<Statement>) -> Result<(), ScriptError> {
        debug!(
            statement = statement.node.keyword(),
            span = ?statement.span,
            "replaying statement"
        );
        let span = statement.span.clone();
        match &statement.node {
            Statement::Add(add) => self.add(add, span),
            Statement::Update(update) => self.update(update, span),
            Statement::Move(mv) => self.move_element(mv),
            Statement::Resize(resize) => self.resize(resize),
            Statement::Duplicate(dup) => self.duplicate(dup),
            Statement::Remove(target) => {
                let id = self.resolve(target)?;
                self.editor.remove(id);
                Ok(())
            }
            Statement::Undo => {
                if !self.editor.undo() {
                    debug!("nothing to undo");
                }
                Ok(())
            }
            Statement::Redo => {
                if !self.editor.redo() {
                    debug!("nothing to redo");
                }
                Ok(())
            }
        }
    }

    fn add(&mut self, add: &AddStmt, span: Span) -> Result<(), ScriptError> {
        if let Some(name) = &add.name {
            self.check_unbound(name)?;
        }

        let kind_name = add.kind.node.as_str();
        let kind = KindFields::for_add(kind_name);
        let allowed: Vec<&str> = GEOMETRY_FIELDS
            .iter()
            .chain(PLACEMENT_FIELDS)
            .chain(kind.fields())
            .copied()
            .collect();
        let fields = Fields::check(kind_name, &add.fields, &allowed, span)?;

        let request = match kind {
            KindFields::Table => ElementToAdd::Table {
                table_number: fields.required("number", fields.table_number("number")?)?,
                seats: fields.required("seats", fields.count("seats")?)?,
            },
            KindFields::TableGroup => ElementToAdd::TableGroup {
                table_numbers: fields.required("numbers", fields.table_numbers("numbers")?)?,
                seats: fields.required("seats", fields.count("seats")?)?,
            },
            KindFields::Bar => ElementToAdd::Bar {
                label: fields.text("label")?,
            },
            KindFields::Zone => ElementToAdd::Zone {
                name: fields.required("name", fields.text("name")?)?,
                color: fields.color("color")?,
            },
            KindFields::Wall => ElementToAdd::Wall,
            KindFields::Entrance => ElementToAdd::Entrance {
                label: fields.text("label")?,
            },
            KindFields::Unknown => ElementToAdd::Unrecognized(kind_name.to_string()),
        };

        // Resolve references before the factory draws an id
        let zone_id = match fields.get("zone") {
            Some(value) => Some(self.resolve_value(value)?),
            None => None,
        };
        let z_index = fields.count("z")?;
        let rotation = fields.number("rotation")?;
        let (w, h) = (fields.length("w")?, fields.length("h")?);

        let position = match (&add.at, fields.has("x") || fields.has("y")) {
            (Some(_), true) => {
                let key = if fields.has("x") { "x" } else { "y" };
                return Err(ScriptError::invalid_value(
                    key,
                    "position is already given by 'at'",
                    fields.span_of(key),
                ));
            }
            (Some(at), false) => Point::new(at.node.a, at.node.b),
            (None, _) => Point::new(
                fields.number("x")?.unwrap_or(0.0),
                fields.number("y")?.unwrap_or(0.0),
            ),
        };

        let mut element = self
            .editor
            .create(&request)
            .map_err(|source| ScriptError::Factory {
                source,
                span: add.kind.span.clone(),
            })?;
        if let Some(size) = self.explicit_size(w, h, element.bounds.size()) {
            element.bounds.w = size.w;
            element.bounds.h = size.h;
        }
        if rotation.is_some() {
            element.bounds.rotation = rotation;
        }
        element.zone_id = zone_id;
        element.z_index = z_index;

        let at = self.snap_point(position);
        let id = self.editor.place(element, at);
        if let Some(name) = &add.name {
            self.bindings.insert(name.node.0.clone(), id);
        }
        Ok(())
    }

    fn update(&mut self, update: &UpdateStmt, span: Span) -> Result<(), ScriptError> {
        let id = self.resolve(&update.target)?;
        let element = self.element(&id, &update.target.span)?;
        let kind = KindFields::of(&element.kind);
        let allowed: Vec<&str> = GEOMETRY_FIELDS.iter().chain(kind.fields()).copied().collect();
        let fields = Fields::check(element.kind.name(), &update.fields, &allowed, span)?;

        let mut patch = ElementPatch::new(id);

        if GEOMETRY_FIELDS.iter().any(|key| fields.has(key)) {
            let mut bounds = element.bounds;
            if fields.has("x") || fields.has("y") {
                let origin = Point::new(
                    fields.number("x")?.unwrap_or(bounds.x),
                    fields.number("y")?.unwrap_or(bounds.y),
                );
                bounds = bounds.at(self.snap_point(origin));
            }
            let (w, h) = (fields.length("w")?, fields.length("h")?);
            if let Some(size) = self.explicit_size(w, h, bounds.size()) {
                bounds.w = size.w;
                bounds.h = size.h;
            }
            if let Some(rotation) = fields.number("rotation")? {
                bounds.rotation = Some(rotation);
            }
            patch.bounds = Some(bounds);
        }

        patch.table_number = fields.table_number("number")?;
        patch.table_numbers = fields.table_numbers("numbers")?;
        patch.seats = fields.count("seats")?;
        patch.label = fields.text("label")?;
        patch.name = fields.text("name")?;
        patch.color = fields.color("color")?;

        self.editor.update(patch);
        Ok(())
    }

    fn move_element(&mut self, mv: &MoveStmt) -> Result<(), ScriptError> {
        let id = self.resolve(&mv.target)?;
        let element = self.element(&id, &mv.target.span)?;
        let offset = Point::new(mv.offset.node.a, mv.offset.node.b);

        let bounds = match mv.motion {
            Motion::To => element.bounds.at(self.snap_point(offset)),
            Motion::By => {
                let mut drag = DragTracker::new();
                if let Some(snap) = self.snap {
                    drag = drag.with_snap(snap);
                }
                drag.start_drag(Point::zero(), element.bounds.origin());
                let delta = drag.end_drag(offset).unwrap_or_else(Point::zero);
                element.bounds.translate(delta)
            }
        };

        self.editor.update(ElementPatch::new(id).with_bounds(bounds));
        Ok(())
    }

    fn resize(&mut self, resize: &ResizeStmt) -> Result<(), ScriptError> {
        let id = self.resolve(&resize.target)?;
        let element = self.element(&id, &resize.target.span)?;
        let start = element.bounds;

        let mut tracker = ResizeTracker::new().with_min_size(self.min_size.w, self.min_size.h);
        if let Some(snap) = self.snap {
            tracker = tracker.with_size_snap(snap);
        }
        // Drag the south-east corner by the size difference
        tracker.pointer_down(id, Point::zero(), DragResizeMode::ResizeSe, start);
        let proposal = tracker.pointer_move(Point::new(
            resize.size.node.a - start.w,
            resize.size.node.b - start.h,
        ));
        tracker.pointer_up();

        if let Some((id, bounds)) = proposal {
            self.editor.update(ElementPatch::new(id).with_bounds(bounds));
        }
        Ok(())
    }

    fn duplicate(&mut self, dup: &DuplicateStmt) -> Result<(), ScriptError> {
        let source = self.resolve(&dup.source)?;
        if let Some(name) = &dup.name {
            self.check_unbound(name)?;
        }
        let at = dup
            .at
            .as_ref()
            .map(|at| self.snap_point(Point::new(at.node.a, at.node.b)));

        let copy = self
            .editor
            .duplicate(source.as_str(), at)
            .ok_or_else(|| ScriptError::element_not_found(source.as_str(), dup.source.span.clone(), vec![]))?;
        if let Some(name) = &dup.name {
            self.bindings.insert(name.node.0.clone(), copy);
        }
        Ok(())
    }

    /// Map a target to an id present in the current layout
    fn resolve(&self, target: &Spanned<Target>) -> Result<ElementId, ScriptError> {
        let layout = self.editor.layout();
        match &target.node {
            Target::Name(name) => {
                let id = self.bindings.get(name.as_str()).ok_or_else(|| {
                    ScriptError::unknown_reference(
                        name.as_str(),
                        target.span.clone(),
                        find_similar(self.bindings.keys().map(String::as_str), name.as_str(), 2),
                    )
                })?;
                if !layout.contains(id.as_str()) {
                    return Err(ScriptError::element_not_found(
                        id.as_str(),
                        target.span.clone(),
                        vec![],
                    ));
                }
                Ok(id.clone())
            }
            Target::Id(id) => {
                if layout.contains(id) {
                    Ok(ElementId::from(id.as_str()))
                } else {
                    Err(ScriptError::element_not_found(
                        id.as_str(),
                        target.span.clone(),
                        find_similar(layout.elements.iter().map(|e| e.id.as_str()), id, 2),
                    ))
                }
            }
        }
    }

    /// `zone: patio` or `zone: "el-3"`
    fn resolve_value(&self, value: &Spanned<Value>) -> Result<ElementId, ScriptError> {
        let target = match &value.node {
            Value::Ident(name) => Target::Name(name.clone()),
            Value::String(id) => Target::Id(id.clone()),
            _ => return Err(mismatch("zone", "element", value)),
        };
        self.resolve(&Spanned::new(target, value.span.clone()))
    }

    fn element(&self, id: &ElementId, span: &Span) -> Result<FloorElement, ScriptError> {
        self.editor
            .layout()
            .element(id.as_str())
            .cloned()
            .ok_or_else(|| ScriptError::element_not_found(id.as_str(), span.clone(), vec![]))
    }

    fn check_unbound(&self, name: &Spanned<Identifier>) -> Result<(), ScriptError> {
        if self.bindings.contains_key(name.node.as_str()) {
            return Err(ScriptError::duplicate_binding(
                name.node.as_str(),
                name.span.clone(),
            ));
        }
        Ok(())
    }

    /// Size from explicit `w`/`h`, keeping `current` for the one not given.
    /// `None` when neither is present.
    fn explicit_size(&self, w: Option<f64>, h: Option<f64>, current: Size) -> Option<Size> {
        if w.is_none() && h.is_none() {
            return None;
        }
        let size = Size::new(w.unwrap_or(current.w), h.unwrap_or(current.h));
        Some(match self.snap {
            Some(snap) => snap.snap_wh(size.w, size.h),
            None => size,
        })
    }

    fn snap_point(&self, point: Point) -> Point {
        match self.snap {
            Some(snap) => snap.snap_xy(point.x, point.y),
            None => point,
        }
    }
}

impl<G> std::fmt::Debug for Interpreter<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("bindings", &self.bindings)
            .field("snap", &self.snap)
            .field("min_size", &self.min_size)
            .finish()
    }
}
