//! Layout history reducer
//!
//! `(EditorState, Action) -> EditorState` with no I/O. Every edge case
//! degrades to a no-op, so views can dispatch speculatively from input
//! handlers without guarding first.

use serde::{Deserialize, Serialize};

use crate::document::{Bounds, ElementId, ElementKind, FloorDocument, FloorElement};

use super::history::{BoundedHistory, MAX_HISTORY};

/// Width and height given to added elements whose size is zero
pub const DEFAULT_ELEMENT_SIZE: f64 = 80.0;

/// Field changes for one element, applied by `UPDATE_ELEMENT`
///
/// Fields a kind does not carry are ignored for that kind (a `seats` patch
/// leaves a wall untouched).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    pub id: ElementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_numbers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ElementPatch {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_seats(mut self, seats: u32) -> Self {
        self.seats = Some(seats);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Merge this patch onto `element`
    pub fn apply(&self, element: &mut FloorElement) {
        if let Some(bounds) = self.bounds {
            element.bounds.x = bounds.x;
            element.bounds.y = bounds.y;
            element.bounds.w = bounds.w;
            element.bounds.h = bounds.h;
            if bounds.rotation.is_some() {
                element.bounds.rotation = bounds.rotation;
            }
        }

        match &mut element.kind {
            ElementKind::Table {
                table_number,
                seats,
                ..
            } => {
                if let Some(number) = &self.table_number {
                    *table_number = number.clone();
                }
                if let Some(n) = self.seats {
                    *seats = n;
                }
            }
            ElementKind::TableGroup {
                table_numbers,
                seats,
                ..
            } => {
                if let Some(numbers) = &self.table_numbers {
                    *table_numbers = numbers.clone();
                }
                if let Some(n) = self.seats {
                    *seats = n;
                }
            }
            ElementKind::Bar { label } | ElementKind::Entrance { label } => {
                if self.label.is_some() {
                    *label = self.label.clone();
                }
            }
            ElementKind::Zone { name, color } => {
                if let Some(n) = &self.name {
                    *name = n.clone();
                }
                if self.color.is_some() {
                    *color = self.color.clone();
                }
            }
            ElementKind::Wall => {}
        }
    }
}

/// An edit dispatched to the reducer
///
/// Serialized as `{"type": "UPDATE_ELEMENT", "payload": {...}}`. Any other
/// `type` deserializes to [`Action::Unrecognized`], which changes nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Load a document and discard all history
    SetLayout(FloorDocument),
    UpdateElement(ElementPatch),
    /// Append an element placed at `(x, y)`
    AddElement {
        element: FloorElement,
        x: f64,
        y: f64,
    },
    RemoveElement {
        id: ElementId,
    },
    Undo,
    Redo,
    #[serde(other)]
    Unrecognized,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetLayout(_) => "SET_LAYOUT",
            Action::UpdateElement(_) => "UPDATE_ELEMENT",
            Action::AddElement { .. } => "ADD_ELEMENT",
            Action::RemoveElement { .. } => "REMOVE_ELEMENT",
            Action::Undo => "UNDO",
            Action::Redo => "REDO",
            Action::Unrecognized => "UNRECOGNIZED",
        }
    }

    /// Parse an action from JSON. An unknown `type` becomes
    /// [`Action::Unrecognized`] whatever payload it carries.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        const KNOWN: [&str; 6] = [
            "SET_LAYOUT",
            "UPDATE_ELEMENT",
            "ADD_ELEMENT",
            "REMOVE_ELEMENT",
            "UNDO",
            "REDO",
        ];
        let value: serde_json::Value = serde_json::from_str(json)?;
        match value.get("type").and_then(serde_json::Value::as_str) {
            Some(kind) if !KNOWN.contains(&kind) => Ok(Action::Unrecognized),
            _ => serde_json::from_value(value),
        }
    }
}

/// How the reducer records history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HistoryOptions {
    /// Snapshots kept, the current one included
    pub max_entries: usize,
    /// Whether update/remove of a missing id still records a snapshot
    pub record_noop_edits: bool,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            max_entries: MAX_HISTORY,
            record_noop_edits: true,
        }
    }
}

/// The displayed layout plus its undo history
///
/// Outside of drag previews held by the view, `layout()` always equals the
/// history entry under the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    layout: FloorDocument,
    history: BoundedHistory<FloorDocument>,
    options: HistoryOptions,
}

impl EditorState {
    pub fn new(layout: FloorDocument) -> Self {
        Self::with_options(layout, HistoryOptions::default())
    }

    pub fn with_options(layout: FloorDocument, options: HistoryOptions) -> Self {
        let history = BoundedHistory::new(layout.clone(), options.max_entries);
        Self {
            layout,
            history,
            options,
        }
    }

    pub fn layout(&self) -> &FloorDocument {
        &self.layout
    }

    pub fn history(&self) -> &BoundedHistory<FloorDocument> {
        &self.history
    }

    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    pub fn options(&self) -> HistoryOptions {
        self.options
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn into_layout(self) -> FloorDocument {
        self.layout
    }

    /// Pure transition: consume a state and return the next one
    pub fn reduce(mut self, action: Action) -> Self {
        self.apply(action);
        self
    }

    /// Apply an action in place
    pub fn apply(&mut self, action: Action) {
        let name = action.name();
        match action {
            Action::SetLayout(doc) => {
                self.history.reset(doc.clone());
                self.layout = doc;
            }
            Action::UpdateElement(patch) => {
                let mut next = self.layout.clone();
                let mut found = false;
                for el in next.elements.iter_mut().filter(|el| el.id == patch.id) {
                    patch.apply(el);
                    found = true;
                }
                self.commit(next, found, name);
            }
            Action::AddElement { element, x, y } => {
                let mut next = self.layout.clone();
                let fresh = !next.contains(element.id.as_str());
                if fresh {
                    next.elements.push(place(element, x, y, self.layout.max_z_index()));
                } else {
                    tracing::warn!(id = %element.id, "element id already on the floor, not adding");
                }
                self.commit(next, fresh, name);
            }
            Action::RemoveElement { id } => {
                let mut next = self.layout.clone();
                let before = next.elements.len();
                next.elements.retain(|el| el.id != id);
                let removed = next.elements.len() != before;
                self.commit(next, removed, name);
            }
            Action::Undo => {
                if let Some(doc) = self.history.undo() {
                    self.layout = doc.clone();
                }
            }
            Action::Redo => {
                if let Some(doc) = self.history.redo() {
                    self.layout = doc.clone();
                }
            }
            Action::Unrecognized => {}
        }

        tracing::debug!(
            action = name,
            history_len = self.history.len(),
            history_index = self.history.index(),
            elements = self.layout.elements.len(),
            "applied action"
        );
    }

    fn commit(&mut self, next: FloorDocument, changed: bool, action: &str) {
        if !changed && !self.options.record_noop_edits {
            tracing::debug!(action, "edit matched nothing, history unchanged");
            return;
        }
        let evicted = self.history.push(next.clone());
        if evicted > 0 {
            tracing::trace!(evicted, "evicted oldest history entries");
        }
        self.layout = next;
    }
}

/// Position an element for insertion: origin at `(x, y)`, zero sizes
/// replaced by the default, z-index one above the current maximum unless
/// the element brings its own. A floor already at `u32::MAX` stays there.
fn place(mut element: FloorElement, x: f64, y: f64, max_z_index: u32) -> FloorElement {
    element.bounds.x = x;
    element.bounds.y = y;
    if element.bounds.w == 0.0 || element.bounds.w.is_nan() {
        element.bounds.w = DEFAULT_ELEMENT_SIZE;
    }
    if element.bounds.h == 0.0 || element.bounds.h.is_nan() {
        element.bounds.h = DEFAULT_ELEMENT_SIZE;
    }
    element.z_index = Some(element.z_index.unwrap_or(max_z_index.saturating_add(1)));
    element
}

/// Free-function form of [`EditorState::reduce`]
pub fn reduce(state: EditorState, action: Action) -> EditorState {
    state.reduce(action)
}
