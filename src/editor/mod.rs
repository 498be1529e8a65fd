//! Floor layout editor
//!
//! The reducer in [`reducer`] is the whole state machine; [`Editor`] pairs it
//! with an [`ElementFactory`] so callers can add, duplicate and edit elements
//! without building actions by hand.

pub mod error;
pub mod factory;
pub mod history;
pub mod reducer;

pub use error::FactoryError;
pub use factory::{
    ElementFactory, ElementSizes, ElementToAdd, IdGenerator, SequentialIds, TimestampIds,
    UnknownKindPolicy,
};
pub use history::{BoundedHistory, MAX_HISTORY};
pub use reducer::{reduce, Action, EditorState, ElementPatch, HistoryOptions};

use crate::config::EditorConfig;
use crate::document::{ElementId, FloorDocument, FloorElement, Point};
use crate::interaction::Viewport;

/// An editing session over one floor document
#[derive(Debug)]
pub struct Editor<G> {
    state: EditorState,
    factory: ElementFactory<G>,
    viewport: Viewport,
}

impl<G: IdGenerator> Editor<G> {
    pub fn new(layout: FloorDocument, factory: ElementFactory<G>) -> Self {
        Self {
            state: EditorState::new(layout),
            factory,
            viewport: Viewport::default(),
        }
    }

    /// Build a session with the history and factory settings from `config`
    pub fn from_config(layout: FloorDocument, config: &EditorConfig, ids: G) -> Self {
        let factory = ElementFactory::new(ids)
            .with_sizes(config.factory.sizes)
            .with_unknown_kind_policy(config.factory.unknown_kind);
        Self {
            state: EditorState::with_options(layout, config.history),
            factory,
            viewport: Viewport::new(config.viewport),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn layout(&self) -> &FloorDocument {
        self.state.layout()
    }

    /// Pan and zoom of the canvas showing this session
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn into_state(self) -> EditorState {
        self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state.apply(action);
    }

    /// Replace the document and drop all history
    pub fn load(&mut self, layout: FloorDocument) {
        self.dispatch(Action::SetLayout(layout));
    }

    /// Build an element for `request` without placing it
    pub fn create(&mut self, request: &ElementToAdd) -> Result<FloorElement, FactoryError> {
        self.factory.create(request, Some(self.state.layout().venue_id.as_str()))
    }

    /// Add a prepared element at `at`
    pub fn place(&mut self, element: FloorElement, at: Point) -> ElementId {
        let id = element.id.clone();
        self.dispatch(Action::AddElement {
            element,
            x: at.x,
            y: at.y,
        });
        id
    }

    /// Create and add a new element, returning its id
    pub fn add(&mut self, request: &ElementToAdd, at: Point) -> Result<ElementId, FactoryError> {
        let element = self.create(request)?;
        Ok(self.place(element, at))
    }

    /// Copy an element under a fresh id. The copy lands at `at`, or on top
    /// of the original when `at` is `None`. Returns `None` if `id` is not on
    /// the floor.
    pub fn duplicate(&mut self, id: &str, at: Option<Point>) -> Option<ElementId> {
        let original = self.state.layout().element(id)?.clone();
        let copy = self.factory.clone_element(&original);
        let at = at.unwrap_or_else(|| original.bounds.origin());
        Some(self.place(copy, at))
    }

    pub fn update(&mut self, patch: ElementPatch) {
        self.dispatch(Action::UpdateElement(patch));
    }

    pub fn remove(&mut self, id: impl Into<ElementId>) {
        self.dispatch(Action::RemoveElement { id: id.into() });
    }

    /// Step back; false when already at the oldest snapshot
    pub fn undo(&mut self) -> bool {
        let moved = self.state.can_undo();
        self.dispatch(Action::Undo);
        moved
    }

    /// Step forward; false when already at the newest snapshot
    pub fn redo(&mut self) -> bool {
        let moved = self.state.can_redo();
        self.dispatch(Action::Redo);
        moved
    }
}
