//! Combined move/resize tracking with edge and corner handles

use std::fmt;
use std::str::FromStr;

use crate::document::{Bounds, ElementId, Point, Size};

use super::snap::{PointSnapper, SizeSnapper};

/// Smallest width or height a resize may produce by default
pub const DEFAULT_MIN_SIZE: f64 = 40.0;

/// Which handle the pointer grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragResizeMode {
    Move,
    ResizeN,
    ResizeS,
    ResizeE,
    ResizeW,
    ResizeNe,
    ResizeNw,
    ResizeSe,
    ResizeSw,
}

impl DragResizeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DragResizeMode::Move => "move",
            DragResizeMode::ResizeN => "resize-n",
            DragResizeMode::ResizeS => "resize-s",
            DragResizeMode::ResizeE => "resize-e",
            DragResizeMode::ResizeW => "resize-w",
            DragResizeMode::ResizeNe => "resize-ne",
            DragResizeMode::ResizeNw => "resize-nw",
            DragResizeMode::ResizeSe => "resize-se",
            DragResizeMode::ResizeSw => "resize-sw",
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, DragResizeMode::Move)
    }

    fn moves_west(&self) -> bool {
        matches!(
            self,
            DragResizeMode::ResizeW | DragResizeMode::ResizeNw | DragResizeMode::ResizeSw
        )
    }

    fn moves_east(&self) -> bool {
        matches!(
            self,
            DragResizeMode::ResizeE | DragResizeMode::ResizeNe | DragResizeMode::ResizeSe
        )
    }

    fn moves_north(&self) -> bool {
        matches!(
            self,
            DragResizeMode::ResizeN | DragResizeMode::ResizeNe | DragResizeMode::ResizeNw
        )
    }

    fn moves_south(&self) -> bool {
        matches!(
            self,
            DragResizeMode::ResizeS | DragResizeMode::ResizeSe | DragResizeMode::ResizeSw
        )
    }
}

impl fmt::Display for DragResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DragResizeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "move" => Ok(DragResizeMode::Move),
            "resize-n" => Ok(DragResizeMode::ResizeN),
            "resize-s" => Ok(DragResizeMode::ResizeS),
            "resize-e" => Ok(DragResizeMode::ResizeE),
            "resize-w" => Ok(DragResizeMode::ResizeW),
            "resize-ne" => Ok(DragResizeMode::ResizeNe),
            "resize-nw" => Ok(DragResizeMode::ResizeNw),
            "resize-se" => Ok(DragResizeMode::ResizeSe),
            "resize-sw" => Ok(DragResizeMode::ResizeSw),
            other => Err(format!("unknown drag mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
struct Session {
    id: ElementId,
    mode: DragResizeMode,
    start: Point,
    start_bounds: Bounds,
}

/// Tracks the selected element and an active move or resize gesture
///
/// `pointer_move` proposes new bounds for the caller to preview or commit;
/// nothing here writes to the document.
pub struct ResizeTracker {
    selected: Option<ElementId>,
    session: Option<Session>,
    min_size: Size,
    snap: Option<Box<dyn PointSnapper>>,
    snap_size: Option<Box<dyn SizeSnapper>>,
}

impl Default for ResizeTracker {
    fn default() -> Self {
        Self {
            selected: None,
            session: None,
            min_size: Size::new(DEFAULT_MIN_SIZE, DEFAULT_MIN_SIZE),
            snap: None,
            snap_size: None,
        }
    }
}

impl ResizeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_size(mut self, min_width: f64, min_height: f64) -> Self {
        self.min_size = Size::new(min_width, min_height);
        self
    }

    /// Snapper for positions proposed by move gestures
    pub fn with_snap(mut self, snap: impl PointSnapper + 'static) -> Self {
        self.snap = Some(Box::new(snap));
        self
    }

    /// Snapper for sizes proposed by resize gestures
    pub fn with_size_snap(mut self, snap: impl SizeSnapper + 'static) -> Self {
        self.snap_size = Some(Box::new(snap));
        self
    }

    pub fn selected_id(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    pub fn set_selected_id(&mut self, id: Option<ElementId>) {
        self.selected = id;
    }

    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.mode.is_move())
    }

    pub fn is_resizing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.mode.is_move())
    }

    /// Begin a gesture on `id`; selects it
    pub fn pointer_down(
        &mut self,
        id: impl Into<ElementId>,
        client: Point,
        mode: DragResizeMode,
        current: Bounds,
    ) {
        let id = id.into();
        self.selected = Some(id.clone());
        self.session = Some(Session {
            id,
            mode,
            start: client,
            start_bounds: current,
        });
    }

    /// Bounds proposed for the pointer at `client`, or `None` without an
    /// active gesture
    pub fn pointer_move(&self, client: Point) -> Option<(ElementId, Bounds)> {
        let session = self.session.as_ref()?;
        let dx = client.x - session.start.x;
        let dy = client.y - session.start.y;
        let start = session.start_bounds;

        if session.mode.is_move() {
            let target = Point::new(start.x + dx, start.y + dy);
            let snapped = match &self.snap {
                Some(snap) => snap.snap_point(target),
                None => target,
            };
            return Some((session.id.clone(), start.at(snapped)));
        }

        let mode = session.mode;
        let mut bounds = start;
        if mode.moves_east() {
            bounds.w = self.min_size.w.max(start.w + dx);
        }
        if mode.moves_west() {
            bounds.w = self.min_size.w.max(start.w - dx);
            bounds.x = start.x + dx;
        }
        if mode.moves_south() {
            bounds.h = self.min_size.h.max(start.h + dy);
        }
        if mode.moves_north() {
            bounds.h = self.min_size.h.max(start.h - dy);
            bounds.y = start.y + dy;
        }

        if let Some(snap) = &self.snap_size {
            let size = snap.snap_size(bounds.size());
            bounds.w = size.w;
            bounds.h = size.h;
        }
        Some((session.id.clone(), bounds))
    }

    /// End the gesture; the selection stays
    pub fn pointer_up(&mut self) {
        self.session = None;
    }
}

impl fmt::Debug for ResizeTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeTracker")
            .field("selected", &self.selected)
            .field("session", &self.session)
            .field("min_size", &self.min_size)
            .finish()
    }
}
