//! Pointer drag tracking for a single element
//!
//! The tracker never touches the document. Its end-of-drag delta is meant
//! to be turned into an `UPDATE_ELEMENT` by the caller.

use std::fmt;

use crate::document::Point;

use super::snap::PointSnapper;

/// Where a drag began, in client and element coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStart {
    pub client: Point,
    pub element: Point,
}

impl DragStart {
    /// Element position implied by the pointer being at `client`
    fn target(&self, client: Point) -> Point {
        self.element + (client - self.client)
    }
}

/// Tracks one in-progress drag
#[derive(Default)]
pub struct DragTracker {
    start: Option<DragStart>,
    offset: Option<Point>,
    snap: Option<Box<dyn PointSnapper>>,
    on_drag_end: Option<Box<dyn FnMut(Point)>>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snap every proposed element position
    pub fn with_snap(mut self, snap: impl PointSnapper + 'static) -> Self {
        self.snap = Some(Box::new(snap));
        self
    }

    /// Called with the total delta when a drag ends
    pub fn with_on_drag_end(mut self, callback: impl FnMut(Point) + 'static) -> Self {
        self.on_drag_end = Some(Box::new(callback));
        self
    }

    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    pub fn drag_start(&self) -> Option<DragStart> {
        self.start
    }

    /// Delta between the current (snapped) position and the element origin
    pub fn drag_offset(&self) -> Option<Point> {
        self.offset
    }

    pub fn start_drag(&mut self, client: Point, element: Point) {
        self.start = Some(DragStart { client, element });
        self.offset = Some(Point::zero());
    }

    /// Proposed element position for the pointer at `client`, or `None`
    /// when no drag is active
    pub fn move_drag(&mut self, client: Point) -> Option<Point> {
        let start = self.start?;
        let point = self.resolve(&start, client);
        self.offset = Some(point - start.element);
        Some(point)
    }

    /// Finish the drag with the pointer at `client`.
    ///
    /// Fires the drag-end callback and returns the total delta when a drag
    /// was active. State is cleared either way.
    pub fn end_drag(&mut self, client: Point) -> Option<Point> {
        let delta = self.start.map(|start| self.resolve(&start, client) - start.element);

        if let (Some(delta), Some(callback)) = (delta, self.on_drag_end.as_mut()) {
            callback(delta);
        }
        self.start = None;
        self.offset = None;
        delta
    }

    fn resolve(&self, start: &DragStart, client: Point) -> Point {
        let raw = start.target(client);
        match &self.snap {
            Some(snap) => snap.snap_point(raw),
            None => raw,
        }
    }
}

impl fmt::Debug for DragTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragTracker")
            .field("start", &self.start)
            .field("offset", &self.offset)
            .field("snap", &self.snap.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::snap::GridSnap;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_move_without_drag_returns_none() {
        let mut drag = DragTracker::new();
        assert_eq!(drag.move_drag(Point::new(5.0, 5.0)), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_move_follows_pointer() {
        let mut drag = DragTracker::new();
        drag.start_drag(Point::new(500.0, 300.0), Point::new(100.0, 100.0));
        assert!(drag.is_dragging());
        assert_eq!(drag.drag_offset(), Some(Point::zero()));

        let p = drag.move_drag(Point::new(537.0, 290.0));
        assert_eq!(p, Some(Point::new(137.0, 90.0)));
        assert_eq!(drag.drag_offset(), Some(Point::new(37.0, -10.0)));
    }

    #[test]
    fn test_move_applies_snap() {
        let mut drag = DragTracker::new().with_snap(GridSnap::new(40.0).unwrap());
        drag.start_drag(Point::zero(), Point::new(80.0, 80.0));
        assert_eq!(
            drag.move_drag(Point::new(17.0, 25.0)),
            Some(Point::new(80.0, 120.0))
        );
        assert_eq!(drag.drag_offset(), Some(Point::new(0.0, 40.0)));
    }

    #[test]
    fn test_end_reports_delta_and_clears() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut drag = DragTracker::new().with_on_drag_end(move |d| sink.borrow_mut().push(d));

        drag.start_drag(Point::new(10.0, 10.0), Point::new(100.0, 100.0));
        let delta = drag.end_drag(Point::new(50.0, 10.0));

        assert_eq!(delta, Some(Point::new(40.0, 0.0)));
        assert_eq!(*seen.borrow(), vec![Point::new(40.0, 0.0)]);
        assert!(!drag.is_dragging());
        assert_eq!(drag.drag_offset(), None);
        assert_eq!(drag.drag_start(), None);
    }

    #[test]
    fn test_end_without_drag_is_idempotent_cleanup() {
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let mut drag = DragTracker::new().with_on_drag_end(move |_| *counter.borrow_mut() += 1);

        assert_eq!(drag.end_drag(Point::new(1.0, 1.0)), None);
        assert_eq!(drag.end_drag(Point::new(1.0, 1.0)), None);
        assert_eq!(*calls.borrow(), 0);
        assert!(!drag.is_dragging());
    }
}
