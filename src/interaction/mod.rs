//! Pointer and wheel helpers for an interactive floor canvas
//!
//! These translate raw input into document coordinates and proposed bounds.
//! None of them hold the document or touch history; their output becomes
//! the payload of an `ADD_ELEMENT` or `UPDATE_ELEMENT` action.

pub mod drag;
pub mod pan_zoom;
pub mod resize;
pub mod snap;

pub use drag::{DragStart, DragTracker};
pub use pan_zoom::{PanZoomOptions, Viewport, WheelEvent};
pub use resize::{DragResizeMode, ResizeTracker, DEFAULT_MIN_SIZE};
pub use snap::{GridSnap, PointSnapper, SizeSnapper};
