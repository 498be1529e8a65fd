//! Canvas viewport: pan offset and clamped zoom

use serde::Deserialize;

use crate::document::Point;

/// Zoom limits and step size
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PanZoomOptions {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
}

impl Default for PanZoomOptions {
    fn default() -> Self {
        Self {
            min_zoom: 0.25,
            max_zoom: 2.0,
            zoom_step: 0.1,
        }
    }
}

/// A wheel event as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta_y: f64,
    default_prevented: bool,
}

impl WheelEvent {
    pub fn new(delta_y: f64) -> Self {
        Self {
            delta_y,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether the host should skip its own scroll handling
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Pan and zoom state of the canvas view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pan: Point,
    zoom: f64,
    options: PanZoomOptions,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(PanZoomOptions::default())
    }
}

impl Viewport {
    pub fn new(options: PanZoomOptions) -> Self {
        let mut viewport = Self {
            pan: Point::zero(),
            zoom: 1.0,
            options,
        };
        viewport.set_zoom(1.0);
        viewport
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn options(&self) -> &PanZoomOptions {
        &self.options
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan = Point::new(x, y);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = self.clamp(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + self.options.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - self.options.zoom_step);
    }

    /// Back to the origin at 100%
    pub fn reset(&mut self) {
        self.pan = Point::zero();
        self.zoom = 1.0;
    }

    /// Zoom one step: in for upward wheel motion, out for downward. Marks
    /// the event so the page does not scroll.
    pub fn handle_wheel(&mut self, event: &mut WheelEvent) {
        event.prevent_default();
        let step = if event.delta_y > 0.0 {
            -self.options.zoom_step
        } else {
            self.options.zoom_step
        };
        self.set_zoom(self.zoom + step);
    }

    /// CSS transform placing the canvas in the view
    pub fn transform_style(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.pan.x, self.pan.y, self.zoom
        )
    }

    /// Map a point in view coordinates back into document coordinates
    pub fn to_document(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    /// Map a document point into view coordinates
    pub fn to_screen(&self, doc: Point) -> Point {
        Point::new(
            doc.x * self.zoom + self.pan.x,
            doc.y * self.zoom + self.pan.y,
        )
    }

    // min/max rather than f64::clamp: a misconfigured min > max must not panic
    fn clamp(&self, zoom: f64) -> f64 {
        self.options.max_zoom.min(self.options.min_zoom.max(zoom))
    }
}
