//! Coordinate transforms between data and screen space.

use crate::geom::{Point, ScreenPoint};
use crate::view::{Range, Viewport};

/// Linear map from the viewport's data bounds onto a `width` x `height`
/// pixel surface. Data "up" is pixel "up", so the Y axis is inverted.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    x: Range,
    y: Range,
    width: f64,
    height: f64,
}

impl Transform {
    /// Create a transform for the given viewport and surface size.
    ///
    /// Returns `None` when the surface has no area.
    pub fn new(viewport: &Viewport, width: f32, height: f32) -> Option<Self> {
        if !(width > 0.0 && height > 0.0) {
            return None;
        }
        Some(Self {
            x: viewport.x(),
            y: viewport.y(),
            width: f64::from(width),
            height: f64::from(height),
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> f32 {
        self.width as f32
    }

    /// Surface height in pixels.
    pub fn height(&self) -> f32 {
        self.height as f32
    }

    /// Map a data X value to a pixel column.
    pub fn x_to_pixel(&self, x: f64) -> f64 {
        (x - self.x.min) / self.x.span() * self.width
    }

    /// Map a data Y value to a pixel row.
    pub fn y_to_pixel(&self, y: f64) -> f64 {
        self.height - (y - self.y.min) / self.y.span() * self.height
    }

    /// Map a data point into screen space.
    pub fn data_to_screen(&self, point: Point) -> ScreenPoint {
        ScreenPoint::new(
            self.x_to_pixel(point.x) as f32,
            self.y_to_pixel(point.y) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_exactly() {
        let viewport = Viewport::from_bounds(-3.5, 12.25, -0.1, 7.0, 0.5).unwrap();
        let transform = Transform::new(&viewport, 640.0, 480.0).expect("valid transform");
        assert_eq!(transform.x_to_pixel(-3.5), 0.0);
        assert_eq!(transform.x_to_pixel(12.25), 640.0);
        assert_eq!(transform.y_to_pixel(-0.1), 480.0);
        assert_eq!(transform.y_to_pixel(7.0), 0.0);
    }

    #[test]
    fn origin_maps_to_center_of_symmetric_viewport() {
        let viewport = Viewport::default();
        let transform = Transform::new(&viewport, 200.0, 100.0).unwrap();
        let center = transform.data_to_screen(Point::new(0.0, 0.0));
        assert_eq!(center, ScreenPoint::new(100.0, 50.0));
    }

    #[test]
    fn rejects_empty_surface() {
        let viewport = Viewport::default();
        assert!(Transform::new(&viewport, 0.0, 100.0).is_none());
        assert!(Transform::new(&viewport, 100.0, -1.0).is_none());
    }
}
