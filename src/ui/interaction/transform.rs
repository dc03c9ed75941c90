use crate::model::{Dimensions, Point};

/// Screen-space rectangle an image is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewportRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, screen: Point) -> bool {
        screen.x >= self.left
            && screen.y >= self.top
            && screen.x < self.left + self.width
            && screen.y < self.top + self.height
    }
}

/// Maps `point` from a buffer of size `from` into the buffer of size `to`.
///
/// Returns the point unchanged when `from` has a zero axis (nothing loaded yet).
/// No rounding happens here; the inspector floors to pixel indices itself.
pub fn map_point(point: Point, from: Dimensions, to: Dimensions) -> Point {
    if from.width == 0 || from.height == 0 {
        return point;
    }
    Point {
        x: point.x * to.width as f64 / from.width as f64,
        y: point.y * to.height as f64 / from.height as f64,
    }
}

/// Converts a pointer position inside `viewport` into image pixel space for
/// an image of `image` size stretched over the whole viewport.
pub fn viewport_to_image(viewport: ViewportRect, image: Dimensions, screen: Point) -> Option<Point> {
    if !viewport.contains(screen) || image.is_empty() {
        return None;
    }

    let u = if viewport.width > 0.0 {
        (screen.x - viewport.left) / viewport.width
    } else {
        0.0
    }
    .clamp(0.0, 1.0);
    let v = if viewport.height > 0.0 {
        (screen.y - viewport.top) / viewport.height
    } else {
        0.0
    }
    .clamp(0.0, 1.0);

    Some(Point::new(u * image.width as f64, v * image.height as f64))
}
