use serde::{Deserialize, Serialize};

use crate::model::{Dimensions, Point};

/// Axis-aligned selection in source pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Region {
    pub fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn fits(&self, bounds: Dimensions) -> bool {
        self.x + self.w <= bounds.width && self.y + self.h <= bounds.height
    }

    /// Rectangle spanned by two drag points, each clamped into `bounds` first
    /// so the result never reaches past the buffer edge.
    pub fn spanning(start: (i64, i64), current: (i64, i64), bounds: Dimensions) -> Self {
        let clamp_x = |value: i64| value.clamp(0, bounds.width as i64) as usize;
        let clamp_y = |value: i64| value.clamp(0, bounds.height as i64) as usize;
        let (sx, cx) = (clamp_x(start.0), clamp_x(current.0));
        let (sy, cy) = (clamp_y(start.1), clamp_y(current.1));
        Self {
            x: sx.min(cx),
            y: sy.min(cy),
            w: sx.abs_diff(cx),
            h: sy.abs_diff(cy),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        start: (i64, i64),
    },
}

/// Drag-to-select state machine used to drive crop requests.
#[derive(Debug, Clone, Default)]
pub struct RegionSelector {
    enabled: bool,
    state: DragState,
    region: Region,
    bounds: Dimensions,
}

impl RegionSelector {
    pub fn new(bounds: Dimensions) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Toggling mode never aborts a drag in progress; `release` always ends it.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn toggle_enabled(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn bounds(&self) -> Dimensions {
        self.bounds
    }

    /// Starts a drag. Ignored unless selection mode is on and the press lands
    /// inside the buffer.
    pub fn press(&mut self, at: Point) -> bool {
        let pixel = at.pixel();
        if !self.enabled || !self.bounds.contains(pixel.0, pixel.1) {
            return false;
        }
        self.state = DragState::Dragging { start: pixel };
        self.region = Region::spanning(pixel, pixel, self.bounds);
        true
    }

    pub fn drag_to(&mut self, at: Point) {
        if let DragState::Dragging { start } = self.state {
            self.region = Region::spanning(start, at.pixel(), self.bounds);
        }
    }

    /// Ends any drag and leaves the last rectangle committed.
    pub fn release(&mut self) -> Region {
        self.state = DragState::Idle;
        self.region
    }

    pub fn reset(&mut self) {
        self.state = DragState::Idle;
        self.region = Region::default();
    }

    /// Rebinds the selector to a buffer of new size. A shrinking buffer drops
    /// the selection instead of leaving it out of bounds.
    pub fn set_bounds(&mut self, bounds: Dimensions) {
        let shrinks = bounds.shrinks_from(self.bounds);
        self.bounds = bounds;
        if shrinks || !self.region.fits(bounds) {
            self.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DragState, Region, RegionSelector};
    use crate::model::{Dimensions, Point};

    fn selector() -> RegionSelector {
        let mut selector = RegionSelector::new(Dimensions::new(100, 100));
        selector.set_enabled(true);
        selector
    }

    #[test]
    fn drag_up_and_left_normalizes_rectangle() {
        let mut selector = selector();
        assert!(selector.press(Point::new(50.0, 50.0)));
        selector.drag_to(Point::new(10.0, 30.0));
        assert_eq!(selector.release(), Region::new(10, 30, 40, 20));
        assert_eq!(selector.state(), DragState::Idle);
    }

    #[test]
    fn drag_past_edge_is_clamped() {
        let mut selector = selector();
        selector.press(Point::new(50.0, 50.0));
        selector.drag_to(Point::new(150.0, 10.0));
        let region = selector.release();
        assert_eq!(region, Region::new(50, 10, 50, 40));
        assert!(region.x + region.w <= 100);

        selector.press(Point::new(20.0, 20.0));
        selector.drag_to(Point::new(-30.0, -5.0));
        assert_eq!(selector.release(), Region::new(0, 0, 20, 20));
    }

    #[test]
    fn press_requires_selection_mode_and_bounds() {
        let mut selector = RegionSelector::new(Dimensions::new(100, 100));
        assert!(!selector.press(Point::new(10.0, 10.0)));
        selector.set_enabled(true);
        assert!(!selector.press(Point::new(100.0, 10.0)));
        assert!(!selector.is_dragging());
        selector.drag_to(Point::new(50.0, 50.0));
        assert!(selector.region().is_empty());
    }

    #[test]
    fn disabling_mode_mid_drag_still_releases() {
        let mut selector = selector();
        selector.press(Point::new(5.0, 5.0));
        assert!(!selector.toggle_enabled());
        selector.drag_to(Point::new(15.0, 25.0));
        assert!(selector.is_dragging());
        assert_eq!(selector.release(), Region::new(5, 5, 10, 20));
        assert!(!selector.is_dragging());
        assert!(!selector.press(Point::new(5.0, 5.0)));
    }

    #[test]
    fn release_without_press_keeps_committed_region() {
        let mut selector = selector();
        selector.press(Point::new(1.0, 1.0));
        selector.drag_to(Point::new(4.0, 4.0));
        selector.release();
        assert_eq!(selector.release(), Region::new(1, 1, 3, 3));
    }

    #[test]
    fn shrinking_bounds_reset_selection() {
        let mut selector = selector();
        selector.press(Point::new(10.0, 10.0));
        selector.drag_to(Point::new(30.0, 30.0));
        selector.release();
        selector.set_bounds(Dimensions::new(120, 120));
        assert_eq!(selector.region(), Region::new(10, 10, 20, 20));
        selector.set_bounds(Dimensions::new(40, 120));
        assert_eq!(selector.region(), Region::default());
    }
}
