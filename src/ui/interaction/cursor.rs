use crate::model::Point;

/// Hover position in source pixel space plus an optional frozen copy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorState {
    hover: Option<Point>,
    locked: Option<Point>,
}

impl CursorState {
    pub fn hover(&mut self, at: Point) {
        self.hover = Some(at);
    }

    pub fn leave(&mut self) {
        self.hover = None;
    }

    /// Locks at the hover position, or unlocks if already locked.
    pub fn toggle_lock(&mut self) -> bool {
        self.locked = match self.locked {
            Some(_) => None,
            None => self.hover,
        };
        self.locked.is_some()
    }

    pub fn unlock(&mut self) {
        self.locked = None;
    }

    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }

    /// Locked position wins over the live hover position.
    pub fn focus(&self) -> Option<Point> {
        self.locked.or(self.hover)
    }
}
