mod cursor;
mod inspector;
mod selection;
mod transform;

pub use cursor::CursorState;
pub use inspector::{Cell, InspectorGrid, Inspection, NEIGHBOR_SIZE, RADIUS, inspect};
pub use selection::{DragState, Region, RegionSelector};
pub use transform::{ViewportRect, map_point, viewport_to_image};
