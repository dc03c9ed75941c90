use std::fmt;

use crate::model::{PixelBuffer, Point, Rgb};

pub const NEIGHBOR_SIZE: usize = 5;
pub const RADIUS: i64 = (NEIGHBOR_SIZE / 2) as i64;

/// One inspector cell. `Absent` marks a neighbour outside the buffer and is
/// never confused with a black sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Sample(Rgb),
    Absent,
}

impl Cell {
    pub fn sample(&self) -> Option<Rgb> {
        match self {
            Self::Sample(rgb) => Some(*rgb),
            Self::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sample(rgb) => write!(formatter, "{rgb}"),
            Self::Absent => formatter.write_str("--"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectorGrid {
    /// Floored focal pixel.
    pub focus: (i64, i64),
    cells: [[Cell; NEIGHBOR_SIZE]; NEIGHBOR_SIZE],
}

impl InspectorGrid {
    /// Cell at `row`, `col`, where (RADIUS, RADIUS) is the focal pixel.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|cells| cells.get(col)).copied()
    }

    /// Cell at an offset from the focal pixel.
    pub fn at_offset(&self, dx: i64, dy: i64) -> Option<Cell> {
        if dx.abs() > RADIUS || dy.abs() > RADIUS {
            return None;
        }
        self.cell((dy + RADIUS) as usize, (dx + RADIUS) as usize)
    }

    pub fn center(&self) -> Cell {
        self.cells[RADIUS as usize][RADIUS as usize]
    }

    pub fn rows(&self) -> &[[Cell; NEIGHBOR_SIZE]; NEIGHBOR_SIZE] {
        &self.cells
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inspection {
    /// Nothing to show: no buffer, no focal point, or a zero-width buffer.
    Empty,
    Grid(InspectorGrid),
}

impl Inspection {
    pub fn grid(&self) -> Option<&InspectorGrid> {
        match self {
            Self::Grid(grid) => Some(grid),
            Self::Empty => None,
        }
    }
}

pub fn inspect(buffer: Option<&PixelBuffer>, focal: Option<Point>) -> Inspection {
    let (Some(buffer), Some(focal)) = (buffer, focal) else {
        return Inspection::Empty;
    };
    if buffer.width() == 0 || !focal.x.is_finite() || !focal.y.is_finite() {
        return Inspection::Empty;
    }

    let (px, py) = focal.pixel();
    let mut cells = [[Cell::Absent; NEIGHBOR_SIZE]; NEIGHBOR_SIZE];
    for (row, dy) in (-RADIUS..=RADIUS).enumerate() {
        for (col, dx) in (-RADIUS..=RADIUS).enumerate() {
            if let Some(rgb) = buffer.get(px.saturating_add(dx), py.saturating_add(dy)) {
                cells[row][col] = Cell::Sample(rgb);
            }
        }
    }

    Inspection::Grid(InspectorGrid {
        focus: (px, py),
        cells,
    })
}
