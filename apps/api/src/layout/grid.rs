//! Grid Slot Allocator: a coarse spatial index over the safe interior of a spread.
//!
//! Cells are `cell_size × cell_size`, laid out row-major from the top-left safe
//! corner. Partial cells at the right/bottom edges are not included. The grid is
//! occupancy bookkeeping only: it reports how much of the spread is covered, it
//! does not veto placements (see `OverlapPolicy` for that).

use serde::{Deserialize, Serialize};

use crate::layout::models::{Rect, SpreadConfig};

/// Cell edge used by the generator when none is configured.
pub const DEFAULT_CELL_SIZE: f64 = 50.0;

/// Upper bound on the number of cells in one grid. Larger spreads get coarser cells.
pub const MAX_GRID_CELLS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSlot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub occupied: bool,
}

impl LayoutSlot {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Partitions the safe interior of `spread` into uniform cells, all unoccupied.
pub fn build_grid(spread: &SpreadConfig, cell_size: f64) -> Vec<LayoutSlot> {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Vec::new();
    }

    let area = spread.safe_area();
    if area.is_empty() {
        return Vec::new();
    }

    let cell_size = bounded_cell_size(area.width(), area.height(), cell_size);
    let cols = (area.width() / cell_size).floor() as usize;
    let rows = (area.height() / cell_size).floor() as usize;

    let mut slots = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            slots.push(LayoutSlot {
                x: area.left + col as f64 * cell_size,
                y: area.top + row as f64 * cell_size,
                width: cell_size,
                height: cell_size,
                occupied: false,
            });
        }
    }
    slots
}

/// Grows `cell_size` until a `width × height` area holds at most `MAX_GRID_CELLS` cells.
fn bounded_cell_size(width: f64, height: f64, cell_size: f64) -> f64 {
    let count = |cell: f64| (width / cell).floor() * (height / cell).floor();
    let budget = MAX_GRID_CELLS as f64;

    let mut cell = cell_size;
    let cells = count(cell);
    if cells > budget {
        cell *= (cells / budget).sqrt();
        while count(cell) > budget {
            cell *= 1.01;
        }
    }
    cell
}

/// A built grid with occupancy tracking.
#[derive(Debug, Clone)]
pub struct SlotGrid {
    slots: Vec<LayoutSlot>,
}

impl SlotGrid {
    pub fn new(spread: &SpreadConfig, cell_size: f64) -> Self {
        Self {
            slots: build_grid(spread, cell_size),
        }
    }

    /// Marks every cell whose interior intersects `rect`. Returns how many cells changed.
    pub fn occupy(&mut self, rect: &Rect) -> usize {
        let mut newly_occupied = 0;
        for slot in self.slots.iter_mut().filter(|s| !s.occupied) {
            if intersects_interior(&slot.rect(), rect) {
                slot.occupied = true;
                newly_occupied += 1;
            }
        }
        newly_occupied
    }

    /// Fraction of cells occupied, `0.0` for an empty grid.
    pub fn coverage(&self) -> f64 {
        if self.slots.is_empty() {
            return 0.0;
        }
        let occupied = self.slots.iter().filter(|s| s.occupied).count();
        occupied as f64 / self.slots.len() as f64
    }
}

/// Strict intersection; rectangles sharing only an edge do not intersect.
fn intersects_interior(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}
