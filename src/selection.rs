use crate::grid::{Coord, Grid};
use itertools::Itertools;

/// How the cells of a selection line up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    /// All cells share one row
    Row(usize),
    /// All cells share one column
    Column(usize),
    Unaligned,
}

/// The cells dragged across between a press and a release, in drag order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    cells: Vec<Coord>,
}

impl Selection {
    pub fn begin(coord: Coord) -> Self {
        Self { cells: vec![coord] }
    }

    /// Appends unconditionally; nothing is validated until the gesture ends
    pub fn push(&mut self, coord: Coord) {
        self.cells.push(coord);
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn last(&self) -> Option<Coord> {
        self.cells.last().copied()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn alignment(&self) -> Alignment {
        let Some(first) = self.cells.first() else {
            return Alignment::Unaligned;
        };

        if self.cells.iter().map(|c| c.row).all_equal() {
            Alignment::Row(first.row)
        } else if self.cells.iter().map(|c| c.col).all_equal() {
            Alignment::Column(first.col)
        } else {
            Alignment::Unaligned
        }
    }

    /// Letters under the selection in drag order. `None` if the selection is
    /// not a single row or column, or runs off the grid.
    pub fn spell(&self, grid: &Grid) -> Option<String> {
        if self.alignment() == Alignment::Unaligned {
            return None;
        }
        self.cells.iter().map(|&c| grid.get(c)).collect()
    }
}
