//! Square-grid geometry: bounds, unit steps, and neighbour enumeration.
//! This module exists so every caller bounds-checks cells the same way.
//! It does not know what is stored in the cells.

use crate::types::{Cell, Direction, TRAVERSAL_DIRECTIONS};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Topology {
    side: usize,
}

impl Topology {
    pub const fn new(side: usize) -> Self {
        Self { side }
    }

    pub const fn side(self) -> usize {
        self.side
    }

    pub const fn cell_count(self) -> usize {
        self.side * self.side
    }

    pub fn in_bounds(self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.side
            && (cell.col as usize) < self.side
    }

    /// Coordinate-wise addition. The result may lie off the board.
    pub fn step(self, cell: Cell, direction: Direction) -> Cell {
        let (dr, dc) = direction.delta();
        Cell { row: cell.row + dr, col: cell.col + dc }
    }

    /// Row-major index of an in-bounds cell.
    pub fn index(self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell).then(|| (cell.row as usize) * self.side + (cell.col as usize))
    }

    /// Inverse of [`Topology::index`].
    pub fn cell_at(self, index: usize) -> Cell {
        Cell { row: (index / self.side) as i32, col: (index % self.side) as i32 }
    }

    /// In-bounds neighbours in traversal order, paired with the move that reaches them.
    pub fn neighbors(self, cell: Cell) -> impl Iterator<Item = (Direction, Cell)> {
        TRAVERSAL_DIRECTIONS
            .into_iter()
            .map(move |direction| (direction, self.step(cell, direction)))
            .filter(move |(_, next)| self.in_bounds(*next))
    }

    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.cell_count()).map(move |index| self.cell_at(index))
    }
}
