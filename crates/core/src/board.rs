//! Board snapshots and the passability rule used by every search.
//! This module exists to keep terrain interpretation in one place.
//! It does not own hazard timing; timers live alongside in [`HazardTimers`].

use crate::error::InputError;
use crate::grid::Topology;
use crate::types::{Cell, Direction};

/// Largest arena side accepted at the boundary.
pub const MAX_SIDE: usize = 256;

/// Terrain code of an open passage in the host's item numbering.
pub const PASSAGE: u8 = 0;

pub fn validate_side(side: usize) -> Result<Topology, InputError> {
    if side == 0 || side > MAX_SIDE {
        return Err(InputError::InvalidSide { side, max: MAX_SIDE });
    }
    Ok(Topology::new(side))
}

/// Flattens a square layer, checking it has exactly `side` rows of `side` values.
pub(crate) fn flatten_layer(
    layer: &'static str,
    rows: &[Vec<u8>],
    side: usize,
) -> Result<Vec<u8>, InputError> {
    if rows.len() != side {
        return Err(InputError::RowCount { layer, expected: side, found: rows.len() });
    }
    let mut flat = Vec::with_capacity(side * side);
    for (row, values) in rows.iter().enumerate() {
        if values.len() != side {
            return Err(InputError::RowWidth { layer, row, expected: side, found: values.len() });
        }
        flat.extend_from_slice(values);
    }
    Ok(flat)
}

/// Terrain codes for one decision step. Only the passable code is
/// interpreted; every other code is an obstacle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    topology: Topology,
    passable: u8,
    tiles: Vec<u8>,
}

impl Board {
    /// A board with every cell set to `code`.
    pub fn filled(side: usize, code: u8, passable: u8) -> Result<Self, InputError> {
        let topology = validate_side(side)?;
        Ok(Self { topology, passable, tiles: vec![code; topology.cell_count()] })
    }

    /// An all-passable board.
    pub fn open(side: usize, passable: u8) -> Result<Self, InputError> {
        Self::filled(side, passable, passable)
    }

    pub fn from_rows(rows: &[Vec<u8>], passable: u8) -> Result<Self, InputError> {
        let topology = validate_side(rows.len())?;
        let tiles = flatten_layer("board", rows, topology.side())?;
        Ok(Self { topology, passable, tiles })
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn side(&self) -> usize {
        self.topology.side()
    }

    pub fn passable_code(&self) -> u8 {
        self.passable
    }

    pub fn tile_at(&self, cell: Cell) -> Option<u8> {
        self.topology.index(cell).map(|index| self.tiles[index])
    }

    pub fn set_tile(&mut self, cell: Cell, code: u8) {
        if let Some(index) = self.topology.index(cell) {
            self.tiles[index] = code;
        }
    }

    pub fn is_passable(&self, cell: Cell) -> bool {
        self.tile_at(cell) == Some(self.passable)
    }

    /// Whether moving from `from` in `direction` lands on an in-bounds
    /// passable cell. Hazards never block movement here.
    pub fn can_enter(&self, from: Cell, direction: Direction) -> bool {
        self.is_passable(self.topology.step(from, direction))
    }

    pub fn check_cell(&self, cell: Cell) -> Result<(), InputError> {
        if self.topology.in_bounds(cell) {
            Ok(())
        } else {
            Err(InputError::CellOutOfBounds { cell, side: self.side() })
        }
    }
}

/// Per-cell bomb countdowns, blast reach, and lingering flame countdowns.
///
/// All three layers share the board's row-major layout. A zero timer means
/// nothing is there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HazardTimers {
    topology: Topology,
    bomb_timer: Vec<u8>,
    blast_strength: Vec<u8>,
    residual_timer: Vec<u8>,
}

impl HazardTimers {
    pub fn empty(side: usize) -> Result<Self, InputError> {
        let topology = validate_side(side)?;
        let cells = topology.cell_count();
        Ok(Self {
            topology,
            bomb_timer: vec![0; cells],
            blast_strength: vec![0; cells],
            residual_timer: vec![0; cells],
        })
    }

    pub fn from_rows(
        bomb_timer: &[Vec<u8>],
        blast_strength: &[Vec<u8>],
        residual_timer: &[Vec<u8>],
    ) -> Result<Self, InputError> {
        let topology = validate_side(bomb_timer.len())?;
        let side = topology.side();
        Ok(Self {
            topology,
            bomb_timer: flatten_layer("bomb_timer", bomb_timer, side)?,
            blast_strength: flatten_layer("blast_strength", blast_strength, side)?,
            residual_timer: flatten_layer("residual_timer", residual_timer, side)?,
        })
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn side(&self) -> usize {
        self.topology.side()
    }

    /// Places a bomb; out-of-bounds cells are ignored.
    pub fn place_bomb(&mut self, cell: Cell, timer: u8, strength: u8) {
        if let Some(index) = self.topology.index(cell) {
            self.bomb_timer[index] = timer;
            self.blast_strength[index] = strength;
        }
    }

    pub fn set_residual(&mut self, cell: Cell, timer: u8) {
        if let Some(index) = self.topology.index(cell) {
            self.residual_timer[index] = timer;
        }
    }

    pub fn bomb_timer(&self, cell: Cell) -> u8 {
        self.topology.index(cell).map_or(0, |index| self.bomb_timer[index])
    }

    pub fn blast_strength(&self, cell: Cell) -> u8 {
        self.topology.index(cell).map_or(0, |index| self.blast_strength[index])
    }

    pub fn residual_timer(&self, cell: Cell) -> u8 {
        self.topology.index(cell).map_or(0, |index| self.residual_timer[index])
    }

    /// Live bombs in row-major order as `(cell, timer, strength)`.
    pub fn bombs(&self) -> impl Iterator<Item = (Cell, u8, u8)> + '_ {
        self.bomb_timer
            .iter()
            .enumerate()
            .filter(|(_, timer)| **timer > 0)
            .map(|(index, timer)| (self.topology.cell_at(index), *timer, self.blast_strength[index]))
    }

    pub(crate) fn residual_layer(&self) -> &[u8] {
        &self.residual_timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_enter_requires_bounds_and_passable_code() {
        let mut board = Board::open(4, PASSAGE).expect("board");
        board.set_tile(Cell::new(1, 2), 1);

        assert!(board.can_enter(Cell::new(1, 1), Direction::Down));
        assert!(!board.can_enter(Cell::new(1, 1), Direction::Right), "rigid wall");
        assert!(!board.can_enter(Cell::new(0, 0), Direction::Up), "off the top edge");
        assert!(!board.can_enter(Cell::new(3, 3), Direction::Right), "off the right edge");
    }

    #[test]
    fn non_passage_codes_are_uniform_obstacles() {
        let mut board = Board::open(3, PASSAGE).expect("board");
        for (col, code) in [2u8, 6, 10].into_iter().enumerate() {
            board.set_tile(Cell::new(1, col as i32), code);
        }
        for col in 0..3 {
            assert!(!board.can_enter(Cell::new(0, col), Direction::Down));
        }
    }

    #[test]
    fn custom_passable_code_is_honoured() {
        let board = Board::filled(3, 7, 7).expect("board");
        assert!(board.can_enter(Cell::new(0, 0), Direction::Right));
        let blocked = Board::filled(3, 0, 7).expect("board");
        assert!(!blocked.can_enter(Cell::new(0, 0), Direction::Right));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows = vec![vec![0, 0, 0], vec![0, 0], vec![0, 0, 0]];
        assert_eq!(
            Board::from_rows(&rows, PASSAGE),
            Err(InputError::RowWidth { layer: "board", row: 1, expected: 3, found: 2 })
        );
    }

    #[test]
    fn empty_and_oversized_sides_are_rejected() {
        assert!(matches!(Board::open(0, PASSAGE), Err(InputError::InvalidSide { side: 0, .. })));
        assert!(matches!(
            HazardTimers::empty(MAX_SIDE + 1),
            Err(InputError::InvalidSide { .. })
        ));
    }

    #[test]
    fn timer_layers_must_share_the_board_shape() {
        let square = vec![vec![0u8; 3]; 3];
        let short = vec![vec![0u8; 3]; 2];
        assert_eq!(
            HazardTimers::from_rows(&square, &short, &square),
            Err(InputError::RowCount { layer: "blast_strength", expected: 3, found: 2 })
        );
    }

    #[test]
    fn bombs_are_listed_in_row_major_order() {
        let mut timers = HazardTimers::empty(5).expect("timers");
        timers.place_bomb(Cell::new(3, 1), 4, 2);
        timers.place_bomb(Cell::new(0, 4), 9, 3);
        let bombs: Vec<_> = timers.bombs().collect();
        assert_eq!(bombs, vec![(Cell::new(0, 4), 9, 3), (Cell::new(3, 1), 4, 2)]);
    }
}
