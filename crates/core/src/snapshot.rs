//! Per-step observation input and its validation into board and timer layers.
//!
//! Snapshots are plain JSON. Layers are row-major arrays of rows; the
//! position is either `[row, col]` or `{"row": .., "col": ..}`. The host's
//! own key names (`bomb_life`, `bomb_blast_strength`, `flame_life`) are
//! accepted as aliases.

use serde::{Deserialize, Deserializer, Serialize};

use crate::board::{Board, HazardTimers};
use crate::config::ArenaConfig;
use crate::error::InputError;
use crate::types::Cell;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<usize>,
    #[serde(deserialize_with = "deserialize_position")]
    pub position: Cell,
    pub board: Vec<Vec<u8>>,
    /// Missing timer layers are read as all zeros.
    #[serde(default, alias = "bomb_life")]
    pub bomb_timer: Vec<Vec<u8>>,
    #[serde(default, alias = "bomb_blast_strength")]
    pub blast_strength: Vec<Vec<u8>>,
    #[serde(default, alias = "flame_life")]
    pub residual_timer: Vec<Vec<u8>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PositionRepr {
    Pair(i32, i32),
    Named { row: i32, col: i32 },
}

fn deserialize_position<'de, D>(deserializer: D) -> Result<Cell, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match PositionRepr::deserialize(deserializer)? {
        PositionRepr::Pair(row, col) => Cell { row, col },
        PositionRepr::Named { row, col } => Cell { row, col },
    })
}

/// A validated snapshot: board, timers, and the agent's cell, all the same shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arena {
    pub board: Board,
    pub timers: HazardTimers,
    pub agent: Cell,
}

impl Snapshot {
    pub fn from_json_str(text: &str) -> Result<Self, InputError> {
        serde_json::from_str(text).map_err(|e| InputError::Json(e.to_string()))
    }

    /// Declared side, or the board's row count when none is declared.
    pub fn side(&self) -> usize {
        self.side.unwrap_or(self.board.len())
    }

    pub fn to_arena(&self, config: &ArenaConfig) -> Result<Arena, InputError> {
        let side = self.side();
        if side != config.side {
            return Err(InputError::SideMismatch { configured: config.side, found: side });
        }
        let board = Board::from_rows(&self.board, config.passable)?;
        if board.side() != side {
            return Err(InputError::RowCount { layer: "board", expected: side, found: board.side() });
        }

        let zeros = vec![vec![0u8; side]; side];
        let timers = HazardTimers::from_rows(
            or_zeros(&self.bomb_timer, &zeros),
            or_zeros(&self.blast_strength, &zeros),
            or_zeros(&self.residual_timer, &zeros),
        )?;
        if timers.side() != side {
            return Err(InputError::ShapeMismatch { board: side, timers: timers.side() });
        }

        board.check_cell(self.position)?;
        Ok(Arena { board, timers, agent: self.position })
    }
}

fn or_zeros<'a>(rows: &'a [Vec<u8>], zeros: &'a [Vec<u8>]) -> &'a [Vec<u8>] {
    if rows.is_empty() { zeros } else { rows }
}
