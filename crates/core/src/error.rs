//! Caller contract violations detected at the crate boundary.
//!
//! An unreachable target is not an error; searches report it as `None`.

use std::io;

use thiserror::Error;

use crate::types::Cell;

/// Malformed board, timer, or coordinate input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("board side must be between 1 and {max}, got {side}")]
    InvalidSide { side: usize, max: usize },

    #[error("{layer} has {found} rows, expected {expected}")]
    RowCount { layer: &'static str, expected: usize, found: usize },

    #[error("{layer} row {row} has {found} cells, expected {expected}")]
    RowWidth { layer: &'static str, row: usize, expected: usize, found: usize },

    #[error("cell {cell} is outside a {side}x{side} board")]
    CellOutOfBounds { cell: Cell, side: usize },

    #[error("hazard timers cover a {timers}x{timers} board but the board is {board}x{board}")]
    ShapeMismatch { board: usize, timers: usize },

    #[error("snapshot side {found} does not match configured side {configured}")]
    SideMismatch { configured: usize, found: usize },

    #[error("snapshot JSON is malformed: {0}")]
    Json(String),
}

/// Failure to load an [`ArenaConfig`](crate::config::ArenaConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] InputError),
}
