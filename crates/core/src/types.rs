use std::fmt;

use serde::{Deserialize, Serialize};

/// A board coordinate, 0-indexed from the top-left corner.
///
/// Coordinates are signed so that stepping off an edge yields a value that
/// bounds checks can reject instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn manhattan(self, other: Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Unit moves on the grid. `Stop` is only ever the arrival marker of a
/// search start; it is never expanded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Stop,
    Up,
    Down,
    Left,
    Right,
}

/// Expansion order used by every search. Changing it changes which of several
/// equally short paths is returned.
pub const TRAVERSAL_DIRECTIONS: [Direction; 4] =
    [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

impl Direction {
    /// Row and column delta of one step.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Stop => (0, 0),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub const fn action(self) -> Action {
        match self {
            Direction::Stop => Action::Stop,
            Direction::Up => Action::Up,
            Direction::Down => Action::Down,
            Direction::Left => Action::Left,
            Direction::Right => Action::Right,
        }
    }
}

/// Numbered action vocabulary of the host environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    Stop = 0,
    Up = 1,
    Down = 2,
    Left = 3,
    Right = 4,
    Bomb = 5,
}

impl Action {
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Grid move this action performs, if any.
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Action::Stop => Some(Direction::Stop),
            Action::Up => Some(Direction::Up),
            Action::Down => Some(Direction::Down),
            Action::Left => Some(Direction::Left),
            Action::Right => Some(Direction::Right),
            Action::Bomb => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_direction_translates_back_through_its_action() {
        let all = [Direction::Stop, Direction::Up, Direction::Down, Direction::Left, Direction::Right];
        for direction in all {
            assert_eq!(direction.action().direction(), Some(direction), "{direction:?}");
        }
        assert_eq!(Action::Bomb.direction(), None);
    }

    #[test]
    fn action_codes_match_host_numbering() {
        let codes: Vec<u8> = [
            Action::Stop,
            Action::Up,
            Action::Down,
            Action::Left,
            Action::Right,
            Action::Bomb,
        ]
        .into_iter()
        .map(Action::code)
        .collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn traversal_directions_cancel_out() {
        let (dr, dc) = TRAVERSAL_DIRECTIONS.iter().fold((0, 0), |(r, c), d| {
            let (sr, sc) = d.delta();
            (r + sr, c + sc)
        });
        assert_eq!((dr, dc), (0, 0));
        assert!(!TRAVERSAL_DIRECTIONS.contains(&Direction::Stop));
    }
}
