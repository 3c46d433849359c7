//! Breadth-first grid search over a board's passable cells.
//! This module exists so target routing and nearest-cell lookup share one traversal.
//! It does not interpret hazards; callers express them through the predicate.

use std::collections::VecDeque;

use tracing::debug;

use crate::board::Board;
use crate::error::InputError;
use crate::grid::Topology;
use crate::types::{Cell, Direction};

/// How a visited cell was first reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Arrival {
    from: Cell,
    via: Direction,
}

/// Frontier, visited set, and arrival links for one search call.
struct SearchState {
    topology: Topology,
    frontier: VecDeque<Cell>,
    arrivals: Vec<Option<Arrival>>,
    explored: usize,
}

impl SearchState {
    fn new(topology: Topology, start: Cell) -> Self {
        let mut state = Self {
            topology,
            frontier: VecDeque::with_capacity(topology.cell_count()),
            arrivals: vec![None; topology.cell_count()],
            explored: 0,
        };
        state.visit(start, Arrival { from: start, via: Direction::Stop });
        state
    }

    fn is_visited(&self, cell: Cell) -> bool {
        self.topology.index(cell).is_some_and(|index| self.arrivals[index].is_some())
    }

    fn visit(&mut self, cell: Cell, arrival: Arrival) {
        if let Some(index) = self.topology.index(cell) {
            self.arrivals[index] = Some(arrival);
            self.frontier.push_back(cell);
        }
    }

    fn pop(&mut self) -> Option<Cell> {
        let cell = self.frontier.pop_front()?;
        self.explored += 1;
        Some(cell)
    }

    /// Enqueues every unvisited neighbour of `cell` accepted by `admit`.
    fn expand<Admit>(&mut self, cell: Cell, mut admit: Admit)
    where
        Admit: FnMut(Direction, Cell) -> bool,
    {
        for (direction, next) in self.topology.neighbors(cell) {
            if self.is_visited(next) || !admit(direction, next) {
                continue;
            }
            self.visit(next, Arrival { from: cell, via: direction });
        }
    }

    /// Walks arrival links back from `goal` to the start.
    fn path_to(&self, goal: Cell) -> Vec<Direction> {
        let mut path = Vec::new();
        let mut current = goal;
        while let Some(arrival) = self.topology.index(current).and_then(|index| self.arrivals[index])
        {
            if arrival.via == Direction::Stop {
                break;
            }
            path.push(arrival.via);
            current = arrival.from;
        }
        path.reverse();
        path
    }
}

/// Shortest move sequence from `start` to `goal`, or `None` when `goal`
/// cannot be reached.
///
/// Intermediate cells must be passable. The goal itself only has to be
/// adjacent to an explored cell, so an occupied or blocked target can still
/// be walked up to.
pub fn find_path(
    board: &Board,
    start: Cell,
    goal: Cell,
) -> Result<Option<Vec<Direction>>, InputError> {
    board.check_cell(start)?;
    board.check_cell(goal)?;

    let mut state = SearchState::new(board.topology(), start);
    let mut found = None;
    while let Some(cell) = state.pop() {
        if cell == goal {
            found = Some(state.path_to(goal));
            break;
        }
        state.expand(cell, |direction, next| next == goal || board.can_enter(cell, direction));
    }

    debug!(
        %start,
        %goal,
        explored = state.explored,
        steps = ?found.as_ref().map(Vec::len),
        "path search finished"
    );
    Ok(found)
}

/// Nearest cell reachable from `start` that satisfies `predicate`.
///
/// `start` is tested first and returned as-is when it qualifies. When no
/// reachable cell qualifies the search falls back to `start`.
pub fn find_nearest<Predicate>(
    board: &Board,
    start: Cell,
    mut predicate: Predicate,
) -> Result<Cell, InputError>
where
    Predicate: FnMut(Cell) -> bool,
{
    board.check_cell(start)?;

    let mut state = SearchState::new(board.topology(), start);
    let mut found = None;
    while let Some(cell) = state.pop() {
        if predicate(cell) {
            found = Some(cell);
            break;
        }
        state.expand(cell, |direction, _| board.can_enter(cell, direction));
    }

    debug!(%start, explored = state.explored, found = ?found, "nearest-cell search finished");
    Ok(found.unwrap_or(start))
}

/// Cells visited when `path` is walked from `start`, excluding `start`.
pub fn apply_path(board: &Board, start: Cell, path: &[Direction]) -> Result<Vec<Cell>, InputError> {
    board.check_cell(start)?;
    let topology = board.topology();
    let mut current = start;
    let mut visited = Vec::with_capacity(path.len());
    for direction in path {
        current = topology.step(current, *direction);
        board.check_cell(current)?;
        visited.push(current);
    }
    Ok(visited)
}
