//! One decision step's escape routing: hazard map, nearest safe cell, route.
//! This module exists so callers run the hazard and search pieces in one fixed order.
//! It does not decide whether to place bombs or chase goals; the caller owns that.

use tracing::debug;

use crate::error::InputError;
use crate::hazard::{self, HazardMap, MergePolicy};
use crate::search::{find_nearest, find_path};
use crate::snapshot::Arena;
use crate::types::{Action, Cell, Direction};

/// Result of looking for the nearest safe cell from the agent's position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EscapePlan {
    pub hazard: HazardMap,
    pub start: Cell,
    /// Chosen destination; equals `start` when already safe or when nothing safe is reachable.
    pub target: Cell,
    pub path: Option<Vec<Direction>>,
}

impl EscapePlan {
    pub fn start_is_safe(&self) -> bool {
        self.hazard.is_safe(self.start)
    }

    /// Whether `target` is safe. False means no safe cell was reachable.
    pub fn found_safe_cell(&self) -> bool {
        self.hazard.is_safe(self.target)
    }

    pub fn actions(&self) -> Vec<Action> {
        to_actions(self.path.as_deref().unwrap_or_default())
    }
}

/// Host actions for a move sequence. An empty sequence becomes a single `Stop`.
pub fn to_actions(path: &[Direction]) -> Vec<Action> {
    if path.is_empty() {
        return vec![Action::Stop];
    }
    path.iter().map(|direction| direction.action()).collect()
}

pub fn plan_escape(arena: &Arena, policy: MergePolicy) -> Result<EscapePlan, InputError> {
    let hazard = hazard::compute(&arena.board, &arena.timers, policy)?;
    let start = arena.agent;
    let target = find_nearest(&arena.board, start, |cell| hazard.is_safe(cell))?;
    let path = find_path(&arena.board, start, target)?;

    debug!(
        %start,
        %target,
        safe = hazard.is_safe(target),
        steps = ?path.as_ref().map(Vec::len),
        "escape planned"
    );
    Ok(EscapePlan { hazard, start, target, path })
}

/// Host actions that walk the agent to `goal`, or `None` when it is unreachable.
pub fn plan_route(arena: &Arena, goal: Cell) -> Result<Option<Vec<Action>>, InputError> {
    Ok(find_path(&arena.board, arena.agent, goal)?.map(|path| to_actions(&path)))
}
