//! Hazard-map construction from bomb countdowns and lingering flames.
//! This module exists so danger classification is computed one way for every query.
//! It does not decide where to go; searches read the map through a predicate.

use std::fmt;
use std::hash::Hasher;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use xxhash_rust::xxh3::Xxh3;

use crate::board::{Board, HazardTimers};
use crate::error::InputError;
use crate::grid::Topology;
use crate::types::{Cell, TRAVERSAL_DIRECTIONS};

/// How a blast combines with a value already written to a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// Keep the larger timer.
    #[default]
    Max,
    /// Keep the smallest non-zero timer, the most imminent danger.
    Soonest,
    /// Last bomb in row-major order wins.
    Overwrite,
}

impl MergePolicy {
    fn merge(self, current: u8, incoming: u8) -> u8 {
        match self {
            MergePolicy::Max => current.max(incoming),
            MergePolicy::Soonest if current == 0 => incoming,
            MergePolicy::Soonest => current.min(incoming),
            MergePolicy::Overwrite => incoming,
        }
    }
}

/// Per-cell danger: 0 safe, 1 lethal now, `k > 1` lethal in `k - 1` steps.
#[derive(Clone, PartialEq, Eq)]
pub struct HazardMap {
    topology: Topology,
    values: Vec<u8>,
}

impl HazardMap {
    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn side(&self) -> usize {
        self.topology.side()
    }

    /// Hazard value of a cell; off-board cells read as `None`.
    pub fn value(&self, cell: Cell) -> Option<u8> {
        self.topology.index(cell).map(|index| self.values[index])
    }

    pub fn is_safe(&self, cell: Cell) -> bool {
        self.value(cell) == Some(0)
    }

    pub fn is_lethal_now(&self, cell: Cell) -> bool {
        self.value(cell) == Some(1)
    }

    pub fn safe_cell_count(&self) -> usize {
        self.values.iter().filter(|value| **value == 0).count()
    }

    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.values.chunks(self.side()).map(<[u8]>::to_vec).collect()
    }

    /// Stable digest of the map contents for determinism checks.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.side() as u64);
        hasher.write(&self.values);
        hasher.finish()
    }
}

impl fmt::Debug for HazardMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HazardMap").field("side", &self.side()).field("rows", &self.rows()).finish()
    }
}

impl fmt::Display for HazardMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.values.chunks(self.side()) {
            let line: Vec<String> = row.iter().map(u8::to_string).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Builds a fresh hazard map. Inputs are only read.
///
/// Flames seed the map as lethal-now. Each bomb then writes its timer along
/// a `+` of reach `strength - 1` around its cell, clipped at the board edge
/// and not stopped by obstacles.
pub fn compute(
    board: &Board,
    timers: &HazardTimers,
    policy: MergePolicy,
) -> Result<HazardMap, InputError> {
    if board.side() != timers.side() {
        return Err(InputError::ShapeMismatch { board: board.side(), timers: timers.side() });
    }
    let topology = board.topology();
    let mut values: Vec<u8> =
        timers.residual_layer().iter().map(|residual| u8::from(*residual > 0)).collect();

    let mut bomb_count = 0usize;
    for (center, timer, strength) in timers.bombs() {
        bomb_count += 1;
        let reach = i32::from(strength.saturating_sub(1));
        trace!(%center, timer, reach, "projecting blast");
        for direction in TRAVERSAL_DIRECTIONS {
            let (dr, dc) = direction.delta();
            for distance in 0..=reach {
                let cell = Cell { row: center.row + dr * distance, col: center.col + dc * distance };
                let Some(index) = topology.index(cell) else {
                    break;
                };
                values[index] = policy.merge(values[index], timer);
            }
        }
    }

    let map = HazardMap { topology, values };
    debug!(
        bombs = bomb_count,
        safe_cells = map.safe_cell_count(),
        ?policy,
        "hazard map computed"
    );
    Ok(map)
}
