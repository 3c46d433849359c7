pub mod board;
pub mod config;
pub mod error;
pub mod grid;
pub mod hazard;
pub mod planner;
pub mod search;
pub mod snapshot;
pub mod types;

pub use board::{Board, HazardTimers, MAX_SIDE, PASSAGE};
pub use config::ArenaConfig;
pub use error::{ConfigError, InputError};
pub use grid::Topology;
pub use hazard::{HazardMap, MergePolicy};
pub use planner::{EscapePlan, plan_escape, plan_route, to_actions};
pub use search::{apply_path, find_nearest, find_path};
pub use snapshot::{Arena, Snapshot};
pub use types::*;
