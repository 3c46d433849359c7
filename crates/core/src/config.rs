//! Arena parameters loaded from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{PASSAGE, validate_side};
use crate::error::ConfigError;
use crate::hazard::MergePolicy;

pub const DEFAULT_SIDE: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    /// Board side length in cells.
    pub side: usize,
    /// Terrain code treated as enterable.
    pub passable: u8,
    /// Combination rule for overlapping blasts.
    pub merge: MergePolicy,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self { side: DEFAULT_SIDE, passable: PASSAGE, merge: MergePolicy::Max }
    }
}

impl ArenaConfig {
    pub fn for_side(side: usize) -> Self {
        Self { side, ..Self::default() }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_side(self.side)?;
        Ok(())
    }
}
