//! Tunable run rules.
//! This module exists to keep balance numbers out of the controller and loadable from TOML.
//! It does not own grid dimensions or catalog data, which are compile-time constants.

use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;
use std::{fmt, fs, io};

use serde::{Deserialize, Serialize};
use toml::de::Error as TomlError;

use crate::state::{PlayerResources, Toolbelt};
use crate::types::ConsumableKind;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingResources {
    pub steps: u32,
    pub gold: u32,
    pub gems: u32,
    pub keys: u32,
    pub dice: u32,
    pub tools: Toolbelt,
    pub consumables: BTreeMap<ConsumableKind, u32>,
}

impl Default for StartingResources {
    fn default() -> Self {
        Self {
            steps: 70,
            gold: 500,
            gems: 2,
            keys: 0,
            dice: 0,
            tools: Toolbelt::default(),
            consumables: BTreeMap::new(),
        }
    }
}

impl StartingResources {
    pub fn to_resources(&self) -> PlayerResources {
        PlayerResources {
            steps: self.steps,
            gold: self.gold,
            gems: self.gems,
            keys: self.keys,
            dice: self.dice,
            consumables: self
                .consumables
                .iter()
                .filter(|(_, count)| **count > 0)
                .map(|(item, count)| (*item, *count))
                .collect(),
            tools: self.tools,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub starting: StartingResources,
    /// Flat steps gained on every entry into a room tagged with a step bonus.
    pub step_bonus: u32,
    /// Flat steps lost on every entry into a room tagged with a step penalty.
    pub step_penalty: u32,
    pub dig_empty_percent: u32,
    pub offer_goal_room: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting: StartingResources::default(),
            step_bonus: 5,
            step_penalty: 3,
            dig_empty_percent: 25,
            offer_goal_room: true,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(TomlError),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read rules file: {err}"),
            Self::Parse(err) => write!(f, "malformed rules file: {err}"),
            Self::Invalid(reason) => write!(f, "invalid rules: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl RulesConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let rules: Self = toml::from_str(text).map_err(ConfigError::Parse)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.dig_empty_percent > 100 {
            return Err(ConfigError::Invalid("dig_empty_percent must be at most 100"));
        }
        if self.starting.steps == 0 {
            return Err(ConfigError::Invalid("starting steps must be positive"));
        }
        Ok(())
    }
}
