pub mod config;
pub mod content;
pub mod game;
pub mod journal;
pub mod mapgen;
pub mod replay;
pub mod state;
pub mod types;

pub use config::{ConfigError, RulesConfig, StartingResources};
pub use content::ContentPack;
pub use game::{Game, GameSnapshot, SnapshotError};
pub use journal::{InputJournal, InputRecord};
pub use mapgen::{RandomSource, mix_seed};
pub use replay::*;
pub use state::{Cell, GameState, Grid, PlayerResources, Toolbelt};
pub use types::*;
