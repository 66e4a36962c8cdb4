//! Serializable mid-run state.
//! This module exists to capture and rebuild everything the query surface reads.
//! It does not own persistence; callers choose where the serialized form goes.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::*;
use crate::state::{GRID_HEIGHT, GRID_WIDTH};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub seed: u64,
    pub grid: Grid,
    pub resources: PlayerResources,
    pub position: Pos,
    pub pending_draw: Option<DrawOffer>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    GridSize { width: usize, height: usize },
    PositionOutOfBounds(Pos),
    UnknownRoom(RoomId),
    /// The pending draw does not lead from the player's cell into hidden territory.
    InvalidPendingDraw { origin: Pos, target: Pos },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridSize { width, height } => {
                write!(f, "snapshot grid is {width}x{height}, expected {GRID_WIDTH}x{GRID_HEIGHT}")
            }
            Self::PositionOutOfBounds(pos) => {
                write!(f, "snapshot position ({}, {}) is outside the grid", pos.x, pos.y)
            }
            Self::UnknownRoom(room) => write!(f, "snapshot references unknown room #{}", room.0),
            Self::InvalidPendingDraw { origin, target } => write!(
                f,
                "snapshot draw from ({}, {}) to ({}, {}) is not a move into an undiscovered cell",
                origin.x, origin.y, target.x, target.y
            ),
        }
    }
}

impl Error for SnapshotError {}

impl<R: RandomSource> Game<R> {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            seed: self.seed,
            grid: self.state.grid.clone(),
            resources: self.state.resources.clone(),
            position: self.state.position,
            pending_draw: self.pending_draw.clone(),
        }
    }

    /// Rebuilds a run from `snapshot`. Future draws come from `rng`, so pass a
    /// stream positioned where the original left off to continue identically.
    pub fn restore(
        snapshot: GameSnapshot,
        rng: R,
        content: &ContentPack,
        rules: RulesConfig,
    ) -> Result<Self, SnapshotError> {
        let grid = snapshot.grid;
        if grid.width != GRID_WIDTH
            || grid.height != GRID_HEIGHT
            || grid.cells.len() != GRID_WIDTH * GRID_HEIGHT
        {
            return Err(SnapshotError::GridSize { width: grid.width, height: grid.height });
        }
        if !grid.in_bounds(snapshot.position) {
            return Err(SnapshotError::PositionOutOfBounds(snapshot.position));
        }
        if let Some(offer) = &snapshot.pending_draw {
            let leads_into_hidden_cell = offer.origin == snapshot.position
                && offer.target == offer.origin.step(offer.travel)
                && grid.cell(offer.target).is_some_and(|cell| !cell.discovered);
            if !leads_into_hidden_cell {
                return Err(SnapshotError::InvalidPendingDraw {
                    origin: offer.origin,
                    target: offer.target,
                });
            }
        }
        let placed = grid.cells.iter().filter_map(|cell| cell.room);
        let offered = snapshot.pending_draw.iter().flat_map(|offer| offer.candidates);
        if let Some(unknown) = placed.chain(offered).find(|room| content.get(*room).is_none()) {
            return Err(SnapshotError::UnknownRoom(unknown));
        }

        let mut game = Self {
            seed: snapshot.seed,
            rng,
            content: content.clone(),
            rules,
            state: GameState { grid, resources: snapshot.resources, position: snapshot.position },
            pending_draw: snapshot.pending_draw,
            log: Vec::new(),
            status_message: None,
            reported_status: RunStatus::InProgress,
        };
        game.reported_status = game.run_status();
        Ok(game)
    }
}
