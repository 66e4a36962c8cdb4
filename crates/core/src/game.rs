//! Progression controller for a single manor run.
//! This module exists to own the grid and player resources and to be their only writer.
//! It does not own generation algorithms; those live in `mapgen` and return plain data.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::config::RulesConfig;
use crate::content::ContentPack;
use crate::mapgen::{self, RandomSource};
use crate::state::{Cell, GameState, Grid, PlayerResources};
use crate::types::*;

mod hash;
mod interactions;
mod movement;
mod snapshot;
mod status;

#[cfg(test)]
mod test_support;

pub use snapshot::{GameSnapshot, SnapshotError};

pub struct Game<R: RandomSource = ChaCha8Rng> {
    seed: u64,
    rng: R,
    content: ContentPack,
    rules: RulesConfig,
    state: GameState,
    pending_draw: Option<DrawOffer>,
    log: Vec<LogEvent>,
    status_message: Option<String>,
    // Last status reported through the log, so transitions are logged once.
    reported_status: RunStatus,
}

impl Game<ChaCha8Rng> {
    pub fn new(seed: u64, content: &ContentPack, rules: RulesConfig) -> Self {
        Self::with_random(seed, ChaCha8Rng::seed_from_u64(seed), content, rules)
    }
}

impl<R: RandomSource> Game<R> {
    /// Builds a fresh manor drawing every random decision from `rng`.
    pub fn with_random(seed: u64, mut rng: R, content: &ContentPack, rules: RulesConfig) -> Self {
        let grid = mapgen::build_manor(content, &mut rng);
        let position = grid.start_pos();
        let resources = rules.starting.to_resources();
        log::info!("new manor run with seed {seed}");

        Self {
            seed,
            rng,
            content: content.clone(),
            rules,
            state: GameState { grid, resources, position },
            pending_draw: None,
            log: Vec::new(),
            status_message: None,
            reported_status: RunStatus::InProgress,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn resources(&self) -> &PlayerResources {
        &self.state.resources
    }

    pub fn position(&self) -> Pos {
        self.state.position
    }

    pub fn current_cell(&self) -> &Cell {
        self.state.current_cell()
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.state.grid.cell(pos)
    }

    pub fn content(&self) -> &ContentPack {
        &self.content
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn pending_draw(&self) -> Option<&DrawOffer> {
        self.pending_draw.as_ref()
    }

    /// Doors each pending candidate would realize, if a draw is open.
    pub fn pending_door_counts(&self) -> Option<[usize; 3]> {
        self.pending_draw.as_ref().map(|offer| mapgen::offered_door_counts(&self.content, offer))
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    /// Human-readable outcome of the most recent command.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Single entry point for journaled input.
    pub fn apply(&mut self, command: Command) -> Result<CommandReport, GameError> {
        match command {
            Command::Move(direction) => self.attempt_move(direction).map(CommandReport::Moved),
            Command::ConfirmRoom(index) => {
                self.confirm_drawn_room(index).map(CommandReport::Entered)
            }
            Command::Reroll => self.reroll().map(CommandReport::Redrawn),
            Command::CancelDraw => self.cancel_draw().map(|()| CommandReport::DrawCancelled),
            Command::Interact(interaction) => {
                self.interact(interaction).map(CommandReport::Interacted)
            }
            Command::Consume(item) => self
                .consume_item(item)
                .map(|steps_gained| CommandReport::Consumed { item, steps_gained }),
        }
    }

    /// Publishes the message for a finished command and logs any status change.
    /// Errors leave state untouched; only the message changes.
    fn conclude<T>(&mut self, result: Result<(T, String), GameError>) -> Result<T, GameError> {
        match result {
            Ok((value, message)) => {
                self.status_message = Some(message);
                self.report_status_change();
                Ok(value)
            }
            Err(err) => {
                log::debug!("command rejected: {err:?}");
                self.status_message = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn report_status_change(&mut self) {
        let status = self.run_status();
        if status != self.reported_status {
            log::info!("run status changed to {status:?}");
            self.log.push(LogEvent::StatusChanged(status));
            self.reported_status = status;
        }
    }

    fn ensure_no_pending_draw(&self) -> Result<(), GameError> {
        if self.pending_draw.is_some() {
            return Err(GameError::DrawPending);
        }
        Ok(())
    }

    fn room_name(&self, room: RoomId) -> &'static str {
        self.content.get(room).map_or("?", |template| template.name)
    }
}
