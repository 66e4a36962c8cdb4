//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating manor and resource setup across many tests.
//! It does not own production gameplay logic.

use super::*;

/// Replays a fixed list of values, wrapping around at the end.
#[derive(Clone, Debug)]
pub(super) struct ScriptedRandom {
    values: Vec<u64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub(super) fn new(values: &[u64]) -> Self {
        assert!(!values.is_empty(), "scripted random needs at least one value");
        Self { values: values.to_vec(), cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_u64(&mut self) -> u64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// A manor built from an all-zero stream, so every interior edge is open,
/// then driven by `values` for every later decision.
pub(super) fn scripted_game(values: &[u64]) -> Game<ScriptedRandom> {
    let mut game = Game::with_random(
        0,
        ScriptedRandom::new(&[0]),
        &ContentPack::default(),
        RulesConfig::default(),
    );
    game.rng = ScriptedRandom::new(values);
    game
}

/// Every percent check fails; loot fallbacks land on a gem.
pub(super) const HIGH_ROLL: u64 = 99;

pub(super) fn room_id<R: RandomSource>(game: &Game<R>, name: &str) -> RoomId {
    game.content.find(name).unwrap_or_else(|| panic!("catalog has no room named {name}"))
}

pub(super) fn start<R: RandomSource>(game: &Game<R>) -> Pos {
    game.state.grid.start_pos()
}

pub(super) fn cell_mut<R: RandomSource>(game: &mut Game<R>, pos: Pos) -> &mut Cell {
    game.state.grid.cell_mut(pos).expect("fixture position inside the grid")
}

/// Realizes `name` at `pos` with the given doors and loot already rolled.
pub(super) fn place_room<R: RandomSource>(
    game: &mut Game<R>,
    pos: Pos,
    name: &str,
    doors: &[Direction],
) {
    let room = room_id(game, name);
    let cell = cell_mut(game, pos);
    cell.room = Some(room);
    cell.discovered = true;
    cell.loot_generated = true;
    for direction in doors {
        cell.doors[*direction] = true;
    }
}

pub(super) fn set_lock<R: RandomSource>(
    game: &mut Game<R>,
    pos: Pos,
    direction: Direction,
    level: LockLevel,
) {
    cell_mut(game, pos).lock_levels[direction] = level;
}

pub(super) fn teleport<R: RandomSource>(game: &mut Game<R>, pos: Pos) {
    game.state.position = pos;
}

pub(super) fn entered_events(log: &[LogEvent]) -> Vec<(Pos, bool)> {
    log.iter()
        .filter_map(|event| match event {
            LogEvent::RoomEntered { pos, first_visit, .. } => Some((*pos, *first_visit)),
            _ => None,
        })
        .collect()
}
