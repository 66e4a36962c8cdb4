use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::*;

pub const GRID_WIDTH: usize = 5;
pub const GRID_HEIGHT: usize = 9;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) room: Option<RoomId>,
    pub(crate) discovered: bool,
    pub(crate) lock_levels: DirectionMap<LockLevel>,
    pub(crate) doors: DirectionMap<bool>,
    pub(crate) has_chest: bool,
    pub(crate) has_dig_spot: bool,
    pub(crate) has_locker: bool,
    pub(crate) is_shop: bool,
    pub(crate) pickables: Vec<Pickable>,
    pub(crate) loot_generated: bool,
}

impl Cell {
    pub fn room(&self) -> Option<RoomId> {
        self.room
    }

    pub fn is_discovered(&self) -> bool {
        self.discovered
    }

    pub fn lock_level(&self, direction: Direction) -> LockLevel {
        self.lock_levels[direction]
    }

    pub fn door_exists(&self, direction: Direction) -> bool {
        self.doors[direction]
    }

    pub fn doors(&self) -> DirectionMap<bool> {
        self.doors
    }

    pub fn has_chest(&self) -> bool {
        self.has_chest
    }

    pub fn has_dig_spot(&self) -> bool {
        self.has_dig_spot
    }

    pub fn has_locker(&self) -> bool {
        self.has_locker
    }

    pub fn is_shop(&self) -> bool {
        self.is_shop
    }

    pub fn pickables(&self) -> &[Pickable] {
        &self.pickables
    }

    pub fn loot_generated(&self) -> bool {
        self.loot_generated
    }
}

/// The manor: a fixed row-major array of cells, row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::default(); width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells.get(self.index(pos))
    }

    pub(crate) fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        let idx = self.index(pos);
        self.cells.get_mut(idx)
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Pos { y: y as i32, x: x as i32 })
        })
    }

    /// Directions from `pos` whose neighbor lies inside the grid.
    pub fn in_bounds_directions(&self, pos: Pos) -> Vec<Direction> {
        Direction::ALL.into_iter().filter(|direction| self.in_bounds(pos.step(*direction))).collect()
    }

    pub fn is_discovered(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(Cell::is_discovered)
    }

    pub fn start_pos(&self) -> Pos {
        Pos { y: self.height as i32 - 1, x: (self.width / 2) as i32 }
    }

    pub fn goal_pos(&self) -> Pos {
        Pos { y: 0, x: (self.width / 2) as i32 }
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolbelt {
    pub shovel: bool,
    pub hammer: bool,
    pub lockpick_kit: bool,
    pub metal_detector: bool,
    pub lucky_charm: bool,
}

impl Toolbelt {
    pub fn has(&self, tool: PermanentTool) -> bool {
        match tool {
            PermanentTool::Shovel => self.shovel,
            PermanentTool::Hammer => self.hammer,
            PermanentTool::LockpickKit => self.lockpick_kit,
            PermanentTool::MetalDetector => self.metal_detector,
            PermanentTool::LuckyCharm => self.lucky_charm,
        }
    }

    pub fn grant(&mut self, tool: PermanentTool) {
        let slot = match tool {
            PermanentTool::Shovel => &mut self.shovel,
            PermanentTool::Hammer => &mut self.hammer,
            PermanentTool::LockpickKit => &mut self.lockpick_kit,
            PermanentTool::MetalDetector => &mut self.metal_detector,
            PermanentTool::LuckyCharm => &mut self.lucky_charm,
        };
        *slot = true;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerResources {
    pub steps: u32,
    pub gold: u32,
    pub gems: u32,
    pub keys: u32,
    pub dice: u32,
    pub consumables: BTreeMap<ConsumableKind, u32>,
    pub tools: Toolbelt,
}

impl PlayerResources {
    /// Spends up to `n` steps; the counter bottoms out at zero.
    pub fn consume_steps(&mut self, n: u32) {
        self.steps = self.steps.saturating_sub(n);
    }

    pub fn gain_steps(&mut self, n: u32) {
        self.steps = self.steps.saturating_add(n);
    }

    pub fn consumable_count(&self, item: ConsumableKind) -> u32 {
        self.consumables.get(&item).copied().unwrap_or(0)
    }

    pub fn add_consumable(&mut self, item: ConsumableKind, count: u32) {
        let stack = self.consumables.entry(item).or_insert(0);
        *stack = stack.saturating_add(count);
    }

    /// Removes one unit, dropping the entry when the stack empties.
    pub fn take_consumable(&mut self, item: ConsumableKind) -> bool {
        let Some(count) = self.consumables.get_mut(&item) else {
            return false;
        };
        if *count == 0 {
            self.consumables.remove(&item);
            return false;
        }
        *count -= 1;
        if *count == 0 {
            self.consumables.remove(&item);
        }
        true
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub grid: Grid,
    pub resources: PlayerResources,
    pub position: Pos,
}

impl GameState {
    pub fn current_cell(&self) -> &Cell {
        // The position is only ever set to in-bounds cells.
        &self.grid.cells[self.grid.index(self.position)]
    }

    pub(crate) fn current_cell_mut(&mut self) -> &mut Cell {
        let idx = self.grid.index(self.position);
        &mut self.grid.cells[idx]
    }
}
