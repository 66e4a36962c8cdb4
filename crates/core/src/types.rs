use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn step(self, direction: Direction) -> Self {
        let (dy, dx) = direction.delta();
        Self { y: self.y + dy, x: self.x + dx }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }
}

/// Fixed four-slot storage indexed by [`Direction`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectionMap<T>(pub [T; 4]);

impl<T: Copy> DirectionMap<T> {
    pub fn splat(value: T) -> Self {
        Self([value; 4])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, T)> + '_ {
        Direction::ALL.into_iter().map(|direction| (direction, self.0[direction.index()]))
    }
}

impl<T> Index<Direction> for DirectionMap<T> {
    type Output = T;

    fn index(&self, direction: Direction) -> &T {
        &self.0[direction.index()]
    }
}

impl<T> IndexMut<Direction> for DirectionMap<T> {
    fn index_mut(&mut self, direction: Direction) -> &mut T {
        &mut self.0[direction.index()]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LockLevel {
    #[default]
    Open,
    Locked,
    DoubleLocked,
}

impl LockLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Locked => 1,
            Self::DoubleLocked => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u16);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Common,
    Garden,
    Bedroom,
    Hallway,
    Hazard,
    Shop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EffectTag {
    Key,
    Gem,
    Chest,
    Dig,
    StepBonus,
    StepPenalty,
    Misc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pickable {
    Key,
    Gem,
    Gold { amount: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConsumableKind {
    Apple,
    Banana,
    Cake,
    Sandwich,
    Meal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PermanentTool {
    Shovel,
    Hammer,
    LockpickKit,
    MetalDetector,
    LuckyCharm,
}

/// Anything a command can be short of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resource {
    Keys,
    KeyOrLockpick,
    KeyOrHammer,
    Gems,
    Gold,
    Dice,
    Tool(PermanentTool),
    Consumable(ConsumableKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feature {
    DigSpot,
    Chest,
    Locker,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interaction {
    Dig,
    OpenChest,
    OpenLocker,
    Pickup { index: usize },
    Purchase { item: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    ConfirmRoom(usize),
    Reroll,
    CancelDraw,
    Interact(Interaction),
    Consume(ConsumableKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockPayment {
    Free,
    Lockpick,
    Key,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    InProgress,
    Victory,
    Defeat,
    Deadlocked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryReport {
    pub pos: Pos,
    pub room: RoomId,
    pub first_visit: bool,
    pub status: RunStatus,
}

/// Candidate rooms offered for an undiscovered cell, waiting for a confirm.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawOffer {
    pub origin: Pos,
    pub target: Pos,
    pub travel: Direction,
    pub open_directions: usize,
    pub lock: LockLevel,
    pub candidates: [RoomId; 3],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Entered(EntryReport),
    DrawOffered(DrawOffer),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionOutcome {
    Dug { found: Option<ConsumableKind> },
    ChestOpened { found: ConsumableKind, used_hammer: bool },
    LockerOpened { found: ConsumableKind },
    PickedUp(Pickable),
    Purchased { item: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandReport {
    Moved(MoveOutcome),
    Entered(EntryReport),
    Redrawn(DrawOffer),
    DrawCancelled,
    Interacted(InteractionOutcome),
    Consumed { item: ConsumableKind, steps_gained: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    OutOfBounds { direction: Direction },
    NoDoor { direction: Direction },
    NoReturnDoor { direction: Direction },
    DrawPending,
    NoPendingDraw,
    InvalidCandidate { index: usize },
    Insufficient(Resource),
    NothingHere(Feature),
    NoSuchPickable { index: usize },
    NotAShop,
    UnknownShopItem { item: usize },
    AlreadyOwned(PermanentTool),
    UnknownItem { name: String },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { direction } => {
                write!(f, "Cannot go {}: that is the outer wall.", direction.label())
            }
            Self::NoDoor { direction } => write!(f, "No door to the {}.", direction.label()),
            Self::NoReturnDoor { direction } => {
                write!(f, "The room to the {} has no door on this side.", direction.label())
            }
            Self::DrawPending => write!(f, "Pick a room first (or cancel the draw)."),
            Self::NoPendingDraw => write!(f, "No room draw in progress."),
            Self::InvalidCandidate { index } => write!(f, "There is no candidate #{index}."),
            Self::Insufficient(resource) => match resource {
                Resource::Keys => write!(f, "A key is required."),
                Resource::KeyOrLockpick => write!(f, "Locked door: key or kit required."),
                Resource::KeyOrHammer => write!(f, "Locked chest: key or hammer required."),
                Resource::Gems => write!(f, "Not enough gems."),
                Resource::Gold => write!(f, "Not enough gold."),
                Resource::Dice => write!(f, "Insufficient dice."),
                Resource::Tool(tool) => write!(f, "You need the {}.", tool_label(*tool)),
                Resource::Consumable(item) => write!(f, "You have no {item:?} left."),
            },
            Self::NothingHere(feature) => match feature {
                Feature::DigSpot => write!(f, "Nothing to dig here."),
                Feature::Chest => write!(f, "No chest here."),
                Feature::Locker => write!(f, "No locker here."),
            },
            Self::NoSuchPickable { index } => write!(f, "Nothing to pick up at slot {index}."),
            Self::NotAShop => write!(f, "There is no shop here."),
            Self::UnknownShopItem { item } => write!(f, "The shop has no item #{item}."),
            Self::AlreadyOwned(tool) => write!(f, "You already own the {}.", tool_label(*tool)),
            Self::UnknownItem { name } => write!(f, "There is no item called {name:?}."),
        }
    }
}

pub(crate) fn tool_label(tool: PermanentTool) -> &'static str {
    match tool {
        PermanentTool::Shovel => "shovel",
        PermanentTool::Hammer => "hammer",
        PermanentTool::LockpickKit => "lockpick kit",
        PermanentTool::MetalDetector => "metal detector",
        PermanentTool::LuckyCharm => "lucky charm",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    RoomsDrawn { target: Pos, candidates: [RoomId; 3] },
    Rerolled { target: Pos, candidates: [RoomId; 3] },
    DrawCancelled { target: Pos },
    LockOpened { pos: Pos, direction: Direction, payment: LockPayment },
    RoomPlaced { pos: Pos, room: RoomId, doors: DirectionMap<bool> },
    RoomEntered { pos: Pos, room: RoomId, first_visit: bool },
    ItemPickedUp(Pickable),
    SpotDug { found: Option<ConsumableKind> },
    ChestOpened { found: ConsumableKind },
    LockerOpened { found: ConsumableKind },
    Purchased { item: usize },
    ItemConsumed { item: ConsumableKind, steps_gained: u32 },
    StatusChanged(RunStatus),
}
