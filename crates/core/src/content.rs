use crate::types::{Category, ConsumableKind, EffectTag, PermanentTool, RoomId};

pub mod keys {
    pub const ROOM_ENTRANCE: &str = "Entrance";
    pub const ROOM_LOCKER_ROOM: &str = "Locker Room";
    pub const ROOM_ANTECHAMBER: &str = "Antechamber";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Effect {
    pub tag: EffectTag,
    pub percent: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomTemplate {
    pub name: &'static str,
    pub category: Category,
    pub rarity: u8,
    pub gem_cost: u32,
    pub description: &'static str,
    pub effects: &'static [Effect],
    pub drawable: bool,
}

impl RoomTemplate {
    pub fn effect(&self, tag: EffectTag) -> Option<u32> {
        self.effects.iter().find(|effect| effect.tag == tag).map(|effect| effect.percent)
    }

    pub fn has_effect(&self, tag: EffectTag) -> bool {
        self.effect(tag).is_some()
    }

    pub fn total_effect_weight(&self) -> u32 {
        self.effects.iter().map(|effect| effect.percent).sum()
    }

    pub fn theoretical_doors(&self) -> usize {
        self.category.theoretical_doors()
    }
}

impl Category {
    pub fn theoretical_doors(self) -> usize {
        match self {
            Category::Hallway => 4,
            Category::Common => 3,
            Category::Bedroom => 2,
            Category::Garden => 3,
            Category::Hazard => 1,
            Category::Shop => 2,
        }
    }
}

impl ConsumableKind {
    pub const ALL: [ConsumableKind; 5] = [
        ConsumableKind::Apple,
        ConsumableKind::Banana,
        ConsumableKind::Cake,
        ConsumableKind::Sandwich,
        ConsumableKind::Meal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Apple => "Apple",
            Self::Banana => "Banana",
            Self::Cake => "Cake",
            Self::Sandwich => "Sandwich",
            Self::Meal => "Meal",
        }
    }

    pub fn step_gain(self) -> u32 {
        match self {
            Self::Apple => 2,
            Self::Banana => 3,
            Self::Cake => 10,
            Self::Sandwich => 15,
            Self::Meal => 25,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShopGood {
    Consumable(ConsumableKind),
    Dice(u32),
    Keys(u32),
    Gems(u32),
    Tool(PermanentTool),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShopItem {
    pub name: &'static str,
    pub price: u32,
    pub good: ShopGood,
}

#[derive(Clone, Debug)]
pub struct ContentPack {
    pub rooms: Vec<RoomTemplate>,
    pub shop_items: Vec<ShopItem>,
}

impl ContentPack {
    pub fn build_default() -> Self {
        Self { rooms: default_rooms(), shop_items: default_shop_items() }
    }

    pub fn room(&self, id: RoomId) -> &RoomTemplate {
        &self.rooms[usize::from(id.0)]
    }

    pub fn get(&self, id: RoomId) -> Option<&RoomTemplate> {
        self.rooms.get(usize::from(id.0))
    }

    /// Case-insensitive lookup by template name.
    pub fn find(&self, name: &str) -> Option<RoomId> {
        let name = name.trim();
        self.rooms
            .iter()
            .position(|room| room.name.eq_ignore_ascii_case(name))
            .map(|index| RoomId(index as u16))
    }

    pub fn entrance(&self) -> Option<RoomId> {
        self.find(keys::ROOM_ENTRANCE)
    }

    pub fn goal(&self) -> Option<RoomId> {
        self.find(keys::ROOM_ANTECHAMBER)
    }

    pub fn is_goal(&self, id: RoomId) -> bool {
        self.get(id).is_some_and(|room| room.name.eq_ignore_ascii_case(keys::ROOM_ANTECHAMBER))
    }

    /// Drawable templates in catalog order, optionally without the goal room.
    pub fn draw_pool(&self, exclude_goal: bool) -> Vec<RoomId> {
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| room.drawable)
            .map(|(index, _)| RoomId(index as u16))
            .filter(|id| !(exclude_goal && self.is_goal(*id)))
            .collect()
    }
}

impl Default for ContentPack {
    fn default() -> Self {
        Self::build_default()
    }
}

const fn fx(tag: EffectTag, percent: u32) -> Effect {
    Effect { tag, percent }
}

const fn room(
    name: &'static str,
    category: Category,
    rarity: u8,
    gem_cost: u32,
    description: &'static str,
    effects: &'static [Effect],
) -> RoomTemplate {
    RoomTemplate { name, category, rarity, gem_cost, description, effects, drawable: true }
}

#[rustfmt::skip]
fn default_rooms() -> Vec<RoomTemplate> {
    use Category::*;
    use EffectTag::*;

    // Const context: the effect slices below are promoted to 'static.
    const ROOMS: &[RoomTemplate] = &[
        RoomTemplate {
            name: keys::ROOM_ENTRANCE,
            category: Common,
            rarity: 1,
            gem_cost: 0,
            description: "Where every run begins.",
            effects: &[fx(Misc, 100)],
            drawable: false,
        },
        // Common foundation rooms.
        room("Entrance Hall", Common, 1, 0, "A few basic resources.", &[fx(Key, 10), fx(Gem, 5), fx(StepBonus, 10)]),
        room("Foundation", Common, 1, 0, "Plain room, few effects.", &[fx(Key, 5), fx(Gem, 5)]),
        room("Spare Room", Common, 1, 0, "Small room, slight chance of resources.", &[fx(Key, 10), fx(Gem, 10)]),
        room("Rotunda", Hallway, 1, 0, "Circular hallway with several doors.", &[fx(Key, 5)]),
        room("Parlor", Common, 1, 0, "A little of everything.", &[fx(Key, 10), fx(Gem, 15)]),
        room("Billiard Room", Common, 1, 0, "A few coins lying around.", &[fx(Gem, 15), fx(Key, 5)]),
        room("Gallery", Common, 1, 0, "Chance of gold.", &[fx(Gem, 10)]),
        room("Closet", Common, 1, 0, "May hold a key.", &[fx(Key, 10)]),
        room("Walk-in Closet", Common, 1, 0, "Assorted resources.", &[fx(Key, 15), fx(Gem, 10)]),
        room("Attic", Common, 1, 0, "Something hidden under the beams.", &[fx(Key, 15), fx(Gem, 10), fx(Chest, 20)]),
        room("Storeroom", Common, 1, 0, "Crates everywhere, good odds of a chest.", &[fx(Key, 10), fx(Gem, 15), fx(Chest, 25)]),
        // Mid-manor rooms.
        room("Nook", Common, 2, 0, "Quiet corner with a few resources.", &[fx(Key, 10), fx(Gem, 10)]),
        room("Garage", Common, 2, 0, "Metal odds and ends.", &[fx(Key, 15), fx(Gem, 10)]),
        room("Music Room", Common, 2, 0, "Sometimes gems.", &[fx(Gem, 20)]),
        room(keys::ROOM_LOCKER_ROOM, Common, 2, 0, "Locked lockers.", &[fx(Key, 20), fx(Chest, 10)]),
        room("Den", Garden, 2, 0, "Often a gem.", &[fx(Gem, 60), fx(Chest, 20)]),
        room("Wine Cellar", Common, 2, 0, "Chests and gems.", &[fx(Gem, 30), fx(Chest, 35)]),
        room("Trophy Room", Common, 2, 0, "Rare finds.", &[fx(Key, 20), fx(Gem, 20), fx(Chest, 30)]),
        room("Ballroom", Hallway, 2, 0, "Many doors.", &[fx(Key, 10)]),
        room("Pantry", Shop, 2, 1, "Plenty of food.", &[fx(StepBonus, 60), fx(Gem, 10)]),
        room("Rumpus Room", Common, 2, 0, "Assorted resources.", &[fx(Gem, 20), fx(StepBonus, 20)]),
        room("Vault", Shop, 2, 2, "Chests everywhere.", &[fx(Key, 15), fx(Gem, 25), fx(Chest, 60)]),
        room("Office", Common, 2, 0, "Keys and gems.", &[fx(Key, 20), fx(Gem, 15)]),
        room("Drawing Room", Common, 2, 1, "Small bonuses.", &[fx(Gem, 20), fx(StepBonus, 20)]),
        room("Study", Common, 2, 1, "Keys hidden in drawers.", &[fx(Key, 25), fx(Gem, 10)]),
        room("Library", Common, 2, 1, "A few gems.", &[fx(Gem, 25)]),
        room("Chamber of Mirrors", Hazard, 3, 2, "Can cost you steps.", &[fx(Gem, 30), fx(StepPenalty, 40)]),
        room("The Pool", Garden, 3, 1, "Things under the water.", &[fx(Gem, 25), fx(Key, 15), fx(Dig, 40)]),
        room("Drafting Studio", Common, 3, 1, "Assorted bonuses.", &[fx(Key, 15), fx(Gem, 20), fx(StepBonus, 10)]),
        // Gardens.
        room("Garden", Garden, 2, 0, "Gems and places to dig.", &[fx(Gem, 35), fx(Dig, 60), fx(Key, 10)]),
        room("Greenhouse", Garden, 3, 1, "Lots of places to dig.", &[fx(Gem, 40), fx(Dig, 80), fx(Key, 15), fx(Chest, 20)]),
        room("Solarium", Garden, 3, 1, "Steps and gems.", &[fx(Gem, 30), fx(Dig, 50), fx(StepBonus, 40)]),
        room("Veranda", Garden, 2, 0, "Places to dig.", &[fx(Dig, 60), fx(Gem, 20)]),
        // Bedrooms.
        room("Bedroom", Bedroom, 2, 0, "Restores steps.", &[fx(StepBonus, 70)]),
        room("Boudoir", Bedroom, 2, 1, "Plenty of rest.", &[fx(StepBonus, 90), fx(Gem, 10)]),
        room("Guest Room", Bedroom, 2, 0, "Restores a few steps.", &[fx(StepBonus, 60)]),
        room("Nursery", Bedroom, 2, 0, "Restores steps.", &[fx(StepBonus, 55)]),
        room("Maid's Chamber", Bedroom, 2, 0, "Small bonuses.", &[fx(StepBonus, 40), fx(Gem, 10)]),
        // Hallways.
        room("Corridor", Hallway, 1, 0, "Lots of doors.", &[fx(Key, 5)]),
        room("Long Corridor", Hallway, 2, 0, "Even more doors.", &[fx(Key, 10)]),
        room("Grand Staircase", Hallway, 2, 1, "Good connectivity.", &[fx(Key, 10)]),
        room("Cloister", Hallway, 3, 1, "Many passages.", &[fx(Key, 10), fx(Gem, 10)]),
        // Hazards.
        room("Furnace", Hazard, 3, 1, "Can take steps away.", &[fx(StepPenalty, 60), fx(Gem, 20)]),
        room("Boiler Room", Hazard, 3, 1, "Dangerous but profitable.", &[fx(StepPenalty, 40), fx(Gem, 30), fx(Key, 15)]),
        room("Closed Exhibit", Hazard, 3, 2, "Usually a bad deal.", &[fx(StepPenalty, 50), fx(Gem, 20)]),
        room("Darkroom", Hazard, 2, 1, "Can cost you steps.", &[fx(StepPenalty, 50), fx(Gem, 20)]),
        // Shops.
        room("Bookshop", Shop, 3, 2, "Trade gold for goods.", &[fx(Gem, 25), fx(StepBonus, 30)]),
        room("Casino", Shop, 3, 3, "Very risky.", &[fx(Gem, 40), fx(StepPenalty, 40), fx(StepBonus, 40)]),
        room("Dining Room", Shop, 2, 1, "Food for the road.", &[fx(StepBonus, 70)]),
        room("Cafeteria", Shop, 2, 1, "Lots of food.", &[fx(StepBonus, 80), fx(Gem, 10)]),
        // Remaining common rooms.
        room("Archives", Common, 2, 1, "Keys and gems.", &[fx(Key, 25), fx(Gem, 20)]),
        room("Aquarium", Common, 2, 1, "Things under the water.", &[fx(Gem, 25), fx(Key, 10)]),
        room("Observatory", Common, 3, 2, "Assorted bonuses.", &[fx(Gem, 30), fx(Key, 15), fx(StepBonus, 20)]),
        room("Chapel", Common, 2, 1, "A small step bonus.", &[fx(StepBonus, 30), fx(Gem, 10)]),
        // Goal.
        room(keys::ROOM_ANTECHAMBER, Common, 3, 0, "The top of the manor. Reach it to win.", &[fx(Gem, 0)]),
    ];

    ROOMS.to_vec()
}

fn default_shop_items() -> Vec<ShopItem> {
    vec![
        ShopItem { name: "Small meal", price: 5, good: ShopGood::Consumable(ConsumableKind::Cake) },
        ShopItem { name: "Large meal", price: 10, good: ShopGood::Consumable(ConsumableKind::Meal) },
        ShopItem { name: "Extra die", price: 8, good: ShopGood::Dice(1) },
        ShopItem { name: "Extra key", price: 6, good: ShopGood::Keys(1) },
        ShopItem { name: "Gem", price: 7, good: ShopGood::Gems(1) },
        ShopItem { name: "Shovel", price: 15, good: ShopGood::Tool(PermanentTool::Shovel) },
        ShopItem {
            name: "Lucky charm",
            price: 20,
            good: ShopGood::Tool(PermanentTool::LuckyCharm),
        },
    ]
}
