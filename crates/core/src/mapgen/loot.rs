//! First-visit contents of a cell.
//! This module exists to roll pickables and features from a room template.
//! It does not own the once-per-cell guard; the controller checks and sets it.

use super::seed::RandomSource;
use crate::content::{RoomTemplate, keys};
use crate::state::Toolbelt;
use crate::types::{Category, EffectTag, Pickable};

const GARDEN_DIG_PERCENT: u32 = 50;
const COMMON_GOLD_PERCENT: u32 = 25;
const GOLD_MIN: u32 = 1;
const GOLD_MAX: u32 = 4;
const METAL_DETECTOR_KEY_BONUS: u32 = 10;
const LUCKY_CHARM_BONUS: u32 = 5;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellLoot {
    pub is_shop: bool,
    pub has_locker: bool,
    pub has_dig_spot: bool,
    pub has_chest: bool,
    pub pickables: Vec<Pickable>,
}

impl CellLoot {
    fn offers_anything(&self) -> bool {
        self.is_shop || self.has_dig_spot || self.has_chest || !self.pickables.is_empty()
    }
}

/// Every check below takes its own draw, in this order: dig, chest, key,
/// gem, gold (common rooms only), then the fallback coin flip if needed.
pub fn generate_loot(
    template: &RoomTemplate,
    tools: &Toolbelt,
    rng: &mut impl RandomSource,
) -> CellLoot {
    let mut loot = CellLoot {
        is_shop: template.category == Category::Shop,
        has_locker: template.name.trim().eq_ignore_ascii_case(keys::ROOM_LOCKER_ROOM),
        ..CellLoot::default()
    };

    let dig_percent = template.effect(EffectTag::Dig).unwrap_or(match template.category {
        Category::Garden => GARDEN_DIG_PERCENT,
        _ => 0,
    });
    loot.has_dig_spot = rng.percent_chance(dig_percent);
    loot.has_chest = rng.percent_chance(template.effect(EffectTag::Chest).unwrap_or(0));

    let charm_bonus = if tools.lucky_charm { LUCKY_CHARM_BONUS } else { 0 };
    let detector_bonus = if tools.metal_detector { METAL_DETECTOR_KEY_BONUS } else { 0 };

    let key_percent = template.effect(EffectTag::Key).unwrap_or(0) + detector_bonus + charm_bonus;
    if rng.percent_chance(key_percent) {
        loot.pickables.push(Pickable::Key);
    }
    let gem_percent = template.effect(EffectTag::Gem).unwrap_or(0) + charm_bonus;
    if rng.percent_chance(gem_percent) {
        loot.pickables.push(Pickable::Gem);
    }
    if template.category == Category::Common && rng.percent_chance(COMMON_GOLD_PERCENT) {
        let amount = GOLD_MIN + rng.below((GOLD_MAX - GOLD_MIN + 1) as usize) as u32;
        loot.pickables.push(Pickable::Gold { amount });
    }

    if template.total_effect_weight() > 0 && !loot.offers_anything() {
        let fallback = if rng.percent_chance(50) { Pickable::Key } else { Pickable::Gem };
        loot.pickables.push(fallback);
        log::debug!("{} rolled empty; granting fallback {fallback:?}", template.name);
    }

    loot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentPack, Effect};

    struct Scripted {
        values: Vec<u64>,
        cursor: usize,
    }

    impl RandomSource for Scripted {
        fn next_u64(&mut self) -> u64 {
            let value = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            value
        }
    }

    fn scripted(values: &[u64]) -> Scripted {
        Scripted { values: values.to_vec(), cursor: 0 }
    }

    fn template(category: Category, effects: &'static [Effect]) -> RoomTemplate {
        RoomTemplate {
            name: "Test Room",
            category,
            rarity: 1,
            gem_cost: 0,
            description: "",
            effects,
            drawable: true,
        }
    }

    #[test]
    fn high_rolls_leave_a_fallback_pickable() {
        const EFFECTS: &[Effect] = &[Effect { tag: EffectTag::Key, percent: 10 }];
        let room = template(Category::Bedroom, EFFECTS);
        // 99 fails every check; the fallback flip (99 < 50 is false) gives a gem.
        let loot = generate_loot(&room, &Toolbelt::default(), &mut scripted(&[99]));
        assert_eq!(loot.pickables, vec![Pickable::Gem]);
        assert!(!loot.has_chest && !loot.has_dig_spot);
    }

    #[test]
    fn zero_weight_templates_can_stay_empty() {
        const EFFECTS: &[Effect] = &[Effect { tag: EffectTag::Gem, percent: 0 }];
        let room = template(Category::Hallway, EFFECTS);
        let loot = generate_loot(&room, &Toolbelt::default(), &mut scripted(&[99]));
        assert_eq!(loot, CellLoot::default());
    }

    #[test]
    fn low_rolls_fill_every_slot_for_common_rooms() {
        const EFFECTS: &[Effect] = &[
            Effect { tag: EffectTag::Key, percent: 10 },
            Effect { tag: EffectTag::Gem, percent: 10 },
            Effect { tag: EffectTag::Chest, percent: 10 },
            Effect { tag: EffectTag::Dig, percent: 10 },
        ];
        let room = template(Category::Common, EFFECTS);
        // Draws: dig, chest, key, gem, gold check, gold amount (3 % 4 = 3 -> 4 gold).
        let loot = generate_loot(&room, &Toolbelt::default(), &mut scripted(&[0, 0, 0, 0, 0, 3]));
        assert!(loot.has_dig_spot);
        assert!(loot.has_chest);
        assert_eq!(loot.pickables, vec![Pickable::Key, Pickable::Gem, Pickable::Gold { amount: 4 }]);
    }

    #[test]
    fn gardens_default_to_even_dig_odds() {
        const EFFECTS: &[Effect] = &[Effect { tag: EffectTag::Gem, percent: 10 }];
        let room = template(Category::Garden, EFFECTS);
        let loot = generate_loot(&room, &Toolbelt::default(), &mut scripted(&[49, 99, 99, 99]));
        assert!(loot.has_dig_spot);
        let loot = generate_loot(&room, &Toolbelt::default(), &mut scripted(&[50, 99, 99, 99, 0]));
        assert!(!loot.has_dig_spot);
        assert_eq!(loot.pickables, vec![Pickable::Key]);
    }

    #[test]
    fn tools_raise_key_and_gem_odds() {
        const EFFECTS: &[Effect] = &[Effect { tag: EffectTag::Key, percent: 0 }];
        let room = template(Category::Hazard, EFFECTS);
        let tools = Toolbelt { metal_detector: true, lucky_charm: true, ..Toolbelt::default() };
        // Key odds become 15, gem odds 5.
        let loot = generate_loot(&room, &tools, &mut scripted(&[99, 99, 14, 4]));
        assert_eq!(loot.pickables, vec![Pickable::Key, Pickable::Gem]);
        let loot = generate_loot(&room, &tools, &mut scripted(&[99, 99, 15, 5]));
        assert!(loot.pickables.is_empty());
    }

    #[test]
    fn shop_and_locker_flags_follow_category_and_name() {
        let content = ContentPack::default();
        let locker = content.room(content.find("locker room").expect("locker room"));
        let shop = content.room(content.find("Bookshop").expect("shop"));
        let tools = Toolbelt::default();
        assert!(generate_loot(locker, &tools, &mut scripted(&[99])).has_locker);
        let shop_loot = generate_loot(shop, &tools, &mut scripted(&[99]));
        assert!(shop_loot.is_shop);
        assert!(shop_loot.pickables.is_empty());
    }
}
