//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from progression control code.
//! It does not own replay execution or journal formats.

use std::hash::Hasher;

use super::*;
use xxhash_rust::xxh3::Xxh3;

impl<R: RandomSource> Game<R> {
    /// Hash of every query-visible fact about the run. Two games that answer
    /// every query identically hash identically, regardless of how they got there.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_i32(self.state.position.x);
        hasher.write_i32(self.state.position.y);

        let resources = &self.state.resources;
        hasher.write_u32(resources.steps);
        hasher.write_u32(resources.gold);
        hasher.write_u32(resources.gems);
        hasher.write_u32(resources.keys);
        hasher.write_u32(resources.dice);
        hasher.write_usize(resources.consumables.len());
        for (item, count) in &resources.consumables {
            hasher.write_u8(*item as u8);
            hasher.write_u32(*count);
        }
        let tools = resources.tools;
        let owned =
            [tools.shovel, tools.hammer, tools.lockpick_kit, tools.metal_detector, tools.lucky_charm];
        for flag in owned {
            hasher.write_u8(u8::from(flag));
        }

        for cell in &self.state.grid.cells {
            hash_cell(&mut hasher, cell);
        }

        match &self.pending_draw {
            None => hasher.write_u8(0),
            Some(offer) => {
                hasher.write_u8(1);
                hasher.write_i32(offer.target.x);
                hasher.write_i32(offer.target.y);
                hasher.write_u8(offer.travel.index() as u8);
                hasher.write_u8(offer.lock.as_u8());
                for room in offer.candidates {
                    hasher.write_u16(room.0);
                }
            }
        }
        hasher.finish()
    }
}

fn hash_cell(hasher: &mut Xxh3, cell: &Cell) {
    hasher.write_u16(cell.room.map_or(u16::MAX, |room| room.0));
    hasher.write_u8(u8::from(cell.discovered));
    for (_, level) in cell.lock_levels.iter() {
        hasher.write_u8(level.as_u8());
    }
    for (_, open) in cell.doors.iter() {
        hasher.write_u8(u8::from(open));
    }
    let flags =
        [cell.has_chest, cell.has_dig_spot, cell.has_locker, cell.is_shop, cell.loot_generated];
    for flag in flags {
        hasher.write_u8(u8::from(flag));
    }
    hasher.write_usize(cell.pickables.len());
    for pickable in &cell.pickables {
        match pickable {
            Pickable::Key => hasher.write_u8(0),
            Pickable::Gem => hasher.write_u8(1),
            Pickable::Gold { amount } => {
                hasher.write_u8(2);
                hasher.write_u32(*amount);
            }
        }
    }
}
