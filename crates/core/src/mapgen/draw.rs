//! Weighted room draws for a newly opened cell.
//! This module exists to pick three candidate templates from the catalog.
//! It does not own gem payment or door placement.

use super::seed::RandomSource;
use crate::content::ContentPack;
use crate::types::{DrawOffer, RoomId};

const LUCKY_CHARM_WEIGHT_BONUS: u32 = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawOptions {
    pub lucky_charm: bool,
    /// Keep the goal room out of ordinary draws and offer it at the goal cell.
    pub offer_goal_room: bool,
    pub at_goal_cell: bool,
}

pub fn rarity_weight(rarity: u8, lucky_charm: bool) -> u32 {
    let base = match rarity {
        1 => 60,
        2 => 30,
        3 => 10,
        _ => 0,
    };
    let bonus = if lucky_charm { LUCKY_CHARM_WEIGHT_BONUS } else { 0 };
    (base + bonus).max(1)
}

/// Index sampled proportionally to `weights`. An all-zero table yields 0.
pub fn weighted_index(weights: &[u32], rng: &mut impl RandomSource) -> usize {
    let total: u64 = weights.iter().map(|w| u64::from(*w)).sum();
    if total == 0 {
        return 0;
    }
    let mut roll = rng.next_u64() % total;
    for (index, weight) in weights.iter().enumerate() {
        let weight = u64::from(*weight);
        if roll < weight {
            return index;
        }
        roll -= weight;
    }
    weights.len() - 1
}

pub fn draw_candidates(
    content: &ContentPack,
    options: DrawOptions,
    rng: &mut impl RandomSource,
) -> [RoomId; 3] {
    let pool = content.draw_pool(options.offer_goal_room);
    let weights: Vec<u32> =
        pool.iter().map(|id| rarity_weight(content.room(*id).rarity, options.lucky_charm)).collect();
    log::debug!("drawing from {} templates (lucky charm: {})", pool.len(), options.lucky_charm);

    let mut candidates = [RoomId(0); 3];
    for slot in &mut candidates {
        *slot = pool.get(weighted_index(&weights, rng)).copied().unwrap_or(RoomId(0));
    }

    if candidates.iter().all(|id| content.room(*id).gem_cost > 0) {
        let free: Vec<RoomId> =
            pool.iter().copied().filter(|id| content.room(*id).gem_cost == 0).collect();
        if !free.is_empty() {
            candidates[0] = free[rng.below(free.len())];
            log::debug!("all candidates cost gems; slot 0 replaced by a free room");
        }
    }

    if options.offer_goal_room
        && options.at_goal_cell
        && let Some(goal) = content.goal()
    {
        candidates[2] = goal;
    }

    candidates
}

/// Door count each candidate would realize on the offered cell.
pub fn offered_door_counts(content: &ContentPack, offer: &DrawOffer) -> [usize; 3] {
    offer.candidates.map(|id| content.room(id).theoretical_doors().min(offer.open_directions))
}
