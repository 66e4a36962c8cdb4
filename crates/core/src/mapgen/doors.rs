//! Door placement for a freshly realized cell.
//! This module exists to turn a template's door count into concrete passable edges.
//! It does not write to the grid; the controller commits the result.

use super::seed::RandomSource;
use crate::state::Grid;
use crate::types::{Direction, DirectionMap, Pos};

/// Doors for the cell at `target`, entered by moving `travel` from its neighbor.
///
/// The back-edge toward the origin is always open. Any discovered neighbor
/// whose door already points at `target` gets a matching door, and those count
/// toward the budget of `min(theoretical, in-bounds directions)`. The rest is
/// filled from a shuffle of the remaining directions, skipping discovered
/// neighbors that have no door facing this cell.
pub fn resolve_doors(
    grid: &Grid,
    target: Pos,
    travel: Direction,
    theoretical: usize,
    rng: &mut impl RandomSource,
) -> DirectionMap<bool> {
    let mut doors = DirectionMap::splat(false);
    let in_bounds = grid.in_bounds_directions(target);

    let back = travel.opposite();
    if in_bounds.contains(&back) {
        doors[back] = true;
    }

    for direction in &in_bounds {
        if let Some(neighbor) = grid.cell(target.step(*direction))
            && neighbor.is_discovered()
            && neighbor.door_exists(direction.opposite())
        {
            doors[*direction] = true;
        }
    }

    let budget = theoretical.min(in_bounds.len());
    let already = doors.iter().filter(|(_, open)| *open).count();
    let remaining = budget.saturating_sub(already);

    let mut others: Vec<Direction> = in_bounds
        .iter()
        .copied()
        .filter(|direction| !doors[*direction] && !grid.is_discovered(target.step(*direction)))
        .collect();
    shuffle(&mut others, rng);
    for direction in others.into_iter().take(remaining) {
        doors[direction] = true;
    }

    log::debug!(
        "doors at ({}, {}): budget {budget}, preset {already}, filled {}",
        target.x,
        target.y,
        doors.iter().filter(|(_, open)| *open).count().saturating_sub(already)
    );
    doors
}

fn shuffle<T>(items: &mut [T], rng: &mut impl RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}
