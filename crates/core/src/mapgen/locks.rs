//! Per-edge lock levels, fixed once when the manor is built.

use super::seed::RandomSource;
use crate::state::Grid;
use crate::types::{Direction, LockLevel};

/// Relative weights of Open / Locked / DoubleLocked for an interior row.
pub fn lock_weights_for_row(y: usize, height: usize) -> [u32; 3] {
    let dist = (height - 1 - y) as u32;
    [5u32.saturating_sub(dist).max(1), (1 + dist).max(1), (dist / 2 + 1).max(1)]
}

/// Bottom row always opens freely, top row is always double-locked.
pub fn lock_level_for_row(y: usize, height: usize, rng: &mut impl RandomSource) -> LockLevel {
    if y + 1 == height {
        return LockLevel::Open;
    }
    if y == 0 {
        return LockLevel::DoubleLocked;
    }
    let weights = lock_weights_for_row(y, height);
    match super::draw::weighted_index(&weights, rng) {
        0 => LockLevel::Open,
        1 => LockLevel::Locked,
        _ => LockLevel::DoubleLocked,
    }
}

/// Fills every cell's four lock levels. Edges leaving the grid are pinned to
/// [`LockLevel::DoubleLocked`]; they never become doors.
pub fn assign_lock_levels(grid: &mut Grid, rng: &mut impl RandomSource) {
    let height = grid.height;
    let positions: Vec<_> = grid.positions().collect();
    for pos in positions {
        let levels: Vec<(Direction, LockLevel)> = Direction::ALL
            .into_iter()
            .map(|direction| {
                let level = if grid.in_bounds(pos.step(direction)) {
                    lock_level_for_row(pos.y as usize, height, rng)
                } else {
                    LockLevel::DoubleLocked
                };
                (direction, level)
            })
            .collect();
        if let Some(cell) = grid.cell_mut(pos) {
            for (direction, level) in levels {
                cell.lock_levels[direction] = level;
            }
        }
    }
    log::debug!("assigned lock levels to {} cells", grid.cells.len());
}
