//! Manor generation split into coherent submodules.
//! Every function here is pure over its inputs plus a [`RandomSource`]; the
//! game controller is the only writer of the grid.

pub mod doors;
pub mod draw;
pub mod locks;
pub mod loot;
pub mod seed;

pub use doors::resolve_doors;
pub use draw::{DrawOptions, draw_candidates, offered_door_counts};
pub use locks::assign_lock_levels;
pub use loot::{CellLoot, generate_loot};
pub use seed::{RandomSource, mix_seed};

use crate::content::ContentPack;
use crate::state::{GRID_HEIGHT, GRID_WIDTH, Grid};

/// Fresh manor: locks assigned, start cell realized with the entrance room
/// and a door on every in-bounds side.
pub fn build_manor(content: &ContentPack, rng: &mut impl RandomSource) -> Grid {
    let mut grid = Grid::new(GRID_WIDTH, GRID_HEIGHT);
    assign_lock_levels(&mut grid, rng);

    let start = grid.start_pos();
    let open = grid.in_bounds_directions(start);
    if let Some(cell) = grid.cell_mut(start) {
        cell.discovered = true;
        cell.room = content.entrance();
        for direction in open {
            cell.doors[direction] = true;
        }
    }
    grid
}
