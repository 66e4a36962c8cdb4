//! Terminal-condition predicates, recomputed on every query and never cached.

use super::*;

impl<R: RandomSource> Game<R> {
    /// Standing on the goal cell with the goal room placed there.
    pub fn is_victory(&self) -> bool {
        self.state.position == self.state.grid.goal_pos()
            && self.current_cell().room().is_some_and(|room| self.content.is_goal(room))
    }

    pub fn is_defeated(&self) -> bool {
        self.state.resources.steps == 0
    }

    /// No door out of the current cell can be crossed with what the player holds.
    pub fn is_deadlocked(&self) -> bool {
        let here = self.state.position;
        let cell = self.current_cell();
        let resources = &self.state.resources;

        !Direction::ALL.into_iter().any(|direction| {
            let target = here.step(direction);
            if !self.state.grid.in_bounds(target) || !cell.door_exists(direction) {
                return false;
            }
            if self.state.grid.is_discovered(target) {
                return true;
            }
            match cell.lock_level(direction) {
                LockLevel::Open => true,
                LockLevel::Locked => resources.tools.lockpick_kit || resources.keys > 0,
                LockLevel::DoubleLocked => resources.keys > 0,
            }
        })
    }

    /// Victory outranks defeat, which outranks deadlock.
    pub fn run_status(&self) -> RunStatus {
        if self.is_victory() {
            RunStatus::Victory
        } else if self.is_defeated() {
            RunStatus::Defeat
        } else if self.is_deadlocked() {
            RunStatus::Deadlocked
        } else {
            RunStatus::InProgress
        }
    }
}
