//! Crossing edges, the room-draw protocol, and room entry.
//! This module exists to keep lock payment, draw confirmation and entry effects in one flow.
//! It does not own win/defeat evaluation or feature interactions.

use super::*;
use crate::mapgen::DrawOptions;

impl<R: RandomSource> Game<R> {
    /// Moves through the door in `direction`. A discovered neighbor is entered
    /// immediately; an undiscovered one opens a draw that must be confirmed,
    /// rerolled or cancelled before anything else happens.
    pub fn attempt_move(&mut self, direction: Direction) -> Result<MoveOutcome, GameError> {
        let result = self.attempt_move_inner(direction);
        self.conclude(result)
    }

    pub fn confirm_drawn_room(&mut self, index: usize) -> Result<EntryReport, GameError> {
        let result = self.confirm_inner(index);
        self.conclude(result)
    }

    /// Spends one die to replace the pending candidates.
    pub fn reroll(&mut self) -> Result<DrawOffer, GameError> {
        let result = self.reroll_inner();
        self.conclude(result)
    }

    pub fn cancel_draw(&mut self) -> Result<(), GameError> {
        let result = match self.pending_draw.take() {
            Some(offer) => {
                self.log.push(LogEvent::DrawCancelled { target: offer.target });
                Ok(((), "Draw cancelled.".to_string()))
            }
            None => Err(GameError::NoPendingDraw),
        };
        self.conclude(result)
    }

    /// What crossing an edge of `lock` level would cost right now.
    pub fn lock_payment(&self, lock: LockLevel) -> Result<LockPayment, GameError> {
        let resources = &self.state.resources;
        match lock {
            LockLevel::Open => Ok(LockPayment::Free),
            LockLevel::Locked if resources.tools.lockpick_kit => Ok(LockPayment::Lockpick),
            LockLevel::Locked if resources.keys > 0 => Ok(LockPayment::Key),
            LockLevel::Locked => Err(GameError::Insufficient(Resource::KeyOrLockpick)),
            LockLevel::DoubleLocked if resources.keys > 0 => Ok(LockPayment::Key),
            LockLevel::DoubleLocked => Err(GameError::Insufficient(Resource::Keys)),
        }
    }

    fn attempt_move_inner(
        &mut self,
        direction: Direction,
    ) -> Result<(MoveOutcome, String), GameError> {
        self.ensure_no_pending_draw()?;

        let origin = self.state.position;
        let target = origin.step(direction);
        if !self.state.grid.in_bounds(target) {
            return Err(GameError::OutOfBounds { direction });
        }
        let here = self.state.current_cell();
        if !here.door_exists(direction) {
            return Err(GameError::NoDoor { direction });
        }
        let lock = here.lock_level(direction);

        if let Some(neighbor) = self.state.grid.cell(target)
            && neighbor.is_discovered()
        {
            if !neighbor.door_exists(direction.opposite()) {
                return Err(GameError::NoReturnDoor { direction });
            }
            let Some(room) = neighbor.room() else {
                return Err(GameError::NoDoor { direction });
            };
            let report = self.enter_room(target, room);
            let message = self.entry_message(&report);
            return Ok((MoveOutcome::Entered(report), message));
        }

        // Validate only; the payment is charged when a room is confirmed.
        self.lock_payment(lock)?;

        let open_directions = self.state.grid.in_bounds_directions(target).len();
        let candidates = mapgen::draw_candidates(
            &self.content,
            self.draw_options(target),
            &mut self.rng,
        );
        let offer = DrawOffer { origin, target, travel: direction, open_directions, lock, candidates };
        self.log.push(LogEvent::RoomsDrawn { target, candidates });
        let message = self.offer_message(&offer);
        self.pending_draw = Some(offer.clone());
        Ok((MoveOutcome::DrawOffered(offer), message))
    }

    fn confirm_inner(&mut self, index: usize) -> Result<(EntryReport, String), GameError> {
        let Some(offer) = self.pending_draw.clone() else {
            return Err(GameError::NoPendingDraw);
        };
        let Some(&room) = offer.candidates.get(index) else {
            return Err(GameError::InvalidCandidate { index });
        };
        let template = *self.content.room(room);
        let payment = self.lock_payment(offer.lock)?;
        if self.state.resources.gems < template.gem_cost {
            return Err(GameError::Insufficient(Resource::Gems));
        }

        // Every check passed; commit.
        let resources = &mut self.state.resources;
        if payment == LockPayment::Key {
            resources.keys -= 1;
        }
        resources.gems -= template.gem_cost;
        self.log.push(LogEvent::LockOpened {
            pos: offer.origin,
            direction: offer.travel,
            payment,
        });

        let doors = mapgen::resolve_doors(
            &self.state.grid,
            offer.target,
            offer.travel,
            template.theoretical_doors(),
            &mut self.rng,
        );
        if let Some(cell) = self.state.grid.cell_mut(offer.target) {
            cell.room = Some(room);
            cell.discovered = true;
            for (direction, open) in doors.iter() {
                cell.doors[direction] |= open;
            }
        }
        if let Some(previous) = self.state.grid.cell_mut(offer.origin) {
            previous.doors[offer.travel] = true;
        }
        self.log.push(LogEvent::RoomPlaced { pos: offer.target, room, doors });
        self.pending_draw = None;

        let report = self.enter_room(offer.target, room);
        let message = self.entry_message(&report);
        Ok((report, message))
    }

    fn reroll_inner(&mut self) -> Result<(DrawOffer, String), GameError> {
        let Some(mut offer) = self.pending_draw.clone() else {
            return Err(GameError::NoPendingDraw);
        };
        if self.state.resources.dice == 0 {
            return Err(GameError::Insufficient(Resource::Dice));
        }
        self.state.resources.dice -= 1;

        offer.candidates =
            mapgen::draw_candidates(&self.content, self.draw_options(offer.target), &mut self.rng);
        self.log.push(LogEvent::Rerolled { target: offer.target, candidates: offer.candidates });
        let message = self.offer_message(&offer);
        self.pending_draw = Some(offer.clone());
        Ok((offer, message))
    }

    /// Relocates the player and applies everything that happens on arrival:
    /// one step spent, flat step effects, then first-visit loot.
    pub(super) fn enter_room(&mut self, pos: Pos, room: RoomId) -> EntryReport {
        self.state.position = pos;
        let template = *self.content.room(room);
        let resources = &mut self.state.resources;
        resources.consume_steps(1);
        if template.has_effect(EffectTag::StepBonus) {
            resources.gain_steps(self.rules.step_bonus);
        }
        if template.has_effect(EffectTag::StepPenalty) {
            resources.consume_steps(self.rules.step_penalty);
        }

        let first_visit = self.state.grid.cell(pos).is_some_and(|cell| !cell.loot_generated);
        if first_visit {
            let loot = mapgen::generate_loot(&template, &self.state.resources.tools, &mut self.rng);
            if let Some(cell) = self.state.grid.cell_mut(pos) {
                cell.is_shop = loot.is_shop;
                cell.has_locker = loot.has_locker;
                cell.has_dig_spot = loot.has_dig_spot;
                cell.has_chest = loot.has_chest;
                cell.pickables.extend(loot.pickables);
                cell.loot_generated = true;
            }
        }

        self.log.push(LogEvent::RoomEntered { pos, room, first_visit });
        EntryReport { pos, room, first_visit, status: self.run_status() }
    }

    fn draw_options(&self, target: Pos) -> DrawOptions {
        DrawOptions {
            lucky_charm: self.state.resources.tools.lucky_charm,
            offer_goal_room: self.rules.offer_goal_room,
            at_goal_cell: target == self.state.grid.goal_pos(),
        }
    }

    fn entry_message(&self, report: &EntryReport) -> String {
        let name = self.room_name(report.room);
        if report.status == RunStatus::Victory {
            format!("Victory! You reached the {name}.")
        } else {
            format!("Entered {name}.")
        }
    }

    fn offer_message(&self, offer: &DrawOffer) -> String {
        let names: Vec<String> = offer
            .candidates
            .iter()
            .map(|id| {
                let template = self.content.room(*id);
                match template.gem_cost {
                    0 => template.name.to_string(),
                    cost => format!("{} ({cost} gems)", template.name),
                }
            })
            .collect();
        format!("Choose a room: {}.", names.join(" / "))
    }
}
