//! Room features, pickups, the shop, and consumables.
//! This module exists to spend and grant resources for in-room actions.
//! It does not own movement or first-visit loot rolls.

use super::*;
use crate::content::ShopGood;

impl<R: RandomSource> Game<R> {
    pub fn interact(&mut self, interaction: Interaction) -> Result<InteractionOutcome, GameError> {
        let result = self.interact_inner(interaction);
        self.conclude(result)
    }

    /// Eats one `item` and returns the steps it restored.
    pub fn consume_item(&mut self, item: ConsumableKind) -> Result<u32, GameError> {
        let result = self.consume_inner(item);
        self.conclude(result)
    }

    /// Like [`Self::consume_item`], for callers holding a display name.
    pub fn consume_named(&mut self, name: &str) -> Result<u32, GameError> {
        let result = match ConsumableKind::from_name(name) {
            Some(item) => self.consume_inner(item),
            None => Err(GameError::UnknownItem { name: name.trim().to_string() }),
        };
        self.conclude(result)
    }

    fn interact_inner(
        &mut self,
        interaction: Interaction,
    ) -> Result<(InteractionOutcome, String), GameError> {
        self.ensure_no_pending_draw()?;
        match interaction {
            Interaction::Dig => self.dig(),
            Interaction::OpenChest => self.open_chest(),
            Interaction::OpenLocker => self.open_locker(),
            Interaction::Pickup { index } => self.pick_up(index),
            Interaction::Purchase { item } => self.purchase(item),
        }
    }

    fn dig(&mut self) -> Result<(InteractionOutcome, String), GameError> {
        if !self.current_cell().has_dig_spot {
            return Err(GameError::NothingHere(Feature::DigSpot));
        }
        if !self.state.resources.tools.shovel {
            return Err(GameError::Insufficient(Resource::Tool(PermanentTool::Shovel)));
        }

        let found = if self.rng.percent_chance(self.rules.dig_empty_percent) {
            None
        } else {
            Some(self.random_consumable())
        };
        if let Some(item) = found {
            self.state.resources.add_consumable(item, 1);
        }
        self.current_cell_mut().has_dig_spot = false;
        self.log.push(LogEvent::SpotDug { found });

        let message = match found {
            Some(item) => format!("You dig up a {}.", item.name()),
            None => "You found nothing while digging.".to_string(),
        };
        Ok((InteractionOutcome::Dug { found }, message))
    }

    fn open_chest(&mut self) -> Result<(InteractionOutcome, String), GameError> {
        if !self.current_cell().has_chest {
            return Err(GameError::NothingHere(Feature::Chest));
        }
        let used_hammer = self.state.resources.tools.hammer;
        if !used_hammer && self.state.resources.keys == 0 {
            return Err(GameError::Insufficient(Resource::KeyOrHammer));
        }

        if !used_hammer {
            self.state.resources.keys -= 1;
        }
        let found = self.random_consumable();
        self.state.resources.add_consumable(found, 1);
        self.current_cell_mut().has_chest = false;
        self.log.push(LogEvent::ChestOpened { found });
        Ok((
            InteractionOutcome::ChestOpened { found, used_hammer },
            format!("Chest: {}.", found.name()),
        ))
    }

    fn open_locker(&mut self) -> Result<(InteractionOutcome, String), GameError> {
        if !self.current_cell().has_locker {
            return Err(GameError::NothingHere(Feature::Locker));
        }
        if self.state.resources.keys == 0 {
            return Err(GameError::Insufficient(Resource::Keys));
        }

        self.state.resources.keys -= 1;
        let found = self.random_consumable();
        self.state.resources.add_consumable(found, 1);
        self.current_cell_mut().has_locker = false;
        self.log.push(LogEvent::LockerOpened { found });
        Ok((InteractionOutcome::LockerOpened { found }, format!("Locker: {}.", found.name())))
    }

    fn pick_up(&mut self, index: usize) -> Result<(InteractionOutcome, String), GameError> {
        if index >= self.current_cell().pickables.len() {
            return Err(GameError::NoSuchPickable { index });
        }
        let pickable = self.current_cell_mut().pickables.remove(index);

        let resources = &mut self.state.resources;
        let message = match pickable {
            Pickable::Key => {
                resources.keys = resources.keys.saturating_add(1);
                "Picked up a key.".to_string()
            }
            Pickable::Gem => {
                resources.gems = resources.gems.saturating_add(1);
                "Picked up a gem.".to_string()
            }
            Pickable::Gold { amount } => {
                resources.gold = resources.gold.saturating_add(amount);
                format!("Picked up {amount} gold.")
            }
        };
        self.log.push(LogEvent::ItemPickedUp(pickable));
        Ok((InteractionOutcome::PickedUp(pickable), message))
    }

    fn purchase(&mut self, item: usize) -> Result<(InteractionOutcome, String), GameError> {
        if !self.current_cell().is_shop {
            return Err(GameError::NotAShop);
        }
        let Some(offer) = self.content.shop_items.get(item).copied() else {
            return Err(GameError::UnknownShopItem { item });
        };
        if let ShopGood::Tool(tool) = offer.good
            && self.state.resources.tools.has(tool)
        {
            return Err(GameError::AlreadyOwned(tool));
        }
        if self.state.resources.gold < offer.price {
            return Err(GameError::Insufficient(Resource::Gold));
        }

        let resources = &mut self.state.resources;
        resources.gold -= offer.price;
        match offer.good {
            ShopGood::Consumable(kind) => resources.add_consumable(kind, 1),
            ShopGood::Dice(n) => resources.dice = resources.dice.saturating_add(n),
            ShopGood::Keys(n) => resources.keys = resources.keys.saturating_add(n),
            ShopGood::Gems(n) => resources.gems = resources.gems.saturating_add(n),
            ShopGood::Tool(tool) => resources.tools.grant(tool),
        }
        self.log.push(LogEvent::Purchased { item });
        Ok((InteractionOutcome::Purchased { item }, format!("Bought {}.", offer.name)))
    }

    fn consume_inner(&mut self, item: ConsumableKind) -> Result<(u32, String), GameError> {
        self.ensure_no_pending_draw()?;
        if !self.state.resources.take_consumable(item) {
            return Err(GameError::Insufficient(Resource::Consumable(item)));
        }
        let steps_gained = item.step_gain();
        self.state.resources.gain_steps(steps_gained);
        self.log.push(LogEvent::ItemConsumed { item, steps_gained });
        Ok((steps_gained, format!("Ate the {}: +{steps_gained} steps.", item.name())))
    }

    fn random_consumable(&mut self) -> ConsumableKind {
        ConsumableKind::ALL[self.rng.below(ConsumableKind::ALL.len())]
    }

    fn current_cell_mut(&mut self) -> &mut Cell {
        self.state.current_cell_mut()
    }
}
