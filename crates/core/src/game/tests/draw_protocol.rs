//! Tests for the pending-draw protocol: confirm, reroll and cancel.

use super::support::*;

fn open_north_draw<R: RandomSource>(game: &mut Game<R>) -> DrawOffer {
    match game.attempt_move(Direction::North) {
        Ok(MoveOutcome::DrawOffered(offer)) => offer,
        other => panic!("expected a draw, got {other:?}"),
    }
}

#[test]
fn pending_draw_blocks_everything_but_draw_commands() {
    let mut game = scripted_game(&[HIGH_ROLL]);
    let offer = open_north_draw(&mut game);

    assert_eq!(game.attempt_move(Direction::East), Err(GameError::DrawPending));
    assert_eq!(game.interact(Interaction::Dig), Err(GameError::DrawPending));
    assert_eq!(game.consume_item(ConsumableKind::Apple), Err(GameError::DrawPending));
    assert_eq!(game.pending_draw(), Some(&offer));

    game.cancel_draw().expect("cancel is always allowed");
    assert!(game.pending_draw().is_none());
    assert_eq!(game.log().last(), Some(&LogEvent::DrawCancelled { target: offer.target }));
    assert_eq!(game.status_message(), Some("Draw cancelled."));
    assert_eq!(game.resources(), &RulesConfig::default().starting.to_resources());

    open_north_draw(&mut game);
}

#[test]
fn draw_commands_need_a_pending_draw() {
    let mut game = scripted_game(&[HIGH_ROLL]);
    assert_eq!(game.confirm_drawn_room(0), Err(GameError::NoPendingDraw));
    assert_eq!(game.reroll(), Err(GameError::NoPendingDraw));
    assert_eq!(game.cancel_draw(), Err(GameError::NoPendingDraw));

    open_north_draw(&mut game);
    assert_eq!(game.confirm_drawn_room(3), Err(GameError::InvalidCandidate { index: 3 }));
    assert!(game.pending_draw().is_some());
}

#[test]
fn reroll_spends_a_die_and_keeps_the_target() {
    let mut game = scripted_game(&[HIGH_ROLL, 17, 3]);
    let offer = open_north_draw(&mut game);

    assert_eq!(game.reroll(), Err(GameError::Insufficient(Resource::Dice)));
    assert_eq!(game.status_message(), Some("Insufficient dice."));
    assert_eq!(game.pending_draw(), Some(&offer));

    game.state.resources.dice = 2;
    let redrawn = game.reroll().expect("one die available");
    assert_eq!(game.resources().dice, 1);
    assert_eq!(redrawn.target, offer.target);
    assert_eq!(game.pending_draw(), Some(&redrawn));
    assert!(matches!(game.log().last(), Some(LogEvent::Rerolled { .. })));
}

#[test]
fn key_and_gems_are_charged_together_on_confirm() {
    let mut game = scripted_game(&[HIGH_ROLL]);
    let origin = start(&game);
    set_lock(&mut game, origin, Direction::North, LockLevel::Locked);
    game.state.resources.keys = 1;
    game.state.resources.gems = 0;

    open_north_draw(&mut game);
    assert_eq!(game.resources().keys, 1, "opening the draw spends nothing");

    let costly = room_id(&game, "Vault");
    let free = room_id(&game, "Closet");
    if let Some(offer) = game.pending_draw.as_mut() {
        offer.candidates = [costly, costly, free];
    }

    assert_eq!(game.confirm_drawn_room(0), Err(GameError::Insufficient(Resource::Gems)));
    assert_eq!(game.status_message(), Some("Not enough gems."));
    assert_eq!(game.resources().keys, 1);
    assert_eq!(game.position(), origin);
    assert!(game.pending_draw().is_some(), "unaffordable pick leaves the draw open");

    let report = game.confirm_drawn_room(2).expect("free room");
    assert_eq!(report.room, free);
    assert_eq!(game.resources().keys, 0);
    assert!(game.log().iter().any(|event| matches!(
        event,
        LogEvent::LockOpened { payment: LockPayment::Key, .. }
    )));
}

#[test]
fn offer_reports_door_counts_per_candidate() {
    let mut game = scripted_game(&[HIGH_ROLL]);
    open_north_draw(&mut game);
    let hallway = room_id(&game, "Corridor");
    let hazard = room_id(&game, "Furnace");
    let bedroom = room_id(&game, "Bedroom");
    if let Some(offer) = game.pending_draw.as_mut() {
        offer.candidates = [hallway, hazard, bedroom];
    }

    assert_eq!(game.pending_door_counts(), Some([4, 1, 2]));
    game.cancel_draw().expect("cancel");
    assert_eq!(game.pending_door_counts(), None);
}

#[test]
fn goal_room_is_offered_at_the_goal_cell_and_wins() {
    let mut game = scripted_game(&[HIGH_ROLL]);
    let below_goal = Pos { y: 1, x: 2 };
    place_room(&mut game, below_goal, "Closet", &[Direction::North]);
    set_lock(&mut game, below_goal, Direction::North, LockLevel::Open);
    teleport(&mut game, below_goal);

    let offer = open_north_draw(&mut game);
    let goal = game.content().goal().expect("goal room");
    assert_eq!(offer.target, game.grid().goal_pos());
    assert_eq!(offer.candidates[2], goal);

    let report = game.confirm_drawn_room(2).expect("goal room is free");
    assert_eq!(report.status, RunStatus::Victory);
    assert!(game.is_victory());
    assert_eq!(game.run_status(), RunStatus::Victory);
    assert_eq!(game.log().last(), Some(&LogEvent::StatusChanged(RunStatus::Victory)));
    assert_eq!(game.status_message(), Some("Victory! You reached the Antechamber."));
}
