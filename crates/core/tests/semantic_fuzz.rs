use std::collections::{BTreeSet, VecDeque};

use manor_core::{
    Command, ConsumableKind, ContentPack, Direction, Game, Interaction, LockLevel, Pos,
    RulesConfig,
};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn next_command(rng: &mut ChaCha8Rng, draw_pending: bool) -> Command {
    if draw_pending {
        return choose(
            rng,
            &[
                Command::ConfirmRoom(0),
                Command::ConfirmRoom(1),
                Command::ConfirmRoom(2),
                Command::Reroll,
                Command::CancelDraw,
                Command::Move(Direction::North),
            ],
        );
    }
    choose(
        rng,
        &[
            Command::Move(Direction::North),
            Command::Move(Direction::North),
            Command::Move(Direction::East),
            Command::Move(Direction::West),
            Command::Move(Direction::South),
            Command::Interact(Interaction::Pickup { index: 0 }),
            Command::Interact(Interaction::Dig),
            Command::Interact(Interaction::OpenChest),
            Command::Interact(Interaction::OpenLocker),
            Command::Interact(Interaction::Purchase { item: 3 }),
            Command::Interact(Interaction::Purchase { item: 5 }),
            Command::Consume(ConsumableKind::Cake),
            Command::ConfirmRoom(0),
        ],
    )
}

fn lock_table(game: &Game) -> Vec<[LockLevel; 4]> {
    game.grid()
        .positions()
        .filter_map(|pos| game.cell(pos))
        .map(|cell| Direction::ALL.map(|direction| cell.lock_level(direction)))
        .collect()
}

fn reachable_from_start(game: &Game) -> BTreeSet<Pos> {
    let grid = game.grid();
    let mut seen = BTreeSet::from([grid.start_pos()]);
    let mut queue = VecDeque::from([grid.start_pos()]);
    while let Some(pos) = queue.pop_front() {
        let Some(cell) = grid.cell(pos) else { continue };
        for direction in Direction::ALL {
            let next = pos.step(direction);
            if cell.door_exists(direction) && grid.is_discovered(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

fn check_invariants(
    game: &Game,
    initial_locks: &[[LockLevel; 4]],
    loot_seen: &mut [Option<usize>],
) -> Result<(), String> {
    if lock_table(game) != initial_locks {
        return Err("lock levels changed after construction".to_string());
    }

    let grid = game.grid();
    let reachable = reachable_from_start(game);
    for (index, pos) in grid.positions().enumerate() {
        let Some(cell) = grid.cell(pos) else { continue };
        for direction in Direction::ALL {
            let next = pos.step(direction);
            if cell.door_exists(direction) && !grid.in_bounds(next) {
                return Err(format!("door leaves the grid at {pos:?} {direction:?}"));
            }
            if cell.is_discovered()
                && grid.is_discovered(next)
                && grid.cell(next).is_some_and(|other| {
                    other.door_exists(direction.opposite()) != cell.door_exists(direction)
                })
            {
                return Err(format!("one-sided door between {pos:?} and {next:?}"));
            }
        }
        if cell.is_discovered() {
            if cell.room().is_none() {
                return Err(format!("discovered cell {pos:?} has no room"));
            }
            if !reachable.contains(&pos) {
                return Err(format!("discovered cell {pos:?} is unreachable from the start"));
            }
        }

        match (loot_seen[index], cell.loot_generated()) {
            (Some(_), false) => return Err(format!("loot guard reset at {pos:?}")),
            (Some(before), true) if cell.pickables().len() > before => {
                return Err(format!("pickables grew after first visit at {pos:?}"));
            }
            (_, true) => loot_seen[index] = Some(cell.pickables().len()),
            (None, false) => {}
        }
    }

    if !grid.is_discovered(game.position()) {
        return Err("player stands in an undiscovered cell".to_string());
    }
    Ok(())
}

fn run_fuzz_simulation(map_seed: u64, choice_seed: u64, max_commands: u32) -> Result<(), String> {
    let content = ContentPack::default();
    let mut rules = RulesConfig::default();
    rules.starting.keys = 3;
    rules.starting.dice = 2;
    let mut game = Game::new(map_seed, &content, rules);
    let mut rng = ChaCha8Rng::seed_from_u64(choice_seed);

    let initial_locks = lock_table(&game);
    let mut loot_seen = vec![None; game.grid().positions().count()];

    for _ in 0..max_commands {
        let before = game.snapshot_hash();
        let command = next_command(&mut rng, game.pending_draw().is_some());
        if game.apply(command).is_err() && game.snapshot_hash() != before {
            return Err(format!("rejected {command:?} changed state on map_seed {map_seed}"));
        }
        check_invariants(&game, &initial_locks, &mut loot_seen)
            .map_err(|reason| format!("Invariant failed: {reason} on map_seed {map_seed}"))?;
        if game.is_victory() {
            break;
        }
    }

    Ok(())
}

#[test]
fn test_fuzz_game_simulation() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(24));
    let seeds = (any::<u64>(), any::<u64>());

    runner
        .run(&seeds, |(map_seed, choice_seed)| {
            run_fuzz_simulation(map_seed, choice_seed, 400).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("semantic fuzz simulation should preserve invariants");
}
