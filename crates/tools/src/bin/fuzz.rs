use anyhow::{Context, Result, ensure};
use clap::Parser;
use manor_core::{
    Command, ConsumableKind, ContentPack, Direction, Game, InputJournal, Interaction, RulesConfig,
    RunStatus, mix_seed,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use std::time::{SystemTime, UNIX_EPOCH};
use std::{fs, path::PathBuf, process};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session seed; derived from the clock and process id when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short = 'n', long, default_value_t = 1000)]
    commands: u32,
    /// Optional TOML rules file; canonical rules when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write the generated command journal here for later replay
    #[arg(long)]
    journal_out: Option<PathBuf>,
}

const DRAW_COMMANDS: &[Command] = &[
    Command::ConfirmRoom(0),
    Command::ConfirmRoom(1),
    Command::ConfirmRoom(2),
    Command::Reroll,
    Command::CancelDraw,
];

const ROAM_COMMANDS: &[Command] = &[
    Command::Move(Direction::North),
    Command::Move(Direction::North),
    Command::Move(Direction::East),
    Command::Move(Direction::West),
    Command::Move(Direction::South),
    Command::Interact(Interaction::Pickup { index: 0 }),
    Command::Interact(Interaction::Dig),
    Command::Interact(Interaction::OpenChest),
    Command::Interact(Interaction::OpenLocker),
    Command::Interact(Interaction::Purchase { item: 0 }),
    Command::Interact(Interaction::Purchase { item: 5 }),
    Command::Consume(ConsumableKind::Cake),
    Command::Consume(ConsumableKind::Meal),
];

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let entropy = (now_nanos as u64) ^ ((now_nanos >> 64) as u64);
    mix_seed(entropy, u64::from(process::id()))
}

fn check_invariants(game: &Game) -> Result<()> {
    let grid = game.grid();
    ensure!(grid.is_discovered(game.position()), "Invariant failed: player off the map");
    for pos in grid.positions() {
        let Some(cell) = grid.cell(pos) else { continue };
        if !cell.is_discovered() {
            ensure!(cell.room().is_none(), "Invariant failed: hidden cell {pos:?} has a room");
            continue;
        }
        for direction in Direction::ALL {
            let next = pos.step(direction);
            if let Some(other) = grid.cell(next)
                && other.is_discovered()
            {
                ensure!(
                    cell.door_exists(direction) == other.door_exists(direction.opposite()),
                    "Invariant failed: one-sided door between {pos:?} and {next:?}"
                );
            } else if !grid.in_bounds(next) {
                ensure!(
                    !cell.door_exists(direction),
                    "Invariant failed: door through the outer wall at {pos:?}"
                );
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let rules = match &args.config {
        Some(path) => RulesConfig::load(path)
            .with_context(|| format!("Failed to load rules: {}", path.display()))?,
        None => RulesConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(runtime_seed);

    println!("Starting Fuzz harness on seed {} for max {} commands...", seed, args.commands);
    let content = ContentPack::default();
    let mut game = Game::new(seed, &content, rules);
    let mut rng = ChaCha8Rng::seed_from_u64(mix_seed(seed, 1));
    let mut journal = InputJournal::new(seed);

    let mut rejected = 0_u32;
    for issued in 0..args.commands {
        let command = if game.pending_draw().is_some() {
            choose(&mut rng, DRAW_COMMANDS)
        } else {
            choose(&mut rng, ROAM_COMMANDS)
        };
        journal.append(command);

        let before = game.snapshot_hash();
        if game.apply(command).is_err() {
            rejected += 1;
            ensure!(
                game.snapshot_hash() == before,
                "Invariant failed: rejected {command:?} changed state"
            );
        }
        check_invariants(&game)?;

        if game.run_status() == RunStatus::Victory {
            println!("Reached the goal after {} commands", issued + 1);
            break;
        }
    }

    println!(
        "Finished with status {:?}, {} rejected commands, hash {}",
        game.run_status(),
        rejected,
        game.snapshot_hash()
    );
    if let Some(path) = &args.journal_out {
        let text = serde_json::to_string_pretty(&journal).context("Failed to encode journal")?;
        fs::write(path, text)
            .with_context(|| format!("Failed to write journal: {}", path.display()))?;
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_optional_on_the_command_line() {
        let given = Args::try_parse_from(["fuzz", "--seed", "7"]).expect("parses");
        assert_eq!(given.seed, Some(7));

        let omitted = Args::try_parse_from(["fuzz", "-n", "5"]).expect("parses");
        assert_eq!(omitted.seed, None);
        assert_eq!(omitted.commands, 5);
    }
}
