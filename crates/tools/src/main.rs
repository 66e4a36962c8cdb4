use anyhow::{Context, Result};
use clap::Parser;
use manor_core::{ContentPack, InputJournal, ReplayResult, RulesConfig, replay::replay_to_end};
use std::{fs, path::PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// Optional TOML rules file; canonical rules when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let journal_data = fs::read_to_string(&args.journal)
        .with_context(|| format!("Failed to read journal file: {}", args.journal.display()))?;
    let journal: InputJournal = serde_json::from_str(&journal_data)
        .with_context(|| "Failed to deserialize journal JSON")?;

    let rules = match &args.config {
        Some(path) => RulesConfig::load(path)
            .with_context(|| format!("Failed to load rules: {}", path.display()))?,
        None => RulesConfig::default(),
    };
    let content = ContentPack::default();

    let result: ReplayResult =
        replay_to_end(&content, &rules, &journal).context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Commands applied: {}", result.applied);
    println!("Commands rejected: {}", result.rejected);
    println!("Status: {:?}", result.final_status);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
