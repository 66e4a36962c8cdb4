use std::error::Error;
use std::fmt;

use crate::{
    RunStatus,
    config::RulesConfig,
    content::ContentPack,
    game::Game,
    journal::{InputJournal, JOURNAL_FORMAT_VERSION},
};

#[derive(Debug, PartialEq, Eq)]
pub enum ReplayError {
    UnsupportedFormat { found: u16 },
    DuplicateSeq { seq: u64 },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { found } => write!(
                f,
                "journal format {found} is not supported (expected {JOURNAL_FORMAT_VERSION})"
            ),
            Self::DuplicateSeq { seq } => write!(f, "journal repeats input seq {seq}"),
        }
    }
}

impl Error for ReplayError {}

#[derive(Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_status: RunStatus,
    pub final_snapshot_hash: u64,
    pub applied: usize,
    pub rejected: usize,
}

/// Rebuilds the run from the journal seed and feeds every command in `seq`
/// order. Commands the game rejects are counted, not fatal.
pub fn replay_to_end(
    content: &ContentPack,
    rules: &RulesConfig,
    journal: &InputJournal,
) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedFormat { found: journal.format_version });
    }
    let mut records: Vec<_> = journal.inputs.iter().collect();
    records.sort_by_key(|record| record.seq);
    if let Some(pair) = records.windows(2).find(|pair| pair[0].seq == pair[1].seq) {
        return Err(ReplayError::DuplicateSeq { seq: pair[0].seq });
    }

    let mut game = Game::new(journal.seed, content, rules.clone());
    let mut applied = 0;
    let mut rejected = 0;
    for record in records {
        match game.apply(record.command) {
            Ok(_) => applied += 1,
            Err(err) => {
                log::debug!("replay seq {} rejected: {err}", record.seq);
                rejected += 1;
            }
        }
    }

    Ok(ReplayResult {
        final_status: game.run_status(),
        final_snapshot_hash: game.snapshot_hash(),
        applied,
        rejected,
    })
}
