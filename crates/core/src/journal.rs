use crate::types::Command;

use serde::{Deserialize, Serialize};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub build_id: String,
    pub seed: u64,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub command: Command,
}

impl InputJournal {
    pub fn new(seed: u64) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: "dev".to_string(),
            seed,
            inputs: Vec::new(),
        }
    }

    /// Appends `command` with the next sequence number.
    pub fn append(&mut self, command: Command) -> u64 {
        let seq = self.inputs.last().map_or(0, |record| record.seq + 1);
        self.inputs.push(InputRecord { seq, command });
        seq
    }
}
