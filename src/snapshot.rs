use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Line counts for a single file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCounts {
    pub total: u64,
    pub non_empty: u64,
}

impl LineCounts {
    pub fn new(total: u64, non_empty: u64) -> Self {
        LineCounts { total, non_empty }
    }

    /// Share of non-empty lines, 0.0 for an empty file
    pub fn code_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.non_empty as f64 / self.total as f64 * 100.0
        }
    }
}

/// Relative filename -> counts. Ordered so equality and output are stable.
pub type FileCounts = BTreeMap<String, LineCounts>;

/// One stored measurement. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub id: i64,
    pub timestamp: i64,
    pub files: FileCounts,
}

impl Snapshot {
    pub fn total_lines(&self) -> u64 {
        self.files.values().map(|c| c.total).sum()
    }

    pub fn non_empty_lines(&self) -> u64 {
        self.files.values().map(|c| c.non_empty).sum()
    }

    /// Copy of this snapshot with `name` dropped from its files.
    /// Used to keep the tool's own file out of older rows.
    pub fn without_file(mut self, name: &str) -> Self {
        self.files.remove(name);
        self
    }
}
