//! Snapshot comparison engine.
//!
//! Compares a snapshot with its predecessor in history:
//! - Matches files by relative name
//! - Per file: baseline, current, added and removed total lines
//! - Missing files count as a zero baseline (or zero current)
//! - The first snapshot is its own baseline, so nothing is added or removed

use std::collections::BTreeSet;

use crate::snapshot::{LineCounts, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaKind {
    Unchanged,
    Grew,
    Shrank,
    New,
    Gone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaEntry {
    pub name: String,
    pub baseline: u64,
    pub current: u64,
    pub added: u64,
    pub removed: u64,
    pub kind: DeltaKind,
}

impl DeltaEntry {
    pub fn delta(&self) -> i64 {
        to_i64(self.added).saturating_sub(to_i64(self.removed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotDelta {
    pub entries: Vec<DeltaEntry>,
    pub net_change: i64,
    /// Largest baseline or current value, the 100% mark for bar widths
    pub max_total: u64,
    pub from_id: Option<i64>,
    pub to_id: i64,
}

impl SnapshotDelta {
    pub fn entry(&self, name: &str) -> Option<&DeltaEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Delta of `history[index]` against `history[index - 1]`.
/// `history` must be oldest first, as returned by `Store::list_all`.
pub fn delta_for(history: &[Snapshot], index: usize) -> Option<SnapshotDelta> {
    let current = history.get(index)?;
    let previous = index.checked_sub(1).and_then(|i| history.get(i));
    Some(compare(previous, current))
}

/// Compare `current` against `previous`, or against itself when there is none
pub fn compare(previous: Option<&Snapshot>, current: &Snapshot) -> SnapshotDelta {
    let baseline_snapshot = previous.unwrap_or(current);

    let names: BTreeSet<&String> = baseline_snapshot
        .files
        .keys()
        .chain(current.files.keys())
        .collect();

    let mut entries = Vec::with_capacity(names.len());
    let mut net_change: i64 = 0;
    let mut max_total: u64 = 0;

    for name in names {
        let before = baseline_snapshot.files.get(name);
        let after = current.files.get(name);

        let baseline = before.map_or(0, |c: &LineCounts| c.total);
        let now = after.map_or(0, |c: &LineCounts| c.total);

        let added = now.saturating_sub(baseline);
        let removed = baseline.saturating_sub(now);

        let kind = match (before, after) {
            (None, Some(_)) => DeltaKind::New,
            (Some(_), None) => DeltaKind::Gone,
            _ if added > 0 => DeltaKind::Grew,
            _ if removed > 0 => DeltaKind::Shrank,
            _ => DeltaKind::Unchanged,
        };

        max_total = max_total.max(baseline).max(now);

        let entry = DeltaEntry {
            name: name.clone(),
            baseline,
            current: now,
            added,
            removed,
            kind,
        };
        net_change = net_change.saturating_add(entry.delta());
        entries.push(entry);
    }

    SnapshotDelta {
        entries,
        net_change,
        max_total,
        from_id: previous.map(|p| p.id),
        to_id: current.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(id: i64, files: &[(&str, u64)]) -> Snapshot {
        Snapshot {
            id,
            timestamp: id * 100,
            files: files
                .iter()
                .map(|(n, t)| (n.to_string(), LineCounts::new(*t, *t)))
                .collect(),
        }
    }

    #[test]
    fn first_snapshot_is_its_own_baseline() {
        let history = vec![snap(1, &[("a.py", 10), ("b.c", 4)])];
        let delta = delta_for(&history, 0).unwrap();

        assert_eq!(delta.from_id, None);
        assert_eq!(delta.net_change, 0);
        for entry in &delta.entries {
            assert_eq!(entry.kind, DeltaKind::Unchanged);
            assert_eq!((entry.added, entry.removed), (0, 0));
            assert_eq!(entry.baseline, entry.current);
        }
    }

    #[test]
    fn grew_reports_added_lines() {
        let history = vec![snap(1, &[("fileX", 10)]), snap(2, &[("fileX", 15)])];
        let delta = delta_for(&history, 1).unwrap();
        let entry = delta.entry("fileX").unwrap();

        assert_eq!(entry.kind, DeltaKind::Grew);
        assert_eq!(entry.added, 5);
        assert_eq!(entry.removed, 0);
        assert_eq!(entry.baseline, 10);
        assert_eq!(delta.net_change, 5);
    }

    #[test]
    fn shrank_reports_removed_lines() {
        let history = vec![snap(1, &[("a.py", 30)]), snap(2, &[("a.py", 12)])];
        let entry = delta_for(&history, 1).unwrap().entries.remove(0);

        assert_eq!(entry.kind, DeltaKind::Shrank);
        assert_eq!((entry.added, entry.removed), (0, 18));
        assert_eq!(entry.delta(), -18);
    }

    #[test]
    fn new_and_gone_files_use_zero_baseline() {
        let history = vec![snap(1, &[("old.c", 7)]), snap(2, &[("new.c", 3)])];
        let delta = delta_for(&history, 1).unwrap();

        let new = delta.entry("new.c").unwrap();
        assert_eq!(new.kind, DeltaKind::New);
        assert_eq!((new.baseline, new.added), (0, 3));

        let gone = delta.entry("old.c").unwrap();
        assert_eq!(gone.kind, DeltaKind::Gone);
        assert_eq!((gone.current, gone.removed), (0, 7));

        assert_eq!(delta.net_change, -4);
    }

    #[test]
    fn entries_are_sorted_by_name() {
        let history = vec![
            snap(1, &[("z.py", 1), ("m.py", 1)]),
            snap(2, &[("a.py", 1), ("m.py", 1)]),
        ];
        let delta = delta_for(&history, 1).unwrap();
        let names: Vec<&str> = delta.entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["a.py", "m.py", "z.py"]);
    }

    #[test]
    fn max_total_covers_baseline_and_current() {
        let history = vec![
            snap(1, &[("a.py", 40), ("b.py", 5)]),
            snap(2, &[("a.py", 10), ("b.py", 25)]),
        ];
        assert_eq!(delta_for(&history, 1).unwrap().max_total, 40);
    }

    #[test]
    fn out_of_range_index_is_none() {
        assert!(delta_for(&[], 0).is_none());
        assert!(delta_for(&[snap(1, &[])], 1).is_none());
    }

    #[test]
    fn snapshot_ids_preserved() {
        let history = vec![snap(7, &[]), snap(13, &[])];
        let delta = delta_for(&history, 1).unwrap();
        assert_eq!(delta.from_id, Some(7));
        assert_eq!(delta.to_id, 13);
        assert!(delta.entries.is_empty());
    }
}
