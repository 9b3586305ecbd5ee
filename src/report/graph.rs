//! Bar layout for the delta graph.
//!
//! One horizontal bar per file, scaled so `max_total` spans the full width.
//! A bar is a blue baseline part plus an optional coloured tail:
//! - grew: baseline = previous total, tail = added lines (red)
//! - shrank: baseline = current total, tail = removed lines (green)
//! - otherwise: baseline = current total, no tail

use crate::store::diff::{DeltaEntry, SnapshotDelta};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tail {
    None,
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub name: String,
    pub base_cols: u16,
    pub tail_cols: u16,
    pub tail: Tail,
    /// Printed after the bar
    pub current: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphLayout {
    NoFiles,
    AllZero,
    Bars(Vec<Bar>),
}

pub fn layout(delta: &SnapshotDelta, width: u16) -> GraphLayout {
    if delta.entries.is_empty() {
        return GraphLayout::NoFiles;
    }
    if delta.max_total == 0 {
        return GraphLayout::AllZero;
    }

    let bars = delta
        .entries
        .iter()
        .map(|entry| bar(entry, delta.max_total, width))
        .collect();

    GraphLayout::Bars(bars)
}

fn bar(entry: &DeltaEntry, max_total: u64, width: u16) -> Bar {
    let (base, tail) = if entry.added > 0 {
        (entry.baseline, Tail::Added)
    } else if entry.removed > 0 {
        (entry.current, Tail::Removed)
    } else {
        (entry.current, Tail::None)
    };

    // scale the end points, not the parts, so rounding never overflows width
    let base_end = scale(base, max_total, width);
    let full_end = scale(entry.baseline.max(entry.current), max_total, width);

    Bar {
        name: entry.name.clone(),
        base_cols: base_end,
        tail_cols: if tail == Tail::None { 0 } else { full_end - base_end },
        tail,
        current: entry.current,
    }
}

fn scale(value: u64, max_total: u64, width: u16) -> u16 {
    let cols = (value as u128 * width as u128 + max_total as u128 / 2) / max_total as u128;
    cols.min(width as u128) as u16
}
