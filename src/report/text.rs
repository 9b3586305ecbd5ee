//! Text rendering of the snapshot history.
//!
//! Newest snapshot first, numbered chronologically. Each block is a
//! per-file table (total, non-empty, code %) followed by the project totals.
//! The last snapshot of each calendar day is tagged with its weekday.
//! Segments carry a [`Tone`] so the terminal UI can colour them.

use std::collections::HashMap;
use std::fmt::Display;

use chrono::TimeZone;

use crate::snapshot::Snapshot;
use crate::util::{calendar_date, format_timestamp, weekday_label};

pub const EMPTY_HISTORY: &str = "No snapshots yet. Run the tool again to create one.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Title,
    Weekday,
    Header,
    Total,
    NonEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub tone: Tone,
}

pub type TextLine = Vec<Segment>;

fn seg(text: impl Into<String>, tone: Tone) -> Segment {
    Segment {
        text: text.into(),
        tone,
    }
}

fn plain(text: impl Into<String>) -> TextLine {
    vec![seg(text, Tone::Plain)]
}

/// `history` is oldest first, as stored
pub fn render<Tz: TimeZone>(history: &[Snapshot], tz: &Tz) -> Vec<TextLine>
where
    Tz::Offset: Display,
{
    if history.is_empty() {
        return vec![plain(EMPTY_HISTORY)];
    }

    // last one of each day wins
    let mut last_of_day = HashMap::new();
    for (idx, snapshot) in history.iter().enumerate() {
        if let Some(date) = calendar_date(snapshot.timestamp, tz) {
            last_of_day.insert(date, idx);
        }
    }

    let mut lines = Vec::new();

    for (idx, snapshot) in history.iter().enumerate().rev() {
        let mut title = vec![seg(
            format!(
                "Snapshot {} - {}",
                idx + 1,
                format_timestamp(snapshot.timestamp, tz)
            ),
            Tone::Title,
        )];

        let is_last_of_day = calendar_date(snapshot.timestamp, tz)
            .and_then(|date| last_of_day.get(&date))
            .is_some_and(|&last| last == idx);
        if is_last_of_day {
            if let Some(weekday) = weekday_label(snapshot.timestamp, tz) {
                title.push(seg("  ", Tone::Plain));
                title.push(seg(weekday, Tone::Weekday));
            }
        }
        lines.push(title);

        if snapshot.files.is_empty() {
            lines.push(plain("(no files)"));
            lines.push(plain(""));
            continue;
        }

        render_table(snapshot, &mut lines);
    }

    lines
}

fn render_table(snapshot: &Snapshot, lines: &mut Vec<TextLine>) {
    let name_width = snapshot
        .files
        .keys()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0)
        + 2;

    let header = format!(
        "{:<name_width$}{:>10}  {:>12}  {:>7}",
        "File", "Total", "Non-empty", "Code %"
    );
    let rule_width = header.chars().count();

    lines.push(vec![seg(header, Tone::Header)]);
    lines.push(plain("-".repeat(rule_width)));

    for (name, counts) in &snapshot.files {
        lines.push(vec![
            seg(format!("{name:<name_width$}"), Tone::Plain),
            seg(format!("{:>10}", counts.total), Tone::Total),
            seg("  ", Tone::Plain),
            seg(format!("{:>12}", counts.non_empty), Tone::NonEmpty),
            seg("  ", Tone::Plain),
            seg(format!("{:6.1}%", counts.code_percent()), Tone::Plain),
        ]);
    }

    lines.push(plain(""));
    lines.push(vec![
        seg("Total lines (including empty): ", Tone::Plain),
        seg(snapshot.total_lines().to_string(), Tone::Total),
    ]);
    lines.push(vec![
        seg("Total non-empty lines:        ", Tone::Plain),
        seg(snapshot.non_empty_lines().to_string(), Tone::NonEmpty),
    ]);
    lines.push(plain("=".repeat(rule_width)));
    lines.push(plain(""));
}

/// Join segments into uncoloured text, one line per entry
pub fn to_plain(lines: &[TextLine]) -> String {
    let mut out = String::new();
    for line in lines {
        for segment in line {
            out.push_str(&segment.text);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::LineCounts;
    use chrono::Utc;

    const DAY: i64 = 86_400;
    // 2024-05-01 00:00:00 UTC, a Wednesday
    const MAY_1: i64 = 1_714_521_600;

    fn snap(id: i64, timestamp: i64, files: &[(&str, u64, u64)]) -> Snapshot {
        Snapshot {
            id,
            timestamp,
            files: files
                .iter()
                .map(|(n, t, ne)| (n.to_string(), LineCounts::new(*t, *ne)))
                .collect(),
        }
    }

    fn titles(text: &str) -> Vec<&str> {
        text.lines().filter(|l| l.starts_with("Snapshot ")).collect()
    }

    #[test]
    fn empty_history_message() {
        assert_eq!(to_plain(&render(&[], &Utc)), format!("{EMPTY_HISTORY}\n"));
    }

    #[test]
    fn newest_first_with_chronological_numbers() {
        let history = vec![
            snap(1, MAY_1 + 60, &[("a.py", 1, 1)]),
            snap(2, MAY_1 + DAY + 60, &[("a.py", 2, 1)]),
        ];
        let text = to_plain(&render(&history, &Utc));

        assert_eq!(
            titles(&text),
            vec![
                "Snapshot 2 - 2024-05-02T00:01:00  THURSDAY",
                "Snapshot 1 - 2024-05-01T00:01:00  WEDNESDAY",
            ]
        );
    }

    #[test]
    fn weekday_only_on_last_snapshot_of_the_day() {
        let history = vec![
            snap(1, MAY_1 + 10, &[("a.py", 1, 1)]),
            snap(2, MAY_1 + 20, &[("a.py", 2, 2)]),
        ];
        let text = to_plain(&render(&history, &Utc));

        assert_eq!(
            titles(&text),
            vec![
                "Snapshot 2 - 2024-05-01T00:00:20  WEDNESDAY",
                "Snapshot 1 - 2024-05-01T00:00:10",
            ]
        );
    }

    #[test]
    fn table_rows_and_totals() {
        let history = vec![snap(1, MAY_1, &[("main.c", 10, 8), ("util.h", 4, 4)])];
        let text = to_plain(&render(&history, &Utc));

        assert!(text.contains("File         Total     Non-empty   Code %"));
        assert!(text.contains("main.c          10             8    80.0%"));
        assert!(text.contains("util.h           4             4   100.0%"));
        assert!(text.contains("Total lines (including empty): 14\n"));
        assert!(text.contains("Total non-empty lines:        12\n"));
    }

    #[test]
    fn snapshot_without_files() {
        let text = to_plain(&render(&[snap(1, MAY_1, &[])], &Utc));
        assert!(text.contains("(no files)\n"));
    }

    #[test]
    fn counts_carry_their_tones() {
        let lines = render(&[snap(1, MAY_1, &[("a.py", 3, 2)])], &Utc);
        let row = lines
            .iter()
            .find(|l| l[0].text.starts_with("a.py"))
            .unwrap();

        assert_eq!(row[1].tone, Tone::Total);
        assert_eq!(row[3].tone, Tone::NonEmpty);
        assert_eq!(lines[0][0].tone, Tone::Title);
    }
}
