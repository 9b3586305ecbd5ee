pub mod graph;
pub mod text;

use chrono::Local;

use crate::scan::ScanResult;
use crate::snapshot::Snapshot;

/// Print the whole history as uncoloured text, newest first
pub fn print_history(history: &[Snapshot]) {
    print!("{}", text::to_plain(&text::render(history, &Local)));
}

/// One-line scan summary plus skipped-file diagnostics, verbose mode only
pub fn print_scan_info(result: &ScanResult, stored: Option<&Snapshot>, verbose: bool) {
    if !verbose {
        return;
    }

    if let Some(duration_ms) = result.duration_ms {
        let duration_sec = duration_ms as f64 / 1000.0;
        eprintln!(
            "scanned {} files in {duration_sec:.2}s: {} lines, {} non-empty",
            result.files.len(),
            result.total_lines(),
            result.non_empty_lines()
        );
    }

    match stored {
        Some(snapshot) => eprintln!("stored snapshot #{}", snapshot.id),
        None => eprintln!("no changes since the last snapshot"),
    }

    if !result.diagnostics.is_empty() {
        eprintln!("Diagnostics:");
        eprintln!("{}", "-".repeat(40));
        for diagnostic in &result.diagnostics {
            eprintln!("  {diagnostic}");
        }
    }
}
