pub mod counter;

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::snapshot::FileCounts;

pub struct ScanResult {
    pub files: FileCounts,
    pub diagnostics: Vec<String>,
    pub duration_ms: Option<u128>,
}

impl ScanResult {
    pub fn empty() -> Self {
        ScanResult {
            files: FileCounts::new(),
            diagnostics: Vec::new(),
            duration_ms: None,
        }
    }

    pub fn total_lines(&self) -> u64 {
        self.files.values().map(|c| c.total).sum()
    }

    pub fn non_empty_lines(&self) -> u64 {
        self.files.values().map(|c| c.non_empty).sum()
    }
}

/// Count lines of every allow-listed file under `config.root`.
/// Files that cannot be read are skipped and noted in `diagnostics`.
pub fn run(config: &Config) -> ScanResult {
    let start = Instant::now();
    let mut result = ScanResult::empty();
    let root = config.root.as_path();

    let max_depth = if config.recursive { usize::MAX } else { 1 };

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden_dir(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                result.diagnostics.push(format!("skipped: {e}"));
                continue;
            }
        };

        if !entry.file_type().is_file() || !config.accepts_extension(entry.path()) {
            continue;
        }

        let Some(name) = relative_name(root, entry.path()) else {
            continue;
        };

        if config.excluded.as_deref() == Some(name.as_str()) {
            continue;
        }

        match counter::count_file(entry.path()) {
            Ok(counts) => {
                result.files.insert(name, counts);
            }
            Err(e) => {
                debug!(file = %name, error = %e, "skipping unreadable file");
                result.diagnostics.push(format!("skipped {name}: {e}"));
            }
        }
    }

    let duration_ms = start.elapsed().as_millis();
    result.duration_ms = Some(duration_ms);

    info!(
        root = %root.display(),
        files = result.files.len(),
        total = result.total_lines(),
        non_empty = result.non_empty_lines(),
        duration_ms,
        "scan complete"
    );

    result
}

// the walk root itself is never filtered, only directories below it
fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

/// Path of `path` below `root`, `/`-separated on every platform
fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
