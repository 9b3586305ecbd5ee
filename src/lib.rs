pub mod cli;
pub mod config;
pub mod logging;
pub mod report;
pub mod scan;
pub mod snapshot;
pub mod store;
#[cfg(feature = "tui")]
pub mod tui;
pub mod util;

use config::Config;
use scan::ScanResult;
use snapshot::Snapshot;
use store::Store;

/// Scan `config.root` and append the counts to `store` if they changed.
/// Returns the scan plus the snapshot that was stored, if any.
pub fn scan_and_record(
    config: &Config,
    store: &mut Store,
    timestamp: i64,
) -> store::Result<(ScanResult, Option<Snapshot>)> {
    let result = scan::run(config);
    let stored = store.append_if_changed(&result.files, timestamp)?;
    Ok((result, stored))
}
