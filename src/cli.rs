use clap::Parser;
use std::path::PathBuf;

/// With no flags: scan the directory holding this executable, store a
/// snapshot if the counts changed, then open the history browser.
#[derive(Parser, Debug, Default)]
#[command(name = "linetally")]
#[command(about = "Track source line counts over time")]
#[command(version)]
pub struct Cli {
    /// Directory to scan (defaults to the executable's directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Database file (defaults to line_history.db inside the scanned directory)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Print the snapshot history as text instead of opening the browser
    #[arg(long, default_value_t = false)]
    pub no_ui: bool,

    /// Log scan and store details to stderr
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}
