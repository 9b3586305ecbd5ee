use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use linetally::cli::Cli;
use linetally::config::Config;
use linetally::logging;
use linetally::report;
use linetally::snapshot::Snapshot;
use linetally::store::Store;

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::from_cli(cli).context("failed to load configuration")?;

    let mut store = Store::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    if let Some(name) = &config.excluded {
        store = store.excluding(name.as_str());
    }

    let now = chrono::Local::now().timestamp();
    let (result, stored) = linetally::scan_and_record(&config, &mut store, now)
        .context("failed to record snapshot")?;
    report::print_scan_info(&result, stored.as_ref(), config.verbose);

    let history = store.list_all().context("failed to load snapshot history")?;

    if config.show_ui {
        show(history)
    } else {
        report::print_history(&history);
        Ok(())
    }
}

#[cfg(feature = "tui")]
fn show(history: Vec<Snapshot>) -> anyhow::Result<()> {
    linetally::tui::run(history).context("terminal UI failed")
}

#[cfg(not(feature = "tui"))]
fn show(history: Vec<Snapshot>) -> anyhow::Result<()> {
    report::print_history(&history);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
