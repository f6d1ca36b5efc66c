use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use console::style;
use unpackr_archive::{CommandExtractor, Dispatcher, DryRunExtractor, RunConfig, RunReport};
use unpackr_platform::PathProbe;

use crate::cli::App;
use crate::config::FileConfig;

mod cli;
mod config;
mod logging;
mod ui;

fn main() -> ExitCode {
    let app = App::parse();
    logging::init(app.verbose);

    match run(&app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(app: &App) -> anyhow::Result<()> {
    let file = FileConfig::discover(app.config.as_deref())?;
    let config = config::build(app, file)?;
    tracing::debug!(?config, "resolved run config");

    let report = dispatch(config.clone(), app.dry_run)?;
    ui::print_report(&config, &report, app.dry_run);
    Ok(())
}

fn dispatch(config: RunConfig, dry_run: bool) -> anyhow::Result<RunReport> {
    let what = match &config.target {
        Some(target) => format!("'{}'", target.display()),
        None => format!("directory '{}'", config.source.display()),
    };
    let report = if dry_run {
        Dispatcher::new(config, DryRunExtractor, PathProbe).run()
    } else {
        Dispatcher::new(config, CommandExtractor, PathProbe).run()
    };
    report.with_context(|| format!("cannot process {what}"))
}
