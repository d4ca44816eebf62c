use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use unarr::{ExtractResponse, ProgressFn, Unarchiver};

use crate::cli::{App, Commands, CompletionsArg, ExtractArg, ListArg};
use crate::config::Settings;
use crate::ui::{EntryTracker, EntryTrackerBuilder, Tracker, TrackerBuilder};

mod cli;
mod config;
mod ui;

#[tokio::main]
async fn main() -> ExitCode {
    let app = App::parse();
    init_logging(app.verbose);

    match run(app).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v` raises the level from `warn`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(app: App) -> Result<()> {
    if let Commands::Completions(arg) = &app.cmd {
        return completions(arg);
    }

    let settings = Settings::load()?;
    let tools = settings.tools(app.unar.clone(), app.lsar.clone());
    debug!(unar = %tools.unar.display(), lsar = %tools.lsar.display(), "using tools");
    let unarchiver = Unarchiver::new(tools);

    match app.cmd {
        Commands::Extract(arg) => extract(&unarchiver, &settings, arg).await,
        Commands::List(arg) => list(&unarchiver, arg).await,
        Commands::Completions(_) => Ok(()),
    }
}

async fn extract(unarchiver: &Unarchiver, settings: &Settings, arg: ExtractArg) -> Result<()> {
    let tracker: EntryTracker = EntryTrackerBuilder::default()
        .with_prefix("Extracting")
        .with_finish("done")
        .hidden(arg.quiet || arg.json || !io::stderr().is_terminal())
        .build();
    let progress = tracker.clone();
    let on_progress: ProgressFn = Arc::new(move |file: &str| {
        progress.step(file);
    });

    let options = arg.options(settings).on_progress(on_progress);
    let result = unarchiver.extract_response(&arg.archive, options).await;
    let response = match result {
        Ok(response) => {
            tracker.finish();
            response
        }
        Err(err) => {
            tracker.abandon();
            return Err(err.into());
        }
    };

    let mut out = io::stdout().lock();
    if arg.json {
        let json = serde_json::to_string_pretty(&response).context("Failed to serialize report")?;
        writeln!(out, "{json}")?;
        return Ok(());
    }

    match response {
        ExtractResponse::Directory(dir) => writeln!(out, "{}", dir.display())?,
        ExtractResponse::Detailed(report) => {
            if arg.quiet {
                return Ok(());
            }
            if !report.archive_type.is_empty() {
                writeln!(out, "{}", report.archive_type)?;
            }
            for file in &report.files {
                writeln!(out, "  {file}")?;
            }
            writeln!(
                out,
                "Extracted {} file(s) to \"{}\"",
                report.files.len(),
                report.directory
            )?;
        }
    }
    Ok(())
}

async fn list(unarchiver: &Unarchiver, arg: ListArg) -> Result<()> {
    let listing = unarchiver.list(&arg.archive, arg.options()).await?;

    let mut out = io::stdout().lock();
    if arg.json {
        let json = serde_json::to_string_pretty(&listing).context("Failed to serialize listing")?;
        writeln!(out, "{json}")?;
    } else {
        for name in listing.iter() {
            writeln!(out, "{name}")?;
        }
    }
    Ok(())
}

fn completions(arg: &CompletionsArg) -> Result<()> {
    let mut cmd = App::command();
    let name = cmd.get_name().to_string();
    generate(arg.shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
