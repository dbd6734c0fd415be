//! # CLI Layer
//!
//! This module is **one possible UI client** for gomi, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Installs the tracing subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `handle_*()`: Per-command handlers that call the API and print the result

use super::notify::TerminalNotifier;
use super::render::{print_messages, render_config, render_dashboard, render_history, render_stops};
use super::setup::{Cli, Commands};
use chrono::NaiveDate;
use clap::Parser;
use gomi::api::{CmdResult, ConfigAction, GomiApi};
use gomi::catalog::DEFAULT_CENTER;
use gomi::clock::{Clock, SystemClock};
use gomi::error::Result;
use gomi::init::{initialize, GomiContext};
use gomi::map::geojson::GeoJsonMap;
use gomi::map::{self, MapLayer};
use gomi::notify::StartupAlert;
use gomi::store::fs::FileKvStore;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

type AppApi = GomiApi<FileKvStore, GeoJsonMap>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = initialize(cli.home.clone())?;

    match cli.command {
        Some(Commands::Status) | None => handle_status(&mut ctx, cli.no_alert),
        Some(Commands::Collect { ids }) => handle_collect(&mut ctx.api, &ids),
        Some(Commands::Reset { yes }) => handle_reset(&mut ctx.api, yes),
        Some(Commands::Stops) => handle_stops(&ctx.api),
        Some(Commands::History { limit }) => handle_history(&ctx.api, limit),
        Some(Commands::Map { output }) => handle_map(&mut ctx, output),
        Some(Commands::Config { key, value }) => handle_config(&ctx.api, key, value),
    }
}

/// Logs go to stderr so they never mix with command output. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "gomi=debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .try_init();
}

fn today() -> NaiveDate {
    SystemClock.today()
}

fn print_result(result: &CmdResult) {
    print_messages(&result.messages);
    if let Some(dash) = &result.dashboard {
        if !result.messages.is_empty() {
            println!();
        }
        print!("{}", render_dashboard(dash, today()));
    }
}

fn handle_status(ctx: &mut GomiContext, no_alert: bool) -> Result<()> {
    let result = ctx.api.refresh()?;
    print_result(&result);

    if !no_alert {
        let pending = ctx.api.pending_stops();
        StartupAlert::new(ctx.config.alert_delay()).notify(&mut TerminalNotifier, &pending)?;
    }
    Ok(())
}

fn handle_collect(api: &mut AppApi, ids: &[String]) -> Result<()> {
    let result = api.collect(ids)?;
    print_result(&result);
    Ok(())
}

fn handle_reset(api: &mut AppApi, yes: bool) -> Result<()> {
    let result = api.reset(&mut TerminalNotifier, yes)?;
    print_result(&result);
    Ok(())
}

fn handle_stops(api: &AppApi) -> Result<()> {
    print!("{}", render_stops(&api.stops().listed_stops));
    Ok(())
}

fn handle_history(api: &AppApi, limit: Option<usize>) -> Result<()> {
    if let Some(history) = api.history(limit).history {
        print!("{}", render_history(&history, today()));
    }
    Ok(())
}

fn handle_map(ctx: &mut GomiContext, output: Option<PathBuf>) -> Result<()> {
    let path = match output {
        Some(path) => {
            let mut layer = MapLayer::init(GeoJsonMap::new(&path), DEFAULT_CENTER, ctx.config.map_zoom)?;
            layer.redraw(&map::scene(ctx.api.catalog(), ctx.api.state()))?;
            path
        }
        None => {
            ctx.api.redraw_map()?;
            ctx.api.map().surface().path().to_path_buf()
        }
    };
    println!("{}", path.display());
    Ok(())
}

fn handle_config(api: &AppApi, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = api.config(action)?;
    print_messages(&result.messages);
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    Ok(())
}
