//! Entry point for the Chouraqui reader.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Either serve the read API or launch the desktop reader on a seeded
//!   reading context.

mod api;
mod app;
mod cache;
mod config;
mod data_source;
mod fetch_client;
mod loader;
mod page;

use crate::app::run_app;
use crate::cache::load_last_position;
use crate::config::{AppConfig, load_config, serialize_config};
use crate::data_source::VerseDataSource;
use crate::fetch_client::ChapterFetchClient;
use crate::loader::load_page_context;
use anyhow::{Context, Result, anyhow};
use chouraqui_core::links::EntryParams;
use std::env;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const USAGE: &str = "Usage: chouraqui-reader <serve | read [book] [chapter] [verse] | config>";

#[derive(Debug, PartialEq)]
enum Command {
    Serve,
    Read(Option<EntryParams>),
    PrintConfig,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let command = parse_args(env::args().skip(1))?;
    let config = load_config(Path::new("conf/config.toml"));
    set_log_level(reload_handle, config.log_level.as_filter_str());

    match command {
        Command::Serve => serve(&config),
        Command::Read(params) => read(config, params),
        Command::PrintConfig => {
            let rendered = serialize_config(&config).context("Failed to render configuration")?;
            print!("{rendered}");
            Ok(())
        }
    }
}

fn serve(config: &AppConfig) -> Result<()> {
    let source = VerseDataSource::open(config.primary_db_path(), config.secondary_db_path());
    info!(
        primary = %config.primary_db_path().display(),
        secondary = %config.secondary_db_path().display(),
        bind = %config.bind_addr,
        "Starting read API"
    );
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    runtime.block_on(api::serve(source, &config.bind_addr))
}

fn read(config: AppConfig, params: Option<EntryParams>) -> Result<()> {
    let params = params
        .or_else(|| {
            let position = load_last_position()?;
            info!(%position, "Resuming from saved position");
            Some(EntryParams::for_position(position))
        })
        .unwrap_or_default();

    let source = Arc::new(VerseDataSource::open(
        config.primary_db_path(),
        config.secondary_db_path(),
    ));
    let context = load_page_context(&source, &params)?
        .ok_or_else(|| anyhow!("The corpus at {} holds no verses", config.primary_db_path().display()))?;
    let client = ChapterFetchClient::new(&config.api_base_url, config.fetch_timeout())?;
    info!(
        position = %context.position,
        api = %config.api_base_url,
        timeout_secs = config.fetch_timeout_secs,
        "Opening reader"
    );
    run_app(config, context, client, source).context("Failed to start the GUI")?;
    Ok(())
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Command> {
    let mut args = args;
    let command = args.next().ok_or_else(|| anyhow!(USAGE))?;
    match command.as_str() {
        "serve" => Ok(Command::Serve),
        "config" => Ok(Command::PrintConfig),
        "read" => {
            let book = args.next();
            let chapter = args.next();
            let verse = args.next();
            if args.next().is_some() {
                return Err(anyhow!(USAGE));
            }
            Ok(Command::Read(book.map(|book| EntryParams {
                group: None,
                book: Some(book),
                chapter,
                verse,
            })))
        }
        other => Err(anyhow!("Unknown command {other:?}\n{USAGE}")),
    }
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> impl Iterator<Item = String> {
        raw.iter().map(|arg| arg.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn read_without_position_resumes() {
        assert_eq!(parse_args(args(&["read"])).unwrap(), Command::Read(None));
    }

    #[test]
    fn read_takes_a_partial_position() {
        let Command::Read(Some(params)) = parse_args(args(&["read", "10", "2"])).unwrap() else {
            panic!("expected read params");
        };
        assert_eq!(params.book.as_deref(), Some("10"));
        assert_eq!(params.chapter.as_deref(), Some("2"));
        assert_eq!(params.verse, None);
        assert_eq!(params.group, None);
    }

    #[test]
    fn missing_or_unknown_command_is_a_usage_error() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["listen"])).is_err());
        assert!(parse_args(args(&["read", "1", "1", "1", "extra"])).is_err());
        assert_eq!(parse_args(args(&["serve"])).unwrap(), Command::Serve);
    }
}
