//! Folio CLI: run searches against an article export.
//!
//! Loads a JSON export into an in-memory provider, builds the index once and
//! runs a single command:
//!
//! ```text
//! folio --articles export.json search "rural credit" --division d1
//! folio --articles export.json suggest agr
//! folio --articles export.json --json stats
//! folio init-config
//! ```
//!
//! Logging goes to stderr and is controlled by `FOLIO_LOG` (default `warn`).

mod commands;
mod format;
mod loader;
mod parse;

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::Context;
use folio_search::{SearchConfig, SearchService, CONFIG_FILE_NAME};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_error, format_search, format_stats, format_suggestions, format_terms, OutputMode};
use parse::{matches_to_action, CliAction};

fn main() {
    init_tracing();

    let matches = build_cli().get_matches();
    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match run(&matches, mode) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &clap::ArgMatches, mode: OutputMode) -> anyhow::Result<String> {
    let action = matches_to_action(matches).map_err(anyhow::Error::msg)?;

    if let CliAction::InitConfig { path } = &action {
        SearchConfig::write_default_if_missing(path)?;
        return Ok(format!("Config written to {}", path.display()));
    }

    let config = load_config(matches.get_one::<String>("config").map(PathBuf::from))?;
    let articles = matches
        .get_one::<String>("articles")
        .context("--articles <FILE> is required for this command")?;
    let source = Arc::new(loader::load_articles(Path::new(articles))?);

    let service = SearchService::with_config(source, config)?;
    let report = service.initialize_index()?;
    tracing::info!(
        target: "folio::cli",
        documents = report.documents,
        skipped = report.skipped,
        elapsed_micros = report.elapsed_micros,
        "Index ready"
    );

    execute(&service, action, mode)
}

/// Explicit `--config` must exist; otherwise `./folio-search.toml` is used if present.
fn load_config(explicit: Option<PathBuf>) -> anyhow::Result<SearchConfig> {
    match explicit {
        Some(path) => Ok(SearchConfig::from_file(&path)?),
        None => {
            let default_path = Path::new(CONFIG_FILE_NAME);
            if default_path.exists() {
                Ok(SearchConfig::from_file(default_path)?)
            } else {
                Ok(SearchConfig::default())
            }
        }
    }
}

fn execute(service: &SearchService, action: CliAction, mode: OutputMode) -> anyhow::Result<String> {
    let output = match action {
        CliAction::Search(request) => {
            let offset = request.offset.unwrap_or(0).max(0) as usize;
            let result = service.search(&request)?;
            format_search(&result, offset, mode)
        }
        CliAction::Suggest { prefix, limit } => {
            format_suggestions(&service.suggest(&prefix, limit), mode)
        }
        CliAction::Popular { limit } => format_terms(&service.popular_terms(limit), mode),
        CliAction::Stats => format_stats(&service.get_stats(), mode),
        CliAction::InitConfig { .. } => String::new(),
    };
    Ok(output)
}
