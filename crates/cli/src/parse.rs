//! ArgMatches → CliAction conversion.
//!
//! Numeric options are parsed here; range checks (limit bounds, negative
//! offsets) are left to the search service so the CLI reports the same
//! validation errors the API layer would.

use std::path::PathBuf;

use clap::ArgMatches;
use folio_core::Timestamp;
use folio_search::{DateRange, QueryRequest, CONFIG_FILE_NAME};

/// The result of parsing the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    /// Ranked search
    Search(QueryRequest),
    /// Prefix completion
    Suggest { prefix: String, limit: Option<usize> },
    /// Top terms
    Popular { limit: Option<usize> },
    /// Index statistics
    Stats,
    /// Write a default config file
    InitConfig { path: PathBuf },
}

/// Translate parsed arguments into an action.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (name, m) = matches
        .subcommand()
        .ok_or_else(|| "No command given".to_string())?;

    match name {
        "search" => parse_search(m).map(CliAction::Search),
        "suggest" => Ok(CliAction::Suggest {
            prefix: m.get_one::<String>("prefix").cloned().unwrap_or_default(),
            limit: parse_opt::<usize>(m, "limit")?,
        }),
        "popular" => Ok(CliAction::Popular {
            limit: parse_opt::<usize>(m, "limit")?,
        }),
        "stats" => Ok(CliAction::Stats),
        "init-config" => Ok(CliAction::InitConfig {
            path: m
                .get_one::<String>("path")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
        }),
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn parse_search(m: &ArgMatches) -> Result<QueryRequest, String> {
    let query = m.get_one::<String>("query").cloned().unwrap_or_default();
    let mut request = QueryRequest::new(query);
    request.limit = parse_opt::<i64>(m, "limit")?;
    request.offset = parse_opt::<i64>(m, "offset")?;

    request.filters.divisions = many(m, "division").map(Into::into).collect();
    request.filters.authors = many(m, "author").map(Into::into).collect();
    request.filters.tags = many(m, "tag").collect();

    let start = parse_opt::<u64>(m, "since")?.map(Timestamp::from_secs);
    let end = parse_opt::<u64>(m, "until")?.map(Timestamp::from_secs);
    if start.is_some() || end.is_some() {
        request.filters.date_range = Some(DateRange { start, end });
    }
    Ok(request)
}

fn many(m: &ArgMatches, name: &str) -> impl Iterator<Item = String> {
    m.get_many::<String>(name)
        .map(|values| values.cloned().collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter()
}

fn parse_opt<T>(m: &ArgMatches, name: &str) -> Result<Option<T>, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    m.get_one::<String>(name)
        .map(|s| {
            s.parse::<T>()
                .map_err(|e| format!("Invalid --{} '{}': {}", name, s, e))
        })
        .transpose()
}
