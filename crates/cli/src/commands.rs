//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("folio")
        .about("Inspect an article export with the Folio search engine")
        .subcommand_required(true)
        .arg(
            Arg::new("articles")
                .long("articles")
                .short('a')
                .help("JSON file holding the article export")
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Search config file (default: ./folio-search.toml if present)")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(build_search())
        .subcommand(build_suggest())
        .subcommand(build_popular())
        .subcommand(build_stats())
        .subcommand(build_init_config())
}

// =========================================================================
// Search
// =========================================================================

fn build_search() -> Command {
    Command::new("search")
        .about("Ranked full-text search")
        .arg(Arg::new("query").required(true).help("Search query"))
        .arg(
            Arg::new("limit")
                .long("limit")
                .allow_negative_numbers(true)
                .help("Page size (default from config)"),
        )
        .arg(
            Arg::new("offset")
                .long("offset")
                .allow_negative_numbers(true)
                .help("Results to skip"),
        )
        .arg(
            Arg::new("division")
                .long("division")
                .action(ArgAction::Append)
                .help("Only articles from this division id (repeatable)"),
        )
        .arg(
            Arg::new("author")
                .long("author")
                .action(ArgAction::Append)
                .help("Only articles credited to this author id (repeatable)"),
        )
        .arg(
            Arg::new("tag")
                .long("tag")
                .action(ArgAction::Append)
                .help("Only articles carrying this tag (repeatable)"),
        )
        .arg(
            Arg::new("since")
                .long("since")
                .help("Published at or after this Unix time (seconds)"),
        )
        .arg(
            Arg::new("until")
                .long("until")
                .help("Published at or before this Unix time (seconds)"),
        )
}

// =========================================================================
// Suggestions
// =========================================================================

fn build_suggest() -> Command {
    Command::new("suggest")
        .about("Autocomplete a prefix")
        .arg(Arg::new("prefix").required(true).help("Typed prefix"))
        .arg(Arg::new("limit").long("limit").help("Maximum suggestions"))
}

fn build_popular() -> Command {
    Command::new("popular")
        .about("Most frequent indexed terms")
        .arg(Arg::new("limit").long("limit").help("Number of terms (default: 10)"))
}

// =========================================================================
// Stats / setup
// =========================================================================

fn build_stats() -> Command {
    Command::new("stats").about("Index statistics")
}

fn build_init_config() -> Command {
    Command::new("init-config")
        .about("Write a default folio-search.toml")
        .arg(
            Arg::new("path")
                .help("Target path (default: ./folio-search.toml)"),
        )
}
