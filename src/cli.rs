//! Command-line interface definitions for News Watch.
//!
//! The only argument is the search keyword. Everything else (endpoint, API
//! token, log file) comes from the environment, see [`crate::config`].

use clap::Parser;

/// Command-line arguments for News Watch.
///
/// # Examples
///
/// ```sh
/// news_watch -s climate
/// news_watch --search-for "interest rates"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search for news matching this query
    #[arg(short = 's', long = "search-for", alias = "search_for", value_name = "QUERY")]
    pub search_for: String,
}
