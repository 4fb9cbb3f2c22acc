//! # News Watch
//!
//! Polls a news search API for a keyword every 30 minutes and prints the
//! articles published in the last hour as a table on the console.
//!
//! ## Usage
//!
//! ```sh
//! echo 'NEWS_API_URL=https://newsapi.org/v2/everything' >> .env
//! echo 'NEWS_API_TOKEN=...' >> .env
//! news_watch -s climate
//! ```
//!
//! ## Architecture
//!
//! Each scheduled tick runs one pipeline, start to finish:
//! 1. **Fetching**: One GET against the search endpoint for the lookback window
//! 2. **Formatting**: Reshape articles into display rows sorted by title
//! 3. **Output**: Print the rows as a bordered table to stdout
//!
//! Ticks share nothing but the HTTP client. A failed tick is logged and the
//! next one runs on schedule. Ctrl-C stops the loop.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, info, warn};

mod api;
mod cli;
mod config;
mod formatter;
mod logging;
mod models;
mod outputs;
mod pipeline;
mod scheduler;
mod shutdown;
mod utils;

#[cfg(test)]
mod test_support;

use api::{NewsFetcher, build_client};
use cli::Cli;
use config::Config;
use pipeline::{Watch, scheduled_tick};
use scheduler::Scheduler;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; the variables may already be exported.
    dotenvy::dotenv().ok();

    let args = Cli::parse();
    let config = Config::from_env()?;

    // --- Tracing init ---
    let dispatch = logging::build_dispatch(&config.log_file, logging::default_filter())?;
    logging::install(dispatch)?;
    debug!(?config, "Loaded configuration");
    info!("Searching for news using query: {}", args.search_for);

    let fetcher = NewsFetcher::new(build_client(&config.api_token)?, config.api_url.clone());
    let watch = Watch {
        keyword: args.search_for,
        lookback: config.lookback,
    };

    let (trigger, shutdown) = shutdown::channel();
    let observer = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received; shutting down");
                trigger.cancel();
            }
            Err(e) => warn!(error = %e, "Cannot listen for Ctrl-C; polling until killed"),
        }
    });

    let scheduler = Scheduler::every(config.interval);
    info!(
        started = %Local::now().format("%Y-%m-%d %H:%M:%S"),
        first_run_in_secs = scheduler.period().as_secs(),
        "Waiting for the first scheduled run"
    );
    let runs = scheduler
        .run(shutdown, || scheduled_tick(&fetcher, &watch))
        .await;

    info!(runs, cancelled = observer.is_cancelled(), "News watch stopped");
    Ok(())
}
