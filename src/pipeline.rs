//! One tick of the news watch: fetch, format, print.
//!
//! [`run_tick`] reports every fault to its caller. [`scheduled_tick`] is the
//! scheduler-facing wrapper: whatever goes wrong in a tick is logged and the
//! loop carries on with the next one.

use crate::api::{FetchError, NewsFetcher};
use crate::formatter::{FormatError, format_news};
use crate::models::SearchQuery;
use crate::outputs::console::{ReportError, write_report};
use crate::utils::log_timestamp;
use chrono::{Duration, Local, NaiveDateTime};
use std::io::Write;
use thiserror::Error;
use tracing::{error, info, instrument};

#[derive(Debug, Error)]
pub enum TickError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The search came back empty or failed with a non-200 status.
    NoNews,
    /// A table with this many rows was written.
    Reported { rows: usize },
}

/// What every tick searches for.
#[derive(Debug, Clone)]
pub struct Watch {
    pub keyword: String,
    pub lookback: Duration,
}

/// Run one fetch → format → print cycle as of `now`.
///
/// Nothing is written to `out` unless the whole batch formats and renders.
#[instrument(level = "info", skip_all, fields(query = %watch.keyword))]
pub async fn run_tick<W: Write>(
    fetcher: &NewsFetcher,
    watch: &Watch,
    now: NaiveDateTime,
    out: &mut W,
) -> Result<TickOutcome, TickError> {
    let query = SearchQuery::looking_back(watch.keyword.as_str(), now, watch.lookback);
    let articles = fetcher.fetch_news(&query).await?;
    if articles.is_empty() {
        error!(
            "No news found for query: {} at {}",
            query.keyword,
            log_timestamp(now)
        );
        return Ok(TickOutcome::NoNews);
    }

    let rows = format_news(&articles)?;
    write_report(&rows, out)?;
    Ok(TickOutcome::Reported { rows: rows.len() })
}

/// Run a tick against the local clock and standard output, logging any fault.
pub async fn scheduled_tick(fetcher: &NewsFetcher, watch: &Watch) {
    let now = Local::now().naive_local();
    let mut stdout = std::io::stdout();
    match run_tick(fetcher, watch, now, &mut stdout).await {
        Ok(TickOutcome::Reported { rows }) => info!(rows, "Tick complete"),
        Ok(TickOutcome::NoNews) => {}
        Err(e) => error!(error = %e, "Tick failed; waiting for the next scheduled run"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::build_client;
    use crate::formatter::AUTHOR_PLACEHOLDER;
    use crate::logging::build_dispatch;
    use crate::test_support::{TEST_TOKEN, spawn_news_api};
    use chrono::NaiveDate;
    use tracing::instrument::WithSubscriber;
    use tracing_subscriber::EnvFilter;
    use url::Url;

    fn watch(keyword: &str) -> Watch {
        Watch {
            keyword: keyword.to_string(),
            lookback: Duration::hours(1),
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn fetcher(base: &str, path: &str) -> NewsFetcher {
        let url = Url::parse(&format!("{base}{path}")).unwrap();
        NewsFetcher::new(build_client(TEST_TOKEN).unwrap(), url)
    }

    async fn tick(path: &str) -> (Result<TickOutcome, TickError>, String) {
        let server = spawn_news_api().await;
        let mut out = Vec::new();
        let result = run_tick(&fetcher(&server.base_url, path), &watch("climate"), noon(), &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    /// Like [`tick`], but returns what the tick wrote to the log file.
    async fn logged_tick(path: &str) -> (Result<TickOutcome, TickError>, String) {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("app.log");
        let dispatch = build_dispatch(&log_file, EnvFilter::new("info")).unwrap();

        let server = spawn_news_api().await;
        let mut out = Vec::new();
        let result = run_tick(&fetcher(&server.base_url, path), &watch("climate"), noon(), &mut out)
            .with_subscriber(dispatch)
            .await;
        (result, std::fs::read_to_string(&log_file).unwrap())
    }

    fn line_with<'a>(log: &'a str, needle: &str) -> &'a str {
        log.lines()
            .find(|line| line.contains(needle))
            .unwrap_or_else(|| panic!("no log line containing {needle:?} in:\n{log}"))
    }

    #[tokio::test]
    async fn test_two_articles_are_printed_sorted() {
        let (result, printed) = tick("/two").await;

        assert_eq!(result.unwrap(), TickOutcome::Reported { rows: 2 });
        let apple = printed.find("Apple").expect("Apple row");
        let zebra = printed.find("Zebra").expect("Zebra row");
        assert!(apple < zebra);
    }

    #[tokio::test]
    async fn test_null_author_shows_placeholder() {
        let (_, printed) = tick("/two").await;
        let apple_line = printed
            .lines()
            .find(|line| line.contains("Apple"))
            .expect("Apple row");
        assert!(apple_line.contains(AUTHOR_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_server_error_prints_nothing() {
        let (result, printed) = tick("/fail").await;
        assert_eq!(result.unwrap(), TickOutcome::NoNews);
        assert!(printed.is_empty());
    }

    #[tokio::test]
    async fn test_empty_result_prints_nothing() {
        let (result, printed) = tick("/empty").await;
        assert_eq!(result.unwrap(), TickOutcome::NoNews);
        assert!(printed.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_record_fails_tick_without_output() {
        let (result, printed) = tick("/malformed").await;
        assert!(matches!(
            result,
            Err(TickError::Format(FormatError::MissingField { index: 1, field: "title" }))
        ));
        assert!(printed.is_empty());
    }

    #[tokio::test]
    async fn test_bad_body_fails_tick() {
        let (result, printed) = tick("/garbage").await;
        assert!(matches!(result, Err(TickError::Fetch(FetchError::Body(_)))));
        assert!(printed.is_empty());
    }

    #[tokio::test]
    async fn test_ticks_are_independent() {
        let server = spawn_news_api().await;
        let fetcher = fetcher(&server.base_url, "/two");
        let mut first = Vec::new();
        let mut second = Vec::new();

        run_tick(&fetcher, &watch("climate"), noon(), &mut first).await.unwrap();
        run_tick(&fetcher, &watch("climate"), noon(), &mut second).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_server_error_logs_status_body_and_no_news() {
        let (result, log) = logged_tick("/fail").await;
        assert_eq!(result.unwrap(), TickOutcome::NoNews);

        let failure = line_with(&log, "Failed to get news: upstream exploded");
        assert!(failure.contains("ERROR"));
        assert!(failure.contains("status=500"));

        let no_news = line_with(&log, "No news found for query: climate at 2026-10-16 12:00:00.000000");
        assert!(no_news.contains("ERROR"));
    }

    #[tokio::test]
    async fn test_empty_result_logs_no_news_at_tick_time() {
        let (result, log) = logged_tick("/empty").await;
        assert_eq!(result.unwrap(), TickOutcome::NoNews);

        let no_news = line_with(&log, "No news found for query: climate at 2026-10-16 12:00:00.000000");
        assert!(no_news.contains("ERROR"));
        assert!(!log.contains("Failed to get news"));
    }

    #[tokio::test]
    async fn test_search_is_logged_with_window_start() {
        let (_, log) = logged_tick("/two").await;
        let search = line_with(&log, "Searching for news from 2026-10-16T11:00:00 for query: climate");
        assert!(search.contains("INFO"));
        assert!(!log.contains("No news found"));
    }
}
