//! Data models for search requests, API payloads and report rows.
//!
//! This module defines the core data structures used throughout the application:
//! - [`SearchQuery`]: The keyword plus lookback window sent on every tick
//! - [`SearchResponse`]: The JSON envelope returned by the news API
//! - [`RawArticle`]: One article record as the API supplied it
//! - [`DisplayRow`]: The reshaped, user-facing projection of an article
//!
//! Nothing here outlives a single tick; every value is rebuilt from scratch on
//! the next scheduled run.

use chrono::{Duration, NaiveDateTime, SubsecRound};
use serde::Deserialize;

/// Wire format of the `from` query parameter.
pub const FROM_PARAM_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A keyword search bounded by a lookback window.
///
/// The window start is computed from the local clock when the tick begins and
/// is truncated to whole seconds, which is all the API accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// The search text sent as `q`.
    pub keyword: String,
    /// Local start of the window sent as `from`.
    pub from: NaiveDateTime,
}

impl SearchQuery {
    /// Build a query whose window starts `lookback` before `now`.
    pub fn looking_back(keyword: impl Into<String>, now: NaiveDateTime, lookback: Duration) -> Self {
        Self {
            keyword: keyword.into(),
            from: (now - lookback).trunc_subsecs(0),
        }
    }

    /// The `from` parameter as it goes on the wire, e.g. `2026-10-16T11:30:45`.
    pub fn from_param(&self) -> String {
        self.from.format(FROM_PARAM_FORMAT).to_string()
    }
}

/// The JSON envelope returned by the search endpoint.
///
/// Only `articles` is read. A payload without it, or with `null`, is an empty
/// result rather than an error.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub articles: Option<Vec<RawArticle>>,
}

impl SearchResponse {
    pub fn into_articles(self) -> Vec<RawArticle> {
        self.articles.unwrap_or_default()
    }
}

/// An article record exactly as the API supplied it.
///
/// Every field is optional at parse time. Whether a record is usable is decided
/// by the formatter, so a single bad record is reported with its position in
/// the batch instead of as an opaque body parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawArticle {
    /// Byline; frequently `null` for wire stories.
    #[serde(default)]
    pub author: Option<String>,
    /// The article headline.
    #[serde(default)]
    pub title: Option<String>,
    /// Short teaser text; may be `null`.
    #[serde(default)]
    pub description: Option<String>,
    /// Canonical link to the article.
    #[serde(default)]
    pub url: Option<String>,
}

/// One row of the console report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub author: String,
    pub title: String,
    pub description: String,
    pub link: String,
}

impl DisplayRow {
    /// Column headers, in display order.
    pub const HEADERS: [&'static str; 4] = ["Author", "Title", "Description", "Link"];

    /// Cell values in the same order as [`DisplayRow::HEADERS`].
    pub fn cells(&self) -> [&str; 4] {
        [&self.author, &self.title, &self.description, &self.link]
    }
}
