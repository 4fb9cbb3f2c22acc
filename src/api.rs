//! News search API client.
//!
//! One request per tick: `GET {NEWS_API_URL}?q=<keyword>&from=<timestamp>`
//! with the API token in the `X-Api-Key` header. The client is built once at
//! startup and reused for every tick.
//!
//! # Failure Handling
//!
//! - A non-200 status is logged together with the response body and treated as
//!   "no articles"; it is never returned as an error.
//! - Transport faults (DNS, connection reset, TLS) and bodies that are not the
//!   expected JSON surface as [`FetchError`].
//! - No timeout and no retry are applied.

use crate::models::{RawArticle, SearchQuery, SearchResponse};
use crate::utils::truncate_for_log;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};
use reqwest::{Client, StatusCode};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, instrument};
use url::Url;

/// Header carrying the API token. Header names are case-insensitive on the
/// wire; `http` wants them lowercase.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("response body is not valid search JSON: {0}")]
    Body(#[from] serde_json::Error),
    #[error("API token cannot be sent as a header: {0}")]
    InvalidApiToken(#[from] InvalidHeaderValue),
}

/// Build the shared HTTP client with the API token as a default header.
pub fn build_client(api_token: &str) -> Result<Client, FetchError> {
    let mut token = HeaderValue::from_str(api_token)?;
    token.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(API_KEY_HEADER), token);

    Ok(Client::builder().default_headers(headers).build()?)
}

/// Issues search requests against one endpoint.
#[derive(Debug, Clone)]
pub struct NewsFetcher {
    client: Client,
    api_url: Url,
}

impl NewsFetcher {
    pub fn new(client: Client, api_url: Url) -> Self {
        Self { client, api_url }
    }

    /// Fetch the articles matching `query`.
    ///
    /// # Returns
    ///
    /// The `articles` array of the response; empty when the API answered with
    /// a non-200 status or sent no `articles` member.
    #[instrument(level = "info", skip_all, fields(query = %query.keyword))]
    pub async fn fetch_news(&self, query: &SearchQuery) -> Result<Vec<RawArticle>, FetchError> {
        let from = query.from_param();
        info!("Searching for news from {from} for query: {}", query.keyword);

        let t0 = Instant::now();
        let response = self
            .client
            .get(self.api_url.clone())
            .query(&[("q", query.keyword.as_str()), ("from", from.as_str())])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        let elapsed_ms = t0.elapsed().as_millis();

        if status != StatusCode::OK {
            error!(
                status = status.as_u16(),
                elapsed_ms,
                "Failed to get news: {}",
                truncate_for_log(&body, 500)
            );
            return Ok(Vec::new());
        }

        let articles = serde_json::from_str::<SearchResponse>(&body)?.into_articles();
        debug!(count = articles.len(), elapsed_ms, "Search returned");
        Ok(articles)
    }
}
