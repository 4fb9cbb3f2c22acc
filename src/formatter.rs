//! Reshape raw API articles into sorted report rows.

use crate::models::{DisplayRow, RawArticle};
use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, instrument};

/// Shown in the Author column when the API sends no byline.
pub const AUTHOR_PLACEHOLDER: &str = "N/A";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("article #{index} has no `{field}`")]
    MissingField { index: usize, field: &'static str },
}

/// Turn a batch of articles into display rows sorted by title.
///
/// A null or empty author becomes [`AUTHOR_PLACEHOLDER`]; a null description
/// becomes empty text. Title, description and url are otherwise copied
/// verbatim. A record without `title` or `url` rejects the whole batch.
///
/// The sort is stable, so articles sharing a title keep their API order.
#[instrument(level = "debug", skip_all, fields(count = articles.len()))]
pub fn format_news(articles: &[RawArticle]) -> Result<Vec<DisplayRow>, FormatError> {
    let rows = articles
        .iter()
        .enumerate()
        .map(|(index, article)| to_row(index, article))
        .collect::<Result<Vec<_>, _>>()?;

    let rows = rows
        .into_iter()
        .sorted_by(|a, b| a.title.cmp(&b.title))
        .collect::<Vec<_>>();
    debug!(rows = rows.len(), "Formatted articles");
    Ok(rows)
}

fn to_row(index: usize, article: &RawArticle) -> Result<DisplayRow, FormatError> {
    let title = article
        .title
        .clone()
        .ok_or(FormatError::MissingField { index, field: "title" })?;
    let link = article
        .url
        .clone()
        .ok_or(FormatError::MissingField { index, field: "url" })?;
    let author = match article.author.as_deref() {
        Some(author) if !author.is_empty() => author.to_string(),
        _ => AUTHOR_PLACEHOLDER.to_string(),
    };

    Ok(DisplayRow {
        author,
        title,
        description: article.description.clone().unwrap_or_default(),
        link,
    })
}
