//! Console report for a tick's display rows.
//!
//! Column caps are positional over `Author, Title, Description, Link`: Author
//! wraps at 30 columns, Title at 50, Description at the width of the longest
//! link in the batch, and Link is never wrapped so it stays clickable.

use crate::models::DisplayRow;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ColumnConstraint, Table, Width};
use std::io::{self, Write};
use thiserror::Error;
use tracing::{info, instrument};
use unicode_width::UnicodeWidthStr;

const AUTHOR_MAX_WIDTH: u16 = 30;
const TITLE_MAX_WIDTH: u16 = 50;
/// One space either side of every cell; comfy-table counts it in the cap.
const CELL_PADDING: u16 = 2;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("nothing to report: no rows")]
    EmptyReport,
    #[error("failed writing report: {0}")]
    Io(#[from] io::Error),
}

fn capped(content_width: u16) -> ColumnConstraint {
    ColumnConstraint::UpperBoundary(Width::Fixed(content_width.saturating_add(CELL_PADDING)))
}

/// Render rows as a rounded-grid table.
///
/// # Errors
///
/// [`ReportError::EmptyReport`] when `rows` is empty; the Description cap is
/// derived from the longest link, which an empty batch does not have.
pub fn render_report(rows: &[DisplayRow]) -> Result<String, ReportError> {
    let longest_link = rows
        .iter()
        .map(|row| row.link.width())
        .max()
        .ok_or(ReportError::EmptyReport)?;
    let longest_link = u16::try_from(longest_link).unwrap_or(u16::MAX);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(DisplayRow::HEADERS);
    for row in rows {
        table.add_row(row.cells());
    }
    // Link gets no constraint.
    table.set_constraints([
        capped(AUTHOR_MAX_WIDTH),
        capped(TITLE_MAX_WIDTH),
        capped(longest_link),
    ]);
    Ok(table.to_string())
}

/// Render `rows` and write the table, newline-terminated, to `out`.
#[instrument(level = "debug", skip_all, fields(rows = rows.len()))]
pub fn write_report<W: Write>(rows: &[DisplayRow], out: &mut W) -> Result<(), ReportError> {
    let table = render_report(rows)?;
    writeln!(out, "{table}")?;
    out.flush()?;
    info!(rows = rows.len(), "Printed news report");
    Ok(())
}
