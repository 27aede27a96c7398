//! Table output.
//!
//! Thin wrapper around `tabled`'s builder: one header record from the column
//! list, one record per row, psql-style borders.

use std::io::Write;

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Writes `rows` under `columns` as a formatted table.
///
/// With no columns selected there is nothing to tabulate, so only the match
/// count is reported.
pub fn print_table(columns: &[String], rows: &[Vec<String>], out: &mut impl Write) -> Result<()> {
    if columns.is_empty() {
        writeln!(out, "{} object(s) matched", rows.len())?;
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(columns.iter().cloned());
    for row in rows {
        builder.push_record(row.iter().cloned());
    }

    let mut table = builder.build();
    table.with(Style::psql());
    writeln!(out, "{table}")?;
    Ok(())
}
