//! Query Execution
//!
//! Wires a parsed [`Query`] through a listing backend and the table renderer:
//! list the source bucket under the query's prefix, project every attribute
//! map over the selected columns in order, print the result.

use std::io::Write;

use anyhow::Result;
use itertools::Itertools;
use tracing::debug;

use crate::query::Query;
use crate::render;
use crate::store::ObjectListing;

/// Runs one query to completion, writing the rendered table to `out`.
///
/// Only the wildcard-style filter feeds the listing; `exact_filter` is
/// populated by the grammar but deliberately unread here. Column names the
/// backend does not recognize project to empty cells rather than failing.
pub fn run_query(store: &dyn ObjectListing, query: &Query, out: &mut impl Write) -> Result<()> {
    if !query.exact_filter.is_empty() {
        debug!(key = %query.exact_filter.key, "exact filter parsed but not applied");
    }

    let prefix = query.prefix_filter.value.as_str();
    debug!(source = %query.source, prefix, "listing objects");

    let objects = store.list(&query.source, prefix)?;
    debug!(matched = objects.len(), "listing done");

    let rows = objects
        .iter()
        .map(|attrs| {
            query
                .columns
                .iter()
                .map(|column| attrs.get(column).cloned().unwrap_or_default())
                .collect_vec()
        })
        .collect_vec();

    render::print_table(&query.columns, &rows, out)
}
