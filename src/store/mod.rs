//! Object-listing backends.
//!
//! The parser hands its [`Query`](crate::query::Query) to an [`ObjectListing`]
//! implementation, which resolves a source bucket plus a name prefix into the
//! attribute maps of every matched object. The trait is the seam that keeps
//! the query front-end independent of where objects actually live.

pub mod memory;

use std::collections::HashMap;

use anyhow::Result;
use serde::Deserialize;

pub use memory::MemoryStore;

/// Attributes carried by every stored object.
///
/// The field set mirrors the metadata a cloud object store reports per
/// object. Everything is stringly-typed on the way out; `size` is the one
/// field kept numeric at rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectAttrs {
    pub name: String,
    pub size: u64,
    pub time_created: String,
    pub time_updated: String,
    pub storage_class: String,
    pub owner: String,
    pub content_type: String,
    pub content_encoding: String,
    pub content_disposition: String,
    pub retention_time: String,
    pub updated: String,
}

/// Ordered projection table: recognized column name → extractor.
///
/// Adding or removing a recognized column is a one-line edit here; nothing
/// else enumerates the attribute set.
pub const ATTRIBUTES: &[(&str, fn(&ObjectAttrs) -> String)] = &[
    ("name", |o| o.name.clone()),
    ("size", |o| o.size.to_string()),
    ("timeCreated", |o| o.time_created.clone()),
    ("timeUpdated", |o| o.time_updated.clone()),
    ("storageClass", |o| o.storage_class.clone()),
    ("owner", |o| o.owner.clone()),
    ("contentType", |o| o.content_type.clone()),
    ("contentEncoding", |o| o.content_encoding.clone()),
    ("contentDisposition", |o| o.content_disposition.clone()),
    ("retentionTime", |o| o.retention_time.clone()),
    ("updated", |o| o.updated.clone()),
];

impl ObjectAttrs {
    /// Projects the object through [`ATTRIBUTES`] into a string map.
    pub fn attribute_map(&self) -> HashMap<String, String> {
        ATTRIBUTES
            .iter()
            .map(|(name, extract)| (name.to_string(), extract(self)))
            .collect()
    }
}

/// A backend that can enumerate objects in a named source.
pub trait ObjectListing {
    /// Lists the attribute maps of every object in `source` whose name starts
    /// with `prefix`, in backend order. An empty prefix matches everything.
    fn list(&self, source: &str, prefix: &str) -> Result<Vec<HashMap<String, String>>>;
}
