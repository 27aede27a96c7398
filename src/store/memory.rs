//! In-memory [`ObjectListing`] backend.
//!
//! Buckets live in a `BTreeMap` keyed by name; objects keep insertion order
//! within a bucket. A store can be seeded programmatically or loaded from a
//! JSON manifest of the shape `{"bucket": [{"name": ..., "size": ...}, ...]}`.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use super::{ObjectAttrs, ObjectListing};

#[derive(Debug, Default)]
pub struct MemoryStore {
    buckets: BTreeMap<String, Vec<ObjectAttrs>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a store from a JSON manifest file.
    pub fn from_manifest(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open manifest {}", path.display()))?;
        let buckets: BTreeMap<String, Vec<ObjectAttrs>> =
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("failed to parse manifest {}", path.display()))?;
        debug!(buckets = buckets.len(), "loaded manifest");
        Ok(Self { buckets })
    }

    /// Adds one object to a bucket, creating the bucket if needed.
    pub fn insert(&mut self, bucket: &str, attrs: ObjectAttrs) {
        self.buckets.entry(bucket.to_string()).or_default().push(attrs);
    }

    pub fn bucket_names(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }
}

impl ObjectListing for MemoryStore {
    fn list(&self, source: &str, prefix: &str) -> Result<Vec<HashMap<String, String>>> {
        let objects = self
            .buckets
            .get(source)
            .ok_or_else(|| anyhow!("unknown bucket: {source}"))?;

        Ok(objects
            .iter()
            .filter(|attrs| attrs.name.starts_with(prefix))
            .map(ObjectAttrs::attribute_map)
            .collect())
    }
}
