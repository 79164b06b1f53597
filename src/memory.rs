//! In-memory object store
//!
//! A flat bucket → key → size map. The binary uses it as its storage collaborator,
//! loaded from a JSON manifest:
//!
//! ```json
//! {
//!   "buckets": {
//!     "photos": { "2024/beach.jpg": 2048, "2024/city.jpg": 4096, "index.html": 512 },
//!     "empty": {}
//!   }
//! }
//! ```

use crate::constants::PATH_DELIMITER;
use crate::errors::{ProbeError, ProbeErrorKind, StoreError};
use crate::storage::{Entry, ObjectStore, StorageProbe};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::ops::Bound;
use std::path::Path;
use tracing::{debug, info};

type Bucket = BTreeMap<String, u64>;

/// On-disk form of a [`MemoryStore`]
#[derive(Debug, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub buckets: BTreeMap<String, Bucket>,
}

/// Objects kept in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    buckets: BTreeMap<String, Bucket>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a store from a JSON manifest file
    pub fn from_manifest(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let store = Self::from_json(&text)?;
        info!(
            path = %path.display(),
            buckets = store.buckets.len(),
            "loaded manifest"
        );

        Ok(store)
    }

    /// Parses a manifest from a JSON string
    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        let manifest: Manifest = serde_json::from_str(text)?;

        for name in manifest.buckets.keys() {
            if !is_valid_bucket_name(name) {
                return Err(StoreError::InvalidBucket(name.clone()));
            }
        }

        Ok(Self {
            buckets: manifest.buckets,
        })
    }

    /// Creates `bucket` if it doesn't exist yet
    pub fn insert_bucket(&mut self, bucket: impl Into<String>) -> &mut Self {
        self.buckets.entry(bucket.into()).or_default();
        self
    }

    /// Stores an object, creating its bucket if needed
    pub fn insert_object(
        &mut self,
        bucket: impl Into<String>,
        key: impl Into<String>,
        size: u64,
    ) -> &mut Self {
        self.buckets
            .entry(bucket.into())
            .or_default()
            .insert(key.into(), size);
        self
    }

    fn bucket(&self, bucket: &str) -> Result<&Bucket, ProbeError> {
        self.buckets.get(bucket).ok_or_else(|| {
            ProbeError::new(
                ProbeErrorKind::Service,
                format!("NoSuchBucket: {bucket}"),
            )
        })
    }
}

fn is_valid_bucket_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(PATH_DELIMITER)
}

impl StorageProbe for MemoryStore {
    fn bucket_exists(&self, bucket: &str) -> Result<bool, ProbeError> {
        Ok(self.buckets.contains_key(bucket))
    }

    fn path_exists(&self, bucket: &str, key: &str) -> Result<bool, ProbeError> {
        let exists = self.buckets.get(bucket).is_some_and(|objects| {
            objects
                .range::<str, _>((Bound::Included(key), Bound::Unbounded))
                .next()
                .is_some_and(|(first, _)| first.starts_with(key))
        });
        debug!(bucket, key, exists, "path probe");

        Ok(exists)
    }
}

impl ObjectStore for MemoryStore {
    fn list_buckets(&self) -> Result<Vec<String>, ProbeError> {
        Ok(self.buckets.keys().cloned().collect())
    }

    fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<Entry>, ProbeError> {
        let objects = self.bucket(bucket)?;

        let mut prefixes = BTreeSet::new();
        let mut entries = vec![];

        for (key, &size) in objects.range::<str, _>((Bound::Included(prefix), Bound::Unbounded)) {
            let Some(rest) = key.strip_prefix(prefix) else {
                break;
            };
            // A "folder marker" object named exactly like the prefix
            if rest.is_empty() {
                continue;
            }
            match rest.find(PATH_DELIMITER) {
                Some(end) => {
                    prefixes.insert(rest[..=end].to_string());
                }
                None => entries.push(Entry::Object {
                    name: rest.to_string(),
                    size,
                }),
            }
        }

        Ok(prefixes
            .into_iter()
            .map(Entry::Prefix)
            .chain(entries)
            .collect())
    }
}
