//! Storage capabilities
//!
//! The shell never talks to a storage service directly. Commands are handed something that
//! implements [`StorageProbe`] (existence checks) or [`ObjectStore`] (existence checks and listing).
//!
//! Implementations may block on the network. Retries, timeouts and cancellation belong to them;
//! whatever [`ProbeError`] they return is passed on to the user untouched.

use crate::errors::ProbeError;
use std::fmt::{Display, Formatter};

/// Read-only existence checks
pub trait StorageProbe {
    /// Does `bucket` exist?
    fn bucket_exists(&self, bucket: &str) -> Result<bool, ProbeError>;

    /// Does any object key in `bucket` start with `key`?
    ///
    /// For navigation `key` is always a delimiter-terminated prefix.
    fn path_exists(&self, bucket: &str, key: &str) -> Result<bool, ProbeError>;
}

/// A single listing entry, one level below the listed prefix
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Entry {
    /// A common prefix, i.e. a "directory"; the name ends with the delimiter
    Prefix(String),
    /// An object directly under the listed prefix
    Object { name: String, size: u64 },
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::Prefix(name) => name,
            Entry::Object { name, .. } => name,
        }
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Entry::Prefix(name) => write!(f, "{:>12}  {name}", "PRE"),
            Entry::Object { name, size } => write!(f, "{size:>12}  {name}"),
        }
    }
}

/// Existence checks plus listing
pub trait ObjectStore: StorageProbe {
    /// Names of all buckets
    fn list_buckets(&self) -> Result<Vec<String>, ProbeError>;

    /// Entries directly under `prefix` in `bucket`, grouped on the path delimiter
    fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<Entry>, ProbeError>;
}

impl<T: StorageProbe + ?Sized> StorageProbe for &T {
    fn bucket_exists(&self, bucket: &str) -> Result<bool, ProbeError> {
        (**self).bucket_exists(bucket)
    }

    fn path_exists(&self, bucket: &str, key: &str) -> Result<bool, ProbeError> {
        (**self).path_exists(bucket, key)
    }
}

impl<T: ObjectStore + ?Sized> ObjectStore for &T {
    fn list_buckets(&self) -> Result<Vec<String>, ProbeError> {
        (**self).list_buckets()
    }

    fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<Entry>, ProbeError> {
        (**self).list(bucket, prefix)
    }
}

impl<T: StorageProbe + ?Sized> StorageProbe for Box<T> {
    fn bucket_exists(&self, bucket: &str) -> Result<bool, ProbeError> {
        (**self).bucket_exists(bucket)
    }

    fn path_exists(&self, bucket: &str, key: &str) -> Result<bool, ProbeError> {
        (**self).path_exists(bucket, key)
    }
}

impl<T: ObjectStore + ?Sized> ObjectStore for Box<T> {
    fn list_buckets(&self) -> Result<Vec<String>, ProbeError> {
        (**self).list_buckets()
    }

    fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<Entry>, ProbeError> {
        (**self).list(bucket, prefix)
    }
}

/// A scripted store for command tests
///
/// Each answer is fixed at construction and every call is recorded,
/// so tests can check both what a command asked and that it asked nothing at all.
#[cfg(test)]
pub(crate) mod mock {
    use super::{Entry, ObjectStore, StorageProbe};
    use crate::errors::ProbeError;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        BucketExists(String),
        PathExists(String, String),
        ListBuckets,
        List(String, String),
    }

    #[derive(Debug)]
    pub struct MockStore {
        pub bucket_answer: Result<bool, ProbeError>,
        pub path_answer: Result<bool, ProbeError>,
        pub buckets: Vec<String>,
        pub entries: Vec<Entry>,
        pub calls: RefCell<Vec<Call>>,
    }

    impl MockStore {
        /// Answers `false` to every probe; tests assert it was never asked
        pub fn untouchable() -> Self {
            Self::new(Ok(false), Ok(false))
        }

        pub fn new(
            bucket_answer: Result<bool, ProbeError>,
            path_answer: Result<bool, ProbeError>,
        ) -> Self {
            Self {
                bucket_answer,
                path_answer,
                buckets: vec![],
                entries: vec![],
                calls: RefCell::new(vec![]),
            }
        }

        pub fn with_bucket(answer: Result<bool, ProbeError>) -> Self {
            Self::new(answer, Ok(false))
        }

        pub fn with_path(answer: Result<bool, ProbeError>) -> Self {
            Self::new(Ok(true), answer)
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl StorageProbe for MockStore {
        fn bucket_exists(&self, bucket: &str) -> Result<bool, ProbeError> {
            self.calls
                .borrow_mut()
                .push(Call::BucketExists(bucket.to_string()));
            self.bucket_answer.clone()
        }

        fn path_exists(&self, bucket: &str, key: &str) -> Result<bool, ProbeError> {
            self.calls
                .borrow_mut()
                .push(Call::PathExists(bucket.to_string(), key.to_string()));
            self.path_answer.clone()
        }
    }

    impl ObjectStore for MockStore {
        fn list_buckets(&self) -> Result<Vec<String>, ProbeError> {
            self.calls.borrow_mut().push(Call::ListBuckets);
            Ok(self.buckets.clone())
        }

        fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<Entry>, ProbeError> {
            self.calls
                .borrow_mut()
                .push(Call::List(bucket.to_string(), prefix.to_string()));
            Ok(self.entries.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_columns() {
        assert_eq!("         PRE  summer/", Entry::Prefix("summer/".into()).to_string());
        assert_eq!(
            "        2048  beach.jpg",
            Entry::Object {
                name: "beach.jpg".into(),
                size: 2048
            }
            .to_string()
        );
    }
}
