//! Session context
//!
//! Holds the current position in the bucket namespace.
//!
//! The store has no directories. A [`Location`] is a bucket plus a key prefix that ends
//! with [`PATH_DELIMITER`], which is enough to present buckets and prefixes as folders.

use crate::constants::{PATH_DELIMITER, PATH_DELIMITER_STR};
use std::fmt::{Display, Formatter};
use tracing::debug;

/// An absolute position in the virtual namespace
///
/// - an empty `bucket` is the namespace root, and then `prefix` is empty too
/// - a non-empty `prefix` always ends with [`PATH_DELIMITER`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Location {
    bucket: String,
    prefix: String,
}

impl Location {
    /// The namespace root, no bucket selected
    pub fn root() -> Self {
        Self::default()
    }

    /// The root of `bucket`
    ///
    /// An empty `bucket` yields the namespace root.
    pub fn bucket(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: String::new(),
        }
    }

    /// A prefix inside `bucket`
    ///
    /// The prefix is terminated with the delimiter if it isn't already.
    /// An empty prefix collapses to [`Location::bucket`].
    pub fn prefix(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        let bucket = bucket.into();
        let mut prefix = prefix.into();

        if bucket.is_empty() {
            return Self::root();
        }
        if !prefix.is_empty() && !prefix.ends_with(PATH_DELIMITER) {
            prefix.push(PATH_DELIMITER);
        }

        Self { bucket, prefix }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket
    }

    pub fn key_prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_root(&self) -> bool {
        self.bucket.is_empty()
    }

    /// Bucket followed by the prefix components, without empty segments
    pub fn segments(&self) -> Vec<&str> {
        if self.is_root() {
            return vec![];
        }

        std::iter::once(self.bucket.as_str())
            .chain(self.prefix.split(PATH_DELIMITER).filter(|s| !s.is_empty()))
            .collect()
    }
}

impl Display for Location {
    /// Renders the location as an absolute path: `/`, `/bucket/`, `/bucket/a/b/`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            return write!(f, "{PATH_DELIMITER_STR}");
        }

        write!(
            f,
            "{PATH_DELIMITER_STR}{}{PATH_DELIMITER_STR}{}",
            self.bucket, self.prefix
        )
    }
}

/// Mutable session state
///
/// The one source of truth for where the session is.
/// Only a successful command changes it, by committing a whole new [`Location`].
#[derive(Debug, Default)]
pub struct Context {
    current: Location,
}

impl Context {
    /// A new session at the namespace root
    pub fn new() -> Self {
        Self::default()
    }

    /// A new session starting at `location`
    pub fn at(location: Location) -> Self {
        Self { current: location }
    }

    pub fn current(&self) -> &Location {
        &self.current
    }

    /// Replaces the current location
    pub fn commit(&mut self, location: Location) {
        debug!(from = %self.current, to = %location, "changing location");
        self.current = location;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_default() {
        let con = Context::new();
        assert!(con.current().is_root());
        assert_eq!(con.current(), &Location::root());
        assert_eq!("/", con.current().to_string());
    }

    #[test]
    fn prefix_is_terminated() {
        let loc = Location::prefix("bucket", "a/b");
        assert_eq!("a/b/", loc.key_prefix());
        assert_eq!("/bucket/a/b/", loc.to_string());

        let loc = Location::prefix("bucket", "a/b/");
        assert_eq!("a/b/", loc.key_prefix());
    }

    #[test]
    fn empty_prefix_is_bucket_level() {
        assert_eq!(Location::bucket("bucket"), Location::prefix("bucket", ""));
        assert_eq!("/bucket/", Location::bucket("bucket").to_string());
    }

    #[test]
    fn no_prefix_without_bucket() {
        let loc = Location::prefix("", "orphan/");
        assert!(loc.is_root());
        assert_eq!("", loc.key_prefix());
    }

    #[test]
    fn segments() {
        assert!(Location::root().segments().is_empty());
        assert_eq!(vec!["bucket"], Location::bucket("bucket").segments());
        assert_eq!(
            vec!["bucket", "a", "b"],
            Location::prefix("bucket", "a/b/").segments()
        );
    }

    #[test]
    fn commit_replaces_location() {
        let mut con = Context::new();
        con.commit(Location::prefix("bucket", "folder/"));
        assert_eq!(&Location::prefix("bucket", "folder/"), con.current());

        con.commit(Location::bucket("other"));
        assert_eq!("other", con.current().bucket_name());
        assert_eq!("", con.current().key_prefix());
    }
}
