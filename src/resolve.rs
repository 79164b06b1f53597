//! Path resolution
//!
//! Turns a user-supplied path, absolute or relative, possibly with `.` and `..` segments,
//! into an absolute [`Location`]. Performs no I/O.
//!
//! # Examples
//!
//! ```
//! use bucketsh::context::Location;
//! use bucketsh::resolve::{resolve, TargetKind};
//!
//! let current = Location::bucket("photos");
//!
//! let target = resolve(&current, "2024/../2025").unwrap();
//! assert_eq!(target.location, Location::prefix("photos", "2025/"));
//! assert_eq!(target.kind, TargetKind::Prefix);
//!
//! let target = resolve(&current, "/archive").unwrap();
//! assert_eq!(target.kind, TargetKind::Bucket);
//!
//! assert!(resolve(&current, "../..").is_err());
//! ```

use crate::constants::{PATH_DELIMITER, PATH_DELIMITER_STR};
use crate::context::Location;
use crate::errors::CommandError;

/// How deep in the namespace a resolved target lies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// The namespace root
    Root,
    /// A bucket, no prefix
    Bucket,
    /// A prefix inside a bucket
    Prefix,
}

impl TargetKind {
    pub fn of(location: &Location) -> Self {
        if location.is_root() {
            TargetKind::Root
        } else if location.key_prefix().is_empty() {
            TargetKind::Bucket
        } else {
            TargetKind::Prefix
        }
    }
}

/// A candidate location, not yet checked against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub location: Location,
    pub kind: TargetKind,
}

impl ResolvedTarget {
    fn new(location: Location) -> Self {
        let kind = TargetKind::of(&location);
        Self { location, kind }
    }

    /// Whether the store has to confirm that the target exists
    pub fn needs_probe(&self) -> bool {
        self.kind != TargetKind::Root
    }
}

/// Resolves `raw` against `current`
///
/// - an empty path is the current location
/// - a path starting with the delimiter is absolute, its first segment is the bucket
/// - otherwise segments are appended to the current bucket and prefix,
///   so at the root the first segment is the bucket
/// - empty and `.` segments are skipped, `..` drops the last segment
///
/// Ascending above the root is an [`CommandError::InvalidPath`]; it is never clamped.
pub fn resolve(current: &Location, raw: &str) -> Result<ResolvedTarget, CommandError> {
    if raw.is_empty() {
        return Ok(ResolvedTarget::new(current.clone()));
    }

    let mut stack: Vec<&str> = match raw.starts_with(PATH_DELIMITER) {
        true => vec![],
        false => current.segments(),
    };

    for segment in raw.split(PATH_DELIMITER) {
        match segment {
            "" | "." => {}
            ".." => {
                if stack.pop().is_none() {
                    return Err(CommandError::InvalidPath(format!(
                        "{raw}: cannot go above the root"
                    )));
                }
            }
            name => stack.push(name),
        }
    }

    let location = match stack.split_first() {
        None => Location::root(),
        Some((bucket, [])) => Location::bucket(*bucket),
        Some((bucket, prefix)) => Location::prefix(*bucket, prefix.join(PATH_DELIMITER_STR)),
    };

    Ok(ResolvedTarget::new(location))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(bucket: &str, prefix: &str) -> Location {
        Location::prefix(bucket, prefix)
    }

    #[test]
    fn empty_is_current() {
        let target = resolve(&Location::root(), "").unwrap();
        assert_eq!(Location::root(), target.location);
        assert_eq!(TargetKind::Root, target.kind);

        let target = resolve(&at("bucket", "a/"), "").unwrap();
        assert_eq!(at("bucket", "a/"), target.location);
        assert_eq!(TargetKind::Prefix, target.kind);
    }

    #[test]
    fn delimiter_is_root() {
        let target = resolve(&at("bucket", "a/b/"), "/").unwrap();
        assert_eq!(Location::root(), target.location);
        assert_eq!(TargetKind::Root, target.kind);
        assert!(!target.needs_probe());
    }

    #[test]
    fn first_segment_is_bucket_at_root() {
        let target = resolve(&Location::root(), "bucket").unwrap();
        assert_eq!(Location::bucket("bucket"), target.location);
        assert_eq!(TargetKind::Bucket, target.kind);

        let target = resolve(&Location::root(), "bucket/folder").unwrap();
        assert_eq!(at("bucket", "folder/"), target.location);
        assert_eq!(TargetKind::Prefix, target.kind);

        let target = resolve(&Location::root(), "bucket/folder/").unwrap();
        assert_eq!(at("bucket", "folder/"), target.location);
    }

    #[test]
    fn relative_appends() {
        let target = resolve(&Location::bucket("bucket"), "a/b").unwrap();
        assert_eq!(at("bucket", "a/b/"), target.location);

        let target = resolve(&at("bucket", "a/"), "b/c/").unwrap();
        assert_eq!(at("bucket", "a/b/c/"), target.location);
    }

    #[test]
    fn absolute_ignores_current() {
        let target = resolve(&at("bucket", "a/"), "/other/x").unwrap();
        assert_eq!(at("other", "x/"), target.location);
    }

    #[test]
    fn dot_and_empty_segments() {
        let target = resolve(&Location::bucket("bucket"), "./a//./b").unwrap();
        assert_eq!(at("bucket", "a/b/"), target.location);

        let target = resolve(&at("bucket", "a/"), ".").unwrap();
        assert_eq!(at("bucket", "a/"), target.location);
        assert!(target.needs_probe());
    }

    #[test]
    fn dot_dot() {
        let target = resolve(&at("bucket", "a/b/"), "..").unwrap();
        assert_eq!(at("bucket", "a/"), target.location);

        let target = resolve(&at("bucket", "a/"), "..").unwrap();
        assert_eq!(Location::bucket("bucket"), target.location);
        assert_eq!(TargetKind::Bucket, target.kind);

        let target = resolve(&Location::bucket("bucket"), "..").unwrap();
        assert_eq!(Location::root(), target.location);
        assert_eq!(TargetKind::Root, target.kind);

        let target = resolve(&at("bucket", "a/"), "../../other").unwrap();
        assert_eq!(Location::bucket("other"), target.location);
    }

    #[test]
    fn dot_dot_back_into_same_bucket() {
        let target = resolve(&Location::root(), "bucket/../bucket").unwrap();
        assert_eq!(Location::bucket("bucket"), target.location);
        assert_eq!(TargetKind::Bucket, target.kind);
        assert!(target.needs_probe());
    }

    #[test]
    fn above_root_is_invalid() {
        let result = resolve(&Location::root(), "..");
        assert!(matches!(result, Err(CommandError::InvalidPath(_))));

        let result = resolve(&at("bucket", "a/"), "../../..");
        assert!(matches!(result, Err(CommandError::InvalidPath(_))));

        // Popping past the root mid-path is not clamped, even if later segments descend again.
        let result = resolve(&Location::root(), "/../bucket");
        assert!(matches!(result, Err(CommandError::InvalidPath(_))));
    }
}
