//! Reads and replaces the `version = "..."` assignment of a manifest.
//!
//! Both operations are pure: they take the manifest text and hand back a
//! value, leaving file I/O to the caller.

use regex::{NoExpand, Regex};
use std::sync::LazyLock;

/// Returned by [`read_version`] when the manifest has no version assignment.
pub const FALLBACK_VERSION: &str = "0.0.0";

static VERSION_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"version\s*=\s*"([^"]+)""#).expect("version pattern is valid")
});

/// Returns the value of the first `version = "..."` assignment, or
/// [`FALLBACK_VERSION`] when there is none.
pub fn read_version(contents: &str) -> String {
    VERSION_ASSIGNMENT
        .captures(contents)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| FALLBACK_VERSION.to_string())
}

/// Replaces the first version assignment with `version = "<version>"`.
///
/// The new value is inserted verbatim. Text without an assignment comes back
/// unchanged; nothing is inserted.
pub fn write_version(contents: &str, version: &str) -> String {
    let replacement = format!(r#"version = "{version}""#);
    VERSION_ASSIGNMENT
        .replacen(contents, 1, NoExpand(&replacement))
        .into_owned()
}

/// Returns true when `contents` holds a version assignment.
pub fn has_version(contents: &str) -> bool {
    VERSION_ASSIGNMENT.is_match(contents)
}
