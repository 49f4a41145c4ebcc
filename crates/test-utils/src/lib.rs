//! Shared test utilities for the conneg workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Profile and catalog fixtures
//! - Request builders mimicking real clients
//! - Temporary configuration directories
//! - `Link` header assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_link_entry, fixtures};
//! ```

pub mod fixtures;
pub mod paths;
pub mod requests;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use paths::*;
pub use requests::*;

/// Split a `Link` header value into its entries.
///
/// Entries are separated by `", <"`; commas inside an entry's parameters are
/// never followed by `<`.
pub fn link_entries(link: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut start = 0;
    for (i, _) in link.match_indices(", <") {
        entries.push(&link[start..i]);
        start = i + 2;
    }
    if !link.is_empty() {
        entries.push(&link[start..]);
    }
    entries
}

/// Assert that a `Link` header contains an entry for a target with a rel.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_link_entry;
///
/// assert_link_entry!(link, "http://x.com/a?_profile=p&_mediatype=text/html", "self");
/// ```
#[macro_export]
macro_rules! assert_link_entry {
    ($link:expr, $target:expr, $rel:expr) => {{
        let link: &str = &$link;
        let prefix = format!("<{}>; rel=\"{}\"", $target, $rel);
        if !$crate::link_entries(link).iter().any(|e| e.starts_with(&prefix)) {
            panic!(
                "assertion failed: no Link entry starting with `{}`\n  link: `{}`",
                prefix, link
            );
        }
    }};
}
