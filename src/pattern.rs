//! Glob selectors over repository paths
//!
//! A [`GlobPattern`] pairs the compiled glob with its static prefix, the
//! literal text before the first wildcard. Candidates that do not start with
//! the prefix are rejected without running the matcher.
//!
//! `*` never crosses a `/`, so `/dir/*` selects exactly the direct children of
//! `/dir`. `**` as a whole segment matches any number of segments.

use crate::error::Result;
use glob::{MatchOptions, Pattern};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A compiled glob selector
#[derive(Debug, Clone, PartialEq)]
pub struct GlobPattern {
    glob: String,
    static_prefix: String,
    pattern: Pattern,
}

impl GlobPattern {
    /// Compile a glob selector
    pub fn new(glob: &str) -> Result<Self> {
        let pattern = Pattern::new(glob)?;
        let prefix_len = glob.find(['*', '?', '[']).unwrap_or(glob.len());

        Ok(Self {
            glob: glob.to_string(),
            static_prefix: glob[..prefix_len].to_string(),
            pattern,
        })
    }

    /// The pattern matching the direct children of a normalized directory
    ///
    /// The directory is matched literally, so `[`, `]`, `?` and `*` in its
    /// name are not wildcards.
    pub fn children_of(dir: &str) -> Result<Self> {
        let dir = dir.trim_end_matches('/');
        let glob = format!("{}/*", Pattern::escape(dir));

        Ok(Self {
            pattern: Pattern::new(&glob)?,
            glob,
            static_prefix: format!("{}/", dir),
        })
    }

    /// The selector this pattern was compiled from
    pub fn as_str(&self) -> &str {
        &self.glob
    }

    /// The literal text preceding the first wildcard
    pub fn static_prefix(&self) -> &str {
        &self.static_prefix
    }

    /// Test a repository path, rejecting on the static prefix first
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.static_prefix) && self.pattern.matches_with(path, MATCH_OPTIONS)
    }
}
