//! Selectors accepted by `get` and `contains`
//!
//! A selector is a literal path, a glob pattern, or an ordered list of
//! selectors. Strings are classified once with [`Selector::parse`]; the
//! locator then dispatches on the variant.

use std::sync::Arc;

use crate::error::Result;
use crate::path;
use crate::pattern::GlobPattern;
use crate::resource::Resource;

/// A literal path, a pattern or a list of selectors
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    Literal(String),
    Pattern(GlobPattern),
    List(Vec<Selector>),
}

impl Selector {
    /// Classify a selector string
    ///
    /// Strings containing `*` become patterns, everything else is a literal
    /// path. Literals are normalized later by the locator.
    pub fn parse(selector: &str) -> Result<Self> {
        if path::is_pattern(selector) {
            Ok(Selector::Pattern(GlobPattern::new(selector)?))
        } else {
            Ok(Selector::Literal(selector.to_string()))
        }
    }

    /// Classify each string of an ordered list
    pub fn parse_all<I, S>(selectors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selectors = selectors
            .into_iter()
            .map(|selector| Selector::parse(selector.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Selector::List(selectors))
    }
}

impl From<GlobPattern> for Selector {
    fn from(pattern: GlobPattern) -> Self {
        Selector::Pattern(pattern)
    }
}

/// The result of `get`: one resource for a literal path, a sequence otherwise
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Single(Arc<Resource>),
    Multiple(Vec<Arc<Resource>>),
}

impl Lookup {
    /// The single resource of a literal lookup
    pub fn single(self) -> Option<Arc<Resource>> {
        match self {
            Lookup::Single(resource) => Some(resource),
            Lookup::Multiple(_) => None,
        }
    }

    /// All resources in order
    pub fn into_vec(self) -> Vec<Arc<Resource>> {
        match self {
            Lookup::Single(resource) => vec![resource],
            Lookup::Multiple(resources) => resources,
        }
    }
}
