//! # Resource Locators
//!
//! A locator answers queries against a repository: resolve a selector, test
//! whether something exists, list a directory, and look resources up by tag.
//!
//! [`ResourceLocator`] is the seam between the query engines and their
//! callers. Implementors provide the literal-path and pattern variants of each
//! query; the trait dispatches a [`Selector`] onto them once, in [`get`] and
//! [`contains`], so every locator treats lists of selectors the same way.
//!
//! - [`compiled::CompiledLocator`] serves a compiled index.
//! - [`uri::UriLocator`] routes `scheme:///path` URIs to registered locators.
//!
//! Locators memoize lazily loaded state, so every query takes `&mut self`.
//! Sharing one across threads requires an external lock around it.
//!
//! [`get`]: ResourceLocator::get
//! [`contains`]: ResourceLocator::contains

pub mod compiled;
pub mod uri;

use std::sync::Arc;

use crate::error::Result;
use crate::pattern::GlobPattern;
use crate::resource::Resource;
use crate::selector::{Lookup, Selector};

pub use compiled::CompiledLocator;
pub use uri::{LocatorFactory, Registration, Uri, UriLocator};

/// A queryable repository
pub trait ResourceLocator {
    /// Resolve a single path, failing with `ResourceNotFound` if it is absent
    fn get_path(&mut self, path: &str) -> Result<Arc<Resource>>;

    /// All resources matching a pattern, ascending by path
    fn get_pattern(&mut self, pattern: &GlobPattern) -> Result<Vec<Arc<Resource>>>;

    /// Whether a single path exists
    fn contains_path(&mut self, path: &str) -> Result<bool>;

    /// Whether any resource matches a pattern
    fn contains_pattern(&mut self, pattern: &GlobPattern) -> Result<bool>;

    /// The direct children of a directory, ascending by path
    fn list_directory(&mut self, path: &str) -> Result<Vec<Arc<Resource>>>;

    /// The resources tagged with `tag`, empty for unknown tags
    fn get_by_tag(&mut self, tag: &str) -> Result<Vec<Arc<Resource>>>;

    /// All tag names
    fn get_tags(&mut self) -> Result<Vec<String>>;

    /// Resolve a selector
    ///
    /// A literal yields one resource. Patterns and lists yield a sequence; a
    /// missing literal anywhere in a list fails the whole call while patterns
    /// without matches contribute nothing.
    fn get(&mut self, selector: &Selector) -> Result<Lookup> {
        match selector {
            Selector::Literal(path) => Ok(Lookup::Single(self.get_path(path)?)),
            Selector::Pattern(pattern) => Ok(Lookup::Multiple(self.get_pattern(pattern)?)),
            Selector::List(selectors) => {
                let mut resources = Vec::new();
                for selector in selectors {
                    resources.extend(self.get(selector)?.into_vec());
                }
                Ok(Lookup::Multiple(resources))
            }
        }
    }

    /// Whether a selector resolves to anything
    ///
    /// A list is contained only if every element is.
    fn contains(&mut self, selector: &Selector) -> Result<bool> {
        match selector {
            Selector::Literal(path) => self.contains_path(path),
            Selector::Pattern(pattern) => self.contains_pattern(pattern),
            Selector::List(selectors) => {
                for selector in selectors {
                    if !self.contains(selector)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }
}

impl<L: ResourceLocator + ?Sized> ResourceLocator for Box<L> {
    fn get_path(&mut self, path: &str) -> Result<Arc<Resource>> {
        (**self).get_path(path)
    }

    fn get_pattern(&mut self, pattern: &GlobPattern) -> Result<Vec<Arc<Resource>>> {
        (**self).get_pattern(pattern)
    }

    fn contains_path(&mut self, path: &str) -> Result<bool> {
        (**self).contains_path(path)
    }

    fn contains_pattern(&mut self, pattern: &GlobPattern) -> Result<bool> {
        (**self).contains_pattern(pattern)
    }

    fn list_directory(&mut self, path: &str) -> Result<Vec<Arc<Resource>>> {
        (**self).list_directory(path)
    }

    fn get_by_tag(&mut self, tag: &str) -> Result<Vec<Arc<Resource>>> {
        (**self).get_by_tag(tag)
    }

    fn get_tags(&mut self) -> Result<Vec<String>> {
        (**self).get_tags()
    }
}
