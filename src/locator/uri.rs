//! # URI Locator
//!
//! Routes `scheme:///path` URIs to the locator registered for `scheme`.
//!
//! A scheme is registered either with a ready locator or with a factory that
//! builds one on first use. Resolving a factory is an explicit state
//! transition: on success the registration is replaced by the locator it
//! produced; on failure it stays a factory and the next resolution calls it
//! again.
//!
//! Tag queries are not scoped to a scheme. They are sent to every registered
//! locator in registration order.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::error::{Error, Result};
use crate::locator::ResourceLocator;
use crate::resource::Resource;
use crate::selector::{Lookup, Selector};

/// Builds a locator on first use
pub type LocatorFactory = Box<dyn FnMut() -> Result<Box<dyn ResourceLocator>>>;

/// What is stored for a scheme
pub enum Registration {
    Instance(Box<dyn ResourceLocator>),
    Factory(LocatorFactory),
}

impl Registration {
    pub fn instance(locator: impl ResourceLocator + 'static) -> Self {
        Registration::Instance(Box::new(locator))
    }

    pub fn factory<F, L>(mut factory: F) -> Self
    where
        F: FnMut() -> Result<L> + 'static,
        L: ResourceLocator + 'static,
    {
        Registration::Factory(Box::new(move || {
            factory().map(|locator| Box::new(locator) as Box<dyn ResourceLocator>)
        }))
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Registration::Instance(_) => f.write_str("Instance"),
            Registration::Factory(_) => f.write_str("Factory"),
        }
    }
}

/// A parsed `scheme:///path` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri {
    pub scheme: String,
    pub path: String,
}

impl Uri {
    /// Split a URI into its scheme and absolute path
    ///
    /// The authority must be empty, so `scheme:///a/b` is `/a/b` while
    /// `scheme://a/b` is rejected.
    pub fn parse(uri: &str) -> Result<Self> {
        let invalid = |message: &str| Error::InvalidUri {
            uri: uri.to_string(),
            message: message.to_string(),
        };

        let (scheme, path) = uri
            .split_once("://")
            .ok_or_else(|| invalid("expected \"scheme://\""))?;

        if !is_valid_scheme(scheme) {
            return Err(invalid("the scheme must consist of letters only"));
        }
        if !path.starts_with('/') {
            return Err(invalid("the path must be absolute"));
        }

        Ok(Self {
            scheme: scheme.to_string(),
            path: path.to_string(),
        })
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.path)
    }
}

fn is_valid_scheme(scheme: &str) -> bool {
    !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphabetic())
}

/// Dispatches URIs to per-scheme locators
#[derive(Debug, Default)]
pub struct UriLocator {
    registrations: Vec<(String, Registration)>,
}

impl UriLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a locator or factory for `scheme`
    ///
    /// Re-registering a scheme replaces its entry in place, keeping its
    /// position among the registered schemes.
    pub fn register(&mut self, scheme: &str, registration: Registration) -> Result<()> {
        if !is_valid_scheme(scheme) {
            return Err(Error::InvalidArgument {
                message: format!(
                    "The scheme \"{}\" should consist of letters only",
                    scheme
                ),
            });
        }

        match self.position(scheme) {
            Some(index) => self.registrations[index].1 = registration,
            None => self.registrations.push((scheme.to_string(), registration)),
        }
        Ok(())
    }

    /// Remove the registration of `scheme`, if any
    pub fn unregister(&mut self, scheme: &str) {
        self.registrations.retain(|(registered, _)| registered != scheme);
    }

    /// Registered schemes in registration order
    pub fn registered_schemes(&self) -> Vec<String> {
        self.registrations
            .iter()
            .map(|(scheme, _)| scheme.clone())
            .collect()
    }

    /// The locator registered for `scheme`, building it if needed
    pub fn resolve(&mut self, scheme: &str) -> Result<&mut dyn ResourceLocator> {
        let index = self
            .position(scheme)
            .ok_or_else(|| Error::SchemeNotSupported {
                scheme: scheme.to_string(),
            })?;
        self.resolve_at(index)
    }

    /// Resolve the selector in the path of `uri`
    pub fn get(&mut self, uri: &str) -> Result<Lookup> {
        let uri = Uri::parse(uri)?;
        let selector = Selector::parse(&uri.path)?;
        self.resolve(&uri.scheme)?.get(&selector)
    }

    /// Whether the selector in the path of `uri` resolves to anything
    pub fn contains(&mut self, uri: &str) -> Result<bool> {
        let uri = Uri::parse(uri)?;
        let selector = Selector::parse(&uri.path)?;
        self.resolve(&uri.scheme)?.contains(&selector)
    }

    /// The direct children of the directory at `uri`
    pub fn list_directory(&mut self, uri: &str) -> Result<Vec<Arc<Resource>>> {
        let uri = Uri::parse(uri)?;
        self.resolve(&uri.scheme)?.list_directory(&uri.path)
    }

    /// Resources tagged with `tag` in every registered locator, concatenated
    pub fn get_by_tag(&mut self, tag: &str) -> Result<Vec<Arc<Resource>>> {
        let mut resources = Vec::new();
        for index in 0..self.registrations.len() {
            resources.extend(self.resolve_at(index)?.get_by_tag(tag)?);
        }
        Ok(resources)
    }

    /// Tag names of every registered locator, without duplicates
    pub fn get_tags(&mut self) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut tags = Vec::new();
        for index in 0..self.registrations.len() {
            for tag in self.resolve_at(index)?.get_tags()? {
                if seen.insert(tag.clone()) {
                    tags.push(tag);
                }
            }
        }
        Ok(tags)
    }

    fn position(&self, scheme: &str) -> Option<usize> {
        self.registrations
            .iter()
            .position(|(registered, _)| registered == scheme)
    }

    fn resolve_at(&mut self, index: usize) -> Result<&mut dyn ResourceLocator> {
        let (scheme, registration) = &mut self.registrations[index];

        if let Registration::Factory(factory) = registration {
            let locator = factory().map_err(|e| Error::LocatorFactory {
                scheme: scheme.clone(),
                message: e.to_string(),
            })?;
            debug!("Resolved locator factory for scheme \"{}\"", scheme);
            *registration = Registration::Instance(locator);
        }

        match registration {
            Registration::Instance(locator) => Ok(locator.as_mut()),
            Registration::Factory(_) => Err(Error::LocatorFactory {
                scheme: scheme.clone(),
                message: "the factory was not resolved".to_string(),
            }),
        }
    }
}
