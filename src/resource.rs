//! Logical resources of a repository
//!
//! A [`Resource`] is a file or a directory identified by its repository path.
//! It records the physical location currently in effect and the full override
//! history for that path.
//!
//! Directories never store their children. The directory operations take the
//! locator the resource came from and query it for direct descendants, so a
//! resource holds no reference back into its locator.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::locator::ResourceLocator;
use crate::path;

/// The two kinds of repository entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    File,
    Directory,
}

/// A file or directory in the virtual tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    kind: ResourceKind,
    path: String,
    location: Option<String>,
    alternative_locations: Vec<String>,
}

impl Resource {
    /// Create a resource from its effective location and override history
    ///
    /// `history` lists prior locations oldest first and must not contain the
    /// effective location; it is appended here.
    pub fn new(
        kind: ResourceKind,
        path: impl Into<String>,
        location: Option<String>,
        history: Vec<String>,
    ) -> Self {
        let mut alternative_locations = history;
        if let Some(location) = &location {
            alternative_locations.push(location.clone());
        }

        Self {
            kind,
            path: path.into(),
            location,
            alternative_locations,
        }
    }

    /// A file bound to a single location
    pub fn file(path: impl Into<String>, location: impl Into<String>) -> Self {
        Self::new(ResourceKind::File, path, Some(location.into()), Vec::new())
    }

    /// A directory with an optional physical binding
    pub fn directory(path: impl Into<String>, location: Option<String>) -> Self {
        Self::new(ResourceKind::Directory, path, location, Vec::new())
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn is_directory(&self) -> bool {
        self.kind == ResourceKind::Directory
    }

    /// The normalized repository path
    pub fn repository_path(&self) -> &str {
        &self.path
    }

    /// The last segment of the repository path, empty for the root
    pub fn name(&self) -> &str {
        path::file_name(&self.path).unwrap_or("")
    }

    /// The physical location in effect, `None` for unbound directories
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Every location ever bound to this path, oldest first
    ///
    /// The effective location is always the last element.
    pub fn alternative_locations(&self) -> &[String] {
        &self.alternative_locations
    }

    /// Whether this directory has a direct child called `name`
    pub fn contains_child<L>(&self, locator: &mut L, name: &str) -> Result<bool>
    where
        L: ResourceLocator + ?Sized,
    {
        self.ensure_directory()?;
        match self.child_path(name) {
            Some(child) => locator.contains_path(&child),
            None => Ok(false),
        }
    }

    /// The direct child called `name`
    ///
    /// Names are not normalized: `.`, `..` and names containing `/` are not
    /// children and fail like any unknown name.
    pub fn child<L>(&self, locator: &mut L, name: &str) -> Result<Arc<Resource>>
    where
        L: ResourceLocator + ?Sized,
    {
        self.ensure_directory()?;
        match self.child_path(name) {
            Some(child) => locator.get_path(&child),
            None => Err(Error::not_found(&format!("{}/{}", self.path, name))),
        }
    }

    /// The direct children in ascending path order
    pub fn children<L>(&self, locator: &mut L) -> Result<Vec<Arc<Resource>>>
    where
        L: ResourceLocator + ?Sized,
    {
        self.ensure_directory()?;
        locator.list_directory(&self.path)
    }

    /// The number of direct children
    pub fn child_count<L>(&self, locator: &mut L) -> Result<usize>
    where
        L: ResourceLocator + ?Sized,
    {
        Ok(self.children(locator)?.len())
    }

    fn ensure_directory(&self) -> Result<()> {
        if self.is_directory() {
            Ok(())
        } else {
            Err(Error::not_a_directory(&self.path))
        }
    }

    fn child_path(&self, name: &str) -> Option<String> {
        if name.is_empty() || name == "." || name == ".." || name.contains('/') {
            return None;
        }
        Some(path::join(&self.path, name))
    }
}
