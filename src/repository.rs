//! # Resource Repository
//!
//! The mutable, in-memory tree that indexes are compiled from.
//!
//! Physical files and directories are bound to virtual paths with
//! [`ResourceRepository::add`]. Binding a directory walks it and binds every
//! entry below the virtual path as well. Binding the same virtual path again
//! overrides it: the new location takes effect and the old one is kept in the
//! path's override history.
//!
//! ## Example
//!
//! ```
//! use vrepo::repository::ResourceRepository;
//! use vrepo::resource::ResourceKind;
//!
//! let mut repo = ResourceRepository::new();
//! repo.bind("/webmozart/puli/file1", ResourceKind::File, "dir1/file1").unwrap();
//! repo.bind("/webmozart/puli/file1", ResourceKind::File, "dir2/file1").unwrap();
//!
//! let file = repo.get("/webmozart/puli/file1").unwrap();
//! assert_eq!(file.location(), Some("dir2/file1"));
//! assert_eq!(file.alternative_locations(), &["dir1/file1", "dir2/file1"]);
//! assert!(repo.contains("/webmozart"));
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use log::{debug, warn};
use walkdir::WalkDir;

use crate::dump::TreeSource;
use crate::error::{Error, Result};
use crate::path::{self, ROOT};
use crate::resource::{Resource, ResourceKind};

#[derive(Debug, Clone)]
struct Node {
    kind: ResourceKind,
    /// Every bound location, oldest first
    locations: Vec<String>,
}

impl Node {
    fn virtual_directory() -> Self {
        Self {
            kind: ResourceKind::Directory,
            locations: Vec::new(),
        }
    }
}

/// A mutable tree of virtual paths bound to physical locations
#[derive(Debug, Clone)]
pub struct ResourceRepository {
    nodes: BTreeMap<String, Node>,
    tags: BTreeMap<String, BTreeSet<String>>,
}

impl Default for ResourceRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceRepository {
    /// Create a repository holding only the root directory
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(ROOT.to_string(), Node::virtual_directory());
        Self {
            nodes,
            tags: BTreeMap::new(),
        }
    }

    /// Bind a physical file or directory to a virtual path
    ///
    /// Directories are walked recursively and each entry is bound to the
    /// matching path below `repository_path`, in file name order.
    pub fn add(&mut self, repository_path: &str, location: impl AsRef<Path>) -> Result<()> {
        let location = location.as_ref();
        let metadata = fs::metadata(location).map_err(|e| Error::InvalidArgument {
            message: format!("Cannot bind \"{}\": {}", location.display(), e),
        })?;

        let repository_path = path::normalize(repository_path);

        if !metadata.is_dir() {
            return self.bind(&repository_path, ResourceKind::File, &location_string(location));
        }

        self.bind(&repository_path, ResourceKind::Directory, &location_string(location))?;

        for entry in WalkDir::new(location).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            let relative = match entry.path().strip_prefix(location) {
                Ok(relative) => relative,
                Err(_) => continue,
            };

            let segments: Vec<String> = relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy().into_owned())
                .collect();
            let child_path = path::join(&repository_path, &segments.join("/"));
            let kind = if entry.file_type().is_dir() {
                ResourceKind::Directory
            } else {
                ResourceKind::File
            };

            self.bind(&child_path, kind, &location_string(entry.path()))?;
        }

        debug!("Added {} at {}", location.display(), repository_path);
        Ok(())
    }

    /// Bind a location to a virtual path without inspecting the location
    ///
    /// Missing ancestors are created as unbound directories. Rebinding a path
    /// with a different kind keeps its history; turning a directory into a
    /// file drops everything below it.
    pub fn bind(&mut self, repository_path: &str, kind: ResourceKind, location: &str) -> Result<()> {
        let repository_path = path::normalize(repository_path);

        if repository_path == ROOT && kind == ResourceKind::File {
            return Err(Error::InvalidArgument {
                message: "The root cannot be bound to a file".to_string(),
            });
        }

        for ancestor in path::ancestors(&repository_path) {
            let node = self
                .nodes
                .entry(ancestor.to_string())
                .or_insert_with(Node::virtual_directory);
            if node.kind == ResourceKind::File {
                return Err(Error::not_a_directory(ancestor));
            }
        }

        let previous_kind = self.nodes.get(&repository_path).map(|node| node.kind);
        if let Some(previous_kind) = previous_kind {
            if previous_kind != kind {
                warn!(
                    "Rebinding {} from {:?} to {:?}",
                    repository_path, previous_kind, kind
                );
            }
            if previous_kind == ResourceKind::Directory && kind == ResourceKind::File {
                self.remove_below(&repository_path);
            }
        }

        let node = self
            .nodes
            .entry(repository_path)
            .or_insert_with(Node::virtual_directory);
        node.kind = kind;
        node.locations.push(location.to_string());
        Ok(())
    }

    /// Remove a path and everything below it, returning the number removed
    pub fn remove(&mut self, repository_path: &str) -> Result<usize> {
        let repository_path = path::normalize(repository_path);

        if repository_path == ROOT {
            return Err(Error::InvalidArgument {
                message: "The root cannot be removed".to_string(),
            });
        }
        if self.nodes.remove(&repository_path).is_none() {
            return Err(Error::not_found(&repository_path));
        }

        let removed = 1 + self.remove_below(&repository_path);
        self.untag_missing();
        Ok(removed)
    }

    /// Tag an existing path
    pub fn tag(&mut self, repository_path: &str, tag: &str) -> Result<()> {
        let repository_path = path::normalize(repository_path);

        if tag.is_empty() {
            return Err(Error::InvalidArgument {
                message: "The tag name must not be empty".to_string(),
            });
        }
        if !self.nodes.contains_key(&repository_path) {
            return Err(Error::not_found(&repository_path));
        }

        self.tags
            .entry(tag.to_string())
            .or_default()
            .insert(repository_path);
        Ok(())
    }

    /// Remove a tag from a path; tags left without paths disappear
    pub fn untag(&mut self, repository_path: &str, tag: &str) {
        let repository_path = path::normalize(repository_path);

        if let Some(paths) = self.tags.get_mut(tag) {
            paths.remove(&repository_path);
            if paths.is_empty() {
                self.tags.remove(tag);
            }
        }
    }

    /// The resource at a path
    pub fn get(&self, repository_path: &str) -> Option<Resource> {
        let repository_path = path::normalize(repository_path);
        self.nodes
            .get(&repository_path)
            .map(|node| to_resource(&repository_path, node))
    }

    pub fn contains(&self, repository_path: &str) -> bool {
        self.nodes.contains_key(&path::normalize(repository_path))
    }

    /// Number of paths, including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the root exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    fn remove_below(&mut self, dir: &str) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|path, _| !path::is_descendant(path, dir));
        before - self.nodes.len()
    }

    fn untag_missing(&mut self) {
        let nodes = &self.nodes;
        for paths in self.tags.values_mut() {
            paths.retain(|path| nodes.contains_key(path));
        }
        self.tags.retain(|_, paths| !paths.is_empty());
    }
}

impl TreeSource for ResourceRepository {
    fn resource(&self, path: &str) -> Option<Resource> {
        self.get(path)
    }

    fn children(&self, dir: &str) -> Vec<Resource> {
        let prefix = if dir == ROOT {
            ROOT.to_string()
        } else {
            format!("{}/", dir)
        };

        self.nodes
            .range(prefix.clone()..)
            .take_while(|(path, _)| path.starts_with(&prefix))
            .filter(|(path, _)| {
                let rest = &path[prefix.len()..];
                !rest.is_empty() && !rest.contains('/')
            })
            .map(|(path, node)| to_resource(path, node))
            .collect()
    }

    fn tags(&self) -> Vec<String> {
        self.tags.keys().cloned().collect()
    }

    fn tagged_paths(&self, tag: &str) -> Vec<String> {
        self.tags
            .get(tag)
            .map(|paths| paths.iter().cloned().collect())
            .unwrap_or_default()
    }
}

fn to_resource(path: &str, node: &Node) -> Resource {
    match node.locations.split_last() {
        Some((effective, history)) => {
            Resource::new(node.kind, path, Some(effective.clone()), history.to_vec())
        }
        None => Resource::new(node.kind, path, None, Vec::new()),
    }
}

fn location_string(location: &Path) -> String {
    location.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Creates `dir1/{file1,file2}` and `dir2/file1`
    fn fixtures() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("dir1")).unwrap();
        fs::create_dir_all(temp.path().join("dir2")).unwrap();
        fs::write(temp.path().join("dir1/file1"), "dir1/file1").unwrap();
        fs::write(temp.path().join("dir1/file2"), "dir1/file2").unwrap();
        fs::write(temp.path().join("dir2/file1"), "dir2/file1").unwrap();
        temp
    }

    fn location(temp: &TempDir, relative: &str) -> String {
        location_string(&temp.path().join(relative))
    }

    #[test]
    fn test_add_directory_binds_entries() {
        let temp = fixtures();
        let mut repo = ResourceRepository::new();
        repo.add("/webmozart/puli", temp.path().join("dir1")).unwrap();

        assert!(repo.contains("/webmozart"));
        assert_eq!(repo.get("/webmozart").unwrap().location(), None);

        let dir = repo.get("/webmozart/puli").unwrap();
        assert!(dir.is_directory());
        assert_eq!(dir.location(), Some(location(&temp, "dir1").as_str()));

        let file = repo.get("/webmozart/puli/file2").unwrap();
        assert_eq!(file.kind(), ResourceKind::File);
        assert_eq!(file.location(), Some(location(&temp, "dir1/file2").as_str()));
    }

    #[test]
    fn test_override_directory() {
        let temp = fixtures();
        let mut repo = ResourceRepository::new();
        repo.add("/webmozart/puli", temp.path().join("dir1")).unwrap();
        repo.add("/webmozart/puli", temp.path().join("dir2")).unwrap();

        let dir = repo.get("/webmozart/puli").unwrap();
        assert_eq!(
            dir.alternative_locations(),
            &[location(&temp, "dir1"), location(&temp, "dir2")]
        );

        let file1 = repo.get("/webmozart/puli/file1").unwrap();
        assert_eq!(
            file1.alternative_locations(),
            &[location(&temp, "dir1/file1"), location(&temp, "dir2/file1")]
        );

        let file2 = repo.get("/webmozart/puli/file2").unwrap();
        assert_eq!(file2.alternative_locations(), &[location(&temp, "dir1/file2")]);
    }

    #[test]
    fn test_add_missing_location_fails() {
        let temp = TempDir::new().unwrap();
        let mut repo = ResourceRepository::new();
        assert!(matches!(
            repo.add("/foo", temp.path().join("missing")),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_bind_below_file_fails() {
        let mut repo = ResourceRepository::new();
        repo.bind("/a", ResourceKind::File, "a").unwrap();
        assert!(matches!(
            repo.bind("/a/b", ResourceKind::File, "b"),
            Err(Error::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_rebinding_directory_as_file_drops_children() {
        let mut repo = ResourceRepository::new();
        repo.bind("/a/b", ResourceKind::File, "b").unwrap();
        repo.bind("/a", ResourceKind::File, "a").unwrap();

        assert!(!repo.contains("/a/b"));
        assert_eq!(repo.get("/a").unwrap().kind(), ResourceKind::File);
    }

    #[test]
    fn test_remove_drops_descendants_and_tags() {
        let mut repo = ResourceRepository::new();
        repo.bind("/a/b/c", ResourceKind::File, "c").unwrap();
        repo.bind("/a/d", ResourceKind::File, "d").unwrap();
        repo.tag("/a/b/c", "acme/tag").unwrap();
        repo.tag("/a/d", "acme/other").unwrap();

        assert_eq!(repo.remove("/a/b").unwrap(), 2);
        assert!(!repo.contains("/a/b/c"));
        assert!(repo.contains("/a/d"));
        assert_eq!(repo.tags(), vec!["acme/other".to_string()]);
    }

    #[test]
    fn test_remove_errors() {
        let mut repo = ResourceRepository::new();
        assert!(matches!(repo.remove("/"), Err(Error::InvalidArgument { .. })));
        assert!(matches!(repo.remove("/foo"), Err(Error::ResourceNotFound { .. })));
    }

    #[test]
    fn test_tag_and_untag() {
        let mut repo = ResourceRepository::new();
        repo.bind("/file1", ResourceKind::File, "f1").unwrap();
        repo.bind("/file2", ResourceKind::File, "f2").unwrap();

        repo.tag("/file1", "webmozart/foo").unwrap();
        repo.tag("/file1", "webmozart/bar").unwrap();
        repo.tag("/file2", "webmozart/foo").unwrap();
        repo.tag("/file2", "webmozart/foo").unwrap();

        assert_eq!(repo.tags(), vec!["webmozart/bar", "webmozart/foo"]);
        assert_eq!(repo.tagged_paths("webmozart/foo"), vec!["/file1", "/file2"]);

        repo.untag("/file1", "webmozart/bar");
        assert_eq!(repo.tags(), vec!["webmozart/foo"]);
        assert!(repo.tagged_paths("webmozart/bar").is_empty());
    }

    #[test]
    fn test_tag_unknown_path_fails() {
        let mut repo = ResourceRepository::new();
        assert!(matches!(
            repo.tag("/foo", "acme/tag"),
            Err(Error::ResourceNotFound { .. })
        ));
    }

    #[test]
    fn test_children_are_direct_and_sorted() {
        let mut repo = ResourceRepository::new();
        repo.bind("/foo/bar", ResourceKind::File, "bar").unwrap();
        repo.bind("/webmozart/puli/file1", ResourceKind::File, "f1").unwrap();
        repo.bind("/foo-bar", ResourceKind::File, "fb").unwrap();

        let children: Vec<String> = repo
            .children("/")
            .iter()
            .map(|r| r.repository_path().to_string())
            .collect();
        assert_eq!(children, vec!["/foo", "/foo-bar", "/webmozart"]);

        let children = repo.children("/foo");
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].repository_path(), "/foo/bar");
    }
}
