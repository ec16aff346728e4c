//! # Compiled Locator
//!
//! Serves queries from a [`CompiledIndex`] without touching the locations the
//! index points to.
//!
//! ## Lazy state
//!
//! The four maps of the index are decoded on first use and kept for the
//! lifetime of the locator. Resources are created on first access and
//! memoized. A path is either still *pending* in the file or directory map or
//! *memoized* in `resources`, never both: materializing a path moves it from
//! one side to the other exactly once. Later pattern scans therefore visit
//! each path a single time.
//!
//! All maps are ordered by path, so the memo stays sorted after every insert
//! and pattern scans can seek straight to the static prefix of a pattern.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, trace};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::index::{self, AlternativePaths, CompiledIndex, DirPaths, FilePaths, IndexPart};
use crate::locator::ResourceLocator;
use crate::path::{self, ROOT};
use crate::pattern::GlobPattern;
use crate::resource::{Resource, ResourceKind};

/// Where the compiled maps are read from
#[derive(Debug)]
enum IndexSource {
    /// A dump directory with one document per map
    Dump(PathBuf),
    /// An index already held in memory; each map is moved out on first use
    Memory(CompiledIndex),
}

impl IndexSource {
    fn load<T, F>(&mut self, part: IndexPart, take: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce(&mut CompiledIndex) -> T,
    {
        match self {
            IndexSource::Dump(dir) => index::read_part(dir, part),
            IndexSource::Memory(index) => Ok(take(index)),
        }
    }
}

/// Files and directories that have not been materialized yet
#[derive(Debug)]
struct Pending {
    files: FilePaths,
    dirs: DirPaths,
}

impl Pending {
    fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path) || self.dirs.contains_key(path)
    }
}

#[derive(Debug)]
enum TagEntry {
    Paths(Vec<String>),
    Resolved(Vec<Arc<Resource>>),
}

/// Locator over a compiled index
#[derive(Debug)]
pub struct CompiledLocator {
    source: IndexSource,
    resources: BTreeMap<String, Arc<Resource>>,
    pending: Option<Pending>,
    alternative_paths: Option<AlternativePaths>,
    tags: Option<BTreeMap<String, TagEntry>>,
}

impl CompiledLocator {
    /// Open the index dumped into `dir`
    ///
    /// Only checks that all four documents exist; nothing is decoded yet.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        index::check_dump(dir)?;
        debug!("Opened compiled index at {}", dir.display());
        Ok(Self::with_source(IndexSource::Dump(dir.to_path_buf())))
    }

    /// Serve an index that is already in memory
    pub fn from_index(index: CompiledIndex) -> Self {
        Self::with_source(IndexSource::Memory(index))
    }

    fn with_source(source: IndexSource) -> Self {
        Self {
            source,
            resources: BTreeMap::new(),
            pending: None,
            alternative_paths: None,
            tags: None,
        }
    }

    /// The prior locations of `path`, oldest first, excluding the current one
    pub fn get_alternative_paths(&mut self, path: &str) -> Result<Vec<String>> {
        let path = path::normalize(path);
        Ok(self
            .alternative_paths()?
            .get(&path)
            .cloned()
            .unwrap_or_default())
    }

    fn pending(&mut self) -> Result<&mut Pending> {
        let pending = match self.pending.take() {
            Some(pending) => pending,
            None => Pending {
                files: self
                    .source
                    .load(IndexPart::FilePaths, |index| std::mem::take(&mut index.file_paths))?,
                dirs: self
                    .source
                    .load(IndexPart::DirPaths, |index| std::mem::take(&mut index.dir_paths))?,
            },
        };
        Ok(self.pending.insert(pending))
    }

    fn alternative_paths(&mut self) -> Result<&mut AlternativePaths> {
        let paths = match self.alternative_paths.take() {
            Some(paths) => paths,
            None => self.source.load(IndexPart::AlternativePaths, |index| {
                std::mem::take(&mut index.alternative_paths)
            })?,
        };
        Ok(self.alternative_paths.insert(paths))
    }

    fn tags(&mut self) -> Result<&mut BTreeMap<String, TagEntry>> {
        let tags = match self.tags.take() {
            Some(tags) => tags,
            None => self
                .source
                .load(IndexPart::Tags, |index| std::mem::take(&mut index.tags))?
                .into_iter()
                .map(|(tag, paths)| (tag, TagEntry::Paths(paths)))
                .collect(),
        };
        Ok(self.tags.insert(tags))
    }

    /// Move a pending path into the memo, returning `None` if it is not pending
    fn materialize(&mut self, path: &str) -> Result<Option<Arc<Resource>>> {
        if !self.pending()?.contains(path) {
            return Ok(None);
        }

        let history = self
            .alternative_paths()?
            .get(path)
            .cloned()
            .unwrap_or_default();

        let pending = self.pending()?;
        let (kind, location) = match pending.files.remove(path) {
            Some(location) => (ResourceKind::File, Some(location)),
            None => (ResourceKind::Directory, pending.dirs.remove(path).flatten()),
        };

        trace!("Materialized {:?} {}", kind, path);
        let resource = Arc::new(Resource::new(kind, path, location, history));
        self.resources.insert(path.to_string(), Arc::clone(&resource));
        Ok(Some(resource))
    }

    fn kind_of(&mut self, path: &str) -> Result<Option<ResourceKind>> {
        if let Some(resource) = self.resources.get(path) {
            return Ok(Some(resource.kind()));
        }

        let pending = self.pending()?;
        if pending.files.contains_key(path) {
            Ok(Some(ResourceKind::File))
        } else if pending.dirs.contains_key(path) || path == ROOT {
            Ok(Some(ResourceKind::Directory))
        } else {
            Ok(None)
        }
    }
}

/// Entries of `map` whose key starts with `prefix`, in key order
fn with_prefix<'a, V>(
    map: &'a BTreeMap<String, V>,
    prefix: &'a str,
) -> impl Iterator<Item = &'a String> + 'a {
    map.range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
        .map(|(path, _)| path)
        .take_while(move |path| path.starts_with(prefix))
}

impl ResourceLocator for CompiledLocator {
    fn get_path(&mut self, path: &str) -> Result<Arc<Resource>> {
        let path = path::normalize(path);

        if let Some(resource) = self.resources.get(&path) {
            return Ok(Arc::clone(resource));
        }

        if let Some(resource) = self.materialize(&path)? {
            return Ok(resource);
        }

        // The root exists even in an index that does not record it
        if path == ROOT {
            let root = Arc::new(Resource::directory(ROOT, None));
            self.resources.insert(path, Arc::clone(&root));
            return Ok(root);
        }

        Err(Error::not_found(&path))
    }

    fn get_pattern(&mut self, pattern: &GlobPattern) -> Result<Vec<Arc<Resource>>> {
        let prefix = pattern.static_prefix();

        let mut matched: BTreeMap<String, Arc<Resource>> = with_prefix(&self.resources, prefix)
            .filter(|path| pattern.matches(path))
            .filter_map(|path| {
                self.resources
                    .get(path)
                    .map(|resource| (path.clone(), Arc::clone(resource)))
            })
            .collect();

        let pending = self.pending()?;
        let candidates: Vec<String> = with_prefix(&pending.files, prefix)
            .chain(with_prefix(&pending.dirs, prefix))
            .filter(|path| pattern.matches(path))
            .cloned()
            .collect();

        for path in candidates {
            if let Some(resource) = self.materialize(&path)? {
                matched.insert(path, resource);
            }
        }

        Ok(matched.into_values().collect())
    }

    fn contains_path(&mut self, path: &str) -> Result<bool> {
        let path = path::normalize(path);
        Ok(path == ROOT || self.resources.contains_key(&path) || self.pending()?.contains(&path))
    }

    /// Scans memoized resources as well as pending ones, so a pattern whose
    /// matches were all materialized by an earlier `get` is still contained.
    fn contains_pattern(&mut self, pattern: &GlobPattern) -> Result<bool> {
        let prefix = pattern.static_prefix();

        if with_prefix(&self.resources, prefix).any(|path| pattern.matches(path)) {
            return Ok(true);
        }

        let pending = self.pending()?;
        Ok(with_prefix(&pending.files, prefix)
            .chain(with_prefix(&pending.dirs, prefix))
            .any(|path| pattern.matches(path)))
    }

    fn list_directory(&mut self, path: &str) -> Result<Vec<Arc<Resource>>> {
        let path = path::normalize(path);

        match self.kind_of(&path)? {
            None => Err(Error::not_found(&path)),
            Some(ResourceKind::File) => Err(Error::not_a_directory(&path)),
            Some(ResourceKind::Directory) => {
                let mut children = self.get_pattern(&GlobPattern::children_of(&path)?)?;
                // `/*` also matches the root itself
                children.retain(|child| child.repository_path() != path);
                Ok(children)
            }
        }
    }

    fn get_by_tag(&mut self, tag: &str) -> Result<Vec<Arc<Resource>>> {
        let paths = match self.tags()?.get(tag) {
            None => return Ok(Vec::new()),
            Some(TagEntry::Resolved(resources)) => return Ok(resources.clone()),
            Some(TagEntry::Paths(paths)) => paths.clone(),
        };

        let resources = paths
            .iter()
            .map(|path| self.get_path(path))
            .collect::<Result<Vec<_>>>()?;

        self.tags()?
            .insert(tag.to_string(), TagEntry::Resolved(resources.clone()));
        Ok(resources)
    }

    fn get_tags(&mut self) -> Result<Vec<String>> {
        Ok(self.tags()?.keys().cloned().collect())
    }
}
