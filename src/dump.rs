//! # Index Dumping
//!
//! Compiles a live resource tree into a [`CompiledIndex`].
//!
//! The tree is walked from the root. Directories land in the directory map,
//! everything else in the file map, and paths bound more than once record
//! their prior locations under alternative paths. Tags are copied afterwards,
//! keyed by tag name.

use std::path::Path;

use log::{debug, warn};

use crate::error::Result;
use crate::index::CompiledIndex;
use crate::path::ROOT;
use crate::resource::Resource;

/// A live tree that can be compiled
pub trait TreeSource {
    /// The resource at a normalized path
    fn resource(&self, path: &str) -> Option<Resource>;

    /// The direct children of a directory, ascending by path
    fn children(&self, path: &str) -> Vec<Resource>;

    /// All tag names
    fn tags(&self) -> Vec<String>;

    /// The paths tagged with `tag`
    fn tagged_paths(&self, tag: &str) -> Vec<String>;
}

/// Compile `source` into an index
pub fn build_index<T: TreeSource + ?Sized>(source: &T) -> CompiledIndex {
    let mut index = CompiledIndex::default();

    let root = source
        .resource(ROOT)
        .unwrap_or_else(|| Resource::directory(ROOT, None));
    extract_paths(source, &root, &mut index);

    // A tag may only point at paths the index can resolve
    for tag in source.tags() {
        let paths: Vec<String> = source
            .tagged_paths(&tag)
            .into_iter()
            .filter(|path| {
                let recorded =
                    index.file_paths.contains_key(path) || index.dir_paths.contains_key(path);
                if !recorded {
                    warn!("Dropping {} from tag {}: it is not in the index", path, tag);
                }
                recorded
            })
            .collect();
        index.tags.insert(tag, paths);
    }

    index
}

/// Compile `source` and write the index into `target`
///
/// Fails with `InvalidTarget` if `target` cannot be used as a dump directory.
pub fn dump_index<T: TreeSource + ?Sized>(source: &T, target: &Path) -> Result<CompiledIndex> {
    let index = build_index(source);
    index.write_to(target)?;
    debug!("Dumped {} resources to {}", index.len(), target.display());
    Ok(index)
}

fn extract_paths<T: TreeSource + ?Sized>(source: &T, resource: &Resource, index: &mut CompiledIndex) {
    let path = resource.repository_path().to_string();

    if resource.is_directory() {
        index
            .dir_paths
            .insert(path.clone(), resource.location().map(str::to_string));
    } else if let Some(location) = resource.location() {
        index.file_paths.insert(path.clone(), location.to_string());
    } else {
        warn!("Skipping file {} without a location", path);
        return;
    }

    // The effective location is already recorded above
    if let Some((_, prior)) = resource.alternative_locations().split_last() {
        if !prior.is_empty() {
            index.alternative_paths.insert(path.clone(), prior.to_vec());
        }
    }

    if resource.is_directory() {
        for child in source.children(&path) {
            extract_paths(source, &child, index);
        }
    }
}
