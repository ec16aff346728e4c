//! # Compiled Index
//!
//! The compiled index is an immutable snapshot of a repository held in four
//! maps keyed by repository path:
//!
//! - **file paths**: file path to its effective location.
//! - **directory paths**: directory path to its effective location, or `null`
//!   for a directory that only exists virtually.
//! - **alternative paths**: overridden path to its prior locations, oldest
//!   first, without the effective one.
//! - **tags**: tag name to the ordered list of tagged paths.
//!
//! All maps are `BTreeMap`s so that keys, and therefore every listing derived
//! from them, come out in ascending order.
//!
//! ## Persistence
//!
//! A dump directory holds one JSON document per map (see
//! [`crate::defaults`]). The documents are independent so that a locator can
//! decode each map on first use instead of reading the whole index upfront.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::defaults::{ALTERNATIVE_PATHS_FILE, DIR_PATHS_FILE, FILE_PATHS_FILE, TAGS_FILE};
use crate::error::{Error, Result};

/// File path to effective location
pub type FilePaths = BTreeMap<String, String>;

/// Directory path to effective location, if bound
pub type DirPaths = BTreeMap<String, Option<String>>;

/// Overridden path to prior locations
pub type AlternativePaths = BTreeMap<String, Vec<String>>;

/// Tag name to tagged paths
pub type TagPaths = BTreeMap<String, Vec<String>>;

/// One of the four maps of a compiled index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexPart {
    FilePaths,
    DirPaths,
    AlternativePaths,
    Tags,
}

impl IndexPart {
    pub const ALL: [IndexPart; 4] = [
        IndexPart::FilePaths,
        IndexPart::DirPaths,
        IndexPart::AlternativePaths,
        IndexPart::Tags,
    ];

    /// The document name of this part inside a dump directory
    pub fn file_name(self) -> &'static str {
        match self {
            IndexPart::FilePaths => FILE_PATHS_FILE,
            IndexPart::DirPaths => DIR_PATHS_FILE,
            IndexPart::AlternativePaths => ALTERNATIVE_PATHS_FILE,
            IndexPart::Tags => TAGS_FILE,
        }
    }
}

/// Immutable snapshot of a repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledIndex {
    pub file_paths: FilePaths,
    pub dir_paths: DirPaths,
    pub alternative_paths: AlternativePaths,
    pub tags: TagPaths,
}

impl CompiledIndex {
    /// Number of files and directories in the index
    pub fn len(&self) -> usize {
        self.file_paths.len() + self.dir_paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file_paths.is_empty() && self.dir_paths.is_empty()
    }

    /// Write the four documents into `target`, creating it if needed
    ///
    /// Fails with [`Error::InvalidTarget`] when `target` exists but is not a
    /// directory or cannot be created.
    pub fn write_to(&self, target: &Path) -> Result<()> {
        prepare_target(target)?;

        write_part(target, IndexPart::FilePaths, &self.file_paths)?;
        write_part(target, IndexPart::DirPaths, &self.dir_paths)?;
        write_part(target, IndexPart::AlternativePaths, &self.alternative_paths)?;
        write_part(target, IndexPart::Tags, &self.tags)?;

        debug!(
            "Wrote index with {} files, {} directories and {} tags to {}",
            self.file_paths.len(),
            self.dir_paths.len(),
            self.tags.len(),
            target.display()
        );
        Ok(())
    }

    /// Read all four documents of a dump directory at once
    pub fn read_from(dir: &Path) -> Result<Self> {
        check_dump(dir)?;
        Ok(Self {
            file_paths: read_part(dir, IndexPart::FilePaths)?,
            dir_paths: read_part(dir, IndexPart::DirPaths)?,
            alternative_paths: read_part(dir, IndexPart::AlternativePaths)?,
            tags: read_part(dir, IndexPart::Tags)?,
        })
    }
}

/// Verify that `dir` holds every document of a compiled index
pub fn check_dump(dir: &Path) -> Result<()> {
    for part in IndexPart::ALL {
        if !dir.join(part.file_name()).is_file() {
            return Err(Error::InvalidIndex {
                path: dir.display().to_string(),
                message: format!(
                    "missing {}. Please try to recreate it.",
                    part.file_name()
                ),
            });
        }
    }
    Ok(())
}

/// Decode a single document of a dump directory
pub fn read_part<T: DeserializeOwned>(dir: &Path, part: IndexPart) -> Result<T> {
    let path = dir.join(part.file_name());
    let content = fs::read(&path)?;
    let decoded = serde_json::from_slice(&content)?;
    debug!("Loaded {}", path.display());
    Ok(decoded)
}

fn write_part<T: Serialize>(dir: &Path, part: IndexPart, value: &T) -> Result<()> {
    let content = serde_json::to_vec_pretty(value)?;
    fs::write(dir.join(part.file_name()), content)?;
    Ok(())
}

fn prepare_target(target: &Path) -> Result<()> {
    if !target.exists() {
        fs::create_dir_all(target).map_err(|e| Error::InvalidTarget {
            path: target.display().to_string(),
            message: e.to_string(),
        })?;
    }

    if !target.is_dir() {
        return Err(Error::InvalidTarget {
            path: target.display().to_string(),
            message: "not a directory".to_string(),
        });
    }
    Ok(())
}
