//! # Repository Manifest
//!
//! This module defines the `vrepo.yaml` manifest that describes a repository
//! to compile, and the logic for loading it into a [`ResourceRepository`].
//!
//! ```yaml
//! resources:
//!   - path: /webmozart/puli
//!     location: res/dir1
//!   - path: /webmozart/puli
//!     location: res/dir2
//! tags:
//!   webmozart/tag:
//!     - /webmozart/puli/file1
//! ```
//!
//! ## Semantics
//!
//! - **`resources`**: Bindings applied in order, so a later binding of the
//!   same path overrides an earlier one. Relative locations are resolved
//!   against the directory containing the manifest.
//! - **`tags`**: Applied after every binding. Tagging a path that no binding
//!   produced is an error.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::repository::ResourceRepository;

/// A physical location bound to a virtual path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Binding {
    /// The virtual path, normalized when applied.
    pub path: String,
    /// A file or directory on disk.
    pub location: String,
}

/// The complete manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Bindings in override order
    #[serde(default)]
    pub resources: Vec<Binding>,
    /// Tag name to tagged virtual paths
    #[serde(default)]
    pub tags: BTreeMap<String, Vec<String>>,
}

impl Manifest {
    /// Build a repository from this manifest
    ///
    /// `base_dir` anchors relative locations.
    pub fn load_into_repository(&self, base_dir: &Path) -> Result<ResourceRepository> {
        let mut repo = ResourceRepository::new();

        for binding in &self.resources {
            repo.add(&binding.path, base_dir.join(&binding.location))?;
        }

        for (tag, paths) in &self.tags {
            for path in paths {
                repo.tag(path, tag)?;
            }
        }

        Ok(repo)
    }
}

/// Parses a YAML string into a `Manifest`.
///
/// An empty document yields an empty manifest.
pub fn parse(yaml_content: &str) -> Result<Manifest> {
    if yaml_content.trim().is_empty() {
        return Ok(Manifest::default());
    }

    let manifest = serde_yaml::from_str::<Option<Manifest>>(yaml_content)
        .map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: Some(
                "A manifest has a 'resources' list of {path, location} entries and an optional 'tags' map"
                    .to_string(),
            ),
        })?
        .unwrap_or_default();

    validate(&manifest)?;
    Ok(manifest)
}

/// Parse a Manifest from a YAML file path
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

fn validate(manifest: &Manifest) -> Result<()> {
    for binding in &manifest.resources {
        if binding.location.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: format!("The binding of \"{}\" has an empty location", binding.path),
                hint: Some("Point 'location:' at a file or directory".to_string()),
            });
        }
    }

    for tag in manifest.tags.keys() {
        if tag.is_empty() {
            return Err(Error::ConfigParse {
                message: "Tag names must not be empty".to_string(),
                hint: None,
            });
        }
    }
    Ok(())
}
