//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_manifest(manifests::OVERRIDE);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::TestFixture;
}

/// Manifests over the fixture resources.
#[allow(dead_code)]
pub mod manifests {
    /// `dir1` bound at `/webmozart/puli`.
    pub const SINGLE: &str = r#"
resources:
  - path: /webmozart/puli
    location: res/dir1
"#;

    /// `dir1` then `dir2` bound at `/webmozart/puli`, with one tag.
    pub const OVERRIDE: &str = r#"
resources:
  - path: /webmozart/puli
    location: res/dir1
  - path: /webmozart/puli
    location: res/dir2
tags:
  webmozart/tag:
    - /webmozart/puli/file1
"#;

    /// A second tree for multi-index tests.
    pub const OTHER: &str = r#"
resources:
  - path: /acme/lib
    location: res/dir2
tags:
  acme/tag:
    - /acme/lib/file1
  webmozart/tag:
    - /acme/lib
"#;
}

/// A temporary directory holding the resources `res/dir1/{file1,file2}` and
/// `res/dir2/file1`, plus an optional manifest.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a fixture with the resource files in place.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        for (path, content) in [
            ("res/dir1/file1", "dir1/file1"),
            ("res/dir1/file2", "dir1/file2"),
            ("res/dir2/file1", "dir2/file1"),
        ] {
            temp_dir
                .child(path)
                .write_str(content)
                .expect("Failed to write resource file");
        }
        Self { temp_dir }
    }

    /// Add a `vrepo.yaml` manifest with the given content.
    pub fn with_manifest(self, content: &str) -> Self {
        self.temp_dir
            .child("vrepo.yaml")
            .write_str(content)
            .expect("Failed to write manifest");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.temp_dir.path().join("vrepo.yaml")
    }

    /// Get the physical path of a fixture resource.
    pub fn resource(&self, relative: &str) -> PathBuf {
        self.temp_dir.path().join("res").join(relative)
    }

    /// Get the physical path of a fixture resource as the repository records it.
    pub fn location(&self, relative: &str) -> String {
        self.resource(relative).to_string_lossy().into_owned()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
