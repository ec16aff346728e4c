//! # Virtual Resource Repository
//!
//! This library overlays physical files and directories onto a single virtual
//! tree of absolute, `/`-separated paths. It tracks the override history of
//! every path, selects resources by glob pattern or by tag, and compiles the
//! tree into an index that answers lookups without rescanning any backing
//! storage.
//!
//! ## Quick Example
//!
//! ```
//! use vrepo::dump::build_index;
//! use vrepo::locator::{CompiledLocator, ResourceLocator};
//! use vrepo::repository::ResourceRepository;
//! use vrepo::resource::ResourceKind;
//!
//! let mut repo = ResourceRepository::new();
//! repo.bind("/webmozart/puli/file1", ResourceKind::File, "res/file1").unwrap();
//! repo.bind("/webmozart/puli/file2", ResourceKind::File, "res/file2").unwrap();
//! repo.tag("/webmozart/puli/file1", "webmozart/tag").unwrap();
//!
//! let mut locator = CompiledLocator::from_index(build_index(&repo));
//!
//! let listed = locator.list_directory("/webmozart/puli/").unwrap();
//! assert_eq!(listed.len(), 2);
//! assert_eq!(listed[0].repository_path(), "/webmozart/puli/file1");
//!
//! let dir = locator.get_path("/webmozart/puli/file1/..").unwrap();
//! assert!(dir.is_directory());
//! assert_eq!(locator.get_tags().unwrap(), vec!["webmozart/tag"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Paths (`path`)**: Lexical normalization of repository paths.
//! - **Repository (`repository`)**: The mutable tree that physical locations
//!   are bound into.
//! - **Compiled index (`index`, `dump`)**: An immutable four-map snapshot of a
//!   repository, persisted as one document per map.
//! - **Locators (`locator`)**: Query engines. The compiled locator loads an
//!   index lazily and memoizes resources; the URI locator routes
//!   `scheme:///path` references to per-scheme locators.
//! - **Selectors (`selector`, `pattern`)**: Literal paths, glob patterns and
//!   lists of both.

pub mod config;
pub mod defaults;
pub mod dump;
pub mod error;
pub mod index;
pub mod locator;
pub mod output;
pub mod path;
pub mod pattern;
pub mod repository;
pub mod resource;
pub mod selector;

#[cfg(test)]
mod path_proptest;
