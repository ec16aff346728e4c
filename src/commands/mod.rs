//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `vrepo`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `vrepo` library.
//!
//! Arguments shared by the query commands live here.

pub mod completions;
pub mod dump;
pub mod get;
pub mod ls;
pub mod tags;
pub mod tree;

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use vrepo::defaults::DEFAULT_INDEX_DIR;
use vrepo::locator::{CompiledLocator, Registration, UriLocator};

/// Location of the compiled index to query
#[derive(Args, Debug, Clone)]
pub struct IndexArgs {
    /// Directory holding the compiled index.
    ///
    /// Can also be set with the `VREPO_INDEX` environment variable.
    #[arg(long, value_name = "DIR", env = "VREPO_INDEX", default_value = DEFAULT_INDEX_DIR)]
    pub index: PathBuf,
}

impl IndexArgs {
    /// Open a locator on the index directory
    pub fn open(&self) -> Result<CompiledLocator> {
        CompiledLocator::open(&self.index).map_err(|e| {
            anyhow::anyhow!(
                "{}\n\n\
                 hint: Run 'vrepo dump' to compile a manifest into {}\n\
                 hint: Use --index or VREPO_INDEX to point at another dump",
                e,
                self.index.display()
            )
        })
    }
}

/// Build a URI locator from `SCHEME=DIR` mount specifications
///
/// Each index is opened lazily, the first time its scheme is queried.
pub fn mount_locators(mounts: &[String]) -> Result<UriLocator> {
    let mut uri_locator = UriLocator::new();

    for mount in mounts {
        let (scheme, dir) = mount
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Invalid mount '{}': expected SCHEME=DIR", mount))?;
        let dir = PathBuf::from(dir);

        uri_locator
            .register(
                scheme,
                Registration::factory(move || CompiledLocator::open(&dir)),
            )
            .map_err(|e| anyhow::anyhow!("Invalid mount '{}': {}", mount, e))?;
    }

    Ok(uri_locator)
}
