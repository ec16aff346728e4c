//! # Dump Command Implementation
//!
//! This module implements the `dump` subcommand, which reads a manifest,
//! builds the repository it describes by scanning the bound locations, and
//! writes the compiled index into a dump directory.
//!
//! The dump directory is created if needed. Existing index documents in it
//! are overwritten.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use vrepo::config;
use vrepo::defaults::{DEFAULT_INDEX_DIR, DEFAULT_MANIFEST_FILENAME};
use vrepo::dump::dump_index;

/// Compile a manifest into an index directory
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Path to the manifest file.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_MANIFEST_FILENAME)]
    pub manifest: PathBuf,

    /// Directory to write the compiled index into.
    ///
    /// Can also be set with the `VREPO_INDEX` environment variable.
    #[arg(short, long, value_name = "DIR", env = "VREPO_INDEX", default_value = DEFAULT_INDEX_DIR)]
    pub output: PathBuf,
}

/// Execute the `dump` command.
pub fn execute(args: DumpArgs) -> Result<()> {
    if !args.manifest.exists() {
        return Err(anyhow::anyhow!(
            "Manifest not found: {path}\n\n\
             hint: Create a {default} file listing 'resources' to bind\n\
             hint: Use -m/--manifest to specify a different path",
            path = args.manifest.display(),
            default = DEFAULT_MANIFEST_FILENAME
        ));
    }

    let manifest = config::from_file(&args.manifest).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load manifest from {}: {}",
            args.manifest.display(),
            e
        )
    })?;

    // Relative locations are anchored at the manifest's directory
    let manifest_path = std::path::absolute(&args.manifest)?;
    let base_dir = manifest_path.parent().unwrap_or(Path::new("/"));

    let repo = manifest
        .load_into_repository(base_dir)
        .map_err(|e| anyhow::anyhow!("Failed to build repository: {}", e))?;

    let index = dump_index(&repo, &args.output)
        .map_err(|e| anyhow::anyhow!("Failed to dump index: {}", e))?;

    println!(
        "Dumped {} files, {} directories and {} tags to {}",
        index.file_paths.len(),
        index.dir_paths.len(),
        index.tags.len(),
        args.output.display()
    );

    Ok(())
}
