//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists the direct
//! children of a directory in the compiled index, sorted by path.
//! Directories are printed with a trailing `/`.

use anyhow::Result;
use clap::Args;

use vrepo::locator::ResourceLocator;
use vrepo::output::{display_location, display_path, OutputConfig};

use super::IndexArgs;

/// List the direct children of a directory
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Directory to list
    #[arg(value_name = "PATH", default_value = "/")]
    pub path: String,

    #[command(flatten)]
    pub index: IndexArgs,

    /// Also print the physical location of each entry
    #[arg(short, long)]
    pub long: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs, output: &OutputConfig) -> Result<()> {
    let mut locator = args.index.open()?;
    let children = locator
        .list_directory(&args.path)
        .map_err(|e| anyhow::anyhow!("Cannot list {}: {}", args.path, e))?;

    for child in &children {
        if args.long {
            println!(
                "{}\t{}",
                display_path(output, child),
                display_location(child)
            );
        } else {
            println!("{}", display_path(output, child));
        }
    }

    Ok(())
}
