//! # Tags Command Implementation
//!
//! This module implements the `tags` subcommand. Without an argument it lists
//! every tag in the index; with a tag it lists the resources carrying it.
//!
//! With `--mount`, the query fans out over every mounted index: tag names are
//! merged and resources are concatenated in mount order.

use anyhow::Result;
use clap::Args;
use std::sync::Arc;

use vrepo::locator::ResourceLocator;
use vrepo::output::{display_location, display_path, OutputConfig};
use vrepo::resource::Resource;

use super::{mount_locators, IndexArgs};

/// List tags, or the resources carrying a tag
#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Tag whose resources should be listed
    #[arg(value_name = "TAG")]
    pub tag: Option<String>,

    #[command(flatten)]
    pub index: IndexArgs,

    /// Mount an index directory under a URI scheme (SCHEME=DIR).
    ///
    /// May be repeated. Replaces --index.
    #[arg(long, value_name = "SCHEME=DIR")]
    pub mount: Vec<String>,
}

/// Execute the `tags` command.
pub fn execute(args: TagsArgs, output: &OutputConfig) -> Result<()> {
    match &args.tag {
        None => {
            for tag in all_tags(&args)? {
                println!("{}", tag);
            }
        }
        Some(tag) => {
            for resource in tagged_resources(&args, tag)? {
                println!(
                    "{}\t{}",
                    display_path(output, &resource),
                    display_location(&resource)
                );
            }
        }
    }

    Ok(())
}

fn all_tags(args: &TagsArgs) -> Result<Vec<String>> {
    if args.mount.is_empty() {
        Ok(args.index.open()?.get_tags()?)
    } else {
        Ok(mount_locators(&args.mount)?.get_tags()?)
    }
}

fn tagged_resources(args: &TagsArgs, tag: &str) -> Result<Vec<Arc<Resource>>> {
    if args.mount.is_empty() {
        Ok(args.index.open()?.get_by_tag(tag)?)
    } else {
        Ok(mount_locators(&args.mount)?.get_by_tag(tag)?)
    }
}
