//! # Get Command Implementation
//!
//! This module implements the `get` subcommand, which resolves one or more
//! selectors against a compiled index and prints each resource with the
//! physical location it resolves to.
//!
//! Selectors are repository paths or glob patterns. When `--mount` is given,
//! selectors are `scheme:///path` URIs instead, routed to the index mounted
//! under that scheme.

use anyhow::Result;
use clap::Args;
use std::sync::Arc;

use vrepo::locator::ResourceLocator;
use vrepo::output::{display_location, display_path, OutputConfig};
use vrepo::resource::Resource;
use vrepo::selector::Selector;

use super::{mount_locators, IndexArgs};

/// Resolve paths, patterns or URIs
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Repository paths, glob patterns, or URIs when --mount is used
    #[arg(required = true, value_name = "SELECTOR")]
    pub selectors: Vec<String>,

    #[command(flatten)]
    pub index: IndexArgs,

    /// Mount an index directory under a URI scheme (SCHEME=DIR).
    ///
    /// May be repeated. Indexes are opened on first use.
    #[arg(long, value_name = "SCHEME=DIR")]
    pub mount: Vec<String>,

    /// Also print the locations each resource overrides
    #[arg(short, long)]
    pub long: bool,
}

/// Execute the `get` command.
pub fn execute(args: GetArgs, output: &OutputConfig) -> Result<()> {
    let resources = if args.mount.is_empty() {
        resolve_selectors(&args)?
    } else {
        resolve_uris(&args)?
    };

    for resource in &resources {
        println!(
            "{}\t{}",
            display_path(output, resource),
            display_location(resource)
        );
        if args.long {
            for overridden in overridden_locations(resource) {
                println!("  overrides {}", overridden);
            }
        }
    }

    Ok(())
}

fn resolve_selectors(args: &GetArgs) -> Result<Vec<Arc<Resource>>> {
    let mut locator = args.index.open()?;
    let selector = match args.selectors.as_slice() {
        [single] => Selector::parse(single),
        many => Selector::parse_all(many),
    }
    .map_err(|e| anyhow::anyhow!("Invalid selector: {}", e))?;

    let lookup = locator.get(&selector)?;
    Ok(lookup.into_vec())
}

fn resolve_uris(args: &GetArgs) -> Result<Vec<Arc<Resource>>> {
    let mut uri_locator = mount_locators(&args.mount)?;
    let mut resources = Vec::new();
    for uri in &args.selectors {
        let lookup = uri_locator
            .get(uri)
            .map_err(|e| anyhow::anyhow!("Failed to resolve {}: {}", uri, e))?;
        resources.extend(lookup.into_vec());
    }
    Ok(resources)
}

/// Locations shadowed by the effective one, oldest first
fn overridden_locations(resource: &Resource) -> &[String] {
    let history = resource.alternative_locations();
    match (resource.location(), history.split_last()) {
        (Some(_), Some((_, earlier))) => earlier,
        _ => history,
    }
}
