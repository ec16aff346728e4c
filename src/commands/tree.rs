//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays the virtual
//! repository below a directory in a hierarchical format.
//!
//! ## Functionality
//!
//! - **Repository Tree Visualization**: Walks the index through the locator's
//!   directory listings
//! - **Depth Control**: Supports `--depth` flag to limit tree depth
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};

use vrepo::locator::{CompiledLocator, ResourceLocator};
use vrepo::resource::Resource;

use super::IndexArgs;

/// Display the repository as a tree
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Directory to start from
    #[arg(value_name = "PATH", default_value = "/")]
    pub path: String,

    #[command(flatten)]
    pub index: IndexArgs,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the starting directory.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs) -> Result<()> {
    let mut locator = args.index.open()?;
    let root = locator
        .get_path(&args.path)
        .map_err(|e| anyhow::anyhow!("Cannot display {}: {}", args.path, e))?;

    let tree_root = build_tree_node(
        &mut locator,
        &root,
        args.depth.unwrap_or(usize::MAX),
        0,
    )?;
    print_tree(&tree_root).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;

    Ok(())
}

/// Build a tree node from a resource and its descendants
fn build_tree_node(
    locator: &mut CompiledLocator,
    resource: &Resource,
    max_depth: usize,
    current_depth: usize,
) -> Result<TreeNode> {
    let label = node_label(resource);

    if !resource.is_directory() || current_depth >= max_depth {
        return Ok(TreeNode {
            label,
            children: vec![],
        });
    }

    let children = resource
        .children(locator)?
        .iter()
        .map(|child| build_tree_node(locator, child, max_depth, current_depth + 1))
        .collect::<Result<Vec<_>>>()?;

    Ok(TreeNode { label, children })
}

fn node_label(resource: &Resource) -> String {
    match (resource.repository_path(), resource.is_directory()) {
        ("/", _) => "/".to_string(),
        (_, true) => format!("{}/", resource.name()),
        (_, false) => resource.name().to_string(),
    }
}

/// Tree node structure for ptree visualization
#[derive(Clone, Debug, PartialEq)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}
