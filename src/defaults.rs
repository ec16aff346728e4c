//! Default values for vrepo.
//!
//! This module provides centralized default values used by the library and
//! the CLI, ensuring consistency and avoiding duplication.

/// Default manifest file name read by `vrepo dump`.
pub const DEFAULT_MANIFEST_FILENAME: &str = "vrepo.yaml";

/// Default directory holding a dumped index.
///
/// Can be overridden by the `--index` CLI flag or the `VREPO_INDEX`
/// environment variable.
pub const DEFAULT_INDEX_DIR: &str = ".vrepo";

/// Document mapping file paths to their effective location.
pub const FILE_PATHS_FILE: &str = "resources_file_paths.json";

/// Document mapping directory paths to their effective location or `null`.
pub const DIR_PATHS_FILE: &str = "resources_dir_paths.json";

/// Document mapping overridden paths to their prior locations.
pub const ALTERNATIVE_PATHS_FILE: &str = "resources_alt_paths.json";

/// Document mapping tag names to tagged paths.
pub const TAGS_FILE: &str = "resources_tags.json";
