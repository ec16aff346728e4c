//! # Output Configuration
//!
//! This module controls how the CLI renders resources, including whether
//! directories are highlighted with color.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control ([`ColorChoice`])
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;
use std::ffi::OsString;

use clap::ValueEnum;
use console::style;

use crate::resource::Resource;

/// When to colorize output, as given to `--color`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    Always,
    Never,
    #[default]
    Auto,
}

/// Output configuration for controlling colors.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve a color choice against the environment.
    ///
    /// `Always` and `Never` win over every variable. In `Auto` mode `NO_COLOR`
    /// and `TERM=dumb` switch colors off; otherwise `console` decides from
    /// `CLICOLOR`, `CLICOLOR_FORCE` and whether stdout is a terminal.
    pub fn new(choice: ColorChoice) -> Self {
        let use_color = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => !disabled_by_env(|k| env::var_os(k)) && console::colors_enabled(),
        };

        Self { use_color }
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self::new(ColorChoice::Always)
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self::new(ColorChoice::Never)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(ColorChoice::default())
    }
}

/// The variables `console` does not look at
fn disabled_by_env<F>(var: F) -> bool
where
    F: Fn(&str) -> Option<OsString>,
{
    // https://no-color.org/: any value, even empty
    var("NO_COLOR").is_some() || var("TERM").is_some_and(|term| term == "dumb")
}

/// Render a repository path, highlighting directories when colors are on.
///
/// Directories get a trailing `/` either way so that plain output stays
/// unambiguous.
pub fn display_path(config: &OutputConfig, resource: &Resource) -> String {
    let path = resource.repository_path();

    if !resource.is_directory() {
        return path.to_string();
    }

    let label = if path == "/" {
        path.to_string()
    } else {
        format!("{}/", path)
    };

    if config.use_color {
        style(label).blue().bold().force_styling(true).to_string()
    } else {
        label
    }
}

/// Render the physical location of a resource, `-` for unbound directories.
pub fn display_location(resource: &Resource) -> &str {
    resource.location().unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<OsString> {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| OsString::from(value))
        }
    }

    #[test]
    fn test_color_always() {
        assert!(OutputConfig::new(ColorChoice::Always).use_color);
    }

    #[test]
    fn test_color_never() {
        assert!(!OutputConfig::new(ColorChoice::Never).use_color);
    }

    #[test]
    fn test_no_color_disables_even_when_empty() {
        assert!(disabled_by_env(vars(&[("NO_COLOR", "")])));
        assert!(disabled_by_env(vars(&[("NO_COLOR", "1")])));
    }

    #[test]
    fn test_dumb_terminal_disables() {
        assert!(disabled_by_env(vars(&[("TERM", "dumb")])));
        assert!(!disabled_by_env(vars(&[("TERM", "xterm-256color")])));
    }

    #[test]
    fn test_empty_environment_leaves_choice_to_console() {
        assert!(!disabled_by_env(vars(&[])));
        assert!(!disabled_by_env(vars(&[("CLICOLOR_FORCE", "1")])));
    }

    #[test]
    fn test_color_choice_values() {
        assert_eq!(ColorChoice::from_str("never", true), Ok(ColorChoice::Never));
        assert_eq!(ColorChoice::from_str("ALWAYS", true), Ok(ColorChoice::Always));
        assert!(ColorChoice::from_str("sometimes", true).is_err());
    }

    #[test]
    fn test_display_path_without_color() {
        let config = OutputConfig::without_color();
        assert_eq!(
            display_path(&config, &Resource::directory("/webmozart", None)),
            "/webmozart/"
        );
        assert_eq!(display_path(&config, &Resource::directory("/", None)), "/");
        assert_eq!(
            display_path(&config, &Resource::file("/webmozart/file1", "x")),
            "/webmozart/file1"
        );
    }

    #[test]
    fn test_display_path_with_color() {
        let config = OutputConfig::with_color();
        let rendered = display_path(&config, &Resource::directory("/webmozart", None));
        assert!(rendered.contains("/webmozart/"));
        assert!(rendered.contains('\u{1b}'));
    }

    #[test]
    fn test_display_location() {
        assert_eq!(display_location(&Resource::directory("/a", None)), "-");
        assert_eq!(display_location(&Resource::file("/a", "res/a")), "res/a");
    }
}
