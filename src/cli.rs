//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use vrepo::output::{ColorChoice, OutputConfig};

use crate::commands;

/// vrepo - Compile and query virtual resource repositories
#[derive(Parser, Debug)]
#[command(name = "vrepo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output
    #[arg(long, global = true, value_name = "WHEN", value_enum, default_value = "auto")]
    color: ColorChoice,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a manifest into an index directory
    Dump(commands::dump::DumpArgs),

    /// Resolve paths, patterns or URIs
    Get(commands::get::GetArgs),

    /// List the direct children of a directory
    Ls(commands::ls::LsArgs),

    /// Display the repository as a tree
    Tree(commands::tree::TreeArgs),

    /// List tags, or the resources carrying a tag
    Tags(commands::tags::TagsArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::new(self.color);

        match self.command {
            Commands::Dump(args) => commands::dump::execute(args),
            Commands::Get(args) => commands::get::execute(args, &output),
            Commands::Ls(args) => commands::ls::execute(args, &output),
            Commands::Tree(args) => commands::tree::execute(args),
            Commands::Tags(args) => commands::tags::execute(args, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Route `log` records to stderr; `RUST_LOG` takes precedence over the flag.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under tests
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
