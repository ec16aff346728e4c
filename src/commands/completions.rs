//! # Completions Command Implementation
//!
//! Prints a completion script for the `vrepo` command line. The script covers
//! every subcommand (`dump`, `get`, `ls`, `tree`, `tags`) and their flags,
//! including the global `--color` values and the `--index`/`--mount` options
//! of the query commands.
//!
//! ## Example
//!
//! ```bash
//! vrepo completions bash > ~/.local/share/bash-completion/completions/vrepo
//! vrepo completions zsh > ~/.zfunc/_vrepo
//! vrepo completions fish > ~/.config/fish/completions/vrepo.fish
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io::{self, Write};

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let stdout = io::stdout();
    write_completions(args.shell, &mut stdout.lock());
    Ok(())
}

/// Write the completion script for `shell` to `out`
fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}
