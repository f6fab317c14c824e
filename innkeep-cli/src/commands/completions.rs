//! `innkeep completions <shell>`: the completion script on stdout, and a
//! short note on stderr about where to put it.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

const BIN_NAME: &str = "innkeep";

/// Where each shell picks up a saved script. Shells without an entry get
/// the script alone.
const INSTALL_HINTS: &[(Shell, &str)] = &[
    (
        Shell::Bash,
        "innkeep completions bash > ~/.local/share/bash-completion/completions/innkeep",
    ),
    (
        Shell::Zsh,
        "innkeep completions zsh > \"${fpath[1]}/_innkeep\"",
    ),
    (
        Shell::Fish,
        "innkeep completions fish > ~/.config/fish/completions/innkeep.fish",
    ),
    (
        Shell::PowerShell,
        "innkeep completions powershell | Out-String | Invoke-Expression",
    ),
];

fn install_hint(shell: Shell) -> Option<&'static str> {
    INSTALL_HINTS
        .iter()
        .find(|(candidate, _)| *candidate == shell)
        .map(|(_, hint)| *hint)
}

/// Print a shell completion script
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, _global: &GlobalOptions) -> Result<(), CliError> {
        if let Some(hint) = install_hint(self.shell) {
            eprintln!("# To install:\n#   {hint}\n");
        }

        generate(self.shell, &mut Cli::command(), BIN_NAME, &mut io::stdout());
        Ok(())
    }
}
