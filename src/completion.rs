//! Shell completion generation using clap_complete.

use std::io::Write;

use anyhow::Result;
use clap::{Command, CommandFactory};
use clap_complete::{generate, Shell as CompletionShell};

use crate::cli::{Cli, Shell};

impl From<Shell> for CompletionShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => CompletionShell::Bash,
            Shell::Zsh => CompletionShell::Zsh,
            Shell::Fish => CompletionShell::Fish,
            Shell::PowerShell => CompletionShell::PowerShell,
            Shell::Elvish => CompletionShell::Elvish,
        }
    }
}

pub fn run(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd: Command = Cli::command();
    generate(CompletionShell::from(shell), &mut cmd, "gn", out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_completion_mentions_flags() {
        let mut out = Vec::new();
        run(Shell::Bash, &mut out).unwrap();
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("--database"));
        assert!(script.contains("gn"));
    }
}
