use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gn")]
#[command(about = "Jump to directories, hosts and commands by short slug")]
#[command(version, long_about = None)]
#[command(group(
    ArgGroup::new("mode")
        .args(["edit", "list", "completions", "init_config"])
        .multiple(false)
))]
pub struct Cli {
    /// Slugs to look up, tried in order
    pub terms: Vec<String>,

    /// Database file (default: ~/.gonav.data)
    #[arg(short = 'd', long = "database", value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Edit the database with $EDITOR
    #[arg(short, long)]
    pub edit: bool,

    /// List every entry in the database
    #[arg(short, long)]
    pub list: bool,

    /// Print the resolved directory or command instead of running it
    #[arg(short, long)]
    pub print: bool,

    /// Number of suggestions offered when nothing matches
    #[arg(short = 'n', long, value_name = "N")]
    pub suggestions: Option<usize>,

    /// Only offer a single suggestion below this normalized distance
    #[arg(short, long, value_name = "DISTANCE")]
    pub threshold: Option<f64>,

    /// Output more information
    #[arg(short, long)]
    pub verbose: bool,

    /// Output even more information
    #[arg(short = 'w', long)]
    pub extra_verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Configuration file (default: $GONAV_CONFIG or ~/.gonav.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print shell completions to stdout
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Write a default configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Overwrite an existing configuration file
    #[arg(long, requires = "init_config")]
    pub force: bool,
}

/// What one invocation does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Search,
    Edit,
    List,
    Completions(Shell),
    InitConfig,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if let Some(shell) = self.completions {
            Mode::Completions(shell)
        } else if self.init_config {
            Mode::InitConfig
        } else if self.edit {
            Mode::Edit
        } else if self.list {
            Mode::List
        } else {
            Mode::Search
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
