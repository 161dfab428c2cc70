use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Database used when neither flag, file nor environment names one
pub const DEFAULT_DATABASE: &str = "~/.gonav.data";

/// Config file looked up when `--config`/`GONAV_CONFIG` are absent
pub const DEFAULT_CONFIG_FILE: &str = "~/.gonav.toml";

/// Shell used when no shell is configured and `$SHELL` is unset
pub const DEFAULT_SHELL: &str = "bash";

/// Editor used when no editor is configured and `$EDITOR` is unset
pub const DEFAULT_EDITOR: &str = "vim";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "GONAV";

/// File/environment configuration layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Path of the slug database (`~` and `$VAR` are expanded)
    pub database: String,

    /// How many fuzzy suggestions to offer when nothing matches
    pub suggestions: usize,

    /// A single suggestion is only offered below this normalized distance
    pub threshold: f64,

    /// Shell used for dispatch (falls back to `$SHELL`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,

    /// Editor for `--edit` (falls back to `$EDITOR`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            suggestions: 1,
            threshold: 1.0,
            shell: None,
            editor: None,
        }
    }
}

/// Logging verbosity selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity
{
    #[default]
    Normal,
    Verbose,
    ExtraVerbose,
}

/// Immutable settings for one invocation, threaded through every component
#[derive(Debug, Clone)]
pub struct Settings
{
    pub database: PathBuf,
    pub suggestions: usize,
    pub threshold: f64,
    pub shell: String,
    pub editor: String,
    pub verbosity: Verbosity,
    pub color: bool,
}

impl Default for Settings
{
    fn default() -> Self
    {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            suggestions: 1,
            threshold: 1.0,
            shell: DEFAULT_SHELL.to_string(),
            editor: DEFAULT_EDITOR.to_string(),
            verbosity: Verbosity::Normal,
            color: false,
        }
    }
}

impl Settings
{
    /// Merge the file/env layer with command-line overrides
    pub fn resolve(
        cli: &Cli,
        config: Config,
    ) -> Result<Self>
    {
        let database = match &cli.database
        {
            Some(path) => path.clone(),
            None => expand_path(&config.database)?,
        };

        let verbosity = if cli.extra_verbose
        {
            Verbosity::ExtraVerbose
        }
        else if cli.verbose
        {
            Verbosity::Verbose
        }
        else
        {
            Verbosity::Normal
        };

        Ok(Self {
            database,
            suggestions: cli
                .suggestions
                .unwrap_or(config.suggestions),
            threshold: cli
                .threshold
                .unwrap_or(config.threshold),
            shell: config
                .shell
                .or_else(|| std::env::var("SHELL").ok())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SHELL.to_string()),
            editor: config
                .editor
                .or_else(|| std::env::var("EDITOR").ok())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_EDITOR.to_string()),
            verbosity,
            color: !cli.no_color && std::env::var_os("NO_COLOR").is_none(),
        })
    }
}

/// Expand `~` and `$VAR` in a user-supplied path
pub fn expand_path(raw: &str) -> Result<PathBuf>
{
    let expanded =
        shellexpand::full(raw).with_context(|| format!("Failed to expand path {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Where the config file lives: explicit path, `$GONAV_CONFIG`, or the default
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf>
{
    if let Some(path) = explicit
    {
        return Ok(path.to_path_buf());
    }

    match std::env::var("GONAV_CONFIG")
    {
        Ok(path) if !path.is_empty() => expand_path(&path),
        _ => expand_path(DEFAULT_CONFIG_FILE),
    }
}

pub fn load_config(path: &Path) -> Result<Config>
{
    let mut builder = config::Config::builder();

    if path.exists()
    {
        builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
    }

    // Add environment variables with GONAV_ prefix
    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("_")
            .try_parsing(true),
    );

    builder
        .build()
        .and_then(|layers| layers.try_deserialize::<Config>())
        .with_context(|| format!("Invalid gonav settings (file {}, GONAV_* env)", path.display()))
}

/// Write `Config::default()` as TOML to `path`
pub fn init(
    path: &Path,
    force: bool,
) -> Result<()>
{
    if path.exists() && !force
    {
        anyhow::bail!("{} already holds gonav settings; pass --force to replace them", path.display());
    }

    let body = toml::to_string_pretty(&Config::default()).context("Cannot render default settings")?;

    std::fs::write(path, body)
        .with_context(|| format!("Cannot write gonav settings to {}", path.display()))?;

    eprintln!("Wrote default gonav settings to {}", path.display());
    Ok(())
}
