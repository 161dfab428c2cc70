//! **gonav** - Jump to directories, SSH hosts and commands by short slug
//!
//! A flat-file database maps slugs to targets. Lookup is exact first, then
//! forgiving: prefix disambiguation and weighted edit-distance suggestions.
//! A hit replaces the current process with a shell in the target.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Matching and dispatch engine
pub mod core {
    /// Database line parsing into records
    pub mod record;
    pub use record::{ActionKind, Record, parse_records};

    /// Weighted edit distance and common-prefix length
    pub mod distance;
    pub use distance::{distance, prefix_match};

    /// Exact lookup and per-alias score accumulation
    pub mod matcher;
    pub use matcher::{AliasScore, ScoreBoard};

    /// Process hand-off for matched records
    pub mod dispatch;
    pub use dispatch::{
        DispatchError, DispatchOutcome, Dispatcher, ExecLauncher, LaunchPlan, Launcher,
        PrintLauncher,
    };

    /// Search / disambiguate / suggest state machine
    pub mod resolver;
    pub use resolver::{Outcome, Resolver};

    /// Tabular listing of the database
    pub mod list;
}

/// Infrastructure - configuration, database file access, logging
pub mod infra {
    /// Layered configuration (TOML file + GONAV_ environment) and settings
    pub mod config;
    pub use config::{Config, Settings, Verbosity, load_config};

    /// Bootstrap, load and edit the database file
    pub mod database;
    pub use database::{ensure_exists, load_records};

    /// tracing-subscriber initialisation
    pub mod logging;
}

pub mod app;

// Strategic re-exports for clean CLI interface
pub use cli::{Cli, Mode};
pub use crate::core::{Outcome, Record, Resolver};
pub use infra::{Config, Settings, load_config};
