//! Turning a matched record into a process hand-off
//!
//! The dispatcher builds a [`LaunchPlan`] and gives it to a [`Launcher`].
//! [`ExecLauncher`] replaces the current process image and only comes back
//! on failure; [`PrintLauncher`] writes the target to stdout for a shell
//! function to `cd`/`eval`.

use std::io::{self, Write};
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::Command;

use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use crate::core::record::{ActionKind, Record};
use crate::infra::config::Settings;

/// Fatal dispatch failures
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("cannot expand target {target}: {reason}")]
    Expand { target: String, reason: String },

    #[error("cannot enter directory {}: {source}", path.display())]
    Directory { path: PathBuf, source: io::Error },

    #[error("cannot run {program}: {source}")]
    Exec { program: String, source: io::Error },

    #[error("cannot report target: {0}")]
    Output(#[source] io::Error),
}

/// Result of handing a plan to a launcher.
///
/// `ExecLauncher` never produces `Replaced`: on success no code of this
/// process runs again.
#[derive(Debug)]
pub enum DispatchOutcome {
    Replaced,
    Failed(DispatchError),
}

/// A fully resolved process hand-off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    /// Absolute directory to enter first (Directory records only)
    pub workdir: Option<PathBuf>,
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchPlan {
    /// The `-c` payload, if this plan runs a command
    pub fn command_line(&self) -> Option<&str> {
        match self.args.as_slice() {
            [flag, line] if flag == "-c" => Some(line.as_str()),
            _ => None,
        }
    }
}

/// Performs a [`LaunchPlan`]
pub trait Launcher {
    fn launch(&mut self, plan: &LaunchPlan) -> DispatchOutcome;
}

/// Changes directory and replaces the process image
#[derive(Debug, Default)]
pub struct ExecLauncher;

impl Launcher for ExecLauncher {
    fn launch(&mut self, plan: &LaunchPlan) -> DispatchOutcome {
        if let Some(dir) = &plan.workdir
            && let Err(source) = std::env::set_current_dir(dir)
        {
            return DispatchOutcome::Failed(DispatchError::Directory {
                path: dir.clone(),
                source,
            });
        }

        debug!(program = %plan.program, args = ?plan.args, "exec");

        // exec only returns on failure
        let source = Command::new(&plan.program).args(&plan.args).exec();
        DispatchOutcome::Failed(DispatchError::Exec {
            program: plan.program.clone(),
            source,
        })
    }
}

/// Prints the directory (or command line) instead of exec'ing
#[derive(Debug)]
pub struct PrintLauncher<W: Write> {
    out: W,
}

impl<W: Write> PrintLauncher<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Launcher for PrintLauncher<W> {
    fn launch(&mut self, plan: &LaunchPlan) -> DispatchOutcome {
        let line = match (&plan.workdir, plan.command_line()) {
            (Some(dir), _) => dir.display().to_string(),
            (None, Some(cmd)) => cmd.to_string(),
            (None, None) => plan.program.clone(),
        };

        match writeln!(self.out, "{line}") {
            Ok(()) => DispatchOutcome::Replaced,
            Err(err) => DispatchOutcome::Failed(DispatchError::Output(err)),
        }
    }
}

/// Builds plans from records and hands them to a launcher
pub struct Dispatcher<'a, L: Launcher> {
    settings: &'a Settings,
    launcher: L,
}

impl<'a, L: Launcher> Dispatcher<'a, L> {
    pub fn new(settings: &'a Settings, launcher: L) -> Self {
        Self { settings, launcher }
    }

    pub fn into_launcher(self) -> L {
        self.launcher
    }

    /// Resolve `record` into a concrete plan without running anything
    pub fn plan(&self, record: &Record) -> Result<LaunchPlan, DispatchError> {
        let shell = self.settings.shell.clone();

        let plan = match &record.action {
            ActionKind::Directory => {
                let expanded =
                    shellexpand::full(&record.target).map_err(|e| DispatchError::Expand {
                        target: record.target.clone(),
                        reason: e.to_string(),
                    })?;
                let raw = PathBuf::from(expanded.as_ref());
                let dir = dunce::canonicalize(&raw)
                    .map_err(|source| DispatchError::Directory { path: raw, source })?;

                LaunchPlan {
                    workdir: Some(dir),
                    program: shell,
                    args: Vec::new(),
                }
            }
            ActionKind::Ssh => LaunchPlan {
                workdir: None,
                program: shell,
                args: vec!["-c".to_string(), format!("ssh {}", record.target)],
            },
            ActionKind::Exec { command } => LaunchPlan {
                workdir: None,
                program: shell,
                args: vec!["-c".to_string(), format!("{command} {}", record.target)],
            },
        };

        Ok(plan)
    }

    /// Report the record and hand off. Only returns on failure, or when the
    /// launcher does not replace the process.
    #[instrument(skip_all, fields(line = record.line))]
    pub fn dispatch(&mut self, record: &Record, out: &mut dyn Write) -> DispatchOutcome {
        let plan = match self.plan(record) {
            Ok(plan) => plan,
            Err(err) => return DispatchOutcome::Failed(err),
        };

        if record.action == ActionKind::Directory && !record.description.is_empty() {
            let shown = if self.settings.color {
                record.description.bold().to_string()
            } else {
                record.description.clone()
            };
            if let Err(err) = writeln!(out, "{shown}") {
                return DispatchOutcome::Failed(DispatchError::Output(err));
            }
        }

        debug!(?plan, "dispatching");
        self.launcher.launch(&plan)
    }
}
