//! Mode dispatch for the `gn` binary

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Result;
use tracing::debug;

use crate::cli::{Cli, Mode};
use crate::completion;
use crate::core::dispatch::{DispatchError, ExecLauncher, Launcher, PrintLauncher};
use crate::core::list;
use crate::core::record::Record;
use crate::core::resolver::{Outcome, Resolver};
use crate::infra::config::{self, Settings};
use crate::infra::{database, logging};

/// No match, declined suggestion, or a generic failure
pub const EXIT_NO_MATCH: u8 = 1;
/// The matched target could not be entered or run
pub const EXIT_DISPATCH_FAILED: u8 = 2;

/// Exit status for an error that escaped `run`
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    if err.downcast_ref::<DispatchError>().is_some() {
        ExitCode::from(EXIT_DISPATCH_FAILED)
    } else {
        ExitCode::from(EXIT_NO_MATCH)
    }
}

pub fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = config::config_path(cli.config.as_deref())?;

    if let Mode::InitConfig = cli.mode() {
        config::init(&config_path, cli.force)?;
        return Ok(ExitCode::SUCCESS);
    }

    let file_config = config::load_config(&config_path)?;
    let settings = Settings::resolve(&cli, file_config)?;
    logging::init(settings.verbosity);
    debug!(?settings, "settings resolved");

    match cli.mode() {
        Mode::Completions(shell) => {
            completion::run(shell, &mut io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
        Mode::Edit => {
            database::edit(&settings.database, &settings.editor, &settings.shell)?;
            Ok(ExitCode::SUCCESS)
        }
        Mode::List => {
            let records = database::load_records(&settings.database)?;
            list::run(&records, &settings, &mut io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
        // Written before the config file is read
        Mode::InitConfig => Ok(ExitCode::SUCCESS),
        Mode::Search => search(&settings, &cli.terms, cli.print),
    }
}

fn search(settings: &Settings, terms: &[String], print: bool) -> Result<ExitCode> {
    let records = database::load_records(&settings.database)?;

    if terms.is_empty() {
        eprintln!("No slug given. Use --list to see the database.");
        return Ok(ExitCode::from(EXIT_NO_MATCH));
    }

    let stdin = io::stdin();
    let outcome = if print {
        resolve(settings, PrintLauncher::new(io::stdout()), stdin.lock(), &records, terms)?
    } else {
        resolve(settings, ExecLauncher, stdin.lock(), &records, terms)?
    };

    debug!(?outcome, "resolution finished");
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_NO_MATCH)
    })
}

fn resolve<L: Launcher, R: BufRead>(
    settings: &Settings,
    launcher: L,
    input: R,
    records: &[Record],
    terms: &[String],
) -> Result<Outcome> {
    let mut stderr = io::stderr();
    let outcome = Resolver::new(settings, launcher, input, &mut stderr).run(records, terms)?;
    stderr.flush()?;
    Ok(outcome)
}
