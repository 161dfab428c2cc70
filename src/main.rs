use std::process::ExitCode;

use clap::Parser;
use gonav::app;
use gonav::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match app::run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            app::exit_code_for(&err)
        }
    }
}
