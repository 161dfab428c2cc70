//! Interactive resolution of search terms
//!
//! States:
//! 1. Searching: every term through the matcher, one shared score board
//! 2. ExactHit: hand the record to the dispatcher
//! 3. Disambiguating: a strictly longest common prefix picks the alias
//! 4. Suggesting: list candidates, or ask "did you mean" for a single one
//! 5. NoMatch
//!
//! Disambiguation and an accepted suggestion re-enter Searching with a
//! single new term. The loop is bounded by [`MAX_HOPS`].

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::{debug, instrument, warn};

use crate::core::dispatch::{DispatchOutcome, Dispatcher, Launcher};
use crate::core::matcher::{self, ScoreBoard};
use crate::core::record::Record;
use crate::infra::config::Settings;

/// Upper bound on Searching re-entries per invocation
pub const MAX_HOPS: usize = 8;

/// How a resolution ended without a process hand-off failure
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A record was handed to the launcher
    Dispatched { alias: String, line: usize },
    /// Several candidates were printed; nothing was run
    Suggested(Vec<String>),
    /// The single suggestion was offered and refused
    Declined(String),
    /// Nothing matched and nothing was close enough
    NoMatch,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Dispatched { .. })
    }
}

/// What to do after a Searching pass without an exact hit
#[derive(Debug, PartialEq)]
enum Next {
    Retry(String),
    Done(Outcome),
}

/// Drives matcher and dispatcher for one invocation
pub struct Resolver<'a, L: Launcher, R: BufRead, W: Write> {
    settings: &'a Settings,
    dispatcher: Dispatcher<'a, L>,
    input: R,
    output: W,
}

impl<'a, L: Launcher, R: BufRead, W: Write> Resolver<'a, L, R, W> {
    pub fn new(settings: &'a Settings, launcher: L, input: R, output: W) -> Self {
        Self {
            settings,
            dispatcher: Dispatcher::new(settings, launcher),
            input,
            output,
        }
    }

    pub fn into_parts(self) -> (L, W) {
        (self.dispatcher.into_launcher(), self.output)
    }

    /// Resolve `terms` against `records`.
    ///
    /// A dispatch failure is returned as an error wrapping
    /// [`DispatchError`](crate::core::dispatch::DispatchError).
    #[instrument(skip_all, fields(terms = ?terms))]
    pub fn run(&mut self, records: &[Record], terms: &[String]) -> Result<Outcome> {
        let mut terms: Vec<String> = terms.to_vec();

        for hop in 0..MAX_HOPS {
            debug!(hop, ?terms, "searching");

            let mut board = ScoreBoard::new();
            for term in &terms {
                if let Some(hit) = matcher::find(records, term, &mut board) {
                    let alias = hit.alias.to_string();
                    let line = hit.record.line;

                    return match self.dispatcher.dispatch(hit.record, &mut self.output) {
                        DispatchOutcome::Replaced => Ok(Outcome::Dispatched { alias, line }),
                        DispatchOutcome::Failed(err) => Err(err.into()),
                    };
                }
            }

            match self.after_miss(&board)? {
                Next::Retry(alias) => terms = vec![alias],
                Next::Done(outcome) => return Ok(outcome),
            }
        }

        warn!(max = MAX_HOPS, "giving up after too many retries");
        Ok(Outcome::NoMatch)
    }

    fn after_miss(&mut self, board: &ScoreBoard) -> Result<Next> {
        if let Some(alias) = disambiguate(board) {
            let msg = self.paint(&format!("Auto-selecting '{alias}'"));
            writeln!(self.output, "{msg}")?;
            return Ok(Next::Retry(alias));
        }

        self.suggest(board)
    }

    fn suggest(&mut self, board: &ScoreBoard) -> Result<Next> {
        let wanted = self.settings.suggestions;
        let candidates: Vec<(&str, f64)> = board.by_distance().into_iter().take(wanted).collect();

        if candidates.is_empty() {
            return Ok(Next::Done(Outcome::NoMatch));
        }

        if wanted > 1 {
            writeln!(self.output, "Did you mean one of these?")?;
            for (alias, _) in &candidates {
                writeln!(self.output, "    {alias}")?;
            }
            let aliases = candidates.into_iter().map(|(a, _)| a.to_string()).collect();
            return Ok(Next::Done(Outcome::Suggested(aliases)));
        }

        let (alias, distance) = candidates[0];
        if distance >= self.settings.threshold {
            debug!(alias, distance, "best candidate above threshold");
            return Ok(Next::Done(Outcome::NoMatch));
        }

        let alias = alias.to_string();
        if self.confirm(&alias)? {
            Ok(Next::Retry(alias))
        } else {
            Ok(Next::Done(Outcome::Declined(alias)))
        }
    }

    /// Blocking yes/no prompt; EOF counts as no
    fn confirm(&mut self, alias: &str) -> Result<bool> {
        let question = self.paint(&format!("Did you mean '{alias}'?"));
        write!(self.output, "{question} [y/N] ")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input
            .read_line(&mut answer)
            .context("Failed to read answer")?;

        let answer = answer.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    fn paint(&self, text: &str) -> String {
        if self.settings.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Pick the alias with a strictly longer common prefix than the runner-up.
///
/// Only the top two candidates are compared, and there must be two.
pub fn disambiguate(board: &ScoreBoard) -> Option<String> {
    match board.by_prefix().as_slice() {
        [(best, best_len), (_, second_len), ..] if best_len != second_len && *best_len > 0 => {
            Some(best.to_string())
        }
        _ => None,
    }
}
