//! Exact alias lookup and fuzzy score accumulation

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::distance::{distance, prefix_match};
use crate::core::record::Record;

/// Best scores seen for one alias during a search pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AliasScore {
    /// Minimum edit distance divided by alias length.
    /// `None` for a zero-length alias, which cannot be ranked.
    pub distance: Option<f64>,
    /// Maximum common-prefix length
    pub prefix: usize,
}

impl AliasScore {
    fn merge(&mut self, other: AliasScore) {
        self.distance = match (self.distance, other.distance) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.prefix = self.prefix.max(other.prefix);
    }
}

/// Score `alias` against `term`. Distance is normalized by the alias
/// length, so short aliases rank ahead of long ones.
pub fn score(term: &str, alias: &str) -> AliasScore {
    let len = alias.chars().count();
    let normalized = (len > 0).then(|| distance(term, alias) as f64 / len as f64);

    AliasScore {
        distance: normalized,
        prefix: prefix_match(term, alias),
    }
}

/// Per-alias scores merged across every term and record of a pass.
/// Insertion order is kept so equal scores rank in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct ScoreBoard {
    scores: IndexMap<String, AliasScore>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score, keeping min distance and max prefix per alias
    pub fn observe(&mut self, alias: &str, score: AliasScore) {
        match self.scores.get_mut(alias) {
            Some(existing) => existing.merge(score),
            None => {
                self.scores.insert(alias.to_string(), score);
            }
        }
    }

    pub fn get(&self, alias: &str) -> Option<&AliasScore> {
        self.scores.get(alias)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Aliases by descending prefix length; ties keep first-seen order
    pub fn by_prefix(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .scores
            .iter()
            .map(|(alias, s)| (alias.as_str(), s.prefix))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Rankable aliases by ascending normalized distance
    pub fn by_distance(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .scores
            .iter()
            .filter_map(|(alias, s)| s.distance.map(|d| (alias.as_str(), d)))
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked
    }
}

/// An exact alias match
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub record: &'a Record,
    pub alias: &'a str,
}

/// Scan `records` in file order for an alias equal to `term`.
///
/// Every alias visited before the hit is scored into `board`. The first
/// exact match wins and stops the scan.
pub fn find<'a>(records: &'a [Record], term: &str, board: &mut ScoreBoard) -> Option<Hit<'a>> {
    debug!(term, "searching");

    for record in records {
        trace!(line = record.line, slugs = %record.slugs(), "checking row");

        for alias in &record.aliases {
            board.observe(alias, score(term, alias));

            if alias == term {
                debug!(term, line = record.line, "exact match");
                return Some(Hit {
                    record,
                    alias: alias.as_str(),
                });
            }
        }
    }

    None
}
