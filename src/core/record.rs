//! Database record parsing
//!
//! One record per line:
//!
//! ```text
//! alias1[,alias2,...] | target | description [| action]
//! ```
//!
//! Blank lines and lines starting with `#` or `%` are comments. Lines
//! without aliases or a target are skipped, never reported.

use std::fmt;

use tracing::trace;

/// Field separator inside a record line
pub const FIELD_SEPARATOR: char = '|';

/// Separator between aliases in field 0
pub const ALIAS_SEPARATOR: char = ',';

/// Literal in field 3 that selects an SSH session
pub const SSH_DISCRIMINATOR: &str = "ssh";

/// What happens once a record has been matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Open a shell inside `target`
    Directory,
    /// Open an SSH session to `target`
    Ssh,
    /// Run `command` with `target` as its argument string
    Exec { command: String },
}

impl ActionKind {
    /// Classify from the optional fourth field
    fn from_field(field: Option<&str>) -> Self {
        match field {
            None | Some("") => ActionKind::Directory,
            Some(SSH_DISCRIMINATOR) => ActionKind::Ssh,
            Some(command) => ActionKind::Exec {
                command: command.to_string(),
            },
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Directory => write!(f, "dir"),
            ActionKind::Ssh => write!(f, "ssh"),
            ActionKind::Exec { command } => write!(f, "exec: {command}"),
        }
    }
}

/// A parsed database line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub aliases: Vec<String>,
    pub target: String,
    pub description: String,
    pub action: ActionKind,
    /// 1-based line in the database file
    pub line: usize,
}

impl Record {
    /// Comma-joined aliases, as written in the file
    pub fn slugs(&self) -> String {
        self.aliases.join(",")
    }
}

/// True for blank lines and `#`/`%` comments
pub fn is_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%')
}

/// Parse one line. `line_no` is 1-based.
pub fn parse_line(line_no: usize, line: &str) -> Option<Record> {
    if is_comment(line) {
        return None;
    }

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();

    let (alias_field, target) = match fields.as_slice() {
        [aliases, target, ..] if !aliases.is_empty() && !target.is_empty() => (*aliases, *target),
        _ => {
            trace!(line = line_no, "skipping incomplete record");
            return None;
        }
    };

    let aliases = alias_field
        .split(ALIAS_SEPARATOR)
        .map(|alias| alias.trim().to_string())
        .collect();

    Some(Record {
        aliases,
        target: target.to_string(),
        description: fields.get(2).copied().unwrap_or_default().to_string(),
        action: ActionKind::from_field(fields.get(3).copied()),
        line: line_no,
    })
}

/// Parse a whole database, keeping file order
pub fn parse_records(content: &str) -> Vec<Record> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(idx + 1, line))
        .collect()
}
