//! Database file access: bootstrap, whole-file load, and `$EDITOR` hand-off.
//!
//! The file is re-read on every invocation; nothing is cached.

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{debug, instrument, warn};

use crate::core::record::{Record, parse_records};

/// Written to a freshly created database
pub const HEADER: &str =
    "# Put entries below here with [slug | path | description | (optional) ssh or command]\n";

/// Create the database with a header comment if it does not exist.
/// Returns true when the file was created.
pub fn ensure_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    debug!(path = %path.display(), "database missing, creating it");

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    fs::write(path, HEADER)
        .with_context(|| format!("Failed to create database {}", path.display()))?;

    Ok(true)
}

/// Bootstrap if needed, then parse every record.
///
/// An unreadable file is treated like a missing one: no records. Invalid
/// UTF-8 is replaced per character so one bad line keeps the rest usable.
#[instrument]
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    ensure_exists(path)?;

    match fs::read(path) {
        Ok(bytes) => {
            let content = String::from_utf8_lossy(&bytes);
            if matches!(content, Cow::Owned(_)) {
                warn!(path = %path.display(), "database is not valid UTF-8, bad bytes replaced");
            }
            let records = parse_records(&content);
            debug!(count = records.len(), "parsed records");
            Ok(records)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "database unreadable, treating as empty");
            Ok(Vec::new())
        }
    }
}

/// Open the database in `editor`, run through `shell -c` like a user would type it
pub fn edit(path: &Path, editor: &str, shell: &str) -> Result<()> {
    ensure_exists(path)?;

    debug!(editor, path = %path.display(), "starting editor");

    // Path travels as $1 so it never needs quoting
    let status = Command::new(shell)
        .arg("-c")
        .arg(format!("{editor} \"$1\""))
        .arg(shell)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to start editor {editor}"))?;

    if !status.success() {
        anyhow::bail!("Editor {editor} exited with {status}");
    }

    eprintln!("Database file {} updated.", path.display());
    Ok(())
}
