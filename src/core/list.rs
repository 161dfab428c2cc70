//! Table view of every record in the database

use std::io::Write;

use anyhow::Result;
use owo_colors::OwoColorize;
use tabled::{Table, Tabled};

use crate::core::record::Record;
use crate::infra::config::Settings;

#[derive(Tabled)]
struct Row {
    slugs: String,
    description: String,
    target: String,
    action: String,
}

impl From<&Record> for Row {
    fn from(record: &Record) -> Self {
        Self {
            slugs: record.slugs(),
            description: record.description.clone(),
            target: record.target.clone(),
            action: record.action.to_string(),
        }
    }
}

/// Render `records` as a table; empty string when there are none
pub fn render(records: &[Record]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let rows: Vec<Row> = records.iter().map(Row::from).collect();
    Table::new(rows).to_string()
}

pub fn run(records: &[Record], settings: &Settings, out: &mut dyn Write) -> Result<()> {
    if records.is_empty() {
        let msg = format!("No entries in {}", settings.database.display());
        if settings.color {
            writeln!(out, "{}", msg.dimmed())?;
        } else {
            writeln!(out, "{msg}")?;
        }
        return Ok(());
    }

    writeln!(out, "{}", render(records))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::parse_records;

    #[test]
    fn one_row_per_record() {
        let records = parse_records(
            "# comment\nhome,h | /tmp | Temp dir\ndb | myhost | Database | ssh\n",
        );
        let table = render(&records);

        assert!(table.contains("slugs"));
        assert!(table.contains("home,h"));
        assert!(table.contains("Temp dir"));
        assert!(table.contains("myhost"));
        assert!(table.contains("ssh"));
        assert!(!table.contains("comment"));
    }

    #[test]
    fn empty_database_says_so() {
        let settings = Settings::default();
        let mut out = Vec::new();
        run(&[], &settings, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("No entries in"));
    }
}
