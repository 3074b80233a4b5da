// src/utils/log.rs

//! Console output for result listings and detail views.
//!
//! Diagnostics go through the `log` facade; this module prints what the
//! user asked to see, as timestamped, levelled lines.

use std::sync::OnceLock;

use chrono::Local;

use crate::models::ChemicalRecord;

/// Descriptors shown per row in result listings
pub const LIST_DESCRIPTORS: usize = 3;
/// Sources shown per row in result listings
pub const LIST_SOURCES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

static LOG_LEVEL: OnceLock<LogLevel> = OnceLock::new();

/// Set the console level from a level name. Only the first call counts.
pub fn init(level: &str) {
    let _ = LOG_LEVEL.set(LogLevel::parse(level));
}

fn enabled(level: LogLevel) -> bool {
    level >= LOG_LEVEL.get().copied().unwrap_or(LogLevel::Info)
}

fn format_line(level: LogLevel, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{}] [{}] {}", timestamp, level.as_str(), message)
}

fn emit(level: LogLevel, message: &str) {
    if !enabled(level) {
        return;
    }
    match level {
        LogLevel::Info => println!("{}", format_line(level, message)),
        _ => eprintln!("{}", format_line(level, message)),
    }
}

pub fn info(message: &str) {
    emit(LogLevel::Info, message);
}

pub fn error(message: &str) {
    emit(LogLevel::Error, message);
}

/// Advisory shown alongside results (truncation, render failures).
pub fn notice(message: &str) {
    emit(LogLevel::Warn, &format!("[NOTICE] {}", message));
}

pub fn header(title: &str) {
    let border = "═".repeat(60);
    info(&border);
    info(&format!("  {}", title));
    info(&border);
}

/// Indented line below a header.
pub fn item(message: &str) {
    info(&format!("    {}", message));
}

/// Titled block of `key: value` lines.
pub fn summary(title: &str, items: &[(&str, String)]) {
    if !enabled(LogLevel::Info) {
        return;
    }
    println!();
    info(&format!("[SUMMARY] {}", title));
    for (key, value) in items {
        item(&format!("{}: {}", key, value));
    }
}

/// One result row: the line template with `{url}` pointing at `reference_template`.
pub fn record_line(record: &ChemicalRecord, template: &str, reference_template: &str) -> String {
    record.format_with(template, reference_template)
}

/// Row used when no template is configured.
pub fn record_row(record: &ChemicalRecord) -> String {
    format!(
        "{:<12} {}  [{}]  ({})",
        record.display_id(),
        record.name,
        record.descriptor_preview(LIST_DESCRIPTORS),
        record.source_preview(LIST_SOURCES)
    )
}

/// Labelled fields of the record detail view.
pub fn record_fields(record: &ChemicalRecord, reference_template: &str) -> Vec<(&'static str, String)> {
    let or_none = |items: &[String]| {
        if items.is_empty() {
            "(none)".to_string()
        } else {
            items.join(", ")
        }
    };

    vec![
        ("ID", record.display_id()),
        ("Name", record.name.clone()),
        ("SMILES", record.structure.clone()),
        ("Descriptors", or_none(&record.descriptors)),
        ("Sources", or_none(&record.sources)),
        ("Reference", record.reference_url(reference_template)),
    ]
}

/// Common descriptors offered when a search finds nothing.
pub const SUGGESTED_DESCRIPTORS: [&str; 4] = ["sweet", "fruity", "floral", "woody"];

/// Line pointing at broad odor searches.
pub fn suggestion_hint() -> String {
    format!(
        "Try different search terms or browse by odor: {}",
        SUGGESTED_DESCRIPTORS
            .iter()
            .map(|d| format!("odor {d}"))
            .collect::<Vec<_>>()
            .join(" | ")
    )
}

/// Empty-result view.
pub fn no_results(mode: &str, query: &str) {
    info(&format!("No {} results for '{}'", mode, query));
    item(&suggestion_hint());
}

/// Hint printed under a partially revealed listing.
pub fn more_hint(remaining: usize, next_batch: usize) -> String {
    format!("{} more results ({} in the next batch)", remaining, next_batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vanillin() -> ChemicalRecord {
        ChemicalRecord {
            id: 1183,
            name: "Vanillin".to_string(),
            structure: "COC1=C(C=CC(=C1)C=O)O".to_string(),
            descriptors: ["vanilla", "sweet", "creamy", "balsamic"]
                .map(String::from)
                .to_vec(),
            sources: vec![],
        }
    }

    #[test]
    fn test_level_ordering_and_parse() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::parse("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::parse("verbose"), LogLevel::Info);
    }

    #[test]
    fn test_format_line_contains_level() {
        let line = format_line(LogLevel::Warn, "render failed");
        assert!(line.ends_with("[WARN] render failed"));
    }

    #[test]
    fn test_record_line_uses_reference_template() {
        let line = record_line(
            &vanillin(),
            "{cid} {name} {url}",
            "https://example.org/c/{cid}",
        );
        assert_eq!(line, "CID_1183 Vanillin https://example.org/c/1183");
    }

    #[test]
    fn test_record_row_previews() {
        let row = record_row(&vanillin());
        assert!(row.starts_with("CID_1183"));
        assert!(row.contains("[vanilla, sweet, creamy +1]"));
        assert!(row.ends_with("()"));
    }

    #[test]
    fn test_suggestion_hint_lists_broad_descriptors() {
        let hint = suggestion_hint();
        for descriptor in SUGGESTED_DESCRIPTORS {
            assert!(hint.contains(&format!("odor {descriptor}")));
        }
        assert!(hint.starts_with("Try different search terms"));
    }

    #[test]
    fn test_record_fields() {
        let fields = record_fields(&vanillin(), "https://pubchem.ncbi.nlm.nih.gov/compound/{cid}");
        assert_eq!(fields[0], ("ID", "CID_1183".to_string()));
        assert_eq!(fields[4], ("Sources", "(none)".to_string()));
        assert_eq!(
            fields[5].1,
            "https://pubchem.ncbi.nlm.nih.gov/compound/1183"
        );
    }
}
