//! Inspect command implementation.

use super::Target;
use crate::convert::to_json;
use crate::report::CliResult;
use dblite_core::{Store, Value};
use dblite_storage::{FileBackend, SnapshotBackend};
use serde::Serialize;

/// Database inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Database path.
    pub path: String,
    /// Snapshot file size in bytes.
    pub size: u64,
    /// Whether the database is pin-protected.
    pub has_pin: bool,
    /// Per-field summaries in stored order.
    pub fields: Vec<FieldSummary>,
}

/// Summary of a single field.
#[derive(Debug, Serialize)]
pub struct FieldSummary {
    /// Field name.
    pub name: String,
    /// Field identity.
    pub identity: u64,
    /// Number of entries.
    pub entry_count: usize,
    /// Entries as JSON (if requested).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<serde_json::Value>,
}

/// Runs the inspect command.
pub fn run(target: &Target, show_entries: bool, format: &str) -> CliResult<()> {
    let store = target.connect()?;
    let size = FileBackend::new(&target.path).size()?;
    let result = inspect(&store, size, show_entries);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

/// Builds the inspection result for an open store.
pub fn inspect(store: &Store, size: u64, show_entries: bool) -> InspectResult {
    let fields = store
        .fields()
        .iter()
        .map(|field| FieldSummary {
            name: field.name().to_string(),
            identity: field.identity(),
            entry_count: field.size(),
            entries: show_entries.then(|| {
                serde_json::Value::Array(
                    field
                        .iter()
                        .map(|(id, value)| {
                            serde_json::json!({
                                "identifier": to_json(&Value::from(id.clone())),
                                "value": to_json(value),
                            })
                        })
                        .collect(),
                )
            }),
        })
        .collect();

    InspectResult {
        path: store.path().display().to_string(),
        size,
        has_pin: store.pin().is_some(),
        fields,
    }
}

fn print_text_output(result: &InspectResult) {
    println!("DBLite Database Inspection");
    println!("==========================");
    println!();
    println!("Path: {}", result.path);
    println!("Size: {}", format_size(result.size));
    println!("Pin:  {}", if result.has_pin { "set" } else { "none" });
    println!();
    println!("Fields ({}):", result.fields.len());
    for field in &result.fields {
        println!(
            "  {} [identity {}] {} entries",
            field.name, field.identity, field.entry_count
        );
        if let Some(serde_json::Value::Array(entries)) = &field.entries {
            for entry in entries {
                println!("    {} = {}", entry["identifier"], entry["value"]);
            }
        }
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} bytes")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
