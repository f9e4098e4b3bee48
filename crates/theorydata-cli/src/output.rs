//! Printable views of generated rows.
//!
//! These are Data Transfer Objects shaped for the table printer and for
//! `--json` output.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use theorydata_core::{ArgsMode, FileCase, Metadata, Param, Row};

// =============================================================================
// Rows
// =============================================================================

/// The rows generated from one case file.
#[derive(Debug, Serialize)]
pub struct FileRows {
    pub path: String,
    pub rows: Vec<RowView>,
}

/// One generated row.
#[derive(Debug, Serialize)]
pub struct RowView {
    pub case_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub mode: ArgsMode,
    pub include_expected: bool,
    pub params: Vec<Value>,
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl FileRows {
    pub fn new(path: &Path, rows: &[Row<FileCase>]) -> Self {
        Self {
            path: path.display().to_string(),
            rows: rows.iter().map(RowView::from).collect(),
        }
    }

    pub fn print_table(&self) {
        println!("{} ({} rows)", self.path, self.rows.len());
        for row in &self.rows {
            let name = row.display_name.as_deref().unwrap_or(&row.case_name);
            let params: Vec<String> = row.params.iter().map(Value::to_string).collect();
            println!("  {}  [{}]", name, params.join(", "));

            let notes = metadata_notes(&row.metadata);
            if !notes.is_empty() {
                println!("      {}", notes.join("; "));
            }
        }
    }
}

impl From<&Row<FileCase>> for RowView {
    fn from(row: &Row<FileCase>) -> Self {
        Self {
            case_name: row.case_name().to_string(),
            display_name: row.display_name().map(str::to_string),
            mode: row.strategy().mode,
            include_expected: row.strategy().include_expected,
            params: row.params().iter().map(param_value).collect(),
            metadata: row.metadata().clone(),
        }
    }
}

/// JSON form of a parameter. A whole-object row carries the case itself.
fn param_value(param: &Param) -> Value {
    if let Some(value) = param.downcast_ref::<Value>() {
        return value.clone();
    }
    if let Some(case) = param.downcast_ref::<FileCase>() {
        if let Ok(value) = serde_json::to_value(case) {
            return value;
        }
    }
    Value::String(format!("{:?}", param))
}

fn metadata_notes(metadata: &Metadata) -> Vec<String> {
    let mut notes = Vec::new();
    if let Some(reason) = &metadata.skip {
        notes.push(format!("skip: {}", reason));
    }
    if metadata.explicit == Some(true) {
        notes.push("explicit".to_string());
    }
    if let Some(timeout) = metadata.timeout_ms {
        notes.push(format!("timeout: {}ms", timeout));
    }
    for (name, values) in &metadata.traits {
        let values: Vec<&str> = values.iter().map(String::as_str).collect();
        notes.push(format!("{}: {}", name, values.join(", ")));
    }
    notes
}

// =============================================================================
// Check
// =============================================================================

/// Validation result of one case file.
#[derive(Debug, Serialize)]
pub struct CheckSummary {
    pub path: String,
    pub cases: usize,
    pub rows: usize,
    pub duplicates: usize,
}

impl CheckSummary {
    pub fn print_line(&self) {
        println!(
            "ok     {} ({} cases, {} rows, {} duplicates dropped)",
            self.path, self.cases, self.rows, self.duplicates
        );
    }
}
