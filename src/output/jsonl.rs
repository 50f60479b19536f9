#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line in a deterministic order:
//! 1. All finding records (by file, then rule order, then line)
//! 2. One file record per file
//! 3. One status record

use crate::engine::ExecutionResult;
use serde::Serialize;
use std::path::PathBuf;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format the execution result as JSONL
    pub fn format(&self, result: &ExecutionResult) -> String {
        let mut records: Vec<String> = Vec::new();

        for report in &result.reports {
            let Ok(verdict) = &report.outcome else {
                continue;
            };
            for finding in verdict.findings() {
                for (line, text) in &finding.lines {
                    push_record(
                        &mut records,
                        &FindingRecord {
                            record_type: "finding",
                            file: report.path.clone(),
                            rule: finding.rule.to_string(),
                            number: finding.rule.number().to_string(),
                            severity: finding.rule.severity().label(),
                            scope: finding.rule.scope().as_str(),
                            line: *line,
                            text: text.clone(),
                        },
                    );
                }
            }
        }

        for report in &result.reports {
            push_record(
                &mut records,
                &FileRecord {
                    record_type: "file",
                    path: report.path.clone(),
                    passed: !report.has_errors() && !report.failed_to_load(),
                    error: report.outcome.as_ref().err().map(|e| e.to_string()),
                },
            );
        }

        push_record(
            &mut records,
            &StatusRecord {
                record_type: "status",
                passed: result.files_failed() == 0,
                files_checked: result.files_checked as u64,
                files_failed: result.files_failed() as u64,
                rules_checked: result.rules_executed as u64,
                total_findings: result.total_findings() as u64,
            },
        );

        records.join("")
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_record<T: Serialize>(records: &mut Vec<String>, record: &T) {
    if let Ok(json) = serde_json::to_string(record) {
        records.push(json + "\n");
    }
}

/// Finding record for JSONL output
#[derive(Debug, Serialize)]
struct FindingRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    file: PathBuf,
    rule: String,
    number: String,
    severity: &'static str,
    scope: &'static str,
    line: usize,
    text: String,
}

/// Per-file record for JSONL output
#[derive(Debug, Serialize)]
struct FileRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    path: PathBuf,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Final status record for JSONL output
#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    files_checked: u64,
    files_failed: u64,
    rules_checked: u64,
    total_findings: u64,
}
