#![forbid(unsafe_code)]

//! Human-readable output formatter
//!
//! Prints one block per file: a bold path header followed by one line per
//! caught line, colored by rule severity, or a green `passed!`.

use crate::engine::{ExecutionResult, FileReport};
use crate::types::Severity;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Human-readable formatter
pub struct HumanFormatter;

impl HumanFormatter {
    /// Creates a new HumanFormatter
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Write every file report followed by a summary line
    pub fn write<W: WriteColor>(&self, out: &mut W, result: &ExecutionResult) -> io::Result<()> {
        for report in &result.reports {
            self.write_report(out, report)?;
        }

        writeln!(out)?;
        let failed = result.files_failed();
        if failed == 0 {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        } else {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        }
        writeln!(
            out,
            "Checked {} file(s) with {} rule(s): {} failed",
            result.files_checked, result.rules_executed, failed
        )?;
        out.reset()
    }

    fn write_report<W: WriteColor>(&self, out: &mut W, report: &FileReport) -> io::Result<()> {
        writeln!(out)?;
        out.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(out, "{}", report.path.display())?;
        out.reset()?;

        let verdict = match &report.outcome {
            Ok(verdict) => verdict,
            Err(e) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                writeln!(out, "error: {}", e)?;
                return out.reset();
            }
        };

        if verdict.is_clean() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            writeln!(out, "passed!")?;
            return out.reset();
        }

        for finding in verdict.findings() {
            out.set_color(ColorSpec::new().set_fg(Some(severity_color(finding.rule.severity()))))?;
            for (number, text) in &finding.lines {
                writeln!(out, "{}, for line {}:\"{}\"", finding.rule, number, text)?;
            }
            out.reset()?;
        }

        Ok(())
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}
