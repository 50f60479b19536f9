#![forbid(unsafe_code)]

//! Inventory model
//!
//! An [`Inventory`] is built once from a whole file and never changes
//! afterwards. Every view (raw lines, group headers, bare hosts, whole text)
//! is computed at construction from the same ordered line set.

use crate::error::InventoryError;
use crate::types::GroupMatching;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Marks a comment line
const COMMENT_MARKER: char = '#';

/// Marks a `key=value` variable line
const ASSIGNMENT_MARKER: char = '=';

/// A parsed inventory file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    path: PathBuf,
    /// Raw lines with terminators; line N lives at index N - 1
    lines: Vec<String>,
    /// Line numbers classified as group headers, ascending
    groups: Vec<usize>,
    /// Line numbers classified as bare hosts, ascending
    hosts: Vec<usize>,
    whole_text: String,
    /// Cumulative byte length through each line; `line_ends[i]` is the
    /// exclusive end offset of line `i + 1` inside `whole_text`
    line_ends: Vec<usize>,
}

impl Inventory {
    /// Read and parse the inventory at `path`
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::NotFound` when the path does not exist and
    /// `InventoryError::Read` for any other read failure. No partial model
    /// is ever returned.
    pub fn from_path(path: &Path, matching: GroupMatching) -> Result<Self, InventoryError> {
        let content =
            fs::read_to_string(path).map_err(|e| InventoryError::from_io(path, e))?;
        Ok(Self::parse(path, &content, matching))
    }

    /// Parse inventory text that has already been read
    pub fn parse(path: impl Into<PathBuf>, content: &str, matching: GroupMatching) -> Self {
        let path = path.into();
        let lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();

        let mut groups = Vec::new();
        let mut hosts = Vec::new();
        for (idx, raw) in lines.iter().enumerate() {
            let number = idx + 1;
            let text = line_content(raw);
            if matching.is_group_header(text) {
                groups.push(number);
            } else if is_host_candidate(text) {
                hosts.push(number);
            }
        }

        // A group header may come before or after a bare reference to its
        // name, so reconciliation runs only once classification is complete.
        let group_names: HashSet<String> = groups
            .iter()
            .map(|&number| group_name(&lines[number - 1]))
            .collect();
        hosts.retain(|&number| !group_names.contains(lines[number - 1].trim()));

        let mut line_ends = Vec::with_capacity(lines.len());
        let mut total = 0;
        for raw in &lines {
            total += raw.len();
            line_ends.push(total);
        }
        let whole_text = lines.concat();

        tracing::debug!(
            path = %path.display(),
            lines = lines.len(),
            groups = groups.len(),
            hosts = hosts.len(),
            "parsed inventory"
        );

        Inventory {
            path,
            lines,
            groups,
            hosts,
            whole_text,
            line_ends,
        }
    }

    /// Path the inventory was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of physical lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Raw text of a 1-based line number, terminator included
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }

    /// Every physical line as `(line number, raw text)`, in file order
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .map(|(idx, raw)| (idx + 1, raw.as_str()))
    }

    /// Group header lines as `(line number, raw text)`, in file order
    pub fn groups(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.view(&self.groups)
    }

    /// Bare host lines as `(line number, raw text)`, in file order
    pub fn hosts(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.view(&self.hosts)
    }

    /// All lines concatenated in order, terminators included
    pub fn whole_text(&self) -> &str {
        &self.whole_text
    }

    /// Line number containing byte `offset` of [`Inventory::whole_text`]
    ///
    /// Returns None when the offset is at or past the end of the text.
    pub fn line_at_offset(&self, offset: usize) -> Option<usize> {
        let idx = self.line_ends.partition_point(|&end| end <= offset);
        (idx < self.line_ends.len()).then_some(idx + 1)
    }

    fn view<'a>(&'a self, numbers: &'a [usize]) -> impl Iterator<Item = (usize, &'a str)> + 'a {
        numbers
            .iter()
            .map(move |&number| (number, self.lines[number - 1].as_str()))
    }
}

/// Strip a trailing `\n` or `\r\n` from a raw line
pub fn line_content(raw: &str) -> &str {
    let text = raw.strip_suffix('\n').unwrap_or(raw);
    text.strip_suffix('\r').unwrap_or(text)
}

fn is_host_candidate(text: &str) -> bool {
    !text.trim().is_empty() && !text.contains(COMMENT_MARKER) && !text.contains(ASSIGNMENT_MARKER)
}

fn group_name(raw: &str) -> String {
    raw.trim().replace(['[', ']'], "").trim().to_string()
}
