//! Patch-directory input parsing
//!
//! Reads the commit list and the metadata files named by the active
//! [`Profile`](crate::config::Profile) and turns them into lookup tables.

use std::fmt;
use std::path::{Path, PathBuf};

pub mod inputs;
pub mod maps;
pub mod patterns;
pub mod table;

pub use inputs::{load_inputs, require_commit_list, Inputs, MetadataTables, ProvenanceTable};
pub use table::CommitTable;

/// A value together with the malformed lines skipped while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    pub diagnostics: Vec<LineDiagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The line does not match the file's grammar.
    Invalid { line: String },
    /// The line names no value and no earlier line supplied one.
    NothingToCarry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiagnostic {
    pub file: PathBuf,
    /// 1-based, counting skipped lines.
    pub line_nr: usize,
    pub kind: DiagnosticKind,
}

impl LineDiagnostic {
    pub fn invalid(file: &Path, line_nr: usize, line: &str) -> Self {
        Self {
            file: file.to_path_buf(),
            line_nr,
            kind: DiagnosticKind::Invalid { line: line.to_string() },
        }
    }

    pub fn nothing_to_carry(file: &Path, line_nr: usize) -> Self {
        Self { file: file.to_path_buf(), line_nr, kind: DiagnosticKind::NothingToCarry }
    }
}

impl fmt::Display for LineDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::Invalid { line } => {
                write!(f, "{}: invalid line at {}: \"{}\"", self.file.display(), self.line_nr, line)
            }
            DiagnosticKind::NothingToCarry => write!(
                f,
                "{}: bad line at {}. Nothing listed here or previously",
                self.file.display(),
                self.line_nr
            ),
        }
    }
}

/// Numbered lines with trailing whitespace trimmed, minus blanks and comments.
pub fn significant_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim_end()))
        .filter(|(_, line)| !patterns::SKIP.is_match(line))
}
