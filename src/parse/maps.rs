//! Parsers for the individual input files
//!
//! Each parser is a pure function of the file contents. Malformed lines are
//! returned as diagnostics and otherwise ignored.

use std::path::Path;

use super::patterns::{TokenPatterns, COMMIT_LINE, PROVENANCE_LINE};
use super::table::CommitTable;
use super::{significant_lines, LineDiagnostic, Parsed};
use crate::domain::CommitRef;

/// `upstream-commits.txt`: one commit per line, duplicates kept.
pub fn parse_commit_list(file: &Path, content: &str) -> Parsed<Vec<CommitRef>> {
    let mut diagnostics = Vec::new();
    let commits = significant_lines(content)
        .filter_map(|(line_nr, line)| match leading_commit(line) {
            Some(commit) => Some(commit),
            None => {
                diagnostics.push(LineDiagnostic::invalid(file, line_nr, line));
                None
            }
        })
        .collect();
    Parsed { value: commits, diagnostics }
}

/// Membership list such as `dm-commits.txt`.
pub fn parse_commit_set(file: &Path, content: &str) -> Parsed<CommitTable<()>> {
    let Parsed { value: commits, diagnostics } = parse_commit_list(file, content);
    let mut set = CommitTable::new();
    for commit in commits {
        set.insert(commit, ());
    }
    Parsed { value: set, diagnostics }
}

/// Default token file: one token per line, in file order.
pub fn parse_default_tokens(
    file: &Path,
    content: &str,
    patterns: &TokenPatterns,
) -> Parsed<Vec<String>> {
    let mut diagnostics = Vec::new();
    let tokens = significant_lines(content)
        .filter_map(|(line_nr, line)| match patterns.default_line.captures(line) {
            Some(caps) => Some(caps[1].to_string()),
            None => {
                diagnostics.push(LineDiagnostic::invalid(file, line_nr, line));
                None
            }
        })
        .collect();
    Parsed { value: tokens, diagnostics }
}

/// Commit→tokens map. A line without tokens reuses the previous line's tokens.
pub fn parse_token_map(
    file: &Path,
    content: &str,
    patterns: &TokenPatterns,
) -> Parsed<CommitTable<Vec<String>>> {
    carry_forward(file, content, |line| {
        let caps = patterns.map_line.captures(line)?;
        let commit = CommitRef::parse(&caps[1])?;
        let tokens: Vec<String> =
            patterns.token.find_iter(&caps[2]).map(|m| m.as_str().to_string()).collect();
        Some((commit, (!tokens.is_empty()).then_some(tokens)))
    })
}

/// Commit→upstream map. A line without text reuses the previous line's text.
pub fn parse_provenance_map(file: &Path, content: &str) -> Parsed<CommitTable<String>> {
    carry_forward(file, content, |line| {
        let caps = PROVENANCE_LINE.captures(line)?;
        let commit = CommitRef::parse(&caps[1])?;
        let text = caps
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        Some((commit, text))
    })
}

fn leading_commit(line: &str) -> Option<CommitRef> {
    COMMIT_LINE.captures(line).and_then(|caps| CommitRef::parse(&caps[1]))
}

/// Fold the significant lines of `content` into a table, threading the last
/// explicit value through as the accumulator.
///
/// `split` returns `None` for a malformed line, and `Some((commit, None))` for a
/// well-formed line that names no value of its own.
fn carry_forward<V, F>(file: &Path, content: &str, split: F) -> Parsed<CommitTable<V>>
where
    V: Clone,
    F: Fn(&str) -> Option<(CommitRef, Option<V>)>,
{
    let (table, diagnostics, _) = significant_lines(content).fold(
        (CommitTable::new(), Vec::new(), None::<V>),
        |(mut table, mut diagnostics, carried), (line_nr, line)| {
            let carried = match split(line) {
                None => {
                    diagnostics.push(LineDiagnostic::invalid(file, line_nr, line));
                    carried
                }
                Some((commit, Some(value))) => {
                    table.insert(commit, value.clone());
                    Some(value)
                }
                Some((commit, None)) => match carried {
                    Some(value) => {
                        table.insert(commit, value.clone());
                        Some(value)
                    }
                    None => {
                        diagnostics.push(LineDiagnostic::nothing_to_carry(file, line_nr));
                        None
                    }
                },
            };
            (table, diagnostics, carried)
        },
    );
    Parsed { value: table, diagnostics }
}
