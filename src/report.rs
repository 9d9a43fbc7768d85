//! End-of-run consistency report

use std::fmt;
use std::path::PathBuf;

use crate::domain::CommitRef;
use crate::parse::MetadataTables;

/// A map entry that no processed commit claimed, usually a stale or mistyped
/// reference in a metadata file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedEntry {
    pub commit: CommitRef,
    pub file: PathBuf,
}

impl fmt::Display for UnusedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unused commit id {} in {}", self.commit, self.file.display())
    }
}

/// Unclaimed entries of the provenance table, then of the token map.
pub fn unused_entries(tables: &MetadataTables) -> Vec<UnusedEntry> {
    let provenance = tables
        .provenance
        .unclaimed()
        .into_iter()
        .map(|commit| UnusedEntry { commit: commit.clone(), file: tables.provenance_file.clone() });
    let tokens = tables
        .tokens
        .unclaimed()
        .map(|commit| UnusedEntry { commit: commit.clone(), file: tables.tokens_file.clone() });
    provenance.chain(tokens).collect()
}
