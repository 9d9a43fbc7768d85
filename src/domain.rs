//! Core data types

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static COMMIT_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-f]{12,40}$").expect("valid regex"));

/// Abbreviated or full git revision id: 12 to 40 lowercase hex digits.
///
/// All input files must use the same abbreviation length, since references are
/// compared as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitRef(String);

impl CommitRef {
    pub fn parse(s: &str) -> Option<Self> {
        COMMIT_REF.is_match(s).then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Submitter identity read from the destination repository's git config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Everything needed to render one patch file.
#[derive(Debug, Clone)]
pub struct PatchRecord {
    pub subject: String,
    pub slug: String,
    pub tokens: Vec<String>,
    pub provenance: String,
    /// `git show -s` output: header block plus indented message.
    pub description: String,
    pub diff: String,
}
