//! Line grammars for the patch-directory input files
//!
//! Every grammar is anchored at the start of the line and tolerates leading
//! whitespace. Lines have already had trailing whitespace trimmed.

use once_cell::sync::Lazy;
use regex::Regex;

/// Blank lines and `#` comments.
pub static SKIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(?:#|$)").expect("valid regex"));

/// A commit reference followed by whitespace or end of line.
pub static COMMIT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([0-9a-f]{12,40})(?:\s|$)").expect("valid regex"));

/// A commit reference, then optional free text up to an optional `#` comment.
pub static PROVENANCE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([0-9a-f]{12,40})(?:\s+([^#]*?))?\s*(?:#.*)?$").expect("valid regex")
});

/// Grammars that depend on the profile's metadata token shape.
#[derive(Debug, Clone)]
pub struct TokenPatterns {
    /// One token per line in the default file.
    pub default_line: Regex,
    /// Commit reference followed by zero or more tokens.
    pub map_line: Regex,
    pub token: Regex,
}

impl TokenPatterns {
    pub fn new(token_pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            default_line: Regex::new(&format!(r"^\s*((?:{token_pattern}))(?:\s|$)"))?,
            map_line: Regex::new(&format!(
                r"^\s*([0-9a-f]{{12,40}})((?:\s+(?:{token_pattern}))*)\s*(?:#|$)"
            ))?,
            token: Regex::new(token_pattern)?,
        })
    }
}
