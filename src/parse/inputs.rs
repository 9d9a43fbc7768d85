//! Loading every input file of a patch directory

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::maps::{
    parse_commit_list, parse_commit_set, parse_default_tokens, parse_provenance_map,
    parse_token_map,
};
use super::patterns::TokenPatterns;
use super::table::CommitTable;
use super::Parsed;
use crate::config::{Profile, ProvenanceSource, COMMITS_FILE};
use crate::domain::CommitRef;
use crate::error::PatchError;

/// Parsed contents of a patch directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub commits: Vec<CommitRef>,
    pub tables: MetadataTables,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvenanceTable {
    Membership { members: CommitTable<()>, secondary: String },
    FreeText(CommitTable<String>),
}

impl ProvenanceTable {
    pub fn unclaimed(&self) -> Vec<&CommitRef> {
        match self {
            ProvenanceTable::Membership { members, .. } => members.unclaimed().collect(),
            ProvenanceTable::FreeText(map) => map.unclaimed().collect(),
        }
    }
}

/// Per-commit metadata lookups, with the files they were read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataTables {
    pub defaults: Vec<String>,
    pub tokens: CommitTable<Vec<String>>,
    pub tokens_file: PathBuf,
    pub provenance: ProvenanceTable,
    pub provenance_file: PathBuf,
    pub default_upstream: String,
}

impl MetadataTables {
    /// Tokens for `commit`, claiming its map entry; the default list on a miss.
    pub fn tokens_for(&mut self, commit: &CommitRef) -> Vec<String> {
        self.tokens.claim(commit).unwrap_or(&self.defaults).clone()
    }

    /// Upstream string for `commit`, claiming its entry if there is one.
    pub fn provenance_for(&mut self, commit: &CommitRef) -> String {
        match &mut self.provenance {
            ProvenanceTable::Membership { members, secondary } => {
                if members.claim(commit).is_some() {
                    secondary.clone()
                } else {
                    self.default_upstream.clone()
                }
            }
            ProvenanceTable::FreeText(map) => {
                map.claim(commit).cloned().unwrap_or_else(|| self.default_upstream.clone())
            }
        }
    }
}

/// Path of the commit list in `patch_dir`, which must exist before anything
/// else in the directory is looked at.
pub fn require_commit_list(patch_dir: &Path) -> Result<PathBuf, PatchError> {
    let commits_path = patch_dir.join(COMMITS_FILE);
    if commits_path.is_file() {
        Ok(commits_path)
    } else {
        Err(PatchError::MissingInput(commits_path))
    }
}

/// Read and parse everything the profile asks for from `patch_dir`.
///
/// The commit list and the default token file must exist; the map files are
/// optional and treated as empty when absent.
pub fn load_inputs(patch_dir: &Path, profile: &Profile) -> Result<Parsed<Inputs>> {
    let commits_path = require_commit_list(patch_dir)?;

    let patterns = TokenPatterns::new(&profile.token_pattern)
        .with_context(|| format!("Invalid token pattern `{}`", profile.token_pattern))?;
    let mut diagnostics = Vec::new();

    let default_path = patch_dir.join(&profile.default_file);
    let content = read_required(&default_path)?;
    let defaults = collect(parse_default_tokens(&default_path, &content, &patterns), &mut diagnostics);
    if defaults.is_empty() {
        tracing::warn!("{} lists no usable default entries", default_path.display());
    }

    let tokens_file = patch_dir.join(&profile.map_file);
    let tokens = match read_optional(&tokens_file)? {
        Some(content) => collect(parse_token_map(&tokens_file, &content, &patterns), &mut diagnostics),
        None => CommitTable::new(),
    };

    let provenance_file = patch_dir.join(profile.provenance.file());
    let provenance_content = read_optional(&provenance_file)?;
    let provenance = match &profile.provenance {
        ProvenanceSource::Membership { secondary, .. } => ProvenanceTable::Membership {
            members: match &provenance_content {
                Some(content) => {
                    collect(parse_commit_set(&provenance_file, content), &mut diagnostics)
                }
                None => CommitTable::new(),
            },
            secondary: secondary.clone(),
        },
        ProvenanceSource::FreeText { .. } => ProvenanceTable::FreeText(match &provenance_content {
            Some(content) => collect(parse_provenance_map(&provenance_file, content), &mut diagnostics),
            None => CommitTable::new(),
        }),
    };

    let content = read_required(&commits_path)?;
    let commits = collect(parse_commit_list(&commits_path, &content), &mut diagnostics);

    tracing::debug!(
        commits = commits.len(),
        mapped = tokens.len(),
        defaults = defaults.len(),
        "parsed patch directory inputs"
    );

    let tables = MetadataTables {
        defaults,
        tokens,
        tokens_file,
        provenance,
        provenance_file,
        default_upstream: profile.default_upstream.clone(),
    };
    Ok(Parsed { value: Inputs { commits, tables }, diagnostics })
}

fn collect<T>(parsed: Parsed<T>, diagnostics: &mut Vec<super::LineDiagnostic>) -> T {
    diagnostics.extend(parsed.diagnostics);
    parsed.value
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("Failed reading {}", path.display())),
    }
}

fn read_required(path: &Path) -> Result<String> {
    read_optional(path)?.ok_or_else(|| PatchError::MissingInput(path.to_path_buf()).into())
}
