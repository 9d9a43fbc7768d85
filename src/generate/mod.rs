//! Patch series generation

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub mod render;

pub use render::{patch_file_name, render_patch};

use crate::config::Profile;
use crate::domain::{CommitRef, Identity, PatchRecord};
use crate::error::PatchError;
use crate::parse::MetadataTables;
use crate::vcs::Backend;

/// Writes one numbered patch per commit into the patch directory.
pub struct PatchGenerator<'a, B: Backend> {
    backend: &'a B,
    profile: &'a Profile,
    identity: &'a Identity,
    patch_dir: &'a Path,
}

impl<'a, B: Backend> PatchGenerator<'a, B> {
    pub fn new(
        backend: &'a B,
        profile: &'a Profile,
        identity: &'a Identity,
        patch_dir: &'a Path,
    ) -> Self {
        Self { backend, profile, identity, patch_dir }
    }

    /// Generate patches for `commits` in order, numbering them from 1.
    ///
    /// Stops at the first backend or write failure; patches already written
    /// stay on disk.
    pub fn run(&self, commits: &[CommitRef], tables: &mut MetadataTables) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(commits.len());
        for (idx, commit) in commits.iter().enumerate() {
            let seq = idx + 1;
            let record = self.build_record(commit, tables)?;
            let path = self.patch_dir.join(patch_file_name(
                seq,
                &record.slug,
                self.profile.slug_max_len,
            ));
            let text = render_patch(&record, self.identity, self.profile);
            fs::write(&path, text)
                .with_context(|| format!("Failed writing patch {}", path.display()))?;
            tracing::info!(commit = %commit, "wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    fn build_record(
        &self,
        commit: &CommitRef,
        tables: &mut MetadataTables,
    ) -> Result<PatchRecord, PatchError> {
        let (subject, slug) = self.backend.subject_and_slug(commit)?;
        let tokens = tables.tokens_for(commit);
        let provenance = tables.provenance_for(commit);
        let description = self.backend.description(commit)?;
        let diff = self.backend.diff(commit)?;
        Ok(PatchRecord { subject, slug, tokens, provenance, description, diff })
    }
}
