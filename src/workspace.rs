//! Directory arguments and repository resolution

use std::path::{Path, PathBuf};

use crate::error::PatchError;
use crate::vcs::is_inside_repository;

/// The directories a run works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Input files are read from and patches written to here.
    pub patch_dir: PathBuf,
    /// Commits are looked up in this repository.
    pub src_repo: PathBuf,
    /// Submitter identity comes from this repository's git config.
    pub dest_repo: PathBuf,
}

/// Validate the directory arguments and pick the source and destination
/// repositories.
///
/// Without `src`, `cwd` must be inside a repository. Without `dest`, `cwd` is
/// used when it is inside a repository and `src` otherwise.
pub fn resolve_workspace(
    patch_dir: &Path,
    src: Option<&Path>,
    dest: Option<&Path>,
    cwd: &Path,
) -> Result<Workspace, PatchError> {
    for dir in [Some(patch_dir), src, dest].into_iter().flatten() {
        if !dir.is_dir() {
            return Err(PatchError::NotADirectory(dir.to_path_buf()));
        }
    }

    let cwd_in_repo = is_inside_repository(cwd);

    let src_repo = match src {
        Some(dir) => require_repository("src_repo", dir)?,
        None if cwd_in_repo => cwd.to_path_buf(),
        None => return Err(PatchError::NoRepository),
    };

    let dest_repo = match dest {
        Some(dir) => require_repository("dest_repo", dir)?,
        None if cwd_in_repo => cwd.to_path_buf(),
        None => src_repo.clone(),
    };

    tracing::debug!(
        src = %src_repo.display(),
        dest = %dest_repo.display(),
        "resolved repositories"
    );
    Ok(Workspace { patch_dir: patch_dir.to_path_buf(), src_repo, dest_repo })
}

fn require_repository(role: &'static str, dir: &Path) -> Result<PathBuf, PatchError> {
    if is_inside_repository(dir) {
        Ok(dir.to_path_buf())
    } else {
        Err(PatchError::NotARepository { role, path: dir.to_path_buf() })
    }
}
