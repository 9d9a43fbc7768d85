//! git-backed [`Backend`] and repository helpers

use anyhow::{Context, Result};
use git2::{ErrorCode, Repository};
use std::path::{Path, PathBuf};
use std::process::Command;

use super::Backend;
use crate::domain::{CommitRef, Identity};
use crate::error::PatchError;

/// Runs `git -C <repo> ...` for every query.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    fn output(&self, args: &[&str]) -> Result<String, PatchError> {
        let command = render_command(&self.repo, args);
        tracing::debug!(command = %command, "running git");

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(args)
            .output()
            .map_err(|source| PatchError::Spawn { command: command.clone(), source })?;

        if !output.status.success() {
            return Err(PatchError::CommandFailed {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Backend for GitCli {
    fn subject_and_slug(&self, commit: &CommitRef) -> Result<(String, String), PatchError> {
        let args = ["show", commit.as_str(), "-s", "--pretty=format:%s%n%f"];
        let output = self.output(&args)?;
        split_subject_and_slug(&output).ok_or_else(|| PatchError::UnexpectedOutput {
            command: render_command(&self.repo, &args),
            detail: format!("expected a subject line and a slug line, got {output:?}"),
        })
    }

    fn description(&self, commit: &CommitRef) -> Result<String, PatchError> {
        self.output(&["show", commit.as_str(), "-s"])
    }

    fn diff(&self, commit: &CommitRef) -> Result<String, PatchError> {
        self.output(&["show", commit.as_str(), "--pretty=format:"])
    }
}

fn render_command(repo: &Path, args: &[&str]) -> String {
    format!("git -C {} {}", repo.display(), args.join(" "))
}

/// Split `%s%n%f` output into subject and slug.
fn split_subject_and_slug(output: &str) -> Option<(String, String)> {
    let (subject, slug) = output.trim_end().split_once('\n')?;
    if slug.is_empty() || slug.contains('\n') {
        return None;
    }
    Some((subject.to_string(), slug.to_string()))
}

/// Whether `path` is inside a git repository (work tree or git dir).
pub fn is_inside_repository(path: &Path) -> bool {
    Repository::discover(path).is_ok()
}

/// Submitter name and email from the effective git config of the repository
/// containing `path`.
pub fn read_identity(path: &Path) -> Result<Identity> {
    let repo = Repository::discover(path)
        .with_context(|| format!("Failed to open git repository at {}", path.display()))?;
    let config = repo
        .config()
        .with_context(|| format!("Failed to read git config for {}", path.display()))?;

    let value = |key: &'static str| -> Result<String> {
        match config.get_string(key) {
            Ok(v) => Ok(v.trim_end().to_string()),
            Err(err) if err.code() == ErrorCode::NotFound => {
                Err(PatchError::MissingIdentity { key, repo: path.to_path_buf() }.into())
            }
            Err(err) => Err(err)
                .with_context(|| format!("Failed to read git config {key} for {}", path.display())),
        }
    };

    Ok(Identity { name: value("user.name")?, email: value("user.email")? })
}
