//! Version-control queries
//!
//! Patch generation only needs three read-only questions answered per commit,
//! expressed by [`Backend`]. [`git::GitCli`] answers them by running `git`.

use crate::domain::CommitRef;
use crate::error::PatchError;

pub mod git;

pub use git::{is_inside_repository, read_identity, GitCli};

pub trait Backend {
    /// One-line subject and the file-name-safe slug git derives from it.
    fn subject_and_slug(&self, commit: &CommitRef) -> Result<(String, String), PatchError>;

    /// Header block and full message, without the diff.
    fn description(&self, commit: &CommitRef) -> Result<String, PatchError>;

    /// The diff alone.
    fn diff(&self, commit: &CommitRef) -> Result<String, PatchError>;
}
