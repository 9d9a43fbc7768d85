//! Fatal error kinds
//!
//! Anything here stops the run. Malformed input lines and unused map entries are
//! not errors; they are reported through [`crate::parse::LineDiagnostic`] and
//! [`crate::report::UnusedEntry`].

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("{} doesn't exist or isn't a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("not in a git repository, and no repository specified")]
    NoRepository,

    #[error("the specified {role} directory {} is not in a git repository", .path.display())]
    NotARepository { role: &'static str, path: PathBuf },

    #[error("{} doesn't exist", .0.display())]
    MissingInput(PathBuf),

    #[error(
        "both {} and {} exist; pass --preset or set `preset` in the config file",
        .first.display(),
        .second.display()
    )]
    AmbiguousPreset { first: PathBuf, second: PathBuf },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("git config {key} is not set for {}", .repo.display())]
    MissingIdentity { key: &'static str, repo: PathBuf },

    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed\n{command}\nReturn Code: {}\n{stderr}", return_code(.code))]
    CommandFailed { command: String, code: Option<i32>, stderr: String },

    #[error("unexpected output from `{command}`: {detail}")]
    UnexpectedOutput { command: String, detail: String },
}

fn return_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    }
}
