//! kwf-patcher library
//!
//! The binary is a thin wrapper over [`cli::run`]. The pieces are usable on
//! their own: [`parse`] turns patch-directory files into tables,
//! [`generate::PatchGenerator`] writes patches through any [`vcs::Backend`], and
//! [`report`] lists the metadata entries nothing used.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod generate;
pub mod parse;
pub mod report;
pub mod vcs;
pub mod workspace;
