//! Configuration loading and profile selection
//!
//! A run's settings come from the built-in preset, optionally overridden by a
//! config file in the patch directory, with the `--preset` flag taking
//! precedence (CLI > File > auto-detection).

pub mod loader;
pub mod profile;

pub use loader::{load_config, Config};
pub use profile::{resolve_profile, PresetName, Profile, ProvenanceSource, COMMITS_FILE};
