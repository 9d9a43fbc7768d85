//! Tracker profiles
//!
//! A [`Profile`] captures everything that differs between the bug-tracker and
//! issue-tracker flavours of a patch series: which files are read, what a
//! metadata token looks like, how it is linked, and where provenance comes from.

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use super::loader::Config;
use crate::error::PatchError;

/// Canonical commit list, shared by every profile.
pub const COMMITS_FILE: &str = "upstream-commits.txt";

pub const DEFAULT_SLUG_MAX_LEN: usize = 52;

const MAINLINE_UPSTREAM: &str = "kernel/git/torvalds/linux.git";
const DM_UPSTREAM: &str = "kernel/git/device-mapper/linux-dm.git";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    /// Red Hat Bugzilla ids (7 digits), device-mapper membership list
    Bugzilla,
    /// Jira issue keys (RHEL-NNNN), free-text upstream map
    Jira,
}

impl PresetName {
    pub fn as_str(self) -> &'static str {
        match self {
            PresetName::Bugzilla => "bugzilla",
            PresetName::Jira => "jira",
        }
    }

    fn default_file(self) -> &'static str {
        match self {
            PresetName::Bugzilla => "default-bz.txt",
            PresetName::Jira => "default-jira.txt",
        }
    }
}

/// Where the `Upstream Status:` value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvenanceSource {
    /// Commits listed in `file` get `secondary`; every other commit gets the
    /// profile's default upstream.
    Membership { file: String, secondary: String },
    /// Carry-forward map from commit to free text.
    FreeText { file: String },
}

impl ProvenanceSource {
    pub fn file(&self) -> &str {
        match self {
            ProvenanceSource::Membership { file, .. } | ProvenanceSource::FreeText { file } => file,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub preset: PresetName,
    pub default_file: String,
    pub map_file: String,
    /// Regex fragment for one metadata token, without anchors or groups.
    pub token_pattern: String,
    pub label: String,
    /// Link for a token; `{}` is replaced by the token.
    pub url_template: String,
    pub provenance: ProvenanceSource,
    pub default_upstream: String,
    pub slug_max_len: usize,
}

impl Profile {
    pub fn preset(name: PresetName) -> Self {
        match name {
            PresetName::Bugzilla => Self {
                preset: name,
                default_file: name.default_file().to_string(),
                map_file: "bz-commits-map.txt".to_string(),
                token_pattern: "[0-9]{7}".to_string(),
                label: "Bugzilla".to_string(),
                url_template: "https://bugzilla.redhat.com/{}".to_string(),
                provenance: ProvenanceSource::Membership {
                    file: "dm-commits.txt".to_string(),
                    secondary: DM_UPSTREAM.to_string(),
                },
                default_upstream: MAINLINE_UPSTREAM.to_string(),
                slug_max_len: DEFAULT_SLUG_MAX_LEN,
            },
            PresetName::Jira => Self {
                preset: name,
                default_file: name.default_file().to_string(),
                map_file: "jira-commits-map.txt".to_string(),
                token_pattern: "RHEL-[0-9]+".to_string(),
                label: "JIRA".to_string(),
                url_template: "https://issues.redhat.com/browse/{}".to_string(),
                provenance: ProvenanceSource::FreeText { file: "upstream-repo-map.txt".to_string() },
                default_upstream: MAINLINE_UPSTREAM.to_string(),
                slug_max_len: DEFAULT_SLUG_MAX_LEN,
            },
        }
    }

    /// Apply config-file overrides on top of the preset values.
    pub fn with_overrides(mut self, config: &Config) -> Result<Self, PatchError> {
        if let Some(template) = &config.url_template {
            if !template.contains("{}") {
                return Err(PatchError::InvalidConfig(format!(
                    "url_template `{template}` has no `{{}}` placeholder"
                )));
            }
            self.url_template = template.clone();
        }
        if let Some(upstream) = &config.default_upstream {
            self.default_upstream = upstream.clone();
        }
        if let Some(upstream) = &config.secondary_upstream {
            match &mut self.provenance {
                ProvenanceSource::Membership { secondary, .. } => *secondary = upstream.clone(),
                ProvenanceSource::FreeText { .. } => tracing::warn!(
                    "secondary_upstream is ignored by the {} preset",
                    self.preset.as_str()
                ),
            }
        }
        if let Some(len) = config.slug_max_len {
            if len == 0 {
                return Err(PatchError::InvalidConfig("slug_max_len must be at least 1".into()));
            }
            self.slug_max_len = len;
        }
        Ok(self)
    }

    pub fn token_url(&self, token: &str) -> String {
        self.url_template.replace("{}", token)
    }
}

/// Pick the preset for a run.
///
/// Precedence: CLI flag, then the config file, then whichever default-token
/// file exists in `patch_dir`.
pub fn resolve_profile(
    patch_dir: &Path,
    cli_preset: Option<PresetName>,
    config: &Config,
) -> Result<Profile> {
    let name = match cli_preset.or(config.preset) {
        Some(name) => name,
        None => detect_preset(patch_dir)?,
    };
    tracing::debug!("using {} preset", name.as_str());
    Ok(Profile::preset(name).with_overrides(config)?)
}

fn detect_preset(patch_dir: &Path) -> Result<PresetName, PatchError> {
    let bz = patch_dir.join(PresetName::Bugzilla.default_file());
    let jira = patch_dir.join(PresetName::Jira.default_file());
    match (bz.is_file(), jira.is_file()) {
        (true, true) => Err(PatchError::AmbiguousPreset { first: bz, second: jira }),
        (false, true) => Ok(PresetName::Jira),
        (true, false) => Ok(PresetName::Bugzilla),
        (false, false) => Err(PatchError::MissingInput(bz)),
    }
}
