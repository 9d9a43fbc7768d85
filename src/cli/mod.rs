//! Command-line interface for kwf-patcher

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, resolve_profile, PresetName};
use crate::generate::PatchGenerator;
use crate::parse::{load_inputs, require_commit_list, Inputs, Parsed};
use crate::report::unused_entries;
use crate::vcs::{read_identity, GitCli};
use crate::workspace::resolve_workspace;

/// Turn a list of upstream commits into a numbered, tracker-annotated patch series
#[derive(Parser, Debug)]
#[command(name = "kwf-patcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding upstream-commits.txt and the metadata files; patches are written here
    #[arg(value_name = "PATCH_DIR")]
    pub patch_dir: PathBuf,

    /// Repository to read the commits from [default: current directory]
    #[arg(value_name = "SRC_REPO")]
    pub src_repo: Option<PathBuf>,

    /// Repository whose user.name and user.email sign the patches
    #[arg(value_name = "DEST_REPO")]
    pub dest_repo: Option<PathBuf>,

    /// Tracker preset [default: detected from the default-*.txt file present]
    #[arg(short, long, value_enum)]
    pub preset: Option<PresetName>,

    /// Path to config file [default: kwf-patcher.toml or .yml in PATCH_DIR]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Usage errors exit 1 like every other fatal error; help and version exit 0.
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(1);
        }
        Err(err) => err.exit(),
    };

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer().with_writer(std::io::stderr).with_ansi(std::io::stderr().is_terminal()),
        )
        .with(filter)
        .try_init();

    execute(&cli)
}

/// Run one generation pass for already-parsed arguments.
pub fn execute(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let workspace =
        resolve_workspace(&cli.patch_dir, cli.src_repo.as_deref(), cli.dest_repo.as_deref(), &cwd)?;
    let identity = read_identity(&workspace.dest_repo)?;

    require_commit_list(&workspace.patch_dir)?;
    let config = load_config(&workspace.patch_dir, cli.config.as_deref())?;
    let profile = resolve_profile(&workspace.patch_dir, cli.preset, &config)?;

    let Parsed { value: Inputs { commits, mut tables }, diagnostics } =
        load_inputs(&workspace.patch_dir, &profile)?;
    for diagnostic in &diagnostics {
        tracing::warn!("{diagnostic}");
    }

    let backend = GitCli::new(&workspace.src_repo);
    let written = PatchGenerator::new(&backend, &profile, &identity, &workspace.patch_dir)
        .run(&commits, &mut tables)?;

    for entry in unused_entries(&tables) {
        tracing::warn!("{entry}");
    }

    tracing::info!(
        "wrote {} patch(es) to {} using the {} preset",
        written.len(),
        workspace.patch_dir.display(),
        profile.preset.as_str()
    );
    Ok(())
}
