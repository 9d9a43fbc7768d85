//! kwf-patcher: build a downstream patch series from upstream commits
//!
//! Reads the commit list and tracker metadata from a patch directory, asks git
//! for each commit's message and diff, and writes `NNNN-<slug>.patch` files
//! annotated with tracker links and upstream provenance.

use anyhow::Result;

fn main() -> Result<()> {
    kwf_patcher::cli::run()
}
