//! Patch text and file-name formatting

use crate::config::Profile;
use crate::domain::{Identity, PatchRecord};

/// Compose the patch file body.
///
/// The description is inserted verbatim and is expected to end with a newline,
/// which together with the one preceding the sign-off yields a blank line.
pub fn render_patch(record: &PatchRecord, identity: &Identity, profile: &Profile) -> String {
    let mut out = String::with_capacity(record.description.len() + record.diff.len() + 256);
    out.push_str(&format!("From: {identity}\n"));
    out.push_str(&format!("Subject: {}\n\n", record.subject));
    for token in &record.tokens {
        out.push_str(&format!("{}: {}\n", profile.label, profile.token_url(token)));
    }
    out.push_str(&format!("Upstream Status: {}\n\n", record.provenance));
    out.push_str(&record.description);
    out.push_str(&format!("\nSigned-off-by: {identity}\n\n"));
    out.push_str(&record.diff);
    out
}

/// `NNNN-<slug>.patch`, with the slug cut to `max_len` characters.
///
/// The sequence number is zero-padded to four digits and simply grows wider
/// from 10000 on.
pub fn patch_file_name(seq: usize, slug: &str, max_len: usize) -> String {
    let slug: String = slug.chars().take(max_len).collect();
    format!("{seq:04}-{slug}.patch")
}
