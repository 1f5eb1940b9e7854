//! CID extraction from IPFS gateway URLs.

use std::sync::LazyLock;

use regex::Regex;

static CID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/ipfs/([A-Za-z0-9]+)").expect("valid regex"));

/// Recover the content identifier from a gateway URL.
///
/// Matches `/ipfs/<alphanumeric-token>` anywhere in the string, stopping
/// at the first non-alphanumeric character, so query strings and trailing
/// path segments are ignored. A miss is a normal outcome, never an error:
/// empty or non-matching input yields `None`.
pub fn extract_cid(ipfs_url: &str) -> Option<String> {
    CID_RE
        .captures(ipfs_url)
        .map(|caps| caps[1].to_string())
}
