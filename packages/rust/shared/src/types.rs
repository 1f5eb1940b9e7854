//! Core domain types for BadgeForge metadata synthesis.

use serde::{Deserialize, Serialize};

/// Substituted when a record's `filename` is absent or empty.
pub const DEFAULT_FILENAME: &str = "untitled";

/// Substituted when a record's `user_id` is absent or empty.
pub const DEFAULT_USER_ID: &str = "unknown";

/// Prefix for every badge name: `"TalkToEarn Badge - <filename>"`.
pub const NAME_PREFIX: &str = "TalkToEarn Badge";

// ---------------------------------------------------------------------------
// FileRecord
// ---------------------------------------------------------------------------

/// One input entry from `files.json`, describing a previously uploaded
/// piece of content.
///
/// Every field is optional: records with missing fields are always
/// tolerated and fall back to the defaults enumerated on each field.
/// `Option` distinguishes an absent field from a present-but-falsy one,
/// which matters for the conditional attributes (`reference_count: 0`
/// yields an attribute; an absent `reference_count` does not).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileRecord {
    /// Display filename; defaults to [`DEFAULT_FILENAME`] when absent or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Owning user; defaults to [`DEFAULT_USER_ID`] when absent or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// ISO-like upload timestamp. Opaque: echoed, never parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_time: Option<String>,

    /// Gateway URL of the form `.../ipfs/<CID>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfs_url: Option<String>,

    /// Short preview of the content; preferred description source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_preview: Option<String>,

    /// Full content; description source when no preview is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Times this content was referenced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_count: Option<i64>,

    /// Accumulated reward. Kept as a JSON number and emitted as its
    /// literal string to avoid float precision drift across toolchains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_reward: Option<serde_json::Number>,

    /// Whether the user authorized RAG usage of this content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorize_rag: Option<bool>,
}

// ---------------------------------------------------------------------------
// BadgeMetadata
// ---------------------------------------------------------------------------

/// One `{trait_type, value}` entry in a metadata document's attribute list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: serde_json::Value,
}

impl Attribute {
    pub fn new(trait_type: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }
}

/// The per-key NFT metadata document written to `<key>.metadata.json`.
///
/// Struct field order fixes the JSON key order. Empty and `None` values
/// are skipped at serialization time, so the emitted document never
/// contains a key mapping to `null` or `""`. The attribute list itself
/// is always present and its entries are never pruned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeMetadata {
    /// `"TalkToEarn Badge - <filename>"`.
    pub name: String,

    /// Normalized, length-bounded descriptive text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Human-friendly gateway URL. Wallets may ignore this but it is
    /// useful for debugging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,

    /// `ipfs://<CID>` pointing at the original content. Wallet support varies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_url: Option<String>,

    /// Ordered attribute list; always starts with `key`, `filename`, `user_id`.
    pub attributes: Vec<Attribute>,
}

// ---------------------------------------------------------------------------
// SummaryEntry / Manifest
// ---------------------------------------------------------------------------

/// One manifest line per generated document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryEntry {
    /// The input mapping key.
    pub key: String,
    /// Resolved filename (after default substitution).
    pub filename: String,
    /// Resolved user id (after default substitution).
    pub user_id: String,
    /// Extracted CID, `null` when the gateway URL carried none.
    pub content_cid: Option<String>,
    /// The original gateway URL, pre-pruning (may be empty).
    pub content_ipfs_url: String,
    /// Forward-slash path of the written document.
    pub metadata_path: String,
}

/// The `index.json` structure summarizing one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// UTC timestamp, second precision, literal `Z` suffix.
    pub generated_at: String,
    /// Absolute path of the input mapping.
    pub source: String,
    /// Summaries in processing (lexicographic key) order.
    pub items: Vec<SummaryEntry>,
}
