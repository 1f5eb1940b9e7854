//! End-to-end generation pipeline: `files.json` → per-key metadata
//! documents → `index.json` manifest.
//!
//! Single-threaded and synchronous by design: each key is processed to
//! completion before the next, and the manifest is only written after
//! every document landed. A failed write aborts the run — documents
//! already on disk stay, but without `index.json` the output set is not
//! a committed run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use badgeforge_shared::{
    BadgeForgeError, FileRecord, GenerateConfig, Manifest, Result, SummaryEntry,
};

use crate::builder::build_metadata;
use crate::text::compact;

/// File name of the run manifest inside the output directory.
pub const MANIFEST_FILE_NAME: &str = "index.json";

/// Result of a successful generation run.
#[derive(Debug)]
pub struct GenerateResult {
    /// Number of metadata documents written.
    pub document_count: usize,
    /// Path of the written manifest.
    pub manifest_path: PathBuf,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Load and parse the input mapping.
///
/// A missing file or malformed JSON is a fatal startup error. The
/// `BTreeMap` keeps keys in lexicographic order, which fixes both the
/// document write order and the manifest item order across runs.
pub fn load_records(path: &Path) -> Result<BTreeMap<String, FileRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| BadgeForgeError::io(path, e))?;

    serde_json::from_str(&content).map_err(|e| {
        BadgeForgeError::input(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Run the full generation pipeline.
///
/// `now` is the manifest clock — callers pass `Utc::now()`, tests pass a
/// fixed instant so two runs over the same input are byte-identical.
#[instrument(skip_all, fields(input = %config.input_path.display(), outdir = %config.output_dir.display()))]
pub fn generate(config: &GenerateConfig, now: DateTime<Utc>) -> Result<GenerateResult> {
    let start = Instant::now();
    config.validate()?;

    let records = load_records(&config.input_path)?;
    info!(record_count = records.len(), "loaded input mapping");

    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| BadgeForgeError::io(&config.output_dir, e))?;

    let mut items: Vec<SummaryEntry> = Vec::with_capacity(records.len());

    for (key, record) in &records {
        let (mut metadata, mut summary) = build_metadata(key, record);

        // Second normalization stage: the builder used the default bound,
        // the configured bound applies before persisting.
        if !metadata.description.is_empty() {
            metadata.description = compact(&metadata.description, config.max_description_length);
        }

        let document_path = config.output_dir.join(format!("{key}.metadata.json"));
        write_json(&document_path, &metadata)?;
        debug!(key, path = %document_path.display(), "wrote metadata document");

        summary.metadata_path = forward_slash(&document_path);
        items.push(summary);
    }

    let manifest_path = write_manifest(config, items, now)?;

    let result = GenerateResult {
        document_count: records.len(),
        manifest_path,
        elapsed: start.elapsed(),
    };

    info!(
        document_count = result.document_count,
        manifest = %result.manifest_path.display(),
        "generation complete"
    );

    Ok(result)
}

/// Serialize the accumulated summaries plus run metadata to `index.json`.
fn write_manifest(
    config: &GenerateConfig,
    items: Vec<SummaryEntry>,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let source = std::path::absolute(&config.input_path)
        .map_err(|e| BadgeForgeError::io(&config.input_path, e))?;

    let manifest = Manifest {
        generated_at: format_timestamp(now),
        source: forward_slash(&source),
        items,
    };

    let manifest_path = config.output_dir.join(MANIFEST_FILE_NAME);
    write_json(&manifest_path, &manifest)?;
    Ok(manifest_path)
}

/// UTC, second precision, literal `Z` suffix (not a numeric offset).
fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Write a JSON document: 2-space indentation, non-ASCII left unescaped,
/// trailing newline.
fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(data).map_err(|e| {
        BadgeForgeError::input(format!("JSON serialization failed: {e}"))
    })?;
    json.push('\n');
    std::fs::write(path, json).map_err(|e| BadgeForgeError::io(path, e))
}

fn forward_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
