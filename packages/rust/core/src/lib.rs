//! Metadata synthesis pipeline for BadgeForge.
//!
//! Turns a `files.json` mapping of upload records into one NFT metadata
//! document per key plus an `index.json` manifest for the run.

pub mod builder;
pub mod cid;
pub mod pipeline;
pub mod text;

pub use builder::build_metadata;
pub use cid::extract_cid;
pub use pipeline::{GenerateResult, generate, load_records};
pub use text::{DEFAULT_MAX_LEN, compact};
