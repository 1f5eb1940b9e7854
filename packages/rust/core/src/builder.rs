//! Metadata document construction from a single upload record.
//!
//! Pure computation: no network or disk I/O, so every rule here is unit
//! testable with plain records.

use badgeforge_shared::{
    Attribute, BadgeMetadata, DEFAULT_FILENAME, DEFAULT_USER_ID, FileRecord, NAME_PREFIX,
    SummaryEntry,
};

use crate::cid::extract_cid;
use crate::text::{DEFAULT_MAX_LEN, compact};

/// Build one metadata document and its manifest summary from `(key, record)`.
///
/// The description is normalized at the default 280-character bound here;
/// the pipeline re-applies [`compact`] with the configured bound before
/// persisting, so a tighter runtime limit still takes effect.
///
/// The summary's `metadata_path` is left empty — the pipeline fills it in
/// once the document path is known.
pub fn build_metadata(key: &str, record: &FileRecord) -> (BadgeMetadata, SummaryEntry) {
    let filename = non_empty(record.filename.as_deref())
        .unwrap_or(DEFAULT_FILENAME)
        .to_string();
    let user_id = non_empty(record.user_id.as_deref())
        .unwrap_or(DEFAULT_USER_ID)
        .to_string();
    let ipfs_url = record.ipfs_url.clone().unwrap_or_default();

    let content_cid = extract_cid(&ipfs_url);
    let animation_url = content_cid.as_deref().map(|cid| format!("ipfs://{cid}"));

    let description_source = non_empty(record.content_preview.as_deref())
        .or_else(|| non_empty(record.content.as_deref()))
        .unwrap_or("");
    let description = compact(description_source, DEFAULT_MAX_LEN);

    // Fixed, stable attribute order. The first three are always present;
    // the rest track field presence in the raw record, not truthiness of
    // the value ({"reference_count": 0} still yields an attribute).
    let mut attributes = vec![
        Attribute::new("key", key),
        Attribute::new("filename", filename.as_str()),
        Attribute::new("user_id", user_id.as_str()),
    ];

    if let Some(upload_time) = &record.upload_time {
        attributes.push(Attribute::new("upload_time", upload_time.as_str()));
    }
    if let Some(reference_count) = record.reference_count {
        attributes.push(Attribute::new("reference_count", reference_count));
    }
    if let Some(total_reward) = &record.total_reward {
        // Emitted as a string to avoid float precision drift across toolchains.
        attributes.push(Attribute::new("total_reward", total_reward.to_string()));
    }
    if let Some(authorize_rag) = record.authorize_rag {
        attributes.push(Attribute::new("authorize_rag", authorize_rag));
    }

    let metadata = BadgeMetadata {
        name: format!("{NAME_PREFIX} - {filename}"),
        description,
        external_url: non_empty(Some(ipfs_url.as_str())).map(String::from),
        animation_url,
        attributes,
    };

    let summary = SummaryEntry {
        key: key.to_string(),
        filename,
        user_id,
        content_cid,
        content_ipfs_url: ipfs_url,
        metadata_path: String::new(),
    };

    (metadata, summary)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> FileRecord {
        FileRecord {
            filename: Some("note.txt".into()),
            user_id: Some("u1".into()),
            upload_time: Some("2025-03-01T12:00:00".into()),
            ipfs_url: Some("https://gw/ipfs/QmXYZ".into()),
            content_preview: None,
            content: Some("hello   world".into()),
            reference_count: Some(3),
            total_reward: Some(serde_json::Number::from_f64(1.25).unwrap()),
            authorize_rag: Some(true),
        }
    }

    #[test]
    fn builds_full_document() {
        let (metadata, summary) = build_metadata("a", &full_record());

        assert_eq!(metadata.name, "TalkToEarn Badge - note.txt");
        assert_eq!(metadata.description, "hello world");
        assert_eq!(metadata.external_url.as_deref(), Some("https://gw/ipfs/QmXYZ"));
        assert_eq!(metadata.animation_url.as_deref(), Some("ipfs://QmXYZ"));

        let traits: Vec<&str> = metadata
            .attributes
            .iter()
            .map(|a| a.trait_type.as_str())
            .collect();
        assert_eq!(
            traits,
            [
                "key",
                "filename",
                "user_id",
                "upload_time",
                "reference_count",
                "total_reward",
                "authorize_rag"
            ]
        );

        assert_eq!(summary.key, "a");
        assert_eq!(summary.content_cid.as_deref(), Some("QmXYZ"));
        assert_eq!(summary.content_ipfs_url, "https://gw/ipfs/QmXYZ");
    }

    #[test]
    fn empty_record_yields_minimal_document() {
        let (metadata, summary) = build_metadata("b", &FileRecord::default());

        assert_eq!(metadata.name, "TalkToEarn Badge - untitled");
        assert_eq!(metadata.description, "");
        assert!(metadata.external_url.is_none());
        assert!(metadata.animation_url.is_none());
        assert_eq!(metadata.attributes.len(), 3);
        assert_eq!(metadata.attributes[0], Attribute::new("key", "b"));
        assert_eq!(metadata.attributes[1], Attribute::new("filename", "untitled"));
        assert_eq!(metadata.attributes[2], Attribute::new("user_id", "unknown"));

        assert!(summary.content_cid.is_none());
        assert_eq!(summary.content_ipfs_url, "");
    }

    #[test]
    fn empty_strings_fall_back_to_sentinels() {
        let record = FileRecord {
            filename: Some(String::new()),
            user_id: Some(String::new()),
            ..FileRecord::default()
        };
        let (metadata, _) = build_metadata("c", &record);
        assert_eq!(metadata.name, "TalkToEarn Badge - untitled");
        assert_eq!(metadata.attributes[2], Attribute::new("user_id", "unknown"));
    }

    #[test]
    fn preview_wins_over_content() {
        let record = FileRecord {
            content_preview: Some("preview text".into()),
            content: Some("full content".into()),
            ..FileRecord::default()
        };
        let (metadata, _) = build_metadata("k", &record);
        assert_eq!(metadata.description, "preview text");
    }

    #[test]
    fn empty_preview_falls_back_to_content() {
        let record = FileRecord {
            content_preview: Some(String::new()),
            content: Some("full content".into()),
            ..FileRecord::default()
        };
        let (metadata, _) = build_metadata("k", &record);
        assert_eq!(metadata.description, "full content");
    }

    #[test]
    fn reference_count_zero_still_present() {
        let record = FileRecord {
            reference_count: Some(0),
            ..FileRecord::default()
        };
        let (metadata, _) = build_metadata("k", &record);

        let attr = metadata
            .attributes
            .iter()
            .find(|a| a.trait_type == "reference_count")
            .expect("attribute present");
        assert_eq!(attr.value, serde_json::json!(0));
    }

    #[test]
    fn absent_reference_count_has_no_attribute() {
        let (metadata, _) = build_metadata("k", &FileRecord::default());
        assert!(
            !metadata
                .attributes
                .iter()
                .any(|a| a.trait_type == "reference_count")
        );
    }

    #[test]
    fn total_reward_coerced_to_string() {
        let record = FileRecord {
            total_reward: Some(serde_json::Number::from(7)),
            ..FileRecord::default()
        };
        let (metadata, _) = build_metadata("k", &record);

        let attr = metadata
            .attributes
            .iter()
            .find(|a| a.trait_type == "total_reward")
            .expect("attribute present");
        assert_eq!(attr.value, serde_json::json!("7"));
    }

    #[test]
    fn malformed_gateway_url_tolerated() {
        let record = FileRecord {
            ipfs_url: Some("not a url at all".into()),
            ..FileRecord::default()
        };
        let (metadata, summary) = build_metadata("k", &record);

        // URL is echoed for debugging, but no CID means no animation_url.
        assert_eq!(metadata.external_url.as_deref(), Some("not a url at all"));
        assert!(metadata.animation_url.is_none());
        assert!(summary.content_cid.is_none());
    }

    #[test]
    fn description_bounded_at_default_length() {
        let record = FileRecord {
            content: Some("x".repeat(600)),
            ..FileRecord::default()
        };
        let (metadata, _) = build_metadata("k", &record);
        assert_eq!(metadata.description.chars().count(), DEFAULT_MAX_LEN);
    }
}
