//! Social post records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::time::deserialize_optional_timestamp;

/// One social post as delivered by the ingestion side.
///
/// Only `author_id` and `published_at` take part in aggregation. The remaining
/// fields are carried through so records can be logged and re-serialized
/// without loss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Opaque author identifier. Display names are not assumed to be unique,
    /// so grouping always uses this field. Missing or `null` reads as `""`.
    #[serde(default, deserialize_with = "deserialize_author_id")]
    pub author_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<DateTime<Utc>>,
}

fn deserialize_author_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl PostRecord {
    pub fn new(author_id: impl Into<String>) -> Self {
        Self {
            author_id: author_id.into(),
            ..Default::default()
        }
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_author_name(mut self, author_name: impl Into<String>) -> Self {
        self.author_name = Some(author_name.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_full_record() {
        let json = r#"{
            "id": "post5f9c",
            "author_id": "user_3",
            "author_name": "Lael Vassel",
            "text": "hello",
            "published_at": "2022-06-03T10:15:00+00:00"
        }"#;
        let post: PostRecord = serde_json::from_str(json).unwrap();

        assert_eq!(post.id.as_deref(), Some("post5f9c"));
        assert_eq!(post.author_id, "user_3");
        assert_eq!(post.author_name.as_deref(), Some("Lael Vassel"));
        assert_eq!(post.text.as_deref(), Some("hello"));
        assert_eq!(
            post.published_at,
            Some(Utc.with_ymd_and_hms(2022, 6, 3, 10, 15, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_minimal_record() {
        let post: PostRecord = serde_json::from_str(r#"{ "author_id": "user_1" }"#).unwrap();
        assert_eq!(post, PostRecord::new("user_1"));
        assert!(post.published_at.is_none());
    }

    #[test]
    fn test_parse_date_only_timestamp() {
        let post: PostRecord =
            serde_json::from_str(r#"{ "author_id": "user_1", "published_at": "2022-06-04" }"#)
                .unwrap();
        assert_eq!(
            post.published_at,
            Some(Utc.with_ymd_and_hms(2022, 6, 4, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_missing_or_null_author_id_reads_as_empty() {
        let post: PostRecord = serde_json::from_str(r#"{ "text": "orphan" }"#).unwrap();
        assert_eq!(post.author_id, "");

        let post: PostRecord = serde_json::from_str(r#"{ "author_id": null }"#).unwrap();
        assert_eq!(post, PostRecord::new(""));
    }

    #[test]
    fn test_non_string_author_id_is_rejected() {
        let result: Result<PostRecord, _> = serde_json::from_str(r#"{ "author_id": 7 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let post = PostRecord::new("user_1").with_text("hi");
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json, serde_json::json!({ "author_id": "user_1", "text": "hi" }));
    }

    #[test]
    fn test_builders() {
        let ts = Utc.with_ymd_and_hms(2022, 6, 7, 0, 0, 0).unwrap();
        let post = PostRecord::new("user_2")
            .with_id("p1")
            .with_author_name("Name")
            .with_published_at(ts);
        assert_eq!(post.id.as_deref(), Some("p1"));
        assert_eq!(post.author_name.as_deref(), Some("Name"));
        assert_eq!(post.published_at, Some(ts));
    }
}
