//! JSON rendering for digest documents.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a document as `{"date", "topics", "preamble"}`.
///
/// Topics keep their `title` and `sections`; each section carries its `title`
/// and `content` fragments. `preamble` is omitted when empty, so a fully
/// structured digest yields just `date` and `topics`. The output deserializes
/// back into an equal [`Document`].
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Section, Topic};

    fn sample() -> Document {
        let mut doc = Document::new("2025-01-01");
        let mut topic = Topic::new("Alpha");
        topic.add_section(Section::with_content("Kind", vec!["stuff".to_string()]));
        doc.add_topic(topic);
        doc
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"Alpha\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"date":"2025-01-01","topics":[{"title":"Alpha","sections":[{"title":"Kind","content":["stuff"]}]}]}"#
        );
    }

    #[test]
    fn test_to_json_preamble_only_when_present() {
        let mut doc = sample();
        assert!(!to_json(&doc, JsonFormat::Compact).unwrap().contains("preamble"));

        doc.preamble.push("intro".to_string());
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(json.ends_with(r#","preamble":["intro"]}"#));
    }

    #[test]
    fn test_json_round_trip() {
        let doc = sample();
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
