//! Tri-variant field value codec.
//!
//! # Responsibility
//! - Encode the three field-value variants into the persisted cell text.
//! - Decode persisted cell text back into a tagged variant.
//!
//! # Invariants
//! - `decode(encode(v)) == v` for every variant, with one wire ambiguity:
//!   `Plain` text that is itself a well-formed link object decodes as that
//!   link (the cell format carries no out-of-band tag).
//! - Structured-looking text that matches neither link shape decodes to
//!   `Plain` holding the raw text, never an error.

use crate::model::record::RecordId;
use serde_json::{json, Value};
use uuid::Uuid;

/// One cell value as seen by callers.
///
/// Cells are persisted as plain text. Link variants serialize as a small
/// JSON object; everything else is stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Scalar text (numbers and booleans are kept as their text form).
    Plain(String),
    /// Label plus path of a file previously copied into the links folder.
    ExternalLink { label: String, path: String },
    /// Label plus the stable ID of another record in the same collection.
    InternalLink { label: String, target: RecordId },
}

impl FieldValue {
    /// Builds a plain value from any text-like input.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Serializes this value into its persisted cell representation.
    ///
    /// # Contract
    /// - `Plain` text is written verbatim, even when it looks structured.
    ///   A plain cell whose text is itself a well-formed link object is
    ///   therefore indistinguishable on disk and decodes as that link.
    /// - Links become `{"label","path"}` / `{"label","uuid"}` JSON objects.
    pub fn encode(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::ExternalLink { label, path } => {
                json!({ "label": label, "path": path }).to_string()
            }
            Self::InternalLink { label, target } => {
                json!({ "label": label, "uuid": target.to_string() }).to_string()
            }
        }
    }

    /// Interprets persisted cell text as a tagged variant.
    ///
    /// A cell is a link only when it parses as a JSON object carrying a
    /// `label` plus either a `path` or a well-formed `uuid`. The external
    /// shape wins when both keys are present. Anything else falls back to
    /// `Plain` with the raw text preserved.
    pub fn decode(raw: &str) -> Self {
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
            return Self::Plain(raw.to_string());
        };

        let Some(label) = map.get("label").and_then(Value::as_str) else {
            return Self::Plain(raw.to_string());
        };

        if let Some(path) = map.get("path").and_then(Value::as_str) {
            return Self::ExternalLink {
                label: label.to_string(),
                path: path.to_string(),
            };
        }

        if let Some(target) = map
            .get("uuid")
            .and_then(Value::as_str)
            .and_then(|text| Uuid::parse_str(text).ok())
        {
            return Self::InternalLink {
                label: label.to_string(),
                target,
            };
        }

        Self::Plain(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::FieldValue;
    use uuid::Uuid;

    #[test]
    fn plain_text_round_trips_verbatim() {
        let value = FieldValue::plain("42.5");
        assert_eq!(FieldValue::decode(&value.encode()), value);
    }

    #[test]
    fn external_link_round_trips() {
        let value = FieldValue::ExternalLink {
            label: "manual".to_string(),
            path: "links/ab12_manual.pdf".to_string(),
        };
        assert_eq!(FieldValue::decode(&value.encode()), value);
    }

    #[test]
    fn internal_link_round_trips() {
        let value = FieldValue::InternalLink {
            label: "owner".to_string(),
            target: Uuid::new_v4(),
        };
        assert_eq!(FieldValue::decode(&value.encode()), value);
    }

    #[test]
    fn object_without_link_keys_falls_back_to_plain() {
        let raw = r#"{"label":"x","note":"not a link"}"#;
        assert_eq!(FieldValue::decode(raw), FieldValue::plain(raw));
    }

    #[test]
    fn malformed_uuid_falls_back_to_plain() {
        let raw = r#"{"label":"x","uuid":"not-a-uuid"}"#;
        assert_eq!(FieldValue::decode(raw), FieldValue::plain(raw));
    }

    #[test]
    fn path_shape_wins_when_both_keys_present() {
        let raw = format!(
            r#"{{"label":"x","path":"links/a_b.txt","uuid":"{}"}}"#,
            Uuid::new_v4()
        );
        assert!(matches!(
            FieldValue::decode(&raw),
            FieldValue::ExternalLink { .. }
        ));
    }

    #[test]
    fn plain_text_shaped_like_a_link_reads_back_as_that_link() {
        // The cell format has no out-of-band tag, so this ambiguity is part
        // of the wire contract.
        let raw = r#"{"label":"manual","path":"links/a_b.pdf"}"#;
        let encoded = FieldValue::plain(raw).encode();
        assert_eq!(encoded, raw);
        assert_eq!(
            FieldValue::decode(&encoded),
            FieldValue::ExternalLink {
                label: "manual".to_string(),
                path: "links/a_b.pdf".to_string(),
            }
        );
    }

    #[test]
    fn json_array_is_plain() {
        let raw = r#"["label","path"]"#;
        assert_eq!(FieldValue::decode(raw), FieldValue::plain(raw));
    }
}
