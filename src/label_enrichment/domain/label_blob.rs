use serde_json::{Map, Value};

/// A parsed label blob: the JSON-encoded key/value metadata attached to
/// an image or namespace, stored as a single CSV cell.
///
/// Parsing is strict: the cell must contain a JSON object. Duplicate
/// keys within one blob resolve to the last-parsed value, which is the
/// JSON decoder's own dedup rule.
#[derive(Debug, Clone)]
pub struct LabelBlob {
    labels: Map<String, Value>,
}

impl LabelBlob {
    /// Parses a raw label cell into a label map.
    ///
    /// A top-level value that is not an object (array, string, number)
    /// is a parse failure, same as malformed JSON.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let labels: Map<String, Value> = serde_json::from_str(raw)?;
        Ok(Self { labels })
    }

    /// Looks up a label value by exact, case-sensitive key match.
    ///
    /// Only JSON string values count as a present attribute; numbers,
    /// booleans, null and nested structures are treated as absent.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.labels.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_lookup() {
        let blob = LabelBlob::parse(r#"{"MAINTAINER": "alice", "team": "infra"}"#).unwrap();
        assert_eq!(blob.attribute("MAINTAINER"), Some("alice"));
        assert_eq!(blob.attribute("team"), Some("infra"));
        assert_eq!(blob.len(), 2);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let blob = LabelBlob::parse(r#"{"MAINTAINER": "alice"}"#).unwrap();
        assert_eq!(blob.attribute("maintainer"), None);
        assert_eq!(blob.attribute("Maintainer"), None);
    }

    #[test]
    fn test_missing_key_is_absent() {
        let blob = LabelBlob::parse(r#"{"team": "infra"}"#).unwrap();
        assert_eq!(blob.attribute("MAINTAINER"), None);
    }

    #[test]
    fn test_empty_string_value_is_present() {
        let blob = LabelBlob::parse(r#"{"MAINTAINER": ""}"#).unwrap();
        assert_eq!(blob.attribute("MAINTAINER"), Some(""));
    }

    #[test]
    fn test_non_string_values_are_absent() {
        let blob =
            LabelBlob::parse(r#"{"a": 1, "b": true, "c": null, "d": {"x": 1}, "e": [1]}"#).unwrap();
        for key in ["a", "b", "c", "d", "e"] {
            assert_eq!(blob.attribute(key), None);
        }
    }

    #[test]
    fn test_malformed_json_fails() {
        assert!(LabelBlob::parse("{bad json").is_err());
        assert!(LabelBlob::parse("").is_err());
    }

    #[test]
    fn test_non_object_top_level_fails() {
        assert!(LabelBlob::parse(r#"["MAINTAINER"]"#).is_err());
        assert!(LabelBlob::parse(r#""MAINTAINER""#).is_err());
        assert!(LabelBlob::parse("42").is_err());
    }

    #[test]
    fn test_duplicate_keys_take_last_parsed_value() {
        let blob = LabelBlob::parse(r#"{"MAINTAINER": "alice", "MAINTAINER": "bob"}"#).unwrap();
        assert_eq!(blob.attribute("MAINTAINER"), Some("bob"));
    }
}
