//! Content Codec
//!
//! Converts structured content to the plain strings adapters store, and back.

use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Serializes `content` for storage.
///
/// Strings are stored verbatim, without JSON quoting; everything else is
/// stored as compact JSON.
pub fn serialize<T: Serialize + ?Sized>(content: &T) -> Result<String> {
    match serde_json::to_value(content)? {
        Value::String(text) => Ok(text),
        other => Ok(other.to_string()),
    }
}

/// Deserializes stored content into `T`.
///
/// The content is parsed as JSON first. If that fails, the raw text itself is
/// offered to `T` as a string, so verbatim-stored strings round-trip. An error
/// is returned only when neither reading fits `T`; the JSON error is reported.
pub fn deserialize<T: DeserializeOwned>(content: &str) -> Result<T> {
    match serde_json::from_str(content) {
        Ok(value) => Ok(value),
        Err(json_err) => {
            let raw: serde::de::value::StrDeserializer<'_, serde_json::Error> =
                content.into_deserializer();
            T::deserialize(raw).map_err(|_| json_err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_string_is_stored_verbatim() {
        assert_eq!(serialize("hello").unwrap(), "hello");
        assert_eq!(serialize(&"5".to_string()).unwrap(), "5");
        assert_eq!(serialize(&json!("quoted")).unwrap(), "quoted");
    }

    #[test]
    fn test_structured_is_json() {
        assert_eq!(serialize(&vec![1, 2, 3]).unwrap(), "[1,2,3]");
        assert_eq!(
            serialize(&json!({"a": ["b", {"c": null}]})).unwrap(),
            r#"{"a":["b",{"c":null}]}"#
        );
    }

    #[test]
    fn test_plain_text_falls_back_to_string() {
        let value: Value = deserialize("hello world").unwrap();
        assert_eq!(value, Value::String("hello world".to_string()));

        let text: String = deserialize("hello world").unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn test_numeric_string_stays_string_when_typed() {
        let text: String = deserialize("5").unwrap();
        assert_eq!(text, "5");

        let untyped: Value = deserialize("5").unwrap();
        assert_eq!(untyped, json!(5));
    }

    #[test]
    fn test_nested_structures() {
        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct Page {
            title: String,
            tags: Vec<String>,
        }

        let page = Page {
            title: "Home".to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
        };
        let stored = serialize(&page).unwrap();
        let loaded: Page = deserialize(&stored).unwrap();
        assert_eq!(loaded, page);
    }

    #[test]
    fn test_mismatched_type_is_error() {
        let result: Result<Vec<u32>> = deserialize("not a list");
        assert!(result.is_err());
    }
}
