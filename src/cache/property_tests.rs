//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the codec, the persisted entry layout and the
//! key-to-file mapping over generated inputs.

use proptest::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

use crate::adapter::{Adapter, FsAdapter};
use crate::cache::{deserialize, serialize, CacheEntry, MAX_TS, TIMESTAMP_WIDTH};

// == Strategies ==
/// Generates arbitrary cache keys, including separators and unicode
fn key_strategy() -> impl Strategy<Value = String> {
    ".{0,64}"
}

/// Generates JSON values nested a few levels deep
fn json_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::hash_map("[a-z]{1,8}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Structured content survives serialize then deserialize.
    #[test]
    fn prop_codec_roundtrip(value in json_strategy()) {
        let stored = serialize(&value).unwrap();
        let loaded: Value = deserialize(&stored).unwrap();

        match &value {
            // Strings are stored bare, so their untyped reading depends on the text.
            Value::String(text) => prop_assert_eq!(&stored, text),
            _ => prop_assert_eq!(loaded, value),
        }
    }

    // Any string read back as a String is the same string.
    #[test]
    fn prop_plain_string_roundtrip(text in "[^\"]{0,64}") {
        let stored = serialize(&text).unwrap();
        prop_assert_eq!(&stored, &text);

        let loaded: String = deserialize(&stored).unwrap();
        prop_assert_eq!(loaded, text);
    }

    // The payload is recovered by position even when it is all digits.
    #[test]
    fn prop_entry_layout(expires_at in 0..=MAX_TS, content in "[0-9]{0,32}|.{0,32}") {
        let entry = CacheEntry { expires_at, content };
        let encoded = entry.encode();

        prop_assert_eq!(encoded.len(), TIMESTAMP_WIDTH + entry.content.len());
        prop_assert_eq!(CacheEntry::decode(encoded.as_bytes()).unwrap(), entry);
    }

    // The file for a key is stable and distinct keys get distinct files.
    #[test]
    fn prop_entry_path_deterministic(a in key_strategy(), b in key_strategy()) {
        let dir = TempDir::new().unwrap();
        let first = FsAdapter::new(dir.path()).unwrap();
        let second = FsAdapter::new(dir.path()).unwrap();

        prop_assert_eq!(first.entry_path(&a), second.entry_path(&a));
        prop_assert_eq!(a == b, first.entry_path(&a) == first.entry_path(&b));
    }

    // Forgetting one key leaves another untouched.
    #[test]
    fn prop_key_isolation(a in key_strategy(), b in key_strategy(), va in ".{0,16}", vb in ".{0,16}") {
        prop_assume!(a != b);
        let dir = TempDir::new().unwrap();
        let adapter = FsAdapter::new(dir.path()).unwrap();

        tokio_test::block_on(async {
            adapter.set(&a, 60, &va).await.unwrap();
            adapter.set(&b, 60, &vb).await.unwrap();
            adapter.forget(&a).await.unwrap();
        });

        prop_assert_eq!(tokio_test::block_on(adapter.get(&a)).unwrap(), None);
        prop_assert_eq!(tokio_test::block_on(adapter.get(&b)).unwrap(), Some(vb));
    }
}
