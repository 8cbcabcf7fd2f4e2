//! JSON side of the conversion.
//!
//! `input` walks a [`Value`] and builds host objects, `output` reads host objects back into a
//! [`Value`]. Objects are backed by an insertion-ordered map (`serde_json/preserve_order`), so
//! key order survives both directions.

pub(crate) mod input;
pub(crate) mod output;

/// JSON document.
pub type Value = serde_json::Value;
/// JSON number: `i64`, `u64` or finite `f64`.
pub type Number = serde_json::Number;
/// Insertion-ordered JSON object map.
pub type Map<K, V> = serde_json::Map<K, V>;
/// Error raised when deserializing a typed value from JSON fails.
pub type JsonError = serde_json::Error;
pub use serde_json::{from_value, to_value};

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_keeps_insertion_order_in_objects() {
        let mut map = Map::new();
        map.insert("z".to_string(), Value::Null);
        map.insert("a".to_string(), Value::Bool(true));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["z", "a"]);
    }

    #[test]
    fn it_reports_json_errors() {
        let err: JsonError = from_value::<bool>(Value::from(1)).unwrap_err();
        assert!(err.is_data());
    }
}
