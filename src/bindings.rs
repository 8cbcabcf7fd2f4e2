//! `serde` support for dynamic values.
//!
//! Every dynamic type serializes through [`to_json`] and deserializes through [`to_dynamic`]
//! followed by a narrowing conversion, so dynamic values can be embedded in any
//! `Serialize`/`Deserialize` type and used with any serde data format.

use crate::dynamic::{
    DynBool, DynDict, DynFloat, DynInt, DynList, DynStr, DynTuple, Dynamic, DynamicRef,
};
use crate::{to_dynamic, to_json, Value};
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};

impl Serialize for DynamicRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_json(*self)
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

macro_rules! json_serializer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    DynamicRef::from(self).serialize(serializer)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let value = Value::deserialize(deserializer)?;
                    <$ty>::try_from(to_dynamic(&value)).map_err(de::Error::custom)
                }
            }
        )*
    };
}

json_serializer!(Dynamic, DynBool, DynInt, DynFloat, DynStr, DynList, DynTuple, DynDict);

#[cfg(test)]
mod test {
    use super::*;
    use crate::dynamic::{DictKey, Opaque};
    use serde_json::json;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Envelope {
        id: u32,
        payload: Dynamic,
    }

    #[test]
    fn it_serializes_dynamic_fields() {
        let envelope = Envelope {
            id: 7,
            payload: Dynamic::Tuple(vec![Dynamic::Int(1), Dynamic::from("a")]),
        };
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"id":7,"payload":[1,"a"]}"#
        );
    }

    #[test]
    fn it_deserializes_dynamic_fields() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"id":7,"payload":{"b":2.0,"a":2.5}}"#).unwrap();
        assert_eq!(
            envelope.payload,
            vec![("b", Dynamic::Int(2)), ("a", Dynamic::Float(2.5))]
                .into_iter()
                .collect::<Dynamic>()
        );
    }

    #[test]
    fn it_fails_to_serialize_opaque_objects() {
        let value = Dynamic::Object(Opaque::new("file", "<file 'a.txt'>"));
        let error = serde_json::to_string(&value).unwrap_err();
        assert_eq!(
            error.to_string(),
            "to_json not implemented for this type of object: <file 'a.txt'>"
        );
    }

    #[test]
    fn it_narrows_on_deserialization() {
        assert_eq!(
            serde_json::from_value::<DynTuple>(json!([1, 2])).unwrap(),
            DynTuple(vec![Dynamic::Int(1), Dynamic::Int(2)])
        );
        assert_eq!(
            serde_json::from_value::<DynFloat>(json!(3)).unwrap(),
            DynFloat(3.0)
        );
        assert_eq!(
            serde_json::from_value::<DynStr>(json!(null)).unwrap(),
            DynStr("None".into())
        );
        assert_eq!(
            serde_json::from_value::<DynBool>(json!([])).unwrap(),
            DynBool(false)
        );
    }

    #[test]
    fn it_reports_narrowing_failures() {
        let error = serde_json::from_value::<DynInt>(json!({"a": 1})).unwrap_err();
        assert_eq!(error.to_string(), "expected int, found {'a': 1}");
    }

    #[test]
    fn it_deserializes_dict_from_pairs() {
        let DynDict(map) = serde_json::from_value(json!([["k", true]])).unwrap();
        assert_eq!(map[&DictKey::from("k")], Dynamic::Bool(true));
    }

    #[test]
    fn it_serializes_typed_wrappers() {
        assert_eq!(serde_json::to_value(DynInt(5)).unwrap(), json!(5));
        assert_eq!(
            serde_json::to_value(DynList(vec![Dynamic::None])).unwrap(),
            json!([null])
        );
        assert_eq!(serde_json::to_value(DynStr("s".into())).unwrap(), json!("s"));
    }
}
