use super::{Map, Value};
use crate::dynamic::DynamicRef;
use serde_json::Number;
use thiserror::Error;

/// Error returned when a dynamic value has no JSON image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The value is none of none, bool, int, float, str, list, tuple or dict.
    #[error("to_json not implemented for this type of object: {0}")]
    UnsupportedDynamicType(String),
    /// The host refused to cast a value of a recognized type to its native counterpart.
    #[error("could not cast {repr} to {expected}")]
    Cast { expected: &'static str, repr: String },
}

/// Read access to a value of a dynamic host.
///
/// Predicates are queried in a fixed order by [`to_json_with`]; an implementation only has to
/// answer truthfully, it does not need to make them mutually exclusive.
pub trait DynamicHandle: Sized {
    /// `true` for the none singleton and for empty handles.
    fn is_none(&self) -> bool;
    fn is_bool(&self) -> bool;
    fn is_int(&self) -> bool;
    fn is_float(&self) -> bool;
    fn is_str(&self) -> bool;
    fn is_list_or_tuple(&self) -> bool;
    fn is_dict(&self) -> bool;

    fn to_bool(&self) -> Result<bool, ConversionError>;
    fn to_integer(&self) -> Result<Number, ConversionError>;
    fn to_double(&self) -> Result<f64, ConversionError>;
    fn to_text(&self) -> Result<String, ConversionError>;

    /// Items of a list or tuple, in order.
    fn elements(&self) -> Result<Vec<Self>, ConversionError>;
    /// Entries of a dict in mapping order, keys already cast to text.
    fn entries(&self) -> Result<Vec<(String, Self)>, ConversionError>;

    /// Human readable representation used in error messages.
    fn repr(&self) -> String;
}

/// Converts a value of the built-in dynamic model to JSON.
///
/// ```
/// use dynjson::{to_json, Dynamic, Value};
///
/// let value = Dynamic::List(vec![Dynamic::Int(1), Dynamic::from("two")]);
/// assert_eq!(
///     to_json(&value).unwrap(),
///     Value::Array(vec![Value::from(1), Value::from("two")])
/// );
/// ```
pub fn to_json<'a>(value: impl Into<DynamicRef<'a>>) -> Result<Value, ConversionError> {
    to_json_with(&value.into())
}

/// Converts a value of any dynamic host to JSON.
pub fn to_json_with<H: DynamicHandle>(value: &H) -> Result<Value, ConversionError> {
    if value.is_none() {
        return Ok(Value::Null);
    }
    if value.is_bool() {
        return Ok(Value::Bool(value.to_bool()?));
    }
    if value.is_int() {
        return Ok(Value::Number(value.to_integer()?));
    }
    if value.is_float() {
        // NaN and infinities become null.
        return Ok(Value::from(value.to_double()?));
    }
    // str before the containers: strings are iterable on most hosts.
    if value.is_str() {
        return Ok(Value::String(value.to_text()?));
    }
    if value.is_list_or_tuple() {
        let mut result: Vec<Value> = Vec::new();
        for item in value.elements()? {
            result.push(to_json_with(&item)?);
        }
        return Ok(Value::Array(result));
    }
    if value.is_dict() {
        let mut result: Map<String, Value> = Map::new();
        for (key, item) in value.entries()? {
            result.insert(key, to_json_with(&item)?);
        }
        return Ok(Value::Object(result));
    }
    Err(ConversionError::UnsupportedDynamicType(value.repr()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dynamic::{DictKey, Dynamic, Mapping, Opaque};

    #[test]
    fn it_returns_null_for_none() {
        assert_eq!(to_json(&Dynamic::None).unwrap(), Value::Null);
    }

    #[test]
    fn it_returns_bool() {
        assert_eq!(to_json(&Dynamic::Bool(true)).unwrap(), Value::Bool(true));
        assert_eq!(to_json(&Dynamic::Bool(false)).unwrap(), Value::Bool(false));
    }

    #[test]
    fn it_returns_negative_long() {
        assert_eq!(
            to_json(&Dynamic::Int(-2000000)).unwrap(),
            Value::Number(Number::from(-2000000))
        );
    }

    #[test]
    fn it_returns_double() {
        assert_eq!(
            to_json(&Dynamic::Float(1234.5678)).unwrap(),
            Value::Number(Number::from_f64(1234.5678).unwrap())
        );
    }

    #[test]
    fn it_returns_null_for_non_finite_double() {
        assert_eq!(to_json(&Dynamic::Float(f64::NAN)).unwrap(), Value::Null);
        assert_eq!(to_json(&Dynamic::Float(f64::INFINITY)).unwrap(), Value::Null);
    }

    #[test]
    fn it_returns_string_instead_of_characters() {
        assert_eq!(
            to_json(&Dynamic::from("Hello World")).unwrap(),
            Value::String("Hello World".into())
        );
    }

    #[test]
    fn it_returns_array_for_list_and_tuple() {
        let items = vec![Dynamic::Int(1), Dynamic::Bool(true), Dynamic::from("Hello")];
        let expected = Value::Array(vec![
            Value::Number(Number::from(1)),
            Value::Bool(true),
            Value::String("Hello".into()),
        ]);
        assert_eq!(to_json(&Dynamic::List(items.clone())).unwrap(), expected);
        assert_eq!(to_json(&Dynamic::Tuple(items)).unwrap(), expected);
    }

    #[test]
    fn it_returns_object_in_mapping_order() {
        let value: Dynamic = vec![
            ("x", Dynamic::Int(1)),
            ("b", Dynamic::Bool(true)),
            ("s", Dynamic::from("Hello")),
        ]
        .into_iter()
        .collect();
        let Value::Object(map) = to_json(&value).unwrap() else {
            panic!("expected an object");
        };
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["x", "b", "s"]);
    }

    #[test]
    fn it_stringifies_non_string_keys() {
        let mut map = Mapping::new();
        map.insert(DictKey::Int(7), Dynamic::None);
        map.insert(DictKey::Bool(true), Dynamic::None);
        assert_eq!(
            to_json(&Dynamic::Dict(map)).unwrap(),
            Value::Object(Map::from_iter(vec![
                ("7".into(), Value::Null),
                ("True".into(), Value::Null),
            ]))
        );
    }

    #[test]
    fn it_fails_in_case_of_opaque_objects() {
        let value = Dynamic::Object(Opaque::new("Widget", "<Widget object at 0x1>"));
        assert_eq!(
            to_json(&value),
            Err(ConversionError::UnsupportedDynamicType(
                "<Widget object at 0x1>".into()
            ))
        );
    }

    #[test]
    fn it_fails_in_case_of_nested_bytes() {
        let value = Dynamic::List(vec![Dynamic::Int(1), Dynamic::Bytes(b"raw".to_vec())]);
        let error = to_json(&value).unwrap_err();
        assert_eq!(
            error.to_string(),
            "to_json not implemented for this type of object: b'raw'"
        );
    }
}
