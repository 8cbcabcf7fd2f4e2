use super::{DictKey, Dynamic, Mapping, Opaque};
use crate::value::input::DynamicBuilder;
use crate::value::output::{ConversionError, DynamicHandle};
use crate::Number;
use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};

/// Borrowed handle to a dynamic value.
///
/// The converter reads dynamic values exclusively through this view, so neither a [`Dynamic`]
/// nor one of the typed wrappers has to be cloned to be converted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DynamicRef<'a> {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'a str),
    List(&'a [Dynamic]),
    Tuple(&'a [Dynamic]),
    Dict(&'a Mapping),
    Bytes(&'a [u8]),
    Object(&'a Opaque),
}

impl<'a> From<&'a Dynamic> for DynamicRef<'a> {
    fn from(value: &'a Dynamic) -> Self {
        match value {
            Dynamic::None => DynamicRef::None,
            Dynamic::Bool(b) => DynamicRef::Bool(*b),
            Dynamic::Int(i) => DynamicRef::Int(*i),
            Dynamic::Float(f) => DynamicRef::Float(*f),
            Dynamic::Str(s) => DynamicRef::Str(s),
            Dynamic::List(items) => DynamicRef::List(items),
            Dynamic::Tuple(items) => DynamicRef::Tuple(items),
            Dynamic::Dict(map) => DynamicRef::Dict(map),
            Dynamic::Bytes(bytes) => DynamicRef::Bytes(bytes),
            Dynamic::Object(object) => DynamicRef::Object(object),
        }
    }
}

impl<'a> From<&'a DictKey> for DynamicRef<'a> {
    fn from(key: &'a DictKey) -> Self {
        match key {
            DictKey::None => DynamicRef::None,
            DictKey::Bool(b) => DynamicRef::Bool(*b),
            DictKey::Int(i) => DynamicRef::Int(*i),
            DictKey::Str(s) => DynamicRef::Str(s),
        }
    }
}

impl DynamicRef<'_> {
    /// Clones the viewed value into an owned [`Dynamic`].
    pub fn to_owned_value(&self) -> Dynamic {
        match *self {
            DynamicRef::None => Dynamic::None,
            DynamicRef::Bool(b) => Dynamic::Bool(b),
            DynamicRef::Int(i) => Dynamic::Int(i),
            DynamicRef::Float(f) => Dynamic::Float(f),
            DynamicRef::Str(s) => Dynamic::Str(s.into()),
            DynamicRef::List(items) => Dynamic::List(items.to_vec()),
            DynamicRef::Tuple(items) => Dynamic::Tuple(items.to_vec()),
            DynamicRef::Dict(map) => Dynamic::Dict(map.clone()),
            DynamicRef::Bytes(bytes) => Dynamic::Bytes(bytes.to_vec()),
            DynamicRef::Object(object) => Dynamic::Object(object.clone()),
        }
    }

    fn cast_error(&self, expected: &'static str) -> ConversionError {
        ConversionError::Cast {
            expected,
            repr: self.to_string(),
        }
    }
}

impl Display for DynamicRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.to_owned_value(), f)
    }
}

impl DynamicHandle for DynamicRef<'_> {
    fn is_none(&self) -> bool {
        matches!(self, DynamicRef::None)
    }

    fn is_bool(&self) -> bool {
        matches!(self, DynamicRef::Bool(_))
    }

    fn is_int(&self) -> bool {
        matches!(self, DynamicRef::Int(_))
    }

    fn is_float(&self) -> bool {
        matches!(self, DynamicRef::Float(_))
    }

    fn is_str(&self) -> bool {
        matches!(self, DynamicRef::Str(_))
    }

    fn is_list_or_tuple(&self) -> bool {
        matches!(self, DynamicRef::List(_) | DynamicRef::Tuple(_))
    }

    fn is_dict(&self) -> bool {
        matches!(self, DynamicRef::Dict(_))
    }

    fn to_bool(&self) -> Result<bool, ConversionError> {
        match self {
            DynamicRef::Bool(b) => Ok(*b),
            _ => Err(self.cast_error("bool")),
        }
    }

    fn to_integer(&self) -> Result<Number, ConversionError> {
        match self {
            DynamicRef::Int(i) => Ok(Number::from(*i)),
            _ => Err(self.cast_error("int")),
        }
    }

    fn to_double(&self) -> Result<f64, ConversionError> {
        match self {
            DynamicRef::Float(f) => Ok(*f),
            _ => Err(self.cast_error("float")),
        }
    }

    fn to_text(&self) -> Result<String, ConversionError> {
        match self {
            DynamicRef::Str(s) => Ok((*s).to_owned()),
            _ => Err(self.cast_error("str")),
        }
    }

    fn elements(&self) -> Result<Vec<Self>, ConversionError> {
        match *self {
            DynamicRef::List(items) | DynamicRef::Tuple(items) => {
                Ok(items.iter().map(DynamicRef::from).collect())
            }
            _ => Err(self.cast_error("list")),
        }
    }

    fn entries(&self) -> Result<Vec<(String, Self)>, ConversionError> {
        match *self {
            DynamicRef::Dict(map) => Ok(map
                .iter()
                .map(|(key, value)| (key.to_text(), DynamicRef::from(value)))
                .collect()),
            _ => Err(self.cast_error("dict")),
        }
    }

    fn repr(&self) -> String {
        self.to_string()
    }
}

/// Constructs values of the built-in [`Dynamic`] model.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicFactory;

impl DynamicBuilder for DynamicFactory {
    type Output = Dynamic;
    type Error = Infallible;

    fn none(&self) -> Result<Dynamic, Infallible> {
        Ok(Dynamic::None)
    }

    fn bool(&self, value: bool) -> Result<Dynamic, Infallible> {
        Ok(Dynamic::Bool(value))
    }

    fn int(&self, value: i64) -> Result<Dynamic, Infallible> {
        Ok(Dynamic::Int(value))
    }

    fn float(&self, value: f64) -> Result<Dynamic, Infallible> {
        Ok(Dynamic::Float(value))
    }

    fn str(&self, value: &str) -> Result<Dynamic, Infallible> {
        Ok(Dynamic::Str(value.into()))
    }

    fn list(&self, items: Vec<Dynamic>) -> Result<Dynamic, Infallible> {
        Ok(Dynamic::List(items))
    }

    fn dict(&self, entries: Vec<(String, Dynamic)>) -> Result<Dynamic, Infallible> {
        Ok(Dynamic::Dict(
            entries
                .into_iter()
                .map(|(key, value)| (DictKey::Str(key), value))
                .collect(),
        ))
    }
}
