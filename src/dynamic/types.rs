//! Typed wrappers, one per dynamic type with a JSON image.
//!
//! Narrowing a [`Dynamic`] into a wrapper follows the coercing constructors of the host
//! (`bool(x)`, `int(x)`, `list(x)`, ...) rather than a strict type check.

use super::{DictKey, Dynamic, DynamicRef, Mapping};
use thiserror::Error;

/// A [`Dynamic`] could not be narrowed to the requested type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected}, found {found}")]
pub struct NarrowError {
    pub expected: &'static str,
    pub found: String,
}

impl NarrowError {
    pub(crate) fn new(expected: &'static str, found: &Dynamic) -> Self {
        Self {
            expected,
            found: found.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DynBool(pub bool);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DynInt(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DynFloat(pub f64);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DynStr(pub String);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DynList(pub Vec<Dynamic>);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DynTuple(pub Vec<Dynamic>);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DynDict(pub Mapping);

macro_rules! typed_wrapper {
    ($($wrapper:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$wrapper> for Dynamic {
                fn from(value: $wrapper) -> Self {
                    Dynamic::$variant(value.0)
                }
            }

            impl<'a> From<&'a $wrapper> for DynamicRef<'a> {
                fn from(value: &'a $wrapper) -> Self {
                    DynamicRef::$variant(typed_wrapper!(@borrow value.0, $variant))
                }
            }
        )*
    };
    (@borrow $value:expr, Bool) => { $value };
    (@borrow $value:expr, Int) => { $value };
    (@borrow $value:expr, Float) => { $value };
    (@borrow $value:expr, $other:ident) => { &$value };
}

typed_wrapper! {
    DynBool => Bool,
    DynInt => Int,
    DynFloat => Float,
    DynStr => Str,
    DynList => List,
    DynTuple => Tuple,
    DynDict => Dict,
}

fn parse_text<T: std::str::FromStr>(
    text: &str,
    expected: &'static str,
    value: &Dynamic,
) -> Result<T, NarrowError> {
    text.trim()
        .parse()
        .map_err(|_| NarrowError::new(expected, value))
}

/// Items `list(x)` would produce. Non-iterables are handed back.
fn iterate(value: Dynamic) -> Result<Vec<Dynamic>, Dynamic> {
    match value {
        Dynamic::List(items) | Dynamic::Tuple(items) => Ok(items),
        Dynamic::Str(s) => Ok(s.chars().map(|c| Dynamic::Str(c.into())).collect()),
        Dynamic::Bytes(bytes) => Ok(bytes.into_iter().map(|b| Dynamic::Int(b.into())).collect()),
        Dynamic::Dict(map) => Ok(map.into_keys().map(Dynamic::from).collect()),
        other => Err(other),
    }
}

impl From<Dynamic> for DynBool {
    fn from(value: Dynamic) -> Self {
        DynBool(value.is_truthy())
    }
}

impl TryFrom<Dynamic> for DynInt {
    type Error = NarrowError;

    fn try_from(value: Dynamic) -> Result<Self, Self::Error> {
        match &value {
            Dynamic::Int(i) => Ok(DynInt(*i)),
            Dynamic::Bool(b) => Ok(DynInt((*b).into())),
            Dynamic::Float(f) if f.is_finite() => Ok(DynInt(f.trunc() as i64)),
            Dynamic::Str(s) => parse_text(s, "int", &value).map(DynInt),
            _ => Err(NarrowError::new("int", &value)),
        }
    }
}

impl TryFrom<Dynamic> for DynFloat {
    type Error = NarrowError;

    fn try_from(value: Dynamic) -> Result<Self, Self::Error> {
        match &value {
            Dynamic::Float(f) => Ok(DynFloat(*f)),
            Dynamic::Int(i) => Ok(DynFloat(*i as f64)),
            Dynamic::Bool(b) => Ok(DynFloat(if *b { 1.0 } else { 0.0 })),
            Dynamic::Str(s) => parse_text(s, "float", &value).map(DynFloat),
            _ => Err(NarrowError::new("float", &value)),
        }
    }
}

impl From<Dynamic> for DynStr {
    fn from(value: Dynamic) -> Self {
        match value {
            Dynamic::Str(s) => DynStr(s),
            other => DynStr(other.to_string()),
        }
    }
}

impl TryFrom<Dynamic> for DynList {
    type Error = NarrowError;

    fn try_from(value: Dynamic) -> Result<Self, Self::Error> {
        iterate(value)
            .map(DynList)
            .map_err(|other| NarrowError::new("list", &other))
    }
}

impl TryFrom<Dynamic> for DynTuple {
    type Error = NarrowError;

    fn try_from(value: Dynamic) -> Result<Self, Self::Error> {
        iterate(value)
            .map(DynTuple)
            .map_err(|other| NarrowError::new("tuple", &other))
    }
}

impl TryFrom<Dynamic> for DynDict {
    type Error = NarrowError;

    fn try_from(value: Dynamic) -> Result<Self, Self::Error> {
        let pairs = match value {
            Dynamic::Dict(map) => return Ok(DynDict(map)),
            Dynamic::List(pairs) | Dynamic::Tuple(pairs) => pairs,
            other => return Err(NarrowError::new("dict", &other)),
        };
        let mut map = Mapping::with_capacity(pairs.len());
        for pair in pairs {
            match pair {
                Dynamic::List(kv) | Dynamic::Tuple(kv) if kv.len() == 2 => {
                    let mut kv = kv.into_iter();
                    if let (Some(key), Some(item)) = (kv.next(), kv.next()) {
                        map.insert(DictKey::try_from(key)?, item);
                    }
                }
                other => return Err(NarrowError::new("key/value pair", &other)),
            }
        }
        Ok(DynDict(map))
    }
}
