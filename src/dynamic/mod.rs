//! Built-in dynamic object model.
//!
//! [`Dynamic`] mirrors the object model of a dynamically-typed scripting host: a handful of
//! scalar kinds, ordered sequences, an insertion-ordered mapping and opaque host objects that
//! have no JSON image.

pub(crate) mod types;
pub(crate) mod view;

use indexmap::IndexMap;
use std::fmt::{self, Display, Formatter};

pub use types::{DynBool, DynDict, DynFloat, DynInt, DynList, DynStr, DynTuple, NarrowError};
pub use view::{DynamicFactory, DynamicRef};

/// Insertion-ordered mapping used by [`Dynamic::Dict`].
pub type Mapping = IndexMap<DictKey, Dynamic>;

/// A value of the dynamic host.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Dynamic {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Dynamic>),
    Tuple(Vec<Dynamic>),
    Dict(Mapping),
    /// Raw byte string. Iterable, but has no JSON image.
    Bytes(Vec<u8>),
    /// Any other host object (class instance, file handle, function...).
    Object(Opaque),
}

/// Hashable subset of [`Dynamic`] usable as a dict key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DictKey {
    None,
    Bool(bool),
    Int(i64),
    Str(String),
}

/// Host object the converter knows nothing about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opaque {
    class: String,
    repr: String,
}

impl Opaque {
    pub fn new(class: impl Into<String>, repr: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            repr: repr.into(),
        }
    }

    /// Name of the host class the object belongs to.
    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn repr(&self) -> &str {
        &self.repr
    }
}

impl Dynamic {
    /// Host name of the value's type, as shown in diagnostics.
    pub fn type_name(&self) -> &str {
        match self {
            Dynamic::None => "NoneType",
            Dynamic::Bool(_) => "bool",
            Dynamic::Int(_) => "int",
            Dynamic::Float(_) => "float",
            Dynamic::Str(_) => "str",
            Dynamic::List(_) => "list",
            Dynamic::Tuple(_) => "tuple",
            Dynamic::Dict(_) => "dict",
            Dynamic::Bytes(_) => "bytes",
            Dynamic::Object(object) => object.class(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Dynamic::None)
    }

    /// Truth value the host would use in a boolean context.
    pub fn is_truthy(&self) -> bool {
        match self {
            Dynamic::None => false,
            Dynamic::Bool(b) => *b,
            Dynamic::Int(i) => *i != 0,
            Dynamic::Float(f) => *f != 0.0,
            Dynamic::Str(s) => !s.is_empty(),
            Dynamic::List(items) | Dynamic::Tuple(items) => !items.is_empty(),
            Dynamic::Dict(map) => !map.is_empty(),
            Dynamic::Bytes(bytes) => !bytes.is_empty(),
            Dynamic::Object(_) => true,
        }
    }

    /// Borrowed view used by the converter.
    pub fn view(&self) -> DynamicRef<'_> {
        DynamicRef::from(self)
    }
}

impl DictKey {
    /// Text the key turns into when a dict becomes a JSON object.
    pub fn to_text(&self) -> String {
        match self {
            DictKey::None => "None".into(),
            DictKey::Bool(true) => "True".into(),
            DictKey::Bool(false) => "False".into(),
            DictKey::Int(i) => i.to_string(),
            DictKey::Str(s) => s.clone(),
        }
    }
}

impl From<DictKey> for Dynamic {
    fn from(key: DictKey) -> Self {
        match key {
            DictKey::None => Dynamic::None,
            DictKey::Bool(b) => Dynamic::Bool(b),
            DictKey::Int(i) => Dynamic::Int(i),
            DictKey::Str(s) => Dynamic::Str(s),
        }
    }
}

impl TryFrom<Dynamic> for DictKey {
    type Error = NarrowError;

    fn try_from(value: Dynamic) -> Result<Self, Self::Error> {
        match value {
            Dynamic::None => Ok(DictKey::None),
            Dynamic::Bool(b) => Ok(DictKey::Bool(b)),
            Dynamic::Int(i) => Ok(DictKey::Int(i)),
            Dynamic::Str(s) => Ok(DictKey::Str(s)),
            other => Err(NarrowError::new("hashable key", &other)),
        }
    }
}

impl From<&str> for DictKey {
    fn from(s: &str) -> Self {
        DictKey::Str(s.into())
    }
}

impl From<String> for DictKey {
    fn from(s: String) -> Self {
        DictKey::Str(s)
    }
}

macro_rules! dynamic_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(impl From<$source> for Dynamic {
            fn from(value: $source) -> Self {
                Dynamic::$variant(value.into())
            }
        })*
    };
}

dynamic_from! {
    bool => Bool,
    i32 => Int,
    i64 => Int,
    f64 => Float,
    &str => Str,
    String => Str,
    Vec<Dynamic> => List,
    Mapping => Dict,
    Opaque => Object,
}

impl<K: Into<DictKey>, V: Into<Dynamic>> FromIterator<(K, V)> for Dynamic {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Dynamic::Dict(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

fn write_sequence(
    f: &mut Formatter<'_>,
    open: &str,
    close: &str,
    items: &[Dynamic],
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

/// Shortest round-trip digits, switching to exponent notation outside `1e-4..1e16`.
fn float_repr(x: f64) -> String {
    if x.is_nan() {
        return String::from("nan");
    }
    let sign = if x.is_sign_negative() { "-" } else { "" };
    if x.is_infinite() {
        return format!("{sign}inf");
    }
    let scientific = format!("{:e}", x.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let body = if (-4..16).contains(&exponent) {
        if exponent < 0 {
            format!("0.{}{digits}", "0".repeat((-exponent - 1) as usize))
        } else {
            let point = exponent as usize + 1;
            if digits.len() <= point {
                format!("{digits}{}.0", "0".repeat(point - digits.len()))
            } else {
                format!("{}.{}", &digits[..point], &digits[point..])
            }
        }
    } else {
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{exp_sign}{:02}", exponent.abs())
    };
    format!("{sign}{body}")
}

/// Single quotes unless the text holds a single quote and no double quote.
fn write_quoted(
    f: &mut Formatter<'_>,
    prefix: &str,
    chars: impl Iterator<Item = char> + Clone,
) -> fmt::Result {
    let has_single = chars.clone().any(|c| c == '\'');
    let has_double = chars.clone().any(|c| c == '"');
    let quote = if has_single && !has_double { '"' } else { '\'' };
    write!(f, "{prefix}{quote}")?;
    for c in chars {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => write!(f, "\\{c}")?,
            c if (c as u32) < 0x20 || (c as u32 >= 0x7f && (c as u32) < 0xa0) => {
                write!(f, "\\x{:02x}", c as u32)?
            }
            c if !prefix.is_empty() && !c.is_ascii() => write!(f, "\\x{:02x}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "{quote}")
}

impl Display for DictKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DictKey::Str(s) => write_quoted(f, "", s.chars()),
            other => f.write_str(&other.to_text()),
        }
    }
}

/// Renders the host `repr` of the value.
impl Display for Dynamic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::None => f.write_str("None"),
            Dynamic::Bool(true) => f.write_str("True"),
            Dynamic::Bool(false) => f.write_str("False"),
            Dynamic::Int(i) => write!(f, "{i}"),
            Dynamic::Float(x) => f.write_str(&float_repr(*x)),
            Dynamic::Str(s) => write_quoted(f, "", s.chars()),
            Dynamic::List(items) => write_sequence(f, "[", "]", items),
            Dynamic::Tuple(items) if items.len() == 1 => write!(f, "({},)", items[0]),
            Dynamic::Tuple(items) => write_sequence(f, "(", ")", items),
            Dynamic::Dict(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Dynamic::Bytes(bytes) => write_quoted(f, "b", bytes.iter().map(|b| char::from(*b))),
            Dynamic::Object(object) => f.write_str(object.repr()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_renders_scalars_like_the_host() {
        assert_eq!(Dynamic::None.to_string(), "None");
        assert_eq!(Dynamic::Bool(true).to_string(), "True");
        assert_eq!(Dynamic::Int(-7).to_string(), "-7");
        assert_eq!(Dynamic::Float(3.0).to_string(), "3.0");
        assert_eq!(Dynamic::Float(f64::NAN).to_string(), "nan");
        assert_eq!(Dynamic::from("hi").to_string(), "'hi'");
        assert_eq!(Dynamic::from("it's").to_string(), "\"it's\"");
        assert_eq!(Dynamic::from("a'\"\n").to_string(), "'a\\'\"\\n'");
    }

    #[test]
    fn it_renders_floats_like_the_host() {
        assert_eq!(Dynamic::Float(1e20).to_string(), "1e+20");
        assert_eq!(Dynamic::Float(1.5e-5).to_string(), "1.5e-05");
        assert_eq!(Dynamic::Float(1e16).to_string(), "1e+16");
        assert_eq!(Dynamic::Float(1e15).to_string(), "1000000000000000.0");
        assert_eq!(Dynamic::Float(0.0001).to_string(), "0.0001");
        assert_eq!(Dynamic::Float(-2.5).to_string(), "-2.5");
        assert_eq!(Dynamic::Float(-0.0).to_string(), "-0.0");
        assert_eq!(Dynamic::Float(123.456).to_string(), "123.456");
        assert_eq!(Dynamic::Float(f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(DynStr::from(Dynamic::Float(1e20)), DynStr("1e+20".into()));
    }

    #[test]
    fn it_renders_containers() {
        let value = Dynamic::Tuple(vec![Dynamic::Int(1)]);
        assert_eq!(value.to_string(), "(1,)");

        let value: Dynamic = vec![("a", Dynamic::List(vec![Dynamic::Int(1), Dynamic::Float(2.5)]))]
            .into_iter()
            .collect();
        assert_eq!(value.to_string(), "{'a': [1, 2.5]}");

        assert_eq!(Dynamic::Bytes(b"a\n\xff".to_vec()).to_string(), "b'a\\n\\xff'");
    }

    #[test]
    fn it_renders_opaque_objects_with_their_repr() {
        let object = Opaque::new("Widget", "<Widget object at 0x10>");
        let value = Dynamic::from(object);
        assert_eq!(value.type_name(), "Widget");
        assert_eq!(value.to_string(), "<Widget object at 0x10>");
    }

    #[test]
    fn it_follows_truthiness_rules() {
        assert!(!Dynamic::None.is_truthy());
        assert!(!Dynamic::Int(0).is_truthy());
        assert!(Dynamic::Float(0.5).is_truthy());
        assert!(!Dynamic::from("").is_truthy());
        assert!(!Dynamic::List(vec![]).is_truthy());
        assert!(Dynamic::Object(Opaque::new("object", "<object>")).is_truthy());
    }

    #[test]
    fn it_converts_dict_keys_to_text() {
        assert_eq!(DictKey::None.to_text(), "None");
        assert_eq!(DictKey::Bool(false).to_text(), "False");
        assert_eq!(DictKey::Int(42).to_text(), "42");
        assert_eq!(DictKey::from("k").to_text(), "k");
    }

    #[test]
    fn it_rejects_unhashable_keys() {
        assert_eq!(
            DictKey::try_from(Dynamic::List(vec![])),
            Err(NarrowError::new("hashable key", &Dynamic::List(vec![])))
        );
    }
}
