//! `dynjson` converts between JSON values and the values of a dynamically-typed host (a
//! scripting runtime embedded in a Rust program).
//!
//! JSON values are represented using `Value` from [`serde_json`]; host values either use the
//! built-in [`Dynamic`] model or any type implementing [`DynamicHandle`] and
//! [`DynamicBuilder`] (a Python backend based on `pyo3` ships behind the `python` feature).
//!
//! * [`to_dynamic`] never fails: every JSON value has a dynamic image.
//! * [`to_json`] fails with [`ConversionError::UnsupportedDynamicType`] for host values other
//!   than none, bool, int, float, str, list, tuple and dict.
//!
//! Dynamic values implement [`serde::Serialize`]/[`serde::Deserialize`] through the same
//! conversion, and [`TypeCaster`] lets JSON values cross a native function boundary
//! ([`Module`], [`declare_module!`]).
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! dynjson = { version = "0.1.0", features = ["full"] }
//! ```
//!
//! ## Example using `to_dynamic` and `to_json`
//!
//! ```
//! use dynjson::{to_dynamic, to_json, Dynamic, Map, Number, Value};
//!
//! let value: Value = serde_json::from_str(r#"{"id": 21, "ratio": 0.5, "tags": ["a"]}"#).unwrap();
//! let dynamic = to_dynamic(&value);
//!
//! assert_eq!(
//!     dynamic,
//!     vec![
//!         ("id", Dynamic::Int(21)),
//!         ("ratio", Dynamic::Float(0.5)),
//!         ("tags", Dynamic::List(vec![Dynamic::from("a")])),
//!     ]
//!     .into_iter()
//!     .collect::<Dynamic>()
//! );
//!
//! assert_eq!(
//!     to_json(&dynamic).unwrap(),
//!     Value::Object(Map::from_iter(vec![
//!         ("id".into(), Value::Number(Number::from(21))),
//!         ("ratio".into(), Value::Number(Number::from_f64(0.5).unwrap())),
//!         ("tags".into(), Value::Array(vec![Value::String("a".into())])),
//!     ]))
//! );
//! ```
//!
//! ## Example using `declare_module`
//!
//! ```
//! use dynjson::{declare_module, Dynamic, Value};
//!
//! declare_module! {
//!     Settings {
//!         fn keys(document: Value) -> Vec<String> {
//!             document
//!                 .as_object()
//!                 .map(|obj| obj.keys().cloned().collect())
//!                 .unwrap_or_default()
//!         }
//!     }
//! }
//!
//! let settings = Settings::new();
//! let document: Dynamic = vec![("theme", "dark"), ("font", "mono")].into_iter().collect();
//! assert_eq!(
//!     settings.call("keys", &[document]).unwrap(),
//!     Dynamic::List(vec![Dynamic::from("theme"), Dynamic::from("font")])
//! );
//! ```

mod bindings;
mod boundary;
mod dynamic;
mod value;

pub use boundary::{CallError, Module, NativeFunction, TypeCaster};
pub use dynamic::{
    DictKey, DynBool, DynDict, DynFloat, DynInt, DynList, DynStr, DynTuple, Dynamic,
    DynamicFactory, DynamicRef, Mapping, NarrowError, Opaque,
};
pub use value::input::{to_dynamic, Converter, DynamicBuilder, NumberMode};
pub use value::output::{to_json, to_json_with, ConversionError, DynamicHandle};
pub use value::{from_value, to_value, JsonError, Map, Number, Value};

/// [`declare_module!`] macro related helpers.
#[cfg(feature = "declare-module")]
pub mod macros;
/// Python host backed by `pyo3`.
#[cfg(feature = "python")]
pub mod python;
