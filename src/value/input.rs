use super::{Number, Value};
use crate::dynamic::{Dynamic, DynamicFactory};
use serde::{Deserialize, Serialize};

/// Construction primitives of a dynamic host.
pub trait DynamicBuilder {
    type Output;
    /// Failure raised by the host while allocating a value.
    type Error;

    fn none(&self) -> Result<Self::Output, Self::Error>;
    fn bool(&self, value: bool) -> Result<Self::Output, Self::Error>;
    fn int(&self, value: i64) -> Result<Self::Output, Self::Error>;
    fn float(&self, value: f64) -> Result<Self::Output, Self::Error>;
    fn str(&self, value: &str) -> Result<Self::Output, Self::Error>;
    fn list(&self, items: Vec<Self::Output>) -> Result<Self::Output, Self::Error>;
    fn dict(&self, entries: Vec<(String, Self::Output)>) -> Result<Self::Output, Self::Error>;
}

/// How JSON numbers are split into dynamic integers and floats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberMode {
    /// Integral values (`d == d.floor()`) become integers, everything else floats.
    /// `2.0` and `1e20` are integers under this rule; out of range values saturate.
    #[default]
    Heuristic,
    /// Numbers stored as `i64` become integers, everything else floats.
    Native,
}

/// JSON to dynamic conversion settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Converter {
    number_mode: NumberMode,
}

impl Converter {
    pub const fn new() -> Self {
        Self {
            number_mode: NumberMode::Heuristic,
        }
    }

    pub const fn with_number_mode(mut self, number_mode: NumberMode) -> Self {
        self.number_mode = number_mode;
        self
    }

    pub const fn number_mode(&self) -> NumberMode {
        self.number_mode
    }

    /// Converts `value` into the built-in dynamic model.
    pub fn to_dynamic(&self, value: &Value) -> Dynamic {
        match self.to_dynamic_with(&DynamicFactory, value) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }

    /// Converts `value` using the construction primitives of `builder`.
    pub fn to_dynamic_with<B: DynamicBuilder>(
        &self,
        builder: &B,
        value: &Value,
    ) -> Result<B::Output, B::Error> {
        match value {
            Value::Null => builder.none(),
            Value::Bool(b) => builder.bool(*b),
            Value::Number(n) => self.number_to_dynamic(builder, n),
            Value::String(s) => builder.str(s),
            Value::Array(vec) => {
                let mut items: Vec<B::Output> = Vec::with_capacity(vec.len());
                for item in vec {
                    items.push(self.to_dynamic_with(builder, item)?);
                }
                builder.list(items)
            }
            Value::Object(obj) => {
                let mut entries: Vec<(String, B::Output)> = Vec::with_capacity(obj.len());
                for (key, item) in obj.iter() {
                    entries.push((key.clone(), self.to_dynamic_with(builder, item)?));
                }
                builder.dict(entries)
            }
        }
    }

    fn number_to_dynamic<B: DynamicBuilder>(
        &self,
        builder: &B,
        n: &Number,
    ) -> Result<B::Output, B::Error> {
        // Without arbitrary precision every number has an f64 reading.
        let Some(d) = n.as_f64() else {
            return builder.none();
        };
        match self.number_mode {
            NumberMode::Heuristic if d == d.floor() => {
                builder.int(n.as_i64().unwrap_or(d as i64))
            }
            NumberMode::Heuristic => builder.float(d),
            NumberMode::Native => match n.as_i64() {
                Some(i) => builder.int(i),
                None => builder.float(d),
            },
        }
    }
}

/// Converts a JSON value into the built-in dynamic model. Never fails.
///
/// ```
/// use dynjson::{to_dynamic, Dynamic, Value};
///
/// let value: Value = serde_json::from_str(r#"[3.0, 3.5, null]"#).unwrap();
/// assert_eq!(
///     to_dynamic(&value),
///     Dynamic::List(vec![Dynamic::Int(3), Dynamic::Float(3.5), Dynamic::None])
/// );
/// ```
pub fn to_dynamic(value: &Value) -> Dynamic {
    Converter::new().to_dynamic(value)
}
