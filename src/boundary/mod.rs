//! Native/dynamic call boundary.
//!
//! A [`TypeCaster`] decides whether a dynamic value is acceptable as a native parameter and
//! turns native return values back into dynamic ones. Rejection is a plain `None`: the
//! boundary reports it as an argument mismatch instead of forwarding the underlying error.

mod module;

pub use module::{CallError, Module, NativeFunction};

use crate::dynamic::Dynamic;
use crate::{to_dynamic, to_json, Value};

/// Moves values of a native type across the boundary.
pub trait TypeCaster: Sized {
    /// Type name shown when an argument is rejected.
    const NAME: &'static str;

    /// Accepts `src` as a native value, or rejects it with `None`.
    fn load(src: &Dynamic) -> Option<Self>;

    /// Hands a native value back to the host. Never fails.
    fn cast(self) -> Dynamic;
}

impl TypeCaster for Value {
    const NAME: &'static str = "json";

    fn load(src: &Dynamic) -> Option<Self> {
        match to_json(src) {
            Ok(value) => Some(value),
            Err(err) => {
                log::debug!("rejecting {} as json: {err}", src.type_name());
                None
            }
        }
    }

    fn cast(self) -> Dynamic {
        to_dynamic(&self)
    }
}

impl TypeCaster for Dynamic {
    const NAME: &'static str = "object";

    fn load(src: &Dynamic) -> Option<Self> {
        Some(src.clone())
    }

    fn cast(self) -> Dynamic {
        self
    }
}

impl TypeCaster for bool {
    const NAME: &'static str = "bool";

    fn load(src: &Dynamic) -> Option<Self> {
        match src {
            Dynamic::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn cast(self) -> Dynamic {
        Dynamic::Bool(self)
    }
}

impl TypeCaster for i64 {
    const NAME: &'static str = "int";

    fn load(src: &Dynamic) -> Option<Self> {
        match src {
            Dynamic::Int(i) => Some(*i),
            _ => None,
        }
    }

    fn cast(self) -> Dynamic {
        Dynamic::Int(self)
    }
}

impl TypeCaster for f64 {
    const NAME: &'static str = "float";

    fn load(src: &Dynamic) -> Option<Self> {
        match src {
            Dynamic::Float(f) => Some(*f),
            Dynamic::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    fn cast(self) -> Dynamic {
        Dynamic::Float(self)
    }
}

impl TypeCaster for String {
    const NAME: &'static str = "str";

    fn load(src: &Dynamic) -> Option<Self> {
        match src {
            Dynamic::Str(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn cast(self) -> Dynamic {
        Dynamic::Str(self)
    }
}

impl<T: TypeCaster> TypeCaster for Option<T> {
    const NAME: &'static str = "optional";

    fn load(src: &Dynamic) -> Option<Self> {
        match src {
            Dynamic::None => Some(None),
            other => T::load(other).map(Some),
        }
    }

    fn cast(self) -> Dynamic {
        self.map_or(Dynamic::None, T::cast)
    }
}

impl<T: TypeCaster> TypeCaster for Vec<T> {
    const NAME: &'static str = "list";

    fn load(src: &Dynamic) -> Option<Self> {
        match src {
            Dynamic::List(items) | Dynamic::Tuple(items) => items.iter().map(T::load).collect(),
            _ => None,
        }
    }

    fn cast(self) -> Dynamic {
        Dynamic::List(self.into_iter().map(T::cast).collect())
    }
}

impl TypeCaster for () {
    const NAME: &'static str = "None";

    fn load(src: &Dynamic) -> Option<Self> {
        src.is_none().then_some(())
    }

    fn cast(self) -> Dynamic {
        Dynamic::None
    }
}
