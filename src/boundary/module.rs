use crate::dynamic::Dynamic;
use indexmap::IndexMap;
use std::fmt::{Debug, Formatter};
use thiserror::Error;

/// Native function callable from the dynamic host.
pub type NativeFunction = Box<dyn Fn(&[Dynamic]) -> Result<Dynamic, CallError> + Send + Sync>;

/// Error returned by [`Module::call`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("module `{module}` has no function `{function}`")]
    UnknownFunction { module: String, function: String },
    #[error("{function}() takes {expected} argument(s) but {given} were given")]
    ArgumentCount {
        function: String,
        expected: usize,
        given: usize,
    },
    /// A [`crate::TypeCaster`] rejected an argument.
    #[error("{function}(): incompatible argument `{argument}` at position {index}, expected {expected}, got {found}")]
    ArgumentRejected {
        function: String,
        argument: String,
        index: usize,
        expected: &'static str,
        found: String,
    },
}

/// Named table of native functions exposed to the dynamic host.
///
/// ## Example
///
/// ```
/// use dynjson::{CallError, Dynamic, Module, TypeCaster, Value};
///
/// let mut module = Module::new("config");
/// module.define("keys", |args: &[Dynamic]| {
///     let document = args
///         .first()
///         .and_then(Value::load)
///         .ok_or_else(|| CallError::ArgumentRejected {
///             function: "keys".into(),
///             argument: "document".into(),
///             index: 0,
///             expected: Value::NAME,
///             found: format!("{:?}", args.first()),
///         })?;
///     let keys: Vec<String> = document
///         .as_object()
///         .map(|obj| obj.keys().cloned().collect())
///         .unwrap_or_default();
///     Ok(keys.cast())
/// });
///
/// let document: Dynamic = vec![("b", 1), ("a", 2)].into_iter().collect();
/// assert_eq!(
///     module.call("keys", &[document]).unwrap(),
///     Dynamic::List(vec![Dynamic::from("b"), Dynamic::from("a")])
/// );
/// ```
pub struct Module {
    name: String,
    functions: IndexMap<String, NativeFunction>,
}

impl Debug for Module {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Module {{ name: {:?}, functions: {:?} }}",
            self.name,
            self.functions.keys().collect::<Vec<_>>()
        )
    }
}

impl Module {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            functions: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers `function` under `name`, replacing any previous definition.
    pub fn define<F>(&mut self, name: &str, function: F) -> &mut Self
    where
        F: Fn(&[Dynamic]) -> Result<Dynamic, CallError> + Send + Sync + 'static,
    {
        log::debug!("module {}: define {name}", self.name);
        self.functions.insert(name.into(), Box::new(function));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Names of the defined functions, in definition order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Calls the function `name` with dynamic `args`.
    pub fn call(&self, name: &str, args: &[Dynamic]) -> Result<Dynamic, CallError> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| CallError::UnknownFunction {
                module: self.name.clone(),
                function: name.into(),
            })?;
        log::trace!("module {}: call {name} with {} argument(s)", self.name, args.len());
        function(args)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{TypeCaster, Value};
    use serde_json::json;

    fn echo_module() -> Module {
        let mut module = Module::new("test");
        module.define("echo", |args: &[Dynamic]| {
            match args.first().and_then(Value::load) {
                Some(value) => Ok(value.cast()),
                None => Err(CallError::ArgumentRejected {
                    function: "echo".into(),
                    argument: "value".into(),
                    index: 0,
                    expected: Value::NAME,
                    found: args.first().map(Dynamic::to_string).unwrap_or_default(),
                }),
            }
        });
        module
    }

    #[test]
    fn it_calls_defined_functions() {
        let module = echo_module();
        let arg = json!({"z": [1, 2.5]}).cast();
        assert_eq!(module.call("echo", &[arg.clone()]).unwrap(), arg);
    }

    #[test]
    fn it_fails_in_case_of_unknown_function() {
        assert_eq!(
            echo_module().call("missing", &[]).unwrap_err(),
            CallError::UnknownFunction {
                module: "test".into(),
                function: "missing".into()
            }
        );
    }

    #[test]
    fn it_lists_function_names_in_definition_order() {
        let mut module = echo_module();
        module.define("alpha", |_: &[Dynamic]| Ok(Dynamic::None));
        assert!(module.contains("alpha"));
        assert_eq!(module.name(), "test");
        assert_eq!(module.function_names().collect::<Vec<_>>(), vec!["echo", "alpha"]);
    }

    #[test]
    fn it_supports_debug() {
        assert_eq!(
            format!("{:?}", echo_module()),
            "Module { name: \"test\", functions: [\"echo\"] }"
        );
    }
}
