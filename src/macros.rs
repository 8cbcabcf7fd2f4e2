use crate::boundary::{CallError, TypeCaster};
use crate::dynamic::Dynamic;

#[doc(hidden)]
pub fn __check_arity(function: &str, expected: usize, args: &[Dynamic]) -> Result<(), CallError> {
    if args.len() != expected {
        return Err(CallError::ArgumentCount {
            function: String::from(function),
            expected,
            given: args.len(),
        });
    }
    Ok(())
}

#[doc(hidden)]
pub fn __load_arg<T: TypeCaster>(
    function: &str,
    argument: &str,
    index: usize,
    src: &Dynamic,
) -> Result<T, CallError> {
    T::load(src).ok_or_else(|| CallError::ArgumentRejected {
        function: String::from(function),
        argument: String::from(argument),
        index,
        expected: T::NAME,
        found: src.to_string(),
    })
}

/// Macro to expose typed Rust functions to the dynamic host as a [`crate::Module`].
///
/// Every parameter is loaded through its [`TypeCaster`]; a rejected argument makes the call fail
/// with [`CallError::ArgumentRejected`]. Return values are cast back with [`TypeCaster::cast`].
///
/// ## Example:
///
/// ```
/// use dynjson::{declare_module, CallError, Dynamic, Value};
///
/// declare_module! {
///     pub Documents {
///         fn merge(base: Value, patch: Value) -> Value {
///             let mut base = base;
///             if let (Some(base), Value::Object(patch)) = (base.as_object_mut(), patch) {
///                 base.extend(patch);
///             }
///             base
///         }
///
///         fn count(items: Vec<Value>) -> i64 {
///             items.len() as i64
///         }
///     }
/// }
///
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// let documents = Documents::new();
/// let base: Dynamic = vec![("a", 1)].into_iter().collect();
/// let patch: Dynamic = vec![("b", 2)].into_iter().collect();
/// assert_eq!(
///     documents.call("merge", &[base, patch])?,
///     vec![("a", 1), ("b", 2)].into_iter().collect::<Dynamic>()
/// );
/// assert_eq!(
///     documents.call("count", &[Dynamic::List(vec![Dynamic::None])])?,
///     Dynamic::Int(1)
/// );
/// assert!(matches!(
///     documents.call("count", &[Dynamic::Int(3)]),
///     Err(CallError::ArgumentRejected { .. })
/// ));
/// #
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "declare-module")]
#[macro_export]
macro_rules! declare_module {
    (
        $(#[$struct_meta:meta])*
        $vis:vis $struct_name:ident {
            $(
                fn $fn_name:ident(
                    $($fn_arg_name:ident : $fn_arg_type:ty),*
                )$( -> $fn_res_type:ty)? $fn_body:block
            )*
        }
    ) => {
        $(#[$struct_meta])*
        $vis struct $struct_name {
            module: $crate::Module
        }

        impl $struct_name {
            $vis fn new() -> $struct_name {
                let mut module = $crate::Module::new(stringify!($struct_name));
                $(
                    $crate::__module_fn!(
                        module,
                        fn $fn_name($($fn_arg_name : $fn_arg_type),*)$( -> $fn_res_type)? $fn_body
                    );
                )*
                $struct_name { module }
            }

            $vis fn call(
                &self,
                name: &str,
                args: &[$crate::Dynamic],
            ) -> ::core::result::Result<$crate::Dynamic, $crate::CallError> {
                self.module.call(name, args)
            }

            $vis fn module(&self) -> &$crate::Module {
                &self.module
            }
        }
    };
}

#[cfg(feature = "declare-module")]
#[macro_export]
#[doc(hidden)]
macro_rules! __module_fn {
    (
        $module:ident,
        fn $name:ident($($arg_name:ident : $arg_type:ty),*) -> $res_type:ty $body:block
    ) => {
        $crate::__module_fn_impl!(
            module = ($module)
            name = ($name)
            args = ($($arg_name : $arg_type),*)
            res = ($res_type)
            body = ($body)
        );
    };
    (
        $module:ident,
        fn $name:ident($($arg_name:ident : $arg_type:ty),*) $body:block
    ) => {
        $crate::__module_fn_impl!(
            module = ($module)
            name = ($name)
            args = ($($arg_name : $arg_type),*)
            res = (())
            body = ($body)
        );
    };
}

#[cfg(feature = "declare-module")]
#[macro_export]
#[doc(hidden)]
macro_rules! __module_fn_impl {
    (
        module = ($module:ident)
        name = ($name:ident)
        args = ($($arg_name:ident : $arg_type:ty),*)
        res = ($res_type:ty)
        body = ($body:block)
    ) => {
        $module.define(stringify!($name), |args: &[$crate::Dynamic]| {
            let names: &[&str] = &[$(stringify!($arg_name)),*];
            $crate::macros::__check_arity(stringify!($name), names.len(), args)?;
            #[allow(unused_mut, unused_variables)]
            let mut positions = 0usize..;
            $(
                let position = positions.next().unwrap_or_default();
                let $arg_name: $arg_type = $crate::macros::__load_arg(
                    stringify!($name),
                    stringify!($arg_name),
                    position,
                    &args[position],
                )?;
            )*
            let result: $res_type = (move || -> $res_type { $body })();
            ::core::result::Result::Ok($crate::TypeCaster::cast(result))
        });
    };
}
