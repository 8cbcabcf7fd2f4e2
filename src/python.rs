//! Python host, backed by [`pyo3`].
//!
//! Python objects are read through [`DynamicHandle`] and built through [`PyBuilder`], so the
//! conversion rules are exactly those of the built-in model: `bool` is tested before `int`,
//! `str` before sequences, and anything outside none/bool/int/float/str/list/tuple/dict is
//! rejected.

use crate::value::input::{Converter, DynamicBuilder};
use crate::value::output::{to_json_with, ConversionError, DynamicHandle};
use crate::{Number, Value};
use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyList, PyLong, PyString, PyTuple};

fn cast_error(expected: &'static str, obj: &Bound<'_, PyAny>) -> ConversionError {
    ConversionError::Cast {
        expected,
        repr: DynamicHandle::repr(obj),
    }
}

impl<'py> DynamicHandle for Bound<'py, PyAny> {
    fn is_none(&self) -> bool {
        PyAnyMethods::is_none(self)
    }

    fn is_bool(&self) -> bool {
        self.is_instance_of::<PyBool>()
    }

    fn is_int(&self) -> bool {
        self.is_instance_of::<PyLong>()
    }

    fn is_float(&self) -> bool {
        self.is_instance_of::<PyFloat>()
    }

    fn is_str(&self) -> bool {
        self.is_instance_of::<PyString>()
    }

    fn is_list_or_tuple(&self) -> bool {
        self.is_instance_of::<PyList>() || self.is_instance_of::<PyTuple>()
    }

    fn is_dict(&self) -> bool {
        self.is_instance_of::<PyDict>()
    }

    fn to_bool(&self) -> Result<bool, ConversionError> {
        self.extract::<bool>().map_err(|_| cast_error("bool", self))
    }

    fn to_integer(&self) -> Result<Number, ConversionError> {
        if let Ok(i) = self.extract::<i64>() {
            return Ok(Number::from(i));
        }
        self.extract::<u64>()
            .map(Number::from)
            .map_err(|_| cast_error("int", self))
    }

    fn to_double(&self) -> Result<f64, ConversionError> {
        self.extract::<f64>().map_err(|_| cast_error("float", self))
    }

    fn to_text(&self) -> Result<String, ConversionError> {
        self.extract::<String>().map_err(|_| cast_error("str", self))
    }

    fn elements(&self) -> Result<Vec<Self>, ConversionError> {
        if let Ok(list) = self.downcast::<PyList>() {
            return Ok(list.iter().collect());
        }
        if let Ok(tuple) = self.downcast::<PyTuple>() {
            return Ok(tuple.iter().collect());
        }
        Err(cast_error("list", self))
    }

    fn entries(&self) -> Result<Vec<(String, Self)>, ConversionError> {
        let dict = self
            .downcast::<PyDict>()
            .map_err(|_| cast_error("dict", self))?;
        let mut entries = Vec::with_capacity(dict.len());
        for (key, value) in dict.iter() {
            let key = key
                .str()
                .and_then(|text| text.extract::<String>())
                .map_err(|_| cast_error("str", &key))?;
            entries.push((key, value));
        }
        Ok(entries)
    }

    fn repr(&self) -> String {
        PyAnyMethods::repr(self)
            .map(|repr| repr.to_string())
            .unwrap_or_else(|_| format!("<unrepresentable {} object>", self.get_type()))
    }
}

/// Builds Python objects while holding the GIL.
#[derive(Clone, Copy)]
pub struct PyBuilder<'py>(pub Python<'py>);

impl<'py> DynamicBuilder for PyBuilder<'py> {
    type Output = Bound<'py, PyAny>;
    type Error = PyErr;

    fn none(&self) -> PyResult<Self::Output> {
        Ok(self.0.None().into_bound(self.0))
    }

    fn bool(&self, value: bool) -> PyResult<Self::Output> {
        Ok(value.into_py(self.0).into_bound(self.0))
    }

    fn int(&self, value: i64) -> PyResult<Self::Output> {
        Ok(value.into_py(self.0).into_bound(self.0))
    }

    fn float(&self, value: f64) -> PyResult<Self::Output> {
        Ok(value.into_py(self.0).into_bound(self.0))
    }

    fn str(&self, value: &str) -> PyResult<Self::Output> {
        Ok(PyString::new_bound(self.0, value).into_any())
    }

    fn list(&self, items: Vec<Self::Output>) -> PyResult<Self::Output> {
        Ok(PyList::new_bound(self.0, items).into_any())
    }

    fn dict(&self, entries: Vec<(String, Self::Output)>) -> PyResult<Self::Output> {
        let dict = PyDict::new_bound(self.0);
        for (key, value) in entries {
            dict.set_item(key, value)?;
        }
        Ok(dict.into_any())
    }
}

/// Converts a JSON value into a Python object.
pub fn to_py<'py>(py: Python<'py>, value: &Value) -> PyResult<Bound<'py, PyAny>> {
    to_py_with(py, value, &Converter::new())
}

/// Converts a JSON value into a Python object with the given settings.
pub fn to_py_with<'py>(
    py: Python<'py>,
    value: &Value,
    converter: &Converter,
) -> PyResult<Bound<'py, PyAny>> {
    converter.to_dynamic_with(&PyBuilder(py), value)
}

/// Converts a Python object into a JSON value.
pub fn from_py(obj: &Bound<'_, PyAny>) -> Result<Value, ConversionError> {
    to_json_with(obj)
}

/// JSON value usable as a `#[pyfunction]` parameter or return type.
///
/// Objects without a JSON image are rejected with a `TypeError`.
#[derive(Debug, Clone, PartialEq)]
pub struct Json(pub Value);

impl<'py> FromPyObject<'py> for Json {
    fn extract_bound(ob: &Bound<'py, PyAny>) -> PyResult<Self> {
        match from_py(ob) {
            Ok(value) => Ok(Json(value)),
            Err(err) => {
                log::debug!("rejecting python object as json: {err}");
                Err(PyTypeError::new_err("object is not convertible to json"))
            }
        }
    }
}

impl IntoPy<PyObject> for Json {
    fn into_py(self, py: Python<'_>) -> PyObject {
        match to_py(py, &self.0) {
            Ok(obj) => obj.unbind(),
            Err(err) => {
                log::error!("could not build python object from json: {err}");
                py.None()
            }
        }
    }
}
