// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::schema::defaults::DefaultRegistry;
use crate::schema::error::CoercionError;
use crate::schema::{Field, ScalarType, Schema, Type};
use crate::{TypedObject, TypedValue, Value};

/// Recursive coercion engine: transforms an untyped [`Value`] into a
/// [`TypedValue`] conformant to a [`Schema`], or fails with the first
/// shape mismatch encountered.
///
/// The engine holds no state beyond a reference to the default-value
/// registry consulted for absent object fields; every call is a pure
/// function of its inputs and recursion depth is bounded by schema depth.
pub struct Coercer<'a> {
    defaults: &'a DefaultRegistry,
}

impl<'a> Coercer<'a> {
    pub fn new(defaults: &'a DefaultRegistry) -> Self {
        Coercer { defaults }
    }

    /// Coerces `value` into the shape `schema` declares.
    ///
    /// # Arguments
    /// * `value` - The decoded wire value to coerce
    /// * `schema` - The schema to coerce against
    ///
    /// # Returns
    /// * `Ok(TypedValue)` conformant to the schema
    /// * `Err(CoercionError)` on the first shape mismatch, with the path
    ///   where it occurred
    pub fn coerce(&self, value: &Value, schema: &Schema) -> Result<TypedValue, CoercionError> {
        self.coerce_with_path(value, schema, "")
    }

    /// Internal entry point that tracks the current path for error
    /// reporting.
    fn coerce_with_path(
        &self,
        value: &Value,
        schema: &Schema,
        path: &str,
    ) -> Result<TypedValue, CoercionError> {
        match schema.as_type() {
            Type::Scalar(t) => Self::coerce_scalar(value, *t, path),
            Type::ScalarArray(t) => Self::coerce_scalar_array(value, *t, path),
            Type::Object(fields) => self.coerce_object(value, fields, path),
            Type::ObjectArray(fields) => self.coerce_object_array(value, fields, path),
        }
    }

    fn coerce_scalar(value: &Value, t: ScalarType, path: &str) -> Result<TypedValue, CoercionError> {
        match (t, value) {
            // Numeric input for an int field is truncated toward zero,
            // not rounded: every wire number shares one floating-point
            // representation, and 3.7 must become 3.
            (ScalarType::Int, Value::Number(n)) => Ok(TypedValue::Int(n.to_i64_trunc())),
            (ScalarType::Float, Value::Number(n)) => Ok(TypedValue::Float(n.as_f64())),
            (ScalarType::String, Value::String(s)) => Ok(TypedValue::String(s.clone())),
            (ScalarType::Boolean, Value::Bool(b)) => Ok(TypedValue::Bool(*b)),
            _ => Err(Self::mismatch(t.tag(), value, path)),
        }
    }

    // Element-wise coercion, order and length preserved. Whole-array
    // rejection: the first element of the wrong scalar type aborts the
    // call, no partial array is returned.
    fn coerce_scalar_array(
        value: &Value,
        t: ScalarType,
        path: &str,
    ) -> Result<TypedValue, CoercionError> {
        let items = match value {
            Value::Array(items) => items,
            _ => return Err(Self::mismatch(t.array_tag(), value, path)),
        };

        match t {
            ScalarType::Int => Self::collect_elements(items, path, |item, item_path| match item {
                Value::Number(n) => Ok(n.to_i64_trunc()),
                _ => Err(Self::mismatch("int", item, item_path)),
            })
            .map(TypedValue::IntArray),
            ScalarType::Float => Self::collect_elements(items, path, |item, item_path| match item {
                Value::Number(n) => Ok(n.as_f64()),
                _ => Err(Self::mismatch("float", item, item_path)),
            })
            .map(TypedValue::FloatArray),
            ScalarType::String => {
                Self::collect_elements(items, path, |item, item_path| match item {
                    Value::String(s) => Ok(s.clone()),
                    _ => Err(Self::mismatch("string", item, item_path)),
                })
                .map(TypedValue::StringArray)
            }
            ScalarType::Boolean => {
                Self::collect_elements(items, path, |item, item_path| match item {
                    Value::Bool(b) => Ok(*b),
                    _ => Err(Self::mismatch("boolean", item, item_path)),
                })
                .map(TypedValue::BoolArray)
            }
        }
    }

    fn collect_elements<T>(
        items: &[Value],
        path: &str,
        convert: impl Fn(&Value, &str) -> Result<T, CoercionError>,
    ) -> Result<Vec<T>, CoercionError> {
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            out.push(convert(item, &Self::element_path(path, index))?);
        }
        Ok(out)
    }

    fn coerce_object(
        &self,
        value: &Value,
        fields: &[Field],
        path: &str,
    ) -> Result<TypedValue, CoercionError> {
        match value {
            Value::Object(map) => Ok(TypedValue::Object(self.coerce_fields(map, fields, path)?)),
            _ => Err(Self::mismatch("object", value, path)),
        }
    }

    fn coerce_object_array(
        &self,
        value: &Value,
        fields: &[Field],
        path: &str,
    ) -> Result<TypedValue, CoercionError> {
        let items = match value {
            Value::Array(items) => items,
            _ => return Err(Self::mismatch("object[]", value, path)),
        };

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let element_path = Self::element_path(path, index);
            match item {
                Value::Object(map) => out.push(self.coerce_fields(map, fields, &element_path)?),
                _ => return Err(Self::mismatch("object", item, &element_path)),
            }
        }
        Ok(TypedValue::ObjectArray(out))
    }

    /// Walks the declared fields in order. A present key recurses into
    /// its field schema; an absent key takes the registered default for
    /// its type tag, or is omitted when the registry has none. Absence
    /// is never an error. Input keys not declared by the schema are
    /// dropped.
    fn coerce_fields(
        &self,
        map: &BTreeMap<Arc<str>, Value>,
        fields: &[Field],
        path: &str,
    ) -> Result<TypedObject, CoercionError> {
        let mut out = TypedObject::new();
        for field in fields {
            match map.get(field.name.as_ref()) {
                Some(raw) => {
                    let field_path = Self::field_path(path, &field.name);
                    out.insert(
                        field.name.clone(),
                        self.coerce_with_path(raw, &field.schema, &field_path)?,
                    );
                }
                None => {
                    if let Some(default) = self.defaults.default_for(field.schema.as_type().tag()) {
                        out.insert(field.name.clone(), default.clone());
                    }
                }
            }
        }
        Ok(out)
    }

    fn field_path(path: &str, name: &str) -> String {
        if path.is_empty() {
            format!("[{name}]")
        } else {
            format!("{path}.{name}")
        }
    }

    fn element_path(path: &str, index: usize) -> String {
        if path.is_empty() {
            format!("[{index}]")
        } else {
            format!("{path}[{index}]")
        }
    }

    fn mismatch(expected: &str, value: &Value, path: &str) -> CoercionError {
        CoercionError::TypeMismatch {
            expected: expected.into(),
            actual: Self::value_type_name(value).into(),
            path: path.into(),
        }
    }

    fn value_type_name(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Undefined => "undefined",
        }
    }
}
