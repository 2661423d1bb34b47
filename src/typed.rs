// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::number::Number;

use core::fmt;
use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;

/// Object shape of a coerced value: field name to typed value.
pub type TypedObject = BTreeMap<Arc<str>, TypedValue>;

/// Strictly typed value produced by coercing an untyped [`crate::Value`]
/// against a schema. Array homogeneity is a fact of the representation
/// here, not a runtime invariant: an `int[]` field really is a `Vec<i64>`.
///
/// Produced fresh on every coercion call; never shares structure with the
/// input it was coerced from.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Int(i64),
    Float(f64),
    String(Arc<str>),
    Bool(bool),
    IntArray(Vec<i64>),
    FloatArray(Vec<f64>),
    StringArray(Vec<Arc<str>>),
    BoolArray(Vec<bool>),
    Object(TypedObject),
    ObjectArray(Vec<TypedObject>),
}

impl TypedValue {
    /// The type tag this value conforms to.
    pub fn type_name(&self) -> &'static str {
        match self {
            TypedValue::Int(_) => "int",
            TypedValue::Float(_) => "float",
            TypedValue::String(_) => "string",
            TypedValue::Bool(_) => "boolean",
            TypedValue::IntArray(_) => "int[]",
            TypedValue::FloatArray(_) => "float[]",
            TypedValue::StringArray(_) => "string[]",
            TypedValue::BoolArray(_) => "boolean[]",
            TypedValue::Object(_) => "object",
            TypedValue::ObjectArray(_) => "object[]",
        }
    }

    pub fn as_int(&self) -> Result<i64> {
        match self {
            TypedValue::Int(v) => Ok(*v),
            _ => Err(anyhow!("not an int")),
        }
    }

    pub fn as_float(&self) -> Result<f64> {
        match self {
            TypedValue::Float(v) => Ok(*v),
            _ => Err(anyhow!("not a float")),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            TypedValue::String(s) => Ok(s.as_ref()),
            _ => Err(anyhow!("not a string")),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            TypedValue::Bool(b) => Ok(*b),
            _ => Err(anyhow!("not a boolean")),
        }
    }

    pub fn as_object(&self) -> Result<&TypedObject> {
        match self {
            TypedValue::Object(m) => Ok(m),
            _ => Err(anyhow!("not an object")),
        }
    }

    pub fn as_object_array(&self) -> Result<&Vec<TypedObject>> {
        match self {
            TypedValue::ObjectArray(a) => Ok(a),
            _ => Err(anyhow!("not an object array")),
        }
    }
}

fn serialize_object<S>(fields: &TypedObject, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(fields.len()))?;
    for (k, v) in fields.iter() {
        map.serialize_entry(k.as_ref(), v)?;
    }
    map.end()
}

impl Serialize for TypedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TypedValue::Int(v) => serializer.serialize_i64(*v),
            // Floats go out the way Number serializes them, so an
            // integral float round-trips as the same wire number.
            TypedValue::Float(v) => Number::from(*v).serialize(serializer),
            TypedValue::String(s) => serializer.serialize_str(s.as_ref()),
            TypedValue::Bool(b) => serializer.serialize_bool(*b),
            TypedValue::IntArray(a) => a.serialize(serializer),
            TypedValue::FloatArray(a) => {
                let mut seq = serializer.serialize_seq(Some(a.len()))?;
                for v in a {
                    seq.serialize_element(&Number::from(*v))?;
                }
                seq.end()
            }
            TypedValue::StringArray(a) => a.serialize(serializer),
            TypedValue::BoolArray(a) => a.serialize(serializer),
            TypedValue::Object(fields) => serialize_object(fields, serializer),
            TypedValue::ObjectArray(a) => {
                let mut seq = serializer.serialize_seq(Some(a.len()))?;
                for fields in a {
                    seq.serialize_element(&ObjectEntries(fields))?;
                }
                seq.end()
            }
        }
    }
}

struct ObjectEntries<'a>(&'a TypedObject);

impl Serialize for ObjectEntries<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_object(self.0, serializer)
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(s) => write!(f, "{s}"),
            Err(_e) => Err(std::fmt::Error),
        }
    }
}

impl From<i64> for TypedValue {
    fn from(v: i64) -> Self {
        TypedValue::Int(v)
    }
}

impl From<f64> for TypedValue {
    fn from(v: f64) -> Self {
        TypedValue::Float(v)
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::String(s.into())
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        TypedValue::Bool(b)
    }
}

impl From<TypedObject> for TypedValue {
    fn from(m: TypedObject) -> Self {
        TypedValue::Object(m)
    }
}
