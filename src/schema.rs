// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// The schema language is the definition format used by the datastore
/// layer: a small recursive record with a `name`, a `type` tag drawn from
/// a closed set, and, for object shapes, a `fields` list of child
/// definitions.
///
/// ```json
/// {
///   "type": "object",
///   "fields": [
///     { "name": "roomId", "type": "string" },
///     { "name": "maxCapacity", "type": "int" },
///     { "name": "sessions", "type": "object[]", "fields": [
///       { "name": "title", "type": "string" },
///       { "name": "attendees", "type": "int" }
///     ]}
///   ]
/// }
/// ```
///
/// Internally the two roles the wire format overloads onto one record are
/// split apart: a [`Schema`] is a type, and a [`Field`] is a named member
/// of an object shape. The closed tag set becomes the [`Type`] variants,
/// so dispatch over it is an exhaustive match rather than a string
/// comparison, and an unknown tag is unrepresentable — it is rejected
/// when a definition is deserialized, never at coercion time.
///
/// Array element shape is not a separate definition: `object[]` applies
/// the same `fields` list to every element, and a scalar-array tag
/// carries its element type in the tag itself.
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::schema::error::CoercionError;
use crate::{TypedValue, Value};

type String = Arc<str>;

pub mod coerce;
pub mod defaults;
pub mod error;
pub mod registry;

/// Scalar leaf types of the schema language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Int,
    Float,
    String,
    Boolean,
}

impl ScalarType {
    /// Type tag as written in a definition document.
    pub fn tag(self) -> &'static str {
        match self {
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::String => "string",
            ScalarType::Boolean => "boolean",
        }
    }

    /// Tag of the homogeneous-array form of this scalar.
    pub fn array_tag(self) -> &'static str {
        match self {
            ScalarType::Int => "int[]",
            ScalarType::Float => "float[]",
            ScalarType::String => "string[]",
            ScalarType::Boolean => "boolean[]",
        }
    }
}

/// A type in the schema language.
#[derive(Debug, Clone)]
pub enum Type {
    /// A single scalar: `int`, `float`, `string`, `boolean`.
    Scalar(ScalarType),
    /// A homogeneous array of scalars: `int[]`, `float[]`, `string[]`,
    /// `boolean[]`.
    ScalarArray(ScalarType),
    /// An object shape described by its declared fields, in order.
    Object(Arc<Vec<Field>>),
    /// An array of objects, each element described by the same field
    /// list.
    ObjectArray(Arc<Vec<Field>>),
}

impl Type {
    /// The closed-set tag naming this type: selects its converter and is
    /// the key for default-value registry lookups.
    pub fn tag(&self) -> &'static str {
        match self {
            Type::Scalar(t) => t.tag(),
            Type::ScalarArray(t) => t.array_tag(),
            Type::Object(_) => "object",
            Type::ObjectArray(_) => "object[]",
        }
    }
}

/// One named member of an object shape.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
}

/// A schema: a reference-counted, immutable type definition driving
/// coercion. Cheap to clone and safe to share across concurrent coercion
/// calls.
#[derive(Debug, Clone)]
pub struct Schema {
    t: Arc<Type>,
}

impl Schema {
    pub fn new(t: Type) -> Self {
        Schema { t: Arc::new(t) }
    }

    /// Returns the underlying type definition.
    pub fn as_type(&self) -> &Type {
        &self.t
    }

    /// Parse a definition document into a `Schema`.
    /// Provides better error messages than `serde_json::from_value`.
    pub fn from_serde_json_value(
        definition: serde_json::Value,
    ) -> Result<Self, Box<dyn core::error::Error + Send + Sync>> {
        let schema = serde_json::from_value::<Schema>(definition)
            .map_err(|e| format!("Failed to parse schema: {e}"))?;
        Ok(schema)
    }

    /// Parse a definition document from a string into a `Schema`.
    pub fn from_json_str(s: &str) -> Result<Self, Box<dyn core::error::Error + Send + Sync>> {
        let value: serde_json::Value =
            serde_json::from_str(s).map_err(|e| format!("Failed to parse schema: {e}"))?;
        Self::from_serde_json_value(value)
    }

    /// Coerces `value` into the shape this schema declares, filling
    /// absent object fields from the standard default policy.
    ///
    /// # Example
    /// ```rust
    /// use typeshape::{schema::Schema, Value};
    /// use serde_json::json;
    ///
    /// let schema = Schema::from_serde_json_value(json!({
    ///     "type": "object",
    ///     "fields": [{ "name": "count", "type": "int" }]
    /// }))
    /// .unwrap();
    /// let value = Value::from(json!({ "count": 3.7 }));
    ///
    /// assert!(schema.coerce(&value).is_ok());
    /// ```
    pub fn coerce(&self, value: &Value) -> Result<TypedValue, CoercionError> {
        coerce::Coercer::new(&defaults::STANDARD_DEFAULTS).coerce(value, self)
    }

    /// Coerces `value` with an injected default policy instead of the
    /// standard one.
    pub fn coerce_with(
        &self,
        value: &Value,
        defaults: &defaults::DefaultRegistry,
    ) -> Result<TypedValue, CoercionError> {
        coerce::Coercer::new(defaults).coerce(value, self)
    }
}

// Raw serde shape of one definition record. `name` is meaningful only on
// the fields of an object shape; a root-level name parses and is
// discarded.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Definition {
    #[serde(default)]
    name: std::string::String,
    #[serde(rename = "type")]
    type_tag: std::string::String,
    #[serde(default)]
    fields: Vec<Definition>,
}

fn definition_into_type(def: Definition) -> Result<Type, std::string::String> {
    let Definition {
        type_tag, fields, ..
    } = def;
    match type_tag.as_str() {
        "int" => Ok(Type::Scalar(ScalarType::Int)),
        "float" => Ok(Type::Scalar(ScalarType::Float)),
        "string" => Ok(Type::Scalar(ScalarType::String)),
        "boolean" => Ok(Type::Scalar(ScalarType::Boolean)),
        "int[]" => Ok(Type::ScalarArray(ScalarType::Int)),
        "float[]" => Ok(Type::ScalarArray(ScalarType::Float)),
        "string[]" => Ok(Type::ScalarArray(ScalarType::String)),
        "boolean[]" => Ok(Type::ScalarArray(ScalarType::Boolean)),
        "object" => Ok(Type::Object(Arc::new(definitions_into_fields(fields)?))),
        "object[]" => Ok(Type::ObjectArray(Arc::new(definitions_into_fields(
            fields,
        )?))),
        other => Err(format!("unknown type tag `{other}`")),
    }
}

fn definitions_into_fields(defs: Vec<Definition>) -> Result<Vec<Field>, std::string::String> {
    let mut out = Vec::with_capacity(defs.len());
    for mut def in defs {
        let name: String = core::mem::take(&mut def.name).into();
        let schema = Schema::new(definition_into_type(def)?);
        out.push(Field { name, schema });
    }
    Ok(out)
}

impl<'de> Deserialize<'de> for Schema {
    /// Deserializes a definition document into a `Schema`, rejecting
    /// unknown type tags and unknown record fields with a descriptive
    /// error. A malformed schema never reaches the coercion engine.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let def: Definition = Deserialize::deserialize(deserializer)?;
        let t = definition_into_type(def).map_err(serde::de::Error::custom)?;
        Ok(Schema::new(t))
    }
}

#[cfg(test)]
mod tests {
    mod coerce;
    mod defaults;
    mod registry;
    mod suite;
}
