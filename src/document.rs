// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;

use anyhow::{bail, Result};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::schema::registry::SCHEMA_REGISTRY;
use crate::schema::{Schema, Type};
use crate::{TypedObject, TypedValue, Value};

/// A schema paired with data coerced to it: the unit handed to a
/// persistence layer.
///
/// Decoding a document runs the raw payload through the coercion engine,
/// so a `Document` only ever holds schema-conformant data. Re-encoding
/// produces the typed JSON shape, never the raw input.
#[derive(Debug, Clone)]
pub struct Document {
    schema: Arc<Schema>,
    data: TypedObject,
}

impl Document {
    /// Decodes `json` and coerces it against `schema`, which must
    /// describe an object shape.
    pub fn decode_json_str(schema: Arc<Schema>, json: &str) -> Result<Document> {
        if !matches!(schema.as_type(), Type::Object(_)) {
            bail!(
                "document schemas must be object-typed, got `{}`",
                schema.as_type().tag()
            );
        }

        let raw = Value::from_json_str(json)?;
        let data = match schema.coerce(&raw)? {
            TypedValue::Object(data) => data,
            _ => bail!("internal error: object schema coerced to non-object"),
        };

        Ok(Document { schema, data })
    }

    /// Decodes `json` against the schema registered under `name` in the
    /// global registry.
    pub fn decode_registered(name: &str, json: &str) -> Result<Document> {
        match SCHEMA_REGISTRY.get(name) {
            Some(schema) => Self::decode_json_str(schema, json),
            None => bail!("no schema registered under '{name}'"),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn data(&self) -> &TypedObject {
        &self.data
    }

    /// The coerced value of a field, or `None` when the field was absent
    /// and carried no registered default.
    pub fn get(&self, field: &str) -> Option<&TypedValue> {
        self.data.get(field)
    }

    pub fn to_json_str(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.data.len()))?;
        for (k, v) in self.data.iter() {
            map.serialize_entry(k.as_ref(), v)?;
        }
        map.end()
    }
}
