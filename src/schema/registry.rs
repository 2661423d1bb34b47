// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;

use dashmap::DashMap;

use crate::schema::Schema;

type String = Arc<str>;

/// Errors that can occur when interacting with the SchemaRegistry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaRegistryError {
    /// A schema is already registered under this name.
    #[error("schema registration failed: a schema named '{0}' is already registered")]
    AlreadyExists(String),
    /// Empty or whitespace-only names are not allowed.
    #[error("schema registration failed: the name '{0}' is invalid (empty or whitespace-only)")]
    InvalidName(String),
}

/// Validates that a schema name is not empty or whitespace-only.
fn validate_name(name: &str) -> Result<(), SchemaRegistryError> {
    if name.trim().is_empty() {
        Err(SchemaRegistryError::InvalidName(String::from(name)))
    } else {
        Ok(())
    }
}

/// Thread-safe registry of named schema trees.
///
/// The embedding system registers every schema before coercion calls
/// begin; lookups afterwards are concurrent reads.
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    inner: DashMap<String, Arc<Schema>>,
}

lazy_static::lazy_static! {
    /// Global singleton instance of the schema registry.
    pub static ref SCHEMA_REGISTRY: SchemaRegistry = SchemaRegistry::new();
}

impl SchemaRegistry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }

    /// Register a schema with a given name. Returns Err if name already exists.
    pub fn register(
        &self,
        name: impl Into<String>,
        schema: Arc<Schema>,
    ) -> Result<(), SchemaRegistryError> {
        let name = name.into();

        validate_name(&name)?;

        use dashmap::mapref::entry::Entry;
        match self.inner.entry(name) {
            Entry::Occupied(e) => Err(SchemaRegistryError::AlreadyExists(e.key().clone())),
            Entry::Vacant(e) => {
                e.insert(schema);
                Ok(())
            }
        }
    }

    /// Retrieve a schema by name, if it exists.
    pub fn get(&self, name: &str) -> Option<Arc<Schema>> {
        self.inner.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Remove a schema by name. Returns the removed schema if it existed.
    pub fn remove(&self, name: &str) -> Option<Arc<Schema>> {
        self.inner.remove(name).map(|(_, v)| v)
    }

    /// List all registered schema names.
    pub fn list_names(&self) -> Vec<String> {
        self.inner.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Check if a schema with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Get the number of registered schemas.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Clear all schemas from the registry.
    pub fn clear(&self) {
        self.inner.clear();
    }
}
