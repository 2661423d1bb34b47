// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::TypedValue;

type String = Arc<str>;

lazy_static::lazy_static! {
    /// Process-wide standard default policy, constructed once and
    /// read-only afterwards. Backing table for [`crate::schema::Schema::coerce`];
    /// callers needing a different policy inject their own registry via
    /// `coerce_with`.
    pub static ref STANDARD_DEFAULTS: DefaultRegistry = DefaultRegistry::standard();
}

/// Lookup table from type tag to the value substituted for a declared
/// object field that is absent from the input.
///
/// Populated at startup and never mutated afterwards; safe to share
/// across concurrent coercion calls without locking. A tag with no entry
/// is not an error — the absent field is simply omitted from the coerced
/// output.
#[derive(Debug, Clone, Default)]
pub struct DefaultRegistry {
    inner: BTreeMap<String, TypedValue>,
}

impl DefaultRegistry {
    /// An empty registry: every lookup misses, so every absent field is
    /// omitted.
    pub fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
        }
    }

    /// The standard policy: the zero value for every scalar tag and an
    /// empty array (never null) for every scalar-array tag. Object tags
    /// carry no default, so a missing object-typed field degenerates to
    /// omission rather than a flat placeholder.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("int", TypedValue::Int(0));
        registry.register("float", TypedValue::Float(0.0));
        registry.register("string", TypedValue::String("".into()));
        registry.register("boolean", TypedValue::Bool(false));
        registry.register("int[]", TypedValue::IntArray(Vec::new()));
        registry.register("float[]", TypedValue::FloatArray(Vec::new()));
        registry.register("string[]", TypedValue::StringArray(Vec::new()));
        registry.register("boolean[]", TypedValue::BoolArray(Vec::new()));
        registry
    }

    /// Registers `value` as the default for `tag`, replacing any earlier
    /// entry. All registration happens before coercion calls begin.
    pub fn register(&mut self, tag: impl Into<String>, value: TypedValue) {
        self.inner.insert(tag.into(), value);
    }

    /// The default for `tag`, or `None` when no default is registered.
    /// An unknown tag is not an error.
    pub fn default_for(&self, tag: &str) -> Option<&TypedValue> {
        self.inner.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.inner.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
