// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;

type String = Arc<str>;

/// The single runtime error a coercion call can produce.
///
/// Coercion is strict fail-fast: the first mismatch anywhere in the
/// recursive walk aborts the whole call and propagates up unchanged.
/// There is no aggregation and no partial result. An absent field is
/// never an error — it is defaulted or omitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
    /// The input's runtime shape does not match what the schema's type
    /// tag requires at `path`.
    #[error("type mismatch at '{path}': expected {expected}, got {actual}")]
    TypeMismatch {
        expected: String,
        actual: String,
        path: String,
    },
}
