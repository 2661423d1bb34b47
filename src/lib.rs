// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod document;
mod number;
mod typed;
mod value;

pub mod schema;

pub use document::Document;
pub use number::Number;
pub use typed::{TypedObject, TypedValue};
pub use value::Value;
