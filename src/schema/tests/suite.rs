// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::schema::{error::CoercionError, Schema};
use crate::{TypedValue, Value};
use serde_json::json;

fn schema(definition: serde_json::Value) -> Schema {
    Schema::from_serde_json_value(definition).unwrap()
}

#[test]
fn scalar_round_trip() {
    // A value already of the correct native shape comes back unchanged.
    assert_eq!(
        schema(json!({ "type": "float" }))
            .coerce(&Value::from(json!(2.5)))
            .unwrap(),
        TypedValue::Float(2.5)
    );
    assert_eq!(
        schema(json!({ "type": "string" }))
            .coerce(&Value::from("siebel"))
            .unwrap(),
        TypedValue::String("siebel".into())
    );
    assert_eq!(
        schema(json!({ "type": "boolean" }))
            .coerce(&Value::from(false))
            .unwrap(),
        TypedValue::Bool(false)
    );
    assert_eq!(
        schema(json!({ "type": "int" }))
            .coerce(&Value::from(json!(9)))
            .unwrap(),
        TypedValue::Int(9)
    );
}

#[test]
fn truncation_semantics() {
    let int_schema = schema(json!({ "type": "int" }));
    assert_eq!(
        int_schema.coerce(&Value::from(json!(3.7))).unwrap(),
        TypedValue::Int(3)
    );
    assert_eq!(
        int_schema.coerce(&Value::from(json!(-3.7))).unwrap(),
        TypedValue::Int(-3)
    );
}

#[test]
fn type_mismatch_rejection() {
    assert!(matches!(
        schema(json!({ "type": "int" })).coerce(&Value::from("abc")),
        Err(CoercionError::TypeMismatch { .. })
    ));
    assert!(matches!(
        schema(json!({ "type": "string" })).coerce(&Value::from(json!(5))),
        Err(CoercionError::TypeMismatch { .. })
    ));
}

#[test]
fn array_homogeneity() {
    let int_array = schema(json!({ "type": "int[]" }));

    assert_eq!(
        int_array.coerce(&Value::from(json!([1, 2, 3]))).unwrap(),
        TypedValue::IntArray(vec![1, 2, 3])
    );
    // Whole-array rejection on the first bad element, no partial result.
    assert!(matches!(
        int_array.coerce(&Value::from(json!([1, 2, "x"]))),
        Err(CoercionError::TypeMismatch { .. })
    ));
}

#[test]
fn default_filling() {
    let schema = schema(json!({
        "type": "object",
        "fields": [
            { "name": "a", "type": "int" },
            { "name": "b", "type": "string" }
        ]
    }));

    let typed = schema.coerce(&Value::from(json!({ "a": 5 }))).unwrap();
    let fields = typed.as_object().unwrap();
    assert_eq!(fields.get("a"), Some(&TypedValue::Int(5)));
    // Absent field b receives its registered default, not an error.
    assert_eq!(fields.get("b"), Some(&TypedValue::String("".into())));
}

#[test]
fn nested_recursion() {
    let schema = schema(json!({
        "type": "object",
        "fields": [
            { "name": "inner", "type": "object", "fields": [
                { "name": "x", "type": "int" }
            ]}
        ]
    }));

    let typed = schema
        .coerce(&Value::from(json!({ "inner": { "x": 9 } })))
        .unwrap();
    let inner = typed.as_object().unwrap().get("inner").unwrap();
    assert_eq!(
        inner.as_object().unwrap().get("x"),
        Some(&TypedValue::Int(9))
    );

    // Depth does not soften the failure mode.
    assert!(matches!(
        schema.coerce(&Value::from(json!({ "inner": { "x": "nine" } }))),
        Err(CoercionError::TypeMismatch { .. })
    ));
}

#[test]
fn object_array_independence_and_order() {
    let schema = schema(json!({
        "type": "object[]",
        "fields": [{ "name": "a", "type": "int" }]
    }));

    let typed = schema
        .coerce(&Value::from(json!([{ "a": 1 }, { "a": 2 }])))
        .unwrap();
    let elements = typed.as_object_array().unwrap();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].get("a"), Some(&TypedValue::Int(1)));
    assert_eq!(elements[1].get("a"), Some(&TypedValue::Int(2)));

    // A malformed second element fails the whole call.
    assert!(schema
        .coerce(&Value::from(json!([{ "a": 1 }, { "a": [] }])))
        .is_err());
}

#[test]
fn idempotence_through_wire_round_trip() {
    let schema = schema(json!({
        "type": "object",
        "fields": [
            { "name": "label", "type": "string" },
            { "name": "ratio", "type": "float" },
            { "name": "open", "type": "boolean" },
            { "name": "tags", "type": "string[]" },
            { "name": "samples", "type": "float[]" }
        ]
    }));

    let input = Value::from(json!({
        "label": "east-wing",
        "ratio": 0.5,
        "open": true,
        "samples": [1.0, 2.25]
    }));

    let first = schema.coerce(&input).unwrap();

    // Encode the typed result back to the wire format, re-decode, and
    // coerce again: with no lossy scalar in the schema the result is
    // identical.
    let wire = serde_json::to_string(&first).unwrap();
    let second = schema.coerce(&Value::from_json_str(&wire).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_object_field_is_omitted() {
    // The registry carries no entry for object tags, so a missing
    // object- or object-array-typed field is omitted from the output
    // rather than defaulted or errored.
    let schema = schema(json!({
        "type": "object",
        "fields": [
            { "name": "a", "type": "int" },
            { "name": "meta", "type": "object", "fields": [
                { "name": "note", "type": "string" }
            ]},
            { "name": "history", "type": "object[]", "fields": [
                { "name": "at", "type": "int" }
            ]}
        ]
    }));

    let typed = schema.coerce(&Value::from(json!({ "a": 1 }))).unwrap();
    let fields = typed.as_object().unwrap();
    assert_eq!(fields.get("a"), Some(&TypedValue::Int(1)));
    assert_eq!(fields.get("meta"), None);
    assert_eq!(fields.get("history"), None);
    assert_eq!(fields.len(), 1);
}

#[test]
fn empty_fields_degenerate_to_empty_object() {
    let schema = schema(json!({ "type": "object", "fields": [] }));
    let typed = schema
        .coerce(&Value::from(json!({ "anything": 1 })))
        .unwrap();
    assert!(typed.as_object().unwrap().is_empty());
}

#[test]
fn unknown_type_tag_rejected_at_load_time() {
    let err = Schema::from_json_str(r#"{ "type": "uuid" }"#).unwrap_err();
    assert!(err.to_string().contains("unknown type tag `uuid`"));

    // Nested definitions are checked too.
    let err = Schema::from_json_str(
        r#"{ "type": "object", "fields": [{ "name": "x", "type": "decimal" }] }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("unknown type tag `decimal`"));
}

#[test]
fn malformed_definition_rejected_at_load_time() {
    // Not JSON at all.
    assert!(Schema::from_json_str("{ not json").is_err());
    // A record field the definition format does not define.
    assert!(Schema::from_json_str(r#"{ "type": "int", "maximum": 10 }"#).is_err());
    // Missing the type tag entirely.
    assert!(Schema::from_json_str(r#"{ "name": "x" }"#).is_err());
}
