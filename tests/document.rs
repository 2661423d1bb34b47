// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use typeshape::schema::{error::CoercionError, registry::SCHEMA_REGISTRY, Schema};
use typeshape::{Document, TypedValue};

fn occupancy_schema() -> Arc<Schema> {
    Arc::new(
        Schema::from_serde_json_value(json!({
            "type": "object",
            "fields": [
                { "name": "roomId", "type": "string" },
                { "name": "remainingSpaces", "type": "int" },
                { "name": "maxCapacity", "type": "int" },
                { "name": "tags", "type": "string[]" }
            ]
        }))
        .unwrap(),
    )
}

#[test]
fn decode_coerce_encode_round_trip() -> Result<()> {
    let payload = r#"{
        "roomId": "SIEBEL_1104",
        "remainingSpaces": 12.9,
        "maxCapacity": 48,
        "occupantList": ["not", "declared"]
    }"#;

    let doc = Document::decode_json_str(occupancy_schema(), payload)?;

    assert_eq!(
        doc.get("roomId"),
        Some(&TypedValue::String("SIEBEL_1104".into()))
    );
    // Fractional wire number truncated toward zero for the int field.
    assert_eq!(doc.get("remainingSpaces"), Some(&TypedValue::Int(12)));
    assert_eq!(doc.get("maxCapacity"), Some(&TypedValue::Int(48)));
    // Absent declared field defaulted; undeclared field dropped.
    assert_eq!(doc.get("tags"), Some(&TypedValue::StringArray(vec![])));
    assert_eq!(doc.get("occupantList"), None);

    // Re-encoding and re-decoding the typed shape is stable.
    let wire = doc.to_json_str()?;
    let again = Document::decode_json_str(occupancy_schema(), &wire)?;
    assert_eq!(doc.data(), again.data());

    Ok(())
}

#[test]
fn mismatching_payload_fails_with_type_mismatch() {
    let err = Document::decode_json_str(
        occupancy_schema(),
        r#"{ "roomId": "SIEBEL_1104", "maxCapacity": "lots" }"#,
    )
    .unwrap_err();

    match err.downcast_ref::<CoercionError>() {
        Some(CoercionError::TypeMismatch {
            expected,
            actual,
            path,
        }) => {
            assert_eq!(expected.as_ref(), "int");
            assert_eq!(actual.as_ref(), "string");
            assert_eq!(path.as_ref(), "[maxCapacity]");
        }
        None => panic!("Expected a CoercionError, got: {err}"),
    }
}

#[test]
fn non_object_schema_rejected() {
    let schema = Arc::new(Schema::from_serde_json_value(json!({ "type": "int[]" })).unwrap());
    let err = Document::decode_json_str(schema, "[1, 2, 3]").unwrap_err();
    assert!(err.to_string().contains("object-typed"));
}

#[test]
fn decode_through_global_registry() -> Result<()> {
    SCHEMA_REGISTRY
        .register("roomOccupancy", occupancy_schema())
        .unwrap();

    let doc = Document::decode_registered("roomOccupancy", r#"{ "roomId": "DCL_2240" }"#)?;
    assert_eq!(
        doc.get("roomId"),
        Some(&TypedValue::String("DCL_2240".into()))
    );
    assert_eq!(doc.get("remainingSpaces"), Some(&TypedValue::Int(0)));

    let err = Document::decode_registered("noSuchSchema", "{}").unwrap_err();
    assert!(err.to_string().contains("no schema registered"));

    Ok(())
}
