//! Integration tests for the SDT public API
//!
//! These tests exercise the four schema operations end-to-end, with schemas
//! built both through the builders and from JSON documents.

use sdt::schema::{IntegerSchema, ObjectSchema, StringSchema};
use sdt::{
    auto_mock, create_list, create_pagination, create_ts_type_literal, merge, validate, Schema,
    ValidationError,
};
use serde_json::{json, Value};

/// Helper to build a schema from a JSON document
fn schema(value: Value) -> Schema {
    Schema::from_value(&value).unwrap()
}

/// Helper for the contact fixture used across tests
fn contact() -> Schema {
    schema(json!({
        "type": "object",
        "properties": {
            "mobile": { "type": "string", "pattern": "^[0-9]{11}$" },
            "address": {
                "type": "object",
                "properties": { "provinceCode": { "type": "integer" } },
                "required": ["provinceCode"]
            }
        },
        "required": ["mobile"]
    }))
}

fn user() -> Schema {
    ObjectSchema::new()
        .property("id", Schema::integer())
        .property(
            "name",
            Schema::string()
                .with_title("Name")
                .with_description("display name"),
        )
        .property(
            "role",
            StringSchema::default().with_enum(["admin", "member"]).into(),
        )
        .required_keys(["id"])
        .into()
}

// ============================================================================
// validate
// ============================================================================

#[test]
fn test_validate_string() {
    let s = schema(json!({ "type": "string", "pattern": "^[0-9]$" }));
    let err = validate(&s, &json!(123)).unwrap_err();
    assert!(err.to_string().contains("not string"));
    let err = validate(&s, &json!("abc")).unwrap_err();
    assert!(err.to_string().contains("not match pattern"));
    assert_eq!(validate(&s, &json!("5")).unwrap(), json!("5"));
}

#[test]
fn test_validate_complex() {
    let err = validate(
        &contact(),
        &json!({ "mobile": "15558118985", "address": { "provinceCode": "x" } }),
    )
    .unwrap_err();
    assert!(
        err.to_string().contains("address.provinceCode"),
        "unexpected message: {}",
        err
    );
    assert!(matches!(err, ValidationError::TypeMismatch { .. }));
}

#[test]
fn test_validate_required_projection() {
    let s = schema(json!({
        "type": "object",
        "properties": { "a": { "type": "string" } },
        "required": ["a"]
    }));
    assert_eq!(validate(&s, &json!({ "a": "x" })).unwrap(), json!({ "a": "x" }));
    let err = validate(&s, &json!({})).unwrap_err();
    assert!(err.to_string().contains('a'));
}

#[test]
fn test_validate_is_idempotent() {
    let cases = [
        (contact(), json!({ "mobile": "15558118985", "x": 1, "address": { "provinceCode": 1, "y": 2 } })),
        (create_pagination(user()), json!({
            "total": 2, "pageSize": 10, "pageNum": 1,
            "list": [{ "id": 1, "extra": true }, { "id": 2, "role": "admin" }]
        })),
        (Schema::one_of(vec![Schema::string(), create_list(Schema::number())]), json!([1, 2.5])),
    ];

    for (s, data) in cases {
        let once = validate(&s, &data).unwrap();
        let twice = validate(&s, &once).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn test_validate_pagination_element_path() {
    let page = create_pagination(user());
    let err = validate(
        &page,
        &json!({
            "total": 1, "pageSize": 10, "pageNum": 1,
            "list": [{ "id": 1 }, { "id": 2, "role": "owner" }]
        }),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "enum mismatch at list.1.role: must be one of \"admin\", \"member\"");
}

// ============================================================================
// merge
// ============================================================================

#[test]
fn test_merge_object() {
    let merged = merge([
        schema(json!({
            "type": "object",
            "properties": { "a": { "type": "string" }, "b": { "type": "integer" } },
            "required": ["a", "b"]
        })),
        schema(json!({
            "type": "object",
            "properties": { "c": { "type": "boolean" } },
            "required": ["c"]
        })),
    ]);

    assert_eq!(
        merged.to_value(),
        json!({
            "type": "object",
            "properties": { "a": { "type": "string" }, "b": { "type": "integer" }, "c": { "type": "boolean" } },
            "required": ["a", "b", "c"]
        })
    );
}

#[test]
fn test_merged_schema_validates() {
    let merged = merge([
        contact(),
        ObjectSchema::new()
            .property("age", Schema::integer())
            .required_keys(["age"])
            .into(),
    ]);
    let err = validate(&merged, &json!({ "mobile": "15558118985" })).unwrap_err();
    assert_eq!(err.to_string(), "missing required key 'age' at ");
    assert!(validate(&merged, &json!({ "mobile": "15558118985", "age": 30 })).is_ok());
}

// ============================================================================
// auto_mock
// ============================================================================

#[test]
fn test_auto_mock_required_only() {
    let s = schema(json!({
        "type": "object",
        "properties": { "a": { "type": "string" }, "b": { "type": "integer" } },
        "required": ["a"]
    }));
    assert_eq!(auto_mock(&s), json!({ "a": "" }));
}

#[test]
fn test_auto_mock_validates() {
    let schemas = [
        create_pagination(user()),
        create_list(contact()),
        Schema::one_of(vec![user(), Schema::string()]),
        IntegerSchema::default().with_enum([5, 6]).into(),
    ];
    for s in schemas {
        let mock = auto_mock(&s);
        assert!(validate(&s, &mock).is_ok(), "mock {} rejected", mock);
    }
}

#[test]
fn test_auto_mock_pagination() {
    assert_eq!(
        auto_mock(&create_pagination(user())),
        json!({ "total": 1, "pageSize": 1, "pageNum": 1, "list": [] })
    );
}

// ============================================================================
// create_ts_type_literal
// ============================================================================

#[test]
fn test_type_literal_one_of() {
    let literal = create_ts_type_literal(Some(&schema(json!({
        "oneOf": [
            { "type": "object", "properties": { "a": { "type": "string" } } },
            { "type": "object", "properties": { "b": { "type": "string" } } }
        ]
    }))));

    insta::assert_snapshot!("one_of", literal);
}

#[test]
fn test_type_literal_one_of_deep() {
    let literal = create_ts_type_literal(Some(&schema(json!({
        "oneOf": [
            { "type": "object", "properties": { "a": { "type": "string" } } },
            {
                "type": "object",
                "properties": {
                    "b": { "type": "string" },
                    "c": {
                        "oneOf": [
                            {
                                "type": "object",
                                "properties": { "cs1": { "type": "string" } },
                                "required": ["cs1"]
                            },
                            {
                                "type": "object",
                                "properties": { "cs2": { "type": "string" } },
                                "required": ["cs2"]
                            }
                        ]
                    }
                }
            }
        ]
    }))));

    insta::assert_snapshot!("one_of_deep", literal);
}

#[test]
fn test_type_literal_string_enum() {
    let literal = create_ts_type_literal(Some(&schema(json!({
        "type": "string",
        "enum": ["a", "b", "c"]
    }))));

    insta::assert_snapshot!("string_enum", literal);
}

#[test]
fn test_type_literal_integer_enum() {
    let literal = create_ts_type_literal(Some(&schema(json!({
        "type": "integer",
        "enum": [1, 2, 3]
    }))));

    insta::assert_snapshot!("integer_enum", literal);
}

#[test]
fn test_type_literal_pagination() {
    let literal = create_ts_type_literal(Some(&create_pagination(user())));

    insta::assert_snapshot!("pagination", literal);
}

// ============================================================================
// Agreement with JSON Schema
// ============================================================================

/// Cases where this validator and a JSON Schema validator must agree.
/// Unions are chosen so that at most one alternative can match.
#[test]
fn test_verdicts_match_jsonschema() {
    let cases: Vec<(Schema, Vec<Value>)> = vec![
        (
            contact(),
            vec![
                json!({ "mobile": "15558118985" }),
                json!({ "mobile": "1555811898" }),
                json!({ "mobile": "15558118985", "address": {} }),
                json!({ "mobile": "15558118985", "address": { "provinceCode": 3.0 } }),
                json!({ "mobile": "15558118985", "address": { "provinceCode": u64::MAX } }),
                json!({ "address": { "provinceCode": 3 } }),
                json!("15558118985"),
            ],
        ),
        (
            create_pagination(user()),
            vec![
                json!({ "total": 0, "pageSize": 10, "pageNum": 1, "list": [] }),
                json!({ "total": 0, "pageSize": 10, "pageNum": 1 }),
                json!({ "total": 0.5, "pageSize": 10, "pageNum": 1, "list": [] }),
                json!({ "total": 1, "pageSize": 10, "pageNum": 1, "list": [{ "id": 1, "role": "guest" }] }),
            ],
        ),
        (
            Schema::one_of(vec![Schema::string(), Schema::boolean()]),
            vec![json!("x"), json!(false), json!(1), json!(null)],
        ),
    ];

    for (s, instances) in cases {
        let reference = jsonschema::validator_for(&s.to_value()).unwrap();
        for instance in instances {
            assert_eq!(
                validate(&s, &instance).is_ok(),
                reference.is_valid(&instance),
                "verdicts differ for {} against {}",
                instance,
                s.to_value()
            );
        }
    }
}
