//! Evaluation Invariant Tests
//!
//! Cross-module tests for the validation engine:
//! - Evaluation is total: every input key yields exactly one outcome
//! - Fields are independent; no fail-fast
//! - Input keys without validators surface as explicit rejections
//! - Schema keys without input are never evaluated
//! - Evaluation is deterministic

use std::collections::BTreeMap;

use serde_json::json;

use fieldparse::schema::{evaluate, ParseOutcome, ParsedValue, Rejection, Schema, Validator};
use fieldparse::value::{FieldMap, RawValue};

// =============================================================================
// Helper Functions
// =============================================================================

fn input(entries: Vec<(&str, RawValue)>) -> FieldMap {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn nested_record(outcome: &ParseOutcome) -> &fieldparse::schema::ResultRecord {
    match outcome.value() {
        Some(ParsedValue::Record(record)) => record,
        other => panic!("expected record outcome, got {:?}", other),
    }
}

fn animals_schema() -> Schema {
    Schema::new()
        .field("dog", Validator::number())
        .field("cat", Validator::string())
        .field("rat", Validator::string())
}

// =============================================================================
// Totality
// =============================================================================

/// Every input key yields exactly one outcome, even with an empty schema.
#[test]
fn test_result_keyset_equals_input_keyset() {
    let fields = input(vec![
        ("a", RawValue::from("x")),
        ("b", RawValue::Num(1.0)),
        ("c", RawValue::Record(FieldMap::new())),
    ]);

    let results = evaluate(&fields, &Schema::new());
    let result_keys: Vec<_> = results.keys().cloned().collect();
    let input_keys: Vec<_> = fields.keys().cloned().collect();
    assert_eq!(result_keys, input_keys);
}

/// Empty input against a populated schema yields an empty result.
#[test]
fn test_empty_input_empty_result() {
    let schema = Schema::new().field("age", Validator::number());
    let results = evaluate(&FieldMap::new(), &schema);
    assert!(results.is_empty());
}

// =============================================================================
// Independence
// =============================================================================

/// Removing one input key never changes any other key's outcome.
#[test]
fn test_field_outcomes_are_independent() {
    let schema = animals_schema();
    let fields = input(vec![
        ("dog", RawValue::from("dog")),
        ("cat", RawValue::from("hello")),
        ("rat", RawValue::from("dog")),
    ]);

    let full = evaluate(&fields, &schema);

    for removed in ["dog", "cat", "rat"] {
        let mut reduced_fields = fields.clone();
        reduced_fields.remove(removed);
        let reduced = evaluate(&reduced_fields, &schema);

        for (name, outcome) in reduced.iter() {
            assert_eq!(Some(outcome), full.get(name), "outcome drift for '{}'", name);
        }
        assert_eq!(reduced.len(), full.len() - 1);
    }
}

// =============================================================================
// Schema Lookup Asymmetry
// =============================================================================

/// Input keys without a schema entry surface as explicit rejections.
#[test]
fn test_unmatched_input_key_is_rejected() {
    let schema = Schema::new().field("cat", Validator::string());
    let results = evaluate(
        &input(vec![
            ("cat", RawValue::from("hello")),
            ("yo", RawValue::from("meh")),
        ]),
        &schema,
    );

    let rejection = results.get("yo").and_then(ParseOutcome::rejection).unwrap();
    assert_eq!(rejection, &Rejection::NoValidator);
    assert_eq!(rejection.to_string(), "no associated validator for this field");
}

/// Schema keys without a matching input key produce no result entry.
#[test]
fn test_unmatched_schema_key_is_ignored() {
    let schema = animals_schema();
    let results = evaluate(&input(vec![("cat", RawValue::from("hello"))]), &schema);

    assert_eq!(results.len(), 1);
    assert!(results.get("dog").is_none());
    assert!(results.get("rat").is_none());
}

// =============================================================================
// Leaf Rules
// =============================================================================

#[test]
fn test_string_rule() {
    let v = Validator::string();
    assert_eq!(
        v.apply(&RawValue::from("hello")),
        ParseOutcome::Parsed(ParsedValue::Str("hello".into()))
    );
    assert_eq!(
        v.apply(&RawValue::from("dogsled")).rejection().unwrap().to_string(),
        "must not contain dog"
    );
    assert_eq!(
        v.apply(&RawValue::Num(42.0)).rejection().unwrap().code(),
        "TYPE_MISMATCH"
    );
}

#[test]
fn test_number_rule() {
    let v = Validator::number();
    assert_eq!(
        v.apply(&RawValue::Num(5.0)),
        ParseOutcome::Parsed(ParsedValue::Num(5.0))
    );
    assert_eq!(
        v.apply(&RawValue::from("100")),
        ParseOutcome::Parsed(ParsedValue::Num(100.0))
    );
    assert_eq!(
        v.apply(&RawValue::from("abc")).rejection(),
        Some(&Rejection::NumericParse)
    );
    assert_eq!(v.apply(&RawValue::Num(0.0)).rejection(), Some(&Rejection::Zero));
    assert_eq!(
        v.apply(&RawValue::from("0")).rejection(),
        Some(&Rejection::Zero)
    );
}

/// An object validator handed a leaf value rejects instead of recursing.
#[test]
fn test_object_validator_rejects_leaf_input() {
    let v = Validator::object(Schema::new().field("sup", Validator::number()));
    let rejection = v.apply(&RawValue::from("hello")).rejection().unwrap().clone();
    assert_eq!(
        rejection,
        Rejection::TypeMismatch {
            expected: "record",
            actual: "string"
        }
    );
}

// =============================================================================
// Nested Records
// =============================================================================

/// Extra keys inside a nested record surface as rejections, not omissions.
#[test]
fn test_nested_extra_key_surfaces_as_rejection() {
    let schema = Schema::new().field(
        "obj",
        Validator::object(Schema::new().field("sup", Validator::number())),
    );
    let fields = input(vec![(
        "obj",
        RawValue::Record(input(vec![
            ("sup", RawValue::Num(1.0)),
            ("extra", RawValue::from("x")),
        ])),
    )]);

    let results = evaluate(&fields, &schema);
    let obj = nested_record(results.get("obj").unwrap());
    assert_eq!(
        obj.get("sup"),
        Some(&ParseOutcome::Parsed(ParsedValue::Num(1.0)))
    );
    assert_eq!(
        obj.get("extra"),
        Some(&ParseOutcome::Rejected(Rejection::NoValidator))
    );
}

// =============================================================================
// End-to-End Scenarios
// =============================================================================

/// Mixed outcomes across sibling fields.
#[test]
fn test_animals_scenario() {
    let results = evaluate(
        &input(vec![
            ("dog", RawValue::from("dog")),
            ("cat", RawValue::from("hello")),
            ("rat", RawValue::from("dog")),
        ]),
        &animals_schema(),
    );

    assert_eq!(
        results.get("dog"),
        Some(&ParseOutcome::Rejected(Rejection::NumericParse))
    );
    assert_eq!(
        results.get("cat"),
        Some(&ParseOutcome::Parsed(ParsedValue::Str("hello".into())))
    );
    assert_eq!(
        results.get("rat"),
        Some(&ParseOutcome::Rejected(Rejection::ForbiddenSubstring {
            needle: "dog"
        }))
    );
}

/// Full walk: coercion, nesting, unmatched keys on both sides, forbidden
/// content, all in one evaluation.
#[test]
fn test_full_mixed_evaluation() {
    let schema = Schema::new()
        .field("dog", Validator::number())
        .field("cat", Validator::string())
        .field(
            "obj",
            Validator::object(
                Schema::new()
                    .field("sup", Validator::number())
                    .field("chicken", Validator::number()),
            ),
        )
        .field("horse", Validator::string())
        .field("rat", Validator::string());

    let fields = RawValue::from_json_object(&json!({
        "dog": "dog",
        "cat": "hello",
        "obj": {
            "sup": 1,
            "chicken": "100",
            "eel": "hello"
        },
        "yo": "meh",
        "rat": "dog"
    }))
    .unwrap();

    let results = evaluate(&fields, &schema);

    assert_eq!(results.len(), 5);
    assert_eq!(
        results.get("dog"),
        Some(&ParseOutcome::Rejected(Rejection::NumericParse))
    );
    assert_eq!(
        results.get("cat"),
        Some(&ParseOutcome::Parsed(ParsedValue::Str("hello".into())))
    );
    assert_eq!(
        results.get("yo"),
        Some(&ParseOutcome::Rejected(Rejection::NoValidator))
    );
    assert_eq!(
        results.get("rat"),
        Some(&ParseOutcome::Rejected(Rejection::ForbiddenSubstring {
            needle: "dog"
        }))
    );
    // Declared in the schema, absent from the input: never evaluated
    assert!(results.get("horse").is_none());

    let obj = nested_record(results.get("obj").unwrap());
    assert_eq!(
        obj.get("sup"),
        Some(&ParseOutcome::Parsed(ParsedValue::Num(1.0)))
    );
    assert_eq!(
        obj.get("chicken"),
        Some(&ParseOutcome::Parsed(ParsedValue::Num(100.0)))
    );
    assert_eq!(
        obj.get("eel"),
        Some(&ParseOutcome::Rejected(Rejection::NoValidator))
    );

    assert_eq!(results.count_parsed(), 3);
    assert_eq!(results.count_rejected(), 4);
    assert!(!results.is_fully_parsed());
}

/// The whole result record renders in the wire shape.
#[test]
fn test_result_record_wire_shape() {
    let schema = Schema::new()
        .field("cat", Validator::string())
        .field(
            "obj",
            Validator::object(Schema::new().field("sup", Validator::number())),
        );
    let fields = RawValue::from_json_object(&json!({
        "cat": "hello",
        "obj": { "sup": 1 },
        "yo": "meh"
    }))
    .unwrap();

    let results = evaluate(&fields, &schema);
    assert_eq!(
        results.to_json(),
        json!({
            "cat": { "parsed": true, "value": "hello" },
            "obj": {
                "parsed": true,
                "value": { "sup": { "parsed": true, "value": 1.0 } }
            },
            "yo": { "parsed": false, "reason": "no associated validator for this field" }
        })
    );
    assert_eq!(serde_json::to_value(&results).unwrap(), results.to_json());
}

// =============================================================================
// Determinism
// =============================================================================

/// The same input and schema evaluate identically every time, including key
/// enumeration order.
#[test]
fn test_evaluation_is_deterministic() {
    let schema = animals_schema();
    let fields = input(vec![
        ("dog", RawValue::from("3")),
        ("cat", RawValue::from("hello")),
        ("yo", RawValue::from("meh")),
    ]);

    let first = evaluate(&fields, &schema);
    let first_json = serde_json::to_string(&first).unwrap();
    for _ in 0..100 {
        let again = evaluate(&fields, &schema);
        assert_eq!(again, first);
        assert_eq!(serde_json::to_string(&again).unwrap(), first_json);
    }
}

/// Schemas built from different source map types evaluate identically.
#[test]
fn test_schema_construction_routes_agree() {
    let built = Schema::new()
        .field("age", Validator::number())
        .field("name", Validator::string());

    let mut map = BTreeMap::new();
    map.insert("age".to_string(), Validator::number());
    map.insert("name".to_string(), Validator::string());
    let from_map = Schema::from(map);

    assert_eq!(built, from_map);

    let fields = input(vec![
        ("age", RawValue::from("30")),
        ("name", RawValue::from("Alice")),
    ]);
    assert_eq!(evaluate(&fields, &built), evaluate(&fields, &from_map));
}
