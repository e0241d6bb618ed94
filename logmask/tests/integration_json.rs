//! End-to-end tests for JSON text and runtime-shaped values.

use indexmap::IndexMap;

use logmask::{FieldRule, Mask, MaskingEngine, MaskingOptions, Value};
use serde_json::json;

fn engine() -> MaskingEngine {
    MaskingEngine::new(MaskingOptions::default().with_rules([
        FieldRule::new("password").excluded(),
        FieldRule::new("CardNumber").keep(0, 4),
        FieldRule::new("Iban").keep(3, 3),
    ]))
}

#[test]
fn test_json_leaf_masking_end_to_end() {
    let masked = engine().mask_json(r#"{"password":"hiddenpassword","note":"ok"}"#);
    let decoded: serde_json::Value = serde_json::from_str(&masked).unwrap();
    assert_eq!(decoded, json!({ "password": "", "note": "ok" }));
}

#[test]
fn test_json_passthrough_on_parse_failure() {
    let engine = engine();
    for text in ["{not valid json", "[1, 2", "{\"password\": }", "not json at all", "   "] {
        assert_eq!(engine.mask_json(text), text);
    }
}

#[test]
fn test_json_nested_documents() {
    let masked = engine().mask_json(
        r#"{
            "user": { "card_number": "4111111111111111", "name": "Jane" },
            "history": [ { "cardNumber": "5500000000000004" }, "password", 12 ],
            "password": 1234
        }"#,
    );
    assert_eq!(
        masked,
        r#"{"user":{"card_number":"************1111","name":"Jane"},"history":[{"cardNumber":"************0004"},"password",12],"password":1234}"#
    );
}

#[test]
fn test_json_top_level_array() {
    let masked = engine().mask_json(r#"  [{"Password":"x"},{"FastIban":"TR330006100519786457841326"}]"#);
    assert_eq!(
        masked,
        r#"[{"Password":""},{"FastIban":"TR3********************326"}]"#
    );
}

#[test]
fn test_json_masked_exclusions_profile() {
    let engine = MaskingEngine::new(
        MaskingOptions::masked_exclusions()
            .with_mask_char('#')
            .with_rule(FieldRule::new("password").excluded()),
    );
    assert_eq!(
        engine.mask_json(r#"{"password":"secret"}"#),
        "{\"password\":\"######\"}"
    );
}

#[test]
fn test_json_numbers_keep_their_text() {
    let masked = engine().mask_json(
        r#"{"traceId":123456789012345678901234567890,"amount":10.50,"password":"x"}"#,
    );
    assert_eq!(
        masked,
        r#"{"traceId":123456789012345678901234567890,"amount":10.50,"password":""}"#
    );
}

#[test]
fn test_dynamic_round_trip_keeps_key_order() {
    let engine = engine();
    let value = Value::from(json!({ "zeta": "a", "password": "pw", "alpha": "b" }));
    let masked = engine.mask_dynamic(value).into_json().unwrap();
    assert_eq!(masked.to_string(), r#"{"zeta":"a","password":"","alpha":"b"}"#);
}

#[test]
fn test_dynamic_map_is_masked_by_key() {
    let engine = engine();
    let mut entries = IndexMap::new();
    entries.insert("password".to_string(), Value::from("hunter2"));
    entries.insert("card-number".to_string(), Value::from("4111111111111111"));
    entries.insert("count".to_string(), Value::from(3_i64));
    entries.insert("maybe".to_string(), Value::from(None::<String>));

    let masked = engine.mask_dynamic(Value::Map(entries));
    let Value::Map(masked) = masked else {
        panic!("map should stay a map");
    };
    assert_eq!(masked["password"], Value::from(""));
    assert_eq!(masked["card-number"], Value::from("************1111"));
    assert_eq!(masked["count"], Value::Int(3));
    assert!(masked["maybe"].is_null());
}

#[test]
fn test_dynamic_sequence_is_rebuilt() {
    let engine = engine();
    let input = Value::Sequence(vec![
        Value::Map(IndexMap::from([(
            "password".to_string(),
            Value::from("hunter2"),
        )])),
        Value::from("password"),
    ]);
    let masked = engine.mask_dynamic(input);
    assert_eq!(
        masked,
        Value::Sequence(vec![
            Value::Map(IndexMap::from([("password".to_string(), Value::from(""))])),
            Value::from("password"),
        ])
    );
}

#[test]
fn test_dynamic_from_json_round_trip() {
    let engine = engine();
    let value = Value::from(json!({
        "account": { "iban": "TR330006100519786457841326", "balance": 10.5 },
        "tags": ["password"]
    }));
    let masked = engine.mask_dynamic(value).into_json();
    assert_eq!(
        masked,
        Some(json!({
            "account": { "iban": "TR3********************326", "balance": 10.5 },
            "tags": ["password"]
        }))
    );
}

#[test]
fn test_dynamic_object_is_masked_through_its_plan() {
    #[derive(Debug, Mask)]
    struct Card {
        card_number: String,
    }

    let engine = engine();
    let object = Value::object(Card {
        card_number: "4111111111111111".to_string(),
    });
    let masked = engine.mask_dynamic(Value::Map(IndexMap::from([(
        "card".to_string(),
        object,
    )])));

    let Value::Map(entries) = masked else {
        panic!("map should stay a map");
    };
    let card = entries["card"].downcast_ref::<Card>().unwrap();
    assert_eq!(card.card_number, "************1111");
}

#[test]
fn test_dynamic_disabled_engine_is_identity() {
    let engine = MaskingEngine::new(
        MaskingOptions::default()
            .disabled()
            .with_rule(FieldRule::new("password").excluded()),
    );
    let value = Value::Map(IndexMap::from([(
        "password".to_string(),
        Value::from("hunter2"),
    )]));
    let masked = engine.mask_dynamic(value);
    assert_eq!(
        masked,
        Value::Map(IndexMap::from([("password".to_string(), Value::from("hunter2"))]))
    );
}

#[test]
fn test_serde_json_value_is_maskable() {
    let engine = engine();
    let mut payload = json!({ "password": "pw", "items": ["password"] });
    engine.mask(&mut payload);
    assert_eq!(payload, json!({ "password": "", "items": ["password"] }));
}
