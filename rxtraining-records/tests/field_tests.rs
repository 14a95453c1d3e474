use rxtraining_records::{Attachment, FieldValue};
use serde_json::json;

#[test]
fn strings_are_text() {
    assert_eq!(
        FieldValue::classify(json!("  hello  ")),
        FieldValue::Text("  hello  ".into())
    );
}

#[test]
fn string_arrays_are_text_lists() {
    assert_eq!(
        FieldValue::classify(json!(["a", "", "b"])),
        FieldValue::TextList(vec!["a".into(), "".into(), "b".into()])
    );
    assert_eq!(FieldValue::classify(json!([])), FieldValue::TextList(vec![]));
}

#[test]
fn objects_with_text_keys_are_rich() {
    let value = FieldValue::classify(json!({ "text": "x", "name": "ignored" }));
    assert!(matches!(value, FieldValue::RichObject(ref map) if map["text"] == "x"));
}

#[test]
fn option_objects_are_selects() {
    assert_eq!(
        FieldValue::classify(json!({ "id": "selA", "name": "Clinical", "color": "blueLight2" })),
        FieldValue::SelectSingle("Clinical".into())
    );
    assert_eq!(
        FieldValue::classify(json!([{ "name": "CE" }, { "id": "selB", "name": "Live" }])),
        FieldValue::SelectMulti(vec!["CE".into(), "Live".into()])
    );
}

#[test]
fn attachment_arrays_drop_incomplete_entries() {
    let value = FieldValue::classify(json!([
        { "id": "a1", "url": "u", "filename": "f" },
        { "id": "a2" },
        { "url": "u3", "filename": "f3" }
    ]));
    assert_eq!(
        value,
        FieldValue::AttachmentList(vec![Attachment {
            id: "a1".into(),
            url: "u".into(),
            filename: "f".into(),
            mime_type: None,
            size: None,
        }])
    );
}

#[test]
fn scalars_and_mixed_arrays_are_unknown() {
    assert_eq!(FieldValue::classify(json!(42)), FieldValue::Unknown(json!(42)));
    assert_eq!(FieldValue::classify(json!(true)), FieldValue::Unknown(json!(true)));
    assert_eq!(FieldValue::classify(json!(null)), FieldValue::Unknown(json!(null)));
    assert_eq!(
        FieldValue::classify(json!(["a", 1])),
        FieldValue::Unknown(json!(["a", 1]))
    );
}

#[test]
fn accessors() {
    assert_eq!(FieldValue::classify(json!(4.5)).as_f64(), Some(4.5));
    assert_eq!(FieldValue::classify(json!(" 12 ")).as_f64(), Some(12.0));
    assert_eq!(FieldValue::classify(json!(true)).as_bool(), Some(true));
    assert_eq!(FieldValue::classify(json!("yes")).as_bool(), None);
    assert_eq!(FieldValue::classify(json!("t")).as_str(), Some("t"));
}

#[test]
fn deserializes_through_classifier() {
    let value: FieldValue = serde_json::from_str(r#"[{"name":"Online"}]"#).unwrap();
    assert_eq!(value, FieldValue::SelectMulti(vec!["Online".into()]));
}
