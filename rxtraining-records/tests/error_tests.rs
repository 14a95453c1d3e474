use rxtraining_records::RecordsError;

#[test]
fn missing_credential_display() {
    let err = RecordsError::MissingCredential;
    assert_eq!(err.to_string(), "no access token configured for the record store");
}

#[test]
fn http_display_keeps_status_and_body() {
    let err = RecordsError::Http {
        status: 429,
        body: "RATE_LIMIT_REACHED".into(),
    };
    assert_eq!(
        err.to_string(),
        "record store request failed with status 429: RATE_LIMIT_REACHED"
    );
    assert_eq!(err.status(), Some(429));
    assert!(!err.is_not_found());
}

#[test]
fn record_not_found_display() {
    let err = RecordsError::RecordNotFound {
        table: "Programs".into(),
        record_id: "recX".into(),
        body: "NOT_FOUND".into(),
    };
    assert_eq!(err.to_string(), "record recX not found in table Programs: NOT_FOUND");
    assert!(err.is_not_found());
}

#[test]
fn table_not_found_display() {
    let err = RecordsError::TableNotFound("Webinars".into());
    assert_eq!(err.to_string(), "table not found: Webinars");
    assert!(err.is_not_found());
    assert_eq!(err.status(), None);
}

#[test]
fn field_not_found_display() {
    let err = RecordsError::FieldNotFound {
        table: "Programs".into(),
        field: "Level".into(),
    };
    assert_eq!(err.to_string(), "field not found: Level in table Programs");
    assert!(err.is_not_found());
}

#[test]
fn from_serde_json_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("not valid json").unwrap_err();
    let err: RecordsError = json_err.into();
    assert!(err.to_string().contains("serialization error"));
}
