use std::fs;
use std::rc::Rc;

use projectboard::board::{AlertQueue, FormField, ProjectBoard, SubmitOutcome};
use projectboard::{
    DEFAULT_MARKUP, DocumentFormat, NumericCoercion, load_config_file, load_config_str,
};

#[test]
fn json_config_changes_rules_and_headings() {
    let config = load_config_str(
        r##"{
            "input": {
                "fields": {
                    "title": { "selector": "#title", "label": "Name", "rules": { "required": true, "maxLength": 5 } }
                }
            },
            "lists": [
                { "status": "active", "heading": "Doing" },
                { "status": "finished", "heading": "Done" }
            ]
        }"##,
        DocumentFormat::Json,
    )
    .unwrap();
    assert_eq!(config.input.coercion, NumericCoercion::Strict);

    let alerts = AlertQueue::new();
    let mut board =
        ProjectBoard::from_markup(DEFAULT_MARKUP, &config, Rc::new(alerts.clone())).unwrap();
    assert_eq!(board.input().unwrap().label(FormField::Title), "Name");
    assert_eq!(board.input().unwrap().label(FormField::Manday), "Man-days");
    assert!(board.to_html().contains("<h2>Doing</h2>"));

    board.set_field(FormField::Title, "Too long").unwrap();
    board.set_field(FormField::Description, "Design the API").unwrap();
    board.set_field(FormField::Manday, "3").unwrap();
    assert!(matches!(board.submit().unwrap(), SubmitOutcome::Rejected(_)));
    assert_eq!(alerts.len(), 1);
}

#[test]
fn config_files_are_loaded_from_disk() {
    let path = std::env::temp_dir().join(format!("projectboard-config-{}.json", std::process::id()));
    fs::write(&path, r#"{ "host": "main", "input": { "coercion": "lenient" } }"#).unwrap();

    let config = load_config_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(config.host, "main");
    assert_eq!(config.input.coercion, NumericCoercion::Lenient);
}

#[test]
fn missing_config_file_names_the_path() {
    let err = load_config_file("/definitely/not/here.json").unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here.json"));
}

#[test]
fn unknown_keys_are_rejected() {
    let err = load_config_str(r#"{ "input": { "colour": "red" } }"#, DocumentFormat::Json).unwrap_err();
    assert!(format!("{err:#}").contains("/input"), "{err:#}");
}

#[test]
fn duplicate_list_statuses_are_rejected() {
    let err = load_config_str(
        r#"{ "lists": [{ "status": "active" }, { "status": "finished" }, { "status": "active" }] }"#,
        DocumentFormat::Json,
    )
    .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("/lists/2/status"), "{message}");
    assert!(message.contains("active"), "{message}");
}
