use std::rc::Rc;

use projectboard::board::{
    AlertQueue, FormField, ProjectBoard, ProjectRecord, RejectionReason, SubmitOutcome,
    ValidationRejection,
};
use projectboard::{BoardConfig, DEFAULT_MARKUP, NumericCoercion};
use rstest::rstest;

fn board_with(coercion: NumericCoercion) -> (ProjectBoard, AlertQueue) {
    let alerts = AlertQueue::new();
    let mut config = BoardConfig::default();
    config.input.coercion = coercion;
    let board = ProjectBoard::from_markup(DEFAULT_MARKUP, &config, Rc::new(alerts.clone()))
        .expect("default markup parses");
    assert!(board.is_ready(), "{:?}", board.startup_errors());
    (board, alerts)
}

fn fill(board: &mut ProjectBoard, title: &str, description: &str, manday: &str) {
    board.set_field(FormField::Title, title).unwrap();
    board.set_field(FormField::Description, description).unwrap();
    board.set_field(FormField::Manday, manday).unwrap();
}

fn field_texts(board: &ProjectBoard) -> Vec<String> {
    FormField::ALL
        .into_iter()
        .map(|field| board.field_text(field).unwrap())
        .collect()
}

#[test]
fn blank_title_is_rejected_and_values_are_kept() {
    let (mut board, alerts) = board_with(NumericCoercion::Strict);
    fill(&mut board, "", "Build system", "5");

    let outcome = board.submit().unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected(ValidationRejection {
            field: FormField::Title,
            reason: RejectionReason::RequiredFieldEmpty,
        })
    );
    assert_eq!(field_texts(&board), ["", "Build system", "5"]);
    assert!(board.projects().is_empty());
    assert_eq!(alerts.pop().as_deref(), Some("a required field is empty"));
    assert!(alerts.is_empty());
}

#[test]
fn valid_submission_emits_record_and_clears_the_form() {
    let (mut board, alerts) = board_with(NumericCoercion::Strict);
    fill(&mut board, "API", "Design the API", "3");

    let outcome = board.submit().unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Accepted(ProjectRecord::new("API", "Design the API", 3.0))
    );
    assert_eq!(field_texts(&board), ["", "", ""]);
    assert!(alerts.is_empty());
    let projects = board.projects();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, "project-1");
    assert_eq!(projects[0].manday, 3.0);
}

#[test]
fn submit_event_default_is_prevented() {
    let (mut board, _alerts) = board_with(NumericCoercion::Strict);
    let form = board.input().unwrap().controls().form;
    let event = board
        .document_mut()
        .dispatch_event(form, projectboard::dom::EventType::Submit)
        .unwrap();
    assert!(event.is_default_prevented());
}

#[rstest]
#[case::short_description("API", "Tiny", "3", FormField::Description, RejectionReason::InvalidInput)]
#[case::blank_description("API", "   ", "3", FormField::Description, RejectionReason::RequiredFieldEmpty)]
#[case::blank_manday("API", "Design the API", "", FormField::Manday, RejectionReason::RequiredFieldEmpty)]
#[case::unparseable_manday("API", "Design the API", "abc", FormField::Manday, RejectionReason::InvalidInput)]
#[case::manday_too_small("API", "Design the API", "0.5", FormField::Manday, RejectionReason::InvalidInput)]
#[case::manday_too_large("API", "Design the API", "1001", FormField::Manday, RejectionReason::InvalidInput)]
#[case::infinite_manday("API", "Design the API", "inf", FormField::Manday, RejectionReason::InvalidInput)]
fn strict_rejections(
    #[case] title: &str,
    #[case] description: &str,
    #[case] manday: &str,
    #[case] field: FormField,
    #[case] reason: RejectionReason,
) {
    let (mut board, alerts) = board_with(NumericCoercion::Strict);
    fill(&mut board, title, description, manday);

    let outcome = board.submit().unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected(ValidationRejection { field, reason })
    );
    assert_eq!(field_texts(&board), [title, description, manday]);
    assert_eq!(alerts.len(), 1);
}

#[test]
fn strict_accepts_padded_numbers() {
    let (mut board, _alerts) = board_with(NumericCoercion::Strict);
    fill(&mut board, "API", "Design the API", " 12.5 ");
    assert_eq!(
        board.submit().unwrap(),
        SubmitOutcome::Accepted(ProjectRecord::new("API", "Design the API", 12.5))
    );
}

#[test]
fn lenient_lets_unparseable_effort_through_as_nan() {
    let (mut board, alerts) = board_with(NumericCoercion::Lenient);
    fill(&mut board, "API", "Design the API", "abc");

    let SubmitOutcome::Accepted(record) = board.submit().unwrap() else {
        panic!("lenient coercion should accept text that passes the text rules");
    };

    assert!(record.manday.is_nan());
    assert!(alerts.is_empty());
    assert_eq!(field_texts(&board), ["", "", ""]);
    assert!(board.to_html().contains("<h3>unknown effort</h3>"));
}

#[test]
fn lenient_skips_numeric_bounds() {
    let (mut board, _alerts) = board_with(NumericCoercion::Lenient);
    fill(&mut board, "API", "Design the API", "5000");
    assert_eq!(
        board.submit().unwrap(),
        SubmitOutcome::Accepted(ProjectRecord::new("API", "Design the API", 5000.0))
    );
}

#[test]
fn configured_messages_are_used() {
    let alerts = AlertQueue::new();
    let mut config = BoardConfig::default();
    config.input.messages.invalid_input = "Invalid input, please try again!".into();
    let mut board =
        ProjectBoard::from_markup(DEFAULT_MARKUP, &config, Rc::new(alerts.clone())).unwrap();
    fill(&mut board, "API", "Tiny", "3");

    board.submit().unwrap();

    assert_eq!(alerts.pop().as_deref(), Some("Invalid input, please try again!"));
}
