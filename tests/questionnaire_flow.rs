use vehicle_questionnaire::schema::{
    Value, DAILY_KILOMETERS, HAS_CHARGERS_NEARBY, NEEDS_LARGE_TRUNK, PRICE_LIMIT,
    SEATING_CAPACITY,
};
use vehicle_questionnaire::wizard::VehicleNeeds;
use vehicle_questionnaire::{
    Advance, ErrorKind, QuestionnaireSchema, WizardController, WizardPhase,
};

fn answer_and_advance(
    controller: &mut WizardController<'_>,
    name: &str,
    value: impl Into<Value>,
) -> Advance {
    controller.set_answer(name, value).unwrap();
    controller.advance().unwrap()
}

#[test]
fn full_walkthrough_submits_typed_payload() {
    let schema = QuestionnaireSchema::vehicle_needs();
    let mut controller = WizardController::new(&schema);

    assert_eq!(
        answer_and_advance(&mut controller, HAS_CHARGERS_NEARBY, true),
        Advance::Moved(1)
    );
    assert_eq!(
        answer_and_advance(&mut controller, DAILY_KILOMETERS, "40"),
        Advance::Moved(2)
    );
    assert_eq!(
        answer_and_advance(&mut controller, SEATING_CAPACITY, 4),
        Advance::Moved(3)
    );
    assert_eq!(controller.advance().unwrap(), Advance::Moved(4));

    let prompt = controller.prompt().unwrap();
    assert_eq!(prompt.advance_label, "Submit");
    assert!(prompt.is_last());

    let Advance::Submitted(payload) = answer_and_advance(&mut controller, PRICE_LIMIT, 35000)
    else {
        panic!("expected submission");
    };
    assert_eq!(controller.phase(), WizardPhase::Submitted);

    let needs = VehicleNeeds::try_from(&payload).unwrap();
    assert!(needs.has_chargers_nearby);
    assert_eq!(needs.daily_kilometers, 40.0);
    assert_eq!(needs.seating_capacity, 4.0);
    assert!(!needs.needs_large_trunk);
    assert_eq!(needs.price_limit, 35000.0);
}

#[test]
fn boundaries_are_inclusive() {
    let schema = QuestionnaireSchema::vehicle_needs();
    let cases = [
        (DAILY_KILOMETERS, 1.0, 1000.0),
        (SEATING_CAPACITY, 1.0, 8.0),
        (PRICE_LIMIT, 10_000.0, 200_000.0),
    ];

    for (name, min, max) in cases {
        let field = schema.field(name).unwrap();
        for ok in [min, max] {
            assert!(schema.validate(field, Some(&Value::Number(ok))).is_ok());
        }
        for bad in [min - 1.0, max + 1.0] {
            let err = schema
                .validate(field, Some(&Value::Number(bad)))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OutOfRange, "{name} accepted {bad}");
        }
    }
}

#[test]
fn invalid_answer_blocks_until_corrected() {
    let schema = QuestionnaireSchema::vehicle_needs();
    let mut controller = WizardController::new(&schema);
    controller.advance().unwrap();

    controller.set_answer(DAILY_KILOMETERS, 5000).unwrap();
    let err = controller.advance().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert_eq!(controller.phase(), WizardPhase::Asking(1));
    assert!(controller
        .validation_errors()
        .get(DAILY_KILOMETERS)
        .is_some());

    controller.set_answer(DAILY_KILOMETERS, 500).unwrap();
    assert_eq!(controller.advance().unwrap(), Advance::Moved(2));
    assert!(controller.validation_errors().is_empty());
}

#[test]
fn retreat_keeps_answers_and_never_validates() {
    let schema = QuestionnaireSchema::vehicle_needs();
    let mut controller = WizardController::new(&schema);
    answer_and_advance(&mut controller, HAS_CHARGERS_NEARBY, true);
    controller.set_answer(DAILY_KILOMETERS, 0).unwrap();

    assert_eq!(controller.retreat().unwrap(), WizardPhase::Asking(0));
    assert_eq!(controller.retreat().unwrap(), WizardPhase::Asking(0));
    assert_eq!(
        controller.answers().get(DAILY_KILOMETERS),
        Some(&Value::Number(0.0))
    );
    assert_eq!(
        controller.prompt().unwrap().value,
        Some(Value::Boolean(true))
    );
}

#[test]
fn submitted_wizard_rejects_further_actions() {
    let schema = QuestionnaireSchema::vehicle_needs();
    let mut controller = WizardController::new(&schema);
    controller.advance().unwrap();
    answer_and_advance(&mut controller, DAILY_KILOMETERS, 1);
    answer_and_advance(&mut controller, SEATING_CAPACITY, 1);
    answer_and_advance(&mut controller, NEEDS_LARGE_TRUNK, true);
    assert!(matches!(
        answer_and_advance(&mut controller, PRICE_LIMIT, 10_000),
        Advance::Submitted(_)
    ));

    assert_eq!(controller.advance().unwrap_err().kind(), ErrorKind::AlreadyTerminal);
    assert_eq!(controller.retreat().unwrap_err().kind(), ErrorKind::AlreadyTerminal);
    assert_eq!(
        controller.set_answer(PRICE_LIMIT, 20_000).unwrap_err().kind(),
        ErrorKind::AlreadyTerminal
    );
    assert!(controller.answers().is_empty());
}

#[test]
fn unknown_field_suggests_closest_name() {
    let schema = QuestionnaireSchema::vehicle_needs();
    let mut controller = WizardController::new(&schema);
    let err = controller.set_answer("priceLimt", 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownField);
    assert!(err.to_string().contains("priceLimit"));
}

#[test]
fn custom_schema_from_json_drives_the_wizard() {
    let schema = QuestionnaireSchema::from_json(
        r#"{
            "fields": [
                { "name": "towing", "label": "Do you tow a trailer?", "type": "boolean", "default": true },
                { "name": "range", "label": "Minimum range (km)", "type": "number", "min": 100 }
            ]
        }"#,
    )
    .unwrap();
    let mut controller = WizardController::new(&schema);

    assert_eq!(controller.advance().unwrap(), Advance::Moved(1));
    controller.set_answer("range", 50).unwrap();
    assert_eq!(controller.advance().unwrap_err().kind(), ErrorKind::OutOfRange);

    let Advance::Submitted(payload) = answer_and_advance(&mut controller, "range", 450) else {
        panic!("expected submission");
    };
    assert_eq!(
        payload.to_json(false).unwrap(),
        r#"{"towing":true,"range":450}"#
    );
}
