use tracing::{debug, info, warn};

use crate::errors::{Result, WizardError};
use crate::schema::{AnyField, InputCapability, QuestionnaireSchema, Value};
use crate::wizard::answers::AnswerSet;
use crate::wizard::payload::SubmissionPayload;
use crate::wizard::state::{ValidationErrors, WizardPhase, WizardState};

const NEXT_LABEL: &str = "Next";
const SUBMIT_LABEL: &str = "Submit";

/// Outcome of a successful [`WizardController::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    Moved(usize),
    /// Emitted once; the controller keeps no copy of the answers afterwards.
    Submitted(SubmissionPayload),
}

/// Everything a presentation layer needs to render the current step.
#[derive(Debug, Clone)]
pub struct StepPrompt<'a> {
    pub field: &'a AnyField,
    pub capability: InputCapability,
    /// Current answer, or the field default when unanswered.
    pub value: Option<Value>,
    pub error: Option<&'a WizardError>,
    pub index: usize,
    pub total: usize,
    pub advance_label: &'static str,
    pub can_retreat: bool,
}

impl StepPrompt<'_> {
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }
}

/// Step-at-a-time state machine over a [`QuestionnaireSchema`].
pub struct WizardController<'a> {
    schema: &'a QuestionnaireSchema,
    answers: AnswerSet,
    state: WizardState,
}

impl<'a> WizardController<'a> {
    pub fn new(schema: &'a QuestionnaireSchema) -> Self {
        Self {
            schema,
            answers: AnswerSet::new(),
            state: WizardState::default(),
        }
    }

    pub fn schema(&self) -> &'a QuestionnaireSchema {
        self.schema
    }

    pub fn phase(&self) -> WizardPhase {
        self.state.phase()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn validation_errors(&self) -> &ValidationErrors {
        self.state.validation_errors()
    }

    pub fn is_submitted(&self) -> bool {
        self.phase().is_terminal()
    }

    pub fn prompt(&self) -> Result<StepPrompt<'_>> {
        let step = self.asking_step()?;
        let field = self.schema.field_at(step)?;
        let total = self.schema.field_count();
        let value = self
            .answers
            .get(field.name())
            .cloned()
            .or_else(|| field.default_value());
        Ok(StepPrompt {
            field,
            capability: field.capability(),
            value,
            error: self.state.validation_errors().get(field.name()),
            index: step,
            total,
            advance_label: if step + 1 == total {
                SUBMIT_LABEL
            } else {
                NEXT_LABEL
            },
            can_retreat: step > 0,
        })
    }

    /// Writes a raw entry after type coercion only; ranges are checked on advance.
    pub fn set_answer(&mut self, name: &str, raw: impl Into<Value>) -> Result<()> {
        self.asking_step()?;
        let schema = self.schema;
        let field = schema.field(name)?;
        match raw.into().coerce(field.value_type()) {
            Some(value) => {
                debug!(field = name, value = %value, "answer recorded");
                self.answers.set(name, value);
            }
            None => {
                debug!(field = name, "answer cleared");
                self.answers.clear(name);
            }
        }
        Ok(())
    }

    pub fn advance(&mut self) -> Result<Advance> {
        let step = self.asking_step()?;
        let schema = self.schema;
        let field = schema.field_at(step)?;

        if let Err(err) = field.validate(self.answers.get(field.name())) {
            return Err(self.reject(err));
        }
        self.state.errors_mut().clear(field.name());

        if step + 1 < schema.field_count() {
            self.state.set_phase(WizardPhase::Asking(step + 1));
            debug!(from = step, to = step + 1, "advanced");
            return Ok(Advance::Moved(step + 1));
        }

        let payload = match self.validate_all() {
            Ok(payload) => payload,
            Err(err) => return Err(self.reject(err)),
        };
        self.state.set_phase(WizardPhase::Submitted);
        self.answers = AnswerSet::new();
        info!(fields = payload.len(), "questionnaire submitted");
        Ok(Advance::Submitted(payload))
    }

    /// Moves back one step without validating anything. A no-op on the first step.
    pub fn retreat(&mut self) -> Result<WizardPhase> {
        let step = self.asking_step()?;
        if step > 0 {
            self.state.set_phase(WizardPhase::Asking(step - 1));
            debug!(from = step, to = step - 1, "retreated");
        }
        Ok(self.phase())
    }

    fn asking_step(&self) -> Result<usize> {
        self.state.current_step().ok_or_else(|| {
            warn!("wizard action ignored after submission");
            WizardError::AlreadyTerminal
        })
    }

    fn validate_all(&self) -> Result<SubmissionPayload> {
        let mut entries = Vec::with_capacity(self.schema.field_count());
        for field in self.schema.fields() {
            let value = self
                .schema
                .validate(field, self.answers.get(field.name()))?;
            entries.push((field.name().to_string(), value));
        }
        Ok(SubmissionPayload::new(entries))
    }

    fn reject(&mut self, err: WizardError) -> WizardError {
        if let Some(field) = err.field() {
            warn!(field, error = %err, "answer rejected");
            self.state.errors_mut().set(field, err.clone());
        }
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::schema::{
        Boolean, Field, Number, DAILY_KILOMETERS, HAS_CHARGERS_NEARBY, NEEDS_LARGE_TRUNK,
        PRICE_LIMIT, SEATING_CAPACITY,
    };

    fn fill_valid(controller: &mut WizardController<'_>) {
        controller.set_answer(HAS_CHARGERS_NEARBY, true).unwrap();
        controller.set_answer(DAILY_KILOMETERS, 40).unwrap();
        controller.set_answer(SEATING_CAPACITY, 4).unwrap();
        controller.set_answer(NEEDS_LARGE_TRUNK, false).unwrap();
        controller.set_answer(PRICE_LIMIT, 35000).unwrap();
    }

    #[test]
    fn starts_on_first_step_with_no_answers() {
        let schema = QuestionnaireSchema::vehicle_needs();
        let controller = WizardController::new(&schema);
        assert_eq!(controller.phase(), WizardPhase::Asking(0));
        assert!(controller.answers().is_empty());
        assert!(controller.validation_errors().is_empty());
    }

    #[test]
    fn successful_advance_moves_one_step_and_clears_error() {
        let schema = QuestionnaireSchema::vehicle_needs();
        let mut controller = WizardController::new(&schema);
        fill_valid(&mut controller);
        controller.set_answer(DAILY_KILOMETERS, 0).unwrap();

        assert_eq!(controller.advance(), Ok(Advance::Moved(1)));
        let err = controller.advance().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(controller.validation_errors().get(DAILY_KILOMETERS).is_some());

        controller.set_answer(DAILY_KILOMETERS, 1).unwrap();
        assert_eq!(controller.advance(), Ok(Advance::Moved(2)));
        assert_eq!(controller.phase(), WizardPhase::Asking(2));
        assert!(controller.validation_errors().get(DAILY_KILOMETERS).is_none());

        for step in 2..schema.field_count() - 1 {
            assert_eq!(controller.advance(), Ok(Advance::Moved(step + 1)));
            assert_eq!(controller.phase(), WizardPhase::Asking(step + 1));
        }
    }

    #[test]
    fn retreat_from_first_step_is_a_noop() {
        let schema = QuestionnaireSchema::vehicle_needs();
        let mut controller = WizardController::new(&schema);
        let before = controller.state().clone();
        assert_eq!(controller.retreat(), Ok(WizardPhase::Asking(0)));
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn retreat_ignores_invalid_current_value() {
        let schema = QuestionnaireSchema::vehicle_needs();
        let mut controller = WizardController::new(&schema);
        controller.advance().unwrap();
        controller.set_answer(DAILY_KILOMETERS, 5000).unwrap();
        assert!(controller.advance().is_err());

        assert_eq!(controller.retreat(), Ok(WizardPhase::Asking(0)));
        assert_eq!(
            controller.answers().get(DAILY_KILOMETERS),
            Some(&Value::Number(5000.0))
        );
    }

    #[test]
    fn set_answer_rejects_unknown_field() {
        let schema = QuestionnaireSchema::vehicle_needs();
        let mut controller = WizardController::new(&schema);
        let err = controller.set_answer("dailyKilometres", 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownField);
        assert!(controller.answers().is_empty());
    }

    #[test]
    fn set_answer_does_not_range_check() {
        let schema = QuestionnaireSchema::vehicle_needs();
        let mut controller = WizardController::new(&schema);
        controller.set_answer(SEATING_CAPACITY, "99").unwrap();
        assert_eq!(
            controller.answers().get(SEATING_CAPACITY),
            Some(&Value::Number(99.0))
        );
        assert!(controller.validation_errors().is_empty());
    }

    #[test]
    fn text_that_is_not_a_number_fails_as_type_mismatch() {
        let schema = QuestionnaireSchema::vehicle_needs();
        let mut controller = WizardController::new(&schema);
        controller.advance().unwrap();
        controller.set_answer(DAILY_KILOMETERS, "far").unwrap();
        let err = controller.advance().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(controller.phase(), WizardPhase::Asking(1));
    }

    #[test]
    fn submission_is_emitted_once() {
        let schema = QuestionnaireSchema::vehicle_needs();
        let mut controller = WizardController::new(&schema);
        controller.set_answer(HAS_CHARGERS_NEARBY, false).unwrap();
        controller.set_answer(DAILY_KILOMETERS, 40).unwrap();
        controller.set_answer(SEATING_CAPACITY, 4).unwrap();
        controller.set_answer(NEEDS_LARGE_TRUNK, false).unwrap();
        controller.set_answer(PRICE_LIMIT, 35000).unwrap();

        let mut emitted = Vec::new();
        for _ in 0..schema.field_count() {
            if let Advance::Submitted(payload) = controller.advance().unwrap() {
                emitted.push(payload);
            }
        }
        assert_eq!(emitted.len(), 1);
        assert_eq!(
            emitted[0].to_json(false).unwrap(),
            r#"{"hasChargersNearby":false,"dailyKilometers":40,"seatingCapacity":4,"needsLargeTrunk":false,"priceLimit":35000}"#
        );
        assert!(controller.is_submitted());

        for _ in 0..3 {
            assert_eq!(controller.advance(), Err(WizardError::AlreadyTerminal));
            assert_eq!(controller.phase(), WizardPhase::Submitted);
        }
        assert_eq!(controller.retreat(), Err(WizardError::AlreadyTerminal));
        assert_eq!(
            controller.set_answer(PRICE_LIMIT, 1),
            Err(WizardError::AlreadyTerminal)
        );
        assert!(controller.answers().is_empty());
    }

    #[test]
    fn final_pass_catches_fields_edited_after_visiting() {
        let schema = QuestionnaireSchema::vehicle_needs();
        let mut controller = WizardController::new(&schema);
        fill_valid(&mut controller);
        for _ in 0..schema.field_count() - 1 {
            controller.advance().unwrap();
        }
        controller.set_answer(SEATING_CAPACITY, 12).unwrap();

        let err = controller.advance().unwrap_err();
        assert_eq!(err.field(), Some(SEATING_CAPACITY));
        assert_eq!(controller.phase(), WizardPhase::Asking(4));
        assert!(controller.validation_errors().get(SEATING_CAPACITY).is_some());
    }

    #[test]
    fn final_pass_surfaces_first_failing_field() {
        let schema = QuestionnaireSchema::new(vec![
            Field::<Number>::new("a", "A")
                .with_bounds(crate::schema::Bounds::between(1.0, 2.0))
                .into(),
            Field::<Number>::new("b", "B").into(),
            Field::<Boolean>::new("c", "C").into(),
        ])
        .unwrap();
        let mut controller = WizardController::new(&schema);
        controller.set_answer("a", 1).unwrap();
        controller.advance().unwrap();
        controller.set_answer("b", 1).unwrap();
        controller.advance().unwrap();
        controller.set_answer("a", 3).unwrap();
        controller.set_answer("b", "x").unwrap();

        let err = controller.advance().unwrap_err();
        assert_eq!(err.field(), Some("a"));
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn unvisited_booleans_submit_as_false() {
        let schema = QuestionnaireSchema::vehicle_needs();
        let mut controller = WizardController::new(&schema);
        controller.set_answer(DAILY_KILOMETERS, 40).unwrap();
        controller.set_answer(SEATING_CAPACITY, 4).unwrap();
        controller.set_answer(PRICE_LIMIT, 35000).unwrap();

        let mut payload = None;
        while payload.is_none() {
            if let Advance::Submitted(emitted) = controller.advance().unwrap() {
                payload = Some(emitted);
            }
        }
        let payload = payload.unwrap();
        assert_eq!(payload.get(HAS_CHARGERS_NEARBY), Some(&Value::Boolean(false)));
        assert_eq!(payload.get(NEEDS_LARGE_TRUNK), Some(&Value::Boolean(false)));
    }

    #[test]
    fn prompt_describes_current_step() {
        let schema = QuestionnaireSchema::vehicle_needs();
        let mut controller = WizardController::new(&schema);

        let prompt = controller.prompt().unwrap();
        assert_eq!(prompt.field.name(), HAS_CHARGERS_NEARBY);
        assert_eq!(prompt.capability, InputCapability::Toggle);
        assert_eq!(prompt.value, Some(Value::Boolean(false)));
        assert_eq!(prompt.advance_label, "Next");
        assert!(!prompt.can_retreat);

        for _ in 0..4 {
            controller.set_answer(DAILY_KILOMETERS, 40).unwrap();
            controller.set_answer(SEATING_CAPACITY, 4).unwrap();
            controller.advance().unwrap();
        }
        let prompt = controller.prompt().unwrap();
        assert_eq!(prompt.field.name(), PRICE_LIMIT);
        assert_eq!(prompt.capability, InputCapability::NumericEntry);
        assert_eq!(prompt.value, None);
        assert_eq!(prompt.advance_label, "Submit");
        assert!(prompt.can_retreat);
        assert!(prompt.is_last());
    }

    #[test]
    fn prompt_carries_recorded_error() {
        let schema = QuestionnaireSchema::vehicle_needs();
        let mut controller = WizardController::new(&schema);
        controller.advance().unwrap();
        controller.set_answer(DAILY_KILOMETERS, 0).unwrap();
        let _ = controller.advance();

        let prompt = controller.prompt().unwrap();
        assert_eq!(prompt.error.map(WizardError::kind), Some(ErrorKind::OutOfRange));
    }
}
