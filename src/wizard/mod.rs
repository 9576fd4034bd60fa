//! Step-wise questionnaire engine: answers, navigation state and submission.

pub mod answers;
pub mod controller;
pub mod payload;
pub mod sink;
pub mod state;

pub use answers::AnswerSet;
pub use controller::{Advance, StepPrompt, WizardController};
pub use payload::{SubmissionPayload, VehicleNeeds};
pub use sink::{CollectingSink, ConsoleSink, PayloadSink};
pub use state::{ValidationErrors, WizardPhase, WizardState};
