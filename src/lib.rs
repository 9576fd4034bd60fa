#![doc(test(attr(deny(warnings))))]

//! Vehicle Questionnaire asks a fixed, ordered set of questions one step at a
//! time, validates each answer against its declared type and bounds, and hands
//! the completed answers to a sink as a flat payload.

pub mod cli;
pub mod config;
pub mod errors;
pub mod schema;
pub mod utils;
pub mod wizard;

pub use errors::{ErrorKind, WizardError};
pub use schema::QuestionnaireSchema;
pub use wizard::{Advance, SubmissionPayload, WizardController, WizardPhase};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter.
pub fn init() {
    init_with_filter(config::DEFAULT_LOG_FILTER);
}

/// Initializes global tracing once, layering `filter` over `RUST_LOG`.
pub fn init_with_filter(filter: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::debug!("Vehicle Questionnaire tracing initialized.");
    });
}
