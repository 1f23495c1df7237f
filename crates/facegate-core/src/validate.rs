//! Advisory field validation.
//!
//! Validators only talk to the user; they never stop a submission. The
//! submission controller repeats its own presence check before sending.

use tracing::debug;

use crate::element::{FileInput, TextInput};
use crate::feedback::{FeedbackReporter, Severity};

pub const MISSING_IMAGE_MESSAGE: &str = "Please upload an image.";

/// Checks a required text input when it loses focus.
#[derive(Debug, Clone)]
pub struct TextValidator {
    input: TextInput,
    label: String,
}

impl TextValidator {
    pub fn new(input: TextInput, label: impl Into<String>) -> Self {
        Self {
            input,
            label: label.into(),
        }
    }

    pub fn message(&self) -> String {
        format!("{} cannot be empty", self.label)
    }

    /// Report an error if the field is blank, otherwise clear any standing
    /// warning. Returns whether the field holds a value.
    pub fn check(&self, reporter: &FeedbackReporter) -> bool {
        let filled = !self.input.is_blank();
        if filled {
            reporter.clear();
        } else {
            debug!(field = %self.input.id(), "required field left empty");
            reporter.report(&self.message(), Severity::Error);
        }
        filled
    }
}

/// Checks a required image picker.
///
/// Bound to the picker being dismissed without a choice, not to a
/// successful selection; see `Bindings::defaults`.
#[derive(Debug, Clone)]
pub struct FileValidator {
    input: FileInput,
}

impl FileValidator {
    pub fn new(input: FileInput) -> Self {
        Self { input }
    }

    pub fn check(&self, reporter: &FeedbackReporter) -> bool {
        let filled = self.input.has_selection();
        if filled {
            reporter.clear();
        } else {
            debug!(field = %self.input.id(), "no image selected");
            reporter.report(MISSING_IMAGE_MESSAGE, Severity::Error);
        }
        filled
    }
}
