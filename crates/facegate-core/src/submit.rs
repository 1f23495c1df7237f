// ── Submission controller ──
//
// Drives one form submission end to end: read the inputs, hold the submit
// control busy, issue exactly one request, and turn whatever comes back into
// user feedback. Every failure is recovered here; callers get a
// `SubmitOutcome` summary and never an error.

use facegate_api::{IdentityClient, Verdict};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::busy::BusyGuard;
use crate::element::{Button, FileInput, Shared, TextInput};
use crate::feedback::{FeedbackReporter, Severity};

// ── Flow ─────────────────────────────────────────────────────────────

/// The two submission flows and their fixed user-facing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    Register,
    SignIn,
}

impl Flow {
    /// Shown when a required input is missing; no request is made.
    pub fn missing_input_message(self) -> &'static str {
        match self {
            Self::Register => "Please enter your name and select an image.",
            Self::SignIn => "Please upload an image for sign-in.",
        }
    }

    /// Shown for a rejection that carries no usable `detail`.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::Register => "Registration failed.",
            Self::SignIn => "Sign-in failed.",
        }
    }

    /// Shown when the request never completed or the reply was unreadable.
    pub fn error_message(self) -> &'static str {
        match self {
            Self::Register => "An error occurred during registration.",
            Self::SignIn => "An error occurred during sign-in.",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::SignIn => "sign-in",
        }
    }
}

// ── State and outcome ────────────────────────────────────────────────

/// Where a flow is in its submission lifecycle.
///
/// `Succeeded` and `Failed` are held until the next attempt begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// What a submission attempt amounted to. The text is what the user was
/// shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A required input was missing; nothing was sent.
    Invalid,
    Succeeded { message: String },
    Rejected { status: u16, message: String },
    /// Transport failure or unreadable reply.
    Failed { message: String },
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// The feedback text shown for this outcome, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Invalid => None,
            Self::Succeeded { message }
            | Self::Rejected { message, .. }
            | Self::Failed { message } => Some(message),
        }
    }
}

// ── Forms ────────────────────────────────────────────────────────────

/// Elements of the register page the flow reads and updates.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub name: TextInput,
    pub file: FileInput,
    pub submit: Button,
    /// Hidden until a registration succeeds.
    pub go_to_sign_in: Button,
}

#[derive(Debug, Clone)]
pub struct SignInForm {
    pub file: FileInput,
    pub submit: Button,
}

// ── Controller ───────────────────────────────────────────────────────

/// Runs submissions against the identity backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SubmissionController {
    client: IdentityClient,
    register_state: Shared<SubmitState>,
    sign_in_state: Shared<SubmitState>,
}

impl SubmissionController {
    pub fn new(client: IdentityClient) -> Self {
        Self {
            client,
            register_state: Shared::new(SubmitState::Idle),
            sign_in_state: Shared::new(SubmitState::Idle),
        }
    }

    pub fn client(&self) -> &IdentityClient {
        &self.client
    }

    pub fn state(&self, flow: Flow) -> SubmitState {
        self.state_cell(flow).get()
    }

    /// Watch one flow's lifecycle.
    pub fn subscribe(&self, flow: Flow) -> watch::Receiver<SubmitState> {
        self.state_cell(flow).subscribe()
    }

    fn state_cell(&self, flow: Flow) -> &Shared<SubmitState> {
        match flow {
            Flow::Register => &self.register_state,
            Flow::SignIn => &self.sign_in_state,
        }
    }

    fn transition(&self, flow: Flow, to: SubmitState) {
        debug!(flow = flow.name(), state = ?to, "submission state");
        self.state_cell(flow).set(to);
    }

    /// Submit the register form.
    ///
    /// Sends the trimmed name with the selected image. On success the
    /// register control is hidden and the go-to-sign-in control shown.
    pub async fn submit_register(
        &self,
        form: &RegisterForm,
        reporter: &FeedbackReporter,
    ) -> SubmitOutcome {
        let flow = Flow::Register;
        self.transition(flow, SubmitState::Validating);

        let name = form.name.value().trim().to_owned();
        let Some(image) = form.file.selection().filter(|_| !name.is_empty()) else {
            return self.reject_input(flow, reporter);
        };

        let outcome = {
            let _busy = BusyGuard::acquire(&form.submit);
            self.transition(flow, SubmitState::Submitting);
            info!(%name, file = image.file_name(), "registering");

            let result = self.client.register_user(&name, image).await;
            let outcome = conclude(flow, result, reporter);
            if outcome.is_success() {
                form.submit.set_visible(false);
                form.go_to_sign_in.set_visible(true);
            }
            outcome
        };

        self.settle(flow, &outcome);
        outcome
    }

    /// Submit the sign-in form.
    pub async fn submit_sign_in(
        &self,
        form: &SignInForm,
        reporter: &FeedbackReporter,
    ) -> SubmitOutcome {
        let flow = Flow::SignIn;
        self.transition(flow, SubmitState::Validating);

        let Some(image) = form.file.selection() else {
            return self.reject_input(flow, reporter);
        };

        let outcome = {
            let _busy = BusyGuard::acquire(&form.submit);
            self.transition(flow, SubmitState::Submitting);
            info!(file = image.file_name(), "signing in");

            let result = self.client.sign_in_user(image).await;
            conclude(flow, result, reporter)
        };

        self.settle(flow, &outcome);
        outcome
    }

    fn reject_input(&self, flow: Flow, reporter: &FeedbackReporter) -> SubmitOutcome {
        debug!(flow = flow.name(), "required input missing, nothing sent");
        reporter.report(flow.missing_input_message(), Severity::Error);
        self.transition(flow, SubmitState::Idle);
        SubmitOutcome::Invalid
    }

    fn settle(&self, flow: Flow, outcome: &SubmitOutcome) {
        let state = if outcome.is_success() {
            SubmitState::Succeeded
        } else {
            SubmitState::Failed
        };
        self.transition(flow, state);
    }
}

/// Map a reply (or its absence) to feedback and an outcome.
fn conclude(
    flow: Flow,
    result: Result<Verdict, facegate_api::Error>,
    reporter: &FeedbackReporter,
) -> SubmitOutcome {
    let outcome = match result {
        Ok(Verdict::Accepted { message }) => {
            info!(flow = flow.name(), %message, "accepted");
            SubmitOutcome::Succeeded { message }
        }
        Ok(Verdict::Rejected { status, detail }) => {
            let message = detail.unwrap_or_else(|| flow.fallback_message().to_owned());
            info!(flow = flow.name(), status, %message, "rejected");
            SubmitOutcome::Rejected { status, message }
        }
        Err(e) => {
            warn!(flow = flow.name(), error = %e, "submission failed");
            SubmitOutcome::Failed {
                message: flow.error_message().to_owned(),
            }
        }
    };

    if let Some(text) = outcome.message() {
        let severity = if outcome.is_success() {
            Severity::Success
        } else {
            Severity::Error
        };
        reporter.report(text, severity);
    }
    outcome
}
