// ── Frontend ──
//
// The constructed context the handlers run against: every element handle,
// the navigator, one feedback reporter per page, the event bindings and the
// submission controller. Front ends render from these handles and feed
// interactions back through `dispatch`.

use std::sync::Arc;

use facegate_api::{IdentityClient, TlsMode, TransportConfig};
use tracing::{debug, trace};

use crate::binding::{Bindings, EventKind, FormEvent, Handler};
use crate::config::{FeedbackConfig, FrontendConfig, TlsVerification};
use crate::element::{Button, ElementId, FileInput, Shared, TextInput};
use crate::error::CoreError;
use crate::feedback::{FeedbackReporter, StatusRegion, ToastLayer};
use crate::nav::{Location, Navigator};
use crate::submit::{RegisterForm, SignInForm, SubmissionController, SubmitOutcome};
use crate::validate::{FileValidator, TextValidator};

/// What a dispatched interaction did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// No handler is bound for the element and interaction.
    Unbound,
    /// The control was disabled or hidden and swallowed the interaction.
    Suppressed,
    /// A validator ran; `true` when the field held a value.
    Validated(bool),
    Submitted(SubmitOutcome),
    Navigated(Location),
}

/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct Frontend {
    inner: Arc<FrontendInner>,
}

struct FrontendInner {
    register: RegisterForm,
    sign_in: SignInForm,
    message_box: StatusRegion,
    toasts: ToastLayer,
    register_feedback: FeedbackReporter,
    sign_in_feedback: FeedbackReporter,
    navigator: Navigator,
    bindings: Shared<Bindings>,
    controller: SubmissionController,
}

impl Frontend {
    /// Build a frontend talking to the configured backend. No handlers are
    /// bound yet; see [`bind_defaults`](Self::bind_defaults).
    pub fn new(config: FrontendConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = IdentityClient::new(config.url.clone(), &transport)?;
        debug!(url = %config.url, "frontend configured");
        Ok(Self::with_client(client, config.feedback))
    }

    /// Build a frontend around an existing client.
    pub fn with_client(client: IdentityClient, feedback: FeedbackConfig) -> Self {
        let message_box = StatusRegion::new();
        let toasts = ToastLayer::new();
        let register_feedback =
            FeedbackReporter::for_mode(feedback.register, &message_box, &toasts, feedback.toasts);
        let sign_in_feedback =
            FeedbackReporter::for_mode(feedback.sign_in, &message_box, &toasts, feedback.toasts);

        Self {
            inner: Arc::new(FrontendInner {
                register: RegisterForm {
                    name: TextInput::new(ElementId::Name),
                    file: FileInput::new(ElementId::File),
                    submit: Button::new(ElementId::RegisterButton, "Register"),
                    go_to_sign_in: Button::hidden(ElementId::GoToSignInButton, "Go to Sign In"),
                },
                sign_in: SignInForm {
                    file: FileInput::new(ElementId::SignInFile),
                    submit: Button::new(ElementId::SignInButton, "Sign In"),
                },
                message_box,
                toasts,
                register_feedback,
                sign_in_feedback,
                navigator: Navigator::default(),
                bindings: Shared::new(Bindings::new()),
                controller: SubmissionController::new(client),
            }),
        }
    }

    // ── Element access ───────────────────────────────────────────────

    pub fn register_form(&self) -> &RegisterForm {
        &self.inner.register
    }

    pub fn sign_in_form(&self) -> &SignInForm {
        &self.inner.sign_in
    }

    pub fn message_box(&self) -> &StatusRegion {
        &self.inner.message_box
    }

    pub fn toasts(&self) -> &ToastLayer {
        &self.inner.toasts
    }

    pub fn navigator(&self) -> &Navigator {
        &self.inner.navigator
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.inner.controller
    }

    /// The reporter used by the page at `location`. Home has no form and
    /// shares the register page's presentation.
    pub fn reporter_for(&self, location: Location) -> &FeedbackReporter {
        match location {
            Location::SignIn => &self.inner.sign_in_feedback,
            Location::Home | Location::Register => &self.inner.register_feedback,
        }
    }

    /// Look up a clickable control by id.
    pub fn button(&self, id: ElementId) -> Option<&Button> {
        match id {
            ElementId::RegisterButton => Some(&self.inner.register.submit),
            ElementId::GoToSignInButton => Some(&self.inner.register.go_to_sign_in),
            ElementId::SignInButton => Some(&self.inner.sign_in.submit),
            _ => None,
        }
    }

    pub fn file_input(&self, id: ElementId) -> Option<&FileInput> {
        match id {
            ElementId::File => Some(&self.inner.register.file),
            ElementId::SignInFile => Some(&self.inner.sign_in.file),
            _ => None,
        }
    }

    // ── Binding ──────────────────────────────────────────────────────

    /// Install the standard page wiring, replacing anything bound before.
    pub fn bind_defaults(&self) {
        self.inner.bindings.set(Bindings::defaults());
    }

    pub fn bind(&self, element: ElementId, kind: EventKind, handler: Handler) {
        self.inner
            .bindings
            .modify(|b| {
                b.bind(element, kind, handler);
            });
    }

    pub fn bindings(&self) -> Bindings {
        self.inner.bindings.get()
    }

    // ── Handlers ─────────────────────────────────────────────────────

    /// Deliver an interaction to whatever handler is bound for it.
    pub async fn dispatch(&self, element: ElementId, kind: EventKind) -> Dispatch {
        let handler = self.inner.bindings.with(|b| b.handler_for(element, kind));
        let Some(handler) = handler else {
            trace!(%element, %kind, "no handler bound");
            return Dispatch::Unbound;
        };

        if kind.is_activation()
            && self
                .button(element)
                .is_some_and(|button| !button.accepts_input())
        {
            debug!(%element, %kind, "control inactive, interaction dropped");
            return Dispatch::Suppressed;
        }

        debug!(%element, %kind, %handler, "dispatch");
        let mut event = FormEvent::new(element, kind);
        self.run(handler, &mut event).await
    }

    /// Run a handler directly, bypassing the binding table.
    pub async fn run(&self, handler: Handler, event: &mut FormEvent) -> Dispatch {
        match handler {
            Handler::SubmitRegister => Dispatch::Submitted(self.submit_register().await),
            Handler::SubmitSignIn => Dispatch::Submitted(self.submit_sign_in().await),
            Handler::ValidateName => Dispatch::Validated(self.validate_name()),
            Handler::ValidateFile => Dispatch::Validated(self.validate_file()),
            Handler::ValidateSignInFile => Dispatch::Validated(self.validate_sign_in_file()),
            Handler::RedirectToSignIn => {
                self.inner.navigator.redirect_to_sign_in(event);
                Dispatch::Navigated(self.inner.navigator.current())
            }
        }
    }

    pub async fn submit_register(&self) -> SubmitOutcome {
        self.inner
            .controller
            .submit_register(&self.inner.register, &self.inner.register_feedback)
            .await
    }

    pub async fn submit_sign_in(&self) -> SubmitOutcome {
        self.inner
            .controller
            .submit_sign_in(&self.inner.sign_in, &self.inner.sign_in_feedback)
            .await
    }

    pub fn validate_name(&self) -> bool {
        TextValidator::new(self.inner.register.name.clone(), "Name")
            .check(&self.inner.register_feedback)
    }

    pub fn validate_file(&self) -> bool {
        FileValidator::new(self.inner.register.file.clone()).check(&self.inner.register_feedback)
    }

    pub fn validate_sign_in_file(&self) -> bool {
        FileValidator::new(self.inner.sign_in.file.clone()).check(&self.inner.sign_in_feedback)
    }
}

impl std::fmt::Debug for Frontend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frontend")
            .field("backend", &self.inner.controller.client().base_url().as_str())
            .field("location", &self.inner.navigator.current())
            .finish_non_exhaustive()
    }
}

fn build_transport(config: &FrontendConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
