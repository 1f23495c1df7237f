// facegate-core: Registration and sign-in controller between facegate-api and front ends.

pub mod binding;
pub mod busy;
pub mod config;
pub mod element;
pub mod error;
pub mod feedback;
pub mod frontend;
pub mod nav;
pub mod submit;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use binding::{Bindings, EventKind, FormEvent, Handler};
pub use busy::{BusyGuard, WORKING_LABEL, set_busy};
pub use config::{FeedbackConfig, FrontendConfig, PresentationMode, TlsVerification, ToastTimings};
pub use element::{Button, ButtonState, ElementId, FileInput, TextInput};
pub use error::CoreError;
pub use feedback::{
    FeedbackMessage, FeedbackReporter, Severity, StatusRegion, Toast, ToastLayer, ToastPhase,
};
pub use frontend::{Dispatch, Frontend};
pub use nav::{Location, NavLink, Navigator, nav_links};
pub use submit::{Flow, RegisterForm, SignInForm, SubmissionController, SubmitOutcome, SubmitState};
pub use validate::{FileValidator, TextValidator};

// Transport types front ends need when building a frontend by hand.
pub use facegate_api::{IdentityClient, ImageUpload};
