#![allow(clippy::unwrap_used)]
// End-to-end submission scenarios against a wiremock backend.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use facegate_core::{
    Dispatch, ElementId, EventKind, FeedbackConfig, FeedbackMessage, Frontend, FrontendConfig,
    ImageUpload, PresentationMode, Severity, SubmitOutcome, SubmitState, Flow, WORKING_LABEL,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Frontend) {
    let server = MockServer::start().await;
    let fe = Frontend::new(FrontendConfig::with_url(server.uri().parse().unwrap())).unwrap();
    fe.bind_defaults();
    (server, fe)
}

fn face(name: &str) -> ImageUpload {
    ImageUpload::from_bytes(name, b"\x89PNG fake".to_vec())
}

fn fill_register(fe: &Frontend, name: &str) {
    let form = fe.register_form();
    form.name.set_value(name);
    form.file.select(face("alice.png"));
}

/// A local address nothing listens on. The listener is dropped before use.
fn closed_port_url() -> url::Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}").parse().unwrap()
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

// ── Missing input ───────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_name_sends_nothing() {
    let (server, fe) = setup().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    fe.register_form().file.select(face("alice.png"));
    let result = fe.dispatch(ElementId::RegisterButton, EventKind::Click).await;

    assert_eq!(result, Dispatch::Submitted(SubmitOutcome::Invalid));
    assert_eq!(
        fe.message_box().message(),
        FeedbackMessage::error("Please enter your name and select an image.")
    );
    assert_eq!(fe.controller().state(Flow::Register), SubmitState::Idle);
}

#[tokio::test]
async fn test_sign_in_without_file_sends_nothing() {
    let (server, fe) = setup().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = fe.submit_sign_in().await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(
        fe.message_box().message(),
        FeedbackMessage::error("Please upload an image for sign-in.")
    );
    assert!(fe.sign_in_form().submit.is_enabled());
}

// ── Success ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_register_success_swaps_controls() {
    let (server, fe) = setup().await;
    mount(
        &server,
        "/register-user/",
        ResponseTemplate::new(200).set_body_json(json!({ "message": "Welcome Alice" })),
    )
    .await;

    fill_register(&fe, "Alice");
    let outcome = fe.submit_register().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Succeeded {
            message: "Welcome Alice".into()
        }
    );
    assert_eq!(fe.message_box().message(), FeedbackMessage::success("Welcome Alice"));

    let form = fe.register_form();
    assert!(!form.submit.is_visible());
    assert!(form.go_to_sign_in.is_visible());
    assert_eq!(form.submit.label(), "Register");
    assert!(form.submit.is_enabled());
    assert_eq!(fe.controller().state(Flow::Register), SubmitState::Succeeded);
}

#[tokio::test]
async fn test_sign_in_success() {
    let (server, fe) = setup().await;
    mount(
        &server,
        "/sign-in-user/",
        ResponseTemplate::new(200).set_body_json(json!({ "message": "Welcome back, Alice" })),
    )
    .await;

    fe.sign_in_form().file.select(face("me.jpg"));
    let result = fe.dispatch(ElementId::SignInButton, EventKind::Click).await;

    assert_eq!(
        result,
        Dispatch::Submitted(SubmitOutcome::Succeeded {
            message: "Welcome back, Alice".into()
        })
    );
    assert_eq!(fe.message_box().message().severity, Severity::Success);
}

// ── Rejection ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_rejection_detail_shown_verbatim() {
    let (server, fe) = setup().await;
    mount(
        &server,
        "/register-user/",
        ResponseTemplate::new(400).set_body_json(json!({ "detail": "Name already taken" })),
    )
    .await;

    fill_register(&fe, "Alice");
    let outcome = fe.submit_register().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            status: 400,
            message: "Name already taken".into()
        }
    );
    assert_eq!(
        fe.message_box().message(),
        FeedbackMessage::error("Name already taken")
    );
    let form = fe.register_form();
    assert!(form.submit.is_visible());
    assert!(!form.go_to_sign_in.is_visible());
    assert_eq!(fe.controller().state(Flow::Register), SubmitState::Failed);
}

#[tokio::test]
async fn test_rejection_without_detail_uses_fallback() {
    let (server, fe) = setup().await;
    mount(&server, "/register-user/", ResponseTemplate::new(500).set_body_json(json!({}))).await;
    fill_register(&fe, "Alice");
    assert_eq!(
        fe.submit_register().await.message(),
        Some("Registration failed.")
    );

    mount(&server, "/sign-in-user/", ResponseTemplate::new(401).set_body_json(json!({}))).await;
    fe.sign_in_form().file.select(face("me.jpg"));
    assert_eq!(fe.submit_sign_in().await.message(), Some("Sign-in failed."));
    assert_eq!(
        fe.message_box().message(),
        FeedbackMessage::error("Sign-in failed.")
    );
}

// ── Transport and parse failures ────────────────────────────────────

#[tokio::test]
async fn test_transport_failure_shows_generic_error_and_reenables() {
    let fe = Frontend::new(FrontendConfig::with_url(closed_port_url())).unwrap();
    fe.bind_defaults();
    fill_register(&fe, "Alice");

    let outcome = fe.submit_register().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            message: "An error occurred during registration.".into()
        }
    );
    let state = fe.register_form().submit.snapshot();
    assert!(state.enabled);
    assert!(!state.busy);
    assert_eq!(state.label, "Register");
    assert!(state.visible);
}

#[tokio::test]
async fn test_unreadable_reply_is_a_failure() {
    let (server, fe) = setup().await;
    mount(
        &server,
        "/sign-in-user/",
        ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"),
    )
    .await;

    fe.sign_in_form().file.select(face("me.jpg"));
    assert_eq!(
        fe.submit_sign_in().await.message(),
        Some("An error occurred during sign-in.")
    );
}

// ── Busy state ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_control_busy_while_in_flight() {
    let (server, fe) = setup().await;
    mount(
        &server,
        "/register-user/",
        ResponseTemplate::new(200)
            .set_body_json(json!({ "message": "Welcome Alice" }))
            .set_delay(Duration::from_millis(200)),
    )
    .await;
    fill_register(&fe, "Alice");

    let mut button = fe.register_form().submit.subscribe();
    let state = fe.controller().subscribe(Flow::Register);
    let task = tokio::spawn({
        let fe = fe.clone();
        async move { fe.submit_register().await }
    });

    let busy = button.wait_for(|s| s.busy).await.unwrap().clone();
    assert_eq!(busy.label, WORKING_LABEL);
    assert!(!busy.enabled);
    assert_eq!(*state.borrow(), SubmitState::Submitting);

    // A second click while busy is swallowed.
    assert_eq!(
        fe.dispatch(ElementId::RegisterButton, EventKind::Click).await,
        Dispatch::Suppressed
    );
    // Feedback in between does not disturb the restore.
    fe.validate_name();

    assert!(task.await.unwrap().is_success());
    assert_eq!(*state.borrow(), SubmitState::Succeeded);
    let state = fe.register_form().submit.snapshot();
    assert_eq!(state.label, "Register");
    assert!(state.enabled);
}

// ── Concurrent flows ────────────────────────────────────────────────

#[tokio::test]
async fn test_register_and_sign_in_run_side_by_side() {
    let (server, fe) = setup().await;
    mount(
        &server,
        "/register-user/",
        ResponseTemplate::new(200)
            .set_body_json(json!({ "message": "Welcome Alice" }))
            .set_delay(Duration::from_millis(300)),
    )
    .await;
    mount(
        &server,
        "/sign-in-user/",
        ResponseTemplate::new(401)
            .set_body_json(json!({ "detail": "Face not recognised" }))
            .set_delay(Duration::from_millis(150)),
    )
    .await;
    fill_register(&fe, "Alice");
    fe.sign_in_form().file.select(face("me.jpg"));

    let mut register_btn = fe.register_form().submit.subscribe();
    let mut sign_in_btn = fe.sign_in_form().submit.subscribe();
    let register_state = fe.controller().subscribe(Flow::Register);
    let sign_in_state = fe.controller().subscribe(Flow::SignIn);

    let register = tokio::spawn({
        let fe = fe.clone();
        async move { fe.submit_register().await }
    });
    let sign_in = tokio::spawn({
        let fe = fe.clone();
        async move { fe.submit_sign_in().await }
    });

    register_btn.wait_for(|s| s.busy).await.unwrap();
    sign_in_btn.wait_for(|s| s.busy).await.unwrap();
    assert!(fe.register_form().submit.snapshot().busy);
    assert!(fe.sign_in_form().submit.snapshot().busy);
    assert_eq!(*register_state.borrow(), SubmitState::Submitting);
    assert_eq!(*sign_in_state.borrow(), SubmitState::Submitting);

    // The faster sign-in settles while registration is still in flight.
    assert!(!sign_in.await.unwrap().is_success());
    assert_eq!(*sign_in_state.borrow(), SubmitState::Failed);
    assert_eq!(*register_state.borrow(), SubmitState::Submitting);
    assert!(fe.register_form().submit.snapshot().busy);
    assert_eq!(fe.sign_in_form().submit.label(), "Sign In");

    assert!(register.await.unwrap().is_success());
    assert_eq!(*register_state.borrow(), SubmitState::Succeeded);
    assert_eq!(*sign_in_state.borrow(), SubmitState::Failed);

    let register_form = fe.register_form();
    assert_eq!(register_form.submit.label(), "Register");
    assert!(register_form.submit.is_enabled());
    assert!(!register_form.submit.is_visible());
    assert!(register_form.go_to_sign_in.is_visible());

    let sign_in_btn = fe.sign_in_form().submit.snapshot();
    assert_eq!(sign_in_btn.label, "Sign In");
    assert!(sign_in_btn.enabled);
    assert!(sign_in_btn.visible);
}

// ── Overlay presentation ────────────────────────────────────────────

#[tokio::test]
async fn test_overlay_page_reports_as_toast() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/sign-in-user/",
        ResponseTemplate::new(401).set_body_json(json!({ "detail": "Face not recognised" })),
    )
    .await;

    let mut config = FrontendConfig::with_url(server.uri().parse().unwrap());
    config.feedback = FeedbackConfig {
        sign_in: PresentationMode::Overlay,
        ..FeedbackConfig::default()
    };
    let fe = Frontend::new(config).unwrap();
    fe.sign_in_form().file.select(face("me.jpg"));

    fe.submit_sign_in().await;

    let toasts = fe.toasts().toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].message, FeedbackMessage::error("Face not recognised"));
    assert!(fe.message_box().is_empty());
}
