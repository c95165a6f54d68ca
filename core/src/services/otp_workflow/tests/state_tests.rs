//! Unit tests for the synchronous workflow state machine

use crate::domain::entities::{CodeBuffer, VerificationTimer, INCOMPLETE_MESSAGE};
use crate::domain::value_objects::{
    Redirect, SessionSnapshot, SubmissionState, VERIFICATION_FAILED_MESSAGE,
};
use crate::errors::WorkflowError;
use crate::services::otp_workflow::{
    OtpWorkflowConfig, SubmissionController, SubmitOutcome, WorkflowState,
};

use super::mocks::IDENTITY;

fn idle_session() -> SessionSnapshot {
    SessionSnapshot::default()
}

fn complete_buffer(code: &str) -> CodeBuffer {
    let mut buffer = CodeBuffer::new();
    assert!(buffer.paste_bulk(code));
    buffer
}

#[test]
fn test_begin_requires_complete_buffer() {
    let mut controller = SubmissionController::new();
    let mut buffer = CodeBuffer::new();
    buffer.set_digit(0, "4").unwrap();

    let result = controller.begin(&buffer, &idle_session());
    assert!(matches!(result, Err(WorkflowError::Validation(_))));
    assert_eq!(controller.state(), &SubmissionState::Idle);
}

#[test]
fn test_begin_is_noop_while_submitting() {
    let mut controller = SubmissionController::new();
    let buffer = complete_buffer("482913");

    assert_eq!(
        controller.begin(&buffer, &idle_session()).unwrap(),
        SubmitOutcome::Dispatched
    );
    assert_eq!(controller.state(), &SubmissionState::Submitting);

    assert_eq!(
        controller.begin(&buffer, &idle_session()).unwrap(),
        SubmitOutcome::AlreadySubmitting
    );
    // even an invalid buffer is not looked at while in flight
    assert_eq!(
        controller.begin(&CodeBuffer::new(), &idle_session()).unwrap(),
        SubmitOutcome::AlreadySubmitting
    );
}

#[test]
fn test_begin_is_noop_while_session_loading() {
    let mut controller = SubmissionController::new();
    let session = SessionSnapshot {
        is_loading: true,
        error: None,
    };

    let outcome = controller.begin(&complete_buffer("123456"), &session).unwrap();
    assert_eq!(outcome, SubmitOutcome::Busy);
    assert_eq!(controller.state(), &SubmissionState::Idle);
}

#[test]
fn test_every_rejection_collapses_to_generic_message() {
    for cause in ["Invalid OTP code", "Network Error", ""] {
        let mut controller = SubmissionController::new();
        controller
            .begin(&complete_buffer("000000"), &idle_session())
            .unwrap();

        assert!(!controller.resolve(&Err(cause.to_string())));
        assert_eq!(
            controller.state().error_message(),
            Some(VERIFICATION_FAILED_MESSAGE)
        );
    }
}

#[test]
fn test_failed_allows_retry() {
    let mut controller = SubmissionController::new();
    let buffer = complete_buffer("000000");

    controller.begin(&buffer, &idle_session()).unwrap();
    controller.resolve(&Err("nope".to_string()));

    assert_eq!(
        controller.begin(&buffer, &idle_session()).unwrap(),
        SubmitOutcome::Dispatched
    );
    assert!(controller.resolve(&Ok(())));
    assert_eq!(controller.state(), &SubmissionState::Succeeded);
}

#[test]
fn test_succeeded_is_terminal() {
    let mut controller = SubmissionController::new();
    let buffer = complete_buffer("482913");

    controller.begin(&buffer, &idle_session()).unwrap();
    controller.resolve(&Ok(()));

    assert_eq!(
        controller.begin(&buffer, &idle_session()).unwrap(),
        SubmitOutcome::AlreadyVerified
    );
    // a stray late result changes nothing
    assert!(!controller.resolve(&Err("late".to_string())));
    assert_eq!(controller.state(), &SubmissionState::Succeeded);
}

#[test]
fn test_resend_gate() {
    let controller = SubmissionController::new();
    let mut timer = VerificationTimer::new(30);

    assert_eq!(
        controller.resend(&mut timer),
        Err(WorkflowError::ResendNotReady { remaining: 30 })
    );

    for _ in 0..30 {
        timer.tick();
    }
    assert_eq!(controller.resend(&mut timer), Ok(30));
    assert_eq!(timer.remaining(), 30);
    assert!(!timer.can_resend());
}

#[test]
fn test_state_validation_sets_field_error() {
    let config = OtpWorkflowConfig::new(IDENTITY);
    let mut state = WorkflowState::new(&config);
    state.set_digit(0, "1").unwrap();

    assert!(state.begin_submit(&idle_session()).is_err());
    assert_eq!(state.field_error(), Some(INCOMPLETE_MESSAGE));

    // editing clears the message
    state.set_digit(1, "2").unwrap();
    assert_eq!(state.field_error(), None);
}

#[test]
fn test_state_success_starts_countdown_and_redirects_once() {
    let config = OtpWorkflowConfig::new(IDENTITY);
    let mut state = WorkflowState::new(&config);
    assert!(state.paste("482913"));

    let (outcome, code) = state.begin_submit(&idle_session()).unwrap();
    assert_eq!(outcome, SubmitOutcome::Dispatched);
    assert_eq!(code.as_deref(), Some("482913"));

    assert!(state.finish_submit(&Ok(())));
    assert_eq!(state.success_countdown().map(|c| c.remaining()), Some(5));

    let redirects: Vec<Redirect> = (0..10).filter_map(|_| state.tick_success()).collect();
    assert_eq!(redirects, vec![Redirect::new("/")]);
    assert!(state.redirect_fired());
}

#[test]
fn test_state_failure_keeps_digits() {
    let config = OtpWorkflowConfig::new(IDENTITY);
    let mut state = WorkflowState::new(&config);
    state.paste("000000");

    state.begin_submit(&idle_session()).unwrap();
    assert!(!state.finish_submit(&Err("Invalid OTP code".to_string())));

    assert_eq!(state.buffer().assembled(), "000000");
    assert!(state.success_countdown().is_none());
    assert_eq!(state.tick_success(), None);

    let snapshot = state.snapshot(&config, &idle_session());
    assert_eq!(snapshot.inline_error(), Some(VERIFICATION_FAILED_MESSAGE));
    assert!(!snapshot.submit_disabled);
}

#[test]
fn test_snapshot_reflects_session_flags() {
    let config = OtpWorkflowConfig::new(IDENTITY)
        .with_title("Confirm your email")
        .with_description("Check your inbox");
    let state = WorkflowState::new(&config);
    let session = SessionSnapshot {
        is_loading: true,
        error: Some("Invalid OTP code".to_string()),
    };

    let snapshot = state.snapshot(&config, &session);
    assert_eq!(snapshot.title, "Confirm your email");
    assert_eq!(snapshot.description, "Check your inbox");
    assert!(snapshot.submit_disabled);
    assert_eq!(snapshot.session_error.as_deref(), Some("Invalid OTP code"));
    assert_eq!(snapshot.timer_display, "0:30");
    assert_eq!(snapshot.success_countdown, None);
}
