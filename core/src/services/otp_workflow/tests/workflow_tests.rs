//! Tests for the async workflow host, driven on paused tokio time

use std::time::Duration;

use tokio::time::sleep;

use crate::domain::entities::INCOMPLETE_MESSAGE;
use crate::domain::value_objects::{SubmissionState, VERIFICATION_FAILED_MESSAGE};
use crate::errors::WorkflowError;
use crate::services::otp_workflow::{
    OtpWorkflow, OtpWorkflowConfig, SubmitOutcome, DEFAULT_DESCRIPTION, DEFAULT_TITLE,
};

use super::mocks::{Harness, MockResendAction, MockVerifyAction, IDENTITY};

const CORRECT_CODE: &str = "482913";

fn fill(workflow: &OtpWorkflow, code: &str) {
    for (index, digit) in code.chars().enumerate() {
        workflow.set_digit(index, &digit.to_string()).unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn test_mount_publishes_initial_snapshot() {
    let harness = Harness::new(MockVerifyAction::new(CORRECT_CODE));
    let workflow = harness.mount();

    let snapshot = workflow.subscribe().borrow().clone();
    assert_eq!(snapshot.title, DEFAULT_TITLE);
    assert_eq!(snapshot.description, DEFAULT_DESCRIPTION);
    assert_eq!(snapshot.slots, [None; 6]);
    assert_eq!(snapshot.focus, 0);
    assert_eq!(snapshot.resend_remaining, 30);
    assert_eq!(snapshot.timer_display, "0:30");
    assert!(!snapshot.can_resend);
    assert_eq!(snapshot.submission, SubmissionState::Idle);
    assert_eq!(snapshot.success_countdown, None);
    assert!(workflow.is_alive());
}

#[tokio::test(start_paused = true)]
async fn test_timer_counts_down_and_stops_at_zero() {
    let harness = Harness::new(MockVerifyAction::new(CORRECT_CODE));
    let workflow = harness.mount();

    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(workflow.snapshot().resend_remaining, 29);
    assert_eq!(workflow.snapshot().timer_display, "0:29");

    sleep(Duration::from_millis(29_000)).await;
    let snapshot = workflow.snapshot();
    assert_eq!(snapshot.resend_remaining, 0);
    assert!(snapshot.can_resend);

    // clamped at zero
    sleep(Duration::from_secs(10)).await;
    assert_eq!(workflow.snapshot().resend_remaining, 0);
    assert_eq!(workflow.snapshot().timer_display, "0:00");
}

#[tokio::test(start_paused = true)]
async fn test_resend_rejected_while_timer_running() {
    let harness = Harness::new(MockVerifyAction::new(CORRECT_CODE));
    let workflow = harness.mount();

    sleep(Duration::from_millis(10_500)).await;
    assert_eq!(
        workflow.resend().unwrap_err(),
        WorkflowError::ResendNotReady { remaining: 20 }
    );

    sleep(Duration::from_millis(100)).await;
    assert_eq!(harness.resend.call_count(), 0);
    assert_eq!(workflow.snapshot().resend_remaining, 20);
}

#[tokio::test(start_paused = true)]
async fn test_failed_resend_still_resets_timer() {
    let harness = Harness::with_resend(
        MockVerifyAction::new(CORRECT_CODE),
        MockResendAction::new(true),
    );
    let workflow = harness.mount();
    let receiver = workflow.subscribe();

    sleep(Duration::from_millis(30_500)).await;
    assert_eq!(receiver.borrow().resend_remaining, 0);

    let dispatch = workflow.resend().unwrap();
    assert_eq!(dispatch.remaining, 30);
    assert_eq!(receiver.borrow().resend_remaining, 30);
    assert!(!receiver.borrow().can_resend);

    sleep(Duration::from_millis(1_100)).await;
    assert_eq!(harness.resend.call_count(), 1);
    assert_eq!(receiver.borrow().resend_remaining, 29);
    // the failure is not surfaced
    assert_eq!(receiver.borrow().submission, SubmissionState::Idle);
    assert_eq!(receiver.borrow().inline_error(), None);
}

#[tokio::test(start_paused = true)]
async fn test_resend_sends_identity() {
    let harness = Harness::new(MockVerifyAction::new(CORRECT_CODE));
    let workflow = harness.mount();

    sleep(Duration::from_millis(30_500)).await;
    workflow.resend().unwrap();
    sleep(Duration::from_millis(10)).await;

    assert_eq!(harness.resend.calls.lock().unwrap().clone(), vec![IDENTITY]);
    // gate closed again after the reset
    assert!(matches!(
        workflow.resend(),
        Err(WorkflowError::ResendNotReady { remaining: 30 })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_incomplete_submit_is_blocked() {
    let harness = Harness::new(MockVerifyAction::new(CORRECT_CODE));
    let workflow = harness.mount();
    fill(&workflow, "4829");

    let error = workflow.submit().unwrap_err();
    assert!(matches!(error, WorkflowError::Validation(_)));

    let snapshot = workflow.snapshot();
    assert_eq!(snapshot.field_error.as_deref(), Some(INCOMPLETE_MESSAGE));
    assert_eq!(snapshot.inline_error(), Some(INCOMPLETE_MESSAGE));
    assert_eq!(snapshot.submission, SubmissionState::Idle);

    sleep(Duration::from_millis(10)).await;
    assert_eq!(harness.verify.call_count(), 0);

    // editing a slot clears the message
    workflow.set_digit(4, "1").unwrap();
    assert_eq!(workflow.snapshot().field_error, None);
}

#[tokio::test(start_paused = true)]
async fn test_correct_code_redirects_after_countdown() {
    let harness = Harness::new(MockVerifyAction::new(CORRECT_CODE));
    let workflow = harness.mount();
    fill(&workflow, CORRECT_CODE);

    assert_eq!(workflow.submit().unwrap(), SubmitOutcome::Dispatched);
    assert!(workflow.snapshot().submit_disabled);

    let settled = workflow.wait_until_settled().await.unwrap();
    assert_eq!(settled, SubmissionState::Succeeded);
    assert_eq!(workflow.snapshot().success_countdown, Some(5));
    assert_eq!(
        harness.verify.calls.lock().unwrap().clone(),
        vec![(IDENTITY.to_string(), CORRECT_CODE.to_string())]
    );

    sleep(Duration::from_millis(4_500)).await;
    assert_eq!(workflow.snapshot().success_countdown, Some(1));
    assert!(harness.navigator.paths().is_empty());

    sleep(Duration::from_secs(1)).await;
    assert_eq!(workflow.snapshot().success_countdown, Some(0));
    assert_eq!(harness.navigator.paths(), vec!["/"]);

    // the countdown does not fire again
    sleep(Duration::from_secs(10)).await;
    assert_eq!(harness.navigator.paths(), vec!["/"]);
}

#[tokio::test(start_paused = true)]
async fn test_wrong_code_fails_and_keeps_digits() {
    let harness = Harness::new(MockVerifyAction::new(CORRECT_CODE));
    let workflow = harness.mount();
    fill(&workflow, "000000");

    workflow.submit().unwrap();
    let settled = workflow.wait_until_settled().await.unwrap();
    assert_eq!(settled.error_message(), Some(VERIFICATION_FAILED_MESSAGE));

    let snapshot = workflow.snapshot();
    assert_eq!(snapshot.slots, [Some('0'); 6]);
    assert_eq!(snapshot.inline_error(), Some(VERIFICATION_FAILED_MESSAGE));
    assert_eq!(snapshot.success_countdown, None);
    assert!(!snapshot.submit_disabled);

    sleep(Duration::from_secs(10)).await;
    assert!(harness.navigator.paths().is_empty());

    // fix the code and retry
    assert!(workflow.paste(CORRECT_CODE).unwrap());
    assert_eq!(workflow.submit().unwrap(), SubmitOutcome::Dispatched);
    assert_eq!(
        workflow.wait_until_settled().await.unwrap(),
        SubmissionState::Succeeded
    );
    assert_eq!(harness.verify.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_double_submit_sends_one_request() {
    let (verify, gate) = MockVerifyAction::gated(CORRECT_CODE);
    let harness = Harness::new(verify);
    let workflow = harness.mount();
    workflow.paste(CORRECT_CODE).unwrap();

    assert_eq!(workflow.submit().unwrap(), SubmitOutcome::Dispatched);
    assert_eq!(workflow.submit().unwrap(), SubmitOutcome::AlreadySubmitting);

    sleep(Duration::from_millis(100)).await;
    assert_eq!(workflow.submit().unwrap(), SubmitOutcome::AlreadySubmitting);
    assert_eq!(harness.verify.call_count(), 1);
    assert!(workflow.snapshot().submission.is_submitting());

    gate.notify_one();
    assert_eq!(
        workflow.wait_until_settled().await.unwrap(),
        SubmissionState::Succeeded
    );
    assert_eq!(workflow.submit().unwrap(), SubmitOutcome::AlreadyVerified);
    assert_eq!(harness.verify.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_busy_session_blocks_submit() {
    let harness = Harness::new(MockVerifyAction::new(CORRECT_CODE));
    let workflow = harness.mount();
    workflow.paste(CORRECT_CODE).unwrap();

    harness.session.set_loading(true);
    workflow.refresh().unwrap();
    assert!(workflow.snapshot().submit_disabled);
    assert_eq!(workflow.submit().unwrap(), SubmitOutcome::Busy);

    harness.session.set_loading(false);
    assert_eq!(workflow.submit().unwrap(), SubmitOutcome::Dispatched);
    workflow.wait_until_settled().await.unwrap();
    assert_eq!(harness.verify.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_session_error_is_published_on_refresh() {
    let harness = Harness::new(MockVerifyAction::new(CORRECT_CODE));
    let workflow = harness.mount();
    let mut receiver = workflow.subscribe();
    let _ = receiver.borrow_and_update();

    harness.session.set_error(Some("Invalid OTP code"));
    workflow.refresh().unwrap();

    assert!(receiver.has_changed().unwrap());
    assert_eq!(
        receiver.borrow_and_update().session_error.as_deref(),
        Some("Invalid OTP code")
    );
}

#[tokio::test(start_paused = true)]
async fn test_keyboard_editing_through_workflow() {
    let harness = Harness::new(MockVerifyAction::new(CORRECT_CODE));
    let workflow = harness.mount();

    assert_eq!(workflow.set_digit(0, "4").unwrap(), 1);
    assert_eq!(workflow.set_digit(1, "8").unwrap(), 2);
    assert!(matches!(
        workflow.set_digit(2, "x"),
        Err(WorkflowError::Input(_))
    ));
    assert_eq!(workflow.snapshot().focus, 2);

    // empty slot: focus moves back, digit kept
    assert_eq!(workflow.backspace(2).unwrap(), 1);
    assert_eq!(workflow.snapshot().slots[1], Some('8'));

    // filled slot: digit cleared
    assert_eq!(workflow.backspace(1).unwrap(), 1);
    assert_eq!(workflow.snapshot().slots[1], None);

    assert_eq!(workflow.focus(5).unwrap(), 5);
    assert!(!workflow.paste("12 34").unwrap());
    assert!(workflow.paste(" 12 34 56 ").unwrap());
    assert_eq!(workflow.snapshot().focus, 5);
}

#[tokio::test(start_paused = true)]
async fn test_drop_during_verify_discards_result() {
    let (verify, gate) = MockVerifyAction::gated(CORRECT_CODE);
    let harness = Harness::new(verify);
    let workflow = harness.mount();
    let receiver = workflow.subscribe();

    workflow.paste(CORRECT_CODE).unwrap();
    workflow.submit().unwrap();
    sleep(Duration::from_millis(100)).await;
    drop(workflow);

    gate.notify_one();
    sleep(Duration::from_secs(10)).await;

    assert_eq!(harness.verify.completed(), 1);
    assert!(receiver.has_changed().is_err());
    assert!(receiver.borrow().submission.is_submitting());
    assert!(harness.navigator.paths().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_teardown_during_countdown_cancels_redirect() {
    let harness = Harness::new(MockVerifyAction::new(CORRECT_CODE));
    let workflow = harness.mount();
    workflow.paste(CORRECT_CODE).unwrap();
    workflow.submit().unwrap();
    workflow.wait_until_settled().await.unwrap();

    sleep(Duration::from_millis(2_500)).await;
    assert_eq!(workflow.snapshot().success_countdown, Some(3));

    workflow.teardown();
    workflow.teardown();
    assert!(!workflow.is_alive());

    sleep(Duration::from_secs(10)).await;
    assert!(harness.navigator.paths().is_empty());
    assert_eq!(workflow.snapshot().success_countdown, Some(3));
    assert_eq!(workflow.set_digit(0, "1"), Err(WorkflowError::TornDown));
    assert_eq!(workflow.submit(), Err(WorkflowError::TornDown));
    assert_eq!(
        workflow.wait_until_settled().await,
        Err(WorkflowError::TornDown)
    );
}

#[tokio::test(start_paused = true)]
async fn test_custom_redirect_path() {
    let harness = Harness::new(MockVerifyAction::new(CORRECT_CODE));
    let config = OtpWorkflowConfig::new(IDENTITY)
        .with_redirect_path("/dashboard")
        .with_title("Confirm your account");
    let workflow = harness.mount_with(config);
    assert_eq!(workflow.snapshot().title, "Confirm your account");

    workflow.paste(CORRECT_CODE).unwrap();
    workflow.submit().unwrap();
    workflow.wait_until_settled().await.unwrap();
    sleep(Duration::from_millis(5_500)).await;

    assert_eq!(harness.navigator.paths(), vec!["/dashboard"]);
}

#[test]
fn test_mount_requires_runtime() {
    let harness = Harness::new(MockVerifyAction::new(CORRECT_CODE));
    let result = OtpWorkflow::mount(OtpWorkflowConfig::new(IDENTITY), harness.deps());
    assert!(matches!(result, Err(WorkflowError::Runtime { .. })));
}

#[tokio::test]
async fn test_mount_rejects_zero_tick_interval() {
    let harness = Harness::new(MockVerifyAction::new(CORRECT_CODE));
    let config = OtpWorkflowConfig::new(IDENTITY).with_tick_interval(Duration::ZERO);
    let result = OtpWorkflow::mount(config, harness.deps());
    assert!(matches!(result, Err(WorkflowError::Config { .. })));
}
