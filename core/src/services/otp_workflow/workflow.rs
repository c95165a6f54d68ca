//! Async host for one OTP verification workflow instance

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use chrono::Utc;
use jb_shared::identity::mask_identity;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::value_objects::SubmissionState;
use crate::errors::{DomainResult, WorkflowError};

use super::clock::DrivingClock;
use super::config::OtpWorkflowConfig;
use super::state::WorkflowState;
use super::traits::{Navigator, ResendAction, SessionStateReader, VerifyAction};
use super::types::{ResendDispatch, SubmitOutcome, WorkflowSnapshot};

/// Collaborators injected by the host page
#[derive(Clone)]
pub struct WorkflowDeps {
    pub verify: Arc<dyn VerifyAction>,
    pub resend: Arc<dyn ResendAction>,
    pub navigator: Arc<dyn Navigator>,
    pub session: Arc<dyn SessionStateReader>,
}

#[derive(Default)]
struct Clocks {
    timer: Option<DrivingClock>,
    success: Option<DrivingClock>,
}

/// State shared between the instance and its tasks
///
/// Clock and request tasks hold only a `Weak` to this, and check `alive`
/// under the state lock before mutating anything.
struct Shared {
    id: Uuid,
    config: OtpWorkflowConfig,
    deps: WorkflowDeps,
    runtime: Handle,
    alive: AtomicBool,
    /// Generation of the current timer clock; bumped under the state lock
    timer_epoch: AtomicU64,
    state: Mutex<WorkflowState>,
    clocks: Mutex<Clocks>,
    snapshots: watch::Sender<WorkflowSnapshot>,
}

/// One mounted OTP verification workflow
///
/// Created with [`OtpWorkflow::mount`] inside a tokio runtime. Dropping it
/// (or calling [`OtpWorkflow::teardown`]) releases both driving clocks and
/// suppresses the effects of any request still in flight.
pub struct OtpWorkflow {
    shared: Arc<Shared>,
}

impl OtpWorkflow {
    /// Mount a workflow and start the resend timer
    ///
    /// # Arguments
    ///
    /// * `config` - Identity, redirect path, copy and timings
    /// * `deps` - Verify, resend, navigation and session collaborators
    ///
    /// # Returns
    ///
    /// * `Ok(OtpWorkflow)` - Mounted instance with the timer running
    /// * `Err(WorkflowError::Runtime)` - Called outside a tokio runtime
    /// * `Err(WorkflowError::Config)` - Zero tick interval
    pub fn mount(config: OtpWorkflowConfig, deps: WorkflowDeps) -> DomainResult<Self> {
        if config.tick_interval.is_zero() {
            return Err(WorkflowError::Config {
                message: "tick interval must be greater than zero".to_string(),
            });
        }
        let runtime = Handle::try_current().map_err(|e| WorkflowError::Runtime {
            message: e.to_string(),
        })?;

        let state = WorkflowState::new(&config);
        let initial = state.snapshot(&config, &deps.session.session_state());
        let (snapshots, _) = watch::channel(initial);

        let shared = Arc::new(Shared {
            id: Uuid::new_v4(),
            config,
            deps,
            runtime,
            alive: AtomicBool::new(true),
            timer_epoch: AtomicU64::new(0),
            state: Mutex::new(state),
            clocks: Mutex::new(Clocks::default()),
            snapshots,
        });
        shared.start_timer_clock();

        info!(
            workflow_id = %shared.id,
            identity = %mask_identity(&shared.config.identity),
            event = "otp_workflow_mounted",
            "Mounted OTP verification workflow"
        );

        Ok(Self { shared })
    }

    pub fn id(&self) -> Uuid {
        self.shared.id
    }

    pub fn config(&self) -> &OtpWorkflowConfig {
        &self.shared.config
    }

    pub fn is_alive(&self) -> bool {
        self.shared.is_alive()
    }

    /// Receiver that sees every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<WorkflowSnapshot> {
        self.shared.snapshots.subscribe()
    }

    /// Current view of the workflow
    pub fn snapshot(&self) -> WorkflowSnapshot {
        let state = self.shared.lock_state();
        self.shared.build_snapshot(&state)
    }

    /// Republish, e.g. after the session store changed
    pub fn refresh(&self) -> DomainResult<()> {
        let state = self.shared.lock_alive()?;
        self.shared.publish(&state);
        Ok(())
    }

    pub fn set_digit(&self, index: usize, input: &str) -> DomainResult<usize> {
        let mut state = self.shared.lock_alive()?;
        let focus = state.set_digit(index, input)?;
        self.shared.publish(&state);
        Ok(focus)
    }

    pub fn backspace(&self, index: usize) -> DomainResult<usize> {
        let mut state = self.shared.lock_alive()?;
        let focus = state.backspace(index)?;
        self.shared.publish(&state);
        Ok(focus)
    }

    pub fn focus(&self, index: usize) -> DomainResult<usize> {
        let mut state = self.shared.lock_alive()?;
        let focus = state.focus(index)?;
        self.shared.publish(&state);
        Ok(focus)
    }

    /// Fill the buffer from clipboard text; `false` means nothing changed
    pub fn paste(&self, text: &str) -> DomainResult<bool> {
        let mut state = self.shared.lock_alive()?;
        let filled = state.paste(text);
        if filled {
            self.shared.publish(&state);
        }
        Ok(filled)
    }

    /// Submit the assembled code
    ///
    /// Dispatches the verify call in the background and returns at once;
    /// watch the snapshots (or await [`OtpWorkflow::wait_until_settled`]) for
    /// the result. An incomplete buffer is rejected with
    /// `WorkflowError::Validation` and its message is published as the
    /// field error.
    pub fn submit(&self) -> DomainResult<SubmitOutcome> {
        let session = self.shared.deps.session.session_state();
        let mut state = self.shared.lock_alive()?;

        let (outcome, code) = match state.begin_submit(&session) {
            Ok(result) => result,
            Err(e) => {
                self.shared.publish(&state);
                return Err(e);
            }
        };

        let Some(code) = code else {
            debug!(
                workflow_id = %self.shared.id,
                outcome = ?outcome,
                "Submit ignored"
            );
            return Ok(outcome);
        };

        self.shared.publish(&state);
        drop(state);

        info!(
            workflow_id = %self.shared.id,
            identity = %mask_identity(&self.shared.config.identity),
            event = "otp_submit_dispatched",
            "Dispatching OTP verification"
        );

        let weak = Arc::downgrade(&self.shared);
        let verify = Arc::clone(&self.shared.deps.verify);
        let identity = self.shared.config.identity.clone();
        self.shared.runtime.spawn(async move {
            let result = verify.verify(&identity, &code).await;
            match weak.upgrade() {
                Some(shared) => shared.complete_verification(result),
                None => debug!("Verify resolved after workflow was dropped"),
            }
        });

        Ok(outcome)
    }

    /// Request a new code
    ///
    /// Allowed only once the resend timer has reached zero. The timer is
    /// reset immediately; the resend call itself is not awaited and its
    /// failure is only logged.
    pub fn resend(&self) -> DomainResult<ResendDispatch> {
        let remaining = {
            let mut state = self.shared.lock_alive()?;
            let remaining = state.begin_resend()?;
            // restart the clock so the first decrement comes a full period
            // later; ticks from the old clock are dropped from here on
            self.shared.start_timer_clock();
            self.shared.publish(&state);
            remaining
        };

        let masked = mask_identity(&self.shared.config.identity);
        info!(
            workflow_id = %self.shared.id,
            identity = %masked,
            event = "otp_resend_dispatched",
            "Dispatching OTP resend"
        );

        let resend = Arc::clone(&self.shared.deps.resend);
        let identity = self.shared.config.identity.clone();
        let workflow_id = self.shared.id;
        self.shared.runtime.spawn(async move {
            if let Err(e) = resend.resend(&identity).await {
                warn!(
                    workflow_id = %workflow_id,
                    identity = %masked,
                    error = %e,
                    event = "otp_resend_failed",
                    "OTP resend failed"
                );
            }
        });

        Ok(ResendDispatch {
            remaining,
            next_resend_at: Utc::now() + chrono::Duration::seconds(i64::from(remaining)),
        })
    }

    /// Wait until the in-flight verify call (if any) has resolved
    pub async fn wait_until_settled(&self) -> DomainResult<SubmissionState> {
        if !self.is_alive() {
            return Err(WorkflowError::TornDown);
        }
        let mut receiver = self.subscribe();
        let snapshot = receiver
            .wait_for(|s| !s.submission.is_submitting())
            .await
            .map_err(|_| WorkflowError::TornDown)?;
        Ok(snapshot.submission.clone())
    }

    /// Release both clocks and suppress every pending effect
    ///
    /// Idempotent. Later calls on this instance return `WorkflowError::TornDown`.
    pub fn teardown(&self) {
        self.shared.teardown();
    }
}

impl Drop for OtpWorkflow {
    fn drop(&mut self) {
        self.shared.teardown();
    }
}

impl Shared {
    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    fn lock_state(&self) -> MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_clocks(&self) -> MutexGuard<'_, Clocks> {
        self.clocks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the state, failing if the instance is gone
    fn lock_alive(&self) -> DomainResult<MutexGuard<'_, WorkflowState>> {
        let state = self.lock_state();
        if !self.is_alive() {
            return Err(WorkflowError::TornDown);
        }
        Ok(state)
    }

    fn build_snapshot(&self, state: &WorkflowState) -> WorkflowSnapshot {
        state.snapshot(&self.config, &self.deps.session.session_state())
    }

    /// Publish while holding the state lock so snapshots stay ordered
    fn publish(&self, state: &WorkflowState) {
        self.snapshots.send_replace(self.build_snapshot(state));
    }

    /// Replace the timer clock
    ///
    /// Callers that already hold the state lock keep it; the clocks lock is
    /// only ever taken after the state lock.
    fn start_timer_clock(self: &Arc<Self>) {
        let epoch = self.timer_epoch.fetch_add(1, Ordering::AcqRel) + 1;
        let weak = Arc::downgrade(self);
        let clock = DrivingClock::spawn(
            &self.runtime,
            "resend_timer",
            self.config.tick_interval,
            move || match weak.upgrade() {
                Some(shared) => shared.on_timer_tick(epoch),
                None => ControlFlow::Break(()),
            },
        );

        if !self.is_alive() {
            return;
        }
        // the replaced clock, if any, is aborted on drop
        self.lock_clocks().timer = Some(clock);
    }

    fn start_success_clock(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);
        let clock = DrivingClock::spawn(
            &self.runtime,
            "success_countdown",
            self.config.tick_interval,
            move || match weak.upgrade() {
                Some(shared) => shared.on_success_tick(),
                None => ControlFlow::Break(()),
            },
        );

        if !self.is_alive() {
            return;
        }
        self.lock_clocks().success = Some(clock);
    }

    fn on_timer_tick(&self, epoch: u64) -> ControlFlow<()> {
        let Ok(mut state) = self.lock_alive() else {
            return ControlFlow::Break(());
        };
        if self.timer_epoch.load(Ordering::Acquire) != epoch {
            // this clock was replaced while the tick waited for the lock
            return ControlFlow::Break(());
        }
        state.tick_timer();
        self.publish(&state);
        ControlFlow::Continue(())
    }

    fn on_success_tick(&self) -> ControlFlow<()> {
        let redirect = {
            let Ok(mut state) = self.lock_alive() else {
                return ControlFlow::Break(());
            };
            if state.redirect_fired() {
                return ControlFlow::Break(());
            }
            let redirect = state.tick_success();
            self.publish(&state);
            redirect
        };

        let Some(redirect) = redirect else {
            return ControlFlow::Continue(());
        };

        info!(
            workflow_id = %self.id,
            path = %redirect.path,
            event = "otp_redirect",
            "Redirecting after successful verification"
        );
        // navigation may tear the instance down; no lock is held here
        self.deps.navigator.navigate(&redirect.path);
        ControlFlow::Break(())
    }

    fn complete_verification(self: &Arc<Self>, result: Result<(), String>) {
        let started = {
            let Ok(mut state) = self.lock_alive() else {
                debug!(
                    workflow_id = %self.id,
                    "Verify resolved after teardown; result discarded"
                );
                return;
            };

            match &result {
                Ok(()) => info!(
                    workflow_id = %self.id,
                    identity = %mask_identity(&self.config.identity),
                    event = "otp_verified_success",
                    "OTP verified"
                ),
                Err(e) => warn!(
                    workflow_id = %self.id,
                    identity = %mask_identity(&self.config.identity),
                    error = %e,
                    event = "otp_verification_failed",
                    "OTP verification failed"
                ),
            }

            let started = state.finish_submit(&result);
            self.publish(&state);
            started
        };

        if started {
            self.start_success_clock();
        }
    }

    fn teardown(&self) {
        {
            let _state = self.lock_state();
            if !self.alive.swap(false, Ordering::AcqRel) {
                return;
            }
        }

        let mut clocks = self.lock_clocks();
        if let Some(mut clock) = clocks.timer.take() {
            clock.stop();
        }
        if let Some(mut clock) = clocks.success.take() {
            clock.stop();
        }

        info!(
            workflow_id = %self.id,
            event = "otp_workflow_teardown",
            "Tore down OTP verification workflow"
        );
    }
}
