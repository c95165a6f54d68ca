//! Interactive OTP verification demo
//!
//! Drives one verification workflow from the terminal against the configured
//! user API (the mock by default). Type a six-digit code to submit it, or
//! `resend` to request a new one once the timer allows.

use std::sync::Arc;

use anyhow::Context;
use jb_core::services::otp_workflow::{
    Navigator, OtpWorkflow, OtpWorkflowConfig, SubmitOutcome, WorkflowDeps,
};
use jb_core::services::session::{SessionBoundResend, SessionBoundVerify, UserSessionStore};
use jb_core::domain::value_objects::SubmissionState;
use jb_core::errors::WorkflowError;
use jb_infra::{create_user_api, init_tracing, load_config};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

const DEFAULT_EMAIL: &str = "demo@example.com";

/// Navigator that reports the redirect back to `main`
struct ChannelNavigator {
    redirects: mpsc::UnboundedSender<String>,
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, path: &str) {
        info!(path = %path, "Navigating");
        // the receiver is gone only once main has returned
        let _ = self.redirects.send(path.to_string());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    init_tracing(&config.logging).context("failed to initialize tracing")?;

    let email = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_EMAIL.to_string());

    let api = create_user_api(&config.api);
    let store = Arc::new(UserSessionStore::new());
    let (redirects, mut redirected) = mpsc::unbounded_channel();

    let deps = WorkflowDeps {
        verify: Arc::new(SessionBoundVerify::new(api.clone(), store.clone())),
        resend: Arc::new(SessionBoundResend::new(api, store.clone())),
        navigator: Arc::new(ChannelNavigator { redirects }),
        session: store.clone(),
    };
    let workflow = OtpWorkflow::mount(
        OtpWorkflowConfig::from_settings(email, &config.verification),
        deps,
    )?;

    info!(workflow_id = %workflow.id(), "Workflow mounted");

    let snapshot = workflow.snapshot();
    println!("{}", snapshot.title);
    println!("{} ({})", snapshot.description, workflow.config().identity);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let snapshot = workflow.snapshot();
        if snapshot.can_resend {
            println!("Code> (or 'resend')");
        } else {
            println!("Code> (resend in {})", snapshot.timer_display);
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if input.eq_ignore_ascii_case("resend") {
            match workflow.resend() {
                Ok(dispatch) => println!("A new code is on its way ({}s)", dispatch.remaining),
                Err(WorkflowError::ResendNotReady { remaining }) => {
                    println!("Resend available in {}s", remaining)
                }
                Err(e) => return Err(e.into()),
            }
            continue;
        }

        if !workflow.paste(input)? {
            println!("Enter exactly 6 digits");
            continue;
        }

        match workflow.submit() {
            Ok(SubmitOutcome::Dispatched) => {}
            Ok(outcome) => {
                println!("Submit ignored: {:?}", outcome);
                continue;
            }
            Err(WorkflowError::Validation(errors)) => {
                println!("{}", errors);
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        match workflow.wait_until_settled().await? {
            SubmissionState::Succeeded => {
                let seconds = workflow.snapshot().success_countdown.unwrap_or_default();
                println!("Email verified. Redirecting in {}s...", seconds);
                if let Some(path) = redirected.recv().await {
                    println!("Redirected to {}", path);
                }
                break;
            }
            SubmissionState::Failed { message } => {
                let snapshot = workflow.snapshot();
                match snapshot.session_error {
                    Some(detail) => println!("{} ({})", message, detail),
                    None => println!("{}", message),
                }
            }
            SubmissionState::Idle | SubmissionState::Submitting => {}
        }
    }

    workflow.teardown();
    Ok(())
}
