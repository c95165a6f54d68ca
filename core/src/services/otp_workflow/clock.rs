//! Driving clocks for the workflow countdowns
//!
//! A `DrivingClock` owns the task that delivers ticks. Dropping the handle
//! aborts the task, so a clock never outlives the instance that owns it.

use std::ops::ControlFlow;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

pub struct DrivingClock {
    name: &'static str,
    task: Option<JoinHandle<()>>,
}

impl DrivingClock {
    /// Spawn a clock that calls `on_tick` once per `period`
    ///
    /// The first tick is delivered one full period after the call. The clock
    /// ends by itself when `on_tick` returns `Break`.
    pub fn spawn<F>(runtime: &Handle, name: &'static str, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let task = runtime.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            // a stalled host must not receive a burst of catch-up ticks
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if on_tick().is_break() {
                    debug!(clock = name, "Driving clock finished");
                    break;
                }
            }
        });

        Self {
            name,
            task: Some(task),
        }
    }

    /// Abort the clock task; safe to call more than once
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(clock = self.name, "Driving clock released");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for DrivingClock {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for DrivingClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrivingClock")
            .field("name", &self.name)
            .field("running", &self.is_running())
            .finish()
    }
}
