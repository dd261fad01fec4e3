//! Countdown timer task
//!
//! The timer never touches match state on its own thread of control: each
//! fire takes the match's ownership boundary and delivers one
//! [`countdown_tick`](super::MatchCore::countdown_tick), so admission and
//! countdown advancement can never interleave mid-mutation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use crate::util::time::countdown_period;

use super::r#match::{CountdownStep, MatchCore};

/// Control handle for a running countdown task
pub struct CountdownHandle {
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl CountdownHandle {
    /// Stop the countdown. Idempotent; harmless after the final tick.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawn the timer task for a match whose countdown counter is armed.
///
/// One step per second until the core reports the countdown finished or the
/// handle is cancelled.
pub fn spawn_countdown(core: Arc<Mutex<MatchCore>>) -> CountdownHandle {
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = cancelled.clone();

    let task = tokio::spawn(async move {
        let mut steps = interval(countdown_period());
        steps.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // the first interval fire completes immediately; consume it so each
        // step lands a full period apart
        steps.tick().await;

        loop {
            steps.tick().await;

            if flag.load(Ordering::Relaxed) {
                let mut core = core.lock();
                core.cancel_countdown();
                debug!(match_id = %core.id(), "Countdown cancelled");
                break;
            }

            match core.lock().countdown_tick() {
                CountdownStep::Continue { .. } => {}
                CountdownStep::Finished => break,
            }
        }
    });

    CountdownHandle { cancelled, task }
}
