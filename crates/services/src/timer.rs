//! One-second countdown driven by a tokio task.

use std::time::Duration;

use tokio::task::JoinHandle;

/// What the countdown observed, tagged with the epoch that started it.
///
/// Consumers compare the epoch against their current one and drop mismatches,
/// so an event that was already in flight when the countdown was cancelled or
/// restarted is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub epoch: u64,
    pub kind: TimerEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEventKind {
    /// One second elapsed; `remaining_secs` is the updated remainder.
    Tick { remaining_secs: u32 },
    /// The countdown reached zero. Emitted exactly once per `start`.
    Expired,
}

/// A restartable countdown. At most one task runs at a time; starting a new
/// countdown aborts the previous one, and dropping the timer aborts it too.
#[derive(Debug, Default)]
pub struct CountdownTimer {
    task: Option<JoinHandle<()>>,
}

impl CountdownTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a countdown of `duration_secs`, invoking `on_event` with a tick
    /// each second and a final `Expired` when it reaches zero.
    pub fn start<F>(&mut self, epoch: u64, duration_secs: u32, mut on_event: F)
    where
        F: FnMut(TimerEvent) + Send + 'static,
    {
        self.cancel();
        self.task = Some(tokio::spawn(async move {
            let mut remaining = duration_secs;
            while remaining > 0 {
                tokio::time::sleep(Duration::from_secs(1)).await;
                remaining -= 1;
                on_event(TimerEvent {
                    epoch,
                    kind: TimerEventKind::Tick {
                        remaining_secs: remaining,
                    },
                });
            }
            on_event(TimerEvent {
                epoch,
                kind: TimerEventKind::Expired,
            });
        }));
    }

    /// Stops the countdown without firing expiry. Safe to call when idle.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Returns true while a countdown task is alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
