//! Step pacing, delivery, and cooperative cancellation.
//!
//! The algorithm runs on a background thread and emits steps into a
//! [`PacedSink`]. The sink forwards each step to the consumer channel and then
//! waits out the pacing interval on a [`CancelToken`]. The wait is the only
//! suspension point of a run and doubles as its cancellation check.
//!
//! Delivery happens while holding the token's lock, and
//! [`CancelTrigger::cancel`] takes the same lock, so once `cancel` returns no
//! further step of that run can reach the consumer.

use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::error::SortError;
use crate::id::RunId;
use crate::step::{Halt, Step, StepCounts, StepSink};

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Lifecycle flags shared by a token and its trigger.
#[derive(Debug, Default)]
struct Signal {
    cancelled: bool,
    /// Set once the worker returned; later cancels are ignored.
    finished: bool,
}

type Shared = Arc<(Mutex<Signal>, Condvar)>;

fn lock(inner: &Shared) -> MutexGuard<'_, Signal> {
    // A panicking holder cannot leave two bools half-written.
    inner.0.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Worker-side view of a run's cancellation flag.
#[derive(Debug, Clone)]
pub struct CancelToken {
    inner: Shared,
}

/// Controller-side handle that flips the flag.
#[derive(Debug, Clone)]
pub struct CancelTrigger {
    inner: Shared,
}

impl CancelToken {
    /// Create a new (token, trigger) pair, not yet cancelled.
    pub fn new() -> (Self, CancelTrigger) {
        let inner: Shared = Arc::new((Mutex::new(Signal::default()), Condvar::new()));
        (
            Self {
                inner: inner.clone(),
            },
            CancelTrigger { inner },
        )
    }

    pub fn is_cancelled(&self) -> bool {
        lock(&self.inner).cancelled
    }

    /// Wait for either cancellation or a timeout.
    ///
    /// Returns `true` if cancelled, `false` if the full duration elapsed.
    /// Spurious wakeups are absorbed by re-waiting for the remainder.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (_, cvar) = &*self.inner;
        let mut signal = lock(&self.inner);
        if signal.cancelled {
            return true;
        }

        let start = Instant::now();
        let mut remaining = duration;
        loop {
            let (guard, result) = cvar
                .wait_timeout(signal, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            signal = guard;
            if signal.cancelled {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }

    /// Run `deliver` unless the run has been cancelled. Returns whether it ran.
    ///
    /// The flag stays locked while `deliver` runs, so a concurrent `cancel`
    /// waits for an in-flight delivery instead of racing it.
    pub fn run_unless_cancelled(&self, deliver: impl FnOnce()) -> bool {
        let signal = lock(&self.inner);
        if signal.cancelled {
            return false;
        }
        deliver();
        drop(signal);
        true
    }

    /// Mark the run as terminated. Any later [`CancelTrigger::cancel`] is a
    /// no-op, so a finished run keeps reporting how it actually ended.
    pub fn finish(&self) {
        lock(&self.inner).finished = true;
    }
}

impl CancelTrigger {
    /// Signal cancellation. Idempotent; wakes a worker blocked in its pacing
    /// wait. Does nothing once the run has finished.
    pub fn cancel(&self) {
        let (_, cvar) = &*self.inner;
        let mut signal = lock(&self.inner);
        if signal.finished {
            return;
        }
        signal.cancelled = true;
        cvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        lock(&self.inner).cancelled
    }

    /// Whether the worker has returned.
    pub fn is_finished(&self) -> bool {
        lock(&self.inner).finished
    }
}

// ---------------------------------------------------------------------------
// Events delivered to the consumer
// ---------------------------------------------------------------------------

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The algorithm ran to completion; the array is sorted.
    Completed,
    /// Cancellation was observed at a safe point.
    Cancelled,
    /// An algorithm broke an array invariant (release builds only).
    Faulted(SortError),
}

impl From<Result<(), Halt>> for RunOutcome {
    fn from(result: Result<(), Halt>) -> Self {
        match result {
            Ok(()) => RunOutcome::Completed,
            Err(Halt::Cancelled) => RunOutcome::Cancelled,
            Err(Halt::Fault(err)) => RunOutcome::Faulted(err),
        }
    }
}

/// A message on the consumer's subscription channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// One step of a run, with the array contents after it was applied.
    Step {
        run: RunId,
        seq: u64,
        step: Step,
        state: Vec<u32>,
    },
    /// Terminal notification. Always the last event of a run.
    Finished {
        run: RunId,
        outcome: RunOutcome,
        counts: StepCounts,
    },
}

impl RunEvent {
    pub fn run(&self) -> RunId {
        match self {
            RunEvent::Step { run, .. } | RunEvent::Finished { run, .. } => *run,
        }
    }
}

// ---------------------------------------------------------------------------
// PacedSink
// ---------------------------------------------------------------------------

/// A [`StepSink`] that delivers each step to a channel and then sleeps for the
/// pacing interval, honoring cancellation before delivery and during the wait.
///
/// If the receiver has been dropped, delivery is a silent no-op and the
/// algorithm keeps sorting.
#[derive(Debug)]
pub struct PacedSink {
    run: RunId,
    interval: Duration,
    token: CancelToken,
    consumer: Option<mpsc::Sender<RunEvent>>,
    seq: u64,
    counts: StepCounts,
}

impl PacedSink {
    pub fn new(
        run: RunId,
        interval: Duration,
        token: CancelToken,
        consumer: Option<mpsc::Sender<RunEvent>>,
    ) -> Self {
        Self {
            run,
            interval,
            token,
            consumer,
            seq: 0,
            counts: StepCounts::default(),
        }
    }

    /// Steps delivered so far, by kind.
    pub fn counts(&self) -> StepCounts {
        self.counts
    }

    /// Mark the run finished and send the terminal notification. Consumes
    /// the sink so nothing can follow it.
    pub fn finish(self, outcome: RunOutcome) {
        self.token.finish();
        let Some(consumer) = self.consumer else {
            return;
        };
        let event = RunEvent::Finished {
            run: self.run,
            outcome,
            counts: self.counts,
        };
        if consumer.send(event).is_err() {
            tracing::trace!(run = %self.run, "consumer gone before finish notification");
        }
    }
}

impl StepSink for PacedSink {
    fn emit(&mut self, step: Step, state: &[u32]) -> Result<(), Halt> {
        let seq = self.seq;
        let delivered = self.token.run_unless_cancelled(|| {
            let Some(consumer) = &self.consumer else {
                return;
            };
            let event = RunEvent::Step {
                run: self.run,
                seq,
                step,
                state: state.to_vec(),
            };
            if consumer.send(event).is_err() {
                // Receiver dropped: keep sorting, stop trying to deliver.
                self.consumer = None;
            }
        });
        if !delivered {
            return Err(Halt::Cancelled);
        }
        self.seq += 1;
        self.counts.record(&step);
        tracing::trace!(run = %self.run, seq, ?step, "step delivered");

        if self.interval.is_zero() {
            return Ok(());
        }
        if self.token.wait_timeout(self.interval) {
            return Err(Halt::Cancelled);
        }
        Ok(())
    }
}
