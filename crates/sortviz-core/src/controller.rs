//! Run orchestration: generate an array, pick an algorithm, run, restart.
//!
//! The [`RunController`] owns the array and the single active run. Each run
//! executes on its own background thread; the array is moved into that thread
//! and handed back through its `JoinHandle`, so two runs can never touch the
//! same buffer. Starting a run always cancels and joins the previous one
//! first.
//!
//! # States
//!
//! ```text
//! Idle --start--> Running --natural end--> Completed --reap--> Idle
//!                    |
//!                    +--cancel/restart/change--> Cancelling --join--> Idle
//! ```

use std::sync::mpsc;
use std::thread;

use crate::algorithms::{self, Algorithm};
use crate::array::SortArray;
use crate::config::EngineConfig;
use crate::error::SortError;
use crate::id::RunId;
use crate::rng::{SimRng, generate_random_array};
use crate::scheduler::{CancelToken, CancelTrigger, PacedSink, RunEvent, RunOutcome};
use crate::step::StepCounts;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Lifecycle of the controller's current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// No run in flight; ready to start one.
    Idle,
    /// A run is delivering steps.
    Running,
    /// Cancellation was requested and the worker has not been joined yet.
    Cancelling,
    /// The worker returned on its own and is waiting to be reaped. Covers
    /// both sorted and faulted runs; the report's outcome says which.
    Completed,
}

/// Caller-side handle to a run. Cheap to clone and safe to use from any
/// thread; [`RunHandle::cancel`] never blocks.
#[derive(Debug, Clone)]
pub struct RunHandle {
    id: RunId,
    trigger: CancelTrigger,
}

impl RunHandle {
    pub fn id(&self) -> RunId {
        self.id
    }

    /// Request cancellation without waiting for the worker. Idempotent, and
    /// a no-op once the run has finished.
    pub fn cancel(&self) {
        self.trigger.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.trigger.is_cancelled()
    }
}

/// Everything known about a run once its worker has been joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub run: RunId,
    pub algorithm: Algorithm,
    pub outcome: RunOutcome,
    pub counts: StepCounts,
    /// The array as the run left it.
    pub array: SortArray,
}

struct ActiveRun {
    handle: RunHandle,
    algorithm: Algorithm,
    thread: thread::JoinHandle<RunReport>,
}

// ---------------------------------------------------------------------------
// RunController
// ---------------------------------------------------------------------------

/// Single owner of the sort array and of the one active run.
pub struct RunController {
    config: EngineConfig,
    rng: SimRng,
    next_run: u64,
    algorithm: Algorithm,
    /// `None` while a worker owns the array.
    array: Option<SortArray>,
    active: Option<ActiveRun>,
    subscriber: Option<mpsc::Sender<RunEvent>>,
}

impl std::fmt::Debug for RunController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunController")
            .field("config", &self.config)
            .field("algorithm", &self.algorithm)
            .field("array", &self.array)
            .field("active", &self.active.as_ref().map(|a| a.handle.id))
            .field("subscribed", &self.subscriber.is_some())
            .finish_non_exhaustive()
    }
}

impl RunController {
    /// Validate `config` and generate the initial array.
    pub fn new(config: EngineConfig) -> Result<Self, SortError> {
        config.validate()?;
        let mut rng = config.rng();
        let array = generate_random_array(config.array_size, config.value_range, &mut rng)?;
        Ok(Self {
            algorithm: config.default_algorithm,
            config,
            rng,
            next_run: 1,
            array: Some(array),
            active: None,
            subscriber: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Open a channel of [`RunEvent`]s for all subsequent runs. Replaces any
    /// previous subscriber; dropping the receiver turns delivery into a no-op.
    pub fn subscribe(&mut self) -> mpsc::Receiver<RunEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscriber = Some(tx);
        rx
    }

    /// Drop the current subscriber. Runs started afterwards deliver nowhere.
    pub fn unsubscribe(&mut self) {
        self.subscriber = None;
    }

    /// Current lifecycle state. A cancel that arrives after the worker
    /// finished is ignored, so such a run stays `Completed`.
    pub fn state(&self) -> RunState {
        match &self.active {
            None => RunState::Idle,
            Some(run) if run.handle.is_cancelled() => RunState::Cancelling,
            Some(run) if run.thread.is_finished() => RunState::Completed,
            Some(_) => RunState::Running,
        }
    }

    /// Id of the run in flight, if any.
    pub fn active_run(&self) -> Option<RunId> {
        self.active.as_ref().map(|run| run.handle.id)
    }

    /// Algorithm of the current or most recent run.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The array between runs. `None` while a run owns it.
    pub fn array(&self) -> Option<&SortArray> {
        self.array.as_ref()
    }

    /// Start `algorithm` over `array`, cancelling and joining any active run
    /// first. The latest request always wins.
    pub fn start_run(&mut self, algorithm: Algorithm, array: SortArray) -> RunHandle {
        self.stop();

        let id = RunId(self.next_run);
        self.next_run += 1;
        self.algorithm = algorithm;
        self.array = None;

        let (token, trigger) = CancelToken::new();
        let handle = RunHandle { id, trigger };
        let sink = PacedSink::new(
            id,
            self.config.step_interval(),
            token,
            self.subscriber.clone(),
        );
        let options = self.config.sort_options();

        tracing::info!(run = %id, %algorithm, len = array.len(), "run started");
        let thread = thread::spawn(move || {
            let mut array = array;
            let mut sink = sink;
            let result = algorithms::run(algorithm, &mut array, &mut sink, options);
            let outcome = RunOutcome::from(result);
            let counts = sink.counts();
            sink.finish(outcome.clone());
            RunReport {
                run: id,
                algorithm,
                outcome,
                counts,
                array,
            }
        });

        self.active = Some(ActiveRun {
            handle: handle.clone(),
            algorithm,
            thread,
        });
        handle
    }

    /// Cancel `handle`'s run and wait for its worker. Superseded runs are
    /// left alone. A run that already finished is only reaped; its outcome
    /// is not rewritten.
    pub fn cancel(&mut self, handle: &RunHandle) -> Option<RunReport> {
        handle.cancel();
        let is_active = self
            .active
            .as_ref()
            .is_some_and(|run| run.handle.id == handle.id);
        if !is_active {
            return None;
        }
        tracing::debug!(run = %handle.id, "cancelling run");
        self.join_active()
    }

    /// Start `algorithm` over a freshly generated array.
    pub fn restart(&mut self, algorithm: Algorithm) -> Result<RunHandle, SortError> {
        self.stop();
        let array = generate_random_array(
            self.config.array_size,
            self.config.value_range,
            &mut self.rng,
        )?;
        Ok(self.start_run(algorithm, array))
    }

    /// Cancel the active run and start `algorithm` over whatever state the
    /// array was left in.
    pub fn change_algorithm(&mut self, algorithm: Algorithm) -> Result<RunHandle, SortError> {
        self.stop();
        let array = match self.array.take() {
            Some(array) => array,
            None => generate_random_array(
                self.config.array_size,
                self.config.value_range,
                &mut self.rng,
            )?,
        };
        Ok(self.start_run(algorithm, array))
    }

    /// Block until the active run terminates and return its report.
    pub fn wait(&mut self) -> Option<RunReport> {
        self.join_active()
    }

    /// Collect the active run if its worker already finished. Never blocks.
    pub fn reap(&mut self) -> Option<RunReport> {
        let finished = self
            .active
            .as_ref()
            .is_some_and(|run| run.thread.is_finished());
        if finished {
            self.join_active()
        } else {
            None
        }
    }

    /// Cancel and join whatever is running, returning its report. Leaves
    /// the controller `Idle` with the array back in place.
    pub fn stop(&mut self) -> Option<RunReport> {
        if let Some(run) = &self.active {
            run.handle.cancel();
            tracing::debug!(run = %run.handle.id, algorithm = %run.algorithm, "stopping run");
        }
        self.join_active()
    }

    fn join_active(&mut self) -> Option<RunReport> {
        let run = self.active.take()?;
        let report = match run.thread.join() {
            Ok(report) => report,
            // Algorithm invariant violations are fatal; surface the panic.
            Err(payload) => std::panic::resume_unwind(payload),
        };
        tracing::info!(
            run = %report.run,
            algorithm = %report.algorithm,
            outcome = ?report.outcome,
            mutations = report.counts.mutations(),
            "run finished"
        );
        self.array = Some(report.array.clone());
        Some(report)
    }
}

impl Drop for RunController {
    fn drop(&mut self) {
        if let Some(run) = &self.active {
            run.handle.cancel();
        }
        if let Some(run) = self.active.take() {
            // Never re-raise a worker panic from drop.
            let _ = run.thread.join();
        }
    }
}
