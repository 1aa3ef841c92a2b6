//! Step log recording and playback.
//!
//! A [`StepLog`] holds the array a run started from plus every step it
//! emitted. Because each step carries enough data to be applied to the prior
//! state, the log alone reproduces every intermediate frame. Hash checkpoints
//! taken while recording let playback verify it reconstructs the same states.

use serde::{Deserialize, Serialize};

use crate::algorithms::{self, Algorithm, SortOptions};
use crate::array::SortArray;
use crate::error::SortError;
use crate::step::{Halt, Step, StepSink};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to encode step log: {0}")]
    Encode(String),

    #[error("failed to decode step log: {0}")]
    Decode(String),

    /// A recorded step does not fit the logged array.
    #[error("step {index} cannot be applied: {source}")]
    InvalidStep { index: usize, source: SortError },
}

// ---------------------------------------------------------------------------
// State hash
// ---------------------------------------------------------------------------

/// FNV-1a (64-bit) over the little-endian bytes of each value. Not
/// cryptographic; only used to detect divergent replays.
pub fn state_hash(state: &[u32]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    let mut hash = FNV_OFFSET;
    for value in state {
        for b in value.to_le_bytes() {
            hash ^= u64::from(b);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
    }
    hash
}

// ---------------------------------------------------------------------------
// StepLog
// ---------------------------------------------------------------------------

/// A recorded run: initial array, emitted steps, and hash checkpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepLog {
    pub algorithm: Algorithm,
    /// Array contents before the first step.
    pub initial: Vec<u32>,
    /// Steps in emission order.
    pub steps: Vec<Step>,
    /// Hash checkpoints: (step_index, hash of the state after that step).
    pub checkpoints: Vec<(usize, u64)>,
}

impl StepLog {
    pub fn new(algorithm: Algorithm, initial: Vec<u32>) -> Self {
        Self {
            algorithm,
            initial,
            steps: Vec::new(),
            checkpoints: Vec::new(),
        }
    }

    /// Record a step.
    pub fn record(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Record a step with a hash checkpoint of the state it produced.
    pub fn record_with_hash(&mut self, step: Step, hash: u64) {
        let index = self.steps.len();
        self.steps.push(step);
        self.checkpoints.push((index, hash));
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Every intermediate state: `frames()[k]` is the array after step `k`.
    pub fn frames(&self) -> Result<Vec<Vec<u32>>, ReplayError> {
        let mut state = self.initial.clone();
        let mut frames = Vec::with_capacity(self.steps.len());
        for (index, step) in self.steps.iter().enumerate() {
            step.apply(&mut state)
                .map_err(|source| ReplayError::InvalidStep { index, source })?;
            frames.push(state.clone());
        }
        Ok(frames)
    }

    /// Serialize the log to bytes (using bitcode).
    pub fn serialize(&self) -> Result<Vec<u8>, ReplayError> {
        bitcode::serialize(self).map_err(|e| ReplayError::Encode(e.to_string()))
    }

    /// Deserialize a log from bytes.
    pub fn deserialize(data: &[u8]) -> Result<Self, ReplayError> {
        bitcode::deserialize(data).map_err(|e| ReplayError::Decode(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Recording
// ---------------------------------------------------------------------------

/// A [`StepSink`] that appends to a [`StepLog`], checkpointing every
/// `checkpoint_every` steps and always on the first step.
#[derive(Debug)]
pub struct LogRecorder {
    log: StepLog,
    checkpoint_every: usize,
}

impl LogRecorder {
    /// A `checkpoint_every` of 0 disables checkpoints.
    pub fn new(algorithm: Algorithm, initial: Vec<u32>, checkpoint_every: usize) -> Self {
        Self {
            log: StepLog::new(algorithm, initial),
            checkpoint_every,
        }
    }

    pub fn into_log(self) -> StepLog {
        self.log
    }
}

impl StepSink for LogRecorder {
    fn emit(&mut self, step: Step, state: &[u32]) -> Result<(), Halt> {
        let index = self.log.steps.len();
        if self.checkpoint_every > 0 && index % self.checkpoint_every == 0 {
            self.log.record_with_hash(step, state_hash(state));
        } else {
            self.log.record(step);
        }
        Ok(())
    }
}

/// Run `algorithm` synchronously over a copy of `array` and record every step.
///
/// No pacing and no cancellation: this is the offline counterpart of a
/// controller run.
pub fn record(
    algorithm: Algorithm,
    array: &SortArray,
    options: SortOptions,
    checkpoint_every: usize,
) -> Result<StepLog, SortError> {
    let mut working = array.clone();
    let mut recorder = LogRecorder::new(algorithm, array.snapshot(), checkpoint_every);
    match algorithms::run(algorithm, &mut working, &mut recorder, options) {
        Ok(()) | Err(Halt::Cancelled) => {}
        Err(Halt::Fault(err)) => return Err(err),
    }
    let mut log = recorder.into_log();
    // Always close the log with a checkpoint of the final state.
    if checkpoint_every > 0 && !log.steps.is_empty() {
        let last = log.steps.len() - 1;
        if log.checkpoints.last().map(|&(i, _)| i) != Some(last) {
            log.checkpoints.push((last, state_hash(working.as_slice())));
        }
    }
    Ok(log)
}

// ---------------------------------------------------------------------------
// Playback
// ---------------------------------------------------------------------------

/// Details about where replay verification failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayMismatch {
    /// The step index where the mismatch was detected.
    pub step_index: usize,
    pub expected_hash: u64,
    pub actual_hash: u64,
}

/// The result of replaying a log.
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub steps_applied: usize,
    /// Whether all hash checkpoints matched.
    pub is_verified: bool,
    /// First mismatch encountered (if any).
    pub first_mismatch: Option<ReplayMismatch>,
    /// State after the last step.
    pub final_state: Vec<u32>,
}

impl ReplayResult {
    pub fn is_sorted(&self) -> bool {
        self.final_state.windows(2).all(|w| w[0] <= w[1])
    }
}

/// Replay a log from its initial array and verify hash checkpoints.
pub fn replay_and_verify(log: &StepLog) -> Result<ReplayResult, ReplayError> {
    let mut state = log.initial.clone();
    let mut first_mismatch = None;
    let mut checkpoints = log.checkpoints.iter().peekable();

    for (index, step) in log.steps.iter().enumerate() {
        step.apply(&mut state)
            .map_err(|source| ReplayError::InvalidStep { index, source })?;

        while let Some(&&(at, expected_hash)) = checkpoints.peek() {
            if at != index {
                break;
            }
            checkpoints.next();
            let actual_hash = state_hash(&state);
            if actual_hash != expected_hash && first_mismatch.is_none() {
                first_mismatch = Some(ReplayMismatch {
                    step_index: index,
                    expected_hash,
                    actual_hash,
                });
            }
        }
    }

    Ok(ReplayResult {
        steps_applied: log.steps.len(),
        is_verified: first_mismatch.is_none(),
        first_mismatch,
        final_state: state,
    })
}
