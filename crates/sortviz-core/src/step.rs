//! Observable mutation records and the sink they are emitted into.
//!
//! Algorithms emit one [`Step`] after each mutation of the array, in the
//! exact order the mutations happen. A [`StepSink`] decides what to do with
//! it: record it, pace it out to a renderer, or drop it.
//!
//! # Step kinds
//!
//! - `Compare` is optional instrumentation and never mutates.
//! - `Swap` exchanges two positions.
//! - `Overwrite` stores a value at one position (insertion shifts, merge
//!   writeback).
//!
//! Every step carries enough data to rebuild the array incrementally from the
//! previous state via [`Step::apply`].

use serde::{Deserialize, Serialize};

use crate::error::SortError;

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// One observable event emitted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    Compare { i: usize, j: usize },
    Swap { i: usize, j: usize },
    Overwrite { index: usize, value: u32 },
}

/// Discriminant tag for steps, used for counting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Compare,
    Swap,
    Overwrite,
}

impl Step {
    /// Get the discriminant kind for this step.
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Compare { .. } => StepKind::Compare,
            Step::Swap { .. } => StepKind::Swap,
            Step::Overwrite { .. } => StepKind::Overwrite,
        }
    }

    /// Whether this step can change array contents.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Step::Compare { .. })
    }

    /// Whether applying this step to `state` leaves it unchanged
    /// (a compare, a self-swap, a swap of equal values, or a same-value write).
    pub fn is_noop_on(&self, state: &[u32]) -> bool {
        match *self {
            Step::Compare { .. } => true,
            Step::Swap { i, j } => {
                i == j || matches!((state.get(i), state.get(j)), (Some(a), Some(b)) if a == b)
            }
            Step::Overwrite { index, value } => state.get(index) == Some(&value),
        }
    }

    /// Apply this step to a prior snapshot, producing the post-mutation state.
    pub fn apply(&self, state: &mut [u32]) -> Result<(), SortError> {
        let len = state.len();
        let check = |index: usize| {
            if index < len {
                Ok(())
            } else {
                Err(SortError::IndexOutOfBounds { index, len })
            }
        };
        match *self {
            Step::Compare { i, j } => {
                check(i)?;
                check(j)?;
            }
            Step::Swap { i, j } => {
                check(i)?;
                check(j)?;
                state.swap(i, j);
            }
            Step::Overwrite { index, value } => {
                check(index)?;
                state[index] = value;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

/// Per-kind tallies of emitted steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCounts {
    pub compares: u64,
    pub swaps: u64,
    pub overwrites: u64,
}

impl StepCounts {
    /// Tally one step.
    pub fn record(&mut self, step: &Step) {
        match step.kind() {
            StepKind::Compare => self.compares += 1,
            StepKind::Swap => self.swaps += 1,
            StepKind::Overwrite => self.overwrites += 1,
        }
    }

    /// Swaps plus overwrites.
    pub fn mutations(&self) -> u64 {
        self.swaps + self.overwrites
    }

    /// All steps, including compares.
    pub fn total(&self) -> u64 {
        self.compares + self.mutations()
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Why an algorithm stopped before finishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// The run was cancelled at a safe point.
    Cancelled,
    /// An array primitive rejected an access. Always an algorithm bug.
    Fault(SortError),
}

impl From<SortError> for Halt {
    fn from(err: SortError) -> Self {
        Halt::Fault(err)
    }
}

/// Capability to emit one step and optionally suspend until the consumer is
/// ready for the next one.
///
/// `state` is the array contents after the step was applied. Returning
/// `Err(Halt::Cancelled)` abandons the run at this safe point.
pub trait StepSink {
    fn emit(&mut self, step: Step, state: &[u32]) -> Result<(), Halt>;
}

/// A sink that discards every step. Runs against it just sort.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl StepSink for NullSink {
    fn emit(&mut self, _step: Step, _state: &[u32]) -> Result<(), Halt> {
        Ok(())
    }
}

/// A sink that keeps every step in memory, in emission order.
#[derive(Debug, Default, Clone)]
pub struct StepRecorder {
    steps: Vec<Step>,
    counts: StepCounts,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded steps, oldest first.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn counts(&self) -> StepCounts {
        self.counts
    }

    /// Only the mutating steps, oldest first.
    pub fn mutations(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| s.is_mutation())
    }
}

impl StepSink for StepRecorder {
    fn emit(&mut self, step: Step, _state: &[u32]) -> Result<(), Halt> {
        self.counts.record(&step);
        self.steps.push(step);
        Ok(())
    }
}

impl<S: StepSink + ?Sized> StepSink for &mut S {
    fn emit(&mut self, step: Step, state: &[u32]) -> Result<(), Halt> {
        (**self).emit(step, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_swap_and_overwrite() {
        let mut state = vec![3, 1, 2];
        Step::Swap { i: 0, j: 1 }.apply(&mut state).unwrap();
        assert_eq!(state, vec![1, 3, 2]);
        Step::Overwrite { index: 2, value: 9 }
            .apply(&mut state)
            .unwrap();
        assert_eq!(state, vec![1, 3, 9]);
    }

    #[test]
    fn apply_compare_leaves_state() {
        let mut state = vec![5, 6];
        Step::Compare { i: 0, j: 1 }.apply(&mut state).unwrap();
        assert_eq!(state, vec![5, 6]);
    }

    #[test]
    fn apply_rejects_out_of_range() {
        let mut state = vec![1];
        let err = Step::Swap { i: 0, j: 3 }.apply(&mut state).unwrap_err();
        assert_eq!(err, SortError::IndexOutOfBounds { index: 3, len: 1 });
    }

    #[test]
    fn noop_detection() {
        let state = [4, 4, 7];
        assert!(Step::Swap { i: 1, j: 1 }.is_noop_on(&state));
        assert!(Step::Swap { i: 0, j: 1 }.is_noop_on(&state));
        assert!(!Step::Swap { i: 1, j: 2 }.is_noop_on(&state));
        assert!(Step::Overwrite { index: 2, value: 7 }.is_noop_on(&state));
        assert!(!Step::Overwrite { index: 2, value: 8 }.is_noop_on(&state));
    }

    #[test]
    fn counts_track_kinds() {
        let mut counts = StepCounts::default();
        counts.record(&Step::Compare { i: 0, j: 1 });
        counts.record(&Step::Swap { i: 0, j: 1 });
        counts.record(&Step::Overwrite { index: 0, value: 1 });
        counts.record(&Step::Overwrite { index: 1, value: 1 });
        assert_eq!(counts.compares, 1);
        assert_eq!(counts.mutations(), 3);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn recorder_keeps_order() {
        let mut rec = StepRecorder::new();
        rec.emit(Step::Swap { i: 1, j: 0 }, &[]).unwrap();
        rec.emit(Step::Compare { i: 0, j: 1 }, &[]).unwrap();
        rec.emit(Step::Overwrite { index: 0, value: 2 }, &[])
            .unwrap();
        assert_eq!(rec.steps().len(), 3);
        assert_eq!(rec.mutations().count(), 2);
        assert_eq!(rec.steps()[0], Step::Swap { i: 1, j: 0 });
    }
}
