//! The five instrumented comparison sorts.
//!
//! Each algorithm is a function of an array and a [`StepSink`]: it mutates
//! the array only through a [`Tracer`], which applies the mutation and then
//! hands the resulting step to the sink. Algorithms never sleep and never
//! know who consumes their steps; pacing belongs to the scheduler.
//!
//! A sink returning [`Halt::Cancelled`] unwinds the algorithm through `?`
//! right after the in-flight mutation, which is the run's safe point.

mod bubble;
mod insertion;
mod merge;
mod quick;
mod selection;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::array::SortArray;
use crate::error::SortError;
use crate::step::{Halt, Step, StepSink};

// ---------------------------------------------------------------------------
// Algorithm selection
// ---------------------------------------------------------------------------

/// Which sort a run executes. Fixed for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
}

impl Algorithm {
    /// Every selectable algorithm, in menu order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
    ];

    /// Human-readable menu label.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Quick => "Quick Sort",
        }
    }

    /// Lowercase identifier used in config files and on the command line.
    pub fn short_name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    /// Accepts either the menu label or the short name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Algorithm::ALL
            .into_iter()
            .find(|a| {
                a.name().eq_ignore_ascii_case(wanted) || a.short_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| SortError::invalid(format!("unknown algorithm '{wanted}'")))
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Instrumentation knobs shared by all algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    /// Emit `Compare` steps before element comparisons.
    pub emit_compares: bool,
    /// Skip swaps whose two indices are equal (selection and quick sort).
    pub suppress_self_swaps: bool,
}

// ---------------------------------------------------------------------------
// Tracer
// ---------------------------------------------------------------------------

/// Instrumented view of a [`SortArray`]. The only way algorithms touch data.
pub struct Tracer<'a> {
    array: &'a mut SortArray,
    sink: &'a mut dyn StepSink,
    options: SortOptions,
}

impl<'a> Tracer<'a> {
    pub fn new(array: &'a mut SortArray, sink: &'a mut dyn StepSink, options: SortOptions) -> Self {
        Self {
            array,
            sink,
            options,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.array.len()
    }

    /// Read one element.
    pub fn get(&self, index: usize) -> Result<u32, Halt> {
        self.array.get(index).map_err(fault)
    }

    /// Report that positions `i` and `j` are about to be compared.
    pub fn compare(&mut self, i: usize, j: usize) -> Result<(), Halt> {
        if !self.options.emit_compares {
            return Ok(());
        }
        self.emit(Step::Compare { i, j })
    }

    /// Exchange two elements and emit a `Swap`.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), Halt> {
        self.array.swap(i, j).map_err(fault)?;
        self.emit(Step::Swap { i, j })
    }

    /// Like [`Tracer::swap`], but honors `suppress_self_swaps`.
    pub fn swap_unless_self(&mut self, i: usize, j: usize) -> Result<(), Halt> {
        if i == j && self.options.suppress_self_swaps {
            return Ok(());
        }
        self.swap(i, j)
    }

    /// Store a value and emit an `Overwrite`.
    pub fn overwrite(&mut self, index: usize, value: u32) -> Result<(), Halt> {
        self.array.overwrite(index, value).map_err(fault)?;
        self.emit(Step::Overwrite { index, value })
    }

    fn emit(&mut self, step: Step) -> Result<(), Halt> {
        self.sink.emit(step, self.array.as_slice())
    }
}

/// Out-of-range access from an algorithm is a bug: abort in debug builds,
/// end the run as faulted otherwise.
fn fault(err: SortError) -> Halt {
    if cfg!(debug_assertions) {
        panic!("sort algorithm invariant violated: {err}");
    }
    Halt::Fault(err)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Run `algorithm` over `array` to completion or until the sink halts it.
pub fn run(
    algorithm: Algorithm,
    array: &mut SortArray,
    sink: &mut dyn StepSink,
    options: SortOptions,
) -> Result<(), Halt> {
    let mut tracer = Tracer::new(array, sink, options);
    match algorithm {
        Algorithm::Bubble => bubble::sort(&mut tracer),
        Algorithm::Selection => selection::sort(&mut tracer),
        Algorithm::Insertion => insertion::sort(&mut tracer),
        Algorithm::Merge => merge::sort(&mut tracer),
        Algorithm::Quick => quick::sort(&mut tracer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{NullSink, StepRecorder};

    /// Sink that cancels after a fixed number of steps.
    struct CancelAfter {
        remaining: usize,
        seen: usize,
    }

    impl StepSink for CancelAfter {
        fn emit(&mut self, _step: Step, _state: &[u32]) -> Result<(), Halt> {
            self.seen += 1;
            if self.remaining == 0 {
                return Err(Halt::Cancelled);
            }
            self.remaining -= 1;
            Ok(())
        }
    }

    #[test]
    fn parse_accepts_labels_and_short_names() {
        assert_eq!("Bubble Sort".parse::<Algorithm>(), Ok(Algorithm::Bubble));
        assert_eq!("quick".parse::<Algorithm>(), Ok(Algorithm::Quick));
        assert_eq!(" MERGE ".parse::<Algorithm>(), Ok(Algorithm::Merge));
        assert_eq!(
            "insertion sort".parse::<Algorithm>(),
            Ok(Algorithm::Insertion)
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "heap".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, SortError::InvalidConfiguration(_)));
    }

    #[test]
    fn display_uses_menu_label() {
        assert_eq!(Algorithm::Selection.to_string(), "Selection Sort");
    }

    #[test]
    fn every_algorithm_sorts_mixed_input() {
        for algorithm in Algorithm::ALL {
            let mut arr = SortArray::new(vec![9, 3, 7, 3, 0, 12, 5, 5, 1]);
            run(algorithm, &mut arr, &mut NullSink, SortOptions::default()).unwrap();
            assert_eq!(arr.as_slice(), &[0, 1, 3, 3, 5, 5, 7, 9, 12], "{algorithm}");
        }
    }

    #[test]
    fn empty_and_single_arrays_emit_nothing_harmful() {
        for algorithm in Algorithm::ALL {
            let mut empty = SortArray::new(vec![]);
            let mut rec = StepRecorder::new();
            run(algorithm, &mut empty, &mut rec, SortOptions::default()).unwrap();
            assert!(rec.steps().is_empty(), "{algorithm}");

            let mut one = SortArray::new(vec![42]);
            run(algorithm, &mut one, &mut NullSink, SortOptions::default()).unwrap();
            assert_eq!(one.as_slice(), &[42]);
        }
    }

    #[test]
    fn cancellation_stops_after_in_flight_mutation() {
        for algorithm in Algorithm::ALL {
            let mut arr = SortArray::new(vec![8, 7, 6, 5, 4, 3, 2, 1]);
            let mut sink = CancelAfter {
                remaining: 2,
                seen: 0,
            };
            let result = run(algorithm, &mut arr, &mut sink, SortOptions::default());
            assert_eq!(result, Err(Halt::Cancelled), "{algorithm}");
            assert_eq!(sink.seen, 3, "{algorithm}");
            assert_eq!(arr.len(), 8);
        }
    }

    #[test]
    fn compares_are_emitted_only_when_enabled() {
        let options = SortOptions {
            emit_compares: true,
            ..SortOptions::default()
        };
        for algorithm in [
            Algorithm::Bubble,
            Algorithm::Selection,
            Algorithm::Insertion,
            Algorithm::Quick,
        ] {
            let mut arr = SortArray::new(vec![3, 1, 2]);
            let mut rec = StepRecorder::new();
            run(algorithm, &mut arr, &mut rec, options).unwrap();
            assert!(rec.counts().compares > 0, "{algorithm}");

            let mut arr = SortArray::new(vec![3, 1, 2]);
            let mut rec = StepRecorder::new();
            run(algorithm, &mut arr, &mut rec, SortOptions::default()).unwrap();
            assert_eq!(rec.counts().compares, 0, "{algorithm}");
        }
    }

    #[test]
    fn delivered_state_matches_incremental_replay() {
        struct Check {
            state: Vec<u32>,
        }
        impl StepSink for Check {
            fn emit(&mut self, step: Step, state: &[u32]) -> Result<(), Halt> {
                step.apply(&mut self.state).unwrap();
                assert_eq!(self.state.as_slice(), state);
                Ok(())
            }
        }

        let input = vec![5, 1, 4, 1, 5, 9, 2, 6];
        for algorithm in Algorithm::ALL {
            let mut arr = SortArray::new(input.clone());
            let mut check = Check {
                state: input.clone(),
            };
            let options = SortOptions {
                emit_compares: true,
                suppress_self_swaps: false,
            };
            run(algorithm, &mut arr, &mut check, options).unwrap();
            assert_eq!(check.state, arr.snapshot());
        }
    }
}
