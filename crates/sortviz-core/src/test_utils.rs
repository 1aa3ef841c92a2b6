//! Shared test helpers for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use std::sync::mpsc;
use std::time::Duration;

use crate::algorithms::{self, Algorithm, SortOptions};
use crate::array::SortArray;
use crate::config::EngineConfig;
use crate::id::RunId;
use crate::scheduler::{RunEvent, RunOutcome};
use crate::step::StepRecorder;

// ===========================================================================
// Array constructors
// ===========================================================================

pub fn ascending(n: u32) -> SortArray {
    SortArray::new((1..=n).collect())
}

pub fn descending(n: u32) -> SortArray {
    SortArray::new((1..=n).rev().collect())
}

pub fn constant(n: usize, value: u32) -> SortArray {
    SortArray::new(vec![value; n])
}

// ===========================================================================
// Config
// ===========================================================================

/// Default config with no pacing and a fixed seed.
pub fn fast_config(seed: u64) -> EngineConfig {
    EngineConfig {
        step_interval_ms: 0,
        seed: Some(seed),
        ..EngineConfig::default()
    }
}

/// Fixed seed with a pacing interval long enough to cancel mid-run.
pub fn slow_config(seed: u64, interval_ms: u64) -> EngineConfig {
    EngineConfig {
        step_interval_ms: interval_ms,
        seed: Some(seed),
        ..EngineConfig::default()
    }
}

// ===========================================================================
// Running
// ===========================================================================

/// Sort a copy of `input` synchronously and return the sorted array plus
/// every recorded step.
pub fn run_recorded(
    algorithm: Algorithm,
    input: &[u32],
    options: SortOptions,
) -> (SortArray, StepRecorder) {
    let mut array = SortArray::new(input.to_vec());
    let mut recorder = StepRecorder::new();
    algorithms::run(algorithm, &mut array, &mut recorder, options)
        .expect("recording sink never halts");
    (array, recorder)
}

/// Whether `a` and `b` hold the same multiset of values.
pub fn same_multiset(a: &[u32], b: &[u32]) -> bool {
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

// ===========================================================================
// Event collection
// ===========================================================================

/// Drain events until `run` finishes, or until `timeout` passes without one.
pub fn collect_until_finished(
    rx: &mpsc::Receiver<RunEvent>,
    run: RunId,
    timeout: Duration,
) -> Vec<RunEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.recv_timeout(timeout) {
        let done = matches!(&event, RunEvent::Finished { run: r, .. } if *r == run);
        events.push(event);
        if done {
            break;
        }
    }
    events
}

/// The outcome carried by the last `Finished` event for `run`, if any.
pub fn finished_outcome(events: &[RunEvent], run: RunId) -> Option<RunOutcome> {
    events.iter().rev().find_map(|event| match event {
        RunEvent::Finished {
            run: r, outcome, ..
        } if *r == run => Some(outcome.clone()),
        _ => None,
    })
}
