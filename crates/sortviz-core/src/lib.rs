//! Sortviz Core -- the sort-step engine behind the sorting visualizer.
//!
//! Runs classic comparison sorts over a small array of bar heights and turns
//! every observable mutation into a [`step::Step`], delivered in order and at
//! a paced rate to whoever is rendering.
//!
//! # Run Pipeline
//!
//! 1. **Generate** -- [`rng::generate_random_array`] draws bar heights.
//! 2. **Start** -- [`controller::RunController::start_run`] cancels and joins
//!    any prior run, then moves the array onto a fresh worker thread.
//! 3. **Sort** -- the chosen algorithm mutates the array through a
//!    [`algorithms::Tracer`], which emits one step per mutation.
//! 4. **Pace** -- [`scheduler::PacedSink`] forwards each step to the
//!    subscriber channel and waits out the pacing interval, watching for
//!    cancellation.
//! 5. **Finish** -- a terminal [`scheduler::RunEvent::Finished`] follows the
//!    last step, and the array returns to the controller.
//!
//! # Key Types
//!
//! - [`array::SortArray`] -- fixed-length buffer with swap/overwrite primitives.
//! - [`algorithms::Algorithm`] -- Bubble, Selection, Insertion, Merge, Quick.
//! - [`step::StepSink`] -- capability to receive steps; recorders, pacers,
//!   and test sinks all implement it.
//! - [`controller::RunController`] -- single owner of the array and the
//!   active run.
//! - [`replay::StepLog`] -- recorded run that reproduces every frame.
//! - [`config::EngineConfig`] -- array size, value range, pacing, seed.

pub mod algorithms;
pub mod array;
pub mod config;
pub mod controller;
pub mod error;
pub mod id;
pub mod replay;
pub mod rng;
pub mod scheduler;
pub mod step;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use algorithms::{Algorithm, SortOptions};
pub use array::SortArray;
pub use config::{ConfigError, EngineConfig};
pub use controller::{RunController, RunHandle, RunReport, RunState};
pub use error::SortError;
pub use id::RunId;
pub use rng::{SimRng, ValueRange, generate_random_array};
pub use scheduler::{RunEvent, RunOutcome};
pub use step::{Step, StepCounts, StepKind, StepSink};
