//! Drive one run through the controller and print every delivered frame.

use std::io::Write;

use sortviz_core::{Algorithm, RunController, RunEvent, RunReport};

use crate::error::DemoError;
use crate::render::{render_bars, render_frame};

/// Sort the controller's current array with `algorithm`, writing the starting
/// bars, each delivered frame, and a summary line to `out`. A run already in
/// flight is stopped first and its array picked up where it left off.
pub fn play<W: Write>(
    ctl: &mut RunController,
    algorithm: Algorithm,
    out: &mut W,
    width: usize,
) -> Result<RunReport, DemoError> {
    if let Some(report) = ctl.stop() {
        tracing::debug!(run = %report.run, outcome = ?report.outcome, "stopped previous run");
    }
    let rx = ctl.subscribe();
    let interval = ctl.config().step_interval_ms;
    if let Some(array) = ctl.array() {
        writeln!(
            out,
            "{algorithm} over {} bars, {interval} ms per step",
            array.len()
        )?;
        out.write_all(render_bars(array.as_slice(), &[], '#', width).as_bytes())?;
    }

    let handle = ctl.change_algorithm(algorithm)?;
    tracing::debug!(run = %handle.id(), %algorithm, "playing run");

    for event in rx.iter() {
        match event {
            RunEvent::Step {
                run,
                seq,
                step,
                state,
            } if run == handle.id() => {
                writeln!(out)?;
                out.write_all(render_frame(seq, &step, &state, width).as_bytes())?;
                out.flush()?;
            }
            RunEvent::Finished {
                run,
                outcome,
                counts,
            } if run == handle.id() => {
                writeln!(
                    out,
                    "\n{algorithm}: {outcome:?} after {} steps ({} compares, {} swaps, {} overwrites)",
                    counts.total(),
                    counts.compares,
                    counts.swaps,
                    counts.overwrites
                )?;
                break;
            }
            _ => {}
        }
    }

    ctl.unsubscribe();
    ctl.wait().ok_or(DemoError::NoActiveRun)
}
