//! Plain-text bar rendering for delivered frames.
//!
//! Each bar is one line, its length proportional to the value relative to the
//! tallest bar. Indices touched by the current step are marked.

use std::fmt::Write as _;

use sortviz_core::{Step, StepKind};

/// Widest bar, in characters.
pub const DEFAULT_WIDTH: usize = 48;

/// Indices a step touches, in order.
pub fn touched(step: &Step) -> Vec<usize> {
    match *step {
        Step::Compare { i, j } | Step::Swap { i, j } if i == j => vec![i],
        Step::Compare { i, j } | Step::Swap { i, j } => vec![i, j],
        Step::Overwrite { index, .. } => vec![index],
    }
}

/// Length of the bar for `value` when `max` fills `width`. Non-zero values
/// get at least one cell unless `width` is 0.
pub fn bar_len(value: u32, max: u32, width: usize) -> usize {
    if value == 0 || max == 0 || width == 0 {
        return 0;
    }
    let scaled = (u64::from(value) * width as u64).div_ceil(u64::from(max));
    (scaled as usize).clamp(1, width)
}

/// Render `state` as horizontal bars, marking `highlight` with `marker`.
pub fn render_bars(state: &[u32], highlight: &[usize], marker: char, width: usize) -> String {
    let max = state.iter().copied().max().unwrap_or(0);
    let label = max.to_string().len();
    let mut out = String::new();
    for (index, &value) in state.iter().enumerate() {
        let fill = if highlight.contains(&index) { marker } else { '#' };
        let bar: String = std::iter::repeat_n(fill, bar_len(value, max, width)).collect();
        let _ = writeln!(out, "{value:>label$} |{bar}");
    }
    out
}

/// Header line plus bars for one delivered step.
pub fn render_frame(seq: u64, step: &Step, state: &[u32], width: usize) -> String {
    let marker = match step.kind() {
        StepKind::Compare => '?',
        StepKind::Swap => '*',
        StepKind::Overwrite => '+',
    };
    let mut out = format!("step {seq}: {}\n", describe(step));
    out.push_str(&render_bars(state, &touched(step), marker, width));
    out
}

fn describe(step: &Step) -> String {
    match *step {
        Step::Compare { i, j } => format!("compare {i} and {j}"),
        Step::Swap { i, j } => format!("swap {i} and {j}"),
        Step::Overwrite { index, value } => format!("write {value} at {index}"),
    }
}
