//! Top-down merge sort with left/right scratch buffers.
//!
//! Every element written back into the array is one `Overwrite`, in strict
//! left-to-right destination order. Ties take from the left buffer. Both
//! operands of a merge comparison live in scratch buffers, so merge sort
//! never emits `Compare` steps.

use super::Tracer;
use crate::step::Halt;

pub(super) fn sort(t: &mut Tracer<'_>) -> Result<(), Halt> {
    if t.len() > 1 {
        split(t, 0, t.len() - 1)?;
    }
    Ok(())
}

fn split(t: &mut Tracer<'_>, left: usize, right: usize) -> Result<(), Halt> {
    if left < right {
        let mid = (left + right) / 2;
        split(t, left, mid)?;
        split(t, mid + 1, right)?;
        merge(t, left, mid, right)?;
    }
    Ok(())
}

fn merge(t: &mut Tracer<'_>, left: usize, mid: usize, right: usize) -> Result<(), Halt> {
    let lo = (left..=mid).map(|i| t.get(i)).collect::<Result<Vec<_>, _>>()?;
    let hi = (mid + 1..=right)
        .map(|i| t.get(i))
        .collect::<Result<Vec<_>, _>>()?;

    let (mut a, mut b) = (0, 0);
    for dest in left..=right {
        let take_left = match (lo.get(a), hi.get(b)) {
            (Some(x), Some(y)) => x <= y,
            (Some(_), None) => true,
            _ => false,
        };
        let value = if take_left {
            a += 1;
            lo[a - 1]
        } else {
            b += 1;
            hi[b - 1]
        };
        t.overwrite(dest, value)?;
    }
    Ok(())
}
