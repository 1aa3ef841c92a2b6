//! Lomuto partition quick sort with the last element as pivot.

use super::Tracer;
use crate::step::Halt;

pub(super) fn sort(t: &mut Tracer<'_>) -> Result<(), Halt> {
    if t.len() > 1 {
        quick(t, 0, t.len() - 1)?;
    }
    Ok(())
}

fn quick(t: &mut Tracer<'_>, low: usize, high: usize) -> Result<(), Halt> {
    if low < high {
        let pi = partition(t, low, high)?;
        if pi > low {
            quick(t, low, pi - 1)?;
        }
        quick(t, pi + 1, high)?;
    }
    Ok(())
}

/// Returns the pivot's final index. Every exchange is emitted, including the
/// pivot placement.
fn partition(t: &mut Tracer<'_>, low: usize, high: usize) -> Result<usize, Halt> {
    let pivot = t.get(high)?;
    // Next slot for an element smaller than the pivot.
    let mut store = low;
    for j in low..high {
        t.compare(j, high)?;
        if t.get(j)? < pivot {
            t.swap_unless_self(store, j)?;
            store += 1;
        }
    }
    t.swap_unless_self(store, high)?;
    Ok(store)
}
