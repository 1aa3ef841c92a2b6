//! Adjacent-pair passes; each pass shrinks the unsorted prefix by one.

use super::Tracer;
use crate::step::Halt;

pub(super) fn sort(t: &mut Tracer<'_>) -> Result<(), Halt> {
    let n = t.len();
    for pass in 0..n.saturating_sub(1) {
        for j in 0..n - 1 - pass {
            t.compare(j, j + 1)?;
            if t.get(j)? > t.get(j + 1)? {
                t.swap(j, j + 1)?;
            }
        }
    }
    Ok(())
}
