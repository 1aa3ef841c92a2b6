//! Shift larger predecessors right one slot at a time, then drop the key in.

use super::Tracer;
use crate::step::Halt;

pub(super) fn sort(t: &mut Tracer<'_>) -> Result<(), Halt> {
    for i in 1..t.len() {
        let key = t.get(i)?;
        // `hole` is the slot the key would occupy if placed now.
        let mut hole = i;
        while hole > 0 {
            t.compare(hole - 1, hole)?;
            let prev = t.get(hole - 1)?;
            if prev <= key {
                break;
            }
            t.overwrite(hole, prev)?;
            hole -= 1;
        }
        t.overwrite(hole, key)?;
    }
    Ok(())
}
