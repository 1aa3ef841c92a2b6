//! Select the minimum of the unsorted suffix, then one swap per position.
//!
//! The swap is emitted even when the minimum is already in place; set
//! `suppress_self_swaps` to drop those redundant steps.

use super::Tracer;
use crate::step::Halt;

pub(super) fn sort(t: &mut Tracer<'_>) -> Result<(), Halt> {
    let n = t.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            t.compare(j, min)?;
            if t.get(j)? < t.get(min)? {
                min = j;
            }
        }
        t.swap_unless_self(i, min)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::algorithms::{Algorithm, SortOptions, run};
    use crate::array::SortArray;
    use crate::step::{Step, StepRecorder};

    #[test]
    fn one_swap_per_outer_iteration() {
        let mut arr = SortArray::new(vec![3, 1, 2]);
        let mut rec = StepRecorder::new();
        run(Algorithm::Selection, &mut arr, &mut rec, SortOptions::default()).unwrap();
        assert_eq!(
            rec.steps(),
            &[Step::Swap { i: 0, j: 1 }, Step::Swap { i: 1, j: 2 }]
        );
        assert_eq!(arr.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn sorted_input_emits_only_self_swaps() {
        let mut arr = SortArray::new(vec![1, 2, 3, 4]);
        let mut rec = StepRecorder::new();
        run(Algorithm::Selection, &mut arr, &mut rec, SortOptions::default()).unwrap();
        assert_eq!(rec.steps().len(), 3);
        assert!(
            rec.steps()
                .iter()
                .all(|s| matches!(s, Step::Swap { i, j } if i == j))
        );
    }

    #[test]
    fn self_swaps_can_be_suppressed() {
        let options = SortOptions {
            suppress_self_swaps: true,
            ..SortOptions::default()
        };
        let mut arr = SortArray::new(vec![1, 2, 3, 4]);
        let mut rec = StepRecorder::new();
        run(Algorithm::Selection, &mut arr, &mut rec, options).unwrap();
        assert!(rec.steps().is_empty());
    }

    #[test]
    fn duplicates_keep_first_minimum() {
        let mut arr = SortArray::new(vec![2, 1, 1]);
        let mut rec = StepRecorder::new();
        run(Algorithm::Selection, &mut arr, &mut rec, SortOptions::default()).unwrap();
        assert_eq!(rec.steps()[0], Step::Swap { i: 0, j: 1 });
        assert_eq!(arr.as_slice(), &[1, 1, 2]);
    }
}
