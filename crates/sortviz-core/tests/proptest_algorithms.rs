//! Property-based tests for the instrumented sorts.
//!
//! Uses proptest to generate arbitrary bar-height arrays, then verifies that
//! every algorithm sorts them, that the emitted steps reproduce the run, and
//! that step counts stay within each algorithm's bounds.

use proptest::prelude::*;
use sortviz_core::algorithms::{Algorithm, SortOptions};
use sortviz_core::replay::{record, replay_and_verify};
use sortviz_core::step::Step;
use sortviz_core::test_utils::*;
use sortviz_core::{SimRng, SortArray, ValueRange, generate_random_array};

// ===========================================================================
// Generators
// ===========================================================================

fn arb_values(max_len: usize) -> impl Strategy<Value = Vec<u32>> {
    // A narrow value range makes duplicates common.
    prop_oneof![
        proptest::collection::vec(0..600u32, 0..=max_len),
        proptest::collection::vec(0..4u32, 0..=max_len),
    ]
}

fn arb_algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

fn arb_options() -> impl Strategy<Value = SortOptions> {
    (any::<bool>(), any::<bool>()).prop_map(|(emit_compares, suppress_self_swaps)| SortOptions {
        emit_compares,
        suppress_self_swaps,
    })
}

/// Total writebacks of a top-down merge sort over `[left, right]`.
fn merge_writebacks(left: usize, right: usize) -> u64 {
    if left >= right {
        return 0;
    }
    let mid = (left + right) / 2;
    merge_writebacks(left, mid) + merge_writebacks(mid + 1, right) + (right - left + 1) as u64
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Completed runs produce a non-decreasing permutation of the input.
    #[test]
    fn sorts_to_permutation(values in arb_values(40), algorithm in arb_algorithm(), options in arb_options()) {
        let (array, _) = run_recorded(algorithm, &values, options);
        prop_assert!(array.is_sorted());
        prop_assert_eq!(array.len(), values.len());
        prop_assert!(same_multiset(array.as_slice(), &values));
    }

    /// Replaying the recorded steps from the input reproduces the final array.
    #[test]
    fn steps_replay_to_final_state(values in arb_values(30), algorithm in arb_algorithm(), options in arb_options()) {
        let input = SortArray::new(values);
        let log = record(algorithm, &input, options, 7).unwrap();
        let result = replay_and_verify(&log).unwrap();
        prop_assert!(result.is_verified);
        prop_assert!(result.is_sorted());

        let (array, _) = run_recorded(algorithm, input.as_slice(), options);
        prop_assert_eq!(result.final_state, array.into_inner());
    }

    /// Mutation counts respect each algorithm's bound.
    #[test]
    fn step_count_bounds(values in arb_values(40)) {
        let n = values.len() as u64;
        let quadratic = n * n.saturating_sub(1) / 2;
        let options = SortOptions::default();

        let (_, bubble) = run_recorded(Algorithm::Bubble, &values, options);
        prop_assert!(bubble.counts().mutations() <= quadratic);

        let (_, selection) = run_recorded(Algorithm::Selection, &values, options);
        prop_assert_eq!(selection.counts().swaps, n.saturating_sub(1));

        let (_, insertion) = run_recorded(Algorithm::Insertion, &values, options);
        prop_assert!(insertion.counts().overwrites <= quadratic + n.saturating_sub(1));

        let (_, merge) = run_recorded(Algorithm::Merge, &values, options);
        let expected = if values.is_empty() { 0 } else { merge_writebacks(0, values.len() - 1) };
        prop_assert_eq!(merge.counts().overwrites, expected);

        let (_, quick) = run_recorded(Algorithm::Quick, &values, options);
        prop_assert_eq!(quick.counts().overwrites, 0);
        prop_assert!(quick.counts().swaps <= quadratic + n);
    }

    /// Sorted input never changes content, and bubble sort emits nothing.
    #[test]
    fn sorted_input_is_stable_content(mut values in arb_values(30), algorithm in arb_algorithm()) {
        values.sort_unstable();
        let (array, rec) = run_recorded(algorithm, &values, SortOptions::default());
        prop_assert_eq!(array.as_slice(), values.as_slice());
        let mut state = values.clone();
        for step in rec.steps() {
            prop_assert!(step.is_noop_on(&state));
            step.apply(&mut state).unwrap();
        }
        if algorithm == Algorithm::Bubble {
            prop_assert!(rec.steps().is_empty());
        }
    }

    /// Steps only ever reference in-range indices.
    #[test]
    fn steps_stay_in_bounds(values in arb_values(30), algorithm in arb_algorithm(), options in arb_options()) {
        let n = values.len();
        let (_, rec) = run_recorded(algorithm, &values, options);
        for step in rec.steps() {
            let in_range = match *step {
                Step::Compare { i, j } | Step::Swap { i, j } => i < n && j < n,
                Step::Overwrite { index, .. } => index < n,
            };
            prop_assert!(in_range);
        }
    }

    /// Generated arrays honor size and range for any seed.
    #[test]
    fn generated_arrays_in_range(seed in any::<u64>(), size in 1..64usize, min in 0..1000u32, span in 0..1000u32) {
        let range = ValueRange::new(min, min + span).unwrap();
        let array = generate_random_array(size, range, &mut SimRng::new(seed)).unwrap();
        prop_assert_eq!(array.len(), size);
        prop_assert!(array.as_slice().iter().all(|&v| range.contains(v)));
    }
}
