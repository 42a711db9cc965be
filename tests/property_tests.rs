//! Property-based tests using proptest
//!
//! These tests verify mathematical properties and invariants that should
//! always hold regardless of the input values.

use proptest::prelude::*;
use quad_eval::matching::match_detections;
use quad_eval::metrics::{average_precision, box_iou, cumulative_curve, mean_average_precision};
use quad_eval::types::OrientedBox;

fn square(x: f64, y: f64, side: f64) -> OrientedBox {
    OrientedBox::new([x, y, x + side, y, x + side, y + side, x, y + side])
}

// Strategy: axis-aligned squares with positive side length, so polygons
// stay convex and non-degenerate.
fn square_strategy() -> impl Strategy<Value = OrientedBox> {
    (0.0f64..200.0, 0.0f64..200.0, 1.0f64..50.0).prop_map(|(x, y, side)| square(x, y, side))
}

proptest! {
    // Property: IoU is bounded and symmetric
    #[test]
    fn prop_iou_range_and_symmetry(a in square_strategy(), b in square_strategy()) {
        let ab = box_iou(&a, &b);
        let ba = box_iou(&b, &a);
        prop_assert!((0.0..=1.0 + 1e-9).contains(&ab), "IoU out of range: {ab}");
        prop_assert!((ab - ba).abs() < 1e-9, "IoU not symmetric: {ab} vs {ba}");
    }

    // Property: a box overlaps itself perfectly
    #[test]
    fn prop_iou_identity(a in square_strategy()) {
        let iou = box_iou(&a, &a);
        prop_assert!((iou - 1.0).abs() < 1e-6, "self-IoU should be 1.0, got {iou}");
    }
}

proptest! {
    // Property: recall is non-decreasing, precision stays in [0, 1]
    #[test]
    fn prop_cumulative_curve_bounds(
        flags in proptest::collection::vec(any::<bool>(), 0..50),
        gt_count in 1usize..50
    ) {
        let (precision, recall) = cumulative_curve(&flags, gt_count);
        prop_assert_eq!(precision.len(), flags.len());
        for p in &precision {
            prop_assert!((0.0..=1.0).contains(p));
        }
        for pair in recall.windows(2) {
            prop_assert!(pair[1] >= pair[0], "recall decreased: {:?}", recall);
        }
    }

    // Property: AP derived from any cumulative curve is in [0, 1]
    #[test]
    fn prop_ap_range(
        flags in proptest::collection::vec(any::<bool>(), 0..50),
        gt_count in 1usize..50
    ) {
        let (precision, recall) = cumulative_curve(&flags, gt_count);
        let ap = average_precision(&precision, &recall);
        prop_assert!((0.0..=1.0 + 1e-9).contains(&ap), "AP out of range: {ap}");
    }

    // Property: scoring the same curve twice gives the same AP
    #[test]
    fn prop_ap_deterministic(
        flags in proptest::collection::vec(any::<bool>(), 0..30),
        gt_count in 1usize..30
    ) {
        let (precision, recall) = cumulative_curve(&flags, gt_count);
        prop_assert_eq!(
            average_precision(&precision, &recall),
            average_precision(&precision, &recall)
        );
    }

    // Property: mAP of identical values is that value
    #[test]
    fn prop_map_of_constant(ap in 0.0f64..=1.0, count in 1usize..20) {
        let values = vec![ap; count];
        let map = mean_average_precision(&values);
        prop_assert!((map - ap).abs() < 1e-9);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Property: greedy claim invariant. No two predictions are credited
    // against the same ground-truth box, and the number of true positives
    // never exceeds min(|ground_truth|, |predictions|).
    #[test]
    fn prop_no_double_claims(
        gts in proptest::collection::vec(square_strategy(), 1..8),
        preds in proptest::collection::vec(square_strategy(), 1..8),
        threshold in 0.1f64..0.9
    ) {
        let matches = match_detections(&preds, &gts, threshold);
        prop_assert_eq!(matches.len(), preds.len());

        let claimed: Vec<usize> = matches
            .iter()
            .filter(|m| m.is_true_positive)
            .map(|m| m.ground_truth_index.unwrap())
            .collect();
        let mut deduped = claimed.clone();
        deduped.sort_unstable();
        deduped.dedup();
        prop_assert_eq!(claimed.len(), deduped.len(), "a ground-truth box was claimed twice");
        prop_assert!(claimed.len() <= gts.len().min(preds.len()));
    }

    // Property: true positives only ever shrink as the threshold rises
    #[test]
    fn prop_tp_monotone_in_threshold(
        gts in proptest::collection::vec(square_strategy(), 1..6),
        preds in proptest::collection::vec(square_strategy(), 1..6),
    ) {
        let tp_at = |threshold: f64| {
            match_detections(&preds, &gts, threshold)
                .iter()
                .filter(|m| m.is_true_positive)
                .count()
        };
        prop_assert!(tp_at(0.3) >= tp_at(0.6));
        prop_assert!(tp_at(0.6) >= tp_at(0.9));
    }
}
