//! Per-image scoring and batch evaluation.

use crate::matching::match_detections;
use crate::metrics::ap::{average_precision, mean_average_precision};
use crate::metrics::precision_recall::cumulative_curve;
use crate::types::{EvalConfig, ImageAnnotationSet, MatchResult, OrientedBox, ScoreReport};

/// Score one image: match predictions to ground truth, build the cumulative
/// precision/recall curve, and integrate it into an average precision.
///
/// The caller is expected to have ruled out empty sides; with an empty
/// ground-truth or prediction list the result is a degenerate curve, not an
/// error.
pub fn score_image(
    ground_truth: &[OrientedBox],
    predictions: &[OrientedBox],
    iou_threshold: f64,
) -> MatchResult {
    let matches = match_detections(predictions, ground_truth, iou_threshold);
    let flags: Vec<bool> = matches.iter().map(|m| m.is_true_positive).collect();
    let (precision, recall) = cumulative_curve(&flags, ground_truth.len());
    let average_precision = average_precision(&precision, &recall);
    MatchResult {
        precision,
        recall,
        average_precision,
    }
}

/// Evaluate a whole annotation set into a [`ScoreReport`].
///
/// Images with zero ground-truth boxes or zero predicted boxes are skipped
/// entirely: they are neither scored nor counted in the mAP denominator.
/// This is a deliberate policy, not an oversight.
///
/// Scoring is deterministic given the set and config; images are visited in
/// sorted id order and no state is shared between them.
pub fn evaluate(set: &ImageAnnotationSet, config: &EvalConfig) -> ScoreReport {
    let mut report = ScoreReport::default();

    for (image_id, annotations) in set.iter() {
        if annotations.ground_truth.is_empty() || annotations.predicted.is_empty() {
            log::debug!(
                "skipping {image_id}: {} ground-truth boxes, {} predictions",
                annotations.ground_truth.len(),
                annotations.predicted.len()
            );
            continue;
        }

        log::debug!(
            "scoring {image_id}: {} ground-truth boxes, {} predictions",
            annotations.ground_truth.len(),
            annotations.predicted.len()
        );
        let result = score_image(
            &annotations.ground_truth,
            &annotations.predicted,
            config.iou_threshold,
        );
        report.per_image.insert(image_id.clone(), result);
    }

    let aps: Vec<f64> = report
        .per_image
        .values()
        .map(|r| r.average_precision)
        .collect();
    report.mean_average_precision = mean_average_precision(&aps);
    report
}
