//! Detection matching for evaluating predictions against ground truth.

use std::collections::HashSet;

use crate::metrics::iou::polygon_iou;
use crate::types::OrientedBox;

/// One prediction's match outcome against the ground truth of its image.
#[derive(Debug, Clone)]
pub struct Match {
    /// Index of the prediction in the input slice.
    pub prediction_index: usize,
    /// Index of the best-overlapping ground-truth box, if any overlap exists.
    pub ground_truth_index: Option<usize>,
    /// IoU against that best-overlapping box.
    pub iou: f64,
    /// Whether the prediction claimed its ground-truth box.
    pub is_true_positive: bool,
    /// Confidence used for ranking (1.0 when the box carries no score).
    pub confidence: f64,
}

/// Rank predictions for scoring: descending by confidence, stable so that
/// file order is preserved when no confidence is modeled.
pub fn rank_predictions(predictions: &[OrientedBox]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..predictions.len()).collect();
    indices.sort_by(|&a, &b| {
        predictions[b]
            .confidence()
            .partial_cmp(&predictions[a].confidence())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indices
}

/// Match predictions to ground-truth boxes for a single image.
///
/// Predictions are visited in rank order. Each prediction is compared, by
/// polygon IoU, against **every** ground-truth box of the image; the best
/// match is the one with maximal IoU, ties broken by lowest ground-truth
/// index. The prediction is a true positive only when that best IoU reaches
/// `iou_threshold` and the best box has not already been claimed by an
/// earlier prediction. A prediction whose best match is already claimed is
/// a false positive even if its second-best candidate would clear the
/// threshold; it does not fall back.
///
/// Predicted vertex order is reversed (keeping the first vertex) before
/// polygon construction to correct the winding mismatch between the two
/// annotation sources.
///
/// Claim tracking is a set of ground-truth indices local to this call; a
/// ground-truth box never claimed by any prediction is an implicit false
/// negative.
///
/// # Returns
///
/// One [`Match`] per prediction, in rank order.
pub fn match_detections(
    predictions: &[OrientedBox],
    ground_truths: &[OrientedBox],
    iou_threshold: f64,
) -> Vec<Match> {
    let gt_polygons: Vec<_> = ground_truths.iter().map(|g| g.to_polygon()).collect();

    let mut claimed: HashSet<usize> = HashSet::new();
    let mut matches = Vec::with_capacity(predictions.len());

    for pred_index in rank_predictions(predictions) {
        let pred = &predictions[pred_index];
        let pred_polygon = pred.reverse_winding().to_polygon();

        let mut best_iou = 0.0;
        let mut best_gt: Option<usize> = None;
        for (gt_index, gt_polygon) in gt_polygons.iter().enumerate() {
            let iou = polygon_iou(&pred_polygon, gt_polygon);
            if iou > best_iou {
                best_iou = iou;
                best_gt = Some(gt_index);
            }
        }

        let is_true_positive = match best_gt {
            Some(gt_index) if best_iou >= iou_threshold => claimed.insert(gt_index),
            _ => false,
        };

        matches.push(Match {
            prediction_index: pred_index,
            ground_truth_index: best_gt,
            iou: best_iou,
            is_true_positive,
            confidence: pred.confidence(),
        });
    }

    matches
}
