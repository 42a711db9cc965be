//! IoU-threshold sweeps and per-image match-count summaries.
//!
//! Beyond the ranked precision/recall curves of [`crate::evaluator`], an
//! evaluation batch can be summarized as plain true/false-positive counts
//! at one IoU threshold, or swept across a grid of thresholds to see how
//! sensitive a detector is to the overlap requirement.

use std::collections::BTreeMap;

use crate::error::{QuadEvalError, Result};
use crate::matching::match_detections;
use crate::types::{ImageAnnotationSet, OrientedBox};

/// True/false-positive counts for one image at one IoU threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    /// Ground-truth boxes never claimed by any prediction.
    pub false_negatives: usize,
}

impl MatchCounts {
    /// TP / (TP + FP); 0.0 when there are no predictions.
    pub fn precision(&self) -> f64 {
        let predicted = self.true_positives + self.false_positives;
        if predicted == 0 {
            return 0.0;
        }
        self.true_positives as f64 / predicted as f64
    }

    /// TP / (TP + FN); 0.0 when there is no ground truth.
    pub fn recall(&self) -> f64 {
        let actual = self.true_positives + self.false_negatives;
        if actual == 0 {
            return 0.0;
        }
        self.true_positives as f64 / actual as f64
    }
}

/// Count true/false positives and false negatives for one image.
pub fn summarize_image(
    ground_truth: &[OrientedBox],
    predictions: &[OrientedBox],
    iou_threshold: f64,
) -> MatchCounts {
    let matches = match_detections(predictions, ground_truth, iou_threshold);
    let true_positives = matches.iter().filter(|m| m.is_true_positive).count();
    MatchCounts {
        true_positives,
        false_positives: matches.len() - true_positives,
        false_negatives: ground_truth.len() - true_positives,
    }
}

/// Per-image match counts at one threshold of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdSummary {
    pub threshold: f64,
    pub per_image: BTreeMap<String, MatchCounts>,
}

/// Summarize every scorable image of the set at each threshold.
///
/// Images with an empty side are skipped, matching the scoring policy of
/// [`crate::evaluator::evaluate`].
pub fn sweep_thresholds(set: &ImageAnnotationSet, thresholds: &[f64]) -> Vec<ThresholdSummary> {
    thresholds
        .iter()
        .map(|&threshold| {
            let mut per_image = BTreeMap::new();
            for (image_id, annotations) in set.iter() {
                if annotations.ground_truth.is_empty() || annotations.predicted.is_empty() {
                    continue;
                }
                per_image.insert(
                    image_id.clone(),
                    summarize_image(&annotations.ground_truth, &annotations.predicted, threshold),
                );
            }
            ThresholdSummary {
                threshold,
                per_image,
            }
        })
        .collect()
}

/// Generate an evenly spaced grid of threshold values.
///
/// # Errors
///
/// Returns an error when `steps` is zero, either bound is outside
/// `[0, 1]`, or `start > end`.
///
/// # Example
///
/// ```
/// use quad_eval::threshold::threshold_range;
///
/// let thresholds = threshold_range(0.0, 1.0, 11).unwrap();
/// assert_eq!(thresholds.len(), 11);
/// assert_eq!(thresholds[0], 0.0);
/// assert_eq!(thresholds[10], 1.0);
/// ```
pub fn threshold_range(start: f64, end: f64, steps: usize) -> Result<Vec<f64>> {
    if steps == 0 {
        return Err(QuadEvalError::InvalidThreshold(
            "number of steps must be greater than 0".to_string(),
        ));
    }
    for bound in [start, end] {
        if !(0.0..=1.0).contains(&bound) {
            return Err(QuadEvalError::InvalidThreshold(format!(
                "threshold must be between 0.0 and 1.0, got {bound}"
            )));
        }
    }
    if start > end {
        return Err(QuadEvalError::InvalidThreshold(format!(
            "start threshold ({start}) must be <= end threshold ({end})"
        )));
    }
    if steps == 1 {
        return Ok(vec![start]);
    }

    let step_size = (end - start) / (steps - 1) as f64;
    Ok((0..steps).map(|i| start + step_size * i as f64).collect())
}
