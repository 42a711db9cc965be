//! Average Precision (AP) and mean Average Precision (mAP) calculation.

/// Calculate Average Precision from a precision-recall curve using the
/// interpolated monotone-envelope method.
///
/// The recall sequence is padded with 0 in front and 1 at the back (the
/// precision sequence with 0 on both ends), the precision envelope is made
/// non-increasing by a backward maximum sweep, and the area is summed as
/// `(recall[i] - recall[i-1]) * precision[i]` over the indices where recall
/// changes. The boundary padding is part of the definition and is required
/// to match reference outputs.
///
/// # Example
///
/// ```
/// use quad_eval::metrics::ap::average_precision;
///
/// // A single correct prediction covering the only ground-truth box.
/// let ap = average_precision(&[1.0], &[1.0]);
/// assert!((ap - 1.0).abs() < 1e-9);
/// ```
pub fn average_precision(precision: &[f64], recall: &[f64]) -> f64 {
    debug_assert_eq!(precision.len(), recall.len());
    if precision.is_empty() {
        return 0.0;
    }

    let mut mrec = Vec::with_capacity(recall.len() + 2);
    mrec.push(0.0);
    mrec.extend_from_slice(recall);
    mrec.push(1.0);

    let mut mpre = Vec::with_capacity(precision.len() + 2);
    mpre.push(0.0);
    mpre.extend_from_slice(precision);
    mpre.push(0.0);

    // Monotone envelope: precision never increases as recall grows.
    for i in (0..mpre.len() - 1).rev() {
        mpre[i] = mpre[i].max(mpre[i + 1]);
    }

    let mut ap = 0.0;
    for i in 1..mrec.len() {
        if mrec[i] != mrec[i - 1] {
            ap += (mrec[i] - mrec[i - 1]) * mpre[i];
        }
    }
    ap
}

/// Mean Average Precision: the arithmetic mean of per-image AP values.
///
/// Returns 0.0 for an empty slice (no image qualified for scoring).
pub fn mean_average_precision(average_precisions: &[f64]) -> f64 {
    if average_precisions.is_empty() {
        return 0.0;
    }
    average_precisions.iter().sum::<f64>() / average_precisions.len() as f64
}
