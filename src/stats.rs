//! Statistics tracking for batch annotation ingestion.

use serde::{Deserialize, Serialize};

/// Counters collected while a batch of annotation files is parsed and
/// aggregated.
///
/// Files that fail to parse are tolerated at the batch level (logged and
/// skipped) but still need to be visible to the caller; these counters are
/// how that surfaces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchStats {
    /// Ground-truth files successfully parsed.
    pub ground_truth_files: usize,
    /// Prediction files successfully parsed.
    pub prediction_files: usize,
    /// Files rejected for an unrecognized filename or a malformed line.
    pub rejected_files: usize,
    /// Total ground-truth boxes across all parsed files.
    pub ground_truth_boxes: usize,
    /// Total predicted boxes across all parsed files.
    pub predicted_boxes: usize,
}

impl BatchStats {
    /// Create a new `BatchStats` with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a parsed ground-truth file and its box count.
    pub fn add_ground_truth_file(&mut self, boxes: usize) {
        self.ground_truth_files += 1;
        self.ground_truth_boxes += boxes;
    }

    /// Record a parsed prediction file and its box count.
    pub fn add_prediction_file(&mut self, boxes: usize) {
        self.prediction_files += 1;
        self.predicted_boxes += boxes;
    }

    /// Record a file that failed to parse and was skipped.
    pub fn reject_file(&mut self) {
        self.rejected_files += 1;
    }

    /// Total number of files seen, parsed or rejected.
    pub fn total_files(&self) -> usize {
        self.ground_truth_files + self.prediction_files + self.rejected_files
    }

    /// Get a one-line summary of the counters.
    pub fn summary_string(&self) -> String {
        format!(
            "BatchStats {{ gt_files: {}, pred_files: {}, rejected: {}, gt_boxes: {}, pred_boxes: {} }}",
            self.ground_truth_files,
            self.prediction_files,
            self.rejected_files,
            self.ground_truth_boxes,
            self.predicted_boxes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        let stats = BatchStats::new();
        assert_eq!(stats.total_files(), 0);
        assert_eq!(stats.ground_truth_boxes, 0);
    }

    #[test]
    fn test_counters_accumulate() {
        let mut stats = BatchStats::new();
        stats.add_ground_truth_file(3);
        stats.add_ground_truth_file(2);
        stats.add_prediction_file(4);
        stats.reject_file();

        assert_eq!(stats.ground_truth_files, 2);
        assert_eq!(stats.ground_truth_boxes, 5);
        assert_eq!(stats.prediction_files, 1);
        assert_eq!(stats.predicted_boxes, 4);
        assert_eq!(stats.rejected_files, 1);
        assert_eq!(stats.total_files(), 4);
    }

    #[test]
    fn test_summary_string() {
        let mut stats = BatchStats::new();
        stats.add_prediction_file(7);
        let summary = stats.summary_string();
        assert!(summary.contains("pred_files: 1"));
        assert!(summary.contains("pred_boxes: 7"));
    }
}
