//! Rendering of score reports to text, JSON, and precision-recall curves.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::threshold::ThresholdSummary;
use crate::types::{EvalConfig, ScoreReport};

/// External collaborator that draws one precision-recall curve.
///
/// The engine computes the arrays and the average precision; how they are
/// plotted (and whether at all) is up to the embedding application.
pub trait CurveRenderer {
    fn render_curve(
        &self,
        precision: &[f64],
        recall: &[f64],
        average_precision: f64,
        label: &str,
        output: &Path,
    ) -> Result<()>;
}

/// Render the report to the evaluation text format: the overall mAP on the
/// first line, then one line per scored image.
///
/// # Example
///
/// ```
/// use quad_eval::report::format_report;
/// use quad_eval::types::{MatchResult, ScoreReport};
///
/// let mut report = ScoreReport::default();
/// report.per_image.insert(
///     "sheet-1".to_string(),
///     MatchResult { precision: vec![1.0], recall: vec![1.0], average_precision: 1.0 },
/// );
/// report.mean_average_precision = 1.0;
///
/// let text = format_report(&report);
/// assert_eq!(
///     text,
///     "Mean Average Precision=1.00000\nsheet-1: Average Precision=1.00000\n"
/// );
/// ```
pub fn format_report(report: &ScoreReport) -> String {
    let mut out = format!(
        "Mean Average Precision={:.5}\n",
        report.mean_average_precision
    );
    for (image_id, result) in &report.per_image {
        out.push_str(&format!(
            "{image_id}: Average Precision={:.5}\n",
            result.average_precision
        ));
    }
    out
}

/// Write the text report to a file.
pub fn write_report<P: AsRef<Path>>(report: &ScoreReport, path: P) -> Result<()> {
    fs::write(path, format_report(report))?;
    Ok(())
}

/// Serialize the full report, per-image curves included, to JSON.
pub fn report_to_json(report: &ScoreReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render a per-threshold match-count summary, one block per threshold.
pub fn format_threshold_report(summaries: &[ThresholdSummary]) -> String {
    let mut out = String::new();
    for summary in summaries {
        out.push_str(&format!("Considering Threshold: {:.1}\n", summary.threshold));
        for (image_id, counts) in &summary.per_image {
            out.push_str(&format!(
                "{image_id} ({:.1}): Precision={:.5} Recall={:.5}\n",
                summary.threshold,
                counts.precision(),
                counts.recall()
            ));
        }
    }
    out
}

/// Hand every scored image's precision-recall curve to the renderer.
///
/// Output files are named `<detector>_detector_on_<image_id>.jpg` inside
/// `output_dir`, using the detector label from the config; the label passed
/// to the renderer is the image id.
pub fn render_curves<R: CurveRenderer>(
    report: &ScoreReport,
    renderer: &R,
    config: &EvalConfig,
    output_dir: &Path,
) -> Result<()> {
    let detector = &config.detector;
    for (image_id, result) in &report.per_image {
        let output: PathBuf = output_dir.join(format!("{detector}_detector_on_{image_id}.jpg"));
        renderer.render_curve(
            &result.precision,
            &result.recall,
            result.average_precision,
            image_id,
            &output,
        )?;
    }
    Ok(())
}
