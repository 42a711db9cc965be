//! # quad-eval
//!
//! A Rust library for evaluating text-detection model output against
//! ground-truth polygon annotations on large images processed as fixed-size
//! crops.
//!
//! Detections and ground truth are oriented quadrilaterals (4 ordered
//! vertices, stored as 8 flat coordinates). Annotations arrive per crop, in
//! crop-local coordinates, with the crop's anchor and optional rotation
//! angle encoded in the annotation filename; this library reconstructs
//! everything into the source image's coordinate frame, matches predictions
//! to ground truth by polygon IoU, and derives precision-recall curves and
//! average precision per image plus a mean average precision across images.
//!
//! ## Features
//!
//! - Recover source-image coordinates from crop-local annotations,
//!   including crops generated under a rotate-and-fit transform
//! - Parse the per-crop annotation file format and its filename grammars
//! - Group crop-level annotations into per-image ground-truth/prediction sets
//! - Greedy IoU matching with per-image claim tracking
//! - Interpolated (monotone-envelope) average precision and mAP
//! - Text, JSON, and precision-recall-curve report output
//!
//! ## Quick Start
//!
//! ```rust
//! use quad_eval::aggregator::aggregate_batch;
//! use quad_eval::evaluator::evaluate;
//! use quad_eval::report::format_report;
//! use quad_eval::types::EvalConfig;
//!
//! let ground_truth = vec![(
//!     "annotation_sheet-1_0_0.txt".to_string(),
//!     "0,0,10,0,10,10,0,10\n".to_string(),
//! )];
//! let predictions = vec![(
//!     "res_cropped_image_sheet-1_0_0.txt".to_string(),
//!     "0,0,0,10,10,10,10,0\n".to_string(),
//! )];
//!
//! let (set, stats) = aggregate_batch(&ground_truth, &predictions);
//! assert_eq!(stats.rejected_files, 0);
//!
//! let report = evaluate(&set, &EvalConfig::default());
//! println!("{}", format_report(&report));
//! assert!((report.mean_average_precision - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Annotation Format
//!
//! One oriented box per line, 8 comma-separated coordinates in crop-local
//! pixels:
//!
//! ```text
//! x1,y1,x2,y2,x3,y3,x4,y4
//! ```
//!
//! Filenames carry the crop geometry:
//!
//! - ground truth: `annotation_<image_id>_<anchor_x>_<anchor_y>.txt`
//! - predictions: `res_cropped_image_<image_id>_<anchor_x>_<anchor_y>[_<angle>].txt`

pub mod aggregator;
pub mod error;
pub mod evaluator;
pub mod geometry;
pub mod loader;
pub mod matching;
pub mod metrics;
pub mod report;
pub mod stats;
pub mod threshold;
pub mod types;

// Re-export commonly used types and functions
pub use aggregator::{aggregate_batch, collect_annotations};
pub use error::{QuadEvalError, Result};
pub use evaluator::{evaluate, score_image};
pub use loader::{load_annotation_file, parse_annotation_text, parse_crop_reference, AnnotationKind};
pub use report::{format_report, write_report, CurveRenderer};
pub use stats::BatchStats;
pub use types::{
    CropReference, EvalConfig, ImageAnnotationSet, ImageAnnotations, MatchResult, OrientedBox,
    ScoreReport,
};
