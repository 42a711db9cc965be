//! Core data types for oriented-box annotations and evaluation results.

use std::collections::BTreeMap;

use geo::{LineString, Polygon};
use serde::{Deserialize, Serialize};

use crate::error::{QuadEvalError, Result};

/// Default edge length, in pixels, of the square crops the detection
/// pipeline runs on.
pub const DEFAULT_CROP_EXTENT: u32 = 512;

/// An arbitrarily rotated quadrilateral, stored as a flat sequence of
/// 8 coordinates in fixed point order `[x1,y1,x2,y2,x3,y3,x4,y4]`.
///
/// Convexity is not enforced but is assumed by callers: polygon area
/// computations are undefined for self-intersecting quads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientedBox {
    /// Flat coordinate sequence, 4 (x, y) pairs.
    pub points: [f64; 8],
    /// Detection confidence. Ground truth and annotation files carry no
    /// score; predictions constructed through the API may.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl OrientedBox {
    /// Create a new oriented box from 8 coordinates.
    pub fn new(points: [f64; 8]) -> Self {
        Self {
            points,
            score: None,
        }
    }

    /// Create an oriented box carrying a detection confidence.
    pub fn with_score(points: [f64; 8], score: f64) -> Self {
        Self {
            points,
            score: Some(score),
        }
    }

    /// Build an oriented box from a slice of exactly 8 coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice does not hold exactly 8 values.
    pub fn from_slice(coords: &[f64]) -> Result<Self> {
        if coords.len() != 8 {
            return Err(QuadEvalError::InvalidBox(format!(
                "expected 8 coordinates, got {}",
                coords.len()
            )));
        }
        let mut points = [0.0; 8];
        points.copy_from_slice(coords);
        Ok(Self::new(points))
    }

    /// Get the confidence score, defaulting to 1.0 if not present.
    pub fn confidence(&self) -> f64 {
        self.score.unwrap_or(1.0)
    }

    /// The 4 vertices as (x, y) pairs, in stored order.
    pub fn vertices(&self) -> [(f64, f64); 4] {
        let p = &self.points;
        [(p[0], p[1]), (p[2], p[3]), (p[4], p[5]), (p[6], p[7])]
    }

    /// Reverse the vertex winding while keeping the first vertex, i.e.
    /// reorder `[p0,p1,p2,p3]` to `[p0,p3,p2,p1]`.
    ///
    /// Detector output and ground truth list their corners in opposite
    /// winding order; predicted boxes are passed through this before
    /// polygon construction so that both sides agree.
    pub fn reverse_winding(&self) -> Self {
        let p = &self.points;
        Self {
            points: [p[0], p[1], p[6], p[7], p[4], p[5], p[2], p[3]],
            score: self.score,
        }
    }

    /// Build a closed `geo` polygon from the 4 vertices.
    pub fn to_polygon(&self) -> Polygon<f64> {
        let coords: Vec<(f64, f64)> = self.vertices().to_vec();
        Polygon::new(LineString::from(coords), vec![])
    }
}

/// Identifies one crop of a source image.
///
/// `rotation_angle` is in whole degrees; 0 denotes an unrotated crop whose
/// coordinates only need anchor-offset translation. The crop extent is the
/// nominal (unrotated) crop size used by the rotate-and-fit transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropReference {
    /// Identity of the source image this crop was taken from.
    pub image_id: String,
    /// X of the crop's top-left corner in source-image space.
    pub anchor_x: i32,
    /// Y of the crop's top-left corner in source-image space.
    pub anchor_y: i32,
    /// Rotation applied when the crop was generated, in degrees.
    pub rotation_angle: i32,
    /// Nominal crop width before rotation expansion.
    pub crop_width: u32,
    /// Nominal crop height before rotation expansion.
    pub crop_height: u32,
}

impl CropReference {
    /// An unrotated crop with the default 512x512 extent.
    pub fn new(image_id: impl Into<String>, anchor_x: i32, anchor_y: i32) -> Self {
        Self::rotated(image_id, anchor_x, anchor_y, 0)
    }

    /// A crop generated under rotation, default extent.
    pub fn rotated(
        image_id: impl Into<String>,
        anchor_x: i32,
        anchor_y: i32,
        rotation_angle: i32,
    ) -> Self {
        Self {
            image_id: image_id.into(),
            anchor_x,
            anchor_y,
            rotation_angle,
            crop_width: DEFAULT_CROP_EXTENT,
            crop_height: DEFAULT_CROP_EXTENT,
        }
    }

    /// Whether this crop requires the inverse-rotation transform.
    pub fn is_rotated(&self) -> bool {
        self.rotation_angle != 0
    }
}

/// Ground-truth and predicted boxes for one source image, both in
/// source-image coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageAnnotations {
    pub ground_truth: Vec<OrientedBox>,
    pub predicted: Vec<OrientedBox>,
}

/// All annotations of an evaluation batch, grouped by source image.
///
/// Keyed with a `BTreeMap` so iteration (and therefore report line order)
/// is deterministic. Within one crop file, line order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageAnnotationSet {
    images: BTreeMap<String, ImageAnnotations>,
}

impl ImageAnnotationSet {
    /// Create an empty annotation set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append ground-truth boxes for an image, creating the entry if needed.
    pub fn add_ground_truth(&mut self, image_id: impl Into<String>, boxes: Vec<OrientedBox>) {
        self.images
            .entry(image_id.into())
            .or_default()
            .ground_truth
            .extend(boxes);
    }

    /// Append predicted boxes for an image, creating the entry if needed.
    pub fn add_predictions(&mut self, image_id: impl Into<String>, boxes: Vec<OrientedBox>) {
        self.images
            .entry(image_id.into())
            .or_default()
            .predicted
            .extend(boxes);
    }

    /// Look up one image's annotations.
    pub fn get(&self, image_id: &str) -> Option<&ImageAnnotations> {
        self.images.get(image_id)
    }

    /// Iterate images in sorted id order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ImageAnnotations)> {
        self.images.iter()
    }

    /// Number of images with any annotation on either side.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the set holds no images at all.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Per-image scoring result: the cumulative precision/recall arrays over
/// the ranked prediction sequence, and the interpolated average precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Precision at each prediction rank, values in [0, 1].
    pub precision: Vec<f64>,
    /// Recall at each prediction rank, non-decreasing, values in [0, 1].
    pub recall: Vec<f64>,
    /// Interpolated average precision in [0, 1].
    pub average_precision: f64,
}

/// Evaluation output for a whole batch: one `MatchResult` per scored image
/// plus the mean average precision across them.
///
/// Images lacking ground truth or predictions are excluded from scoring and
/// from the mAP denominator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Per-image results, keyed by image id.
    pub per_image: BTreeMap<String, MatchResult>,
    /// Mean of `average_precision` over all scored images.
    pub mean_average_precision: f64,
}

impl ScoreReport {
    /// Number of images that were actually scored.
    pub fn scored_images(&self) -> usize {
        self.per_image.len()
    }
}

/// Configuration for one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Minimum IoU for a prediction to claim a ground-truth box.
    pub iou_threshold: f64,
    /// Detector label used in curve output filenames.
    pub detector: String,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            iou_threshold: 0.5,
            detector: "unnamed".to_string(),
        }
    }
}
