//! Crop-frame to source-frame coordinate reconstruction.
//!
//! Annotations are produced on fixed-size crops of a much larger source
//! image; some crops are additionally generated under a rotate-and-fit
//! transform (rotate the crop about its own center, then expand the canvas
//! to the rotated bounding box). This module undoes both so that boxes from
//! different crops can be compared in one coordinate frame.
//!
//! Output coordinates are truncated toward zero to stay consistent with
//! ground truth, which is always stored as integers. No clipping against
//! image bounds happens here.

use nalgebra::{Matrix2x3, Vector3};

use crate::types::{CropReference, OrientedBox};

/// Affine rotation about `center`, OpenCV `getRotationMatrix2D` convention:
/// positive angles rotate counter-clockwise with the y-axis pointing down.
fn rotation_about(center: (f64, f64), angle_degrees: f64) -> Matrix2x3<f64> {
    let theta = angle_degrees.to_radians();
    let (alpha, beta) = (theta.cos(), theta.sin());
    let (cx, cy) = center;
    Matrix2x3::new(
        alpha,
        beta,
        (1.0 - alpha) * cx - beta * cy,
        -beta,
        alpha,
        beta * cx + (1.0 - alpha) * cy,
    )
}

/// Canvas size after rotating a `width` x `height` crop by `angle_degrees`
/// and fitting the result: `|h sin| + |w cos|` by `|h cos| + |w sin|`,
/// truncated to whole pixels as in the forward crop pipeline.
fn expanded_canvas(width: u32, height: u32, angle_degrees: f64) -> (i64, i64) {
    let theta = angle_degrees.to_radians();
    let (cos, sin) = (theta.cos().abs(), theta.sin().abs());
    let (w, h) = (f64::from(width), f64::from(height));
    ((h * sin + w * cos) as i64, (h * cos + w * sin) as i64)
}

/// Convert a crop-local oriented box into source-image coordinates.
///
/// For an unrotated crop this is anchor-offset translation. For a rotated
/// crop, the box is first rotated by the negated crop angle about the center
/// of the expanded canvas, then translated by the anchor, then re-centered
/// by the offset between the expanded canvas center and the nominal crop's
/// half-extent. Each coordinate is truncated toward zero at the same points
/// the forward pipeline casts to int, so the inversion agrees with it to
/// integer rounding.
pub fn reconstruct(bbox: &OrientedBox, crop: &CropReference) -> OrientedBox {
    let anchor = (f64::from(crop.anchor_x), f64::from(crop.anchor_y));
    if !crop.is_rotated() {
        let mut points = [0.0; 8];
        for (i, value) in bbox.points.iter().enumerate() {
            let offset = if i % 2 == 0 { anchor.0 } else { anchor.1 };
            points[i] = (value + offset).trunc();
        }
        return OrientedBox {
            points,
            score: bbox.score,
        };
    }

    let angle = f64::from(crop.rotation_angle);
    let (canvas_w, canvas_h) = expanded_canvas(crop.crop_width, crop.crop_height, angle);
    let center = ((canvas_w / 2) as f64, (canvas_h / 2) as f64);
    let undo = rotation_about(center, -angle);

    // Integer re-centering offset between the nominal crop's half-extent
    // and the expanded canvas center.
    let recenter_x = (i64::from(crop.crop_width) / 2 - canvas_w / 2) as f64;
    let recenter_y = (i64::from(crop.crop_height) / 2 - canvas_h / 2) as f64;

    let mut points = [0.0; 8];
    for (i, (x, y)) in bbox.vertices().iter().enumerate() {
        let p = undo * Vector3::new(*x, *y, 1.0);
        points[2 * i] = (p.x + anchor.0).trunc() + recenter_x;
        points[2 * i + 1] = (p.y + anchor.1).trunc() + recenter_y;
    }
    OrientedBox {
        points,
        score: bbox.score,
    }
}
