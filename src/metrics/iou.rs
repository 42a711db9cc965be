//! Intersection over Union (IoU) for arbitrary quadrilateral polygons.

use geo::{Area, BooleanOps, Polygon};

use crate::types::OrientedBox;

/// Calculate the Intersection over Union between two polygons.
///
/// IoU is the area of intersection divided by the area of union. A polygon
/// with zero area (collinear points) yields IoU = 0 by definition; the
/// all-degenerate case is guarded so no division by zero can occur.
///
/// # Returns
///
/// A value between 0.0 (no overlap) and 1.0 (perfect overlap).
///
/// # Example
///
/// ```
/// use quad_eval::metrics::iou::polygon_iou;
/// use quad_eval::types::OrientedBox;
///
/// let a = OrientedBox::new([0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]);
/// let b = OrientedBox::new([0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]);
/// let iou = polygon_iou(&a.to_polygon(), &b.to_polygon());
/// assert!((iou - 1.0).abs() < 1e-9);
/// ```
pub fn polygon_iou(a: &Polygon<f64>, b: &Polygon<f64>) -> f64 {
    // Degenerate polygons cannot overlap anything; bail out before the
    // boolean ops, which assume valid area geometry.
    if a.unsigned_area() == 0.0 || b.unsigned_area() == 0.0 {
        return 0.0;
    }

    let intersection = a.intersection(b).unsigned_area();
    let union = a.union(b).unsigned_area();
    if union == 0.0 {
        return 0.0;
    }

    intersection / union
}

/// IoU between two oriented boxes, taken verbatim (no winding correction).
pub fn box_iou(a: &OrientedBox, b: &OrientedBox) -> f64 {
    polygon_iou(&a.to_polygon(), &b.to_polygon())
}
