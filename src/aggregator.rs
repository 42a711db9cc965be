//! Grouping of crop-level annotations into per-image sets.
//!
//! Each annotation file covers one crop; a source image is covered by many
//! crops on both the ground-truth and prediction side. This module merges
//! everything belonging to one source image, keyed by the image id
//! recovered from the filename grammars in [`crate::loader`].

use crate::loader::{parse_annotation_text, parse_crop_reference, AnnotationKind};
use crate::stats::BatchStats;
use crate::types::{CropReference, ImageAnnotationSet, OrientedBox};

/// Group already-parsed crop annotations into an [`ImageAnnotationSet`].
///
/// An image id present on only one side yields an empty list on the other
/// side; the scorer treats that as "no matches possible", not an error.
pub fn collect_annotations(
    ground_truth: Vec<(CropReference, Vec<OrientedBox>)>,
    predictions: Vec<(CropReference, Vec<OrientedBox>)>,
) -> ImageAnnotationSet {
    let mut set = ImageAnnotationSet::new();
    for (crop, boxes) in ground_truth {
        set.add_ground_truth(crop.image_id, boxes);
    }
    for (crop, boxes) in predictions {
        set.add_predictions(crop.image_id, boxes);
    }
    set
}

/// Parse and group a whole batch of annotation files given as
/// `(filename, contents)` pairs.
///
/// Individual files are fail-fast: an unrecognized filename or a malformed
/// line rejects the whole file. The batch is tolerant: rejected files are
/// logged, counted in the returned [`BatchStats`], and processing
/// continues with the rest.
pub fn aggregate_batch(
    ground_truth_files: &[(String, String)],
    prediction_files: &[(String, String)],
) -> (ImageAnnotationSet, BatchStats) {
    let mut set = ImageAnnotationSet::new();
    let mut stats = BatchStats::new();

    for (name, contents) in ground_truth_files {
        match parse_file(name, contents, AnnotationKind::GroundTruth) {
            Ok((crop, boxes)) => {
                stats.add_ground_truth_file(boxes.len());
                set.add_ground_truth(crop.image_id, boxes);
            }
            Err(err) => {
                log::warn!("skipping ground-truth file {name}: {err}");
                stats.reject_file();
            }
        }
    }

    for (name, contents) in prediction_files {
        match parse_file(name, contents, AnnotationKind::Predicted) {
            Ok((crop, boxes)) => {
                stats.add_prediction_file(boxes.len());
                set.add_predictions(crop.image_id, boxes);
            }
            Err(err) => {
                log::warn!("skipping prediction file {name}: {err}");
                stats.reject_file();
            }
        }
    }

    (set, stats)
}

fn parse_file(
    name: &str,
    contents: &str,
    kind: AnnotationKind,
) -> crate::error::Result<(CropReference, Vec<OrientedBox>)> {
    let crop = parse_crop_reference(name, kind)?;
    let boxes = parse_annotation_text(contents, &crop)?;
    Ok((crop, boxes))
}
