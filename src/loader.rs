//! Parsing of annotation files and their structured filenames.
//!
//! Annotation files are plaintext: one oriented box per line as 8
//! comma-separated coordinates in crop-local pixels. The crop geometry
//! itself (image id, anchor, optional rotation angle) is encoded in the
//! filename, with one grammar per file kind:
//!
//! - ground truth: `annotation_<image_id>_<anchor_x>_<anchor_y>.txt`
//! - predicted, unrotated: `res_cropped_image_<image_id>_<anchor_x>_<anchor_y>.txt`
//! - predicted, rotated: `res_cropped_image_<image_id>_<anchor_x>_<anchor_y>_<angle>.txt`
//!
//! All boxes returned by this module are already reconstructed into
//! source-image coordinates.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{QuadEvalError, Result};
use crate::geometry::reconstruct;
use crate::types::{CropReference, OrientedBox};

static GROUND_TRUTH_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^annotation_(.+)_(\d+)_(\d+)\.txt$").unwrap());
static PREDICTION_ROTATED_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^res_cropped_image_(.+)_(\d+)_(\d+)_(-?\d+)\.txt$").unwrap());
static PREDICTION_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^res_cropped_image_(.+)_(\d+)_(\d+)\.txt$").unwrap());

/// Which side of the evaluation an annotation file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    GroundTruth,
    Predicted,
}

/// Recover the crop geometry encoded in a ground-truth filename.
///
/// # Errors
///
/// Returns [`QuadEvalError::CropReferenceParse`] when the name does not
/// match the `annotation_<image_id>_<x>_<y>.txt` grammar.
pub fn parse_ground_truth_name(name: &str) -> Result<CropReference> {
    let captures = GROUND_TRUTH_NAME
        .captures(name)
        .ok_or_else(|| QuadEvalError::CropReferenceParse {
            name: name.to_string(),
        })?;
    Ok(CropReference::new(
        &captures[1],
        parse_field(name, &captures[2])?,
        parse_field(name, &captures[3])?,
    ))
}

/// Recover the crop geometry encoded in a prediction filename.
///
/// The rotated (4-field) grammar is tried first so that a trailing angle is
/// never mistaken for part of the anchor; names without an angle fall back
/// to the unrotated grammar.
///
/// # Errors
///
/// Returns [`QuadEvalError::CropReferenceParse`] when neither grammar
/// matches.
pub fn parse_prediction_name(name: &str) -> Result<CropReference> {
    if let Some(captures) = PREDICTION_ROTATED_NAME.captures(name) {
        return Ok(CropReference::rotated(
            &captures[1],
            parse_field(name, &captures[2])?,
            parse_field(name, &captures[3])?,
            parse_field(name, &captures[4])?,
        ));
    }
    if let Some(captures) = PREDICTION_NAME.captures(name) {
        return Ok(CropReference::new(
            &captures[1],
            parse_field(name, &captures[2])?,
            parse_field(name, &captures[3])?,
        ));
    }
    Err(QuadEvalError::CropReferenceParse {
        name: name.to_string(),
    })
}

/// Dispatch to the right filename grammar for `kind`.
pub fn parse_crop_reference(name: &str, kind: AnnotationKind) -> Result<CropReference> {
    match kind {
        AnnotationKind::GroundTruth => parse_ground_truth_name(name),
        AnnotationKind::Predicted => parse_prediction_name(name),
    }
}

fn parse_field(name: &str, digits: &str) -> Result<i32> {
    digits
        .parse()
        .map_err(|_| QuadEvalError::CropReferenceParse {
            name: name.to_string(),
        })
}

/// Parse an annotation text blob into oriented boxes in source-image
/// coordinates.
///
/// Each line must hold exactly 8 comma-separated numeric tokens
/// (surrounding whitespace is tolerated); a trailing blank line is
/// ignored. Every parsed box is passed through the geometry reconstructor
/// with the shared `crop` reference.
///
/// # Errors
///
/// Returns [`QuadEvalError::MalformedAnnotation`] naming the offending line
/// when a line does not parse.
pub fn parse_annotation_text(text: &str, crop: &CropReference) -> Result<Vec<OrientedBox>> {
    let mut boxes = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let coords = parse_line(line).map_err(|reason| QuadEvalError::MalformedAnnotation {
            file: crop.image_id.clone(),
            line: index + 1,
            reason,
        })?;
        boxes.push(reconstruct(&OrientedBox::new(coords), crop));
    }
    Ok(boxes)
}

fn parse_line(line: &str) -> std::result::Result<[f64; 8], String> {
    let mut coords = [0.0; 8];
    let mut count = 0;
    for token in line.split(',') {
        if count == 8 {
            return Err(format!("expected 8 coordinates, got more: {line:?}"));
        }
        coords[count] = token
            .trim()
            .parse()
            .map_err(|_| format!("non-numeric token {:?}", token.trim()))?;
        count += 1;
    }
    if count != 8 {
        return Err(format!("expected 8 coordinates, got {count}"));
    }
    Ok(coords)
}

/// Load one annotation file from disk: parse its name into a
/// [`CropReference`] and its contents into reconstructed boxes.
pub fn load_annotation_file<P: AsRef<Path>>(
    path: P,
    kind: AnnotationKind,
) -> Result<(CropReference, Vec<OrientedBox>)> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| QuadEvalError::CropReferenceParse {
            name: path.display().to_string(),
        })?;
    let crop = parse_crop_reference(name, kind)?;
    let text = fs::read_to_string(path)?;
    let boxes = parse_annotation_text(&text, &crop).map_err(|err| match err {
        QuadEvalError::MalformedAnnotation { line, reason, .. } => {
            QuadEvalError::MalformedAnnotation {
                file: name.to_string(),
                line,
                reason,
            }
        }
        other => other,
    })?;
    Ok((crop, boxes))
}
