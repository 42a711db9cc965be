//! Tests for annotation loading and the core data types.

use quad_eval::loader::{parse_annotation_text, parse_crop_reference, AnnotationKind};
use quad_eval::types::{CropReference, OrientedBox, DEFAULT_CROP_EXTENT};

#[test]
fn test_crop_reference_defaults() {
    let crop = CropReference::new("sheet", 10, 20);
    assert_eq!(crop.crop_width, DEFAULT_CROP_EXTENT);
    assert_eq!(crop.crop_height, DEFAULT_CROP_EXTENT);
    assert_eq!(crop.rotation_angle, 0);
    assert!(!crop.is_rotated());
    assert!(CropReference::rotated("sheet", 10, 20, -5).is_rotated());
}

#[test]
fn test_parse_crop_reference_dispatch() {
    let gt = parse_crop_reference("annotation_sheet_0_512.txt", AnnotationKind::GroundTruth);
    assert!(gt.is_ok());
    let pred = parse_crop_reference(
        "res_cropped_image_sheet_0_512_20.txt",
        AnnotationKind::Predicted,
    );
    assert_eq!(pred.unwrap().rotation_angle, 20);
    assert!(
        parse_crop_reference("annotation_sheet_0_512.txt", AnnotationKind::Predicted).is_err()
    );
}

#[test]
fn test_loader_preserves_line_order() {
    let crop = CropReference::new("img", 0, 0);
    let text = "0,0,1,0,1,1,0,1\n10,10,11,10,11,11,10,11\n20,20,21,20,21,21,20,21\n";
    let boxes = parse_annotation_text(text, &crop).unwrap();
    assert_eq!(boxes.len(), 3);
    assert_eq!(boxes[0].points[0], 0.0);
    assert_eq!(boxes[1].points[0], 10.0);
    assert_eq!(boxes[2].points[0], 20.0);
}

#[test]
fn test_loader_accepts_float_coordinates() {
    // Predicted output may carry fractional pixels; they are truncated
    // toward zero during reconstruction, matching the integer ground truth.
    let crop = CropReference::new("img", 100, 0);
    let boxes = parse_annotation_text("0.9,0.2,10.7,0.1,10.5,10.9,0.3,10.4\n", &crop).unwrap();
    assert_eq!(
        boxes[0].points,
        [100.0, 0.0, 110.0, 0.0, 110.0, 10.0, 100.0, 10.0]
    );
}

#[test]
fn test_empty_file_yields_no_boxes() {
    let crop = CropReference::new("img", 0, 0);
    assert!(parse_annotation_text("", &crop).unwrap().is_empty());
    assert!(parse_annotation_text("\n", &crop).unwrap().is_empty());
}

#[test]
fn test_oriented_box_vertices_match_point_order() {
    let bbox = OrientedBox::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    assert_eq!(
        bbox.vertices(),
        [(1.0, 2.0), (3.0, 4.0), (5.0, 6.0), (7.0, 8.0)]
    );
}

#[test]
fn test_oriented_box_serde_round_trip() {
    let bbox = OrientedBox::with_score([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0], 0.9);
    let json = serde_json::to_string(&bbox).unwrap();
    let back: OrientedBox = serde_json::from_str(&json).unwrap();
    assert_eq!(back, bbox);

    // Unscored boxes serialize without a score field at all.
    let unscored = OrientedBox::new([0.0; 8]);
    let json = serde_json::to_string(&unscored).unwrap();
    assert!(!json.contains("score"));
}

#[test]
fn test_anchor_only_applies_to_matching_axis() {
    let crop = CropReference::new("img", 7, 0);
    let boxes = parse_annotation_text("0,0,1,0,1,1,0,1\n", &crop).unwrap();
    assert_eq!(boxes[0].points, [7.0, 0.0, 8.0, 0.0, 8.0, 1.0, 7.0, 1.0]);
}
