//! End-to-end detection pipeline tests
//!
//! Exercises the documented scenarios on synthetic images through the
//! public library API, plus a CLI smoke test.

use image::{Rgb, RgbImage};
use imageproc::point::Point;
use rectnest::{
    preprocess, ContourPoints, DetectOptions, RectangleDetector, ShapeExtractor,
    ThresholdExtractor,
};

fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, value: u8) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            img.put_pixel(x, y, Rgb([value, value, value]));
        }
    }
}

/// Three concentric filled rectangles, none touching the border.
fn concentric_image() -> RgbImage {
    let mut img = RgbImage::new(240, 240);
    fill_rect(&mut img, 30, 30, 209, 209, 255);
    fill_rect(&mut img, 70, 70, 169, 169, 0);
    fill_rect(&mut img, 110, 110, 139, 139, 255);
    img
}

/// Dense boundary points of an axis-aligned rectangle outline.
fn rect_contour(x0: u32, y0: u32, x1: u32, y1: u32) -> ContourPoints {
    let mut points = Vec::new();
    for x in x0..=x1 {
        points.push(Point::new(x, y0));
    }
    for y in y0 + 1..=y1 {
        points.push(Point::new(x1, y));
    }
    for x in (x0..x1).rev() {
        points.push(Point::new(x, y1));
    }
    for y in (y0 + 1..y1).rev() {
        points.push(Point::new(x0, y));
    }
    points
}

// ============ Scenario A: three concentric rectangles ============

#[test]
fn test_concentric_rectangles_levels() {
    let detector = RectangleDetector::new();
    let records = detector.detect(&concentric_image()).unwrap();

    assert_eq!(records.len(), 3);
    let mut levels: Vec<u32> = records.iter().map(|r| r.level).collect();
    levels.sort_unstable();
    assert_eq!(levels, vec![0, 1, 2]);

    // The outermost box carries the highest level.
    let outermost = records.iter().min_by_key(|r| r.top_left.0).unwrap();
    assert_eq!(outermost.level, 2);
    let innermost = records.iter().max_by_key(|r| r.top_left.0).unwrap();
    assert_eq!(innermost.level, 0);
}

// ============ Scenario B: two disjoint rectangles ============

#[test]
fn test_disjoint_rectangles_both_level_zero() {
    let mut img = RgbImage::new(200, 200);
    fill_rect(&mut img, 20, 20, 80, 80, 255);
    fill_rect(&mut img, 120, 120, 180, 180, 255);

    let detector = RectangleDetector::new();
    let records = detector.detect(&img).unwrap();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.level == 0));
}

// ============ Scenario C: full-frame rectangle ============

#[test]
fn test_full_frame_rectangle_is_excluded() {
    let img = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
    let detector = RectangleDetector::new();
    let records = detector.detect(&img).unwrap();
    assert!(records.is_empty());
}

// ============ Scenario D: blank image ============

#[test]
fn test_blank_image_yields_nothing() {
    let img = RgbImage::new(100, 100);
    let detector = RectangleDetector::new();

    let enhanced = preprocess(&img, &DetectOptions::default());
    let contours = ThresholdExtractor::new(127).extract(&enhanced);
    assert!(contours.is_empty());

    let records = detector.detect(&img).unwrap();
    assert!(records.is_empty());
}

// ============ Properties ============

#[test]
fn test_records_never_exceed_contours() {
    let img = concentric_image();
    let detector = RectangleDetector::new();

    let enhanced = preprocess(&img, detector.options());
    let contours = ThresholdExtractor::new(127).extract(&enhanced);
    let records = detector.detect(&img).unwrap();

    assert!(records.len() <= contours.len());
}

#[test]
fn test_detection_is_bit_identical_across_runs() {
    let img = concentric_image();
    let detector = RectangleDetector::new();
    let first = detector.detect(&img).unwrap();
    let second = detector.detect(&img).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_border_exclusion_is_exact() {
    let detector = RectangleDetector::new();

    // Bounding box starting at x=0 is discarded outright.
    let on_border = vec![rect_contour(0, 10, 50, 60)];
    assert!(detector.analyze_contours(&on_border, 100, 100).is_empty());

    // Identical geometry shifted one pixel inward is retained.
    let off_border = vec![rect_contour(1, 10, 51, 60)];
    let records = detector.analyze_contours(&off_border, 100, 100);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].top_left, (1, 10));

    // Touching the far border via x + w == width is also discarded.
    let far_border = vec![rect_contour(49, 10, 99, 60)];
    assert!(detector.analyze_contours(&far_border, 100, 100).is_empty());
    let near_far_border = vec![rect_contour(48, 10, 98, 60)];
    assert_eq!(detector.analyze_contours(&near_far_border, 100, 100).len(), 1);
}

#[test]
fn test_nesting_counts_only_surviving_rectangles() {
    // The border-touching outer box is excluded, so it must not
    // contribute to anyone's level and the survivors re-count among
    // themselves only.
    let detector = RectangleDetector::new();
    let contours = vec![
        rect_contour(0, 0, 99, 99),
        rect_contour(10, 10, 89, 89),
        rect_contour(30, 30, 69, 69),
    ];
    let records = detector.analyze_contours(&contours, 100, 100);
    assert_eq!(records.len(), 2);
    let levels: Vec<u32> = records.iter().map(|r| r.level).collect();
    assert_eq!(levels, vec![1, 0]);
}

// ============ CLI smoke tests ============

mod cli {
    use super::*;
    use assert_cmd::Command;
    use predicates::prelude::*;

    #[test]
    fn test_detects_and_annotates() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("shapes.png");
        let output = dir.path().join("annotated.png");

        let mut img = RgbImage::new(200, 200);
        fill_rect(&mut img, 20, 20, 80, 80, 255);
        fill_rect(&mut img, 120, 120, 180, 180, 255);
        img.save(&input).unwrap();

        Command::cargo_bin("rectnest")
            .unwrap()
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .arg("--quiet")
            .assert()
            .success()
            .stdout(predicate::str::contains("Level: 0"));

        assert!(output.exists());
    }

    #[test]
    fn test_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("shapes.png");

        let mut img = RgbImage::new(200, 200);
        fill_rect(&mut img, 40, 40, 159, 159, 255);
        img.save(&input).unwrap();

        let assert = Command::cargo_bin("rectnest")
            .unwrap()
            .arg(&input)
            .arg("--json")
            .arg("--no-annotate")
            .arg("--quiet")
            .assert()
            .success();

        let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        let records: Vec<rectnest::NestedRect> = serde_json::from_str(&stdout).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, 0);
    }

    #[test]
    fn test_missing_input_exits_with_code_3() {
        Command::cargo_bin("rectnest")
            .unwrap()
            .arg("/no/such/file.png")
            .assert()
            .code(3)
            .stderr(predicate::str::contains("does not exist"));
    }
}
