mod common;

use approx::assert_relative_eq;
use common::synthetic_image::{bench_rgb, draw_ruler, fill_rect, fill_rotated_rect, screw_frame};
use screw_inspect::image::ImageRgb8;
use screw_inspect::{
    measure, CalibrationTable, InspectError, InspectionConstants, Inspector, Verdict,
};

const W: usize = 640;
const H: usize = 900;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn inspector() -> Inspector {
    Inspector::new(CalibrationTable::reference(), InspectionConstants::default())
}

#[test]
fn nominal_m6x25_is_accepted() {
    init_logger();
    let rgb = screw_frame(W, H, 305, 101);
    let img = ImageRgb8::from_slice(W, H, &rgb).unwrap();

    let m = inspector().measure(&img, "M6x25").expect("screw should be found");
    assert_eq!(m.verdict, Verdict::Accepted);
    assert_relative_eq!(m.length_mm, 30.7, epsilon = 0.5);
    assert_relative_eq!(m.width_mm, 10.3, epsilon = 0.5);
    assert!(m.length_mm >= m.width_mm);

    // Corners hug the drawn block, in full-image coordinates.
    for c in &m.corners {
        assert!(c.x > 160.0 && c.x < 480.0, "corner x={}", c.x);
        assert!(c.y > 345.0 && c.y < 456.0, "corner y={}", c.y);
    }
}

#[test]
fn overlong_screw_is_rejected() {
    init_logger();
    let rgb = screw_frame(W, H, 350, 101);
    let img = ImageRgb8::from_slice(W, H, &rgb).unwrap();
    let m = inspector().measure(&img, "M6x25").unwrap();
    assert_eq!(m.verdict, Verdict::Rejected);
    assert_relative_eq!(m.length_mm, 35.2, epsilon = 0.5);
}

#[test]
fn narrow_m8x16_is_rejected_on_width() {
    init_logger();
    let rgb = screw_frame(W, H, 240, 100);
    let img = ImageRgb8::from_slice(W, H, &rgb).unwrap();
    let m = inspector().measure(&img, "M8x16").unwrap();
    assert_eq!(m.verdict, Verdict::Rejected);
    assert_relative_eq!(m.length_mm, 24.2, epsilon = 0.5);
    assert_relative_eq!(m.width_mm, 10.2, epsilon = 0.5);
}

#[test]
fn rotated_screw_keeps_length_as_longer_side() {
    init_logger();
    for angle in [20.0, 65.0, 90.0, 135.0] {
        let mut rgb = bench_rgb(W, H);
        fill_rotated_rect(&mut rgb, W, H, (320.0, 420.0), (305.0, 101.0), angle);
        let img = ImageRgb8::from_slice(W, H, &rgb).unwrap();
        let m = inspector().measure(&img, "M6x25").unwrap();
        assert!(m.length_mm >= m.width_mm);
        assert!(
            (30.0..=31.6).contains(&m.length_mm),
            "angle {angle}: length {}",
            m.length_mm
        );
        assert!(
            (9.6..=11.0).contains(&m.width_mm),
            "angle {angle}: width {}",
            m.width_mm
        );
        assert_eq!(m.verdict, Verdict::Accepted);
    }
}

#[test]
fn all_black_image_is_not_found() {
    init_logger();
    let rgb = vec![0u8; W * H * 3];
    let img = ImageRgb8::from_slice(W, H, &rgb).unwrap();
    assert_eq!(inspector().measure(&img, "M6x25"), Err(InspectError::NotFound));
}

#[test]
fn objects_below_the_roi_are_ignored() {
    init_logger();
    let mut rgb = bench_rgb(W, H);
    fill_rect(&mut rgb, W, 100, 866, 305, 30);
    draw_ruler(&mut rgb, W, H, 880);
    let img = ImageRgb8::from_slice(W, H, &rgb).unwrap();
    assert_eq!(inspector().measure(&img, "M6x25"), Err(InspectError::NotFound));
}

#[test]
fn unknown_part_is_reported_before_any_work() {
    let rgb = screw_frame(W, H, 305, 101);
    let img = ImageRgb8::from_slice(W, H, &rgb).unwrap();
    assert_eq!(
        inspector().measure(&img, "M4x40"),
        Err(InspectError::UnknownPartId("M4x40".to_string()))
    );
}

#[test]
fn repeated_calls_are_identical() {
    init_logger();
    let mut rgb = bench_rgb(W, H);
    fill_rotated_rect(&mut rgb, W, H, (300.0, 380.0), (240.0, 130.0), 33.0);
    let img = ImageRgb8::from_slice(W, H, &rgb).unwrap();

    let inspector = inspector();
    let first = inspector.measure(&img, "M8x16").unwrap();
    let second = inspector.measure(&img, "M8x16").unwrap();
    assert_eq!(first, second);

    let free = measure(
        &img,
        "M8x16",
        inspector.calibration(),
        inspector.constants(),
    )
    .unwrap();
    assert_eq!(first, free);
}

#[test]
fn traced_run_reports_stages() {
    init_logger();
    let rgb = screw_frame(W, H, 305, 101);
    let img = ImageRgb8::from_slice(W, H, &rgb).unwrap();
    let inspector = inspector();

    let (result, trace) = inspector.measure_traced(&img, "M6x25");
    assert_eq!(result, inspector.measure(&img, "M6x25"));
    assert_eq!((trace.input.roi_width, trace.input.roi_height), (W, 860));
    assert!(trace.mask_foreground > 0);
    assert!(trace.contours.is_some_and(|c| c >= 1));
    let labels: Vec<_> = trace.timings.stages.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["segment", "fit", "classify"]);
    assert!(trace.rect_px.is_some());
}

#[test]
fn custom_constants_change_scale_and_roi() {
    init_logger();
    let rgb = screw_frame(W, H, 305, 101);
    let img = ImageRgb8::from_slice(W, H, &rgb).unwrap();
    let constants = InspectionConstants::new(1.5, 5.0, 860).unwrap();
    let m = Inspector::new(CalibrationTable::reference(), constants)
        .measure(&img, "M6x25")
        .unwrap();
    assert_relative_eq!(m.length_mm, 61.4, epsilon = 1.0);
    assert_eq!(m.verdict, Verdict::Rejected);

    let short_roi = InspectionConstants::new(1.5, 10.0, 300).unwrap();
    assert_eq!(
        Inspector::new(CalibrationTable::reference(), short_roi).measure(&img, "M6x25"),
        Err(InspectError::NotFound)
    );
}
