//! Overlay of the fitted rectangle, and optionally the measured values, on a
//! copy of the inspected image.

use crate::classify::Verdict;
use crate::error::FileError;
use crate::types::Measurement;
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut};
use std::path::Path;

pub const ACCEPTED_COLOR: Rgb<u8> = Rgb([0, 180, 0]);
pub const REJECTED_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
pub const OUTLINE_THICKNESS: i32 = 3;

/// Left edge of the label block.
pub const LABEL_X: i32 = 30;
/// Baselines and pixel heights of the dimensions, verdict and part lines.
pub const LABEL_LINES: [(i32, f32); 3] = [(50, 32.0), (100, 38.0), (150, 32.0)];

pub fn verdict_color(verdict: Verdict) -> Rgb<u8> {
    match verdict {
        Verdict::Accepted => ACCEPTED_COLOR,
        Verdict::Rejected => REJECTED_COLOR,
    }
}

/// Copy of `image` with the measurement's rectangle outlined in the verdict
/// colour. Corners are truncated to whole pixels.
pub fn annotate(image: &RgbImage, m: &Measurement) -> RgbImage {
    let mut out = image.clone();
    draw_outline(&mut out, &m.corners_px(), verdict_color(m.verdict));
    out
}

/// [`annotate`], plus three text lines in the top-left corner: the measured
/// dimensions in black, then the verdict and the part type in the verdict
/// colour.
pub fn annotate_labelled(
    image: &RgbImage,
    m: &Measurement,
    part_type: &str,
    font: &impl Font,
) -> RgbImage {
    let mut out = annotate(image, m);
    draw_labels(&mut out, m, part_type, font);
    out
}

pub fn draw_labels(img: &mut RgbImage, m: &Measurement, part_type: &str, font: &impl Font) {
    let color = verdict_color(m.verdict);
    let dims = format!("L:{}mm W:{}mm", m.length_display(), m.width_display());
    let lines = [
        (dims.as_str(), TEXT_COLOR),
        (m.verdict.as_str(), color),
        (part_type, color),
    ];
    for ((text, color), (baseline, px)) in lines.into_iter().zip(LABEL_LINES) {
        let scale = PxScale::from(px);
        // draw_text_mut places the top of the line box; shift so the baseline lands on `baseline`.
        let top = baseline - font.as_scaled(scale).ascent().round() as i32;
        draw_text_mut(img, color, LABEL_X, top, scale, font, text);
    }
}

/// Load a TrueType/OpenType font for the label overlay.
pub fn load_font(path: &Path) -> Result<FontVec, FileError> {
    let bytes = std::fs::read(path).map_err(|e| FileError::io(path, e))?;
    FontVec::try_from_vec(bytes).map_err(|_| FileError::Font {
        path: path.to_path_buf(),
    })
}

/// Closed polygon through `corners`, `OUTLINE_THICKNESS` pixels wide.
pub fn draw_outline(img: &mut RgbImage, corners: &[(i32, i32)], color: Rgb<u8>) {
    let n = corners.len();
    let r = OUTLINE_THICKNESS / 2;
    for i in 0..n {
        let (x0, y0) = corners[i];
        let (x1, y1) = corners[(i + 1) % n];
        for dy in -r..=r {
            for dx in -r..=r {
                draw_line_segment_mut(
                    img,
                    ((x0 + dx) as f32, (y0 + dy) as f32),
                    ((x1 + dx) as f32, (y1 + dy) as f32),
                    color,
                );
            }
        }
        draw_filled_circle_mut(img, (x0, y0), r, color);
    }
}
