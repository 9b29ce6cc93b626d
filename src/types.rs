use crate::classify::Verdict;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Rectangle of arbitrary rotation, in pixel coordinates (x right, y down).
///
/// `size` is `(extent along the rectangle's first axis, extent along its
/// second axis)`; which one is longer is not implied. `angle_deg` is the
/// direction of the first axis, normalised into `[0, 90)`. Corners run
/// clockwise as seen on screen, starting from `center − u·w/2 − v·h/2`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientedRect {
    pub center: Point2<f64>,
    pub size: (f64, f64),
    pub angle_deg: f64,
    pub corners: [Point2<f64>; 4],
}

impl OrientedRect {
    /// Build a rectangle from centre, side lengths and first-axis angle.
    pub fn new(center: Point2<f64>, size: (f64, f64), angle_deg: f64) -> Self {
        let (mut w, mut h) = size;
        let mut angle = angle_deg.rem_euclid(180.0);
        // rem_euclid rounds tiny negative inputs up to exactly 180.
        if angle >= 180.0 {
            angle = 0.0;
        }
        if angle >= 90.0 {
            angle -= 90.0;
            std::mem::swap(&mut w, &mut h);
        }
        let rad = angle.to_radians();
        let u = Vector2::new(rad.cos(), rad.sin());
        let v = Vector2::new(-u.y, u.x);
        let hu = u * (w * 0.5);
        let hv = v * (h * 0.5);
        let corners = [
            center - hu - hv,
            center + hu - hv,
            center + hu + hv,
            center - hu + hv,
        ];
        Self {
            center,
            size: (w, h),
            angle_deg: angle,
            corners,
        }
    }

    pub fn area(&self) -> f64 {
        self.size.0 * self.size.1
    }

    /// `(longer side, shorter side)` in pixels.
    pub fn major_minor(&self) -> (f64, f64) {
        let (a, b) = self.size;
        (a.max(b), a.min(b))
    }
}

/// Outcome of one successful inspection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Longer rectangle side in millimetres; never smaller than `width_mm`.
    pub length_mm: f64,
    pub width_mm: f64,
    pub verdict: Verdict,
    /// Rectangle corners in pixel coordinates of the original image.
    pub corners: [Point2<f64>; 4],
    pub rect: OrientedRect,
}

impl Measurement {
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }

    /// Length rounded to two decimals, for display only.
    pub fn length_display(&self) -> String {
        format!("{:.2}", self.length_mm)
    }

    pub fn width_display(&self) -> String {
        format!("{:.2}", self.width_mm)
    }

    /// Corners truncated to integer pixels, as used for overlay drawing.
    pub fn corners_px(&self) -> [(i32, i32); 4] {
        self.corners.map(|p| (p.x as i32, p.y as i32))
    }
}
