//! Pixel → millimetre conversion of a fitted rectangle.
//!
//! The longer side is always reported as the length, whatever axis order
//! the fitter used.

use crate::types::OrientedRect;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalDims {
    pub length_mm: f64,
    pub width_mm: f64,
}

/// Convert the rectangle sides to millimetres.
///
/// `pixels_per_mm` must be non-zero; [`InspectionConstants`] enforces that at
/// construction.
///
/// [`InspectionConstants`]: crate::calibration::InspectionConstants
pub fn convert(rect: &OrientedRect, pixels_per_mm: f64) -> PhysicalDims {
    let (length_px, width_px) = rect.major_minor();
    PhysicalDims {
        length_mm: length_px / pixels_per_mm,
        width_mm: width_px / pixels_per_mm,
    }
}
