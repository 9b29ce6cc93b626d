//! Inspection pipeline: part lookup → ROI → segment → fit → convert →
//! classify.
//!
//! [`Inspector`] is generic over its two vision stages so either can be
//! replaced (a learned segmenter, a different contour heuristic) without
//! touching lookup, conversion or classification.
//!
//! ```no_run
//! use screw_inspect::image::ImageRgb8;
//! use screw_inspect::{CalibrationTable, InspectionConstants, Inspector};
//!
//! # fn example(img: ImageRgb8<'_>) {
//! let inspector = Inspector::new(CalibrationTable::reference(), InspectionConstants::default());
//! match inspector.measure(&img, "M6x25") {
//!     Ok(m) => println!("{} x {} mm: {}", m.length_display(), m.width_display(), m.verdict),
//!     Err(err) => println!("no measurement: {err}"),
//! }
//! # }
//! ```

mod params;
mod pipeline;

pub use params::InspectParams;
pub use pipeline::Inspector;

use crate::calibration::{CalibrationTable, InspectionConstants};
use crate::contour::ContourRectFitter;
use crate::error::InspectError;
use crate::image::ImageRgb8;
use crate::segment::EdgeSegmenter;
use crate::types::Measurement;

/// One-shot measurement with the default stages, borrowing the
/// configuration instead of building an owning [`Inspector`].
pub fn measure(
    image: &ImageRgb8<'_>,
    part_id: &str,
    calibration: &CalibrationTable,
    constants: &InspectionConstants,
) -> Result<Measurement, InspectError> {
    pipeline::run(
        calibration,
        constants,
        &EdgeSegmenter::default(),
        &ContourRectFitter::new(),
        image,
        part_id,
    )
}
