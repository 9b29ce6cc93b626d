#![doc = include_str!("../README.md")]

// Pipeline stages, bottom-up.
pub mod calibration;
pub mod classify;
pub mod contour;
pub mod diagnostics;
pub mod edges;
pub mod error;
pub mod geometry;
pub mod image;
pub mod inspector;
pub mod measure;
pub mod segment;
pub mod types;

// Batch tooling around the pipeline.
pub mod batch;
pub mod config;
pub mod report;

// --- High-level re-exports -------------------------------------------------

pub use crate::calibration::{CalibrationTable, InspectionConstants, PartSpec};
pub use crate::classify::Verdict;
pub use crate::contour::{ContourRectFitter, ContourSelector, LargestArea, ShapeFitter};
pub use crate::diagnostics::PipelineTrace;
pub use crate::error::{CalibrationError, FileError, InspectError};
pub use crate::inspector::{measure, InspectParams, Inspector};
pub use crate::segment::{EdgeSegmenter, SegmentOptions, Segmenter};
pub use crate::types::{Measurement, OrientedRect};

// --- Prelude ---------------------------------------------------------------

/// Everything needed to measure an in-memory image.
///
/// ```no_run
/// use screw_inspect::prelude::*;
///
/// # fn main() {
/// let (w, h) = (640usize, 480usize);
/// let rgb = vec![0u8; w * h * 3];
/// let img = ImageRgb8 { w, h, stride: w * 3, data: &rgb };
///
/// let inspector = Inspector::new(CalibrationTable::reference(), InspectionConstants::default());
/// match inspector.measure(&img, "M6x25") {
///     Ok(m) => println!("{:.2} x {:.2} mm -> {}", m.length_mm, m.width_mm, m.verdict),
///     Err(e) => println!("{e}"),
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageRgb8;
    pub use crate::{
        CalibrationTable, InspectError, InspectionConstants, Inspector, Measurement, Verdict,
    };
}
