//! Everything an [`Inspector`](super::Inspector) needs besides the image.

use crate::calibration::{CalibrationTable, InspectionConstants};
use crate::segment::SegmentOptions;
use serde::{Deserialize, Serialize};

/// Calibration, station constants and segmenter tuning in one value.
///
/// Deserializes from JSON with every field optional; missing fields take the
/// reference station values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectParams {
    /// Part table; `[{ "part_id": "M6x25", "length": 31.0, "width": 10.0 }, ...]`.
    pub calibration: CalibrationTable,
    pub constants: InspectionConstants,
    pub segment: SegmentOptions,
}
