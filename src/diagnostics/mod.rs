//! Diagnostics returned by [`Inspector::measure_traced`](crate::Inspector::measure_traced).
//!
//! The trace never influences the result; it only records what each stage
//! saw and how long it took.

pub mod timing;

pub use timing::{StageTiming, TimingBreakdown};

use crate::types::OrientedRect;
use serde::Serialize;

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub roi_width: usize,
    pub roi_height: usize,
}

/// What the pipeline did for one image.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    /// Foreground pixels in the segmenter's mask.
    pub mask_foreground: usize,
    /// Candidate contours, when the fitter reports them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contours: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect_px: Option<OrientedRect>,
}

impl PipelineTrace {
    /// One-line human summary, for logs and demo output.
    pub fn summary(&self) -> String {
        let contours = self
            .contours
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        let rect = self
            .rect_px
            .as_ref()
            .map(|r| format!("{:.1}x{:.1}px@{:.1}deg", r.size.0, r.size.1, r.angle_deg))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "roi={}x{} mask_px={} contours={} rect={} total={:.2}ms",
            self.input.roi_width,
            self.input.roi_height,
            self.mask_foreground,
            contours,
            rect,
            self.timings.total_ms
        )
    }
}
