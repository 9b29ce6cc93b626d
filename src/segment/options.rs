use serde::{Deserialize, Serialize};

/// Tuning knobs of the edge segmenter.
///
/// Defaults match the reference inspection station: 7×7 smoothing, Canny
/// thresholds 50/150 on the L1 Sobel scale, one 3×3 dilation. None of them
/// depend on image size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentOptions {
    /// Side of the square Gaussian kernel (odd; even values are bumped).
    pub blur_kernel: usize,
    pub canny_low: f32,
    pub canny_high: f32,
    /// Side of the square dilation element.
    pub dilate_kernel: usize,
    pub dilate_iterations: usize,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            blur_kernel: 7,
            canny_low: 50.0,
            canny_high: 150.0,
            dilate_kernel: 3,
            dilate_iterations: 1,
        }
    }
}

impl SegmentOptions {
    pub fn with_blur_kernel(mut self, blur_kernel: usize) -> Self {
        self.blur_kernel = blur_kernel;
        self
    }

    pub fn with_thresholds(mut self, low: f32, high: f32) -> Self {
        self.canny_low = low;
        self.canny_high = high;
        self
    }

    pub fn with_dilation(mut self, kernel: usize, iterations: usize) -> Self {
        self.dilate_kernel = kernel;
        self.dilate_iterations = iterations;
        self
    }
}
