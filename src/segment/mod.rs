//! Segmenter: raw RGB region → binary edge mask isolating the screw.
//!
//! Stages, in order:
//! 1. luminance conversion ([`gray`]),
//! 2. separable Gaussian smoothing to suppress sensor noise ([`filters`]),
//! 3. Canny edge detection ([`crate::edges`]),
//! 4. square dilation to reconnect outline fragments broken at
//!    low-contrast boundaries ([`morph`]).
//!
//! The segmenter never fails: a region without edges yields an all-zero mask
//! and the shape fitter reports it as "not found".

pub mod filters;
pub mod gray;
pub mod morph;
mod options;

pub use options::SegmentOptions;

use crate::edges::canny;
use crate::image::{BinaryMask, ImageRgb8};
use filters::{gaussian_kernel, separable_blur};
use log::debug;

/// Turns a region of interest into a binary foreground mask.
pub trait Segmenter {
    fn segment(&self, roi: &ImageRgb8<'_>) -> BinaryMask;
}

/// Blur → Canny → dilate segmenter.
#[derive(Clone, Debug, Default)]
pub struct EdgeSegmenter {
    options: SegmentOptions,
}

impl EdgeSegmenter {
    pub fn new(options: SegmentOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }
}

impl Segmenter for EdgeSegmenter {
    fn segment(&self, roi: &ImageRgb8<'_>) -> BinaryMask {
        let opts = &self.options;
        let gray = gray::to_gray(roi);
        let kernel = gaussian_kernel(opts.blur_kernel);
        let smooth = separable_blur(gray.as_view(), kernel.as_ref());
        let edges = canny(smooth.as_view(), opts.canny_low, opts.canny_high);
        let edge_px = edges.count_foreground();
        let mask = morph::dilate(&edges, opts.dilate_kernel, opts.dilate_iterations);
        debug!(
            "EdgeSegmenter::segment {}x{} edges={} dilated={}",
            roi.w,
            roi.h,
            edge_px,
            mask.count_foreground()
        );
        mask
    }
}

impl<S: Segmenter + ?Sized> Segmenter for &S {
    fn segment(&self, roi: &ImageRgb8<'_>) -> BinaryMask {
        (**self).segment(roi)
    }
}
