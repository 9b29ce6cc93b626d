//! Borrowed 3-channel 8-bit view, the raw input of the inspection pipeline.
//!
//! Channel order is R, G, B, interleaved. The view never owns pixels: the
//! caller keeps the buffer for the duration of a measurement and the pipeline
//! drops every reference before returning.

use super::traits::ImageView;

#[derive(Clone, Copy, Debug)]
pub struct ImageRgb8<'a> {
    pub w: usize,
    pub h: usize,
    /// Bytes between consecutive rows (>= `3 * w`)
    pub stride: usize,
    pub data: &'a [u8],
}

impl<'a> ImageRgb8<'a> {
    /// View over a tightly packed `w × h × 3` buffer.
    ///
    /// Returns `None` when `data` is shorter than the declared size.
    pub fn from_slice(w: usize, h: usize, data: &'a [u8]) -> Option<Self> {
        (data.len() >= w * h * 3).then_some(Self {
            w,
            h,
            stride: w * 3,
            data,
        })
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = y * self.stride + x * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Restrict the view to rows `[0, rows)`, clamped to the image height.
    ///
    /// Row and column indices of the returned view coincide with the parent's.
    pub fn top_rows(&self, rows: usize) -> ImageRgb8<'a> {
        ImageRgb8 {
            w: self.w,
            h: self.h.min(rows),
            stride: self.stride,
            data: self.data,
        }
    }
}

impl<'a> From<&'a image::RgbImage> for ImageRgb8<'a> {
    fn from(img: &'a image::RgbImage) -> Self {
        let w = img.width() as usize;
        ImageRgb8 {
            w,
            h: img.height() as usize,
            stride: w * 3,
            data: img.as_raw(),
        }
    }
}

impl<'a> ImageView for ImageRgb8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn channels(&self) -> usize {
        3
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * 3]
    }
}
