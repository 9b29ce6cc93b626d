//! Binary mask produced by the segmenter: 0 is background, 255 is foreground.

use super::traits::{ImageView, ImageViewMut};
use super::u8::{GrayImageU8, ImageU8};

pub const FOREGROUND: u8 = 255;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    buf: GrayImageU8,
}

impl BinaryMask {
    /// All-background mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            buf: GrayImageU8::new(w, h),
        }
    }

    /// Build a mask from a predicate evaluated at each pixel.
    pub fn from_fn(w: usize, h: usize, mut on: impl FnMut(usize, usize) -> bool) -> Self {
        let mut mask = Self::new(w, h);
        for y in 0..h {
            let row = mask.buf.row_mut(y);
            for (x, px) in row.iter_mut().enumerate() {
                if on(x, y) {
                    *px = FOREGROUND;
                }
            }
        }
        mask
    }

    /// Any nonzero sample of `gray` becomes foreground.
    pub fn from_gray(mut gray: GrayImageU8) -> Self {
        for y in 0..gray.height() {
            for px in gray.row_mut(y) {
                if *px != 0 {
                    *px = FOREGROUND;
                }
            }
        }
        Self { buf: gray }
    }

    #[inline]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.buf.get(x, y) != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        self.buf.set(x, y, if on { FOREGROUND } else { 0 });
    }

    pub fn count_foreground(&self) -> usize {
        self.buf.as_slice().iter().filter(|&&v| v != 0).count()
    }

    pub fn as_view(&self) -> ImageU8<'_> {
        self.buf.as_view()
    }

    pub fn as_gray(&self) -> &GrayImageU8 {
        &self.buf
    }
}

impl ImageView for BinaryMask {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.buf.width()
    }
    #[inline]
    fn height(&self) -> usize {
        self.buf.height()
    }
    #[inline]
    fn stride(&self) -> usize {
        self.buf.width()
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        self.buf.row(y)
    }
}

impl ImageViewMut for BinaryMask {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        self.buf.row_mut(y)
    }
}
