//! RGB → luminance conversion with fixed-point Rec.601 weights.

use crate::image::{GrayImageU8, ImageRgb8, ImageView, ImageViewMut};

const SHIFT: u32 = 14;
const R_W: u32 = 4899; // 0.299 · 2^14
const G_W: u32 = 9617; // 0.587 · 2^14
const B_W: u32 = 1868; // 0.114 · 2^14

#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let acc = u32::from(r) * R_W + u32::from(g) * G_W + u32::from(b) * B_W + (1 << (SHIFT - 1));
    (acc >> SHIFT) as u8
}

pub fn to_gray(src: &ImageRgb8<'_>) -> GrayImageU8 {
    let mut out = GrayImageU8::new(src.width(), src.height());
    for (y, row) in src.rows().enumerate() {
        let dst = out.row_mut(y);
        for (d, px) in dst.iter_mut().zip(row.chunks_exact(3)) {
            *d = luma(px[0], px[1], px[2]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_colours_keep_their_level() {
        for v in [0u8, 1, 30, 128, 200, 254, 255] {
            assert_eq!(luma(v, v, v), v);
        }
    }

    #[test]
    fn green_dominates_weights() {
        assert!(luma(0, 255, 0) > luma(255, 0, 0));
        assert!(luma(255, 0, 0) > luma(0, 0, 255));
    }
}
