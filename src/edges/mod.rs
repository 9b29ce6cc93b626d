//! Canny edge detection on 8‑bit intensity images.
//!
//! - [`grad`]: 3×3 Sobel gradients with L1 magnitude and replicated borders.
//! - [`nms`]: direction‑aligned non‑maximum suppression and double threshold.
//! - [`hysteresis`]: 8‑connected promotion of weak edges touching strong ones.
//!
//! Thresholds are expressed on the L1 Sobel scale of an 8‑bit image, where a
//! full black→white step produces a magnitude of 1020.

pub mod grad;
pub mod hysteresis;
pub mod nms;

pub use grad::{sobel_gradients, Grad};
pub use hysteresis::hysteresis;
pub use nms::{run_nms, EdgeClass, EdgeMap};

use crate::image::{BinaryMask, ImageU8};

/// Full Canny pass: gradients → NMS → hysteresis.
pub fn canny(src: ImageU8<'_>, low: f32, high: f32) -> BinaryMask {
    let grad = sobel_gradients(src);
    let map = run_nms(&grad, low, high);
    hysteresis(&map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_image_has_no_edges() {
        let data = vec![90u8; 16 * 16];
        let img = ImageU8 {
            w: 16,
            h: 16,
            stride: 16,
            data: &data,
        };
        assert_eq!(canny(img, 50.0, 150.0).count_foreground(), 0);
    }

    #[test]
    fn bright_square_produces_closed_outline() {
        let (w, h) = (20usize, 20usize);
        let data: Vec<u8> = (0..w * h)
            .map(|i| {
                let (x, y) = (i % w, i / w);
                if (6..14).contains(&x) && (6..14).contains(&y) {
                    220
                } else {
                    20
                }
            })
            .collect();
        let img = ImageU8 {
            w,
            h,
            stride: w,
            data: &data,
        };
        let mask = canny(img, 50.0, 150.0);
        assert!(mask.count_foreground() >= 4 * 6);
        // Nothing far from the square boundary.
        assert!(!mask.is_set(0, 0));
        assert!(!mask.is_set(10, 10));
    }
}
