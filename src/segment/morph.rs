//! Binary dilation with a square structuring element.
//!
//! Samples outside the image never contribute, so dilation cannot grow the
//! foreground in from the border.
use crate::image::{BinaryMask, ImageView};

/// Dilate `mask` with a `ksize × ksize` square, `iterations` times.
pub fn dilate(mask: &BinaryMask, ksize: usize, iterations: usize) -> BinaryMask {
    let radius = (ksize.max(1) / 2) as isize;
    let mut current = mask.clone();
    if radius == 0 {
        return current;
    }
    for _ in 0..iterations {
        current = dilate_once(&current, radius);
    }
    current
}

fn dilate_once(src: &BinaryMask, radius: isize) -> BinaryMask {
    let (w, h) = (src.width(), src.height());
    // Separable max: rows first, then columns.
    let mut horiz = vec![false; w * h];
    for y in 0..h {
        let row = src.row(y);
        for x in 0..w {
            let lo = (x as isize - radius).max(0) as usize;
            let hi = ((x as isize + radius) as usize).min(w - 1);
            horiz[y * w + x] = row[lo..=hi].iter().any(|&v| v != 0);
        }
    }

    BinaryMask::from_fn(w, h, |x, y| {
        let lo = (y as isize - radius).max(0) as usize;
        let hi = ((y as isize + radius) as usize).min(h - 1);
        (lo..=hi).any(|yy| horiz[yy * w + x])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pixel_grows_to_square() {
        let mask = BinaryMask::from_fn(7, 7, |x, y| x == 3 && y == 3);
        let out = dilate(&mask, 3, 1);
        assert_eq!(out.count_foreground(), 9);
        assert!(out.is_set(2, 2) && out.is_set(4, 4));
        assert!(!out.is_set(1, 3));

        let twice = dilate(&mask, 3, 2);
        assert_eq!(twice.count_foreground(), 25);
    }

    #[test]
    fn corner_pixel_is_clipped_at_border() {
        let mask = BinaryMask::from_fn(4, 4, |x, y| x == 0 && y == 0);
        assert_eq!(dilate(&mask, 3, 1).count_foreground(), 4);
    }

    #[test]
    fn bridges_one_pixel_gap() {
        let mask = BinaryMask::from_fn(9, 3, |x, y| y == 1 && x != 4);
        let out = dilate(&mask, 3, 1);
        assert!(out.is_set(4, 1));
    }

    #[test]
    fn unit_kernel_or_zero_iterations_is_identity() {
        let mask = BinaryMask::from_fn(5, 5, |x, y| (x + y) % 3 == 0);
        assert_eq!(dilate(&mask, 1, 3), mask);
        assert_eq!(dilate(&mask, 3, 0), mask);
    }
}
