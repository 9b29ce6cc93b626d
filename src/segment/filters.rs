//! Separable smoothing kernels and the 8-bit separable convolution used by
//! the segmenter.
//!
//! Odd kernel sizes up to 7 with an auto-derived sigma use fixed tap tables;
//! larger sizes sample a Gaussian with `sigma = 0.3·((k−1)·0.5 − 1) + 0.8`.
//! Borders reflect without repeating the edge sample (`dcb|abcd|cba`).

use crate::image::{GrayImageU8, ImageU8, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order), normalised to sum 1.
    fn taps(&self) -> &[f32];
}

/// Simple wrapper around a static filter kernel.
#[derive(Clone, Copy, Debug)]
pub struct StaticSeparableFilter {
    taps: &'static [f32],
}

impl StaticSeparableFilter {
    pub const fn new(taps: &'static [f32]) -> Self {
        Self { taps }
    }
}

impl SeparableFilter for StaticSeparableFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        self.taps
    }
}

pub const IDENTITY_1TAP: StaticSeparableFilter = StaticSeparableFilter::new(&[1.0]);
pub const GAUSSIAN_3TAP: StaticSeparableFilter = StaticSeparableFilter::new(&[0.25, 0.5, 0.25]);
/// Normalised 5-tap Gaussian filter `[1, 4, 6, 4, 1] / 16`.
pub const GAUSSIAN_5TAP: StaticSeparableFilter =
    StaticSeparableFilter::new(&[0.0625, 0.25, 0.375, 0.25, 0.0625]);
/// Normalised 7-tap Gaussian filter `[2, 7, 14, 18, 14, 7, 2] / 64`.
pub const GAUSSIAN_7TAP: StaticSeparableFilter = StaticSeparableFilter::new(&[
    0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
]);

/// Gaussian kernel sampled for an arbitrary odd size.
#[derive(Clone, Debug)]
pub struct SampledGaussian {
    taps: Vec<f32>,
}

impl SampledGaussian {
    pub fn new(ksize: usize, sigma: f64) -> Self {
        let radius = (ksize / 2) as f64;
        let scale = -0.5 / (sigma * sigma);
        let raw: Vec<f64> = (0..ksize)
            .map(|i| {
                let d = i as f64 - radius;
                (scale * d * d).exp()
            })
            .collect();
        let sum: f64 = raw.iter().sum();
        Self {
            taps: raw.iter().map(|v| (v / sum) as f32).collect(),
        }
    }
}

impl SeparableFilter for SampledGaussian {
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Sigma derived from the kernel size when none is given.
pub fn auto_sigma(ksize: usize) -> f64 {
    0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Gaussian smoothing kernel of odd size `ksize` with auto-derived sigma.
///
/// Even sizes are bumped to the next odd size.
pub fn gaussian_kernel(ksize: usize) -> Box<dyn SeparableFilter + Send + Sync> {
    let ksize = ksize.max(1) | 1;
    match ksize {
        1 => Box::new(IDENTITY_1TAP),
        3 => Box::new(GAUSSIAN_3TAP),
        5 => Box::new(GAUSSIAN_5TAP),
        7 => Box::new(GAUSSIAN_7TAP),
        k => Box::new(SampledGaussian::new(k, auto_sigma(k))),
    }
}

#[inline]
pub(crate) fn reflect101(i: isize, n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let n = n as isize;
    let period = 2 * (n - 1);
    let mut j = i.rem_euclid(period);
    if j >= n {
        j = period - j;
    }
    j as usize
}

/// Convolve rows then columns with `filter`, rounding back to 8 bits.
pub fn separable_blur(src: ImageU8<'_>, filter: &dyn SeparableFilter) -> GrayImageU8 {
    let (w, h) = (src.w, src.h);
    let mut out = GrayImageU8::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }
    let taps = filter.taps();
    let radius = (taps.len() / 2) as isize;

    let mut horiz = vec![0.0f32; w * h];
    for y in 0..h {
        let row = src.row(y);
        let dst = &mut horiz[y * w..(y + 1) * w];
        for (x, d) in dst.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let sx = reflect101(x as isize + k as isize - radius, w);
                acc += t * f32::from(row[sx]);
            }
            *d = acc;
        }
    }

    for y in 0..h {
        let dst = out.row_mut(y);
        for (x, d) in dst.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let sy = reflect101(y as isize + k as isize - radius, h);
                acc += t * horiz[sy * w + x];
            }
            *d = (acc + 0.5).clamp(0.0, 255.0) as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect101_mirrors_without_edge_repeat() {
        assert_eq!(reflect101(-1, 5), 1);
        assert_eq!(reflect101(-2, 5), 2);
        assert_eq!(reflect101(5, 5), 3);
        assert_eq!(reflect101(6, 5), 2);
        assert_eq!(reflect101(3, 1), 0);
    }

    #[test]
    fn kernels_are_normalised() {
        for k in [1, 3, 5, 7, 9, 11] {
            let kernel = gaussian_kernel(k);
            let sum: f32 = kernel.taps().iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "k={k} sum={sum}");
            assert_eq!(kernel.taps().len(), k);
        }
        assert_eq!(gaussian_kernel(6).taps().len(), 7);
    }

    #[test]
    fn auto_sigma_matches_size_rule() {
        assert!((auto_sigma(7) - 1.4).abs() < 1e-12);
        assert!((auto_sigma(9) - 1.7).abs() < 1e-12);
    }

    #[test]
    fn blur_preserves_flat_image() {
        let data = vec![77u8; 12 * 9];
        let src = ImageU8 {
            w: 12,
            h: 9,
            stride: 12,
            data: &data,
        };
        let out = separable_blur(src, &GAUSSIAN_7TAP);
        assert!(out.as_slice().iter().all(|&v| v == 77));
    }

    #[test]
    fn blur_spreads_a_single_spike_symmetrically() {
        let mut data = vec![0u8; 9 * 9];
        data[4 * 9 + 4] = 255;
        let src = ImageU8 {
            w: 9,
            h: 9,
            stride: 9,
            data: &data,
        };
        let out = separable_blur(src, &GAUSSIAN_7TAP);
        assert!(out.get(4, 4) > out.get(5, 4));
        assert_eq!(out.get(3, 4), out.get(5, 4));
        assert_eq!(out.get(4, 3), out.get(4, 5));
    }
}
