#![allow(dead_code)]

pub const BENCH: [u8; 3] = [25, 25, 25];
pub const METAL: [u8; 3] = [210, 210, 210];

/// Flat dark RGB frame.
pub fn bench_rgb(width: usize, height: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = Vec::with_capacity(width * height * 3);
    for _ in 0..width * height {
        img.extend_from_slice(&BENCH);
    }
    img
}

/// Fill the axis-aligned block `[x0, x0 + w) × [y0, y0 + h)`.
pub fn fill_rect(img: &mut [u8], width: usize, x0: usize, y0: usize, w: usize, h: usize) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            let i = (y * width + x) * 3;
            img[i..i + 3].copy_from_slice(&METAL);
        }
    }
}

/// Fill a `len × wid` rectangle centred at `(cx, cy)` and rotated by
/// `angle_deg`, sampling pixel centres.
pub fn fill_rotated_rect(
    img: &mut [u8],
    width: usize,
    height: usize,
    (cx, cy): (f64, f64),
    (len, wid): (f64, f64),
    angle_deg: f64,
) {
    let (s, c) = angle_deg.to_radians().sin_cos();
    for y in 0..height {
        for x in 0..width {
            let (dx, dy) = (x as f64 - cx, y as f64 - cy);
            let u = dx * c + dy * s;
            let v = -dx * s + dy * c;
            if u.abs() <= len * 0.5 && v.abs() <= wid * 0.5 {
                let i = (y * width + x) * 3;
                img[i..i + 3].copy_from_slice(&METAL);
            }
        }
    }
}

/// Alternating bright ticks on rows `[y0, height)`, like the ruler under
/// the reference fixture.
pub fn draw_ruler(img: &mut [u8], width: usize, height: usize, y0: usize) {
    for y in y0..height {
        for x in 0..width {
            if (x / 10) % 2 == 0 {
                let i = (y * width + x) * 3;
                img[i..i + 3].copy_from_slice(&METAL);
            }
        }
    }
}

/// Frame with one axis-aligned screw of `w × h` pixels centred in the ROI and
/// a ruler strip from row 880 down.
pub fn screw_frame(width: usize, height: usize, w: usize, h: usize) -> Vec<u8> {
    let mut img = bench_rgb(width, height);
    fill_rect(&mut img, width, (width - w) / 2, 400 - h / 2, w, h);
    if height > 880 {
        draw_ruler(&mut img, width, height, 880);
    }
    img
}
