use screw_inspect::image::ImageRgb8;
use screw_inspect::{CalibrationTable, InspectionConstants, Inspector};
use std::env;

/// Synthetic frame: a bright rotated bar on a dark bench, plus a ruler strip
/// below the ROI bound that the inspector must ignore.
fn synthetic_frame(w: usize, h: usize, len_px: f64, wid_px: f64, angle_deg: f64) -> Vec<u8> {
    let (s, c) = angle_deg.to_radians().sin_cos();
    let (cx, cy) = (w as f64 * 0.5, 430.0);
    let mut buf = vec![25u8; w * h * 3];
    for y in 0..h {
        for x in 0..w {
            let (dx, dy) = (x as f64 - cx, y as f64 - cy);
            let u = dx * c + dy * s;
            let v = -dx * s + dy * c;
            let on_bar = u.abs() <= len_px * 0.5 && v.abs() <= wid_px * 0.5;
            let on_ruler = y >= 880 && (x / 10) % 2 == 0;
            if on_bar || on_ruler {
                let i = (y * w + x) * 3;
                buf[i..i + 3].copy_from_slice(&[210, 205, 190]);
            }
        }
    }
    buf
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let part_id = args.next().unwrap_or_else(|| "M6x25".to_string());
    let angle_deg = match args.next() {
        Some(a) => a.parse::<f64>().map_err(|e| format!("Invalid angle {a:?}: {e}"))?,
        None => 20.0,
    };

    let (w, h) = (1280usize, 960usize);
    let rgb = synthetic_frame(w, h, 305.0, 101.0, angle_deg);
    let img = ImageRgb8::from_slice(w, h, &rgb).ok_or("Synthetic buffer too small")?;

    let inspector = Inspector::new(CalibrationTable::reference(), InspectionConstants::default());
    let (result, trace) = inspector.measure_traced(&img, &part_id);
    println!("{}", trace.summary());
    for stage in &trace.timings.stages {
        println!("  {:<9} {:.3} ms", stage.label, stage.elapsed_ms);
    }
    let m = result.map_err(|e| e.to_string())?;
    println!(
        "{part_id}: L={}mm W={}mm angle={:.1}deg -> {}",
        m.length_display(),
        m.width_display(),
        m.rect.angle_deg,
        m.verdict
    );
    Ok(())
}
