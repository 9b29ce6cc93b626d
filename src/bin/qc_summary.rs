use screw_inspect::image::io::write_json_file;
use screw_inspect::report::summary::DEFAULT_SUMMARY_TOLERANCE_MM;
use screw_inspect::report::{read_csv, BatchSummary};
use screw_inspect::CalibrationTable;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let csv_path = args.next().ok_or_else(usage)?;
    let tolerance = match args.next() {
        Some(t) => t
            .parse::<f64>()
            .map_err(|e| format!("Invalid tolerance {t:?}: {e}"))?,
        None => DEFAULT_SUMMARY_TOLERANCE_MM,
    };

    let csv_path = Path::new(&csv_path);
    let rows = read_csv(csv_path).map_err(|e| e.to_string())?;
    let summary = BatchSummary::from_rows(&rows, &CalibrationTable::reference(), tolerance);
    print!("{}", summary.render_text());

    let out_path = csv_path.with_file_name("qc_summary.json");
    write_json_file(&out_path, &summary).map_err(|e| e.to_string())?;
    println!("Summary saved at {}", out_path.display());
    Ok(())
}

fn usage() -> String {
    "Usage: qc_summary <measurements.csv> [tolerance_mm]".to_string()
}
