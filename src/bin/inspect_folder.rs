use screw_inspect::batch::{list_images, measure_paths_with, BatchOutcome};
use screw_inspect::config::load_config;
use screw_inspect::image::io::{save_rgb_image, write_json_file};
use screw_inspect::report::{annotate, annotate_labelled, load_font, write_csv, BatchSummary, ReportRow};
use screw_inspect::Inspector;
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;

    let images = list_images(&config.input_dir, &config.extension).map_err(|e| e.to_string())?;
    if images.is_empty() {
        return Err(format!(
            "No .{} images in {}",
            config.extension.trim_start_matches('.'),
            config.input_dir.display()
        ));
    }

    let font = match &config.output.font {
        Some(path) => Some(load_font(path).map_err(|e| e.to_string())?),
        None => None,
    };
    let output = &config.output;
    let part_id = config.part_id.as_str();
    let tolerance = config.params.constants.tolerance_mm();
    let inspector = Inspector::from_params(config.params);
    let start = Instant::now();
    let records = measure_paths_with(&inspector, &images, part_id, |record, img| {
        if !output.annotate {
            return;
        }
        let Some(m) = record.measurement() else {
            return;
        };
        let annotated = match &font {
            Some(font) => annotate_labelled(img, m, part_id, font),
            None => annotate(img, m),
        };
        let out_path = output.dir.join(&record.image_name);
        if let Err(err) = save_rgb_image(&annotated, &out_path) {
            log::warn!("{err}");
        }
    });
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    for record in &records {
        match &record.outcome {
            BatchOutcome::Measured(m) => {
                println!(
                    "{}: {}mm, {}mm -> {}",
                    record.image_name,
                    m.length_display(),
                    m.width_display(),
                    m.verdict
                );
            }
            BatchOutcome::NotFound => println!("{}: No screw detected", record.image_name),
            BatchOutcome::UnknownPartId(id) => {
                return Err(format!("Unknown part id {id:?}"));
            }
            BatchOutcome::LoadFailed(reason) => println!("{}: skipped ({reason})", record.image_name),
        }
    }

    let rows = ReportRow::from_batch(&records, &config.part_id);
    let csv_path = config.output.csv_path();
    write_csv(&csv_path, &rows).map_err(|e| e.to_string())?;

    let summary = BatchSummary::from_rows(&rows, inspector.calibration(), tolerance);
    let summary_path = config.output.summary_path();
    write_json_file(&summary_path, &summary).map_err(|e| e.to_string())?;

    println!(
        "Inspected {} images in {:.1} ms; {} measured, {} accepted",
        records.len(),
        elapsed_ms,
        summary.total,
        summary.accepted
    );
    println!("Measurements written to {}", csv_path.display());
    println!("Summary written to {}", summary_path.display());
    Ok(())
}

fn usage() -> String {
    "Usage: inspect_folder <config.json>".to_string()
}
