//! Folder-level driver: enumerate images, measure each one, keep going on
//! per-image failures.
//!
//! Images are independent, so with the `parallel` feature they are measured
//! on the rayon pool. Output order always follows input order.

use crate::contour::ShapeFitter;
use crate::error::{FileError, InspectError};
use crate::image::io::load_rgb_image;
use crate::image::ImageRgb8;
use crate::inspector::Inspector;
use crate::segment::Segmenter;
use crate::types::Measurement;
use image::RgbImage;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Per-image result of a batch run.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchOutcome {
    Measured(Measurement),
    NotFound,
    UnknownPartId(String),
    /// The file could not be read or decoded; carries the error text.
    LoadFailed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct BatchRecord {
    pub path: PathBuf,
    /// File name without directories, as written to reports.
    pub image_name: String,
    pub outcome: BatchOutcome,
}

impl BatchRecord {
    pub fn measurement(&self) -> Option<&Measurement> {
        match &self.outcome {
            BatchOutcome::Measured(m) => Some(m),
            _ => None,
        }
    }
}

/// Files in `dir` whose extension matches `extension` (case-insensitive,
/// with or without the leading dot), sorted by path.
pub fn list_images(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, FileError> {
    let wanted = extension.trim_start_matches('.').to_ascii_lowercase();
    let entries = std::fs::read_dir(dir).map_err(|e| FileError::io(dir, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| FileError::io(dir, e))?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.to_ascii_lowercase() == wanted);
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Measure every image in `paths` as `part_id`.
///
/// An unknown part id is detected once, before any file is opened.
pub fn measure_paths<S, F>(
    inspector: &Inspector<S, F>,
    paths: &[PathBuf],
    part_id: &str,
) -> Vec<BatchRecord>
where
    S: Segmenter + Sync,
    F: ShapeFitter + Sync,
{
    measure_paths_with(inspector, paths, part_id, |_, _| {})
}

/// [`measure_paths`], calling `on_measured` with the decoded image of every
/// record that produced a measurement. The hook runs on the worker that
/// measured the image, so nothing is decoded twice.
pub fn measure_paths_with<S, F, H>(
    inspector: &Inspector<S, F>,
    paths: &[PathBuf],
    part_id: &str,
    on_measured: H,
) -> Vec<BatchRecord>
where
    S: Segmenter + Sync,
    F: ShapeFitter + Sync,
    H: Fn(&BatchRecord, &RgbImage) + Sync,
{
    if inspector.calibration().get(part_id).is_none() {
        log::warn!("unknown part id {part_id:?}; skipping {} images", paths.len());
        return paths
            .iter()
            .map(|p| record(p, BatchOutcome::UnknownPartId(part_id.to_string())))
            .collect();
    }

    #[cfg(feature = "parallel")]
    {
        paths
            .par_iter()
            .map(|p| measure_one(inspector, p, part_id, &on_measured))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        paths
            .iter()
            .map(|p| measure_one(inspector, p, part_id, &on_measured))
            .collect()
    }
}

fn measure_one<S: Segmenter, F: ShapeFitter, H: Fn(&BatchRecord, &RgbImage)>(
    inspector: &Inspector<S, F>,
    path: &Path,
    part_id: &str,
    on_measured: &H,
) -> BatchRecord {
    let img = match load_rgb_image(path) {
        Ok(img) => img,
        Err(err) => {
            log::warn!("{err}");
            return record(path, BatchOutcome::LoadFailed(err.to_string()));
        }
    };
    let outcome = match inspector.measure(&ImageRgb8::from(&img), part_id) {
        Ok(m) => BatchOutcome::Measured(m),
        Err(InspectError::NotFound) => {
            log::warn!("{}: no screw detected", path.display());
            BatchOutcome::NotFound
        }
        Err(InspectError::UnknownPartId(id)) => BatchOutcome::UnknownPartId(id),
    };
    let rec = record(path, outcome);
    if rec.measurement().is_some() {
        on_measured(&rec, &img);
    }
    rec
}

fn record(path: &Path, outcome: BatchOutcome) -> BatchRecord {
    BatchRecord {
        path: path.to_path_buf(),
        image_name: image_name(path),
        outcome,
    }
}

pub(crate) fn image_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{CalibrationTable, InspectionConstants};
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn list_images_filters_and_sorts() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        for name in ["b.jpg", "a.JPG", "c.png", "notes.txt"] {
            fs::write(dir.join(name), b"x").unwrap();
        }
        fs::create_dir_all(dir.join("sub.jpg")).unwrap();

        let found = list_images(dir, ".jpg").unwrap();
        let names: Vec<_> = found.iter().map(|p| image_name(p)).collect();
        assert_eq!(names, vec!["a.JPG", "b.jpg"]);
        assert_eq!(list_images(dir, "png").unwrap().len(), 1);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let err = list_images(Path::new("/definitely/not/here"), "jpg").unwrap_err();
        assert!(matches!(err, FileError::Io { .. }));
    }

    #[test]
    fn batch_continues_past_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.png");
        fs::write(&broken, b"not an image").unwrap();
        let black = dir.path().join("black.png");
        image::RgbImage::new(64, 48).save(&black).unwrap();

        let inspector = Inspector::new(CalibrationTable::reference(), InspectionConstants::default());
        let records = measure_paths(&inspector, &[broken.clone(), black.clone()], "M6x25");
        assert_eq!(records.len(), 2);
        assert!(matches!(records[0].outcome, BatchOutcome::LoadFailed(_)));
        assert_eq!(records[1].outcome, BatchOutcome::NotFound);
        assert_eq!(records[1].image_name, "black.png");
        assert!(records[1].measurement().is_none());

        let unknown = measure_paths(&inspector, &[broken, black], "M99");
        assert!(unknown
            .iter()
            .all(|r| r.outcome == BatchOutcome::UnknownPartId("M99".to_string())));
    }

    #[test]
    fn hook_sees_decoded_image_of_measured_records_only() {
        let dir = tempfile::tempdir().unwrap();
        let bar = dir.path().join("bar.png");
        image::RgbImage::from_fn(320, 240, |x, y| {
            if (60..260).contains(&x) && (100..150).contains(&y) {
                image::Rgb([230, 230, 230])
            } else {
                image::Rgb([20, 20, 20])
            }
        })
        .save(&bar)
        .unwrap();
        let black = dir.path().join("black.png");
        image::RgbImage::new(64, 48).save(&black).unwrap();

        let inspector = Inspector::new(CalibrationTable::reference(), InspectionConstants::default());
        let seen = AtomicUsize::new(0);
        let records = measure_paths_with(&inspector, &[bar, black], "M6x25", |rec, img| {
            assert_eq!(rec.image_name, "bar.png");
            assert_eq!(img.dimensions(), (320, 240));
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert!(records[0].measurement().is_some());
        assert_eq!(records[1].outcome, BatchOutcome::NotFound);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
