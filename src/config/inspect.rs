use crate::error::FileError;
use crate::inspector::InspectParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings of the `inspect_folder` batch tool.
///
/// ```json
/// {
///   "input_dir": "samples",
///   "extension": "jpg",
///   "part_id": "M6x25",
///   "constants": { "tolerance_mm": 1.5, "pixels_per_mm": 10.0, "roi_top_bound": 860 },
///   "output": { "dir": "results", "annotate": true, "font": "fonts/DejaVuSans.ttf" }
/// }
/// ```
///
/// `calibration`, `constants` and `segment` may be omitted; they default to
/// the reference station.
#[derive(Debug, Deserialize)]
pub struct InspectConfig {
    pub input_dir: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
    pub part_id: String,
    #[serde(flatten)]
    pub params: InspectParams,
    #[serde(default)]
    pub output: InspectOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct InspectOutputConfig {
    pub dir: PathBuf,
    /// Defaults to `<dir>/measurements.csv`.
    pub csv: Option<PathBuf>,
    /// Defaults to `<dir>/summary.json`.
    pub summary_json: Option<PathBuf>,
    /// Write a copy of each measured image with the rectangle drawn on it.
    pub annotate: bool,
    /// Font for the dimension/verdict/part labels on annotated images.
    /// Without one only the outline is drawn.
    pub font: Option<PathBuf>,
}

impl Default for InspectOutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("results"),
            csv: None,
            summary_json: None,
            annotate: true,
            font: None,
        }
    }
}

impl InspectOutputConfig {
    pub fn csv_path(&self) -> PathBuf {
        self.csv
            .clone()
            .unwrap_or_else(|| self.dir.join("measurements.csv"))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.summary_json
            .clone()
            .unwrap_or_else(|| self.dir.join("summary.json"))
    }
}

fn default_extension() -> String {
    "jpg".to_string()
}

pub fn load_config(path: &Path) -> Result<InspectConfig, FileError> {
    let data = fs::read_to_string(path).map_err(|e| FileError::io(path, e))?;
    parse_config(&data).map_err(|e| FileError::json(path, e))
}

pub fn parse_config(json: &str) -> Result<InspectConfig, serde_json::Error> {
    serde_json::from_str(json)
}
