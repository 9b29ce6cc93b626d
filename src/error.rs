//! Error types for inspection, calibration and the file-facing outer layers.

use std::path::PathBuf;
use thiserror::Error;

/// Per-image failure surfaced by [`Inspector::measure`](crate::Inspector::measure).
///
/// Neither variant is fatal for a batch: callers log and move on to the next
/// image. Both are deterministic, so retrying the same image is pointless.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InspectError {
    /// The requested part type has no calibration entry.
    #[error("unknown part id `{0}`")]
    UnknownPartId(String),

    /// No foreground contour was found inside the region of interest.
    #[error("no screw detected in the region of interest")]
    NotFound,
}

/// Validation failures raised while building calibration data.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CalibrationError {
    /// A part entry carries an empty identifier.
    #[error("part id must not be empty")]
    EmptyPartId,

    /// Two entries share the same identifier.
    #[error("duplicate part id `{0}`")]
    DuplicatePart(String),

    /// A nominal dimension is non-finite or not strictly positive.
    #[error("part `{part_id}`: {field} must be finite and positive, got {value}")]
    InvalidDimension {
        part_id: String,
        field: &'static str,
        value: f64,
    },

    /// The table holds no entries.
    #[error("calibration table is empty")]
    EmptyTable,

    /// A global constant is outside its valid range.
    #[error("invalid constant {name}: {value}")]
    InvalidConstant { name: &'static str, value: f64 },
}

/// Failures of the file-facing layers (config, images, CSV, JSON).
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode or encode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} is not a usable font file", path.display())]
    Font { path: PathBuf },

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

impl FileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspect_error_display_names_part() {
        let err = InspectError::UnknownPartId("M5x12".to_string());
        assert!(err.to_string().contains("M5x12"));
        assert!(InspectError::NotFound.to_string().contains("no screw"));
    }

    #[test]
    fn calibration_error_display_carries_field() {
        let err = CalibrationError::InvalidDimension {
            part_id: "M6x25".to_string(),
            field: "nominal_width_mm",
            value: -1.0,
        };
        let text = err.to_string();
        assert!(text.contains("M6x25"));
        assert!(text.contains("nominal_width_mm"));
    }
}
