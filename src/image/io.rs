//! I/O helpers for images and JSON, used by the batch tools only.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an owned 8-bit RGB buffer.
//! - `save_rgb_image`: write an RGB buffer (e.g. an annotated copy) to disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::error::FileError;
use image::RgbImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbImage, FileError> {
    let img = image::open(path).map_err(|e| FileError::image(path, e))?;
    Ok(img.into_rgb8())
}

/// Save an RGB buffer; the format follows the file extension.
pub fn save_rgb_image(image: &RgbImage, path: &Path) -> Result<(), FileError> {
    ensure_parent_dir(path)?;
    image.save(path).map_err(|e| FileError::image(path, e))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), FileError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| FileError::json(path, e))?;
    fs::write(path, json).map_err(|e| FileError::io(path, e))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), FileError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| FileError::io(parent, e))?;
        }
    }
    Ok(())
}
