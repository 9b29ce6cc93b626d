//! Measurement log in CSV form, one row per measured image.
//!
//! Columns: `Image,Length(mm),Width(mm),Status,Type`. Numbers are written
//! with two decimals. Reading is lenient on the numeric columns: a value that
//! does not parse becomes `None` instead of failing the whole file.

use crate::batch::BatchRecord;
use crate::error::FileError;
use crate::image::io::ensure_parent_dir;
use crate::types::Measurement;
use std::fs;
use std::path::Path;

pub const HEADER: [&str; 5] = ["Image", "Length(mm)", "Width(mm)", "Status", "Type"];

#[derive(Clone, Debug, PartialEq)]
pub struct ReportRow {
    pub image: String,
    pub length_mm: Option<f64>,
    pub width_mm: Option<f64>,
    /// `ACCEPTED` or `REJECTED` for rows written by this crate.
    pub status: String,
    pub part_type: String,
}

impl ReportRow {
    pub fn from_measurement(image: impl Into<String>, m: &Measurement, part_type: &str) -> Self {
        Self {
            image: image.into(),
            length_mm: Some(m.length_mm),
            width_mm: Some(m.width_mm),
            status: m.verdict.as_str().to_string(),
            part_type: part_type.to_string(),
        }
    }

    /// Rows for the measured records of a batch; other outcomes are skipped.
    pub fn from_batch(records: &[BatchRecord], part_type: &str) -> Vec<Self> {
        records
            .iter()
            .filter_map(|r| {
                r.measurement()
                    .map(|m| Self::from_measurement(r.image_name.clone(), m, part_type))
            })
            .collect()
    }

    fn fields(&self) -> [String; 5] {
        let num = |v: Option<f64>| v.map(|v| format!("{v:.2}")).unwrap_or_default();
        [
            self.image.clone(),
            num(self.length_mm),
            num(self.width_mm),
            self.status.clone(),
            self.part_type.clone(),
        ]
    }
}

/// Header line plus one line per row, each terminated by `\n`.
pub fn format_csv(rows: &[ReportRow]) -> String {
    let mut out = HEADER.join(",");
    out.push('\n');
    for row in rows {
        let line: Vec<String> = row.fields().iter().map(|f| quote(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

pub fn write_csv(path: &Path, rows: &[ReportRow]) -> Result<(), FileError> {
    ensure_parent_dir(path)?;
    fs::write(path, format_csv(rows)).map_err(|e| FileError::io(path, e))
}

pub fn read_csv(path: &Path) -> Result<Vec<ReportRow>, FileError> {
    let text = fs::read_to_string(path).map_err(|e| FileError::io(path, e))?;
    parse_csv(&text).map_err(|(line, message)| FileError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    })
}

/// Parse CSV text; columns are located by header name, in any order.
/// Errors carry the 1-based line number.
pub fn parse_csv(text: &str) -> Result<Vec<ReportRow>, (usize, String)> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.trim().is_empty());

    let Some((header_line, header)) = lines.next() else {
        return Err((1, "missing header".to_string()));
    };
    let names = split_record(header);
    let mut idx = [0usize; 5];
    for (slot, want) in idx.iter_mut().zip(HEADER) {
        *slot = names
            .iter()
            .position(|n| n.trim() == want)
            .ok_or_else(|| (header_line, format!("missing column `{want}`")))?;
    }

    let mut rows = Vec::new();
    for (line_no, line) in lines {
        let fields = split_record(line);
        let get = |i: usize| -> Result<&str, (usize, String)> {
            fields.get(i).map(|s| s.as_str()).ok_or_else(|| {
                (
                    line_no,
                    format!("expected at least {} fields, got {}", i + 1, fields.len()),
                )
            })
        };
        rows.push(ReportRow {
            image: get(idx[0])?.to_string(),
            length_mm: get(idx[1])?.trim().parse().ok(),
            width_mm: get(idx[2])?.trim().parse().ok(),
            status: get(idx[3])?.trim().to_string(),
            part_type: get(idx[4])?.trim().to_string(),
        });
    }
    Ok(rows)
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                cur.push('"');
                chars.next();
            }
            ('"', _) => in_quotes = !in_quotes,
            (',', false) => fields.push(std::mem::take(&mut cur)),
            _ => cur.push(c),
        }
    }
    fields.push(cur);
    fields
}
