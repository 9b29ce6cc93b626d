//! Outputs of a batch run: measurement CSV, annotated images and the QC
//! summary computed from the CSV.

pub mod annotate;
pub mod csv;
pub mod summary;

pub use annotate::{annotate, annotate_labelled, load_font};
pub use csv::{read_csv, write_csv, ReportRow};
pub use summary::{BatchSummary, DimStats, ToleranceBand};
