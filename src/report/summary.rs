//! Aggregate quality figures over a measurement log.

use super::csv::ReportRow;
use crate::calibration::CalibrationTable;
use crate::classify::Verdict;
use serde::Serialize;
use std::collections::BTreeMap;

/// Tolerance used by the QC overview when none is given.
pub const DEFAULT_SUMMARY_TOLERANCE_MM: f64 = 1.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation; zero for fewer than two values.
    pub std_dev: f64,
}

impl DimStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let n = values.len();
        if n == 0 {
            return None;
        }
        let mean = values.iter().sum::<f64>() / n as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let std_dev = if n > 1 {
            let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };
        Some(Self {
            count: n,
            mean,
            min,
            max,
            std_dev,
        })
    }
}

/// Nominal value with its lower and upper acceptance limits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ToleranceBand {
    pub nominal: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ToleranceBand {
    pub fn new(nominal: f64, tolerance: f64) -> Self {
        Self {
            nominal,
            lower: nominal - tolerance,
            upper: nominal + tolerance,
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.lower && v <= self.upper
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Percentage of rows not accepted; zero for an empty log.
    pub reject_rate_pct: f64,
    /// Row count per status string, as found in the log.
    pub status_counts: BTreeMap<String, usize>,
    /// Part type of the first accepted row; the bands refer to it.
    pub part_type: Option<String>,
    pub length: Option<DimStats>,
    pub width: Option<DimStats>,
    pub length_band: Option<ToleranceBand>,
    pub width_band: Option<ToleranceBand>,
    pub tolerance_mm: f64,
}

impl BatchSummary {
    /// Statistics cover accepted rows only; missing numbers are skipped.
    pub fn from_rows(rows: &[ReportRow], calibration: &CalibrationTable, tolerance_mm: f64) -> Self {
        let accepted_rows: Vec<&ReportRow> = rows
            .iter()
            .filter(|r| Verdict::parse(&r.status) == Some(Verdict::Accepted))
            .collect();
        let total = rows.len();
        let accepted = accepted_rows.len();
        let rejected = total - accepted;
        let reject_rate_pct = if total > 0 {
            rejected as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        let mut status_counts = BTreeMap::new();
        for r in rows {
            *status_counts.entry(r.status.clone()).or_insert(0) += 1;
        }

        let lengths: Vec<f64> = accepted_rows.iter().filter_map(|r| r.length_mm).collect();
        let widths: Vec<f64> = accepted_rows.iter().filter_map(|r| r.width_mm).collect();

        let part_type = accepted_rows.first().map(|r| r.part_type.clone());
        let part = part_type.as_deref().and_then(|t| calibration.get(t));
        if part_type.is_some() && part.is_none() {
            log::warn!("no calibration entry for part type {part_type:?}; tolerance bands omitted");
        }

        Self {
            total,
            accepted,
            rejected,
            reject_rate_pct,
            status_counts,
            part_type,
            length: DimStats::from_values(&lengths),
            width: DimStats::from_values(&widths),
            length_band: part.map(|s| ToleranceBand::new(s.nominal_length_mm, tolerance_mm)),
            width_band: part.map(|s| ToleranceBand::new(s.nominal_width_mm, tolerance_mm)),
            tolerance_mm,
        }
    }

    /// Multi-line text block for terminal output.
    pub fn render_text(&self) -> String {
        let mut out = format!(
            "TOTAL SAMPLES: {}\nACCEPTED: {}\nREJECTED: {}\nReject Rate: {:.2}%\n",
            self.total, self.accepted, self.rejected, self.reject_rate_pct
        );
        for (name, stats, band) in [
            ("Length", &self.length, &self.length_band),
            ("Width", &self.width, &self.width_band),
        ] {
            match stats {
                Some(s) => out.push_str(&format!(
                    "{name} (accepted): mean {:.2} mm, min {:.2}, max {:.2}, std {:.3}\n",
                    s.mean, s.min, s.max, s.std_dev
                )),
                None => out.push_str(&format!("{name} (accepted): no accepted screws\n")),
            }
            if let Some(b) = band {
                out.push_str(&format!(
                    "{name} nominal {:.2} mm, limits [{:.2}, {:.2}]\n",
                    b.nominal, b.lower, b.upper
                ));
            }
        }
        out
    }
}
