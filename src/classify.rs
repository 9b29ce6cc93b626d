//! Tolerance check of measured dimensions against a nominal part.

use crate::calibration::PartSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary inspection verdict. Serialized and displayed as `ACCEPTED` /
/// `REJECTED`, the tags used in reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Accepted => "ACCEPTED",
            Verdict::Rejected => "REJECTED",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim() {
            "ACCEPTED" => Some(Verdict::Accepted),
            "REJECTED" => Some(Verdict::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed deviation of a measurement from nominal (measured − nominal).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deviation {
    pub length_mm: f64,
    pub width_mm: f64,
}

impl Deviation {
    pub fn of(length_mm: f64, width_mm: f64, part: &PartSpec) -> Self {
        Self {
            length_mm: length_mm - part.nominal_length_mm,
            width_mm: width_mm - part.nominal_width_mm,
        }
    }

    /// Both axes within `tolerance_mm`, boundary included.
    pub fn within(&self, tolerance_mm: f64) -> bool {
        self.length_mm.abs() <= tolerance_mm && self.width_mm.abs() <= tolerance_mm
    }
}

/// Accepted iff both length and width lie within `tolerance_mm` of nominal.
pub fn classify(length_mm: f64, width_mm: f64, part: &PartSpec, tolerance_mm: f64) -> Verdict {
    if Deviation::of(length_mm, width_mm, part).within(tolerance_mm) {
        Verdict::Accepted
    } else {
        Verdict::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m6x25() -> PartSpec {
        PartSpec::new("M6x25", 31.0, 10.0)
    }

    #[test]
    fn both_axes_inside_is_accepted() {
        assert_eq!(classify(30.5, 10.1, &m6x25(), 1.5), Verdict::Accepted);
    }

    #[test]
    fn boundary_is_inclusive_on_both_sides() {
        let part = m6x25();
        assert_eq!(classify(32.5, 8.5, &part, 1.5), Verdict::Accepted);
        assert_eq!(classify(29.5, 11.5, &part, 1.5), Verdict::Accepted);
    }

    #[test]
    fn any_excess_on_either_axis_rejects() {
        let part = m6x25();
        let eps = 1e-9;
        assert_eq!(classify(32.5 + eps, 10.0, &part, 1.5), Verdict::Rejected);
        assert_eq!(classify(31.0, 11.5 + eps, &part, 1.5), Verdict::Rejected);
        assert_eq!(classify(35.0, 10.1, &part, 1.5), Verdict::Rejected);
    }

    #[test]
    fn length_alone_is_not_enough() {
        let part = PartSpec::new("M8x16", 24.0, 13.0);
        assert_eq!(classify(24.0, 10.0, &part, 1.5), Verdict::Rejected);
    }

    #[test]
    fn zero_tolerance_requires_exact_match() {
        let part = m6x25();
        assert_eq!(classify(31.0, 10.0, &part, 0.0), Verdict::Accepted);
        assert_eq!(classify(31.0, 10.01, &part, 0.0), Verdict::Rejected);
    }

    #[test]
    fn verdict_tags_round_trip_through_text() {
        assert_eq!(Verdict::Accepted.to_string(), "ACCEPTED");
        assert_eq!(Verdict::parse(" REJECTED "), Some(Verdict::Rejected));
        assert_eq!(Verdict::parse("ok"), None);
        assert_eq!(
            serde_json::to_string(&Verdict::Rejected).unwrap(),
            "\"REJECTED\""
        );
    }
}
