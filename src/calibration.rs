//! Static calibration data: nominal part dimensions and global constants.
//!
//! Both structures are validated once at construction and are read-only
//! afterwards, so a single instance can be shared by every worker of a batch.

use crate::error::{CalibrationError, InspectError};
use serde::{Deserialize, Serialize};

/// Nominal physical dimensions of one part type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartSpec {
    pub part_id: String,
    #[serde(alias = "length")]
    pub nominal_length_mm: f64,
    #[serde(alias = "width")]
    pub nominal_width_mm: f64,
}

impl PartSpec {
    pub fn new(part_id: impl Into<String>, nominal_length_mm: f64, nominal_width_mm: f64) -> Self {
        Self {
            part_id: part_id.into(),
            nominal_length_mm,
            nominal_width_mm,
        }
    }

    fn validate(&self) -> Result<(), CalibrationError> {
        if self.part_id.trim().is_empty() {
            return Err(CalibrationError::EmptyPartId);
        }
        for (field, value) in [
            ("nominal_length_mm", self.nominal_length_mm),
            ("nominal_width_mm", self.nominal_width_mm),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalibrationError::InvalidDimension {
                    part_id: self.part_id.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Validated lookup table from part id to nominal dimensions.
///
/// Entries keep their insertion order, which is the order reported by
/// [`CalibrationTable::part_ids`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PartSpec>", into = "Vec<PartSpec>")]
pub struct CalibrationTable {
    parts: Vec<PartSpec>,
}

impl CalibrationTable {
    /// Build a table, rejecting empty ids, duplicates and invalid dimensions.
    pub fn new(parts: Vec<PartSpec>) -> Result<Self, CalibrationError> {
        if parts.is_empty() {
            return Err(CalibrationError::EmptyTable);
        }
        for (i, part) in parts.iter().enumerate() {
            part.validate()?;
            if parts[..i].iter().any(|p| p.part_id == part.part_id) {
                return Err(CalibrationError::DuplicatePart(part.part_id.clone()));
            }
        }
        Ok(Self { parts })
    }

    /// The three reference screw types shipped with the inspection station.
    pub fn reference() -> Self {
        Self {
            parts: vec![
                PartSpec::new("M6x25", 31.0, 10.0),
                PartSpec::new("M8x10", 18.0, 13.0),
                PartSpec::new("M8x16", 24.0, 13.0),
            ],
        }
    }

    pub fn get(&self, part_id: &str) -> Option<&PartSpec> {
        self.parts.iter().find(|p| p.part_id == part_id)
    }

    /// Like [`get`](Self::get) but surfaces a missing entry as a typed error.
    pub fn lookup(&self, part_id: &str) -> Result<&PartSpec, InspectError> {
        self.get(part_id)
            .ok_or_else(|| InspectError::UnknownPartId(part_id.to_string()))
    }

    pub fn part_ids(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.part_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl TryFrom<Vec<PartSpec>> for CalibrationTable {
    type Error = CalibrationError;

    fn try_from(parts: Vec<PartSpec>) -> Result<Self, Self::Error> {
        Self::new(parts)
    }
}

impl From<CalibrationTable> for Vec<PartSpec> {
    fn from(table: CalibrationTable) -> Self {
        table.parts
    }
}

pub const DEFAULT_TOLERANCE_MM: f64 = 1.5;
pub const DEFAULT_PIXELS_PER_MM: f64 = 10.0;
/// First row of the ruler strip at the bottom of the reference frame.
pub const DEFAULT_ROI_TOP_BOUND: usize = 860;

/// Process-wide constants: acceptance tolerance, image scale and ROI cutoff.
///
/// `pixels_per_mm` assumes every image is taken at the same camera distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConstantsDef", into = "ConstantsDef")]
pub struct InspectionConstants {
    tolerance_mm: f64,
    pixels_per_mm: f64,
    roi_top_bound: usize,
}

impl InspectionConstants {
    pub fn new(
        tolerance_mm: f64,
        pixels_per_mm: f64,
        roi_top_bound: usize,
    ) -> Result<Self, CalibrationError> {
        if !tolerance_mm.is_finite() || tolerance_mm < 0.0 {
            return Err(CalibrationError::InvalidConstant {
                name: "tolerance_mm",
                value: tolerance_mm,
            });
        }
        if !pixels_per_mm.is_finite() || pixels_per_mm <= 0.0 {
            return Err(CalibrationError::InvalidConstant {
                name: "pixels_per_mm",
                value: pixels_per_mm,
            });
        }
        Ok(Self {
            tolerance_mm,
            pixels_per_mm,
            roi_top_bound,
        })
    }

    #[inline]
    pub fn tolerance_mm(&self) -> f64 {
        self.tolerance_mm
    }

    #[inline]
    pub fn pixels_per_mm(&self) -> f64 {
        self.pixels_per_mm
    }

    /// Rows `[0, roi_top_bound)` hold the screw; rows below belong to the ruler.
    #[inline]
    pub fn roi_top_bound(&self) -> usize {
        self.roi_top_bound
    }
}

impl Default for InspectionConstants {
    fn default() -> Self {
        Self {
            tolerance_mm: DEFAULT_TOLERANCE_MM,
            pixels_per_mm: DEFAULT_PIXELS_PER_MM,
            roi_top_bound: DEFAULT_ROI_TOP_BOUND,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
struct ConstantsDef {
    tolerance_mm: f64,
    pixels_per_mm: f64,
    roi_top_bound: usize,
}

impl Default for ConstantsDef {
    fn default() -> Self {
        InspectionConstants::default().into()
    }
}

impl TryFrom<ConstantsDef> for InspectionConstants {
    type Error = CalibrationError;

    fn try_from(def: ConstantsDef) -> Result<Self, Self::Error> {
        Self::new(def.tolerance_mm, def.pixels_per_mm, def.roi_top_bound)
    }
}

impl From<InspectionConstants> for ConstantsDef {
    fn from(c: InspectionConstants) -> Self {
        Self {
            tolerance_mm: c.tolerance_mm,
            pixels_per_mm: c.pixels_per_mm,
            roi_top_bound: c.roi_top_bound,
        }
    }
}
