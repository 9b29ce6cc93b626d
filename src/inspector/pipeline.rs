use super::params::InspectParams;
use crate::calibration::{CalibrationTable, InspectionConstants, PartSpec};
use crate::classify::classify;
use crate::contour::{ContourRectFitter, ShapeFitter};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{InputDescriptor, PipelineTrace};
use crate::error::InspectError;
use crate::image::{ImageRgb8, ImageView};
use crate::measure::convert;
use crate::segment::{EdgeSegmenter, Segmenter};
use crate::types::{Measurement, OrientedRect};
use log::debug;
use std::time::Instant;

/// Measures one screw per image against a fixed calibration.
///
/// The inspector holds only read-only configuration, so one instance can be
/// shared across threads. Repeated calls on the same input return identical
/// results.
#[derive(Clone, Debug)]
pub struct Inspector<S = EdgeSegmenter, F = ContourRectFitter> {
    calibration: CalibrationTable,
    constants: InspectionConstants,
    segmenter: S,
    fitter: F,
}

impl Inspector<EdgeSegmenter, ContourRectFitter> {
    /// Inspector with the default edge segmenter and largest-contour fitter.
    pub fn new(calibration: CalibrationTable, constants: InspectionConstants) -> Self {
        Self::with_stages(
            calibration,
            constants,
            EdgeSegmenter::default(),
            ContourRectFitter::default(),
        )
    }

    pub fn from_params(params: InspectParams) -> Self {
        Self::with_stages(
            params.calibration,
            params.constants,
            EdgeSegmenter::new(params.segment),
            ContourRectFitter::default(),
        )
    }
}

impl Default for Inspector<EdgeSegmenter, ContourRectFitter> {
    fn default() -> Self {
        Self::from_params(InspectParams::default())
    }
}

impl<S: Segmenter, F: ShapeFitter> Inspector<S, F> {
    pub fn with_stages(
        calibration: CalibrationTable,
        constants: InspectionConstants,
        segmenter: S,
        fitter: F,
    ) -> Self {
        Self {
            calibration,
            constants,
            segmenter,
            fitter,
        }
    }

    pub fn calibration(&self) -> &CalibrationTable {
        &self.calibration
    }

    pub fn constants(&self) -> &InspectionConstants {
        &self.constants
    }

    pub fn segmenter(&self) -> &S {
        &self.segmenter
    }

    pub fn fitter(&self) -> &F {
        &self.fitter
    }

    /// Measure the screw in `image` and classify it as `part_id`.
    ///
    /// The part id is resolved before any pixel is touched. Only rows above
    /// the ROI bound are searched; corners in the result are in the pixel
    /// frame of `image`.
    pub fn measure(
        &self,
        image: &ImageRgb8<'_>,
        part_id: &str,
    ) -> Result<Measurement, InspectError> {
        run(
            &self.calibration,
            &self.constants,
            &self.segmenter,
            &self.fitter,
            image,
            part_id,
        )
    }

    /// Same as [`measure`](Self::measure), also reporting what each stage saw.
    pub fn measure_traced(
        &self,
        image: &ImageRgb8<'_>,
        part_id: &str,
    ) -> (Result<Measurement, InspectError>, PipelineTrace) {
        let total = Instant::now();
        let roi = image.top_rows(self.constants.roi_top_bound());
        let mut trace = PipelineTrace {
            input: InputDescriptor {
                width: image.width(),
                height: image.height(),
                roi_width: roi.width(),
                roi_height: roi.height(),
            },
            ..PipelineTrace::default()
        };

        let part = match self.calibration.lookup(part_id) {
            Ok(part) => part,
            Err(err) => {
                trace.timings.total_ms = elapsed_ms(total);
                return (Err(err), trace);
            }
        };
        if roi.is_empty() {
            trace.timings.total_ms = elapsed_ms(total);
            return (Err(InspectError::NotFound), trace);
        }

        let mask = trace.timings.time("segment", || self.segmenter.segment(&roi));
        trace.mask_foreground = mask.count_foreground();
        let report = trace.timings.time("fit", || self.fitter.fit_report(&mask));
        trace.contours = report.contours;
        trace.rect_px = report.rect.clone();

        let result = match report.rect {
            Some(rect) => Ok(trace
                .timings
                .time("classify", || assemble(rect, part, &self.constants))),
            None => Err(InspectError::NotFound),
        };
        trace.timings.total_ms = elapsed_ms(total);
        debug!("Inspector::measure_traced part={} {}", part_id, trace.summary());
        (result, trace)
    }
}

pub(super) fn run<S: Segmenter, F: ShapeFitter>(
    calibration: &CalibrationTable,
    constants: &InspectionConstants,
    segmenter: &S,
    fitter: &F,
    image: &ImageRgb8<'_>,
    part_id: &str,
) -> Result<Measurement, InspectError> {
    let part = calibration.lookup(part_id)?;
    let roi = image.top_rows(constants.roi_top_bound());
    if roi.is_empty() {
        return Err(InspectError::NotFound);
    }
    let mask = segmenter.segment(&roi);
    let rect = fitter.fit(&mask).ok_or(InspectError::NotFound)?;
    Ok(assemble(rect, part, constants))
}

fn assemble(rect: OrientedRect, part: &PartSpec, constants: &InspectionConstants) -> Measurement {
    let dims = convert(&rect, constants.pixels_per_mm());
    let verdict = classify(dims.length_mm, dims.width_mm, part, constants.tolerance_mm());
    debug!(
        "Inspector::measure part={} length={:.2}mm width={:.2}mm nominal={}x{} -> {}",
        part.part_id,
        dims.length_mm,
        dims.width_mm,
        part.nominal_length_mm,
        part.nominal_width_mm,
        verdict
    );
    Measurement {
        length_mm: dims.length_mm,
        width_mm: dims.width_mm,
        verdict,
        corners: rect.corners,
        rect,
    }
}
