//! Shape fitting: binary mask → external contours → one selected contour →
//! minimum-area rectangle.
//!
//! The selection heuristic is a seam. [`LargestArea`] picks the contour with
//! the largest enclosed area; callers with cluttered scenes can plug in their
//! own [`ContourSelector`].

pub mod trace;

pub use trace::find_external_contours;

use crate::geometry::min_area_rect;
use crate::image::BinaryMask;
use crate::types::OrientedRect;
use log::debug;
use nalgebra::Point2;

/// Closed polygon traced along the outer boundary of a foreground component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point2<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point2<i32>>) -> Self {
        Self { points }
    }

    /// Enclosed area by the shoelace formula. Fewer than three points
    /// enclose nothing.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: i64 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
            })
            .sum();
        twice.abs() as f64 * 0.5
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn to_f64(&self) -> Vec<Point2<f64>> {
        self.points
            .iter()
            .map(|p| Point2::new(p.x as f64, p.y as f64))
            .collect()
    }
}

/// Chooses the contour that represents the inspected part.
pub trait ContourSelector {
    fn select<'c>(&self, contours: &'c [Contour]) -> Option<&'c Contour>;
}

/// Largest enclosed area; ties go to the contour found first.
#[derive(Clone, Copy, Debug, Default)]
pub struct LargestArea;

impl ContourSelector for LargestArea {
    fn select<'c>(&self, contours: &'c [Contour]) -> Option<&'c Contour> {
        let mut best: Option<(&Contour, f64)> = None;
        for c in contours {
            let area = c.area();
            if best.map_or(true, |(_, a)| area > a) {
                best = Some((c, area));
            }
        }
        best.map(|(c, _)| c)
    }
}

/// Fit result together with what the fitter saw on the way.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FitReport {
    pub rect: Option<OrientedRect>,
    /// Number of candidate contours, when the fitter traces any.
    pub contours: Option<usize>,
}

/// Turns a foreground mask into the oriented rectangle of the part.
pub trait ShapeFitter {
    /// `None` when the mask holds no usable contour.
    fn fit(&self, mask: &BinaryMask) -> Option<OrientedRect>;

    fn fit_report(&self, mask: &BinaryMask) -> FitReport {
        FitReport {
            rect: self.fit(mask),
            contours: None,
        }
    }
}

impl<F: ShapeFitter + ?Sized> ShapeFitter for &F {
    fn fit(&self, mask: &BinaryMask) -> Option<OrientedRect> {
        (**self).fit(mask)
    }

    fn fit_report(&self, mask: &BinaryMask) -> FitReport {
        (**self).fit_report(mask)
    }
}

/// External contours, pick one, fit its minimum-area rectangle.
#[derive(Clone, Debug, Default)]
pub struct ContourRectFitter<Sel = LargestArea> {
    selector: Sel,
}

impl<Sel: ContourSelector> ContourRectFitter<Sel> {
    pub fn with_selector(selector: Sel) -> Self {
        Self { selector }
    }

    pub fn selector(&self) -> &Sel {
        &self.selector
    }
}

impl ContourRectFitter<LargestArea> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Sel: ContourSelector> ShapeFitter for ContourRectFitter<Sel> {
    fn fit(&self, mask: &BinaryMask) -> Option<OrientedRect> {
        self.fit_report(mask).rect
    }

    fn fit_report(&self, mask: &BinaryMask) -> FitReport {
        let contours = find_external_contours(mask);
        let rect = self
            .selector
            .select(&contours)
            .and_then(|chosen| Some((chosen, min_area_rect(&chosen.to_f64())?)));
        let Some((chosen, rect)) = rect else {
            debug!("ContourRectFitter::fit contours={} -> none", contours.len());
            return FitReport {
                rect: None,
                contours: Some(contours.len()),
            };
        };
        debug!(
            "ContourRectFitter::fit contours={} chosen_pts={} area={:.1} rect={:.1}x{:.1}@{:.1}",
            contours.len(),
            chosen.len(),
            chosen.area(),
            rect.size.0,
            rect.size.1,
            rect.angle_deg
        );
        FitReport {
            rect: Some(rect),
            contours: Some(contours.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn contour(pts: &[(i32, i32)]) -> Contour {
        Contour::new(pts.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    #[test]
    fn shoelace_area_ignores_orientation() {
        let cw = contour(&[(0, 0), (4, 0), (4, 3), (0, 3)]);
        let ccw = contour(&[(0, 0), (0, 3), (4, 3), (4, 0)]);
        assert_eq!(cw.area(), 12.0);
        assert_eq!(ccw.area(), 12.0);
        assert_eq!(contour(&[(0, 0), (5, 5)]).area(), 0.0);
    }

    #[test]
    fn largest_area_prefers_first_on_ties() {
        let contours = vec![
            contour(&[(0, 0), (2, 0), (2, 2), (0, 2)]),
            contour(&[(10, 10), (12, 10), (12, 12), (10, 12)]),
            contour(&[(0, 0), (1, 0), (1, 1)]),
        ];
        let chosen = LargestArea.select(&contours).unwrap();
        assert!(std::ptr::eq(chosen, &contours[0]));
        assert!(LargestArea.select(&[]).is_none());
    }

    #[test]
    fn fitter_returns_rect_of_biggest_blob() {
        let mask = BinaryMask::from_fn(80, 40, |x, y| {
            ((10..41).contains(&x) && (5..16).contains(&y)) || ((60..64).contains(&x) && (30..34).contains(&y))
        });
        let rect = ContourRectFitter::new().fit(&mask).unwrap();
        let (major, minor) = rect.major_minor();
        assert_relative_eq!(major, 30.0, epsilon = 1e-9);
        assert_relative_eq!(minor, 10.0, epsilon = 1e-9);
        assert_relative_eq!(rect.center, Point2::new(25.0, 10.0), epsilon = 1e-9);
    }

    #[test]
    fn empty_mask_fits_nothing() {
        let fitter = ContourRectFitter::new();
        let mask = BinaryMask::new(16, 16);
        assert!(fitter.fit(&mask).is_none());
        assert_eq!(
            fitter.fit_report(&mask),
            FitReport {
                rect: None,
                contours: Some(0)
            }
        );
    }

    struct Smallest;

    impl ContourSelector for Smallest {
        fn select<'c>(&self, contours: &'c [Contour]) -> Option<&'c Contour> {
            contours
                .iter()
                .min_by(|a, b| a.area().total_cmp(&b.area()))
        }
    }

    #[test]
    fn selector_is_pluggable() {
        let mask = BinaryMask::from_fn(40, 20, |x, y| {
            ((2..20).contains(&x) && (2..10).contains(&y)) || ((30..35).contains(&x) && (12..15).contains(&y))
        });
        let rect = ContourRectFitter::with_selector(Smallest).fit(&mask).unwrap();
        let (major, minor) = rect.major_minor();
        assert_relative_eq!(major, 4.0, epsilon = 1e-9);
        assert_relative_eq!(minor, 2.0, epsilon = 1e-9);
    }
}
