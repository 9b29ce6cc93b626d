//! Minimum-area enclosing rectangle.
//!
//! The optimal rectangle has one side collinear with an edge of the convex
//! hull, so every hull edge is tried as the first axis and the tightest box
//! wins. Hulls of traced contours are small, so the quadratic projection scan
//! is cheaper in practice than maintaining four calipers.
use super::hull::convex_hull;
use crate::types::OrientedRect;
use nalgebra::{Point2, Vector2};

/// Smallest rectangle, at any rotation, enclosing `points`.
///
/// Returns `None` for empty input. A single point yields a zero-size
/// rectangle; collinear points yield a zero-width one along their line.
/// Among equal-area candidates the first hull edge wins.
pub fn min_area_rect(points: &[Point2<f64>]) -> Option<OrientedRect> {
    let hull = convex_hull(points);
    match hull.len() {
        0 => None,
        1 => Some(OrientedRect::new(hull[0], (0.0, 0.0), 0.0)),
        2 => {
            let d = hull[1] - hull[0];
            let center = Point2::from((hull[0].coords + hull[1].coords) * 0.5);
            Some(OrientedRect::new(
                center,
                (d.norm(), 0.0),
                d.y.atan2(d.x).to_degrees(),
            ))
        }
        _ => Some(calipers(&hull)),
    }
}

fn calipers(hull: &[Point2<f64>]) -> OrientedRect {
    let n = hull.len();
    let mut best: Option<(f64, Vector2<f64>, [f64; 4])> = None;

    for i in 0..n {
        let edge = hull[(i + 1) % n] - hull[i];
        let len = edge.norm();
        if len <= f64::EPSILON {
            continue;
        }
        let u = edge / len;
        let v = Vector2::new(-u.y, u.x);

        let mut bounds = [f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY];
        for p in hull {
            let pu = p.coords.dot(&u);
            let pv = p.coords.dot(&v);
            bounds[0] = bounds[0].min(pu);
            bounds[1] = bounds[1].max(pu);
            bounds[2] = bounds[2].min(pv);
            bounds[3] = bounds[3].max(pv);
        }
        let area = (bounds[1] - bounds[0]) * (bounds[3] - bounds[2]);
        if best.as_ref().map_or(true, |(a, _, _)| area < *a) {
            best = Some((area, u, bounds));
        }
    }

    let Some((_, u, [min_u, max_u, min_v, max_v])) = best else {
        return OrientedRect::new(hull[0], (0.0, 0.0), 0.0);
    };
    let v = Vector2::new(-u.y, u.x);
    let center = Point2::from(u * ((min_u + max_u) * 0.5) + v * ((min_v + max_v) * 0.5));
    OrientedRect::new(
        center,
        (max_u - min_u, max_v - min_v),
        u.y.atan2(u.x).to_degrees(),
    )
}
