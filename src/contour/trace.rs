//! Border following over a binary mask (Suzuki & Abe, 1985).
//!
//! The mask is copied into a label buffer padded with one background pixel on
//! every side, so the image frame acts as the outermost hole and neighbour
//! lookups never leave the buffer. Every border receives a sequential label;
//! its parent is derived from the last border crossed on the current row.
//! Only outer borders whose parent is the frame are returned, which drops
//! holes and anything nested inside another shape.
use super::Contour;
use crate::image::{BinaryMask, ImageView};
use nalgebra::Point2;

/// 8-neighbourhood offsets. Index order runs counter-clockwise on screen
/// (y down): E, NE, N, NW, W, SW, S, SE.
const DIRS: [(isize, isize); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const FRAME: usize = 1;

#[derive(Clone, Copy, Debug)]
struct BorderInfo {
    outer: bool,
    parent: usize,
}

struct LabelGrid {
    w: usize,
    labels: Vec<i32>,
}

impl LabelGrid {
    fn from_mask(mask: &BinaryMask) -> Self {
        let w = mask.width() + 2;
        let h = mask.height() + 2;
        let mut labels = vec![0i32; w * h];
        for (y, row) in mask.rows().enumerate() {
            let base = (y + 1) * w + 1;
            for (x, &v) in row.iter().enumerate() {
                if v != 0 {
                    labels[base + x] = 1;
                }
            }
        }
        Self { w, labels }
    }

    #[inline]
    fn at(&self, p: (usize, usize)) -> i32 {
        self.labels[p.1 * self.w + p.0]
    }

    #[inline]
    fn set(&mut self, p: (usize, usize), v: i32) {
        self.labels[p.1 * self.w + p.0] = v;
    }
}

#[inline]
fn step(p: (usize, usize), dir: usize) -> (usize, usize) {
    let (dx, dy) = DIRS[dir];
    (
        (p.0 as isize + dx) as usize,
        (p.1 as isize + dy) as usize,
    )
}

#[inline]
fn dir_between(from: (usize, usize), to: (usize, usize)) -> usize {
    let d = (
        to.0 as isize - from.0 as isize,
        to.1 as isize - from.1 as isize,
    );
    DIRS.iter().position(|&o| o == d).unwrap_or(0)
}

/// Trace the border starting at `start`, entered from background pixel
/// `from`, labelling it `nbd`. Returns padded-grid coordinates.
fn follow_border(
    grid: &mut LabelGrid,
    start: (usize, usize),
    from: (usize, usize),
    nbd: i32,
) -> Vec<(usize, usize)> {
    // Clockwise search for the first foreground neighbour.
    let d0 = dir_between(start, from);
    let first = (0..8)
        .map(|k| step(start, (d0 + 8 - k) % 8))
        .find(|&q| grid.at(q) != 0);

    let Some(p1) = first else {
        grid.set(start, -nbd);
        return vec![start];
    };

    let mut points = vec![start];
    let mut prev = p1;
    let mut cur = start;
    loop {
        // Counter-clockwise search starting just after `prev`.
        let dp = dir_between(cur, prev);
        let mut east_is_background = false;
        let mut next = prev;
        for k in 1..=8 {
            let d = (dp + k) % 8;
            let q = step(cur, d);
            if grid.at(q) != 0 {
                next = q;
                break;
            }
            if d == 0 {
                east_is_background = true;
            }
        }

        if east_is_background {
            grid.set(cur, -nbd);
        } else if grid.at(cur) == 1 {
            grid.set(cur, nbd);
        }

        if next == start && cur == p1 {
            break;
        }
        prev = cur;
        cur = next;
        points.push(cur);
    }
    points
}

/// Drop points lying inside straight horizontal, vertical or diagonal runs,
/// keeping only the run endpoints.
pub fn compress_runs(points: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let delta = |a: (usize, usize), b: (usize, usize)| {
        (b.0 as isize - a.0 as isize, b.1 as isize - a.1 as isize)
    };
    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            delta(prev, points[i]) != delta(points[i], next)
        })
        .map(|i| points[i])
        .collect()
}

/// Outer borders of top-level foreground components, in raster order of
/// their first pixel.
pub fn find_external_contours(mask: &BinaryMask) -> Vec<Contour> {
    let mut grid = LabelGrid::from_mask(mask);
    let gw = mask.width() + 2;
    let gh = mask.height() + 2;

    // Index 0 is unused, index 1 is the frame (a hole without parent).
    let mut borders = vec![
        BorderInfo {
            outer: false,
            parent: 0,
        },
        BorderInfo {
            outer: false,
            parent: 0,
        },
    ];
    let mut nbd: i32 = FRAME as i32;
    let mut contours = Vec::new();

    for y in 1..gh - 1 {
        let mut lnbd: i32 = FRAME as i32;
        for x in 1..gw - 1 {
            let v = grid.at((x, y));
            if v == 0 {
                continue;
            }

            let start = if v == 1 && grid.at((x - 1, y)) == 0 {
                Some(((x - 1, y), true))
            } else if v >= 1 && grid.at((x + 1, y)) == 0 {
                if v > 1 {
                    lnbd = v;
                }
                Some(((x + 1, y), false))
            } else {
                None
            };

            if let Some((from, outer)) = start {
                nbd += 1;
                let last = borders[lnbd as usize];
                let parent = if outer == last.outer {
                    last.parent
                } else {
                    lnbd as usize
                };
                borders.push(BorderInfo { outer, parent });

                let path = follow_border(&mut grid, (x, y), from, nbd);
                if outer && parent == FRAME {
                    let points = compress_runs(&path)
                        .into_iter()
                        .map(|(px, py)| Point2::new(px as i32 - 1, py as i32 - 1))
                        .collect();
                    contours.push(Contour::new(points));
                }
            }

            let v = grid.at((x, y));
            if v != 1 {
                lnbd = v.abs();
            }
        }
    }

    contours
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_ring(w: usize, h: usize, x0: usize, y0: usize, side: usize) -> BinaryMask {
        BinaryMask::from_fn(w, h, |x, y| {
            let inside = x >= x0 && x < x0 + side && y >= y0 && y < y0 + side;
            let border = x == x0 || x == x0 + side - 1 || y == y0 || y == y0 + side - 1;
            inside && border
        })
    }

    #[test]
    fn empty_mask_has_no_contours() {
        assert!(find_external_contours(&BinaryMask::new(8, 8)).is_empty());
    }

    #[test]
    fn filled_square_compresses_to_four_corners() {
        let mask = BinaryMask::from_fn(10, 10, |x, y| (2..7).contains(&x) && (3..8).contains(&y));
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        let mut pts: Vec<_> = contours[0].points.iter().map(|p| (p.x, p.y)).collect();
        pts.sort();
        assert_eq!(pts, vec![(2, 3), (2, 7), (6, 3), (6, 7)]);
        assert_eq!(contours[0].area(), 16.0);
    }

    #[test]
    fn hole_of_a_ring_is_ignored() {
        let mask = square_ring(12, 12, 1, 1, 9);
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].area(), 64.0);
    }

    #[test]
    fn shape_nested_in_a_hole_is_not_external() {
        let ring = square_ring(16, 16, 1, 1, 13);
        let mask = BinaryMask::from_fn(16, 16, |x, y| {
            ring.is_set(x, y) || ((6..9).contains(&x) && (6..9).contains(&y))
        });
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].area(), 144.0);
    }

    #[test]
    fn separate_blobs_come_in_raster_order() {
        let mask = BinaryMask::from_fn(20, 10, |x, y| {
            ((12..15).contains(&x) && (1..4).contains(&y)) || ((2..8).contains(&x) && (5..9).contains(&y))
        });
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0].area(), 4.0);
        assert_eq!(contours[1].area(), 15.0);
    }

    #[test]
    fn isolated_pixel_and_line_touching_the_border() {
        let mask = BinaryMask::from_fn(6, 4, |x, y| (x == 5 && y == 3) || (y == 0 && x < 4));
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 2);
        let line: Vec<_> = contours[0].points.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(line, vec![(0, 0), (3, 0)]);
        assert_eq!(contours[1].points.len(), 1);
        assert_eq!(contours[1].area(), 0.0);
    }

    #[test]
    fn blobs_on_the_left_column_are_all_outer() {
        let mask = BinaryMask::from_fn(2, 13, |x, y| match y {
            1 | 12 => true,
            4 => x == 0,
            7 | 8 => x == 0,
            _ => false,
        });
        let contours = find_external_contours(&mask);
        let starts: Vec<_> = contours.iter().map(|c| (c.points[0].x, c.points[0].y)).collect();
        assert_eq!(starts, vec![(0, 1), (0, 4), (0, 7), (0, 12)]);
        assert_eq!(contours[2].points.len(), 2);
    }

    #[test]
    fn compress_keeps_turning_points_only() {
        let path = vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 1)];
        assert_eq!(compress_runs(&path), vec![(0, 0), (2, 0), (2, 2)]);
    }
}
