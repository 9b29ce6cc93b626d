//! Planar geometry on contour points: convex hull and minimum-area rectangle.

pub mod hull;
pub mod min_rect;

pub use hull::convex_hull;
pub use min_rect::min_area_rect;
