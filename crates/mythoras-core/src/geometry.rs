#![forbid(unsafe_code)]

//! Geometric primitives and grid snapping.
//!
//! All coordinates are layout pixels relative to the top-left corner of the
//! layout viewport (below the header, beside the sidebar when it is open).

use serde::{Deserialize, Serialize};

/// A pointer position, or an offset between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// The viewport origin.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Vector from `origin` to `self`.
    #[inline]
    #[must_use]
    pub const fn offset_from(self, origin: Point) -> Point {
        Point {
            x: self.x.saturating_sub(origin.x),
            y: self.y.saturating_sub(origin.y),
        }
    }
}

/// An axis-aligned rectangle in layout pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Same size, new top-left corner.
    #[inline]
    #[must_use]
    pub const fn with_origin(self, x: i32, y: i32) -> Self {
        Self::new(x, y, self.width, self.height)
    }}

/// Round `value` to the nearest multiple of `grid`.
///
/// Ties round away from zero, so `snap_to_grid(10, 20) == 20` and
/// `snap_to_grid(-10, 20) == -20`. The function is total over `i32`: when the
/// nearest grid line lies outside the `i32` range the next line toward zero is
/// used instead. A non-positive `grid` disables snapping.
///
/// Snapping is idempotent: `snap_to_grid(snap_to_grid(v, g), g) == snap_to_grid(v, g)`.
#[must_use]
pub fn snap_to_grid(value: i32, grid: i32) -> i32 {
    if grid <= 0 {
        return value;
    }
    let value = i64::from(value);
    let grid = i64::from(grid);
    let quotient = value.div_euclid(grid);
    let remainder = value.rem_euclid(grid);

    let steps = match (2 * remainder).cmp(&grid) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal if value >= 0 => quotient + 1,
        std::cmp::Ordering::Equal => quotient,
    };

    let snapped = steps * grid;
    let snapped = if snapped > i64::from(i32::MAX) {
        snapped - grid
    } else if snapped < i64::from(i32::MIN) {
        snapped + grid
    } else {
        snapped
    };
    snapped as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rect_edges() {
        let rect = Rect::new(20, 40, 300, 200);
        assert_eq!(rect.right(), 320);
        assert_eq!(rect.bottom(), 240);
        assert_eq!(rect.origin(), Point::new(20, 40));
    }

    #[test]
    fn rect_edges_saturate() {
        let rect = Rect::new(i32::MAX - 5, i32::MAX - 5, 10, 10);
        assert_eq!(rect.right(), i32::MAX);
        assert_eq!(rect.bottom(), i32::MAX);
        assert_eq!(rect.with_origin(1, 2), Rect::new(1, 2, 10, 10));
    }

    #[test]
    fn point_offset() {
        let pointer = Point::new(110, 110);
        assert_eq!(pointer.offset_from(Point::new(100, 100)), Point::new(10, 10));
    }

    #[test]
    fn snap_rounds_to_nearest_line() {
        assert_eq!(snap_to_grid(0, 20), 0);
        assert_eq!(snap_to_grid(9, 20), 0);
        assert_eq!(snap_to_grid(11, 20), 20);
        assert_eq!(snap_to_grid(490, 20), 500);
        assert_eq!(snap_to_grid(40, 20), 40);
    }

    #[test]
    fn snap_ties_round_away_from_zero() {
        assert_eq!(snap_to_grid(10, 20), 20);
        assert_eq!(snap_to_grid(-10, 20), -20);
        assert_eq!(snap_to_grid(-9, 20), 0);
        assert_eq!(snap_to_grid(-11, 20), -20);
    }

    #[test]
    fn snap_is_total_at_extremes() {
        let hi = snap_to_grid(i32::MAX, 20);
        assert_eq!(hi % 20, 0);
        assert!(hi <= i32::MAX);
        let lo = snap_to_grid(i32::MIN, 20);
        assert_eq!(lo % 20, 0);
    }

    #[test]
    fn snap_disabled_for_non_positive_grid() {
        assert_eq!(snap_to_grid(17, 0), 17);
        assert_eq!(snap_to_grid(17, -5), 17);
    }

    proptest! {
        #[test]
        fn snap_is_idempotent(value in any::<i32>(), grid in 1i32..200) {
            let once = snap_to_grid(value, grid);
            prop_assert_eq!(snap_to_grid(once, grid), once);
        }

        #[test]
        fn snap_stays_within_half_a_cell(value in -1_000_000i32..1_000_000, grid in 1i32..200) {
            let snapped = snap_to_grid(value, grid);
            prop_assert_eq!(snapped % grid, 0);
            prop_assert!((i64::from(snapped) - i64::from(value)).abs() * 2 <= i64::from(grid));
        }
    }
}
