// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inclusive pixel rectangles used as query arguments.

/// Axis-aligned rectangle of grid cells. Both corners are inclusive.
///
/// Corners are not required to be ordered or to lie inside any grid; the
/// table resolves them according to its [`ClampMode`](crate::ClampMode).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// First column.
    pub x0: i64,
    /// First row.
    pub y0: i64,
    /// Last column (inclusive).
    pub x1: i64,
    /// Last row (inclusive).
    pub y1: i64,
}

impl PixelRect {
    /// Create a rectangle from two inclusive corners.
    #[inline(always)]
    pub const fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// A rectangle covering the single cell `(x, y)`.
    #[inline]
    pub const fn pixel(x: i64, y: i64) -> Self {
        Self::new(x, y, x, y)
    }

    /// The same cells with `x0 <= x1` and `y0 <= y1`.
    #[inline]
    #[must_use]
    pub const fn normalized(self) -> Self {
        let (x0, x1) = if self.x0 > self.x1 {
            (self.x1, self.x0)
        } else {
            (self.x0, self.x1)
        };
        let (y0, y1) = if self.y0 > self.y1 {
            (self.y1, self.y0)
        } else {
            (self.y0, self.y1)
        };
        Self { x0, y0, x1, y1 }
    }

    /// Clamp every coordinate into a `width` × `height` grid, then normalize.
    ///
    /// Each coordinate is clamped independently, so a rectangle lying fully
    /// outside the grid collapses onto its nearest edge or corner.
    ///
    /// `width` and `height` must be positive.
    #[inline]
    #[must_use]
    pub fn clamped(self, width: i64, height: i64) -> Self {
        debug_assert!(
            width > 0 && height > 0,
            "PixelRect::clamped requires a non-empty grid; got {width}x{height}"
        );
        let max_x = width - 1;
        let max_y = height - 1;
        Self {
            x0: self.x0.clamp(0, max_x),
            y0: self.y0.clamp(0, max_y),
            x1: self.x1.clamp(0, max_x),
            y1: self.y1.clamp(0, max_y),
        }
        .normalized()
    }

    /// Whether the corners are ordered and every cell lies inside a
    /// `width` × `height` grid.
    #[inline]
    pub const fn is_within(&self, width: i64, height: i64) -> bool {
        0 <= self.x0
            && self.x0 <= self.x1
            && self.x1 < width
            && 0 <= self.y0
            && self.y0 <= self.y1
            && self.y1 < height
    }

    /// Number of columns spanned, `|x1 - x0| + 1`.
    #[inline]
    pub const fn span_x(&self) -> u128 {
        self.x0.abs_diff(self.x1) as u128 + 1
    }

    /// Number of rows spanned, `|y1 - y0| + 1`.
    #[inline]
    pub const fn span_y(&self) -> u128 {
        self.y0.abs_diff(self.y1) as u128 + 1
    }

    /// Number of cells covered, as used for averages.
    ///
    /// Computed in `f64` so no `i64` input can overflow it.
    #[inline]
    pub fn pixel_count(&self) -> f64 {
        self.span_x() as f64 * self.span_y() as f64
    }
}

#[cfg(feature = "kurbo")]
impl PixelRect {
    /// Cells whose unit squares overlap `rect`.
    ///
    /// Cell `(x, y)` occupies `[x, x + 1) × [y, y + 1)`. Returns `None` when
    /// `rect` has no area, is not finite, or lies entirely past `i64::MAX`.
    ///
    /// ```
    /// use kurbo::Rect;
    /// use understory_summed_area::PixelRect;
    ///
    /// let cells = PixelRect::covering(Rect::new(0.5, 1.0, 2.0, 2.5)).unwrap();
    /// assert_eq!(cells, PixelRect::new(0, 1, 1, 2));
    /// assert_eq!(PixelRect::covering(Rect::new(1.0, 1.0, 1.0, 4.0)), None);
    /// ```
    pub fn covering(rect: kurbo::Rect) -> Option<Self> {
        let rect = rect.abs();
        if !rect.is_finite() || rect.is_zero_area() {
            return None;
        }
        let outer = rect.expand();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Coordinates are integral after `expand`; values beyond i64 saturate."
        )]
        let cells = Self::new(
            outer.x0 as i64,
            outer.y0 as i64,
            (outer.x1 as i64).saturating_sub(1),
            (outer.y1 as i64).saturating_sub(1),
        );
        (cells.x0 <= cells.x1 && cells.y0 <= cells.y1).then_some(cells)
    }
}
