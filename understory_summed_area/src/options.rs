// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build-time query options.

/// How a table treats query rectangles that are inverted or leave the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClampMode {
    /// Clamp each coordinate into the grid independently, then swap inverted
    /// corners. Queries never fail.
    #[default]
    Clamp,
    /// Use coordinates as given. Rectangles must satisfy
    /// `0 <= x0 <= x1 < width` and `0 <= y0 <= y1 < height`; anything else is
    /// reported as [`SatError::OutOfRange`](crate::SatError::OutOfRange).
    Strict,
}

/// Which rectangle supplies the pixel count in [`average`] queries.
///
/// The two only differ in [`ClampMode::Clamp`] when the requested rectangle
/// leaves the grid.
///
/// [`average`]: crate::SummedAreaTable::average
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AverageSpan {
    /// Divide by the cells that were actually summed (after clamping).
    #[default]
    Summed,
    /// Divide by `(|x1 - x0| + 1) * (|y1 - y0| + 1)` of the coordinates the
    /// caller passed, before clamping.
    Requested,
}

/// Options fixed when a table is built.
///
/// ```
/// use understory_summed_area::{AverageSpan, ClampMode, SatOptions};
///
/// let options = SatOptions::new()
///     .with_clamp(ClampMode::Strict)
///     .with_average_span(AverageSpan::Requested);
/// assert_eq!(options.clamp, ClampMode::Strict);
/// assert_eq!(SatOptions::default().clamp, ClampMode::Clamp);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SatOptions {
    /// Coordinate handling for every query.
    pub clamp: ClampMode,
    /// Denominator used by `average`.
    pub average_span: AverageSpan,
}

impl SatOptions {
    /// Default options: clamping on, averages over the summed cells.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clamp: ClampMode::Clamp,
            average_span: AverageSpan::Summed,
        }
    }

    /// Replace the coordinate handling policy.
    #[must_use]
    pub const fn with_clamp(mut self, clamp: ClampMode) -> Self {
        self.clamp = clamp;
        self
    }

    /// Replace the average denominator policy.
    #[must_use]
    pub const fn with_average_span(mut self, average_span: AverageSpan) -> Self {
        self.average_span = average_span;
        self
    }
}
