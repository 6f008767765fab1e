// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by table construction and strict queries.

use crate::PixelRect;

/// Errors returned by [`SummedAreaTable`](crate::SummedAreaTable).
///
/// Construction errors are reported before anything is allocated, so a failed
/// build never yields a partial table. Accumulator overflow is not an error:
/// choosing a wide enough accumulator is the caller's responsibility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SatError {
    /// Width or height is zero.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// The cell count overflows `usize`, or a dimension cannot be addressed
    /// with `i64` coordinates.
    #[error("a {width}x{height} grid is too large to index")]
    TooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// The sample buffer does not hold exactly `width * height` samples.
    #[error("expected {expected} samples, got {actual}")]
    SampleCountMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the buffer passed in.
        actual: usize,
    },
    /// A strict-mode query rectangle is inverted or leaves the grid.
    #[error(
        "rectangle ({}, {})-({}, {}) is not an ordered rectangle inside the {width}x{height} grid",
        .rect.x0, .rect.y0, .rect.x1, .rect.y1
    )]
    OutOfRange {
        /// The rectangle as passed by the caller.
        rect: PixelRect,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
}
