// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_summed_area --heading-base-level=0

//! Understory Summed Area: constant-time rectangle statistics over a sample grid.
//!
//! A summed-area table (also called an integral image) stores, for every cell
//! of a `width` × `height` grid, the sum of all samples above and to the left
//! of it, inclusive. Any axis-aligned rectangle's sum then takes four lookups,
//! regardless of its size.
//!
//! - Build once from a flat, row-major sample buffer in O(width × height).
//! - Query sums, averages, non-zero counts, and non-zero averages of inclusive
//!   rectangles in O(1).
//! - Read the raw prefix planes for diagnostics or visualization.
//!
//! Tables are immutable after construction and own all of their data; the
//! sample buffer is only borrowed during the build.
//!
//! ## Core types
//!
//! - [`SummedAreaTable`]: the table, generic over an [`Accumulator`] and a
//!   [`PlaneLayout`].
//! - [`WithNonZero`] / [`SumOnly`]: whether a second plane counting samples
//!   greater than zero is built. The non-zero queries only exist on
//!   [`WithNonZero`] tables, so asking a [`SumOnlyTable`] for them does not
//!   compile.
//! - [`SatOptions`]: per-table [`ClampMode`] (clamp out-of-range rectangles,
//!   or report them) and [`AverageSpan`] (which rectangle supplies the
//!   average's denominator).
//! - [`PixelRect`]: an inclusive rectangle of cells.
//! - [`SatError`]: construction and strict-mode query errors.
//!
//! ## Example
//!
//! ```rust
//! use understory_summed_area::{PixelRect, SummedAreaTable};
//!
//! let samples: [u8; 24] = [
//!     0, 0, 0, 2, 0, 0,
//!     0, 0, 2, 0, 2, 0,
//!     0, 0, 2, 3, 2, 0,
//!     0, 0, 2, 0, 2, 0,
//! ];
//! let sat = SummedAreaTable::<u32>::build(&samples, 6, 4)?;
//!
//! assert_eq!(sat.sum(1, 1, 2, 2)?, 4);
//! assert_eq!(sat.sum_rect(PixelRect::pixel(3, 2))?, 3);
//! assert_eq!(sat.average(1, 1, 2, 2)?, 1.0);
//! assert_eq!(sat.non_zero_count(0, 0, 5, 3)?, 8);
//!
//! // With the default `ClampMode::Clamp`, rectangles are clamped into the
//! // grid and inverted corners are swapped.
//! assert_eq!(sat.sum(-10, 99, 99, -10)?, 17);
//! # Ok::<(), understory_summed_area::SatError>(())
//! ```
//!
//! ## Accumulators and overflow
//!
//! The accumulator type must be able to hold the sum of the whole grid; this
//! is the caller's choice and is not checked. Integer accumulators use
//! wrapping arithmetic, which keeps every rectangle sum exact as long as that
//! rectangle's own total fits, even if the cumulative plane wrapped. With
//! non-negative samples, unsigned accumulators never underflow during a query.
//!
//! ## Features
//!
//! - `kurbo`: adds `PixelRect::covering`, mapping a `kurbo::Rect` to the
//!   cells it overlaps.
//! - `std` / `libm`: forwarded to `kurbo` when it is enabled.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod layout;
mod options;
mod plane;
mod rect;
mod table;
mod types;

pub use error::SatError;
pub use layout::{PlaneLayout, Planes, SumOnly, WithNonZero};
pub use options::{AverageSpan, ClampMode, SatOptions};
pub use rect::PixelRect;
pub use table::{SumOnlyTable, SummedAreaTable};
pub use types::{Accumulator, Sample};
