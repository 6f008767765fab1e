// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prefix-sum plane construction and rectangle lookups.

use alloc::vec;
use alloc::vec::Vec;

use crate::Accumulator;

/// A rectangle already resolved against a grid: ordered and in bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct CellRect {
    pub(crate) x0: usize,
    pub(crate) y0: usize,
    pub(crate) x1: usize,
    pub(crate) y1: usize,
}

impl CellRect {
    pub(crate) const fn cell_count(&self) -> usize {
        (self.x1 - self.x0 + 1) * (self.y1 - self.y0 + 1)
    }
}

/// Build a `width` × `height` prefix-sum plane from a per-cell value function.
///
/// `value_at` receives row-major offsets. Cells are filled top row first, then
/// the left column, then the interior in row-major order, so every cell only
/// reads neighbours above, to the left, and above-left that are already final.
pub(crate) fn build_plane<T, F>(width: usize, height: usize, value_at: F) -> Vec<T>
where
    T: Accumulator,
    F: Fn(usize) -> T,
{
    debug_assert!(
        width > 0 && height > 0,
        "prefix planes need at least one cell; got {width}x{height}"
    );
    let mut plane = vec![T::zero(); width * height];

    plane[0] = value_at(0);

    for x in 1..width {
        plane[x] = T::add(value_at(x), plane[x - 1]);
    }

    for y in 1..height {
        let row = y * width;
        plane[row] = T::add(value_at(row), plane[row - width]);
    }

    for y in 1..height {
        let row = y * width;
        for x in 1..width {
            let i = row + x;
            // left - above_left is the current row's running sum up to x - 1.
            let row_prefix = T::sub(plane[i - 1], plane[i - width - 1]);
            plane[i] = T::add(value_at(i), T::add(plane[i - width], row_prefix));
        }
    }

    plane
}

/// Sum of the inclusive rectangle `r` via inclusion–exclusion.
///
/// Evaluated as `(D - B) - (C - A)`: with non-negative samples both
/// differences are themselves rectangle sums, so unsigned accumulators never
/// underflow.
#[inline]
pub(crate) fn rect_sum<T: Accumulator>(plane: &[T], width: usize, r: CellRect) -> T {
    let d = plane[r.y1 * width + r.x1];
    let b = if r.y0 > 0 {
        plane[(r.y0 - 1) * width + r.x1]
    } else {
        T::zero()
    };
    let c = if r.x0 > 0 {
        plane[r.y1 * width + r.x0 - 1]
    } else {
        T::zero()
    };
    let a = if r.x0 > 0 && r.y0 > 0 {
        plane[(r.y0 - 1) * width + r.x0 - 1]
    } else {
        T::zero()
    };
    T::sub(T::sub(d, b), T::sub(c, a))
}
