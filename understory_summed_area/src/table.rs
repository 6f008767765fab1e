// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The summed-area table and its rectangle queries.

use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::layout::{PlaneLayout, Planes, SumOnly, WithNonZero};
use crate::plane::{CellRect, build_plane, rect_sum};
use crate::types::indicator;
use crate::{Accumulator, AverageSpan, ClampMode, PixelRect, Sample, SatError, SatOptions};

/// An immutable summed-area table over a `width` × `height` grid of samples.
///
/// `T` is the accumulator stored in the planes and returned by sums. `L`
/// selects whether a non-zero plane is built next to the sum plane; the
/// non-zero queries only exist for [`WithNonZero`] tables.
///
/// All query coordinates are inclusive cell coordinates. Every query is O(1).
///
/// ```
/// use understory_summed_area::SummedAreaTable;
///
/// let samples: [u8; 6] = [0, 4, 0, 2, 1, 0];
/// let sat = SummedAreaTable::<u32>::build(&samples, 6, 1)?;
///
/// assert_eq!(sat.sum(0, 0, 5, 0)?, 7);
/// assert_eq!(sat.non_zero_count(0, 0, 5, 0)?, 3);
/// assert!((sat.non_zero_average(0, 0, 5, 0)? - 7.0 / 3.0).abs() < 1e-12);
/// # Ok::<(), understory_summed_area::SatError>(())
/// ```
///
/// A table built without the non-zero plane has no non-zero queries:
///
/// ```compile_fail
/// use understory_summed_area::SumOnlyTable;
///
/// let sat = SumOnlyTable::<u32>::build(&[1_u8, 0, 2, 0], 2, 2).unwrap();
/// let _ = sat.non_zero_count(0, 0, 1, 1);
/// ```
#[derive(Clone)]
pub struct SummedAreaTable<T: Accumulator = u32, L: PlaneLayout = WithNonZero> {
    width: usize,
    height: usize,
    options: SatOptions,
    sum: Vec<T>,
    // Empty unless `L` is `WithNonZero`.
    non_zero: Vec<T>,
    layout: PhantomData<L>,
}

/// A [`SummedAreaTable`] without the non-zero plane.
pub type SumOnlyTable<T = u32> = SummedAreaTable<T, SumOnly>;

impl<T: Accumulator, L: PlaneLayout> core::fmt::Debug for SummedAreaTable<T, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SummedAreaTable")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("options", &self.options)
            .field("planes", &L::PLANES)
            .field("total", &self.sum.last())
            .finish_non_exhaustive()
    }
}

impl<T: Accumulator, L: PlaneLayout> SummedAreaTable<T, L> {
    /// Build a table over row-major `samples` with default [`SatOptions`].
    ///
    /// Fails if either dimension is zero, if `width * height` cannot be
    /// indexed, or if `samples` does not hold exactly `width * height` values.
    /// Nothing is allocated on failure.
    pub fn build<S>(samples: &[S], width: usize, height: usize) -> Result<Self, SatError>
    where
        S: Sample,
        T: From<S>,
    {
        Self::build_with_options(samples, width, height, SatOptions::default())
    }

    /// Build a table with explicit query options.
    ///
    /// ```
    /// use understory_summed_area::{ClampMode, SatError, SatOptions, SumOnlyTable};
    ///
    /// let samples = [1_u16, 2, 3, 4, 5, 6];
    /// let options = SatOptions::new().with_clamp(ClampMode::Strict);
    /// let sat = SumOnlyTable::<u64>::build_with_options(&samples, 3, 2, options)?;
    ///
    /// assert_eq!(sat.sum(1, 0, 2, 1)?, 2 + 3 + 5 + 6);
    /// assert!(matches!(sat.sum(0, 0, 3, 1), Err(SatError::OutOfRange { .. })));
    /// # Ok::<(), SatError>(())
    /// ```
    pub fn build_with_options<S>(
        samples: &[S],
        width: usize,
        height: usize,
        options: SatOptions,
    ) -> Result<Self, SatError>
    where
        S: Sample,
        T: From<S>,
    {
        if width == 0 || height == 0 {
            return Err(SatError::InvalidDimensions { width, height });
        }
        let too_large = SatError::TooLarge { width, height };
        if i64::try_from(width).is_err() || i64::try_from(height).is_err() {
            return Err(too_large);
        }
        let cells = width.checked_mul(height).ok_or(too_large)?;
        if samples.len() != cells {
            return Err(SatError::SampleCountMismatch {
                expected: cells,
                actual: samples.len(),
            });
        }

        let sum = build_plane(width, height, |i| T::from(samples[i]));
        let non_zero = if L::PLANES.contains(Planes::NON_ZERO) {
            build_plane(width, height, |i| indicator::<S, T>(samples[i]))
        } else {
            Vec::new()
        };

        log::debug!(
            "built summed-area table: {width}x{height}, planes {:?}, {:?}",
            L::PLANES,
            options
        );

        Ok(Self {
            width,
            height,
            options,
            sum,
            non_zero,
            layout: PhantomData,
        })
    }

    /// Grid width in cells.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Options the table was built with.
    #[inline]
    pub const fn options(&self) -> SatOptions {
        self.options
    }

    /// Planes this table carries.
    #[inline]
    pub const fn planes(&self) -> Planes {
        L::PLANES
    }

    /// The cumulative sum plane, row-major.
    ///
    /// `sum_plane()[y * width + x]` is the sum of all samples in
    /// `(0, 0)..=(x, y)`.
    #[inline]
    pub fn sum_plane(&self) -> &[T] {
        &self.sum
    }

    /// The rectangle a query with these coordinates covers.
    ///
    /// Under [`ClampMode::Clamp`] this is the clamped, normalized rectangle and
    /// never fails. Under [`ClampMode::Strict`] the rectangle is returned
    /// unchanged if valid and rejected otherwise.
    pub fn resolve(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> Result<PixelRect, SatError> {
        self.resolve_rect(PixelRect::new(x0, y0, x1, y1))
    }

    /// [`resolve`](Self::resolve) taking a [`PixelRect`].
    pub fn resolve_rect(&self, rect: PixelRect) -> Result<PixelRect, SatError> {
        let (width, height) = self.extent();
        match self.options.clamp {
            ClampMode::Clamp => {
                let resolved = rect.clamped(width, height);
                if resolved != rect {
                    log::trace!("clamped query {rect:?} to {resolved:?}");
                }
                Ok(resolved)
            }
            ClampMode::Strict if rect.is_within(width, height) => Ok(rect),
            ClampMode::Strict => Err(SatError::OutOfRange {
                rect,
                width: self.width,
                height: self.height,
            }),
        }
    }

    /// Sum of all samples in the inclusive rectangle `(x0, y0)..=(x1, y1)`.
    pub fn sum(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> Result<T, SatError> {
        self.sum_rect(PixelRect::new(x0, y0, x1, y1))
    }

    /// [`sum`](Self::sum) taking a [`PixelRect`].
    pub fn sum_rect(&self, rect: PixelRect) -> Result<T, SatError> {
        let cells = self.cells(rect)?;
        Ok(rect_sum(&self.sum, self.width, cells))
    }

    /// Mean sample value over the inclusive rectangle `(x0, y0)..=(x1, y1)`.
    ///
    /// The denominator follows [`SatOptions::average_span`]. Returns `0.0`
    /// for an empty denominator.
    pub fn average(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> Result<f64, SatError> {
        self.average_rect(PixelRect::new(x0, y0, x1, y1))
    }

    /// [`average`](Self::average) taking a [`PixelRect`].
    pub fn average_rect(&self, rect: PixelRect) -> Result<f64, SatError> {
        let cells = self.cells(rect)?;
        let sum = rect_sum(&self.sum, self.width, cells).to_f64();
        let pixels = match self.options.average_span {
            AverageSpan::Summed => cells.cell_count() as f64,
            AverageSpan::Requested => rect.pixel_count(),
        };
        Ok(if pixels > 0.0 { sum / pixels } else { 0.0 })
    }

    fn extent(&self) -> (i64, i64) {
        // Both dimensions were checked to fit `i64` at build time.
        (self.width as i64, self.height as i64)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Resolved rectangles lie inside the grid, so every coordinate fits usize."
    )]
    fn cells(&self, rect: PixelRect) -> Result<CellRect, SatError> {
        let r = self.resolve_rect(rect)?;
        Ok(CellRect {
            x0: r.x0 as usize,
            y0: r.y0 as usize,
            x1: r.x1 as usize,
            y1: r.y1 as usize,
        })
    }
}

impl<T: Accumulator> SummedAreaTable<T, WithNonZero> {
    /// The cumulative non-zero count plane, row-major.
    ///
    /// `non_zero_plane()[y * width + x]` counts the samples greater than zero
    /// in `(0, 0)..=(x, y)`.
    #[inline]
    pub fn non_zero_plane(&self) -> &[T] {
        &self.non_zero
    }

    /// Number of samples greater than zero in the inclusive rectangle.
    pub fn non_zero_count(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> Result<T, SatError> {
        self.non_zero_count_rect(PixelRect::new(x0, y0, x1, y1))
    }

    /// [`non_zero_count`](Self::non_zero_count) taking a [`PixelRect`].
    pub fn non_zero_count_rect(&self, rect: PixelRect) -> Result<T, SatError> {
        let cells = self.cells(rect)?;
        Ok(rect_sum(&self.non_zero, self.width, cells))
    }

    /// Sum of the rectangle divided by its count of samples greater than zero.
    ///
    /// Zero samples add nothing to the sum, so this is the mean over the
    /// non-zero samples. Returns `0.0` if the rectangle has none.
    pub fn non_zero_average(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> Result<f64, SatError> {
        self.non_zero_average_rect(PixelRect::new(x0, y0, x1, y1))
    }

    /// [`non_zero_average`](Self::non_zero_average) taking a [`PixelRect`].
    pub fn non_zero_average_rect(&self, rect: PixelRect) -> Result<f64, SatError> {
        let cells = self.cells(rect)?;
        let sum = rect_sum(&self.sum, self.width, cells).to_f64();
        let count = rect_sum(&self.non_zero, self.width, cells).to_f64();
        Ok(if count > 0.0 { sum / count } else { 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{SumOnlyTable, SummedAreaTable};
    use crate::{AverageSpan, ClampMode, PixelRect, Planes, SatError, SatOptions};

    const GRID: [u8; 24] = [
        0, 0, 0, 2, 0, 0, //
        0, 0, 2, 0, 2, 0, //
        0, 0, 2, 3, 2, 0, //
        0, 0, 2, 0, 2, 0, //
    ];

    fn grid() -> SummedAreaTable<u32> {
        SummedAreaTable::build(&GRID, 6, 4).unwrap()
    }

    fn brute_force(x0: usize, y0: usize, x1: usize, y1: usize) -> u32 {
        let mut total = 0;
        for y in y0..=y1 {
            for x in x0..=x1 {
                total += u32::from(GRID[y * 6 + x]);
            }
        }
        total
    }

    #[test]
    fn planes_match_reference_grid() {
        let sat = grid();
        assert_eq!(
            sat.sum_plane(),
            [
                0, 0, 0, 2, 2, 2, //
                0, 0, 2, 4, 6, 6, //
                0, 0, 4, 9, 13, 13, //
                0, 0, 6, 11, 17, 17, //
            ]
        );
        assert_eq!(
            sat.non_zero_plane(),
            [
                0, 0, 0, 1, 1, 1, //
                0, 0, 1, 2, 3, 3, //
                0, 0, 2, 4, 6, 6, //
                0, 0, 3, 5, 8, 8, //
            ]
        );
    }

    #[test]
    fn every_valid_rectangle_matches_brute_force() {
        let sat = grid();
        for y0 in 0..4 {
            for y1 in y0..4 {
                for x0 in 0..6 {
                    for x1 in x0..6 {
                        let got = sat
                            .sum(x0 as i64, y0 as i64, x1 as i64, y1 as i64)
                            .unwrap();
                        assert_eq!(got, brute_force(x0, y0, x1, y1), "({x0},{y0})-({x1},{y1})");
                    }
                }
            }
        }
    }

    #[test]
    fn clamping_is_total() {
        let sat = grid();
        let extremes = [i64::MIN, -7, -1, 0, 2, 5, 6, 100, i64::MAX];
        for &a in &extremes {
            for &b in &extremes {
                let sum = sat.sum(a, b, b, a).unwrap();
                let resolved = sat.resolve(a, b, b, a).unwrap();
                assert!(resolved.is_within(6, 4), "{resolved:?}");
                assert_eq!(sat.sum_rect(resolved).unwrap(), sum);
                assert!(sat.average(a, b, b, a).unwrap().is_finite());
            }
        }
        // Inverted rectangles cover the same cells as their normalized form.
        assert_eq!(sat.sum(5, 3, 0, 0).unwrap(), 17);
        assert_eq!(sat.sum(-3, -3, 99, 99).unwrap(), 17);
    }

    #[test]
    fn strict_mode_reports_out_of_range() {
        let options = SatOptions::new().with_clamp(ClampMode::Strict);
        let sat = SummedAreaTable::<u32>::build_with_options(&GRID, 6, 4, options).unwrap();

        assert_eq!(sat.sum(1, 1, 2, 2), Ok(4));
        assert_eq!(sat.non_zero_count(0, 0, 5, 3), Ok(8));

        for rect in [
            PixelRect::new(-1, 0, 2, 2),
            PixelRect::new(0, 0, 6, 3),
            PixelRect::new(0, 0, 5, 4),
            PixelRect::new(3, 0, 2, 2),
            PixelRect::new(0, 2, 2, 1),
        ] {
            let expected = Err(SatError::OutOfRange {
                rect,
                width: 6,
                height: 4,
            });
            assert_eq!(sat.sum_rect(rect), expected);
            assert_eq!(sat.non_zero_count_rect(rect), expected);
            assert_eq!(sat.average_rect(rect), expected.map(f64::from));
            assert_eq!(sat.non_zero_average_rect(rect), expected.map(f64::from));
        }
    }

    #[test]
    fn average_span_summed_uses_clamped_cells() {
        let sat = grid();
        // Clamps to the whole grid: 17 over 24 cells.
        let avg = sat.average(-2, -2, 7, 5).unwrap();
        assert!((avg - 17.0 / 24.0).abs() < 1e-12);
        let covered = sat.resolve(-2, -2, 7, 5).unwrap();
        assert!((avg - 17.0 / covered.pixel_count()).abs() < 1e-12);
    }

    #[test]
    fn average_span_requested_uses_raw_coordinates() {
        let options = SatOptions::new().with_average_span(AverageSpan::Requested);
        let sat = SummedAreaTable::<u32>::build_with_options(&GRID, 6, 4, options).unwrap();
        // Requested span is 10 x 8 even though only the 6 x 4 grid is summed.
        let avg = sat.average(-2, -2, 7, 5).unwrap();
        assert!((avg - 17.0 / 80.0).abs() < 1e-12);
        // Identical to the summed span for in-range rectangles.
        let avg = sat.average(1, 1, 2, 2).unwrap();
        assert!((avg - 1.0).abs() < 1e-12);
    }

    #[test]
    fn non_zero_average_of_empty_region_is_zero() {
        let sat = grid();
        assert_eq!(sat.non_zero_count(0, 0, 1, 3), Ok(0));
        assert_eq!(sat.non_zero_average(0, 0, 1, 3), Ok(0.0));
    }

    #[test]
    fn sum_only_layout_skips_the_non_zero_plane() {
        let sat = SumOnlyTable::<u32>::build(&GRID, 6, 4).unwrap();
        assert_eq!(sat.planes(), Planes::SUM);
        assert_eq!(grid().planes(), Planes::SUM | Planes::NON_ZERO);
        assert_eq!(sat.sum_plane(), grid().sum_plane());
        assert_eq!(sat.sum(2, 0, 3, 2), grid().sum(2, 0, 3, 2));
    }

    #[test]
    fn clones_answer_independently() {
        let sat = grid();
        let copy = sat.clone();
        drop(sat);
        assert_eq!(copy.sum(0, 0, 5, 3), Ok(17));
        assert_eq!(copy.non_zero_count(0, 0, 5, 3), Ok(8));
        assert_eq!(copy.sum_plane(), grid().sum_plane());
    }

    #[test]
    fn planes_never_decrease_for_non_negative_samples() {
        let sat = grid();
        for plane in [sat.sum_plane(), sat.non_zero_plane()] {
            for y in 0..4 {
                for x in 0..6 {
                    let here = plane[y * 6 + x];
                    if x > 0 {
                        assert!(plane[y * 6 + x - 1] <= here, "({x},{y})");
                    }
                    if y > 0 {
                        assert!(plane[(y - 1) * 6 + x] <= here, "({x},{y})");
                    }
                }
            }
        }
    }

    #[test]
    fn nan_samples_are_not_counted() {
        let sat = SummedAreaTable::<f64>::build(&[f64::NAN, 1.0], 2, 1).unwrap();
        assert_eq!(sat.non_zero_count(0, 0, 0, 0), Ok(0.0));
        assert_eq!(sat.non_zero_count(0, 0, 1, 0), Ok(1.0));
        assert_eq!(sat.sum(1, 0, 1, 0), Ok(1.0));
    }

    #[test]
    fn tables_can_be_shared_across_threads() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<SummedAreaTable<u32>>();
        assert_send_sync::<SumOnlyTable<f64>>();
    }

    #[test]
    fn build_rejects_bad_dimensions() {
        assert_eq!(
            SummedAreaTable::<u32>::build::<u8>(&[], 0, 4).unwrap_err(),
            SatError::InvalidDimensions {
                width: 0,
                height: 4
            }
        );
        assert_eq!(
            SummedAreaTable::<u32>::build(&[1_u8], 1, 0).unwrap_err(),
            SatError::InvalidDimensions {
                width: 1,
                height: 0
            }
        );
        assert_eq!(
            SummedAreaTable::<u32>::build(&GRID[..23], 6, 4).unwrap_err(),
            SatError::SampleCountMismatch {
                expected: 24,
                actual: 23
            }
        );
        assert_eq!(
            SumOnlyTable::<u64>::build(&[1_u8], usize::MAX, 2).unwrap_err(),
            SatError::TooLarge {
                width: usize::MAX,
                height: 2
            }
        );
    }

    #[test]
    fn wrapped_planes_still_give_exact_rectangles() {
        // Cumulative sums exceed u32::MAX, individual rows do not.
        let samples: Vec<u32> = (0..16).map(|_| u32::MAX / 8).collect();
        let sat = SumOnlyTable::<u32>::build(&samples, 4, 4).unwrap();
        assert_eq!(sat.sum(1, 2, 2, 2), Ok(2 * (u32::MAX / 8)));
        assert_eq!(sat.sum(0, 3, 3, 3), Ok(4 * (u32::MAX / 8)));
    }

    #[test]
    fn float_samples_and_signed_accumulators() {
        let sat = SummedAreaTable::<f64>::build(&[0.5_f32, -1.0, 0.0, 2.25], 2, 2).unwrap();
        assert_eq!(sat.sum(0, 0, 1, 1), Ok(1.75));
        assert_eq!(sat.non_zero_count(0, 0, 1, 1), Ok(2.0));

        let sat = SummedAreaTable::<i64>::build(&[-3_i32, 4, 5, -6], 2, 2).unwrap();
        assert_eq!(sat.sum(0, 0, 1, 1), Ok(0));
        assert_eq!(sat.sum(1, 0, 1, 1), Ok(-2));
        assert_eq!(sat.non_zero_count(0, 0, 1, 1), Ok(2));
    }
}
