// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plane layouts: which prefix-sum planes a table carries.

use core::fmt::Debug;

bitflags::bitflags! {
    /// Prefix-sum planes held by a table.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Planes: u8 {
        /// Cumulative sample sums.
        const SUM      = 0b0000_0001;
        /// Cumulative counts of samples greater than zero.
        const NON_ZERO = 0b0000_0010;
    }
}

mod sealed {
    #[allow(
        unnameable_types,
        unreachable_pub,
        reason = "Supertrait of `PlaneLayout` that downstream crates must not implement."
    )]
    pub trait Sealed {}
}

/// Type-level choice of planes for a [`SummedAreaTable`](crate::SummedAreaTable).
///
/// The layout is part of the table's type, so non-zero queries on a table
/// built without the non-zero plane are rejected at compile time.
pub trait PlaneLayout: sealed::Sealed + Copy + Debug + 'static {
    /// Planes built for this layout.
    const PLANES: Planes;
}

/// Sum plane plus non-zero plane. The default layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WithNonZero {}

/// Sum plane only; halves memory and build time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SumOnly {}

impl sealed::Sealed for WithNonZero {}
impl sealed::Sealed for SumOnly {}

impl PlaneLayout for WithNonZero {
    const PLANES: Planes = Planes::SUM.union(Planes::NON_ZERO);
}

impl PlaneLayout for SumOnly {
    const PLANES: Planes = Planes::SUM;
}
