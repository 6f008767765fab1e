// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Summed-area tables over a row and a small grid, plus a box-mean pass.
//!
//! This example shows how to:
//! - build tables from `u8` samples with a `u32` accumulator,
//! - print the input and both prefix planes,
//! - run sum/average and non-zero queries,
//! - drive queries from `kurbo::Rect` windows via `PixelRect::covering`.
//!
//! Run:
//! - `cargo run -p understory_demos --example summed_area_walkthrough`
//! - `RUST_LOG=trace` additionally shows the library's build and clamp records.

use std::fmt::Display;

use kurbo::Rect;
use understory_summed_area::{PixelRect, SatError, SummedAreaTable};

/// Print a row-major plane with a column ruler, one row per line.
fn print_plane<T: Display>(label: &str, plane: &[T], width: usize) {
    println!("{label}:");
    print!("\n{:5}", "");
    for x in 0..width {
        print!("{x:4} ");
    }
    print!("\n{:5}{}", "", "-".repeat(5 * width));
    for (y, row) in plane.chunks(width).enumerate() {
        print!("\n{y:4}|");
        for value in row {
            print!("{value:4} ");
        }
    }
    println!("\n");
}

fn single_row() -> Result<(), SatError> {
    println!("\nRow of six samples:\n");

    let pixels: [u8; 6] = [0, 4, 0, 2, 1, 0];
    let sat = SummedAreaTable::<u32>::build(&pixels, 6, 1)?;

    println!(
        "Sum/Avg:          {:4}   {:.6}",
        sat.sum(0, 0, 5, 0)?,
        sat.average(0, 0, 5, 0)?
    );
    println!(
        "NonZeroCount/Avg: {:4}   {:.6}",
        sat.non_zero_count(0, 0, 5, 0)?,
        sat.non_zero_average(0, 0, 5, 0)?
    );
    Ok(())
}

fn small_grid() -> Result<(), SatError> {
    println!("\n6x4 grid:\n");

    #[rustfmt::skip]
    let pixels: [u8; 24] = [
        0, 0, 0, 2, 0, 0,
        0, 0, 2, 0, 2, 0,
        0, 0, 2, 3, 2, 0,
        0, 0, 2, 0, 2, 0,
    ];
    let sat = SummedAreaTable::<u32>::build(&pixels, 6, 4)?;

    print_plane("Input", &pixels, 6);
    print_plane("SAT", sat.sum_plane(), 6);
    print_plane("SAT NonZero", sat.non_zero_plane(), 6);

    for (x0, y0, x1, y1) in [(2, 1, 2, 1), (1, 1, 2, 2), (0, 0, 5, 3), (4, 0, 5, 3)] {
        println!(
            "({x0}, {y0})-({x1}, {y1}): {:4} {:.6}",
            sat.sum(x0, y0, x1, y1)?,
            sat.average(x0, y0, x1, y1)?
        );
    }

    println!();
    println!(
        "NonZeroCount/Avg: {:4}   {:.6}",
        sat.non_zero_count(0, 0, 5, 3)?,
        sat.non_zero_average(0, 0, 5, 3)?
    );

    // Out-of-range and inverted rectangles are clamped by default.
    println!(
        "Clamped (-3, 9)-(9, -3): {:4}",
        sat.sum(-3, 9, 9, -3)?
    );

    // Mean over a 3x3 window centred on each cell; windows hanging off the
    // edge are clamped and averaged over the cells they actually cover.
    let mut means = Vec::with_capacity(pixels.len());
    for y in 0..sat.height() {
        for x in 0..sat.width() {
            let (cx, cy) = (x as f64 + 0.5, y as f64 + 0.5);
            let window = Rect::from_center_size((cx, cy), (3.0, 3.0));
            let mean = match PixelRect::covering(window) {
                Some(cells) => sat.average_rect(cells)?,
                None => 0.0,
            };
            means.push(format!("{mean:.2}"));
        }
    }
    print_plane("3x3 box mean", &means, sat.width());

    Ok(())
}

fn main() -> Result<(), SatError> {
    env_logger::init();
    single_row()?;
    small_grid()?;
    log::info!("walkthrough finished");
    Ok(())
}
