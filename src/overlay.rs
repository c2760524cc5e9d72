//! Coordinate axes drawn over a finished frame: the real and imaginary
//! axes in red, with a tick at every whole unit from -2 to 2.  Both are
//! placed through the same PlaneMapper that rendered the frame, so they
//! track pans and zooms.

use itertools::iproduct;
use num::Complex;

use palette::{Color, Rgb};
use planes::{ComplexPlane, PlaneMapper};
use render::Frame;

/// The axis color.
pub const AXIS_COLOR: Color = Color::Rgb(Rgb(255, 0, 0));

/// How far a tick extends to either side of its axis, in pixels.
pub const TICK_REACH: isize = 10;

const TICK_UNITS: [f64; 4] = [-2.0, -1.0, 1.0, 2.0];

/// Paints the axes that are in view onto `frame`.  `mapper` should be
/// the one the frame was rendered with.
pub fn draw_axes(frame: &mut Frame, mapper: &PlaneMapper) {
    let ComplexPlane(upper_left, _) = mapper.corners();
    let half = mapper.step() / 2.0;
    // Points guaranteed to fall inside the first column and first row.
    let left_re = upper_left.re + half;
    let top_im = upper_left.im - half;

    let axis_row = mapper
        .point_to_pixel(&Complex::new(left_re, 0.0))
        .map(|pixel| pixel.1);
    let axis_column = mapper
        .point_to_pixel(&Complex::new(0.0, top_im))
        .map(|pixel| pixel.0);

    if let Some(y) = axis_row {
        for x in 0..frame.width() {
            frame.set(x, y, AXIS_COLOR);
        }
        let columns: Vec<usize> = TICK_UNITS
            .iter()
            .filter_map(|&re| mapper.point_to_pixel(&Complex::new(re, top_im)))
            .map(|pixel| pixel.0)
            .collect();
        for (x, dy) in iproduct!(columns, -TICK_REACH..=TICK_REACH) {
            if let Some(y) = shift(y, dy) {
                frame.set(x, y, AXIS_COLOR);
            }
        }
    }

    if let Some(x) = axis_column {
        for y in 0..frame.height() {
            frame.set(x, y, AXIS_COLOR);
        }
        let rows: Vec<usize> = TICK_UNITS
            .iter()
            .filter_map(|&im| mapper.point_to_pixel(&Complex::new(left_re, im)))
            .map(|pixel| pixel.1)
            .collect();
        for (y, dx) in iproduct!(rows, -TICK_REACH..=TICK_REACH) {
            if let Some(x) = shift(x, dx) {
                frame.set(x, y, AXIS_COLOR);
            }
        }
    }
}

fn shift(base: usize, by: isize) -> Option<usize> {
    let moved = base as isize + by;
    if moved < 0 {
        None
    } else {
        Some(moved as usize)
    }
}
