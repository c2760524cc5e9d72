// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time evaluation.
//!
//! Take a point `c` on the complex plane, start `z` at zero, and
//! repeatedly replace `z` with `z² + c`.  If `|z|` ever reaches 2 the
//! sequence is guaranteed to run off to infinity, and the number of
//! steps it took to get there is the "velocity" we color by.  Points
//! that are still inside the radius after the iteration budget runs
//! out are assumed to be in the set.

use num::Complex;

use palette::{Color, Palette};

// |z|² at which we give up on a point.  Radius 2, squared, so we never
// need a square root.
const ESCAPE_NORM_SQR: f64 = 4.0;

/// Returns the number of iterations completed before `re + im·i`
/// escaped, or `max_iterations` if it never did.  The result is always
/// in `0..=max_iterations`, and `max_iterations` means "in the set."
pub fn iteration_count(re: f64, im: f64, max_iterations: u32) -> u32 {
    let (mut zr, mut zi) = (0.0_f64, 0.0_f64);
    let (mut zr_sq, mut zi_sq) = (0.0_f64, 0.0_f64);
    let mut n = 0;
    while n < max_iterations && zr_sq + zi_sq < ESCAPE_NORM_SQR {
        zi = 2.0 * zr * zi + im;
        zr = zr_sq - zi_sq + re;
        zr_sq = zr * zr;
        zi_sq = zi * zi;
        n += 1;
    }
    n
}

/// Same as `iteration_count`, for a point that's already a complex
/// number.
#[inline]
pub fn iterate_point(c: &Complex<f64>, max_iterations: u32) -> u32 {
    iteration_count(c.re, c.im, max_iterations)
}

/// Bundles an iteration budget with the palette that turns counts into
/// colors.  This is all the renderer needs to know per pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EscapeEvaluator {
    max_iterations: u32,
    palette: Palette,
}

impl EscapeEvaluator {
    /// `max_iterations` must be positive; the renderer validates the
    /// view it came from before building one of these.
    pub fn new(max_iterations: u32, palette: Palette) -> Self {
        EscapeEvaluator {
            max_iterations,
            palette,
        }
    }

    /// The iteration budget.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Iteration count for a point under this evaluator's budget.
    pub fn count_at(&self, c: &Complex<f64>) -> u32 {
        iterate_point(c, self.max_iterations)
    }

    /// The color of a point.
    pub fn color_at(&self, c: &Complex<f64>) -> Color {
        self.palette.color_for(self.count_at(c), self.max_iterations)
    }
}
