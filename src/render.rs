// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns a view into a frame full of colors.
//!
//! Every pixel is independent of every other, so the frame can be cut
//! into horizontal bands and each band handed to its own thread.  The
//! only shared state is the read-only mapper and evaluator; each
//! thread writes to a disjoint slice of the output.

extern crate crossbeam;

use crossbeam::thread::ScopedJoinHandle;

use control::RenderTicket;
use error::RenderError;
use escape::EscapeEvaluator;
use palette::{Color, Palette, Rgb};
use planes::{Pixel, PlaneMapper};
use view::ViewState;

/// A rendered image: `width * height` colors in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Frame {
    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Every pixel, row by row from the top.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// The color at column `x`, row `y`, if that's inside the frame.
    pub fn get(&self, x: usize, y: usize) -> Option<&Color> {
        if x < self.width && y < self.height {
            self.pixels.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Overwrites the color at column `x`, row `y`.  Writes outside the
    /// frame are dropped.
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// Packed 8-bit RGB, three bytes per pixel, ready for an encoder.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            let Rgb(r, g, b) = color.to_rgb();
            bytes.extend_from_slice(&[r, g, b]);
        }
        bytes
    }
}

/// Everything needed to render one frame of one view.  Once built, it
/// doesn't change; build a new one when the view does.
#[derive(Copy, Clone, Debug)]
pub struct FrameRenderer {
    mapper: PlaneMapper,
    evaluator: EscapeEvaluator,
}

impl FrameRenderer {
    /// Validates the view and dimensions up front, so a bad zoom or an
    /// empty budget is reported instead of turning into NaN pixels.
    pub fn new(
        width: usize,
        height: usize,
        view: &ViewState,
        palette: Palette,
    ) -> Result<Self, RenderError> {
        let mapper = PlaneMapper::new(width, height, view)?;
        Ok(FrameRenderer {
            mapper,
            evaluator: EscapeEvaluator::new(view.max_iterations, palette),
        })
    }

    /// The pixel-to-plane mapping this renderer uses.
    pub fn mapper(&self) -> &PlaneMapper {
        &self.mapper
    }

    /// The per-pixel evaluator this renderer uses.
    pub fn evaluator(&self) -> &EscapeEvaluator {
        &self.evaluator
    }

    fn fill_row(&self, y: usize, row: &mut [Color]) {
        for (x, cell) in row.iter_mut().enumerate() {
            let c = self.mapper.pixel_to_point(&Pixel(x, y));
            *cell = self.evaluator.color_at(&c);
        }
    }

    /// Fills a run of whole rows starting at `first_row`, checking the
    /// ticket before each row.
    fn render_band(
        &self,
        first_row: usize,
        band: &mut [Color],
        ticket: &RenderTicket,
    ) -> Result<(), RenderError> {
        let width = self.mapper.integral_plane.0;
        for (offset, row) in band.chunks_mut(width).enumerate() {
            ticket.check()?;
            self.fill_row(first_row + offset, row);
        }
        Ok(())
    }

    /// The single-threaded reference render.  Nothing can interrupt it.
    pub fn render(&self) -> Frame {
        let width = self.mapper.integral_plane.0;
        let mut pixels = vec![Color::default(); self.mapper.len()];
        for (y, row) in pixels.chunks_mut(width).enumerate() {
            self.fill_row(y, row);
        }
        self.frame(pixels)
    }

    /// Renders with `threads` workers, each taking a contiguous band
    /// of rows.  The result is identical to `render()`.
    pub fn render_threaded(&self, threads: usize) -> Result<Frame, RenderError> {
        self.render_with(threads, &RenderTicket::unbounded())
    }

    /// The general entry point: any number of threads, and a ticket
    /// that may abort the render between rows.
    pub fn render_with(&self, threads: usize, ticket: &RenderTicket) -> Result<Frame, RenderError> {
        let (width, height) = (self.mapper.integral_plane.0, self.mapper.integral_plane.1);
        let threads = threads.max(1).min(height);
        debug!(
            "rendering {}x{} with {} thread(s), {} iterations",
            width,
            height,
            threads,
            self.evaluator.max_iterations()
        );

        let mut pixels = vec![Color::default(); self.mapper.len()];
        let result = if threads == 1 {
            self.render_band(0, &mut pixels, ticket)
        } else {
            let rows_per_band = (height + threads - 1) / threads;
            let bands: Vec<&mut [Color]> = pixels.chunks_mut(rows_per_band * width).collect();
            crossbeam::scope(|spawner| {
                let handles: Vec<ScopedJoinHandle<Result<(), RenderError>>> = bands
                    .into_iter()
                    .enumerate()
                    .map(|(i, band)| {
                        spawner.spawn(move |_| self.render_band(i * rows_per_band, band, ticket))
                    })
                    .collect();

                handles
                    .into_iter()
                    .map(|handle| handle.join().unwrap_or(Err(RenderError::WorkerPanicked)))
                    .collect::<Result<Vec<()>, RenderError>>()
                    .map(|_| ())
            })
            .unwrap_or(Err(RenderError::WorkerPanicked))
        };

        match result {
            Ok(()) => {
                debug!("rendered {}x{} in {:?}", width, height, ticket.elapsed());
                Ok(self.frame(pixels))
            }
            Err(e) => {
                info!("abandoned {}x{} render: {}", width, height, e);
                Err(e)
            }
        }
    }

    fn frame(&self, pixels: Vec<Color>) -> Frame {
        Frame {
            width: self.mapper.integral_plane.0,
            height: self.mapper.integral_plane.1,
            pixels,
        }
    }
}

/// Renders one full frame of `view`, single-threaded.  Fails only if
/// the view or dimensions are invalid.
pub fn render(
    width: usize,
    height: usize,
    view: &ViewState,
    palette: Palette,
) -> Result<Frame, RenderError> {
    Ok(FrameRenderer::new(width, height, view, palette)?.render())
}
