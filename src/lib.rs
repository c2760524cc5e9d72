#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer with pan and zoom
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c`, starting from
//! zero, never runs off to infinity.  We can't iterate forever, so we
//! iterate up to a budget and count how many steps each point takes to
//! leave the circle of radius 2.  That count, the point's "velocity,"
//! is what gets colored; points that never leave are the black (or
//! white) heart of the image.
//!
//! The pieces, leaf first:
//!
//! * `planes::PlaneMapper` maps a pixel, under a `view::ViewState`
//!   (center, zoom, iteration budget), to a point on the complex plane.
//! * `escape` counts iterations, and `palette` turns counts into colors.
//! * `render::FrameRenderer` does both for every pixel, on one thread
//!   or several, and can be abandoned mid-frame through a
//!   `control::RenderTicket`.
//!
//! Everything interactive lives outside: whatever owns the window keeps
//! a `ViewState`, replaces it as the user pans and zooms, calls
//! `render()`, and shows the frame it gets back.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

pub mod control;
pub mod error;
pub mod escape;
pub mod output;
pub mod overlay;
pub mod palette;
pub mod planes;
pub mod render;
pub mod view;

pub use control::{RenderControl, RenderTicket};
pub use error::RenderError;
pub use escape::{iteration_count, EscapeEvaluator};
pub use palette::{Color, Hsb, Palette, RampDirection, Rgb};
pub use planes::{map_pixel, Pixel, PlaneMapper};
pub use render::{render, Frame, FrameRenderer};
pub use view::{Interaction, ViewState};
