// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The view: where we're looking, how closely, and how hard we're
//! willing to work to decide whether a point is in the set.
//!
//! A `ViewState` is a plain value.  The interaction layer owns one,
//! replaces it with the result of `apply()` whenever the user pushes
//! a button, and hands it to the renderer.  Nothing in here draws.

use std::str::FromStr;

use error::{invalid, RenderError};

/// The iteration budget a fresh (or reset) view starts with.  Low
/// budgets are prettier zoomed out; deep zooms need more.
pub const DEFAULT_MAX_ITERATIONS: u32 = 80;

/// The zoom at which the view spans four units, -2..2 on both axes.
pub const DEFAULT_ZOOM_PERCENT: f64 = 100.0;

/// How far a pan moves the center, as a fraction of the unzoomed span.
pub const PAN_FRACTION: f64 = 0.1;

/// How much a single zoom step changes the zoom, as a fraction of the
/// current zoom.
pub const ZOOM_FRACTION: f64 = 0.1;

/// Zoom steps stop here on the way out.  At 1% the frame already spans
/// four hundred units.
pub const MIN_ZOOM_PERCENT: f64 = 1.0;

/// Zoom steps stop here on the way in.  Past this, neighboring pixels
/// are closer together than an f64 can tell apart.
pub const MAX_ZOOM_PERCENT: f64 = 1e15;

/// The pan/zoom/iteration-budget parameters governing one render.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewState {
    /// Real coordinate of the center of the image.
    pub center_x: f64,
    /// Imaginary coordinate of the center of the image.
    pub center_y: f64,
    /// Percent zoomed in.  100 shows the whole -2..2 square, larger
    /// values zoom in, smaller values zoom out.  Must be positive.
    pub zoom_percent: f64,
    /// The most iterations spent on a single point before we assume
    /// it's in the set.  Must be positive.
    pub max_iterations: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            center_x: 0.0,
            center_y: 0.0,
            zoom_percent: DEFAULT_ZOOM_PERCENT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl ViewState {
    /// Builds a view, rejecting anything the renderer couldn't turn
    /// into sensible pixels.
    pub fn new(
        center_x: f64,
        center_y: f64,
        zoom_percent: f64,
        max_iterations: u32,
    ) -> Result<ViewState, RenderError> {
        let view = ViewState {
            center_x,
            center_y,
            zoom_percent,
            max_iterations,
        };
        view.validate()?;
        Ok(view)
    }

    /// Since the fields are public, anyone can build a broken view;
    /// the renderer calls this before touching a single pixel.
    pub fn validate(&self) -> Result<(), RenderError> {
        if !(self.zoom_percent.is_finite() && self.zoom_percent > 0.0) {
            return Err(invalid(format!(
                "zoom percent must be a positive number, got {}",
                self.zoom_percent
            )));
        }
        if self.max_iterations == 0 {
            return Err(invalid("maximum iterations must be greater than zero"));
        }
        if !(self.center_x.is_finite() && self.center_y.is_finite()) {
            return Err(invalid(format!(
                "center must be finite, got ({}, {})",
                self.center_x, self.center_y
            )));
        }
        Ok(())
    }

    /// The distance a single pan moves the center.  It shrinks as we
    /// zoom in, so a pan always moves the picture by the same share of
    /// the screen.
    pub fn pan_distance(&self) -> f64 {
        (DEFAULT_ZOOM_PERCENT / self.zoom_percent) * PAN_FRACTION
    }

    /// Returns the view that results from one user interaction.  Zoom
    /// steps never carry the zoom past `MIN_ZOOM_PERCENT` or
    /// `MAX_ZOOM_PERCENT`, so a valid view stays valid however long the
    /// button is held; a view that starts outside those bounds is never
    /// pushed further out.
    pub fn apply(&self, interaction: Interaction) -> ViewState {
        let pan = self.pan_distance();
        let mut next = *self;
        match interaction {
            Interaction::PanUp => next.center_y += pan,
            Interaction::PanDown => next.center_y -= pan,
            Interaction::PanLeft => next.center_x -= pan,
            Interaction::PanRight => next.center_x += pan,
            Interaction::ZoomIn => {
                let grown = self.zoom_percent + self.zoom_percent * ZOOM_FRACTION;
                next.zoom_percent = grown.min(MAX_ZOOM_PERCENT.max(self.zoom_percent));
            }
            Interaction::ZoomOut => {
                let shrunk = self.zoom_percent - self.zoom_percent * ZOOM_FRACTION;
                next.zoom_percent = shrunk.max(MIN_ZOOM_PERCENT.min(self.zoom_percent));
            }
            Interaction::Reset => next = ViewState::default(),
        }
        next
    }

    /// The "refine" action: take a new iteration budget from a text
    /// field.  Blank text, garbage, and budgets that aren't positive
    /// all leave the current budget in place.
    pub fn with_iterations_text(&self, text: &str) -> ViewState {
        match parse_field::<u32>(text) {
            Ok(Some(0)) => {
                warn!("ignoring non-positive iteration budget {:?}", text);
                *self
            }
            Ok(Some(max_iterations)) => ViewState {
                max_iterations,
                ..*self
            },
            Ok(None) => *self,
            Err(e) => {
                warn!("{}; keeping {} iterations", e, self.max_iterations);
                *self
            }
        }
    }
}

/// Parses a numeric text field.  Blank (or all-whitespace) text is not
/// an error; it means "leave the value alone" and comes back as
/// `Ok(None)`.
pub fn parse_field<T: FromStr>(text: &str) -> Result<Option<T>, RenderError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    T::from_str(text)
        .map(Some)
        .map_err(|_| RenderError::ParseFailure(text.to_string()))
}

/// The buttons the user can push.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Interaction {
    /// Move the view toward positive imaginary values.
    PanUp,
    /// Move the view toward negative imaginary values.
    PanDown,
    /// Move the view toward negative real values.
    PanLeft,
    /// Move the view toward positive real values.
    PanRight,
    /// Zoom in by one step.
    ZoomIn,
    /// Zoom out by one step.
    ZoomOut,
    /// Back to the default view and iteration budget.
    Reset,
}

impl FromStr for Interaction {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Interaction, RenderError> {
        match s.trim().to_lowercase().as_str() {
            "up" | "^" => Ok(Interaction::PanUp),
            "down" | "v" => Ok(Interaction::PanDown),
            "left" | "<" => Ok(Interaction::PanLeft),
            "right" | ">" => Ok(Interaction::PanRight),
            "in" | "+" => Ok(Interaction::ZoomIn),
            "out" | "-" => Ok(Interaction::ZoomOut),
            "reset" => Ok(Interaction::Reset),
            _ => Err(RenderError::ParseFailure(s.to_string())),
        }
    }
}

/// Parses a comma-separated list of interactions, e.g. `in,in,left`.
pub fn parse_interactions(s: &str) -> Result<Vec<Interaction>, RenderError> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(Interaction::from_str)
        .collect()
}
