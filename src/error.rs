// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type shared by every stage of a render.

use std::io;
use std::time::Duration;

/// Everything that can go wrong between a view and a written image.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The view or the frame dimensions can't produce a meaningful
    /// image: a zoom that isn't a positive finite number, a zero
    /// iteration budget, an empty frame, or a non-finite center.
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// Text from the interaction layer didn't parse.  Callers are
    /// expected to log this and keep the previous value.
    #[fail(display = "could not parse {:?}", _0)]
    ParseFailure(String),

    /// A newer render was started (or all renders were cancelled)
    /// while this one was still in flight.
    #[fail(display = "render superseded by a newer request")]
    Superseded,

    /// The render ran past its frame budget.
    #[fail(display = "render exceeded its budget of {:?}", _0)]
    DeadlineExceeded(Duration),

    /// One of the band workers panicked.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,

    /// Writing the finished frame failed.
    #[fail(display = "i/o error: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        RenderError::Io(err)
    }
}

/// Shorthand for the configuration variant.
pub(crate) fn invalid<S: Into<String>>(reason: S) -> RenderError {
    RenderError::InvalidConfiguration(reason.into())
}
