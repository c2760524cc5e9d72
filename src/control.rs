// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Keeping interactive renders honest.
//!
//! When the user is mashing the zoom button, the frame we started two
//! clicks ago is worthless.  A `RenderControl` hands out one
//! `RenderTicket` per render; starting a new render bumps a shared
//! generation counter, and every older ticket starts failing its
//! `check()`.  A ticket can also carry a frame budget, after which it
//! fails on its own.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use error::RenderError;

/// Issues tickets and supersedes old ones.  Clones share the same
/// generation counter, so the interaction layer can keep one and give
/// another to whatever thread is rendering.
#[derive(Clone, Debug, Default)]
pub struct RenderControl {
    generation: Arc<AtomicUsize>,
}

impl RenderControl {
    /// A control with no renders in flight.
    pub fn new() -> Self {
        RenderControl::default()
    }

    /// Starts a new render, superseding every ticket issued before it.
    pub fn begin(&self, budget: Option<Duration>) -> RenderTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RenderTicket {
            generation,
            current: Some(self.generation.clone()),
            started: Instant::now(),
            budget,
        }
    }

    /// Supersedes every outstanding ticket without starting anything.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// Permission to keep rendering.  Workers call `check()` between rows.
#[derive(Clone, Debug)]
pub struct RenderTicket {
    generation: usize,
    current: Option<Arc<AtomicUsize>>,
    started: Instant,
    budget: Option<Duration>,
}

impl RenderTicket {
    /// A ticket nobody can supersede, with no budget.  The plain
    /// `render()` calls use this.
    pub fn unbounded() -> Self {
        RenderTicket {
            generation: 0,
            current: None,
            started: Instant::now(),
            budget: None,
        }
    }

    /// Fails once a newer render has begun or the budget has run out.
    pub fn check(&self) -> Result<(), RenderError> {
        if let Some(ref current) = self.current {
            if current.load(Ordering::SeqCst) != self.generation {
                return Err(RenderError::Superseded);
            }
        }
        if let Some(budget) = self.budget {
            if self.started.elapsed() >= budget {
                return Err(RenderError::DeadlineExceeded(budget));
            }
        }
        Ok(())
    }

    /// How long this ticket has been alive.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ticket_passes() {
        let control = RenderControl::new();
        let ticket = control.begin(None);
        assert!(ticket.check().is_ok());
        assert!(RenderTicket::unbounded().check().is_ok());
    }

    #[test]
    fn newer_render_supersedes_older() {
        let control = RenderControl::new();
        let first = control.begin(None);
        let second = control.clone().begin(None);
        match first.check() {
            Err(RenderError::Superseded) => {}
            other => panic!("expected Superseded, got {:?}", other),
        }
        assert!(second.check().is_ok());
    }

    #[test]
    fn cancel_supersedes_everything() {
        let control = RenderControl::new();
        let ticket = control.begin(Some(Duration::from_secs(3600)));
        control.cancel();
        assert!(ticket.check().is_err());
    }

    #[test]
    fn zero_budget_expires_immediately() {
        let control = RenderControl::new();
        let ticket = control.begin(Some(Duration::from_millis(0)));
        match ticket.check() {
            Err(RenderError::DeadlineExceeded(budget)) => {
                assert_eq!(budget, Duration::from_millis(0))
            }
            other => panic!("expected DeadlineExceeded, got {:?}", other),
        }
    }
}
