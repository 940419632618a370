//! Per-view fetch bookkeeping.
//!
//! A slot accepts a result only if it belongs to the current navigation and is
//! newer than the last result it applied. Overlapping refetches after rapid
//! submissions therefore settle on the latest one issued.

use crate::domain::Loadable;
use crate::usecases::router::Router;
use std::fmt::Display;
use tracing::{debug, warn};

/// Issued by `ViewSlot::begin`; hand it back with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    epoch: u64,
    seq: u64,
}

#[derive(Debug)]
pub struct ViewSlot<T> {
    state: Loadable<T>,
    epoch: u64,
    issued: u64,
    applied: u64,
}

impl<T> ViewSlot<T> {
    /// Slot for a view mounted under navigation `epoch`.
    pub fn new(epoch: u64) -> Self {
        Self {
            state: Loadable::Loading,
            epoch,
            issued: 0,
            applied: 0,
        }
    }

    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket {
            epoch: self.epoch,
            seq: self.issued,
        }
    }

    /// Apply a finished fetch. Returns whether the state changed.
    ///
    /// Errors are logged and otherwise ignored; the view keeps what it had.
    pub fn apply<E: Display>(
        &mut self,
        router: &Router,
        ticket: FetchTicket,
        result: Result<T, E>,
    ) -> bool {
        if ticket.epoch != self.epoch || !router.is_current(ticket.epoch) {
            debug!(epoch = ticket.epoch, "dropping result for a view no longer shown");
            return false;
        }
        if ticket.seq <= self.applied {
            debug!(seq = ticket.seq, applied = self.applied, "dropping superseded result");
            return false;
        }
        match result {
            Ok(value) => {
                self.state = Loadable::Loaded(value);
                self.applied = ticket.seq;
                true
            }
            Err(e) => {
                warn!(error = %e, "fetch failed, keeping current view state");
                false
            }
        }
    }

    pub fn state(&self) -> &Loadable<T> {
        &self.state
    }

    pub fn loaded(&self) -> Option<&T> {
        self.state.as_loaded()
    }
}
