//! Hover-intent debouncing for hover-triggered selects.
//!
//! Opening is immediate; only closing is debounced, so the pointer can cross
//! the gap between trigger and floating list without the control flickering
//! closed. Time is injected by the caller, never sampled here, which keeps
//! the timer deterministic under test and trivially cancellable.

use std::time::Duration;
use std::time::Instant;

pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_millis(100);

#[derive(Clone, Debug)]
pub struct HoverIntent {
    close_delay: Duration,
    close_at: Option<Instant>,
    hovering: bool,
}

impl Default for HoverIntent {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSE_DELAY)
    }
}

impl HoverIntent {
    pub fn new(close_delay: Duration) -> Self {
        Self {
            close_delay,
            close_at: None,
            hovering: false,
        }
    }

    /// Feeds a hover transition. Returns `true` when the control should open
    /// right now (hover entered). Leaving arms the close deadline instead;
    /// re-entering before it fires cancels it.
    pub fn on_hover_change(&mut self, hovering: bool, now: Instant) -> bool {
        if hovering {
            self.hovering = true;
            self.close_at = None;
            return true;
        }
        if self.hovering {
            self.hovering = false;
            self.close_at = Some(now + self.close_delay);
        }
        false
    }

    /// Consumes an expired close deadline. Returns `true` at most once per
    /// armed deadline.
    pub fn poll_close(&mut self, now: Instant) -> bool {
        match self.close_at {
            Some(deadline) if now >= deadline => {
                self.close_at = None;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending close without firing it. Called when the control
    /// closes for another reason or is torn down.
    pub fn cancel(&mut self) {
        self.close_at = None;
        self.hovering = false;
    }

    pub fn close_pending(&self) -> bool {
        self.close_at.is_some()
    }
}
