//! Frame clock - turns wall-clock instants into elapsed milliseconds
//!
//! The run loop calls [`FrameClock::lap`] once per cycle and feeds the result
//! to `Session::tick`. The session itself only ever sees additive deltas.

use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Milliseconds since the previous lap; 0 on the first call.
    pub fn lap(&mut self, now: Instant) -> u32 {
        let elapsed = match self.last {
            Some(prev) => now.saturating_duration_since(prev).as_millis(),
            None => 0,
        };
        self.last = Some(now);
        u32::try_from(elapsed).unwrap_or(u32::MAX)
    }

    /// Forget the previous instant, e.g. after the loop was suspended.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
