//! Fixed-step frame clock.
//!
//! Converts irregular wall-clock deltas into whole steps of `step_ms`,
//! carrying the remainder into the next call.

use crate::types::TICK_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    step_ms: u32,
    carry_ms: u32,
}

impl FrameClock {
    /// A zero step is treated as 1ms.
    pub fn new(step_ms: u32) -> Self {
        Self {
            step_ms: step_ms.max(1),
            carry_ms: 0,
        }
    }

    pub fn step_ms(&self) -> u32 {
        self.step_ms
    }

    /// Time carried towards the next step
    pub fn carry_ms(&self) -> u32 {
        self.carry_ms
    }

    /// Add `elapsed_ms` and return how many whole steps are now due.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let total = self.carry_ms.saturating_add(elapsed_ms);
        self.carry_ms = total % self.step_ms;
        total / self.step_ms
    }

    /// Drop any carried time
    pub fn reset(&mut self) {
        self.carry_ms = 0;
    }

    /// Time until the next step is due
    pub fn until_next_ms(&self) -> u32 {
        self.step_ms - self.carry_ms
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TICK_MS)
    }
}
