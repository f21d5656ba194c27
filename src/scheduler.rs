//! Production scheduler: the Idle/Running state machine behind the recurring
//! passive-income tick.
//!
//! The scheduler owns only logical state. The live browser timer handle is
//! held by the shell, which executes the [`TimerCommand`]s emitted here by
//! replacing its single handle slot, so at most one production timer can
//! ever be live and a stale timer cannot survive a purchase.

use crate::state::SaveState;

/// Instruction for the shell's production-timer slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerCommand {
    /// Drop the recurring tick.
    Cancel,
    /// Cancel any live tick, then arm a new one at this interval.
    Restart { interval_ms: u32 },
}

/// Two states: Idle (no producers owned) and Running at a known interval.
#[derive(Debug, Default)]
pub struct ProductionScheduler {
    /// Interval of the armed timer; `None` while idle.
    running: Option<u32>,
}

impl ProductionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the recurring tick is logically armed (test observability).
    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Re-derive the timer from `state` after a producer-affecting mutation.
    ///
    /// When producers are owned this always emits a `Restart`, even if the
    /// interval is unchanged. Cancel-and-rearm on every relevant purchase
    /// keeps the logic stateless with respect to *why* the purchase happened.
    /// Returns `None` only when there is nothing to do (idle before and
    /// after).
    pub fn rearm(&mut self, state: &SaveState) -> Option<TimerCommand> {
        match state.tick_interval_ms() {
            Some(interval_ms) => {
                self.running = Some(interval_ms);
                Some(TimerCommand::Restart { interval_ms })
            }
            None => self.running.take().map(|_| TimerCommand::Cancel),
        }
    }
}
