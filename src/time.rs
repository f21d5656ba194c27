//! Fixed-timestep clock for UI animation.
//!
//! The browser render loop fires at display rate with a variable delta.
//! `FrameClock` converts wall-clock timestamps into a whole number of fixed
//! ticks, so flash and spinner decay advance deterministically and stay
//! testable without a browser.

pub struct FrameClock {
    /// Milliseconds per tick (e.g. 100ms at 10 ticks/sec).
    ms_per_tick: f64,
    /// Milliseconds accumulated but not yet consumed as ticks.
    carry: f64,
    /// Timestamp of the previous update, `None` on the first frame.
    last_ms: Option<f64>,
}

impl FrameClock {
    /// `ticks_per_sec`: the fixed logic rate (e.g. 10).
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1_000.0 / ticks_per_sec as f64,
            carry: 0.0,
            last_ms: None,
        }
    }

    /// Feed a wall-clock timestamp (`performance.now()` style) and get the
    /// whole ticks elapsed since the previous call; the remainder carries
    /// over. Large gaps (backgrounded tab) are clamped to 500ms so the UI
    /// never fast-forwards through a burst of stale ticks.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_ms {
            Some(prev) => (now_ms - prev).clamp(0.0, 500.0),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);

        self.carry += delta;
        let ticks = (self.carry / self.ms_per_tick) as u32;
        self.carry -= ticks as f64 * self.ms_per_tick;
        ticks
    }
}
