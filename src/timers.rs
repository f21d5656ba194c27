//! RAII handles for browser timers.
//!
//! Dropping a handle clears the underlying interval/timeout, so a slot
//! holding an `Option<Interval>` can never leak a second live timer:
//! replacing the slot's contents cancels the previous one first.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// A recurring `setInterval` timer, cleared on drop.
pub struct Interval {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    /// Arm a recurring browser interval. `None` outside a window context or
    /// when the browser rejects the timer.
    pub fn new(interval_ms: u32, f: impl FnMut() + 'static) -> Option<Self> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let id = web_sys::window()?
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                interval_ms as i32,
            )
            .ok()?;
        Some(Self {
            id,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}

/// A single-shot `setTimeout` timer, cleared on drop.
pub struct Timeout {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    /// Arm a single-shot browser timeout. `None` outside a window context or
    /// when the browser rejects the timer.
    pub fn new(delay_ms: u32, f: impl FnMut() + 'static) -> Option<Self> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let id = web_sys::window()?
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay_ms as i32,
            )
            .ok()?;
        Some(Self {
            id,
            _callback: callback,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.id);
        }
    }
}
