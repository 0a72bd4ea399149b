//! `setInterval` wrapper.

use std::time::Duration;
use wasm_bindgen::prelude::*;

/// Repeating browser timer, cleared on drop.
pub struct Interval {
    handle: Option<i32>,
    _tick: Closure<dyn Fn()>,
}

impl Interval {
    /// Calls `tick` every `period`.
    ///
    /// # Arguments
    /// - `period`: time between calls; periods beyond `i32::MAX` ms are clamped
    /// - `tick`: callback run on the browser event loop
    ///
    /// # Errors
    /// Returns the JS error when there is no `window` or `setInterval` throws.
    pub fn new<F>(period: Duration, tick: F) -> Result<Self, JsValue>
    where
        F: Fn() + 'static,
    {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let tick = Closure::<dyn Fn()>::new(tick);
        let millis = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(tick.as_ref().unchecked_ref(), millis)?;

        Ok(Self {
            handle: Some(handle),
            _tick: tick,
        })
    }

    /// Stops the timer.
    ///
    /// Safe to call more than once; only the first call clears the handle.
    pub fn cancel(&mut self) {
        if let (Some(handle), Some(window)) = (self.handle.take(), web_sys::window()) {
            window.clear_interval_with_handle(handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}
