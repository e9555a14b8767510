//! Browser timers

use gloo::timers::callback::Timeout;
use vitrina_ports::{Clock, Completion};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// [`Clock`] over `setTimeout` and `requestAnimationFrame`
#[derive(Clone)]
pub struct BrowserClock {
    window: Window,
}

impl BrowserClock {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Clock for BrowserClock {
    fn sleep(&self, ms: u32) -> Completion {
        let (signal, completion) = Completion::pair();
        Timeout::new(ms, move || signal.complete()).forget();
        completion
    }

    fn next_frame(&self) -> Completion {
        let (signal, completion) = Completion::pair();
        let callback = Closure::once_into_js(move || signal.complete());
        if let Err(e) = self
            .window
            .request_animation_frame(callback.unchecked_ref())
        {
            log::warn!("[clock] requestAnimationFrame failed: {:?}", e);
            return Completion::ready();
        }
        completion
    }
}
