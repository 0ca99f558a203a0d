//! Console logging for the browser build.
//!
//! `console_log!` formats like `format!` and writes to the devtools console
//! through `web_sys::console`. Off wasm32 (unit tests) it only evaluates its
//! arguments, since the JS imports are unavailable there.

#[cfg(target_arch = "wasm32")]
pub fn write(message: &str) {
    web_sys::console::log_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn write(_message: &str) {}

#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {
        $crate::logging::write(&format!($($arg)*))
    };
}
