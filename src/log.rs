//! Browser console logging.
//!
//! On wasm32 these forward to `console.log` / `console.warn`. Elsewhere
//! (native `cargo test`) they compile to no-ops, since wasm-bindgen imports
//! panic when called off wasm.

/// Log an informational message prefixed with the site tag.
#[cfg(target_arch = "wasm32")]
pub fn info(msg: &str) {
    web_sys::console::log_1(&format!("portfolio: {msg}").into());
}

/// Log a recoverable failure prefixed with the site tag.
#[cfg(target_arch = "wasm32")]
pub fn warn(msg: &str) {
    web_sys::console::warn_1(&format!("portfolio: {msg}").into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn info(_msg: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(_msg: &str) {}
