//! Platform hosts
//!
//! - `script`: line-oriented input scripts for the native binary
//! - `web`: HTML canvas drawing and sprite preloading (wasm32 only)

#[cfg(not(target_arch = "wasm32"))]
pub mod script;
#[cfg(target_arch = "wasm32")]
pub mod web;
