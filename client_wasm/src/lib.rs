//! Browser adapter for Impossible Pong
//!
//! Maps keyboard events onto the match input, drives `Match::frame` from the
//! host animation callback and forwards audio, effects and summaries to JS
//! callbacks. Rendering stays on the JS side.

pub mod bridge;
pub mod fsm;
pub mod input;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WasmGame;
