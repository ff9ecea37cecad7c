//! Library entry point.
//!
//! The weapons plugin lives in [`plugins::weapons`]; the rest of the crate is the demo
//! scene that hosts it. Integration tests in `tests/` import both from here.

pub mod common;
pub mod game;
pub mod plugins;
