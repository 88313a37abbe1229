//! Integration layer
//!
//! Wires the pure core to the terminal and the services:
//! - Runtime owning the state and the command executor
//! - AppRunner main loop
//! - Renderer

pub mod app_runner;
pub mod renderer;
pub mod runtime;
