//! Infrastructure layer
//!
//! This module handles external integrations and services:
//! - TUI foundation
//! - CLI argument processing
//! - Configuration loading
//! - Key-value persistence
//! - Timers and HTTP requests

pub mod cli;
pub mod config;
pub mod favicon_service;
pub mod http;
pub mod quote_service;
pub mod storage;
pub mod timer_service;
pub mod tui;
