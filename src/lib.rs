//! # tabdash - a new-tab dashboard for the terminal
//!
//! Clock, quote of the day, bookmarks, a pomodoro timer and an animated
//! gradient, rendered with Ratatui. State management follows the Elm
//! architecture:
//!
//! - **Model** (`core::state`): application state
//! - **Message** (`core::msg`, `core::raw_msg`): events that can change the state
//! - **Update** (`core::update`): pure functions that transform state
//! - **Command** (`core::cmd`): side effects (storage, timers, network)
//! - **View** (`presentation`): rendering based on the current state
//!
//! ## Example Usage
//!
//! ```rust
//! use tabdash::core::{
//!     msg::{pomodoro::PomodoroMsg, Msg},
//!     state::AppState,
//!     update::update,
//! };
//!
//! let state = AppState::default();
//! let (state, commands) = update(Msg::Pomodoro(PomodoroMsg::Start), state);
//!
//! assert!(state.pomodoro.running);
//! assert_eq!(commands.len(), 1);
//! ```

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod integration;
pub mod presentation;
pub mod utils;

pub type Result<T> = color_eyre::eyre::Result<T>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
