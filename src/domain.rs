//! Domain logic
//!
//! This module contains the dashboard's business rules, free of I/O:
//! - Bookmarks and URL normalization
//! - Hex colors, gradient pairs and interpolation
//! - Quotes and the canonical fallback text
//! - Theme flag and derived surface tints
//! - Text formatting helpers

pub mod bookmark;
pub mod color;
pub mod quote;
pub mod text;
pub mod theme;
