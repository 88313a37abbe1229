//! Reusable UI widgets

pub mod bookmark_list;
pub mod countdown;
pub mod gradient_fill;
pub mod link_bar;
