#![forbid(unsafe_code)]

//! Reorder terminal demo: lists of items you can drag with the mouse.

pub mod app;
pub mod cli;
pub mod render;
pub mod session;
