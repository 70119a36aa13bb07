#![forbid(unsafe_code)]

//! Core: geometry, identifiers, pointer input, and logging.

pub mod geometry;
pub mod ids;
pub mod input;
pub mod logging;

// Without `tracing` the disabled macros are exported at the root already.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
