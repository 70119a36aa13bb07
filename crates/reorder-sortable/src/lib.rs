#![forbid(unsafe_code)]

//! Drag-to-reorder engine.
//!
//! Pointer input flows through [`Sortable`] into a [`DragController`], which
//! resolves an [`InsertionTarget`] with the pure functions in [`resolver`],
//! styles the feedback from the dragged item's colors, and keeps the ghost,
//! placeholder and indicator in a [`FeedbackPresenter`]. Hosts plug in by
//! implementing [`SortSurface`]; [`StackSurface`] is a ready-made in-memory
//! one.

pub mod config;
pub mod controller;
pub mod feedback;
pub mod resolver;
pub mod sortable;
pub mod stack;
pub mod surface;

pub use config::{
    DEFAULT_GHOST_BACKGROUND, DEFAULT_HANDLE_SYMBOL, DEFAULT_INDICATOR_COLOR, FeedbackConfig,
    SortableConfig,
};
pub use controller::{
    CursorHint, DragController, DragPhase, DragSession, ReorderEvent, session_open,
};
pub use feedback::{FeedbackPresenter, Ghost, Indicator, Placeholder, SnapshotFlags};
pub use resolver::{
    IndicatorLine, IndicatorOffsets, InsertionTarget, Slot, indicator_line, resolve_insertion,
};
pub use sortable::{Sortable, SortableError};
pub use stack::{StackLayout, StackSurface};
pub use surface::SortSurface;
