#![forbid(unsafe_code)]

//! Reorder public facade crate.
//!
//! Re-exports the types most hosts need from the internal crates and offers
//! a prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use reorder_core::geometry::{Bounds, Point};
pub use reorder_core::ids::{ContainerId, ItemId};
pub use reorder_core::input::{PointerEvent, PointerHit};

// --- Style re-exports ------------------------------------------------------

pub use reorder_style::{
    Color, ColorParseError, ComputedStyle, FeedbackPalette, PaletteAlphas, Rgb, derive_color,
};

// --- Sortable re-exports ---------------------------------------------------

pub use reorder_sortable::{
    CursorHint, DragController, DragPhase, FeedbackConfig, FeedbackPresenter, IndicatorOffsets,
    InsertionTarget, ReorderEvent, SortSurface, Sortable, SortableConfig, SortableError,
    StackLayout, StackSurface,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for reorder hosts.
#[derive(Debug)]
pub enum Error {
    /// A color string failed to parse.
    Color(ColorParseError),
    /// A convenience-API call was rejected.
    Sortable(SortableError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(err) => write!(f, "{err}"),
            Self::Sortable(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Color(err) => Some(err),
            Self::Sortable(err) => Some(err),
        }
    }
}

impl From<ColorParseError> for Error {
    fn from(err: ColorParseError) -> Self {
        Self::Color(err)
    }
}

impl From<SortableError> for Error {
    fn from(err: SortableError) -> Self {
        Self::Sortable(err)
    }
}

/// Standard result type for reorder APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Bounds, Color, ComputedStyle, ContainerId, Error, ItemId, Point, PointerEvent,
        PointerHit, ReorderEvent, Result, SortSurface, Sortable, SortableConfig, StackSurface,
    };

    pub use crate::{core, sortable, style};
}

pub use reorder_core as core;
pub use reorder_sortable as sortable;
pub use reorder_style as style;
