#![forbid(unsafe_code)]

//! Pointer input, already resolved against the host's element tree.
//!
//! Low-level event plumbing (mouse capture, hit testing, handle detection)
//! belongs to the host. By the time input reaches the engine it is one of
//! three events, and a pointer-down carries whatever item and container the
//! host found under the pointer.

use crate::geometry::Point;
use crate::ids::{ContainerId, ItemId};

/// What the host found under the pointer on pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerHit {
    /// Closest sortable item under the pointer.
    pub item: ItemId,
    /// Closest container enclosing that item, if any.
    pub container: Option<ContainerId>,
    /// Whether the pointer landed on the item's drag handle.
    pub on_handle: bool,
}

impl PointerHit {
    /// A hit on `item` inside `container`, not on a handle.
    #[must_use]
    pub const fn new(item: ItemId, container: ContainerId) -> Self {
        Self {
            item,
            container: Some(container),
            on_handle: false,
        }
    }

    /// Mark the hit as landing on the item's handle.
    #[must_use]
    pub const fn on_handle(mut self) -> Self {
        self.on_handle = true;
        self
    }
}

/// A pointer event delivered to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed.
    Down {
        pos: Point,
        hit: Option<PointerHit>,
    },
    /// Pointer moved (button state is irrelevant; moves outside a drag are ignored).
    Move { pos: Point },
    /// Primary button released.
    Up { pos: Point },
}

impl PointerEvent {
    /// Position carried by the event.
    #[must_use]
    pub const fn pos(&self) -> Point {
        match self {
            Self::Down { pos, .. } | Self::Move { pos } | Self::Up { pos } => *pos,
        }
    }
}
