#![forbid(unsafe_code)]

//! Public entry point: a sortable instance bound to one host surface.
//!
//! [`Sortable`] owns the surface and a [`DragController`], filters raw
//! pointer input down to the events the controller cares about, and offers
//! the convenience API hosts expect (refresh, add an item, read the order,
//! teardown).
//!
//! # Example
//!
//! ```
//! use reorder_core::geometry::{Bounds, Point};
//! use reorder_sortable::{Sortable, SortableConfig, StackSurface};
//! use reorder_style::ComputedStyle;
//!
//! let mut surface = StackSurface::new();
//! let list = surface.add_container(Bounds::new(0.0, 0.0, 200.0, 400.0));
//! let a = surface.push_item(list, ComputedStyle::new()).unwrap();
//! let b = surface.push_item(list, ComputedStyle::new()).unwrap();
//!
//! let mut sortable = Sortable::new(surface, SortableConfig::default());
//! let hit = sortable.surface().hit_test(Point::new(20.0, 20.0), 0.0);
//! sortable.pointer_down(Point::new(20.0, 20.0), hit);
//! sortable.pointer_move(Point::new(20.0, 120.0));
//! let event = sortable.pointer_up(Point::new(20.0, 120.0)).unwrap();
//!
//! assert_eq!(event.new_index, 1);
//! assert_eq!(sortable.order(list).unwrap(), vec![b, a]);
//! ```

use std::fmt;

use reorder_core::geometry::Point;
use reorder_core::ids::{ContainerId, ItemId};
use reorder_core::input::{PointerEvent, PointerHit};
use reorder_core::{debug, trace};

use crate::config::SortableConfig;
use crate::controller::{DragController, ReorderEvent};
use crate::surface::SortSurface;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from the convenience API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortableError {
    /// The container does not exist on the surface.
    UnknownContainer(ContainerId),
    /// The surface did not accept the item.
    UnknownItem(ItemId),
    /// The call would change container order while a drag is in progress.
    SessionActive,
    /// The instance was destroyed.
    Destroyed,
}

impl fmt::Display for SortableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownContainer(c) => write!(f, "unknown container: {c}"),
            Self::UnknownItem(i) => write!(f, "item not accepted by surface: {i}"),
            Self::SessionActive => f.write_str("a drag session is in progress"),
            Self::Destroyed => f.write_str("sortable instance has been destroyed"),
        }
    }
}

impl std::error::Error for SortableError {}

// ---------------------------------------------------------------------------
// Sortable
// ---------------------------------------------------------------------------

/// A sortable instance over a host surface.
#[derive(Debug)]
pub struct Sortable<S: SortSurface> {
    surface: S,
    controller: DragController,
    destroyed: bool,
}

impl<S: SortSurface> Sortable<S> {
    /// Bind to `surface` and discover its containers.
    pub fn new(surface: S, config: SortableConfig) -> Self {
        let mut sortable = Self {
            surface,
            controller: DragController::new(config),
            destroyed: false,
        };
        sortable.setup();
        sortable
    }

    /// Re-discover containers and attach any missing handles.
    pub fn refresh(&mut self) -> Result<(), SortableError> {
        if self.destroyed {
            return Err(SortableError::Destroyed);
        }
        self.setup();
        Ok(())
    }

    /// Append `item` to `container` and prepare it for dragging.
    ///
    /// Returns the item's index in `container`.
    pub fn add_item(&mut self, item: ItemId, container: ContainerId) -> Result<usize, SortableError> {
        if self.destroyed {
            return Err(SortableError::Destroyed);
        }
        if self.controller.is_dragging() {
            return Err(SortableError::SessionActive);
        }
        if self.surface.container_bounds(container).is_none() {
            return Err(SortableError::UnknownContainer(container));
        }
        self.surface.insert_before(container, item, None);
        let index = self
            .surface
            .index_of(container, item)
            .ok_or(SortableError::UnknownItem(item))?;
        if self.controller.config().use_handle {
            let symbol = self.controller.config().handle_symbol.clone();
            self.surface.attach_handle(item, &symbol);
        }
        if !self.controller.containers().contains(&container) {
            self.setup();
        }
        debug!(%item, %container, index, "item added");
        Ok(index)
    }

    /// Current item order of `container`.
    pub fn order(&self, container: ContainerId) -> Result<Vec<ItemId>, SortableError> {
        if self.surface.container_bounds(container).is_none() {
            return Err(SortableError::UnknownContainer(container));
        }
        Ok(self.surface.siblings(container, None))
    }

    /// Order of every registered container that still exists, in
    /// registration order.
    #[must_use]
    pub fn orders(&self) -> Vec<(ContainerId, Vec<ItemId>)> {
        self.controller
            .containers()
            .iter()
            .filter_map(|&c| self.order(c).ok().map(|items| (c, items)))
            .collect()
    }

    /// Tear down: end any session, detach handles, and ignore all further
    /// input. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.controller.end_session(&mut self.surface);
        for container in self.controller.containers().to_vec() {
            for item in self.surface.siblings(container, None) {
                self.surface.detach_handle(item);
            }
        }
        self.controller.set_containers(Vec::new());
        self.destroyed = true;
        debug!("sortable destroyed");
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Register a listener for committed reorders.
    pub fn on_reorder(&mut self, listener: impl FnMut(&ReorderEvent) + 'static) {
        self.controller.on_reorder(listener);
    }

    /// Feed one pointer event. Returns the reorder it committed, if any.
    pub fn handle(&mut self, event: PointerEvent) -> Option<ReorderEvent> {
        if self.destroyed {
            trace!(?event, "input ignored: destroyed");
            return None;
        }
        match event {
            PointerEvent::Down { pos, hit } => {
                self.begin(pos, hit);
                None
            }
            PointerEvent::Move { pos } => {
                self.controller.update_pointer(&self.surface, pos);
                None
            }
            PointerEvent::Up { pos } => {
                if !self.controller.is_dragging() {
                    return None;
                }
                self.controller.update_pointer(&self.surface, pos);
                self.controller.commit(&mut self.surface)
            }
        }
    }

    pub fn pointer_down(&mut self, pos: Point, hit: Option<PointerHit>) -> Option<ReorderEvent> {
        self.handle(PointerEvent::Down { pos, hit })
    }

    pub fn pointer_move(&mut self, pos: Point) -> Option<ReorderEvent> {
        self.handle(PointerEvent::Move { pos })
    }

    pub fn pointer_up(&mut self, pos: Point) -> Option<ReorderEvent> {
        self.handle(PointerEvent::Up { pos })
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the host surface.
    ///
    /// Geometry and style changes are picked up on the next pointer move.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    /// Destroy the instance and hand the surface back.
    pub fn into_surface(mut self) -> S {
        self.destroy();
        self.surface
    }

    fn setup(&mut self) {
        let containers = self.surface.containers();
        if self.controller.config().use_handle {
            let symbol = self.controller.config().handle_symbol.clone();
            for &container in &containers {
                for item in self.surface.siblings(container, None) {
                    self.surface.attach_handle(item, &symbol);
                }
            }
        }
        debug!(containers = containers.len(), "containers discovered");
        self.controller.set_containers(containers);
    }

    fn begin(&mut self, pos: Point, hit: Option<PointerHit>) {
        if self.controller.is_dragging() {
            trace!("pointer-down ignored: drag in progress");
            return;
        }
        let Some(hit) = hit else {
            trace!("pointer-down ignored: no item under pointer");
            return;
        };
        let Some(container) = hit.container else {
            trace!(item = %hit.item, "pointer-down ignored: item has no container");
            return;
        };
        if !self.controller.containers().contains(&container) {
            trace!(%container, "pointer-down ignored: container not registered");
            return;
        }
        if self.controller.config().use_handle && !hit.on_handle {
            trace!(item = %hit.item, "pointer-down ignored: not on handle");
            return;
        }
        self.controller
            .begin_session(&mut self.surface, hit.item, container, pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::StackSurface;
    use reorder_core::geometry::Bounds;
    use reorder_style::ComputedStyle;

    fn sortable(n: usize, config: SortableConfig) -> (Sortable<StackSurface>, ContainerId, Vec<ItemId>) {
        let mut surface = StackSurface::new();
        let c = surface.add_container(Bounds::new(0.0, 0.0, 200.0, 400.0));
        let items = (0..n)
            .map(|_| surface.push_item(c, ComputedStyle::new()).unwrap())
            .collect();
        (Sortable::new(surface, config), c, items)
    }

    #[test]
    fn down_without_hit_is_ignored() {
        let (mut s, _, _) = sortable(2, SortableConfig::default());
        s.pointer_down(Point::new(500.0, 500.0), None);
        assert!(!s.controller().is_dragging());
    }

    #[test]
    fn down_on_unregistered_container_is_ignored() {
        let (mut s, _, items) = sortable(1, SortableConfig::default());
        let stray = PointerHit::new(items[0], ContainerId(99));
        s.pointer_down(Point::new(20.0, 20.0), Some(stray));
        assert!(!s.controller().is_dragging());
    }

    #[test]
    fn handle_mode_requires_handle_hit() {
        let (mut s, c, items) = sortable(2, SortableConfig::default().with_handle());
        assert_eq!(s.surface().handle(items[0]), Some("✥"));

        s.pointer_down(Point::new(20.0, 20.0), Some(PointerHit::new(items[0], c)));
        assert!(!s.controller().is_dragging());

        let on_handle = PointerHit::new(items[0], c).on_handle();
        s.pointer_down(Point::new(12.0, 20.0), Some(on_handle));
        assert!(s.controller().is_dragging());
        s.destroy();
    }

    #[test]
    fn up_without_session_is_ignored() {
        let (mut s, c, items) = sortable(2, SortableConfig::default());
        assert_eq!(s.pointer_up(Point::new(20.0, 20.0)), None);
        assert_eq!(s.order(c).unwrap(), items);
    }

    #[test]
    fn add_item_appends_and_attaches_handle() {
        let (mut s, c, items) = sortable(1, SortableConfig::default().with_handle());
        let fresh = s.surface_mut().create_item(ComputedStyle::new());
        assert_eq!(s.add_item(fresh, c), Ok(1));
        assert_eq!(s.order(c).unwrap(), vec![items[0], fresh]);
        assert_eq!(s.surface().handle(fresh), Some("✥"));
    }

    #[test]
    fn add_item_errors() {
        let (mut s, c, items) = sortable(2, SortableConfig::default());
        let fresh = s.surface_mut().create_item(ComputedStyle::new());
        assert_eq!(
            s.add_item(fresh, ContainerId(42)),
            Err(SortableError::UnknownContainer(ContainerId(42)))
        );

        s.pointer_down(Point::new(20.0, 20.0), Some(PointerHit::new(items[0], c)));
        assert_eq!(s.add_item(fresh, c), Err(SortableError::SessionActive));
        s.destroy();
        assert_eq!(s.add_item(fresh, c), Err(SortableError::Destroyed));
        assert_eq!(s.refresh(), Err(SortableError::Destroyed));
    }

    #[test]
    fn refresh_registers_new_containers() {
        let (mut s, c, _) = sortable(1, SortableConfig::default());
        let d = s
            .surface_mut()
            .add_container(Bounds::new(300.0, 0.0, 200.0, 400.0));
        assert_eq!(s.controller().containers(), &[c]);
        s.refresh().unwrap();
        assert_eq!(s.controller().containers(), &[c, d]);
        assert_eq!(s.orders().len(), 2);
    }

    #[test]
    fn destroy_ends_session_and_detaches_handles() {
        let (mut s, c, items) = sortable(2, SortableConfig::default().with_handle());
        let hit = PointerHit::new(items[0], c).on_handle();
        s.pointer_down(Point::new(12.0, 20.0), Some(hit));
        s.pointer_move(Point::new(12.0, 120.0));
        s.destroy();
        s.destroy();

        assert!(s.is_destroyed());
        assert!(!s.controller().is_dragging());
        assert!(s.controller().presenter().is_clear());
        assert!(!s.surface().is_dragging(items[0]));
        assert_eq!(s.surface().handle(items[0]), None);
        assert_eq!(s.pointer_up(Point::new(12.0, 120.0)), None);
        assert_eq!(s.order(c).unwrap(), items);
    }

    #[test]
    fn error_display() {
        assert_eq!(
            SortableError::UnknownContainer(ContainerId(3)).to_string(),
            "unknown container: container#3"
        );
        assert_eq!(
            SortableError::SessionActive.to_string(),
            "a drag session is in progress"
        );
    }
}
