#![forbid(unsafe_code)]

//! The host boundary: what the engine asks of the rendering collaborator.
//!
//! A host (DOM bridge, terminal UI, test double) implements [`SortSurface`]
//! to answer geometry and style queries and to apply the single mutation the
//! engine needs. The engine never caches answers across pointer events.

use reorder_core::geometry::Bounds;
use reorder_core::ids::{ContainerId, ItemId};
use reorder_style::ComputedStyle;

/// Queries and mutations the engine needs from the host.
pub trait SortSurface {
    /// Containers the host knows about, in registration order.
    fn containers(&self) -> Vec<ContainerId>;

    /// Current bounding box of a container, or `None` if it no longer exists.
    fn container_bounds(&self, container: ContainerId) -> Option<Bounds>;

    /// Current bounding box of an item, or `None` if it no longer exists.
    fn item_bounds(&self, item: ItemId) -> Option<Bounds>;

    /// Computed style of an item. Unknown items report an empty style.
    fn computed_style(&self, item: ItemId) -> ComputedStyle;

    /// Direct members of `container` in display order, minus `excluding`.
    fn siblings(&self, container: ContainerId, excluding: Option<ItemId>) -> Vec<ItemId>;

    /// Move `item` into `container` just before `before`, or to the end when
    /// `before` is `None`. The item leaves whatever position it held.
    fn insert_before(&mut self, container: ContainerId, item: ItemId, before: Option<ItemId>);

    /// Set or clear the "being dragged" marker on an item.
    ///
    /// Hosts use it for styling; the engine only guarantees it is set for
    /// exactly the lifetime of a drag session.
    fn set_dragging(&mut self, _item: ItemId, _dragging: bool) {}

    /// Attach a drag handle showing `symbol` to an item, if it has none.
    fn attach_handle(&mut self, _item: ItemId, _symbol: &str) {}

    /// Remove an item's drag handle, if any.
    fn detach_handle(&mut self, _item: ItemId) {}

    /// Whether `item` is a direct member of `container`.
    fn contains(&self, container: ContainerId, item: ItemId) -> bool {
        self.siblings(container, None).contains(&item)
    }

    /// Index of `item` within `container`, if it is a member.
    fn index_of(&self, container: ContainerId, item: ItemId) -> Option<usize> {
        self.siblings(container, None)
            .iter()
            .position(|&candidate| candidate == item)
    }
}
