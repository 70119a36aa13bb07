#![forbid(unsafe_code)]

//! In-memory surface that stacks items top to bottom inside each container.
//!
//! [`StackSurface`] is a complete [`SortSurface`]: it owns container bounds,
//! item order, per-item heights and styles, dragging markers and handles, and
//! derives item geometry from a simple vertical layout. Terminal hosts use it
//! directly; graphical hosts use it as a test double.

use std::collections::{HashMap, HashSet};

use reorder_core::geometry::{Bounds, Point};
use reorder_core::ids::{ContainerId, ItemId};
use reorder_core::input::PointerHit;
use reorder_style::ComputedStyle;

use crate::surface::SortSurface;

/// Vertical layout parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackLayout {
    /// Height of an item without an explicit height. Default: 40.
    pub item_height: f64,
    /// Space between consecutive items. Default: 10.
    pub gap: f64,
    /// Space between the container edge and its items. Default: 10.
    pub padding: f64,
}

impl Default for StackLayout {
    fn default() -> Self {
        Self {
            item_height: 40.0,
            gap: 10.0,
            padding: 10.0,
        }
    }
}

#[derive(Debug, Clone)]
struct ContainerEntry {
    id: ContainerId,
    bounds: Bounds,
    items: Vec<ItemId>,
}

/// Stacked in-memory surface.
#[derive(Debug, Clone, Default)]
pub struct StackSurface {
    layout: StackLayout,
    containers: Vec<ContainerEntry>,
    styles: HashMap<ItemId, ComputedStyle>,
    heights: HashMap<ItemId, f64>,
    dragging: HashSet<ItemId>,
    handles: HashMap<ItemId, String>,
    next_container: u64,
    next_item: u64,
}

impl StackSurface {
    /// Create an empty surface with the default layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty surface with a custom layout.
    #[must_use]
    pub fn with_layout(layout: StackLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn layout(&self) -> StackLayout {
        self.layout
    }

    /// Register a container occupying `bounds`.
    pub fn add_container(&mut self, bounds: Bounds) -> ContainerId {
        let id = ContainerId(self.next_container);
        self.next_container += 1;
        self.containers.push(ContainerEntry {
            id,
            bounds,
            items: Vec::new(),
        });
        id
    }

    /// Remove a container and forget its items.
    ///
    /// Returns the items that were in it.
    pub fn remove_container(&mut self, container: ContainerId) -> Vec<ItemId> {
        let Some(pos) = self.containers.iter().position(|c| c.id == container) else {
            return Vec::new();
        };
        let entry = self.containers.remove(pos);
        for item in &entry.items {
            self.forget(*item);
        }
        entry.items
    }

    /// Move or resize a container.
    pub fn set_container_bounds(&mut self, container: ContainerId, bounds: Bounds) {
        if let Some(entry) = self.entry_mut(container) {
            entry.bounds = bounds;
        }
    }

    /// Create a new item, appended to `container`.
    ///
    /// Returns `None` if the container does not exist.
    pub fn push_item(&mut self, container: ContainerId, style: ComputedStyle) -> Option<ItemId> {
        self.entry(container)?;
        let id = ItemId(self.next_item);
        self.next_item += 1;
        self.styles.insert(id, style);
        self.entry_mut(container)?.items.push(id);
        Some(id)
    }

    /// Create a new item that belongs to no container yet.
    pub fn create_item(&mut self, style: ComputedStyle) -> ItemId {
        let id = ItemId(self.next_item);
        self.next_item += 1;
        self.styles.insert(id, style);
        id
    }

    /// Remove an item from its container and forget it.
    pub fn remove_item(&mut self, item: ItemId) {
        self.detach(item);
        self.forget(item);
    }

    /// Give an item its own height instead of the layout default.
    pub fn set_item_height(&mut self, item: ItemId, height: f64) {
        self.heights.insert(item, height.max(0.0));
    }

    /// Replace an item's style.
    pub fn set_style(&mut self, item: ItemId, style: ComputedStyle) {
        self.styles.insert(item, style);
    }

    /// Container currently holding `item`.
    #[must_use]
    pub fn container_of(&self, item: ItemId) -> Option<ContainerId> {
        self.containers
            .iter()
            .find(|c| c.items.contains(&item))
            .map(|c| c.id)
    }

    /// Items of `container` in display order (empty if unknown).
    #[must_use]
    pub fn items(&self, container: ContainerId) -> &[ItemId] {
        match self.entry(container) {
            Some(entry) => &entry.items,
            None => &[],
        }
    }

    #[must_use]
    pub fn is_dragging(&self, item: ItemId) -> bool {
        self.dragging.contains(&item)
    }

    /// Handle glyph attached to `item`, if any.
    #[must_use]
    pub fn handle(&self, item: ItemId) -> Option<&str> {
        self.handles.get(&item).map(String::as_str)
    }

    /// Hit-test a pointer position against items.
    ///
    /// A hit within `handle_width` of an item's left edge counts as a handle
    /// hit when the item has a handle attached.
    #[must_use]
    pub fn hit_test(&self, pos: Point, handle_width: f64) -> Option<PointerHit> {
        self.containers.iter().find_map(|entry| {
            entry.items.iter().find_map(|&item| {
                let bounds = self.item_bounds(item)?;
                if !bounds.contains(pos) {
                    return None;
                }
                let on_handle =
                    self.handles.contains_key(&item) && pos.x < bounds.left + handle_width;
                Some(PointerHit {
                    item,
                    container: Some(entry.id),
                    on_handle,
                })
            })
        })
    }

    fn entry(&self, container: ContainerId) -> Option<&ContainerEntry> {
        self.containers.iter().find(|c| c.id == container)
    }

    fn entry_mut(&mut self, container: ContainerId) -> Option<&mut ContainerEntry> {
        self.containers.iter_mut().find(|c| c.id == container)
    }

    fn height_of(&self, item: ItemId) -> f64 {
        self.heights
            .get(&item)
            .copied()
            .unwrap_or(self.layout.item_height)
    }

    fn detach(&mut self, item: ItemId) {
        for entry in &mut self.containers {
            entry.items.retain(|&i| i != item);
        }
    }

    fn forget(&mut self, item: ItemId) {
        self.styles.remove(&item);
        self.heights.remove(&item);
        self.dragging.remove(&item);
        self.handles.remove(&item);
    }
}

impl SortSurface for StackSurface {
    fn containers(&self) -> Vec<ContainerId> {
        self.containers.iter().map(|c| c.id).collect()
    }

    fn container_bounds(&self, container: ContainerId) -> Option<Bounds> {
        self.entry(container).map(|c| c.bounds)
    }

    fn item_bounds(&self, item: ItemId) -> Option<Bounds> {
        let entry = self.containers.iter().find(|c| c.items.contains(&item))?;
        let StackLayout { gap, padding, .. } = self.layout;
        let mut top = entry.bounds.top + padding;
        for &candidate in &entry.items {
            let height = self.height_of(candidate);
            if candidate == item {
                return Some(Bounds::new(
                    entry.bounds.left + padding,
                    top,
                    (entry.bounds.width - 2.0 * padding).max(0.0),
                    height,
                ));
            }
            top += height + gap;
        }
        None
    }

    fn computed_style(&self, item: ItemId) -> ComputedStyle {
        self.styles.get(&item).cloned().unwrap_or_default()
    }

    fn siblings(&self, container: ContainerId, excluding: Option<ItemId>) -> Vec<ItemId> {
        self.items(container)
            .iter()
            .copied()
            .filter(|&item| Some(item) != excluding)
            .collect()
    }

    fn insert_before(&mut self, container: ContainerId, item: ItemId, before: Option<ItemId>) {
        if self.entry(container).is_none() {
            return;
        }
        self.detach(item);
        self.styles.entry(item).or_default();
        if let Some(entry) = self.entry_mut(container) {
            let at = before
                .and_then(|b| entry.items.iter().position(|&i| i == b))
                .unwrap_or(entry.items.len());
            entry.items.insert(at, item);
        }
    }

    fn set_dragging(&mut self, item: ItemId, dragging: bool) {
        if dragging {
            self.dragging.insert(item);
        } else {
            self.dragging.remove(&item);
        }
    }

    fn attach_handle(&mut self, item: ItemId, symbol: &str) {
        self.handles
            .entry(item)
            .or_insert_with(|| symbol.to_string());
    }

    fn detach_handle(&mut self, item: ItemId) {
        self.handles.remove(&item);
    }
}
