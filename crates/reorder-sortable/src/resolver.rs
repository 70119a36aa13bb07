#![forbid(unsafe_code)]

//! Insertion-point resolution.
//!
//! Pure functions from a pointer position and sibling geometry to the slot a
//! drop would land in, plus the geometry of the insertion indicator for that
//! slot. Nothing here touches drag state.
//!
//! # Invariants
//!
//! 1. A pointer outside the container bounds (edges inclusive) resolves to
//!    [`Slot::Outside`], whatever the siblings.
//! 2. Inside the container, the result is `Before(i)` for the *first* sibling
//!    in display order whose vertical center is strictly below the pointer,
//!    else [`Slot::AtEnd`]. A pointer exactly on a center does not select that
//!    sibling.
//! 3. An empty sibling list inside the container is always [`Slot::AtEnd`].
//!
//! The dragged item must not appear among the siblings; filtering it out is
//! the caller's job.

use reorder_core::geometry::{Bounds, Point};
use reorder_core::ids::{ContainerId, ItemId};

/// Where a drop would land, relative to a sibling list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Pointer is outside the container.
    Outside,
    /// Before the sibling at this index.
    Before(usize),
    /// After the last sibling (or into an empty container).
    AtEnd,
}

/// Resolve the slot under `pointer`.
///
/// Single linear scan over `siblings` in display order.
#[must_use]
pub fn resolve_insertion(pointer: Point, container: Bounds, siblings: &[Bounds]) -> Slot {
    if !container.contains(pointer) {
        return Slot::Outside;
    }
    siblings
        .iter()
        .position(|b| pointer.y < b.center_y())
        .map_or(Slot::AtEnd, Slot::Before)
}

// ---------------------------------------------------------------------------
// InsertionTarget
// ---------------------------------------------------------------------------

/// The resolved drop target for the current pointer position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InsertionTarget {
    /// Pointer is outside every container.
    #[default]
    None,
    /// Insert before `item` in `container`.
    Before {
        container: ContainerId,
        item: ItemId,
    },
    /// Append to `container`.
    AtEnd { container: ContainerId },
}

impl InsertionTarget {
    /// Lift a [`Slot`] into a target using the sibling ids it was computed from.
    #[must_use]
    pub fn from_slot(slot: Slot, container: ContainerId, siblings: &[ItemId]) -> Self {
        match slot {
            Slot::Outside => Self::None,
            Slot::Before(i) => siblings
                .get(i)
                .map_or(Self::AtEnd { container }, |&item| Self::Before { container, item }),
            Slot::AtEnd => Self::AtEnd { container },
        }
    }

    /// Container the drop would land in.
    #[must_use]
    pub fn container(&self) -> Option<ContainerId> {
        match self {
            Self::None => None,
            Self::Before { container, .. } | Self::AtEnd { container } => Some(*container),
        }
    }

    /// Sibling the drop would land in front of.
    #[must_use]
    pub fn before(&self) -> Option<ItemId> {
        match self {
            Self::Before { item, .. } => Some(*item),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// ---------------------------------------------------------------------------
// Indicator geometry
// ---------------------------------------------------------------------------

/// Pixel offsets used to place the indicator relative to its anchor.
///
/// Purely cosmetic tuning; none of these affect which slot is chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorOffsets {
    /// Distance above the "before" sibling's top edge. Default: 15.
    pub above: f64,
    /// Distance below the last sibling's bottom edge. Default: 15.
    pub below: f64,
    /// Inset from an empty container's top-left corner and sides. Default: 20.
    pub empty_inset: f64,
}

impl Default for IndicatorOffsets {
    fn default() -> Self {
        Self {
            above: 15.0,
            below: 15.0,
            empty_inset: 20.0,
        }
    }
}

/// Where the indicator strip is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorLine {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

/// Indicator geometry for `slot`, or `None` when the slot is outside.
///
/// - `Before(i)`: above sibling `i`, spanning its width.
/// - `AtEnd` with siblings: below the last sibling, spanning its width.
/// - `AtEnd` in an empty container: inset from the container's top-left.
#[must_use]
pub fn indicator_line(
    slot: Slot,
    container: Bounds,
    siblings: &[Bounds],
    offsets: &IndicatorOffsets,
) -> Option<IndicatorLine> {
    match slot {
        Slot::Outside => None,
        Slot::Before(i) => siblings.get(i).map(|b| IndicatorLine {
            x: b.left,
            y: b.top - offsets.above,
            width: b.width,
        }),
        Slot::AtEnd => Some(match siblings.last() {
            Some(last) => IndicatorLine {
                x: last.left,
                y: last.bottom() + offsets.below,
                width: last.width,
            },
            None => IndicatorLine {
                x: container.left + offsets.empty_inset,
                y: container.top + offsets.empty_inset,
                width: (container.width - 2.0 * offsets.empty_inset).max(0.0),
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> Bounds {
        Bounds::new(0.0, 0.0, 200.0, 400.0)
    }

    /// Four 40px rows starting at y=10 with 10px gaps: centers 30, 80, 130, 180.
    fn rows() -> Vec<Bounds> {
        (0..4)
            .map(|i| Bounds::new(10.0, 10.0 + 50.0 * i as f64, 180.0, 40.0))
            .collect()
    }

    #[test]
    fn outside_container_is_outside() {
        let p = Point::new(250.0, 50.0);
        assert_eq!(resolve_insertion(p, container(), &rows()), Slot::Outside);
        assert_eq!(resolve_insertion(p, container(), &[]), Slot::Outside);
    }

    #[test]
    fn container_edges_are_inside() {
        let p = Point::new(200.0, 400.0);
        assert_eq!(resolve_insertion(p, container(), &rows()), Slot::AtEnd);
    }

    #[test]
    fn first_center_below_pointer_wins() {
        let r = rows();
        assert_eq!(resolve_insertion(Point::new(50.0, 0.0), container(), &r), Slot::Before(0));
        assert_eq!(resolve_insertion(Point::new(50.0, 29.0), container(), &r), Slot::Before(0));
        assert_eq!(resolve_insertion(Point::new(50.0, 31.0), container(), &r), Slot::Before(1));
        assert_eq!(resolve_insertion(Point::new(50.0, 150.0), container(), &r), Slot::Before(3));
    }

    #[test]
    fn pointer_on_center_goes_past_that_sibling() {
        let r = rows();
        assert_eq!(resolve_insertion(Point::new(50.0, 30.0), container(), &r), Slot::Before(1));
        assert_eq!(resolve_insertion(Point::new(50.0, 180.0), container(), &r), Slot::AtEnd);
    }

    #[test]
    fn below_every_center_is_at_end() {
        assert_eq!(
            resolve_insertion(Point::new(50.0, 390.0), container(), &rows()),
            Slot::AtEnd
        );
    }

    #[test]
    fn empty_siblings_is_at_end_anywhere_inside() {
        for y in [0.0, 1.0, 200.0, 400.0] {
            assert_eq!(
                resolve_insertion(Point::new(100.0, y), container(), &[]),
                Slot::AtEnd
            );
        }
    }

    #[test]
    fn scan_follows_display_order_not_geometry() {
        // Out-of-order boxes: the first match in the slice wins.
        let boxes = [
            Bounds::new(0.0, 200.0, 10.0, 40.0),
            Bounds::new(0.0, 0.0, 10.0, 40.0),
        ];
        assert_eq!(
            resolve_insertion(Point::new(5.0, 10.0), container(), &boxes),
            Slot::Before(0)
        );
    }

    #[test]
    fn target_from_slot() {
        let c = ContainerId(1);
        let ids = [ItemId(10), ItemId(11)];
        assert_eq!(InsertionTarget::from_slot(Slot::Outside, c, &ids), InsertionTarget::None);
        assert_eq!(
            InsertionTarget::from_slot(Slot::Before(1), c, &ids),
            InsertionTarget::Before {
                container: c,
                item: ItemId(11)
            }
        );
        assert_eq!(
            InsertionTarget::from_slot(Slot::AtEnd, c, &ids),
            InsertionTarget::AtEnd { container: c }
        );
        assert_eq!(InsertionTarget::from_slot(Slot::Before(0), c, &ids).before(), Some(ItemId(10)));
    }

    #[test]
    fn indicator_above_before_sibling() {
        let r = rows();
        let line = indicator_line(Slot::Before(1), container(), &r, &IndicatorOffsets::default());
        assert_eq!(
            line,
            Some(IndicatorLine {
                x: 10.0,
                y: 45.0,
                width: 180.0
            })
        );
    }

    #[test]
    fn indicator_below_last_sibling() {
        let r = rows();
        let line = indicator_line(Slot::AtEnd, container(), &r, &IndicatorOffsets::default());
        assert_eq!(
            line,
            Some(IndicatorLine {
                x: 10.0,
                y: 215.0,
                width: 180.0
            })
        );
    }

    #[test]
    fn indicator_inset_in_empty_container() {
        let line = indicator_line(Slot::AtEnd, container(), &[], &IndicatorOffsets::default());
        assert_eq!(
            line,
            Some(IndicatorLine {
                x: 20.0,
                y: 20.0,
                width: 160.0
            })
        );
    }

    #[test]
    fn no_indicator_outside() {
        assert_eq!(
            indicator_line(Slot::Outside, container(), &rows(), &IndicatorOffsets::default()),
            None
        );
    }
}
