#![forbid(unsafe_code)]

//! Transient drag feedback: ghost, placeholder, and insertion indicator.
//!
//! [`FeedbackPresenter`] owns at most one of each artifact. Artifacts are
//! plain descriptions (position, size, colors, markers) that the host draws;
//! the presenter never renders anything itself.
//!
//! # Invariants
//!
//! 1. At most one ghost, one placeholder, and one indicator exist at a time.
//! 2. Showing a placeholder replaces the previous one in a single assignment;
//!    two placeholders are never observable together.
//! 3. Hiding keeps the artifact allocated for reuse; only [`clear_all`]
//!    destroys artifacts.
//! 4. [`clear_all`] is safe to call with nothing shown.
//!
//! [`clear_all`]: FeedbackPresenter::clear_all

use bitflags::bitflags;
use reorder_core::geometry::{Bounds, Point};
use reorder_core::ids::{ContainerId, ItemId};
use reorder_style::{Color, FeedbackPalette};

use crate::config::FeedbackConfig;
use crate::resolver::{IndicatorLine, InsertionTarget};

bitflags! {
    /// Markers carried by an item or by one of its visual snapshots.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SnapshotFlags: u8 {
        /// The item is the subject of the active drag.
        const DRAGGING        = 0b0001;
        /// Pointer-following snapshot.
        const GHOST           = 0b0010;
        /// Drop-slot preview snapshot.
        const PLACEHOLDER     = 0b0100;
        /// Never receives pointer events.
        const NON_INTERACTIVE = 0b1000;
    }
}

impl SnapshotFlags {
    /// Flags for a snapshot cloned from an item carrying `source`.
    ///
    /// The clone never inherits the dragging marker.
    #[must_use]
    pub fn snapshot_of(source: SnapshotFlags, kind: SnapshotFlags) -> SnapshotFlags {
        (source | kind | Self::NON_INTERACTIVE) - Self::DRAGGING
    }
}

// ---------------------------------------------------------------------------
// Artifacts
// ---------------------------------------------------------------------------

/// Pointer-following snapshot of the dragged item.
#[derive(Clone, Debug, PartialEq)]
pub struct Ghost {
    /// Item the snapshot was taken from.
    pub item: ItemId,
    /// Current box: the item's size at grab time, placed at pointer minus
    /// grab offset. May extend past any container.
    pub bounds: Bounds,
    pub background: Color,
    pub flags: SnapshotFlags,
}

/// Preview of the dragged item at the prospective drop slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Placeholder {
    /// Item the snapshot was taken from.
    pub item: ItemId,
    /// Container the preview sits in.
    pub container: ContainerId,
    /// Sibling the preview sits in front of (`None` = at the end).
    pub before: Option<ItemId>,
    /// Unscaled size of the dragged item.
    pub width: f64,
    pub height: f64,
    pub opacity: f32,
    pub scale: f32,
    pub fill: Color,
    /// Dashed border color.
    pub border: Color,
    pub border_width: f64,
    pub radius: f64,
    pub flags: SnapshotFlags,
    pub visible: bool,
}

/// Colored band marking the insertion boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct Indicator {
    pub line: IndicatorLine,
    pub thickness: f64,
    /// Gradient start (left).
    pub start: Color,
    /// Gradient end (right).
    pub end: Color,
    pub glow: Color,
    /// End-cap color.
    pub accent: Color,
    pub visible: bool,
}

impl Indicator {
    fn paint(&mut self, line: IndicatorLine, palette: &FeedbackPalette) {
        self.line = line;
        self.start = palette.indicator_start.clone();
        self.end = palette.indicator_end.clone();
        self.glow = palette.glow.clone();
        self.accent = palette.accent.clone();
        self.visible = true;
    }
}

// ---------------------------------------------------------------------------
// FeedbackPresenter
// ---------------------------------------------------------------------------

/// Owner of the drag feedback artifacts.
#[derive(Clone, Debug)]
pub struct FeedbackPresenter {
    config: FeedbackConfig,
    ghost_background: Color,
    ghost: Option<Ghost>,
    placeholder: Option<Placeholder>,
    indicator: Option<Indicator>,
}

impl FeedbackPresenter {
    /// Create a presenter with nothing shown.
    #[must_use]
    pub fn new(config: FeedbackConfig, ghost_background: Color) -> Self {
        Self {
            config,
            ghost_background,
            ghost: None,
            placeholder: None,
            indicator: None,
        }
    }

    /// Show the ghost for `item`, sized to `source` and placed at `position`.
    pub fn show_ghost(
        &mut self,
        item: ItemId,
        source: Bounds,
        position: Point,
        source_flags: SnapshotFlags,
    ) {
        self.ghost = Some(Ghost {
            item,
            bounds: source.moved_to(position),
            background: self.ghost_background.clone(),
            flags: SnapshotFlags::snapshot_of(source_flags, SnapshotFlags::GHOST),
        });
    }

    /// Move the ghost's top-left corner to `position`. No-op without a ghost.
    pub fn move_ghost(&mut self, position: Point) {
        if let Some(ghost) = &mut self.ghost {
            ghost.bounds = ghost.bounds.moved_to(position);
        }
    }

    /// Show the placeholder for `item` at the slot implied by `target`.
    ///
    /// A `None` target hides the current placeholder instead.
    pub fn show_placeholder(
        &mut self,
        item: ItemId,
        source: Bounds,
        target: &InsertionTarget,
        palette: &FeedbackPalette,
    ) {
        let Some(container) = target.container() else {
            self.hide_placeholder();
            return;
        };
        let cfg = &self.config;
        self.placeholder = Some(Placeholder {
            item,
            container,
            before: target.before(),
            width: source.width,
            height: source.height,
            opacity: cfg.placeholder_opacity,
            scale: cfg.placeholder_scale,
            fill: palette.placeholder_fill.clone(),
            border: palette.base.clone(),
            border_width: cfg.placeholder_border_width,
            radius: cfg.placeholder_radius,
            flags: SnapshotFlags::snapshot_of(SnapshotFlags::DRAGGING, SnapshotFlags::PLACEHOLDER),
            visible: true,
        });
    }

    /// Show the indicator along `line`, or hide it when `line` is `None`.
    ///
    /// An existing indicator is repainted in place.
    pub fn show_indicator(&mut self, line: Option<IndicatorLine>, palette: &FeedbackPalette) {
        let Some(line) = line else {
            self.hide_indicator();
            return;
        };
        match &mut self.indicator {
            Some(indicator) => indicator.paint(line, palette),
            None => {
                self.indicator = Some(Indicator {
                    line,
                    thickness: self.config.indicator_thickness,
                    start: palette.indicator_start.clone(),
                    end: palette.indicator_end.clone(),
                    glow: palette.glow.clone(),
                    accent: palette.accent.clone(),
                    visible: true,
                });
            }
        }
    }

    pub fn hide_placeholder(&mut self) {
        if let Some(placeholder) = &mut self.placeholder {
            placeholder.visible = false;
        }
    }

    pub fn hide_indicator(&mut self) {
        if let Some(indicator) = &mut self.indicator {
            indicator.visible = false;
        }
    }

    /// Destroy every artifact.
    pub fn clear_all(&mut self) {
        self.ghost = None;
        self.placeholder = None;
        self.indicator = None;
    }

    #[must_use]
    pub fn ghost(&self) -> Option<&Ghost> {
        self.ghost.as_ref()
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.placeholder.as_ref()
    }

    #[must_use]
    pub fn indicator(&self) -> Option<&Indicator> {
        self.indicator.as_ref()
    }

    /// Placeholder, only while visible.
    #[must_use]
    pub fn visible_placeholder(&self) -> Option<&Placeholder> {
        self.placeholder.as_ref().filter(|p| p.visible)
    }

    /// Indicator, only while visible.
    #[must_use]
    pub fn visible_indicator(&self) -> Option<&Indicator> {
        self.indicator.as_ref().filter(|i| i.visible)
    }

    /// Number of allocated artifacts, visible or not.
    #[must_use]
    pub fn artifact_count(&self) -> usize {
        usize::from(self.ghost.is_some())
            + usize::from(self.placeholder.is_some())
            + usize::from(self.indicator.is_some())
    }

    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.artifact_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reorder_style::PaletteAlphas;

    fn presenter() -> FeedbackPresenter {
        FeedbackPresenter::new(FeedbackConfig::default(), Color::hex(0xf0, 0xf0, 0xf0))
    }

    fn palette() -> FeedbackPalette {
        FeedbackPalette::new(Color::rgb(200, 40, 40), &PaletteAlphas::default())
    }

    fn before(item: u64) -> InsertionTarget {
        InsertionTarget::Before {
            container: ContainerId(0),
            item: ItemId(item),
        }
    }

    fn line(y: f64) -> IndicatorLine {
        IndicatorLine {
            x: 10.0,
            y,
            width: 100.0,
        }
    }

    #[test]
    fn snapshot_flags_strip_dragging() {
        let flags = SnapshotFlags::snapshot_of(SnapshotFlags::DRAGGING, SnapshotFlags::GHOST);
        assert!(!flags.contains(SnapshotFlags::DRAGGING));
        assert!(flags.contains(SnapshotFlags::GHOST | SnapshotFlags::NON_INTERACTIVE));
    }

    #[test]
    fn ghost_keeps_size_and_follows() {
        let mut p = presenter();
        let source = Bounds::new(10.0, 10.0, 180.0, 40.0);
        p.show_ghost(ItemId(1), source, source.origin(), SnapshotFlags::DRAGGING);
        p.move_ghost(Point::new(-50.0, 900.0));
        let ghost = p.ghost().unwrap();
        assert_eq!(ghost.bounds, Bounds::new(-50.0, 900.0, 180.0, 40.0));
        assert_eq!(ghost.background, Color::hex(0xf0, 0xf0, 0xf0));
        assert!(!ghost.flags.contains(SnapshotFlags::DRAGGING));
    }

    #[test]
    fn move_without_ghost_is_noop() {
        let mut p = presenter();
        p.move_ghost(Point::new(1.0, 1.0));
        assert!(p.is_clear());
    }

    #[test]
    fn placeholder_styled_from_palette() {
        let mut p = presenter();
        let source = Bounds::new(0.0, 0.0, 180.0, 40.0);
        p.show_placeholder(ItemId(1), source, &before(7), &palette());
        let ph = p.placeholder().unwrap();
        assert_eq!(ph.before, Some(ItemId(7)));
        assert_eq!(ph.opacity, 0.5);
        assert_eq!(ph.scale, 0.95);
        assert_eq!(ph.fill.to_string(), "rgba(200, 40, 40, 0.1)");
        assert_eq!(ph.border, Color::rgb(200, 40, 40));
        assert_eq!((ph.width, ph.height), (180.0, 40.0));
        assert!(ph.flags.contains(SnapshotFlags::PLACEHOLDER | SnapshotFlags::NON_INTERACTIVE));
        assert!(!ph.flags.contains(SnapshotFlags::DRAGGING));
    }

    #[test]
    fn placeholder_replaced_not_duplicated() {
        let mut p = presenter();
        let source = Bounds::new(0.0, 0.0, 10.0, 10.0);
        p.show_placeholder(ItemId(1), source, &before(7), &palette());
        p.show_placeholder(ItemId(1), source, &InsertionTarget::AtEnd { container: ContainerId(0) }, &palette());
        assert_eq!(p.artifact_count(), 1);
        assert_eq!(p.placeholder().unwrap().before, None);
    }

    #[test]
    fn none_target_hides_but_keeps_allocation() {
        let mut p = presenter();
        let source = Bounds::new(0.0, 0.0, 10.0, 10.0);
        p.show_placeholder(ItemId(1), source, &before(7), &palette());
        p.show_indicator(Some(line(5.0)), &palette());
        p.show_placeholder(ItemId(1), source, &InsertionTarget::None, &palette());
        p.show_indicator(None, &palette());
        assert_eq!(p.artifact_count(), 2);
        assert!(p.visible_placeholder().is_none());
        assert!(p.visible_indicator().is_none());
    }

    #[test]
    fn indicator_repainted_in_place() {
        let mut p = presenter();
        p.show_indicator(Some(line(5.0)), &palette());
        p.show_indicator(None, &palette());
        let blue = FeedbackPalette::new(Color::hex(0, 0, 200), &PaletteAlphas::default());
        p.show_indicator(Some(line(50.0)), &blue);
        let ind = p.visible_indicator().unwrap();
        assert_eq!(ind.line.y, 50.0);
        assert_eq!(ind.start.to_string(), "rgba(0, 0, 200, 0.6)");
        assert_eq!(ind.end.to_string(), "rgba(0, 0, 200, 0.3)");
        assert_eq!(ind.thickness, 3.0);
    }

    #[test]
    fn clear_all_is_idempotent() {
        let mut p = presenter();
        let source = Bounds::new(0.0, 0.0, 10.0, 10.0);
        p.show_ghost(ItemId(1), source, source.origin(), SnapshotFlags::empty());
        p.show_placeholder(ItemId(1), source, &before(2), &palette());
        p.show_indicator(Some(line(1.0)), &palette());
        assert_eq!(p.artifact_count(), 3);
        p.clear_all();
        assert!(p.is_clear());
        p.clear_all();
        assert!(p.is_clear());
    }
}
