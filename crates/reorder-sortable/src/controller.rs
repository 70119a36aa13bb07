#![forbid(unsafe_code)]

//! Drag state machine.
//!
//! [`DragController`] moves between [`DragPhase::Idle`] and
//! [`DragPhase::Dragging`]. While dragging it owns a [`DragSession`] and,
//! on every pointer move, resolves the insertion target, derives the feedback
//! color, and redraws the feedback through its [`FeedbackPresenter`].
//!
//! # Invariants
//!
//! 1. At most one session is open per thread, across all controllers on
//!    that thread. A begin while any session is open is ignored. The flag is
//!    thread-local: controllers on different threads do not block each other,
//!    so hosts that want one drag per process keep all controllers on the UI
//!    thread.
//! 2. The dragged item's "being dragged" marker is set exactly while its
//!    session is open.
//! 3. After [`end_session`](DragController::end_session) the presenter holds
//!    no artifacts, whatever path ended the session.
//! 4. Container order changes only inside [`commit`](DragController::commit).
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Begin on a non-member item | Stale hit test | Session not started |
//! | Begin while dragging | Overlapping pointer-down | Ignored |
//! | Pointer outside all containers | Drag left the list | Target `None`, feedback hidden |
//! | Target container vanished | Host removed it mid-drag | Target `None` |
//! | Drop with target `None` | Released outside | Order unchanged, no notification |
//! | `commit()` while idle | Caller bug | Panic |

use std::cell::Cell;
use std::fmt;

use reorder_core::geometry::{Bounds, Point};
use reorder_core::ids::{ContainerId, ItemId};
use reorder_core::{debug, debug_span, trace};
use reorder_style::FeedbackPalette;

use crate::config::SortableConfig;
use crate::feedback::{FeedbackPresenter, SnapshotFlags};
use crate::resolver::{InsertionTarget, indicator_line, resolve_insertion};
use crate::surface::SortSurface;

// ---------------------------------------------------------------------------
// Session guard
// ---------------------------------------------------------------------------

thread_local! {
    static SESSION_OPEN: Cell<bool> = const { Cell::new(false) };
}

/// Claim on the thread's single drag session; released on drop.
#[derive(Debug)]
struct SessionGuard(());

impl SessionGuard {
    fn acquire() -> Option<Self> {
        SESSION_OPEN.with(|open| {
            if open.get() {
                None
            } else {
                open.set(true);
                Some(Self(()))
            }
        })
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        SESSION_OPEN.with(|open| open.set(false));
    }
}

/// Whether any drag session is open on the current thread.
///
/// Sessions on other threads are not visible here.
#[must_use]
pub fn session_open() -> bool {
    SESSION_OPEN.with(Cell::get)
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Controller state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

/// Cursor the host should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Grabbing,
}

/// Live state of an in-progress drag.
#[derive(Debug)]
pub struct DragSession {
    /// Item being dragged.
    pub item: ItemId,
    /// Container the item was grabbed from.
    pub origin: ContainerId,
    /// Pointer minus the item's top-left corner at grab time.
    pub grab_offset: Point,
    /// Item box at grab time.
    pub item_bounds: Bounds,
    /// Latest pointer position.
    pub pointer: Point,
    /// Target resolved for `pointer`.
    pub target: InsertionTarget,
    _guard: SessionGuard,
}

/// Notification emitted after a successful commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReorderEvent {
    /// Container the item now lives in.
    pub container: ContainerId,
    pub item: ItemId,
    /// Index of the item within `container` after the move.
    pub new_index: usize,
}

type Listener = Box<dyn FnMut(&ReorderEvent)>;

// ---------------------------------------------------------------------------
// DragController
// ---------------------------------------------------------------------------

/// The drag-to-reorder state machine.
pub struct DragController {
    config: SortableConfig,
    containers: Vec<ContainerId>,
    session: Option<DragSession>,
    presenter: FeedbackPresenter,
    listeners: Vec<Listener>,
}

impl fmt::Debug for DragController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragController")
            .field("containers", &self.containers)
            .field("session", &self.session)
            .field("presenter", &self.presenter)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl DragController {
    /// Create an idle controller.
    #[must_use]
    pub fn new(config: SortableConfig) -> Self {
        let presenter =
            FeedbackPresenter::new(config.feedback.clone(), config.ghost_background_color.clone());
        Self {
            config,
            containers: Vec::new(),
            session: None,
            presenter,
            listeners: Vec::new(),
        }
    }

    /// Containers a drag may drop into besides its origin, in probe order.
    pub fn set_containers(&mut self, containers: Vec<ContainerId>) {
        self.containers = containers;
    }

    #[must_use]
    pub fn containers(&self) -> &[ContainerId] {
        &self.containers
    }

    /// Register a listener for [`ReorderEvent`]s. Listeners run in
    /// registration order.
    pub fn on_reorder(&mut self, listener: impl FnMut(&ReorderEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    #[must_use]
    pub fn config(&self) -> &SortableConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        if self.session.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Current target (`None` while idle).
    #[must_use]
    pub fn target(&self) -> InsertionTarget {
        self.session.as_ref().map_or(InsertionTarget::None, |s| s.target)
    }

    #[must_use]
    pub fn presenter(&self) -> &FeedbackPresenter {
        &self.presenter
    }

    #[must_use]
    pub fn cursor(&self) -> CursorHint {
        if self.is_dragging() {
            CursorHint::Grabbing
        } else {
            CursorHint::Default
        }
    }

    /// Whether the host should suppress text selection.
    #[must_use]
    pub fn selection_suppressed(&self) -> bool {
        self.is_dragging()
    }

    /// Start dragging `item` out of `container`, grabbed at `pointer`.
    ///
    /// Returns `false` without any state change when a session is already
    /// open or `item` is not a direct member of `container`.
    pub fn begin_session<S: SortSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        item: ItemId,
        container: ContainerId,
        pointer: Point,
    ) -> bool {
        if self.session.is_some() {
            trace!(%item, "begin ignored: session already open");
            return false;
        }
        if !surface.contains(container, item) {
            trace!(%item, %container, "begin ignored: not a direct member");
            return false;
        }
        let Some(item_bounds) = surface.item_bounds(item) else {
            trace!(%item, "begin ignored: item has no bounds");
            return false;
        };
        let Some(guard) = SessionGuard::acquire() else {
            trace!(%item, "begin ignored: another session is open on this thread");
            return false;
        };

        let grab_offset = item_bounds.offset_of(pointer);
        surface.set_dragging(item, true);
        self.presenter.show_ghost(
            item,
            item_bounds,
            item_bounds.origin(),
            SnapshotFlags::DRAGGING,
        );
        self.session = Some(DragSession {
            item,
            origin: container,
            grab_offset,
            item_bounds,
            pointer,
            target: InsertionTarget::None,
            _guard: guard,
        });
        debug!(%item, %container, x = pointer.x, y = pointer.y, "drag started");
        true
    }

    /// Feed a pointer move into the active session.
    ///
    /// Ignored while idle.
    pub fn update_pointer<S: SortSurface + ?Sized>(&mut self, surface: &S, pointer: Point) {
        let Some(session) = &mut self.session else {
            return;
        };

        let _span = debug_span!(
            "update_pointer",
            item = %session.item,
            x = pointer.x,
            y = pointer.y
        )
        .entered();

        session.pointer = pointer;
        self.presenter.move_ghost(pointer - session.grab_offset);

        let item = session.item;
        let origin = session.origin;
        let probe_order = std::iter::once(origin)
            .chain(self.containers.iter().copied().filter(move |&c| c != origin));

        let mut target = InsertionTarget::None;
        let mut line = None;
        for container in probe_order {
            let Some(bounds) = surface.container_bounds(container) else {
                continue;
            };
            if !bounds.contains(pointer) {
                continue;
            }
            let (ids, boxes): (Vec<ItemId>, Vec<Bounds>) = surface
                .siblings(container, Some(item))
                .into_iter()
                .filter_map(|id| surface.item_bounds(id).map(|b| (id, b)))
                .unzip();
            let slot = resolve_insertion(pointer, bounds, &boxes);
            target = InsertionTarget::from_slot(slot, container, &ids);
            line = indicator_line(slot, bounds, &boxes, &self.config.feedback.offsets);
            break;
        }
        session.target = target;

        if target.is_none() {
            self.presenter.hide_placeholder();
            self.presenter.hide_indicator();
            return;
        }

        let palette = FeedbackPalette::for_style(
            &surface.computed_style(item),
            &self.config.default_indicator_color,
            &self.config.feedback.alphas,
        );
        let source = session.item_bounds;
        self.presenter.show_placeholder(item, source, &target, &palette);
        self.presenter.show_indicator(line, &palette);
    }

    /// Drop the dragged item at the current target and end the session.
    ///
    /// Returns the emitted event, or `None` when the drop was outside every
    /// container (the order is left untouched).
    ///
    /// # Panics
    ///
    /// Panics if no session is open.
    pub fn commit<S: SortSurface + ?Sized>(&mut self, surface: &mut S) -> Option<ReorderEvent> {
        let Some(session) = &self.session else {
            panic!("DragController::commit called with no active drag session");
        };
        let item = session.item;
        let target = session.target;

        let event = match target.container() {
            Some(container) if surface.container_bounds(container).is_some() => {
                surface.insert_before(container, item, target.before());
                surface
                    .index_of(container, item)
                    .map(|new_index| ReorderEvent {
                        container,
                        item,
                        new_index,
                    })
            }
            _ => {
                debug!(%item, "drop outside containers: order unchanged");
                None
            }
        };

        if let Some(event) = &event {
            debug!(
                item = %event.item,
                container = %event.container,
                new_index = event.new_index,
                "drag committed"
            );
            for listener in &mut self.listeners {
                listener(event);
            }
        }

        self.end_session(surface);
        event
    }

    /// Tear down the session: clear feedback, clear the dragging marker,
    /// return to idle. No-op while idle.
    pub fn end_session<S: SortSurface + ?Sized>(&mut self, surface: &mut S) {
        self.presenter.clear_all();
        if let Some(session) = self.session.take() {
            surface.set_dragging(session.item, false);
            debug!(item = %session.item, "drag ended");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::StackSurface;
    use reorder_style::{Color, ComputedStyle};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Fixture {
        surface: StackSurface,
        container: ContainerId,
        items: Vec<ItemId>,
        ctl: DragController,
    }

    /// Container at (0,0) 200x400 with `n` rows: tops 10, 60, 110, ... centers 30, 80, 130, ...
    fn fixture(n: usize) -> Fixture {
        let mut surface = StackSurface::new();
        let container = surface.add_container(Bounds::new(0.0, 0.0, 200.0, 400.0));
        let items = (0..n)
            .map(|_| {
                surface
                    .push_item(container, ComputedStyle::new().border(Color::rgb(40, 90, 200)))
                    .unwrap()
            })
            .collect();
        let mut ctl = DragController::new(SortableConfig::default());
        ctl.set_containers(vec![container]);
        Fixture {
            surface,
            container,
            items,
            ctl,
        }
    }

    #[test]
    fn begin_sets_up_session_and_ghost() {
        let mut f = fixture(3);
        let grab = Point::new(30.0, 75.0);
        assert!(f.ctl.begin_session(&mut f.surface, f.items[1], f.container, grab));
        assert_eq!(f.ctl.phase(), DragPhase::Dragging);
        let session = f.ctl.session().unwrap();
        assert_eq!(session.grab_offset, Point::new(20.0, 15.0));
        assert!(f.surface.is_dragging(f.items[1]));
        let ghost = f.ctl.presenter().ghost().unwrap();
        assert_eq!(ghost.bounds, Bounds::new(10.0, 60.0, 180.0, 40.0));
        assert_eq!(f.ctl.cursor(), CursorHint::Grabbing);
        assert!(f.ctl.selection_suppressed());
        f.ctl.end_session(&mut f.surface);
    }

    #[test]
    fn begin_rejects_non_member() {
        let mut f = fixture(2);
        let other = f.surface.add_container(Bounds::new(300.0, 0.0, 100.0, 100.0));
        assert!(!f.ctl.begin_session(&mut f.surface, f.items[0], other, Point::default()));
        assert_eq!(f.ctl.phase(), DragPhase::Idle);
        assert!(f.ctl.presenter().is_clear());
        assert!(!f.surface.is_dragging(f.items[0]));
    }

    #[test]
    fn second_begin_is_ignored() {
        let mut f = fixture(2);
        assert!(f.ctl.begin_session(&mut f.surface, f.items[0], f.container, Point::new(20.0, 20.0)));
        assert!(!f.ctl.begin_session(&mut f.surface, f.items[1], f.container, Point::new(20.0, 70.0)));
        assert_eq!(f.ctl.session().unwrap().item, f.items[0]);
        assert!(!f.surface.is_dragging(f.items[1]));
        f.ctl.end_session(&mut f.surface);
    }

    #[test]
    fn only_one_session_per_thread() {
        let mut a = fixture(1);
        let mut b = fixture(1);
        assert!(a.ctl.begin_session(&mut a.surface, a.items[0], a.container, Point::new(20.0, 20.0)));
        assert!(session_open());
        assert!(!b.ctl.begin_session(&mut b.surface, b.items[0], b.container, Point::new(20.0, 20.0)));
        a.ctl.end_session(&mut a.surface);
        assert!(!session_open());
        assert!(b.ctl.begin_session(&mut b.surface, b.items[0], b.container, Point::new(20.0, 20.0)));
        b.ctl.end_session(&mut b.surface);
    }

    #[test]
    fn session_flag_is_scoped_to_its_thread() {
        let mut a = fixture(1);
        assert!(a.ctl.begin_session(&mut a.surface, a.items[0], a.container, Point::new(20.0, 20.0)));

        let other = std::thread::spawn(|| {
            let mut b = fixture(1);
            let seen_before = session_open();
            let began =
                b.ctl.begin_session(&mut b.surface, b.items[0], b.container, Point::new(20.0, 20.0));
            b.ctl.end_session(&mut b.surface);
            (seen_before, began)
        })
        .join()
        .unwrap();

        assert_eq!(other, (false, true));
        assert!(session_open());
        a.ctl.end_session(&mut a.surface);
    }

    #[test]
    fn update_moves_ghost_and_resolves() {
        let mut f = fixture(4);
        f.ctl.begin_session(&mut f.surface, f.items[0], f.container, Point::new(20.0, 20.0));
        // Siblings without item 0: rows at 60, 110, 160 (centers 80, 130, 180).
        f.ctl.update_pointer(&f.surface, Point::new(50.0, 100.0));
        assert_eq!(
            f.ctl.target(),
            InsertionTarget::Before {
                container: f.container,
                item: f.items[2]
            }
        );
        let ghost = f.ctl.presenter().ghost().unwrap();
        assert_eq!(ghost.bounds.origin(), Point::new(40.0, 90.0));
        let ind = f.ctl.presenter().visible_indicator().unwrap();
        assert_eq!(ind.line.y, 110.0 - 15.0);
        assert_eq!(ind.start.to_string(), "rgba(40, 90, 200, 0.6)");
        let ph = f.ctl.presenter().visible_placeholder().unwrap();
        assert_eq!(ph.before, Some(f.items[2]));
        f.ctl.end_session(&mut f.surface);
    }

    #[test]
    fn leaving_containers_hides_feedback_but_ghost_follows() {
        let mut f = fixture(2);
        f.ctl.begin_session(&mut f.surface, f.items[0], f.container, Point::new(20.0, 20.0));
        f.ctl.update_pointer(&f.surface, Point::new(50.0, 100.0));
        f.ctl.update_pointer(&f.surface, Point::new(900.0, 900.0));
        assert!(f.ctl.target().is_none());
        let p = f.ctl.presenter();
        assert!(p.visible_placeholder().is_none());
        assert!(p.visible_indicator().is_none());
        assert_eq!(p.artifact_count(), 3);
        assert_eq!(p.ghost().unwrap().bounds.origin(), Point::new(890.0, 890.0));
        f.ctl.end_session(&mut f.surface);
    }

    #[test]
    fn update_while_idle_is_ignored() {
        let mut f = fixture(2);
        f.ctl.update_pointer(&f.surface, Point::new(50.0, 50.0));
        assert_eq!(f.ctl.phase(), DragPhase::Idle);
        assert!(f.ctl.presenter().is_clear());
    }

    #[test]
    fn commit_reorders_and_notifies() {
        let mut f = fixture(4);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        f.ctl.on_reorder(move |e| sink.borrow_mut().push(*e));

        f.ctl.begin_session(&mut f.surface, f.items[0], f.container, Point::new(20.0, 20.0));
        f.ctl.update_pointer(&f.surface, Point::new(50.0, 100.0));
        let event = f.ctl.commit(&mut f.surface).unwrap();

        let i = &f.items;
        assert_eq!(f.surface.items(f.container), &[i[1], i[0], i[2], i[3]]);
        assert_eq!(
            event,
            ReorderEvent {
                container: f.container,
                item: i[0],
                new_index: 1
            }
        );
        assert_eq!(*seen.borrow(), vec![event]);
        assert_eq!(f.ctl.phase(), DragPhase::Idle);
        assert!(f.ctl.presenter().is_clear());
        assert!(!f.surface.is_dragging(i[0]));
    }

    #[test]
    fn commit_outside_leaves_order() {
        let mut f = fixture(3);
        let before = f.surface.items(f.container).to_vec();
        f.ctl.begin_session(&mut f.surface, f.items[1], f.container, Point::new(20.0, 70.0));
        f.ctl.update_pointer(&f.surface, Point::new(-100.0, 70.0));
        assert_eq!(f.ctl.commit(&mut f.surface), None);
        assert_eq!(f.surface.items(f.container), before.as_slice());
        assert!(f.ctl.presenter().is_clear());
    }

    #[test]
    fn commit_without_move_is_outside() {
        let mut f = fixture(2);
        f.ctl.begin_session(&mut f.surface, f.items[0], f.container, Point::new(20.0, 20.0));
        assert_eq!(f.ctl.commit(&mut f.surface), None);
        assert_eq!(f.surface.items(f.container), &[f.items[0], f.items[1]]);
    }

    #[test]
    fn vanished_container_cancels() {
        let mut f = fixture(2);
        f.ctl.begin_session(&mut f.surface, f.items[0], f.container, Point::new(20.0, 20.0));
        f.ctl.update_pointer(&f.surface, Point::new(50.0, 100.0));
        f.surface.remove_container(f.container);
        assert_eq!(f.ctl.commit(&mut f.surface), None);
        assert!(f.ctl.presenter().is_clear());
        assert!(!session_open());
    }

    #[test]
    fn drop_into_second_container() {
        let mut f = fixture(2);
        let other = f.surface.add_container(Bounds::new(300.0, 0.0, 200.0, 400.0));
        let resident = f.surface.push_item(other, ComputedStyle::new()).unwrap();
        f.ctl.set_containers(vec![f.container, other]);

        f.ctl.begin_session(&mut f.surface, f.items[0], f.container, Point::new(20.0, 20.0));
        f.ctl.update_pointer(&f.surface, Point::new(350.0, 5.0));
        assert_eq!(
            f.ctl.target(),
            InsertionTarget::Before {
                container: other,
                item: resident
            }
        );
        let event = f.ctl.commit(&mut f.surface).unwrap();
        assert_eq!(event.container, other);
        assert_eq!(event.new_index, 0);
        assert_eq!(f.surface.items(other), &[f.items[0], resident]);
        assert_eq!(f.surface.items(f.container), &[f.items[1]]);
    }

    #[test]
    fn end_session_is_idempotent() {
        let mut f = fixture(1);
        f.ctl.end_session(&mut f.surface);
        f.ctl.begin_session(&mut f.surface, f.items[0], f.container, Point::new(20.0, 20.0));
        f.ctl.end_session(&mut f.surface);
        f.ctl.end_session(&mut f.surface);
        assert_eq!(f.ctl.phase(), DragPhase::Idle);
        assert!(f.ctl.presenter().is_clear());
    }

    #[test]
    #[should_panic(expected = "no active drag session")]
    fn commit_while_idle_panics() {
        let mut f = fixture(1);
        let _ = f.ctl.commit(&mut f.surface);
    }
}
