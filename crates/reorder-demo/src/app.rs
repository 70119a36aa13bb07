#![forbid(unsafe_code)]

//! Demo state: a sortable over a [`StackSurface`] laid out in terminal cells.

use std::collections::{HashMap, VecDeque};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use reorder::prelude::*;
use reorder::{FeedbackConfig, IndicatorOffsets, StackLayout};
use tracing::{debug, warn};

use crate::cli::Opts;

/// Rows reserved above the lists (title).
pub const HEADER_ROWS: u16 = 1;
/// Rows reserved below the lists (status).
pub const FOOTER_ROWS: u16 = 4;
/// Columns at an item's left edge that count as its handle.
pub const HANDLE_WIDTH: f64 = 3.0;

const RECENT_EVENTS: usize = 3;

const LABELS: &[&str] = &[
    "Write release notes",
    "Fix flaky test",
    "Review pull request",
    "Update dependencies",
    "Profile hot path",
    "Triage issues",
    "Draft design doc",
    "Pair on parser",
    "Rotate credentials",
    "Plan next sprint",
    "書類を整理する",
    "Benchmark resolver",
];

/// Item colors, cycled. Includes a too-light and a black border so the
/// fallback indicator color shows up.
const SWATCHES: &[&str] = &[
    "#e06c75",
    "rgb(97, 175, 239)",
    "#98c379",
    "#ffffff",
    "rgb(198, 120, 221)",
    "#000000",
    "#d19a66",
    "rgba(86, 182, 194, 0.9)",
];

/// Demo application state.
#[derive(Debug)]
pub struct App {
    sortable: Sortable<StackSurface>,
    lists: Vec<ContainerId>,
    labels: HashMap<ItemId, String>,
    recent: VecDeque<String>,
    created: usize,
    quit: bool,
}

impl App {
    /// Build the demo lists for a terminal of `cols` x `rows`.
    pub fn new(opts: &Opts, cols: u16, rows: u16) -> Self {
        let layout = StackLayout {
            item_height: 3.0,
            gap: 1.0,
            padding: 1.0,
        };
        let mut surface = StackSurface::with_layout(layout);
        let mut app_labels = HashMap::new();
        let mut created = 0;

        let lists: Vec<ContainerId> = list_bounds(opts.lists, cols, rows)
            .into_iter()
            .map(|bounds| surface.add_container(bounds))
            .collect();
        for &list in &lists {
            for _ in 0..opts.items {
                if let Some(item) = surface.push_item(list, style_for(created)) {
                    app_labels.insert(item, label_for(created));
                    created += 1;
                }
            }
        }

        let feedback = FeedbackConfig::default()
            .with_offsets(IndicatorOffsets {
                above: 1.0,
                below: 0.0,
                empty_inset: 1.0,
            })
            .with_indicator_thickness(1.0);
        let mut config = SortableConfig::default()
            .with_handle_symbol(opts.symbol.clone())
            .with_feedback(feedback);
        if opts.handle {
            config = config.with_handle();
        }

        let mut sortable = Sortable::new(surface, config);
        let recent = VecDeque::with_capacity(RECENT_EVENTS);
        sortable.on_reorder(|event| debug!(?event, "reorder"));

        Self {
            sortable,
            lists,
            labels: app_labels,
            recent,
            created,
            quit: false,
        }
    }

    #[must_use]
    pub fn sortable(&self) -> &Sortable<StackSurface> {
        &self.sortable
    }

    #[must_use]
    pub fn lists(&self) -> &[ContainerId] {
        &self.lists
    }

    /// Display label of an item.
    #[must_use]
    pub fn label(&self, item: ItemId) -> &str {
        self.labels.get(&item).map_or("?", String::as_str)
    }

    /// Most recent reorder descriptions, newest first.
    pub fn recent(&self) -> impl Iterator<Item = &str> {
        self.recent.iter().map(String::as_str)
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Re-layout the lists after a terminal resize.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let bounds = list_bounds(self.lists.len(), cols, rows);
        for (&list, b) in self.lists.iter().zip(bounds) {
            self.sortable.surface_mut().set_container_bounds(list, b);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Char('a') => self.append_item(),
            KeyCode::Char('r') => {
                if let Err(err) = self.sortable.refresh() {
                    warn!(%err, "refresh failed");
                }
            }
            KeyCode::Esc => {
                // Releasing outside every list is the engine's cancel path.
                self.sortable.pointer_up(Point::new(-1.0, -1.0));
            }
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        let pos = cell_center(mouse.column, mouse.row);
        let committed = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self.sortable.surface().hit_test(pos, HANDLE_WIDTH);
                self.sortable.pointer_down(pos, hit)
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                self.sortable.pointer_move(pos)
            }
            MouseEventKind::Up(MouseButton::Left) => self.sortable.pointer_up(pos),
            _ => None,
        };
        if let Some(event) = committed {
            self.record(&event);
        }
    }

    fn append_item(&mut self) {
        let Some(&first) = self.lists.first() else {
            return;
        };
        let item = self
            .sortable
            .surface_mut()
            .create_item(style_for(self.created));
        match self.sortable.add_item(item, first) {
            Ok(index) => {
                self.labels.insert(item, label_for(self.created));
                self.created += 1;
                debug!(%item, index, "appended");
            }
            Err(err) => {
                self.sortable.surface_mut().remove_item(item);
                warn!(%err, "append rejected");
            }
        }
    }

    fn record(&mut self, event: &ReorderEvent) {
        let list = self
            .lists
            .iter()
            .position(|&l| l == event.container)
            .map_or(0, |i| i + 1);
        let text = format!(
            "Moved \"{}\" to list {list}, position {}",
            self.label(event.item),
            event.new_index + 1
        );
        if self.recent.len() == RECENT_EVENTS {
            self.recent.pop_back();
        }
        self.recent.push_front(text);
    }
}

/// Point at the middle of a terminal cell.
#[must_use]
pub fn cell_center(column: u16, row: u16) -> Point {
    Point::new(f64::from(column) + 0.5, f64::from(row) + 0.5)
}

/// Split the area between header and footer into `n` side-by-side lists.
#[must_use]
pub fn list_bounds(n: usize, cols: u16, rows: u16) -> Vec<Bounds> {
    if n == 0 {
        return Vec::new();
    }
    let margin = 1.0;
    let top = f64::from(HEADER_ROWS) + margin;
    let height = (f64::from(rows) - f64::from(HEADER_ROWS + FOOTER_ROWS) - 2.0 * margin).max(3.0);
    let usable = f64::from(cols) - margin * (n as f64 + 1.0);
    let width = (usable / n as f64).floor().max(8.0);
    (0..n)
        .map(|i| Bounds::new(margin + i as f64 * (width + margin), top, width, height))
        .collect()
}

fn style_for(n: usize) -> ComputedStyle {
    let swatch = SWATCHES[n % SWATCHES.len()];
    ComputedStyle::new()
        .border(Color::parse_lossy(swatch))
        .background(Color::Transparent)
}

fn label_for(n: usize) -> String {
    let base = LABELS[n % LABELS.len()];
    match n / LABELS.len() {
        0 => base.to_string(),
        round => format!("{base} ({})", round + 1),
    }
}
