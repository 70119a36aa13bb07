#![forbid(unsafe_code)]

//! Cell canvas and drawing for the demo.
//!
//! Terminals have no alpha channel, so translucent feedback colors are
//! composited over whatever the canvas already holds with [`Rgb::over`].

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color as TermColor, Print, SetBackgroundColor, SetForegroundColor};
use reorder::prelude::*;
use reorder::{InsertionTarget, Rgb, SortSurface};
use unicode_width::UnicodeWidthChar;

use crate::app::{App, FOOTER_ROWS};

const CANVAS_BG: Rgb = Rgb::new(24, 26, 31);
const FRAME_FG: Rgb = Rgb::new(92, 99, 112);
const TEXT_FG: Rgb = Rgb::new(220, 223, 228);
const DIM_FG: Rgb = Rgb::new(130, 137, 150);
const GHOST_TEXT: Rgb = Rgb::new(30, 30, 30);

/// One terminal cell. A `None` glyph marks the trailing half of a wide char.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub glyph: Option<char>,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: Some(' '),
            fg: TEXT_FG,
            bg: CANVAS_BG,
        }
    }
}

/// Fixed-size grid of cells.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(i32::from(x), i32::from(y)).map(|i| &self.cells[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some(y as usize * usize::from(self.width) + x as usize)
    }

    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Fill a box with an opaque background.
    pub fn fill(&mut self, area: Bounds, bg: Rgb) {
        self.for_each_in(area, |cell| {
            cell.glyph = Some(' ');
            cell.bg = bg;
        });
    }

    /// Composite `color` at `alpha` over the backgrounds inside `area`.
    pub fn tint(&mut self, area: Bounds, color: Rgb, alpha: f32) {
        self.for_each_in(area, |cell| cell.bg = color.over(cell.bg, alpha));
    }

    /// Put one glyph, keeping the background.
    pub fn put(&mut self, x: i32, y: i32, glyph: char, fg: Rgb) {
        if let Some(cell) = self.cell_mut(x, y) {
            cell.glyph = Some(glyph);
            cell.fg = fg;
        }
    }

    /// Write text starting at `(x, y)`, clipped to `max_width` columns.
    pub fn text(&mut self, x: i32, y: i32, text: &str, fg: Rgb, max_width: usize) {
        let mut col = 0usize;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if w == 0 {
                continue;
            }
            if col + w > max_width {
                break;
            }
            self.put(x + col as i32, y, ch, fg);
            if w == 2
                && let Some(trailing) = self.cell_mut(x + col as i32 + 1, y)
            {
                trailing.glyph = None;
            }
            col += w;
        }
    }

    fn for_each_in(&mut self, area: Bounds, mut f: impl FnMut(&mut Cell)) {
        let (x0, y0, x1, y1) = cell_span(area);
        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(cell) = self.cell_mut(x, y) {
                    f(cell);
                }
            }
        }
    }

    /// Queue the whole canvas to `out`.
    pub fn flush(&self, out: &mut impl Write) -> io::Result<()> {
        let mut colors: Option<(Rgb, Rgb)> = None;
        for y in 0..self.height {
            queue!(out, MoveTo(0, y))?;
            for x in 0..self.width {
                let Some(cell) = self.get(x, y) else {
                    continue;
                };
                let Some(glyph) = cell.glyph else {
                    continue;
                };
                if colors != Some((cell.fg, cell.bg)) {
                    queue!(
                        out,
                        SetForegroundColor(term(cell.fg)),
                        SetBackgroundColor(term(cell.bg))
                    )?;
                    colors = Some((cell.fg, cell.bg));
                }
                queue!(out, Print(glyph))?;
            }
        }
        out.flush()
    }
}

fn term(c: Rgb) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Cell range covered by a box: `(x0, y0, x1, y1)`, end-exclusive.
fn cell_span(area: Bounds) -> (i32, i32, i32, i32) {
    (
        area.left.floor() as i32,
        area.top.floor() as i32,
        area.right().ceil() as i32,
        area.bottom().ceil() as i32,
    )
}

/// Opaque channels of a color, composited over `backdrop` when translucent.
fn solid(color: &Color, backdrop: Rgb) -> Rgb {
    let rgb = color.channels().unwrap_or(reorder::style::NEUTRAL_GRAY);
    rgb.over(backdrop, color.alpha().unwrap_or(1.0))
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Draw the full demo frame.
#[must_use]
pub fn draw(app: &App, width: u16, height: u16) -> Canvas {
    let mut canvas = Canvas::new(width, height);
    let sortable = app.sortable();
    let surface = sortable.surface();
    let controller = sortable.controller();
    let symbol = controller.config().handle_symbol.as_str();

    canvas.text(
        1,
        0,
        "reorder demo · drag with the mouse · a: add · Esc: cancel · q: quit",
        DIM_FG,
        usize::from(width.saturating_sub(2)),
    );

    for (n, &list) in app.lists().iter().enumerate() {
        let Some(bounds) = surface.container_bounds(list) else {
            continue;
        };
        frame(&mut canvas, bounds, FRAME_FG);
        canvas.text(
            bounds.left as i32 + 2,
            bounds.top as i32,
            &format!(" List {} ", n + 1),
            TEXT_FG,
            bounds.width as usize,
        );

        for item in surface.siblings(list, None) {
            let Some(b) = surface.item_bounds(item) else {
                continue;
            };
            let accent = surface
                .computed_style(item)
                .border_color
                .as_ref()
                .map_or(FRAME_FG, |c| solid(c, CANVAS_BG));
            let dragging = surface.is_dragging(item);
            let bg = if dragging {
                accent.over(CANVAS_BG, 0.15)
            } else {
                accent.over(CANVAS_BG, 0.35)
            };
            let fg = if dragging { DIM_FG } else { TEXT_FG };
            canvas.fill(b, bg);
            let mid = (b.top + b.height / 2.0).floor() as i32;
            let mut x = b.left as i32 + 1;
            if let Some(handle) = surface.handle(item) {
                canvas.text(x, mid, handle, accent, 2);
                x += 2;
            }
            let room = (b.right() as i32 - x - 1).max(0) as usize;
            canvas.text(x, mid, app.label(item), fg, room);
        }
    }

    let presenter = controller.presenter();
    if let Some(placeholder) = presenter.visible_placeholder()
        && let Some(indicator) = presenter.visible_indicator()
    {
        let fill = solid(&placeholder.fill, CANVAS_BG);
        let w = placeholder.width * f64::from(placeholder.scale);
        let h = (placeholder.height * f64::from(placeholder.scale)).round();
        let line = indicator.line;
        let area = Bounds::new(line.x + (line.width - w) / 2.0, line.y - h / 2.0, w, h);
        canvas.tint(area, fill, placeholder.opacity);
        let border = solid(&placeholder.border, CANVAS_BG);
        dashed_frame(&mut canvas, area, border);
    }
    if let Some(indicator) = presenter.visible_indicator() {
        draw_indicator(&mut canvas, indicator);
    }
    if let Some(ghost) = presenter.ghost() {
        let bg = solid(&ghost.background, CANVAS_BG);
        canvas.fill(ghost.bounds, bg);
        let mid = (ghost.bounds.top + ghost.bounds.height / 2.0).floor() as i32;
        let room = (ghost.bounds.width as usize).saturating_sub(2);
        let label = if controller.config().use_handle {
            format!("{symbol} {}", app.label(ghost.item))
        } else {
            app.label(ghost.item).to_string()
        };
        canvas.text(ghost.bounds.left as i32 + 1, mid, &label, GHOST_TEXT, room);
    }

    let status_top = i32::from(height.saturating_sub(FOOTER_ROWS));
    let target = match controller.target() {
        InsertionTarget::None if controller.is_dragging() => "outside: release to cancel".to_string(),
        InsertionTarget::None => "idle".to_string(),
        InsertionTarget::Before { item, .. } => format!("before \"{}\"", app.label(item)),
        InsertionTarget::AtEnd { container } => format!("at end of {container}"),
    };
    let full = usize::from(width.saturating_sub(2));
    canvas.text(1, status_top, &format!("target: {target}"), TEXT_FG, full);
    for (i, line) in app.recent().enumerate() {
        canvas.text(1, status_top + 1 + i as i32, line, DIM_FG, full);
    }
    canvas
}

fn frame(canvas: &mut Canvas, area: Bounds, fg: Rgb) {
    let (x0, y0, x1, y1) = cell_span(area);
    let (x1, y1) = (x1 - 1, y1 - 1);
    for x in x0 + 1..x1 {
        canvas.put(x, y0, '─', fg);
        canvas.put(x, y1, '─', fg);
    }
    for y in y0 + 1..y1 {
        canvas.put(x0, y, '│', fg);
        canvas.put(x1, y, '│', fg);
    }
    canvas.put(x0, y0, '╭', fg);
    canvas.put(x1, y0, '╮', fg);
    canvas.put(x0, y1, '╰', fg);
    canvas.put(x1, y1, '╯', fg);
}

fn dashed_frame(canvas: &mut Canvas, area: Bounds, fg: Rgb) {
    let (x0, y0, x1, y1) = cell_span(area);
    let (x1, y1) = (x1 - 1, y1 - 1);
    for x in x0..=x1 {
        canvas.put(x, y0, '┄', fg);
        canvas.put(x, y1, '┄', fg);
    }
    for y in y0 + 1..y1 {
        canvas.put(x0, y, '┆', fg);
        canvas.put(x1, y, '┆', fg);
    }
}

fn draw_indicator(canvas: &mut Canvas, indicator: &reorder::sortable::Indicator) {
    let line = indicator.line;
    let y = line.y.floor() as i32;
    let x0 = line.x.floor() as i32;
    let x1 = (line.x + line.width).ceil() as i32 - 1;
    let span = (x1 - x0).max(1) as f32;
    let start = indicator.start.channels().unwrap_or(reorder::style::NEUTRAL_GRAY);
    let end = indicator.end.channels().unwrap_or(reorder::style::NEUTRAL_GRAY);
    let (a0, a1) = (
        indicator.start.alpha().unwrap_or(1.0),
        indicator.end.alpha().unwrap_or(1.0),
    );
    let glow = solid(&indicator.glow, CANVAS_BG);

    for x in x0..=x1 {
        let t = (x - x0) as f32 / span;
        let rgb = end.over(start, t);
        let alpha = a0 + (a1 - a0) * t;
        if let Some(cell) = canvas.cell_mut(x, y) {
            cell.bg = glow.over(cell.bg, 0.5);
            cell.glyph = Some('━');
            cell.fg = rgb.over(TEXT_FG, alpha.max(0.6));
        }
    }
    let accent = solid(&indicator.accent, CANVAS_BG);
    canvas.put(x0, y, '●', accent);
    canvas.put(x1, y, '●', accent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Opts;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    #[test]
    fn text_clips_and_marks_wide_chars() {
        let mut canvas = Canvas::new(10, 1);
        canvas.text(0, 0, "書類abc", TEXT_FG, 5);
        assert_eq!(canvas.get(0, 0).unwrap().glyph, Some('書'));
        assert_eq!(canvas.get(1, 0).unwrap().glyph, None);
        assert_eq!(canvas.get(2, 0).unwrap().glyph, Some('類'));
        assert_eq!(canvas.get(4, 0).unwrap().glyph, Some('a'));
        assert_eq!(canvas.get(5, 0).unwrap().glyph, Some(' '));
    }

    #[test]
    fn tint_blends_over_background() {
        let mut canvas = Canvas::new(2, 1);
        canvas.fill(Bounds::new(0.0, 0.0, 2.0, 1.0), Rgb::new(0, 0, 0));
        canvas.tint(Bounds::new(0.0, 0.0, 1.0, 1.0), Rgb::new(200, 100, 0), 0.5);
        assert_eq!(canvas.get(0, 0).unwrap().bg, Rgb::new(100, 50, 0));
        assert_eq!(canvas.get(1, 0).unwrap().bg, Rgb::new(0, 0, 0));
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut canvas = Canvas::new(2, 2);
        canvas.put(-1, 0, 'x', TEXT_FG);
        canvas.put(5, 5, 'x', TEXT_FG);
        canvas.fill(Bounds::new(-3.0, -3.0, 2.0, 2.0), Rgb::new(1, 2, 3));
        assert!(canvas.cells.iter().all(|c| *c == Cell::default()));
    }

    #[test]
    fn flush_emits_every_visible_glyph() {
        let mut canvas = Canvas::new(3, 1);
        canvas.text(0, 0, "ab", TEXT_FG, 3);
        let mut out = Vec::new();
        canvas.flush(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('a'));
        assert!(text.contains('b'));
    }

    #[test]
    fn drag_frame_shows_ghost_and_indicator() {
        let opts = Opts {
            lists: 1,
            items: 3,
            ..Opts::default()
        };
        let mut app = App::new(&opts, 60, 30);
        let at = |kind, column, row| MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        app.on_mouse(at(MouseEventKind::Down(MouseButton::Left), 5, 4));
        app.on_mouse(at(MouseEventKind::Drag(MouseButton::Left), 50, 9));

        let canvas = draw(&app, 60, 30);
        // Candidates are the 2nd and 3rd items (tops 7 and 11); row 9 sits
        // past the 2nd item's center, so the indicator is above the 3rd.
        assert_eq!(canvas.get(10, 10).unwrap().glyph, Some('━'));
        assert_eq!(canvas.get(2, 10).unwrap().glyph, Some('●'));
        // Ghost keeps the grab offset: its label starts one cell in.
        assert_eq!(canvas.get(48, 9).unwrap().glyph, Some('W'));
    }

    fn row_text(canvas: &Canvas, y: u16) -> String {
        (0..canvas.width)
            .filter_map(|x| canvas.get(x, y).and_then(|c| c.glyph))
            .collect()
    }

    #[test]
    fn status_line_names_the_target() {
        let opts = Opts {
            lists: 1,
            items: 3,
            ..Opts::default()
        };
        let mut app = App::new(&opts, 60, 30);
        let status = 30 - FOOTER_ROWS;
        assert!(row_text(&draw(&app, 60, 30), status).starts_with(" target: idle"));

        let at = |kind, column, row| MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        app.on_mouse(at(MouseEventKind::Down(MouseButton::Left), 5, 4));
        app.on_mouse(at(MouseEventKind::Drag(MouseButton::Left), 50, 9));
        assert!(row_text(&draw(&app, 60, 30), status).starts_with(" target: before \""));

        app.on_mouse(at(MouseEventKind::Drag(MouseButton::Left), 59, 29));
        assert!(
            row_text(&draw(&app, 60, 30), status)
                .starts_with(" target: outside: release to cancel")
        );
    }
}
