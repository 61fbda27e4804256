//! Input normalisation and click hit testing.
//!
//! Keyboard, wheel and pointer events from the browser are folded into
//! [`InputEvent`] before the page sees them. Click targets are registered
//! during render and hit-tested in grid cell coordinates.

use ratzilla::event::KeyCode;
use ratzilla::ratatui::layout::Rect;

/// Non-character keys the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKey {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Backspace,
    Tab,
    BackTab,
    Esc,
}

/// All possible input events, normalized from keyboard, wheel, mouse and touch.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable character from the keyboard.
    Key(char),
    /// A navigation or editing key.
    Control(ControlKey),
    /// A click/tap on a registered target, identified by a semantic action ID.
    Click(u16),
    /// A wheel/trackpad scroll of `delta` CSS pixels (positive = down).
    Wheel(f64),
}

/// A grid rectangle that maps to a page action when tapped.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    /// See `page::actions`.
    pub action_id: u16,
}

impl ClickTarget {
    fn contains(&self, col: u16, row: u16) -> bool {
        let r = self.rect;
        (r.x..r.x + r.width).contains(&col) && (r.y..r.y + r.height).contains(&row)
    }
}

/// Targets registered by the last render, plus the grid they were laid out on.
///
/// The draw callback rebuilds this every frame; the pointer handler only
/// reads it.
#[derive(Debug, Default)]
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub cols: u16,
    pub rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame on a `cols` x `rows` grid.
    pub fn reset(&mut self, cols: u16, rows: u16) {
        self.targets.clear();
        self.cols = cols;
        self.rows = rows;
    }

    /// Nothing has been drawn yet.
    pub fn is_blank(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        if !rect.is_empty() {
            self.targets.push(ClickTarget { rect, action_id });
        }
    }

    /// Register one target per tab of a strip drawn at the left of `area`.
    ///
    /// `tabs` holds `(padded label width, action_id)`. Neighbouring tabs split
    /// the `gap` columns between them; the outermost tabs stretch to the edges
    /// of `area`, so every column of the strip is clickable.
    pub fn register_tab_targets(&mut self, tabs: &[(u16, u16)], gap: u16, area: Rect) {
        for (left, width, action_id) in tab_hit_spans(tabs, gap, area.width) {
            self.add_click_target(
                Rect::new(area.x + left, area.y, width, area.height),
                action_id,
            );
        }
    }

    /// Action under a cell. Overlays register after the page beneath them,
    /// so the newest matching target wins.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets
            .iter()
            .rev()
            .find(|t| t.contains(col, row))
            .map(|t| t.action_id)
    }
}

/// `(left, width, action_id)` spans covering `0..total` for a tab strip.
fn tab_hit_spans(tabs: &[(u16, u16)], gap: u16, total: u16) -> Vec<(u16, u16, u16)> {
    let mut spans = Vec::with_capacity(tabs.len());
    let mut label_start = 0u16;
    let mut left = 0u16;
    for (i, &(width, action_id)) in tabs.iter().enumerate() {
        let label_end = label_start.saturating_add(width);
        let right = if i + 1 == tabs.len() {
            total
        } else {
            label_end.saturating_add(gap / 2).min(total)
        };
        if right > left {
            spans.push((left, right - left, action_id));
            left = right;
        }
        label_start = label_end.saturating_add(gap);
    }
    spans
}

/// Grids narrower than this collapse the nav into a toggle.
pub const NARROW_COLS: u16 = 60;

pub fn is_narrow_layout(cols: u16) -> bool {
    cols < NARROW_COLS
}

/// Map a pixel offset along one axis of the grid to a cell index.
///
/// `offset` is measured from the grid's leading edge and `extent` is the
/// grid's size in pixels along that axis. None when the point falls outside.
pub fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset * cells as f64 / extent).floor();
    (cell < cells as f64).then_some(cell as u16)
}

/// Normalise a `WheelEvent.deltaY` into pixels.
///
/// `delta_mode` 1 is lines, 2 is pages; 0 (pixels) passes through.
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32, page_height_px: f64) -> f64 {
    match delta_mode {
        1 => delta_y * crate::viewport::CELL_HEIGHT_PX,
        2 => delta_y * page_height_px,
        _ => delta_y,
    }
}

/// Map a browser key press to an input event. Unhandled keys yield None.
pub fn key_input(code: KeyCode, shift: bool) -> Option<InputEvent> {
    let control = match code {
        KeyCode::Char(c) => return Some(InputEvent::Key(c)),
        KeyCode::Up => ControlKey::Up,
        KeyCode::Down => ControlKey::Down,
        KeyCode::Left => ControlKey::Left,
        KeyCode::Right => ControlKey::Right,
        KeyCode::PageUp => ControlKey::PageUp,
        KeyCode::PageDown => ControlKey::PageDown,
        KeyCode::Home => ControlKey::Home,
        KeyCode::End => ControlKey::End,
        KeyCode::Enter => ControlKey::Enter,
        KeyCode::Backspace => ControlKey::Backspace,
        KeyCode::Tab if shift => ControlKey::BackTab,
        KeyCode::Tab => ControlKey::Tab,
        KeyCode::Esc => ControlKey::Esc,
        _ => return None,
    };
    Some(InputEvent::Control(control))
}
