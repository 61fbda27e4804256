//! Widgets that draw lines and register their own click targets.
//!
//! Hotspots are attached to lines as they are pushed, so a line keeps its
//! action wherever the surrounding layout ends up placing it.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

/// One label in a horizontal strip.
#[derive(Debug, Clone)]
pub struct Tab {
    pub label: String,
    pub style: Style,
    pub action_id: u16,
}

impl Tab {
    pub fn new(label: impl Into<String>, style: Style, action_id: u16) -> Self {
        Self {
            label: label.into(),
            style,
            action_id,
        }
    }
}

/// A strip of tabs laid out on one line.
struct Strip {
    line: Line<'static>,
    /// `(padded width, action_id)` per tab.
    widths: Vec<(u16, u16)>,
    gap: u16,
}

fn lay_out_strip(tabs: &[Tab], separator: &str) -> Strip {
    let gap = Span::raw(separator).width() as u16;
    let mut spans = Vec::with_capacity(tabs.len() * 2);
    let mut widths = Vec::with_capacity(tabs.len());
    for tab in tabs {
        if !spans.is_empty() {
            spans.push(Span::styled(
                separator.to_string(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let span = Span::styled(format!(" {} ", tab.label), tab.style);
        widths.push((span.width() as u16, tab.action_id));
        spans.push(span);
    }
    Strip {
        line: Line::from(spans),
        widths,
        gap,
    }
}

/// The desktop nav: menu labels in a row, each one a click target.
pub struct TabBar<'a> {
    tabs: Vec<Tab>,
    separator: &'a str,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
        }
    }

    pub fn tab(mut self, tab: Tab) -> Self {
        self.tabs.push(tab);
        self
    }

    /// Columns needed to draw every tab.
    pub fn width(&self) -> u16 {
        lay_out_strip(&self.tabs, self.separator).line.width() as u16
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let strip = lay_out_strip(&self.tabs, self.separator);
        cs.register_tab_targets(&strip.widths, strip.gap, area);
        f.render_widget(Paragraph::new(strip.line), area);
    }
}

/// Where a line of a [`ClickableList`] reacts to clicks.
#[derive(Debug, Clone, PartialEq)]
pub enum Hotspot {
    /// The whole row triggers one action.
    Row { line: u16, action_id: u16 },
    /// A tab strip; each tab has its own action.
    Tabs {
        line: u16,
        widths: Vec<(u16, u16)>,
        gap: u16,
    },
}

impl Hotspot {
    /// Index of the line this hotspot belongs to.
    pub fn line(&self) -> u16 {
        match self {
            Hotspot::Row { line, .. } | Hotspot::Tabs { line, .. } => *line,
        }
    }

    /// Register targets for the line once it is drawn at screen row `y`.
    pub fn register(&self, cs: &mut ClickState, x: u16, y: u16, width: u16) {
        let row = Rect::new(x, y, width, 1);
        match self {
            Hotspot::Row { action_id, .. } => cs.add_click_target(row, *action_id),
            Hotspot::Tabs { widths, gap, .. } => cs.register_tab_targets(widths, *gap, row),
        }
    }
}

/// Lines for one paragraph-like widget, with click actions on some of them.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Send a Message"));
/// cl.push_clickable(Line::from(" Send Message "), SUBMIT_FORM);
/// ```
#[derive(Default)]
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    hotspots: Vec<Hotspot>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_line(&self) -> u16 {
        self.lines.len() as u16
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = Line<'a>>) {
        self.lines.extend(lines);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.hotspots.push(Hotspot::Row {
            line: self.next_line(),
            action_id,
        });
        self.lines.push(line);
    }

    pub fn push_tabs(&mut self, tabs: &[Tab], separator: &str) {
        let strip = lay_out_strip(tabs, separator);
        self.hotspots.push(Hotspot::Tabs {
            line: self.next_line(),
            widths: strip.widths,
            gap: strip.gap,
        });
        self.lines.push(strip.line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    pub fn into_parts(self) -> (Vec<Line<'a>>, Vec<Hotspot>) {
        (self.lines, self.hotspots)
    }

    /// Register hotspots for lines drawn inside a bordered box at `rect`.
    /// Lines past the bottom border get no target.
    pub fn register_bordered(&self, rect: Rect, cs: &mut ClickState) {
        let inner = Block::default().borders(Borders::ALL).inner(rect);
        for hotspot in &self.hotspots {
            let line = hotspot.line();
            if line < inner.height {
                hotspot.register(cs, inner.x, inner.y + line, inner.width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(labels: &[(&str, u16)]) -> Vec<Tab> {
        labels
            .iter()
            .map(|&(label, id)| Tab::new(label, Style::default(), id))
            .collect()
    }

    #[test]
    fn strip_pads_each_label() {
        let strip = lay_out_strip(&tabs(&[("All", 100), ("Mobile", 102)]), " | ");
        assert_eq!(strip.gap, 3);
        assert_eq!(strip.widths, vec![(5, 100), (8, 102)]);
        assert_eq!(strip.line.width(), 5 + 3 + 8);
    }

    #[test]
    fn nav_width_counts_separators() {
        let bar = TabBar::new(" ")
            .tab(Tab::new("Home", Style::default(), 10))
            .tab(Tab::new("About", Style::default(), 11));
        assert_eq!(bar.width(), 6 + 1 + 7);
    }

    #[test]
    fn menu_box_targets_skip_borders() {
        let mut cl = ClickableList::new();
        cl.push_clickable(Line::from("Home"), 10);
        cl.push_clickable(Line::from("About"), 11);
        cl.push(Line::from("(press Esc to close)"));
        assert_eq!(cl.len(), 3);

        let mut cs = ClickState::new();
        cl.register_bordered(Rect::new(0, 5, 30, 10), &mut cs);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 5), None);
        assert_eq!(cs.hit_test(10, 6), Some(10));
        assert_eq!(cs.hit_test(10, 7), Some(11));
        assert_eq!(cs.hit_test(10, 8), None);
        assert_eq!(cs.hit_test(0, 6), None);
        assert_eq!(cs.hit_test(29, 6), None);
    }

    #[test]
    fn lines_below_the_box_get_no_target() {
        let mut cl = ClickableList::new();
        for i in 0..10 {
            cl.push_clickable(Line::from(format!("item {i}")), 50 + i);
        }
        let mut cs = ClickState::new();
        cl.register_bordered(Rect::new(0, 0, 80, 5), &mut cs);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(10, 3), Some(52));
        assert_eq!(cs.hit_test(10, 4), None);
    }

    #[test]
    fn hotspot_follows_its_line() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("Send a Message"));
        cl.push(Line::from("Please fill out this field."));
        cl.push_clickable(Line::from("Send Message"), 42);

        let (_, hotspots) = cl.into_parts();
        assert_eq!(hotspots, vec![Hotspot::Row { line: 2, action_id: 42 }]);
    }

    #[test]
    fn filter_row_registers_each_tab() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("Featured Projects"));
        cl.push_tabs(&tabs(&[("All", 100), ("Web", 101)]), " ");

        let (lines, hotspots) = cl.into_parts();
        assert_eq!(lines.len(), 2);
        assert_eq!(hotspots[0].line(), 1);

        let mut cs = ClickState::new();
        hotspots[0].register(&mut cs, 0, 7, 40);
        assert_eq!(cs.hit_test(1, 7), Some(100));
        assert_eq!(cs.hit_test(8, 7), Some(101));
        assert_eq!(cs.hit_test(39, 7), Some(101));
        assert_eq!(cs.hit_test(1, 8), None);
    }
}
