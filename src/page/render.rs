//! Portfolio page rendering.
//!
//! Draw order is back to front: document rows, header, menu drop-down,
//! toast. Click targets are registered in the same order, so overlays win
//! hit tests over the rows beneath them.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::viewport::CELL_HEIGHT_PX;
use crate::widgets::{ClickableList, Tab, TabBar};

use super::actions::{BRAND, DISMISS_TOAST, NAV_BASE, TOGGLE_MENU};
use super::content::SectionId;
use super::layout::DocBlock;
use super::PortfolioPage;

/// Opaque header surface.
const HEADER_BG: Color = Color::Rgb(18, 18, 24);

const TOAST_WIDTH: u16 = 44;

impl PortfolioPage {
    pub fn render(&self, f: &mut Frame, cs: &mut ClickState) {
        let area = f.area();
        self.render_document(f, area, cs);
        self.render_header(f, area, cs);
        if self.nav.is_menu_open && is_narrow_layout(area.width) {
            self.render_menu_dropdown(f, area, cs);
        }
        if let Some(active) = &self.toast {
            render_toast(f, area, &active.toast.title, &active.toast.description, cs);
        }
    }

    fn render_document(&self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let doc = &self.document;
        let now = self.clock.now_ms();
        let offset = self.viewport.offset_rows() as i32;
        let x = area.x + doc.margin.min(area.width);
        let width = doc.column.min(area.width.saturating_sub(x - area.x));
        let timeline_shift = self.timeline.offset_rows(CELL_HEIGHT_PX);
        let experience = doc.section(SectionId::Experience);

        for block in &doc.blocks {
            let mut alpha = match &block.reveal {
                Some(r) => self.reveal.alpha(&r.key, now, r.delay_ms) as f64,
                None => 1.0,
            };
            let mut shift = 0;
            if block.timeline {
                alpha *= self.timeline.opacity;
                shift = timeline_shift;
            }
            let Some(fade) = fade_for(alpha) else {
                continue;
            };

            let visible_row = |line: u16| -> Option<u16> {
                let doc_row = block.top as i32 + line as i32 + shift;
                if block.timeline {
                    if let Some(exp) = experience {
                        let top = exp.top as i32;
                        if doc_row < top || doc_row >= top + exp.height as i32 {
                            return None;
                        }
                    }
                }
                let screen_row = doc_row - offset;
                (screen_row >= 0 && screen_row < area.height as i32)
                    .then(|| area.y + screen_row as u16)
            };

            for (i, line) in block.lines.iter().enumerate() {
                let Some(y) = visible_row(i as u16) else {
                    continue;
                };
                let line = apply_fade(line, fade);
                f.render_widget(Paragraph::new(line), Rect::new(x, y, width, 1));
            }
            register_block_targets(block, cs, x, width, visible_row);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        if area.height < 2 {
            return;
        }
        let bar = Rect::new(area.x, area.y, area.width, 1);
        let nav = Rect::new(area.x, area.y + 1, area.width, 1);
        f.render_widget(Clear, bar);
        f.render_widget(Clear, nav);

        // Progress bar
        let filled = self.progress.bar_cells(area.width);
        if filled > 0 {
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "━".repeat(filled as usize),
                    Style::default().fg(Color::Cyan),
                ))),
                Rect::new(bar.x, bar.y, filled, 1),
            );
        }

        // Navigation bar
        let surface = if self.nav.is_opaque() {
            Style::default().bg(HEADER_BG)
        } else {
            Style::default()
        };
        f.render_widget(Paragraph::new("").style(surface), nav);

        let brand = format!(" {} ", self.portfolio.brand);
        let brand_width = (brand.chars().count() as u16).min(nav.width);
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                brand,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )))
            .style(surface),
            Rect::new(nav.x, nav.y, brand_width, 1),
        );
        cs.add_click_target(Rect::new(nav.x, nav.y, brand_width, 1), BRAND);

        if is_narrow_layout(area.width) {
            let label = if self.nav.is_menu_open { " ✕ " } else { " ☰ " };
            let toggle = Rect::new(nav.x + nav.width.saturating_sub(4), nav.y, 3.min(nav.width), 1);
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    label,
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )))
                .style(surface),
                toggle,
            );
            // Generous target: the whole right half of the bar
            let half = nav.width / 2;
            cs.add_click_target(Rect::new(nav.x + half, nav.y, nav.width - half, 1), TOGGLE_MENU);
        } else {
            let mut bar = TabBar::new(" ");
            for (i, item) in self.portfolio.menu.iter().enumerate() {
                let style = Style::default().fg(Color::Gray);
                bar = bar.tab(Tab::new(item.name.as_str(), style, NAV_BASE + i as u16));
            }
            let tabs_width = bar.width().min(nav.width.saturating_sub(brand_width));
            let tabs = Rect::new(
                nav.x + nav.width - tabs_width,
                nav.y,
                tabs_width,
                1,
            );
            bar.render(f, tabs, cs);
        }
    }

    fn render_menu_dropdown(&self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let mut cl = ClickableList::new();
        for (i, item) in self.portfolio.menu.iter().enumerate() {
            cl.push_clickable(
                Line::from(vec![
                    Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(item.name.clone(), Style::default().fg(Color::White)),
                ]),
                NAV_BASE + i as u16,
            );
        }
        let height = (cl.len() as u16 + 2).min(area.height.saturating_sub(2));
        let rect = Rect::new(area.x, area.y + 2, area.width, height);
        f.render_widget(Clear, rect);
        cl.register_bordered(rect, cs);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(HEADER_BG));
        f.render_widget(Paragraph::new(cl.into_lines()).block(block), rect);
    }
}

/// Colour override for a partially faded block; None when it is not drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Fade {
    Full,
    Dim(Color),
}

fn fade_for(alpha: f64) -> Option<Fade> {
    if alpha < 0.15 {
        None
    } else if alpha < 0.5 {
        Some(Fade::Dim(Color::DarkGray))
    } else if alpha < 0.85 {
        Some(Fade::Dim(Color::Gray))
    } else {
        Some(Fade::Full)
    }
}

fn apply_fade(line: &Line<'static>, fade: Fade) -> Line<'static> {
    let mut line = line.clone();
    if let Fade::Dim(color) = fade {
        for span in &mut line.spans {
            span.style.fg = Some(color);
            span.style.bg = None;
        }
    }
    line
}

fn register_block_targets(
    block: &DocBlock,
    cs: &mut ClickState,
    x: u16,
    width: u16,
    visible_row: impl Fn(u16) -> Option<u16>,
) {
    for hotspot in &block.hotspots {
        if let Some(y) = visible_row(hotspot.line()) {
            hotspot.register(cs, x, y, width);
        }
    }
}

fn render_toast(f: &mut Frame, area: Rect, title: &str, description: &str, cs: &mut ClickState) {
    let width = TOAST_WIDTH.min(area.width);
    if width < 4 || area.height < 3 {
        return;
    }
    let lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            description.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ];
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let content_rows = paragraph.line_count(width - 2) as u16;
    let height = (content_rows + 2).min(area.height);
    let rect = Rect::new(
        area.x + area.width - width,
        area.y + area.height - height,
        width,
        height,
    );
    f.render_widget(Clear, rect);
    f.render_widget(
        paragraph.block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(" ✓ "),
        ),
        rect,
    );
    cs.add_click_target(rect, DISMISS_TOAST);
}
