//! Document layout: page content flowed into grid rows.
//!
//! The page is one tall virtual document. Every section is a run of
//! [`DocBlock`]s stacked top to bottom; each block is a handful of pre-wrapped
//! lines with their click hotspots and, when it animates in on scroll, a
//! reveal key. The layout is rebuilt every frame from the controllers' current
//! state, so it never holds anything that must be kept in sync.

use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};

use crate::widgets::{ClickableList, Hotspot, Tab};

use super::actions::{
    BRAND, CTA_CONTACT, CTA_PROJECTS, EMAIL_LINK, FILTER_BASE, FOCUS_FIELD_BASE,
    PROJECT_LINK_BASE, SCROLL_TOP, SOCIAL_BASE, SUBMIT_FORM,
};
use super::contact::{ContactForm, Field, FieldProblem, SubmissionState};
use super::content::{Portfolio, SectionId};
use super::filter::{FilterLabel, ProjectFilter};
use super::reveal::stagger_delay_ms;

/// Widest the text column gets on large screens.
const MAX_COLUMN: u16 = 96;

/// Blank rows at the top and bottom of every section.
const SECTION_PADDING: u16 = 2;

/// Minimum rows of the message box.
const MESSAGE_ROWS: usize = 3;

const EXPERIENCE_SUBTITLE: &str = "My professional journey as a software engineer.";
const PROJECTS_SUBTITLE: &str = "A collection of projects that showcase my skills and experience.";
const CONTACT_SUBTITLE: &str =
    "Have a project in mind or want to discuss potential opportunities? I'd love to hear from you.";
const SENT_BODY: &str = "Thank you for reaching out. I'll get back to you as soon as possible.";
const FAILED_BODY: &str = "Your message could not be sent. Please try again.";

fn accent() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn muted() -> Style {
    Style::default().fg(Color::Gray)
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn button() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Scroll-reveal registration for a block.
#[derive(Debug, Clone, PartialEq)]
pub struct Reveal {
    pub key: String,
    /// Stagger after the reveal before the fade starts.
    pub delay_ms: f64,
}

fn reveal(key: impl Into<String>, delay_ms: f64) -> Option<Reveal> {
    Some(Reveal {
        key: key.into(),
        delay_ms,
    })
}

pub struct DocBlock {
    /// First document row.
    pub top: u16,
    /// Owning section; None for the footer.
    pub section: Option<SectionId>,
    pub lines: Vec<Line<'static>>,
    pub hotspots: Vec<Hotspot>,
    pub reveal: Option<Reveal>,
    /// Follows the experience timeline's scroll-linked fade and slide.
    pub timeline: bool,
}

impl DocBlock {
    pub fn height(&self) -> u16 {
        self.lines.len() as u16
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub id: SectionId,
    pub top: u16,
    pub height: u16,
}

pub struct Document {
    /// Left margin of the text column.
    pub margin: u16,
    /// Width of the text column.
    pub column: u16,
    pub blocks: Vec<DocBlock>,
    pub sections: Vec<SectionBounds>,
    /// Total rows.
    pub height: u16,
}

impl Document {
    pub fn section(&self, id: SectionId) -> Option<&SectionBounds> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Keys of every block that reveals on scroll.
    pub fn reveal_keys(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .filter_map(|b| b.reveal.as_ref().map(|r| r.key.as_str()))
    }
}

/// Everything the layout reads.
pub struct LayoutInput<'a> {
    pub portfolio: &'a Portfolio,
    pub filter: &'a ProjectFilter,
    pub form: &'a ContactForm,
    pub focus: Option<Field>,
    pub hint: Option<(Field, FieldProblem)>,
    pub year: i32,
    /// Rows of the viewport; the hero fills at least this much.
    pub viewport_rows: u16,
}

struct DocBuilder {
    blocks: Vec<DocBlock>,
    sections: Vec<SectionBounds>,
    cursor: u16,
    section: Option<SectionId>,
    section_top: u16,
    section_first_block: usize,
}

impl DocBuilder {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            sections: Vec::new(),
            cursor: 0,
            section: None,
            section_top: 0,
            section_first_block: 0,
        }
    }

    fn begin_section(&mut self, id: SectionId) {
        self.section = Some(id);
        self.section_top = self.cursor;
        self.section_first_block = self.blocks.len();
        self.gap(SECTION_PADDING);
    }

    /// Close the open section. Content shorter than `min_rows` is centred.
    fn end_section(&mut self, min_rows: u16) {
        self.gap(SECTION_PADDING);
        let used = self.cursor - self.section_top;
        if used < min_rows {
            let shift = (min_rows - used) / 2;
            for block in &mut self.blocks[self.section_first_block..] {
                block.top += shift;
            }
            self.cursor = self.section_top + min_rows;
        }
        if let Some(id) = self.section.take() {
            self.sections.push(SectionBounds {
                id,
                top: self.section_top,
                height: self.cursor - self.section_top,
            });
        }
    }

    fn gap(&mut self, rows: u16) {
        self.cursor = self.cursor.saturating_add(rows);
    }

    fn push(&mut self, list: ClickableList<'static>, reveal: Option<Reveal>, timeline: bool) {
        let (lines, hotspots) = list.into_parts();
        let block = DocBlock {
            top: self.cursor,
            section: self.section,
            lines,
            hotspots,
            reveal,
            timeline,
        };
        self.cursor = self.cursor.saturating_add(block.height());
        self.blocks.push(block);
    }

    fn finish(self, margin: u16, column: u16) -> Document {
        Document {
            margin,
            column,
            blocks: self.blocks,
            sections: self.sections,
            height: self.cursor,
        }
    }
}

/// Greedy word wrap to `width` columns. Words longer than a line are split.
pub fn wrap(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let mut out = Vec::new();
    let mut line = String::new();
    let mut line_width = 0usize;

    for word in text.split_whitespace() {
        let mut rest = word;
        while !rest.is_empty() {
            let w = rest.chars().count();
            let needed = if line_width == 0 { w } else { line_width + 1 + w };
            if needed <= width {
                if line_width > 0 {
                    line.push(' ');
                }
                line.push_str(rest);
                line_width = needed;
                break;
            }
            if line_width > 0 {
                out.push(std::mem::take(&mut line));
                line_width = 0;
                continue;
            }
            let split = rest
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            out.push(rest[..split].to_string());
            rest = &rest[split..];
        }
    }
    if line_width > 0 {
        out.push(line);
    }
    out
}

fn paragraph(cl: &mut ClickableList<'static>, text: &str, width: u16, style: Style) {
    cl.extend(
        wrap(text, width)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, style))),
    );
}

fn heading(b: &mut DocBuilder, key: &str, title: &str, subtitle: &str, width: u16) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(title.to_string(), accent())).centered());
    cl.push(Line::from(Span::styled("─".repeat(8), dim())).centered());
    for l in wrap(subtitle, width) {
        cl.push(Line::from(Span::styled(l, muted())).centered());
    }
    b.push(cl, reveal(key, 0.0), false);
    b.gap(1);
}

/// Lay the whole page out for a grid `width` columns wide.
pub fn layout(input: &LayoutInput, width: u16) -> Document {
    let column = width.saturating_sub(4).clamp(1, MAX_COLUMN);
    let margin = width.saturating_sub(column) / 2;
    let mut b = DocBuilder::new();

    hero(&mut b, input, column);
    about(&mut b, input.portfolio, column);
    experience(&mut b, input.portfolio, column);
    projects(&mut b, input.portfolio, input.filter, column);
    contact(&mut b, input, column);
    footer(&mut b, input.portfolio, input.year);

    b.finish(margin, column)
}

fn hero(b: &mut DocBuilder, input: &LayoutInput, width: u16) {
    let owner = &input.portfolio.owner;
    b.begin_section(SectionId::Home);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        owner.greeting.clone(),
        Style::default().fg(Color::Cyan),
    )));
    b.push(cl, reveal("home/greeting", 200.0), false);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        owner.name.to_uppercase(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    b.push(cl, reveal("home/name", 300.0), false);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(owner.role.clone(), muted())));
    b.push(cl, reveal("home/role", 400.0), false);
    b.gap(1);

    let mut cl = ClickableList::new();
    paragraph(&mut cl, &owner.tagline, width.min(64), muted());
    b.push(cl, reveal("home/tagline", 500.0), false);
    b.gap(1);

    let mut cl = ClickableList::new();
    cl.push_tabs(
        &[
            Tab::new("Get in Touch", button(), CTA_CONTACT),
            Tab::new("View Projects", Style::default().fg(Color::Cyan), CTA_PROJECTS),
        ],
        "  ",
    );
    b.push(cl, reveal("home/cta", 600.0), false);
    b.gap(2);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled("Scroll Down ▾", dim())).centered());
    b.push(cl, reveal("home/scroll-hint", 1000.0), false);

    b.end_section(input.viewport_rows);
}

fn about(b: &mut DocBuilder, p: &Portfolio, width: u16) {
    b.begin_section(SectionId::About);
    heading(b, "about/heading", "About Me", &p.about.intro, width);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled("Who I Am", accent())));
    cl.push(Line::default());
    for (i, text) in p.about.paragraphs.iter().enumerate() {
        if i > 0 {
            cl.push(Line::default());
        }
        paragraph(&mut cl, text, width, muted());
    }
    b.push(cl, reveal("about/story", 0.0), false);
    b.gap(1);

    for (i, h) in p.about.highlights.iter().enumerate() {
        let mut cl = ClickableList::new();
        cl.push(Line::from(vec![
            Span::styled("◆ ", Style::default().fg(Color::Magenta)),
            Span::styled(h.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
        for l in wrap(&h.description, width.saturating_sub(2).max(1)) {
            cl.push(Line::from(vec![Span::raw("  "), Span::styled(l, muted())]));
        }
        b.push(
            cl,
            reveal(
                format!("about/highlight/{}", h.title),
                stagger_delay_ms(i, 100.0) + 300.0,
            ),
            false,
        );
        b.gap(1);
    }

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled("Technical Skills", accent())).centered());
    b.push(cl, reveal("about/skills", 0.0), false);
    b.gap(1);

    for (start, row) in chip_rows(&p.skills, width) {
        let mut cl = ClickableList::new();
        let mut spans = Vec::new();
        for (j, skill) in row.iter().enumerate() {
            if j > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!(" {skill} "),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ));
        }
        cl.push(Line::from(spans).centered());
        b.push(
            cl,
            reveal(
                format!("about/skills/{}", row[0]),
                stagger_delay_ms(start, 50.0),
            ),
            false,
        );
    }

    b.end_section(0);
}

/// Pack `chips` (padded by one space each side, one space apart) into rows of
/// at most `width` columns. Yields each row with the index of its first chip.
fn chip_rows(chips: &[String], width: u16) -> Vec<(usize, Vec<&str>)> {
    let width = width as usize;
    let mut rows: Vec<(usize, Vec<&str>)> = Vec::new();
    let mut row_width = 0usize;
    for (i, chip) in chips.iter().enumerate() {
        let w = chip.chars().count() + 2;
        match rows.last_mut() {
            Some((_, row)) if row_width + 1 + w <= width => {
                row.push(chip);
                row_width += 1 + w;
            }
            _ => {
                rows.push((i, vec![chip.as_str()]));
                row_width = w;
            }
        }
    }
    rows
}

fn experience(b: &mut DocBuilder, p: &Portfolio, width: u16) {
    b.begin_section(SectionId::Experience);
    heading(b, "experience/heading", "Work Experience", EXPERIENCE_SUBTITLE, width);

    let rail = Style::default().fg(Color::Cyan);
    let body_width = width.saturating_sub(4).max(1);
    for (i, e) in p.experiences.iter().enumerate() {
        let mut cl = ClickableList::new();
        cl.push(Line::from(vec![
            Span::styled("● ", rail),
            Span::styled(e.duration.clone(), Style::default().fg(Color::Yellow)),
        ]));
        cl.push(Line::from(vec![
            Span::styled("│ ", rail),
            Span::styled(e.position.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
        cl.push(Line::from(vec![
            Span::styled("│ ", rail),
            Span::styled(e.company.clone(), Style::default().fg(Color::Cyan)),
        ]));
        for l in wrap(&e.description, body_width) {
            cl.push(Line::from(vec![Span::styled("│ ", rail), Span::styled(l, muted())]));
        }
        for a in &e.achievements {
            for (j, l) in wrap(a, body_width.saturating_sub(2).max(1)).into_iter().enumerate() {
                let bullet = if j == 0 { "• " } else { "  " };
                cl.push(Line::from(vec![
                    Span::styled("│ ", rail),
                    Span::styled(bullet, Style::default().fg(Color::Cyan)),
                    Span::raw(l),
                ]));
            }
        }
        if i + 1 < p.experiences.len() {
            cl.push(Line::from(Span::styled("│", rail)));
        }
        b.push(
            cl,
            reveal(format!("experience/{}", e.company), stagger_delay_ms(i, 200.0)),
            true,
        );
    }

    b.end_section(0);
}

fn projects(b: &mut DocBuilder, p: &Portfolio, filter: &ProjectFilter, width: u16) {
    b.begin_section(SectionId::Projects);
    heading(b, "projects/heading", "Featured Projects", PROJECTS_SUBTITLE, width);

    let tabs: Vec<Tab> = filter
        .labels()
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let style = if label == filter.active() {
                button()
            } else {
                muted()
            };
            Tab::new(label.label(), style, FILTER_BASE + i as u16)
        })
        .collect();
    let mut cl = ClickableList::new();
    cl.push_tabs(&tabs, " ");
    b.push(cl, reveal("projects/filters", 200.0), false);
    b.gap(1);

    let visible = filter.visible_projects(&p.projects);
    if visible.is_empty() {
        let mut cl = ClickableList::new();
        let label = match filter.active() {
            FilterLabel::All => "No projects yet.".to_string(),
            FilterLabel::Category(c) => format!("No {c} projects yet."),
        };
        cl.push(Line::from(Span::styled(label, dim())).centered());
        b.push(cl, None, false);
    }
    for (i, project) in visible.iter().enumerate() {
        let mut cl = ClickableList::new();
        cl.push(Line::from(vec![
            Span::styled(project.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", project.category), dim()),
        ]));
        paragraph(&mut cl, &project.description, width, muted());
        let tags: Vec<Span<'static>> = project
            .tags
            .iter()
            .flat_map(|t| {
                [
                    Span::styled(format!("#{t}"), Style::default().fg(Color::Magenta)),
                    Span::raw(" "),
                ]
            })
            .collect();
        cl.push(Line::from(tags));
        let link = Style::default().fg(Color::Cyan);
        let base = p
            .projects
            .iter()
            .position(|q| std::ptr::eq(q, *project))
            .map_or(PROJECT_LINK_BASE, |j| PROJECT_LINK_BASE + 2 * j as u16);
        cl.push_tabs(
            &[
                Tab::new("↗ Demo", link, base),
                Tab::new("⌥ Code", link, base + 1),
            ],
            " · ",
        );
        b.push(
            cl,
            reveal(
                format!("projects/card/{}", project.title),
                stagger_delay_ms(i, 100.0),
            ),
            false,
        );
        b.gap(1);
    }

    b.end_section(0);
}

fn contact(b: &mut DocBuilder, input: &LayoutInput, width: u16) {
    let details = &input.portfolio.contact;
    b.begin_section(SectionId::Contact);
    heading(b, "contact/heading", "Get In Touch", CONTACT_SUBTITLE, width);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled("Contact Information", accent())));
    b.push(cl, reveal("contact/info", 0.0), false);

    let items = [
        ("✉", "Email", &details.email),
        ("☏", "Phone", &details.phone),
        ("⌂", "Location", &details.location),
    ];
    for (i, (icon, label, value)) in items.iter().enumerate() {
        let mut cl = ClickableList::new();
        cl.push(Line::from(vec![
            Span::styled(format!("{icon} "), Style::default().fg(Color::Cyan)),
            Span::styled(label.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
        let value = Line::from(Span::styled(format!("  {value}"), muted()));
        if *label == "Email" {
            cl.push_clickable(value, EMAIL_LINK);
        } else {
            cl.push(value);
        }
        b.push(
            cl,
            reveal(
                format!("contact/info/{label}"),
                stagger_delay_ms(i + 1, 100.0),
            ),
            false,
        );
    }

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        "Connect with me",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    let socials: Vec<Tab> = input
        .portfolio
        .socials
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let style = Style::default().fg(Color::Cyan);
            Tab::new(s.label.as_str(), style, SOCIAL_BASE + i as u16)
        })
        .collect();
    cl.push_tabs(&socials, " ");
    b.push(cl, reveal("contact/socials", 400.0), false);
    b.gap(1);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled("Send a Message", accent())));
    cl.push(Line::default());
    form_lines(&mut cl, input, width);
    b.push(cl, reveal("contact/form", 200.0), false);

    b.end_section(0);
}

fn form_lines(cl: &mut ClickableList<'static>, input: &LayoutInput, width: u16) {
    let form = input.form;
    if form.state() == SubmissionState::Submitted {
        cl.push(Line::from(Span::styled(
            "✓ Message Sent!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
        paragraph(cl, SENT_BODY, width, muted());
        return;
    }

    let box_width = width.saturating_sub(4).max(1);
    for field in Field::all() {
        let action = FOCUS_FIELD_BASE + field.index() as u16;
        let focused = input.focus == Some(*field);
        cl.push(Line::from(Span::styled(
            field.label(),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        let value = form.fields().get(*field);
        let mut rows: Vec<Line<'static>> = if value.is_empty() {
            vec![Line::from(Span::styled(field.placeholder(), dim()))]
        } else {
            wrap(value, box_width)
                .into_iter()
                .map(|l| Line::from(Span::raw(l)))
                .collect()
        };
        let cursor_row = rows.len().saturating_sub(1);
        let min_rows = if *field == Field::Message { MESSAGE_ROWS } else { 1 };
        while rows.len() < min_rows {
            rows.push(Line::default());
        }
        let gutter = if focused {
            Span::styled("▌ ", Style::default().fg(Color::Cyan))
        } else {
            Span::styled("│ ", dim())
        };
        for (j, row) in rows.into_iter().enumerate() {
            let mut spans = vec![gutter.clone()];
            spans.extend(row.spans);
            if focused && j == cursor_row {
                spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
            }
            cl.push_clickable(Line::from(spans), action);
        }

        if let Some((hint_field, problem)) = input.hint {
            if hint_field == *field {
                cl.push(Line::from(Span::styled(
                    format!("! {}", problem.hint()),
                    Style::default().fg(Color::Yellow),
                )));
            }
        }
        cl.push(Line::default());
    }

    if form.state() == SubmissionState::Failed {
        cl.push(Line::from(Span::styled(FAILED_BODY, Style::default().fg(Color::Red))));
    }
    if form.state() == SubmissionState::Submitting {
        cl.push(Line::from(Span::styled(" ◌ Sending... ", dim())));
    } else {
        cl.push_clickable(
            Line::from(Span::styled(" ➤ Send Message ", button())),
            SUBMIT_FORM,
        );
    }
}

fn footer(b: &mut DocBuilder, p: &Portfolio, year: i32) {
    b.gap(1);
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled("─".repeat(24), dim())).centered());
    cl.push_clickable(
        Line::from(Span::styled(p.owner.name.clone(), accent())).centered(),
        BRAND,
    );
    cl.push(Line::from(Span::styled(p.owner.role.clone(), dim())).centered());
    cl.push(Line::from(Span::styled(p.footer_links.join("   "), muted())).centered());
    cl.push(
        Line::from(Span::styled(format!("© {year} All Rights Reserved"), dim())).centered(),
    );
    cl.push_clickable(
        Line::from(Span::styled(" ↑ Back to top ", button())).centered(),
        SCROLL_TOP,
    );
    b.push(cl, None, false);
    b.gap(1);
}
