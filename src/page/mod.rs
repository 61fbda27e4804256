//! The portfolio page shell.
//!
//! [`PortfolioPage`] owns every controller plus the viewport, lays the
//! document out each frame and routes input. The viewport is the only scroll
//! source; controllers receive its metrics explicitly.

pub mod actions;
pub mod contact;
pub mod content;
pub mod filter;
pub mod layout;
pub mod nav;
pub mod progress;
pub mod render;
pub mod reveal;
pub mod timeline;

use crate::input::{is_narrow_layout, ControlKey, InputEvent};
use crate::log;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::time::FrameClock;
use crate::viewport::{rows_to_px, Viewport};

use self::actions::indexed;
use self::contact::{ContactEvent, ContactForm, Field, FieldProblem, Toast};
use self::content::{Portfolio, SectionId};
use self::filter::ProjectFilter;
use self::layout::{Document, LayoutInput};
use self::nav::NavigationMenu;
use self::progress::{ScrollProgressTracker, SpringConfig};
use self::reveal::{intersection_ratio, RevealArena, PAGE_THRESHOLD};
use self::timeline::TimelineFrame;

/// Rows covered by the fixed header: progress bar and navigation bar.
pub const HEADER_ROWS: u16 = 2;

/// How long a toast stays up unless dismissed.
pub const TOAST_MS: f64 = 5000.0;

/// Grid size assumed until the first frame reports the real one.
const INITIAL_COLS: u16 = 80;
const INITIAL_ROWS: u16 = 24;

struct ActiveToast {
    toast: Toast,
    handle: TaskHandle,
}

pub struct PortfolioPage {
    portfolio: Portfolio,
    nav: NavigationMenu,
    reveal: RevealArena,
    filter: ProjectFilter,
    form: ContactForm,
    progress: ScrollProgressTracker,
    viewport: Viewport,
    clock: FrameClock,
    timeline: TimelineFrame,
    toast: Option<ActiveToast>,
    toast_timers: Scheduler<()>,
    /// Form field receiving keystrokes, if any.
    focus: Option<Field>,
    /// Validation message shown under a field after a blocked submit.
    hint: Option<(Field, FieldProblem)>,
    document: Document,
    year: i32,
    cols: u16,
    rows: u16,
    mounted: bool,
}

impl PortfolioPage {
    pub fn new(portfolio: Portfolio, year: i32) -> Self {
        let filter = ProjectFilter::new(portfolio.filters.clone());
        let form = ContactForm::new();
        let document = layout::layout(
            &LayoutInput {
                portfolio: &portfolio,
                filter: &filter,
                form: &form,
                focus: None,
                hint: None,
                year,
                viewport_rows: INITIAL_ROWS,
            },
            INITIAL_COLS,
        );
        let mut viewport = Viewport::new();
        viewport.resize(rows_to_px(INITIAL_ROWS), rows_to_px(document.height));

        Self {
            portfolio,
            nav: NavigationMenu::new(),
            reveal: RevealArena::new(),
            filter,
            form,
            progress: ScrollProgressTracker::new(SpringConfig::default()),
            viewport,
            clock: FrameClock::new(),
            timeline: TimelineFrame::at(0.0),
            toast: None,
            toast_timers: Scheduler::new(),
            focus: None,
            hint: None,
            document,
            year,
            cols: INITIAL_COLS,
            rows: INITIAL_ROWS,
            mounted: false,
        }
    }

    // ── lifecycle ──────────────────────────────────────────────

    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        if self.form.is_torn_down() {
            // A torn-down form never accepts input again
            self.form = ContactForm::new();
            self.focus = None;
            self.hint = None;
        }
        set_document_title(&self.portfolio.title);
        self.reveal
            .sync(self.document.reveal_keys(), PAGE_THRESHOLD);
        log::info(&format!(
            "mounted: {} sections, {} reveal targets",
            self.document.sections.len(),
            self.reveal.len()
        ));
    }

    /// Cancel pending timers and release reveal registrations.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.form.teardown();
        self.reveal.clear();
        self.toast_timers.cancel_all();
        self.toast = None;
        log::info("unmounted");
    }

    #[cfg(test)]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // ── per frame ──────────────────────────────────────────────

    /// Advance everything to `now_ms` for a `cols` x `rows` grid.
    pub fn frame(&mut self, now_ms: f64, cols: u16, rows: u16) {
        if !self.mounted {
            return;
        }
        let delta = self.clock.update(now_ms);

        for event in self.form.advance(now_ms) {
            match event {
                ContactEvent::Acknowledged(toast) => self.show_toast(toast, now_ms),
                ContactEvent::Failed(e) => log::warn(&e.to_string()),
                ContactEvent::Ready => {}
            }
        }
        if !self.toast_timers.take_due(now_ms).is_empty() {
            self.toast = None;
        }

        if cols != self.cols && !is_narrow_layout(cols) {
            self.nav.close_menu();
        }
        self.cols = cols;
        self.rows = rows;
        self.relayout();

        self.viewport.advance(delta);
        let metrics = self.viewport.metrics();
        self.nav.on_scroll(metrics.absolute_offset_px);
        self.progress.set_target(metrics.normalized_progress);
        self.progress.advance(delta);

        let view_top = metrics.absolute_offset_px;
        let view_height = self.viewport.viewport_height_px();
        if let Some(exp) = self.document.section(SectionId::Experience) {
            self.timeline = TimelineFrame::for_section(
                view_top,
                view_height,
                rows_to_px(exp.top),
                rows_to_px(exp.height),
            );
        }

        self.reveal
            .sync(self.document.reveal_keys(), PAGE_THRESHOLD);
        for block in &self.document.blocks {
            let Some(r) = &block.reveal else {
                continue;
            };
            let ratio = intersection_ratio(
                rows_to_px(block.top),
                rows_to_px(block.height()),
                view_top,
                view_height,
            );
            self.reveal.observe(&r.key, ratio, now_ms);
        }
    }

    fn relayout(&mut self) {
        self.document = layout::layout(
            &LayoutInput {
                portfolio: &self.portfolio,
                filter: &self.filter,
                form: &self.form,
                focus: self.focus,
                hint: self.hint,
                year: self.year,
                viewport_rows: self.rows,
            },
            self.cols,
        );
        self.viewport
            .resize(rows_to_px(self.rows), rows_to_px(self.document.height));
    }

    // ── navigation ─────────────────────────────────────────────

    /// Smooth-scroll so `id` starts at the top of the viewport.
    pub fn scroll_to_section(&mut self, id: SectionId) -> bool {
        let Some(bounds) = self.document.section(id) else {
            return false;
        };
        self.viewport.smooth_scroll_to(rows_to_px(bounds.top));
        true
    }

    pub fn scroll_to_top(&mut self) {
        self.viewport.smooth_scroll_to(0.0);
    }

    fn select_menu_item(&mut self, index: usize) -> bool {
        let Some(item) = self.portfolio.menu.get(index).cloned() else {
            return false;
        };
        match self.nav.select(&item) {
            Some(id) => self.scroll_to_section(id),
            None => false,
        }
    }

    // ── toasts ─────────────────────────────────────────────────

    fn show_toast(&mut self, toast: Toast, now_ms: f64) {
        self.dismiss_toast();
        let handle = self.toast_timers.schedule(now_ms, TOAST_MS, ());
        self.toast = Some(ActiveToast { toast, handle });
    }

    fn dismiss_toast(&mut self) -> bool {
        match self.toast.take() {
            Some(active) => {
                self.toast_timers.cancel(active.handle);
                true
            }
            None => false,
        }
    }

    // ── contact form ───────────────────────────────────────────

    /// Check the fields, then hand the form to the controller.
    fn try_submit(&mut self) -> bool {
        if let Some((field, problem)) = self.form.fields().first_problem() {
            self.focus = Some(field);
            self.hint = Some((field, problem));
            return false;
        }
        self.hint = None;
        if self.form.submit(self.clock.now_ms()) {
            self.focus = None;
            log::info("contact form submitted");
            true
        } else {
            false
        }
    }

    fn edit_focused(&mut self, field: Field, edit: impl FnOnce(&mut String)) -> bool {
        let mut value = self.form.fields().get(field).to_string();
        edit(&mut value);
        if !self.form.edit(field, value) {
            return false;
        }
        if self.hint.is_some_and(|(f, _)| f == field) {
            self.hint = None;
        }
        true
    }

    fn handle_form_key(&mut self, field: Field, event: &InputEvent) -> Option<bool> {
        let handled = match event {
            InputEvent::Key(c) => self.edit_focused(field, |v| v.push(*c)),
            InputEvent::Control(ControlKey::Backspace) => self.edit_focused(field, |v| {
                v.pop();
            }),
            InputEvent::Control(ControlKey::Enter) if field == Field::Message => self.try_submit(),
            InputEvent::Control(ControlKey::Enter) | InputEvent::Control(ControlKey::Tab) => {
                self.focus = field.next();
                true
            }
            InputEvent::Control(ControlKey::BackTab) => {
                self.focus = field.prev();
                true
            }
            _ => return None,
        };
        Some(handled)
    }

    // ── input ──────────────────────────────────────────────────

    /// Route one input event. Returns true if it was consumed.
    ///
    /// The menu sees the new scroll offset before this returns, not on the
    /// next frame.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if !self.mounted {
            return false;
        }
        let handled = self.dispatch_input(event);
        self.nav.on_scroll(self.viewport.metrics().absolute_offset_px);
        handled
    }

    fn dispatch_input(&mut self, event: &InputEvent) -> bool {
        if let Some(field) = self.focus {
            if let Some(handled) = self.handle_form_key(field, event) {
                return handled;
            }
        }

        let row_px = rows_to_px(1);
        let page_px = rows_to_px(self.rows.saturating_sub(HEADER_ROWS).max(1));
        match event {
            InputEvent::Wheel(delta) => {
                self.viewport.scroll_by(*delta);
                true
            }
            InputEvent::Click(id) => self.handle_click(*id),
            InputEvent::Control(ControlKey::Esc) => {
                if self.dismiss_toast() {
                    return true;
                }
                if self.focus.take().is_some() {
                    return true;
                }
                let was_open = self.nav.is_menu_open;
                self.nav.close_menu();
                was_open
            }
            InputEvent::Key('j') | InputEvent::Control(ControlKey::Down) => {
                self.viewport.scroll_by(row_px);
                true
            }
            InputEvent::Key('k') | InputEvent::Control(ControlKey::Up) => {
                self.viewport.scroll_by(-row_px);
                true
            }
            InputEvent::Key(' ') | InputEvent::Control(ControlKey::PageDown) => {
                self.viewport.scroll_by(page_px);
                true
            }
            InputEvent::Control(ControlKey::PageUp) => {
                self.viewport.scroll_by(-page_px);
                true
            }
            InputEvent::Key('g') | InputEvent::Control(ControlKey::Home) => {
                self.viewport.scroll_to(0.0);
                true
            }
            InputEvent::Key('G') | InputEvent::Control(ControlKey::End) => {
                let bottom = self.viewport.max_offset();
                self.viewport.scroll_to(bottom);
                true
            }
            InputEvent::Key('t') => {
                self.scroll_to_top();
                true
            }
            InputEvent::Key('m') => {
                self.nav.toggle_menu();
                true
            }
            InputEvent::Key(c @ '1'..='9') => {
                let index = (*c as u8 - b'1') as usize;
                self.select_menu_item(index)
            }
            InputEvent::Control(ControlKey::Left) => {
                self.filter.cycle(-1);
                true
            }
            InputEvent::Control(ControlKey::Right) => {
                self.filter.cycle(1);
                true
            }
            _ => false,
        }
    }

    fn handle_click(&mut self, id: u16) -> bool {
        use self::actions::*;

        if let Some(i) = indexed(id, FOCUS_FIELD_BASE, Field::all().len()) {
            self.focus = Some(Field::all()[i]);
            return true;
        }
        if id == SUBMIT_FORM {
            return self.try_submit();
        }
        self.focus = None;

        if let Some(i) = indexed(id, NAV_BASE, self.portfolio.menu.len()) {
            return self.select_menu_item(i);
        }
        if let Some(i) = indexed(id, FILTER_BASE, self.filter.labels().len()) {
            let label = self.filter.labels()[i].clone();
            self.filter.set_filter(label);
            return true;
        }
        if let Some(url) = self.link_for_action(id) {
            open_link(&url);
            return true;
        }
        match id {
            TOGGLE_MENU => {
                self.nav.toggle_menu();
                true
            }
            SCROLL_TOP => {
                self.scroll_to_top();
                true
            }
            DISMISS_TOAST => self.dismiss_toast(),
            BRAND => {
                self.nav.close_menu();
                self.scroll_to_section(SectionId::Home)
            }
            CTA_CONTACT => self.scroll_to_section(SectionId::Contact),
            CTA_PROJECTS => self.scroll_to_section(SectionId::Projects),
            _ => false,
        }
    }

    /// Destination of an outbound link target, if `id` is one.
    fn link_for_action(&self, id: u16) -> Option<String> {
        use self::actions::{EMAIL_LINK, PROJECT_LINK_BASE, SOCIAL_BASE};

        let p = &self.portfolio;
        if id == EMAIL_LINK {
            return Some(format!("mailto:{}", p.contact.email));
        }
        if let Some(i) = indexed(id, PROJECT_LINK_BASE, p.projects.len() * 2) {
            let project = &p.projects[i / 2];
            let url = if i % 2 == 0 { &project.demo_link } else { &project.github_link };
            return Some(url.clone());
        }
        indexed(id, SOCIAL_BASE, p.socials.len()).map(|i| p.socials[i].url.clone())
    }

    // ── accessors ──────────────────────────────────────────────

    pub fn nav(&self) -> &NavigationMenu {
        &self.nav
    }

    pub fn filter(&self) -> &ProjectFilter {
        &self.filter
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn progress(&self) -> &ScrollProgressTracker {
        &self.progress
    }

    pub fn timeline(&self) -> TimelineFrame {
        self.timeline
    }

    pub fn reveal(&self) -> &RevealArena {
        &self.reveal
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref().map(|t| &t.toast)
    }

    pub fn focus(&self) -> Option<Field> {
        self.focus
    }

    pub fn hint(&self) -> Option<(Field, FieldProblem)> {
        self.hint
    }
}

#[cfg(target_arch = "wasm32")]
fn set_document_title(title: &str) {
    match web_sys::window().and_then(|w| w.document()) {
        Some(document) => document.set_title(title),
        None => log::warn("no document; title not set"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn set_document_title(_title: &str) {}

/// Open `url` in a new tab.
#[cfg(target_arch = "wasm32")]
fn open_link(url: &str) {
    let opened = web_sys::window().map(|w| w.open_with_url_and_target(url, "_blank"));
    if !matches!(opened, Some(Ok(_))) {
        log::warn(&format!("could not open {url}"));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_link(url: &str) {
    log::info(&format!("open {url}"));
}
