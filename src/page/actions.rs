//! Semantic action IDs for portfolio click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Shell ───────────────────────────────────────────────────────
pub const TOGGLE_MENU: u16 = 0;
pub const SCROLL_TOP: u16 = 1;
pub const DISMISS_TOAST: u16 = 2;
pub const BRAND: u16 = 3;

// ── Navigation items (base + menu index) ───────────────────────
pub const NAV_BASE: u16 = 10;

// ── Hero call-to-action ─────────────────────────────────────────
pub const CTA_CONTACT: u16 = 30;
pub const CTA_PROJECTS: u16 = 31;

// ── Outbound links ──────────────────────────────────────────────
pub const EMAIL_LINK: u16 = 32;
/// Project `i` owns `base + 2i` (demo) and `base + 2i + 1` (code).
pub const PROJECT_LINK_BASE: u16 = 300;
pub const SOCIAL_BASE: u16 = 500;

// ── Project filter labels (base + label index) ──────────────────
pub const FILTER_BASE: u16 = 100;

// ── Contact form (focus: base + field index) ────────────────────
pub const FOCUS_FIELD_BASE: u16 = 200;
pub const SUBMIT_FORM: u16 = 210;

/// Decode `id` as `base + index` when it falls in `base..base + count`.
pub fn indexed(id: u16, base: u16, count: usize) -> Option<usize> {
    let i = id.checked_sub(base)? as usize;
    (i < count).then_some(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_ranges() {
        assert_eq!(indexed(NAV_BASE, NAV_BASE, 5), Some(0));
        assert_eq!(indexed(NAV_BASE + 4, NAV_BASE, 5), Some(4));
        assert_eq!(indexed(NAV_BASE + 5, NAV_BASE, 5), None);
        assert_eq!(indexed(TOGGLE_MENU, NAV_BASE, 5), None);
        assert_eq!(indexed(FILTER_BASE + 2, FILTER_BASE, 4), Some(2));
    }

    #[test]
    fn bases_do_not_overlap() {
        assert!(NAV_BASE + 5 <= CTA_CONTACT);
        assert!(FOCUS_FIELD_BASE + 4 <= SUBMIT_FORM);
        assert!(SUBMIT_FORM < PROJECT_LINK_BASE);
        assert!(PROJECT_LINK_BASE + 2 * 100 <= SOCIAL_BASE);
    }
}
