/// Navigation bar state: scroll-dependent surface and the mobile menu.

use super::content::{MenuItem, SectionId};

/// Scroll offset (px) past which the bar switches to its opaque surface.
pub const OPAQUE_AFTER_PX: f64 = 50.0;

/// Whether the navigation surface is opaque at scroll offset `scroll_position`.
pub fn nav_background_is_opaque(scroll_position: f64) -> bool {
    scroll_position > OPAQUE_AFTER_PX
}

pub struct NavigationMenu {
    pub is_menu_open: bool,
    pub scroll_position: f64,
}

impl NavigationMenu {
    pub fn new() -> Self {
        Self {
            is_menu_open: false,
            scroll_position: 0.0,
        }
    }

    /// Record the latest scroll offset. Most recent event wins.
    pub fn on_scroll(&mut self, offset_px: f64) {
        self.scroll_position = offset_px;
    }

    pub fn is_opaque(&self) -> bool {
        nav_background_is_opaque(self.scroll_position)
    }

    pub fn toggle_menu(&mut self) {
        self.is_menu_open = !self.is_menu_open;
    }

    pub fn close_menu(&mut self) {
        self.is_menu_open = false;
    }

    /// Select a menu item: closes the menu and returns where to navigate.
    pub fn select(&mut self, item: &MenuItem) -> Option<SectionId> {
        self.close_menu();
        item.target()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_opaque_iff_past_threshold(s in 0.0f64..10_000.0) {
            let mut nav = NavigationMenu::new();
            nav.on_scroll(s);
            prop_assert_eq!(nav.is_opaque(), s > 50.0);
        }
    }
}
