//! Navigation shell state.
//!
//! Two independent flags: whether the mobile menu is open, and whether the
//! page has been scrolled far enough to give the header its solid style. An
//! outside click closes the menu, but only once the menu has been open for
//! [`OUTSIDE_CLICK_DELAY`], so the click that opened it cannot close it again.

use std::time::{Duration, Instant};

/// Vertical scroll offset, in CSS pixels, past which the header turns solid.
pub const SCROLL_THRESHOLD_PX: f64 = 10.0;

/// How long after opening the menu before outside clicks are honoured.
pub const OUTSIDE_CLICK_DELAY: Duration = Duration::from_millis(100);

/// Links shown in both the desktop bar and the mobile menu.
pub const NAV_LINKS: [(&str, &str); 3] = [("Home", "/"), ("Register", "/register"), ("FAQs", "/faqs")];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    menu_open: bool,
    scrolled: bool,
    opened_at: Option<Instant>,
}

impl NavState {
    /// State for a server-rendered page, where the menu may be requested open
    /// through the no-script fallback link.
    pub fn rendered(menu_open: bool) -> Self {
        Self {
            menu_open,
            scrolled: false,
            opened_at: None,
        }
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Record the current scroll offset. Returns true if the flag flipped.
    pub fn on_scroll(&mut self, offset_y: f64) -> bool {
        let scrolled = offset_y > SCROLL_THRESHOLD_PX;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    pub fn toggle_menu(&mut self, now: Instant) {
        if self.menu_open {
            self.close_menu();
        } else {
            self.menu_open = true;
            self.opened_at = Some(now);
        }
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
        self.opened_at = None;
    }

    /// Whether the outside-click listener is attached at `now`.
    pub fn outside_click_armed(&self, now: Instant) -> bool {
        match (self.menu_open, self.opened_at) {
            (true, Some(at)) => now.saturating_duration_since(at) >= OUTSIDE_CLICK_DELAY,
            // Rendered open by the server: nothing to debounce.
            (true, None) => true,
            (false, _) => false,
        }
    }

    /// A click landed outside the menu. Returns true if it closed the menu.
    pub fn outside_click(&mut self, now: Instant) -> bool {
        if self.outside_click_armed(now) {
            self.close_menu();
            true
        } else {
            false
        }
    }

    pub fn header_class(&self) -> &'static str {
        if self.scrolled {
            "site-header scrolled"
        } else {
            "site-header"
        }
    }

    pub fn menu_class(&self) -> &'static str {
        if self.menu_open {
            "mobile-menu open"
        } else {
            "mobile-menu"
        }
    }
}
