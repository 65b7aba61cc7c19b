//! View Router
//!
//! Exactly one section is visible at a time. Switching a section also sets
//! the address fragment; the dashboard header shows a title looked up from a
//! fixed table. No history, no nesting.

use serde::Serialize;
use std::str::FromStr;

/// Viewport width below which following a nav link collapses the sidebar
pub const SIDEBAR_COLLAPSE_WIDTH: u32 = 992;

/// Title used for unknown paths
pub const FALLBACK_TITLE: &str = "Dashboard";

/// A named screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    Login,
    Register,
    Dashboard,
    Profile,
    Projects,
    Messages,
    Settings,
    Help,
}

impl Section {
    /// Every section, in page order
    pub fn all() -> &'static [Section] {
        &[
            Section::Login,
            Section::Register,
            Section::Dashboard,
            Section::Profile,
            Section::Projects,
            Section::Messages,
            Section::Settings,
            Section::Help,
        ]
    }

    /// Sections reachable from the dashboard sidebar
    pub fn nav_items() -> &'static [Section] {
        &[
            Section::Dashboard,
            Section::Profile,
            Section::Projects,
            Section::Messages,
            Section::Settings,
            Section::Help,
        ]
    }

    /// Element id of the section
    pub fn id(&self) -> &'static str {
        match self {
            Section::Login => "login",
            Section::Register => "register",
            Section::Dashboard => "dashboard",
            Section::Profile => "profile",
            Section::Projects => "projects",
            Section::Messages => "messages",
            Section::Settings => "settings",
            Section::Help => "help",
        }
    }

    /// `#id`
    pub fn fragment(&self) -> String {
        format!("#{}", self.id())
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Unknown section id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown section: {0}")]
pub struct UnknownSection(pub String);

impl FromStr for Section {
    type Err = UnknownSection;

    /// Accepts `id` or `#id`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.strip_prefix('#').unwrap_or(s);
        Section::all()
            .iter()
            .copied()
            .find(|section| section.id() == id)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// Page title for a route path such as `#profile`
pub fn title_for(path: &str) -> &'static str {
    match path {
        "#dashboard" => "Dashboard",
        "#profile" => "Profile",
        "#projects" => "Projects",
        "#messages" => "Messages",
        "#settings" => "Settings",
        "#help" => "Help",
        _ => FALLBACK_TITLE,
    }
}

/// Visible section, fragment, title, sidebar and active nav item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRouter {
    active: Section,
    fragment: String,
    page_title: &'static str,
    sidebar_open: bool,
    active_nav: Section,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new(Section::Login)
    }
}

impl ViewRouter {
    /// Router with `initial` visible. The fragment is left empty until the
    /// first switch.
    pub fn new(initial: Section) -> Self {
        Self {
            active: initial,
            fragment: String::new(),
            page_title: FALLBACK_TITLE,
            sidebar_open: false,
            active_nav: Section::Dashboard,
        }
    }

    /// Show `section` and hide all others; the fragment becomes `#id`
    pub fn switch_section(&mut self, section: Section) {
        tracing::debug!(from = %self.active, to = %section, "Switching section");
        self.active = section;
        self.fragment = section.fragment();
    }

    /// Set and return the page title for `path`
    pub fn load_content(&mut self, path: &str) -> &'static str {
        self.page_title = title_for(path);
        self.page_title
    }

    /// A sidebar link was followed
    pub fn navigate(&mut self, section: Section, viewport_width: u32) {
        self.switch_section(section);
        self.load_content(&section.fragment());
        self.active_nav = section;

        if viewport_width < SIDEBAR_COLLAPSE_WIDTH {
            self.toggle_sidebar();
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// True only for the visible section
    pub fn is_visible(&self, section: Section) -> bool {
        self.active == section
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn page_title(&self) -> &'static str {
        self.page_title
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn active_nav(&self) -> Section {
        self.active_nav
    }
}
