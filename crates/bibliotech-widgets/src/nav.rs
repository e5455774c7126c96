#![forbid(unsafe_code)]

//! Fixed header navigation.
//!
//! The bar lists in-page anchors. The active one carries `is-active` and
//! `aria-current="true"`. The tracker offsets are emitted as data attributes
//! so the hydration layer can run a `SectionTracker` with the same numbers.

use bibliotech_core::TrackerConfig;
use bibliotech_style::{ButtonSize, ButtonVariant};

use crate::Widget;
use crate::button::Button;
use crate::markup::{Attrs, Markup};

/// One in-page link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub anchor: String,
    pub label: String,
}

impl NavItem {
    pub fn new(anchor: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavBar {
    brand: String,
    items: Vec<NavItem>,
    active: String,
    menu_open: bool,
    login: Option<(String, String)>,
    tracker: TrackerConfig,
}

impl NavBar {
    /// The first item starts active.
    pub fn new(brand: impl Into<String>, items: Vec<NavItem>) -> Self {
        let active = items.first().map(|i| i.anchor.clone()).unwrap_or_default();
        Self {
            brand: brand.into(),
            items,
            active,
            menu_open: false,
            login: None,
            tracker: TrackerConfig::default(),
        }
    }

    /// Login call to action (`href`, label).
    #[must_use]
    pub fn login(mut self, href: impl Into<String>, label: impl Into<String>) -> Self {
        self.login = Some((href.into(), label.into()));
        self
    }

    #[must_use]
    pub fn tracker(mut self, config: TrackerConfig) -> Self {
        self.tracker = config;
        self
    }

    #[must_use]
    pub fn with_active(mut self, anchor: &str) -> Self {
        self.set_active(anchor);
        self
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn anchors(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|i| i.anchor.as_str())
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn is_active(&self, anchor: &str) -> bool {
        self.active == anchor
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Set the highlighted anchor; unknown anchors are ignored.
    pub fn set_active(&mut self, anchor: &str) -> bool {
        if !self.items.iter().any(|i| i.anchor == anchor) {
            return false;
        }
        self.active = anchor.to_string();
        true
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    /// A link was clicked: highlight it and collapse the mobile menu.
    pub fn select(&mut self, anchor: &str) -> bool {
        let known = self.set_active(anchor);
        if known {
            self.menu_open = false;
        }
        known
    }
}

impl Widget for NavBar {
    fn render(&self, out: &mut Markup) {
        let activation = self.tracker.activation_offset_px.to_string();
        let header = self.tracker.header_offset_px.to_string();
        out.open(
            "header",
            &Attrs::new()
                .class("bb-nav")
                .flag("data-section-tracker", true)
                .attr("data-activation-offset", activation)
                .attr("data-header-offset", header),
        );
        let brand_href = self
            .items
            .first()
            .map(|i| format!("#{}", i.anchor))
            .unwrap_or_else(|| "#".to_string());
        out.element(
            "a",
            &Attrs::new()
                .class("bb-nav__brand")
                .attr("href", brand_href),
            &self.brand,
        );
        out.element(
            "button",
            &Attrs::new()
                .attr("type", "button")
                .class("bb-nav__toggle")
                .attr("aria-controls", "bb-nav-menu")
                .attr("aria-expanded", if self.menu_open { "true" } else { "false" })
                .attr("aria-label", "Abrir menu"),
            "☰",
        );
        let menu_class = if self.menu_open {
            "bb-nav__menu is-open"
        } else {
            "bb-nav__menu"
        };
        out.open(
            "nav",
            &Attrs::new().attr("id", "bb-nav-menu").class(menu_class),
        );
        for item in &self.items {
            let active = self.is_active(&item.anchor);
            out.element(
                "a",
                &Attrs::new()
                    .class(if active {
                        "bb-nav__link is-active"
                    } else {
                        "bb-nav__link"
                    })
                    .attr("href", format!("#{}", item.anchor))
                    .attr("data-section", item.anchor.as_str())
                    .opt("aria-current", active.then_some("true")),
                &item.label,
            );
        }
        out.close("nav");
        if let Some((href, label)) = &self.login {
            out.child(
                &Button::new(label.as_str())
                    .variant(ButtonVariant::Outline)
                    .size(ButtonSize::Sm)
                    .href(href.as_str()),
            );
        }
        out.close("header");
    }
}
