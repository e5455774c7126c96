#![forbid(unsafe_code)]

//! The public landing page.
//!
//! Four sections in document order (`inicio`, `produto`, `planos`,
//! `contato`) under a sticky [`NavBar`]. The page owns a [`SectionTracker`]
//! over the same ids, so native hosts and tests can drive the header
//! highlight exactly as the browser does: sample on scroll, select and
//! scroll on a navigation click.
//!
//! # Invariants
//!
//! - The nav items and tracker ids are both built from [`SECTION_IDS`].
//! - The nav highlight always equals [`SectionTracker::active_id`] after
//!   [`LandingPage::on_scroll`] or [`LandingPage::navigate`].

pub mod contact;
pub mod features;
pub mod hero;
pub mod pricing;

use bibliotech_core::{LayoutProbe, ScrollHost, SectionTracker};
use bibliotech_style::Theme;
use bibliotech_widgets::{Attrs, Markup, NavBar, NavItem, Widget};

use crate::config::SiteConfig;
use crate::routes::Route;

pub use contact::{ContactForm, ContactFormError, ContactSection};
pub use features::{Feature, FeatureSection, Stat};
pub use hero::Hero;
pub use pricing::{BillingCycle, Plan, PricingSection, format_brl, yearly_savings_percent};

/// Section anchors in document order.
pub const SECTION_IDS: [&str; 4] = ["inicio", "produto", "planos", "contato"];

const SECTION_LABELS: [&str; 4] = ["Início", "Produto", "Planos", "Contato"];

#[derive(Debug, Clone)]
pub struct LandingPage {
    pub theme: Theme,
    pub nav: NavBar,
    pub hero: Hero,
    pub features: FeatureSection,
    pub pricing: PricingSection,
    pub contact: ContactSection,
    tracker: SectionTracker,
}

impl LandingPage {
    pub fn new(config: &SiteConfig) -> Self {
        let items = SECTION_IDS
            .iter()
            .zip(SECTION_LABELS)
            .map(|(id, label)| NavItem::new(*id, label))
            .collect();
        Self {
            theme: config.theme.clone(),
            nav: NavBar::new("Bibliotech", items)
                .login(Route::Login.path(), "Entrar")
                .tracker(config.tracker),
            hero: Hero::new(&config.theme),
            features: FeatureSection::new(&config.counters),
            pricing: PricingSection::default(),
            contact: ContactSection::new(
                config.whatsapp_digits(),
                config.contact.max_message_len,
            ),
            tracker: SectionTracker::new(SECTION_IDS, config.tracker),
        }
    }

    pub fn tracker(&self) -> &SectionTracker {
        &self.tracker
    }

    pub fn active_section(&self) -> &str {
        self.tracker.active_id()
    }

    /// Re-measure sections after a scroll event and update the nav.
    pub fn on_scroll(&mut self, probe: &(impl LayoutProbe + ?Sized)) -> &str {
        let active = self.tracker.sample_layout(probe).to_string();
        self.nav.set_active(&active);
        self.tracker.active_id()
    }

    /// Nav click: highlight `id` at once, close the menu, scroll below the
    /// header. Returns the scroll target, `None` for unknown or unmeasurable ids.
    pub fn navigate(
        &mut self,
        id: &str,
        probe: &(impl LayoutProbe + ?Sized),
        host: &(impl ScrollHost + ?Sized),
    ) -> Option<f64> {
        let target = self.tracker.navigate(id, probe, host);
        if self.tracker.is_registered(id) {
            self.nav.select(id);
        }
        target
    }

    /// Submit the contact form; on error the section shows it under the field.
    pub fn submit_contact(&mut self, form: ContactForm) -> Result<String, ContactFormError> {
        let result = form.submit(&self.contact.whatsapp_number, self.contact.max_message_len);
        self.contact.form = form;
        self.contact.error = result.as_ref().err().cloned();
        result
    }
}

impl Widget for LandingPage {
    fn render(&self, out: &mut Markup) {
        out.child(&self.nav);
        out.open("main", &Attrs::new().class("bb-landing"));
        out.child(&self.hero);
        out.child(&self.features);
        out.child(&self.pricing);
        out.child(&self.contact);
        out.close("main");
        out.open("footer", &Attrs::new().class("bb-footer"));
        out.element("p", &Attrs::new(), "© Bibliotech. Feito para escolas brasileiras.");
        out.close("footer");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibliotech_core::VerticalSpan;
    use std::cell::Cell;

    /// Sections stacked 800px tall, scrolled by `scroll_y`.
    struct Stacked {
        scroll_y: Cell<f64>,
    }

    impl LayoutProbe for Stacked {
        fn measure(&self, id: &str) -> Option<VerticalSpan> {
            let index = SECTION_IDS.iter().position(|s| *s == id)?;
            let top = index as f64 * 800.0 - self.scroll_y.get();
            Some(VerticalSpan::from_top_height(top, 800.0))
        }
    }

    impl ScrollHost for Stacked {
        fn scroll_y(&self) -> f64 {
            self.scroll_y.get()
        }

        fn smooth_scroll_to(&self, y: f64) {
            self.scroll_y.set(y);
        }
    }

    #[test]
    fn sections_render_in_order() {
        let html = LandingPage::new(&SiteConfig::default()).to_html();
        let positions: Vec<usize> = SECTION_IDS
            .iter()
            .map(|id| html.find(&format!(r#"<section id="{id}""#)))
            .collect::<Option<_>>()
            .unwrap_or_default();
        assert_eq!(positions.len(), 4);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(html.find("<header").unwrap_or(usize::MAX) < positions[0]);
    }

    #[test]
    fn scrolling_moves_the_highlight() {
        let mut page = LandingPage::new(&SiteConfig::default());
        let probe = Stacked {
            scroll_y: Cell::new(0.0),
        };
        assert_eq!(page.on_scroll(&probe), "inicio");
        probe.scroll_y.set(1650.0);
        assert_eq!(page.on_scroll(&probe), "planos");
        assert!(page.nav.is_active("planos"));
    }

    #[test]
    fn navigate_scrolls_below_header() {
        let mut page = LandingPage::new(&SiteConfig::default());
        let probe = Stacked {
            scroll_y: Cell::new(0.0),
        };
        page.nav.toggle_menu();
        assert_eq!(page.navigate("contato", &probe, &probe), Some(2330.0));
        assert_eq!(page.active_section(), "contato");
        assert!(page.nav.is_active("contato"));
        assert!(!page.nav.is_menu_open());
        assert_eq!(page.navigate("nope", &probe, &probe), None);
        assert_eq!(page.active_section(), "contato");
    }

    #[test]
    fn contact_errors_are_kept_for_rendering() {
        let mut page = LandingPage::new(&SiteConfig::default());
        let form = ContactForm {
            name: "Ana".into(),
            ..ContactForm::default()
        };
        assert_eq!(
            page.submit_contact(form),
            Err(ContactFormError::MissingField { field: "email" })
        );
        assert!(page.to_html().contains("bb-field--error"));
    }
}
