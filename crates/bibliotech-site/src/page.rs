//! Full HTML document around a page body.

use bibliotech_style::Theme;
use bibliotech_widgets::{Attrs, Markup, Widget};

/// Module script that loads the hydration bundle built from `bibliotech-web`.
pub const HYDRATE_SCRIPT: &str = r#"import init, { hydrate } from "./pkg/bibliotech_web.js"; init().then(() => { window.bibliotech = hydrate(); }).catch(console.error);"#;

const BASE_CSS: &str = "\
*{box-sizing:border-box}\
body{margin:0;font-family:system-ui,sans-serif;color:var(--bb-text);background:var(--bb-background)}\
html{scroll-behavior:smooth}\
.bb-nav{position:sticky;top:0;display:flex;align-items:center;gap:1rem;padding:0 1.5rem;height:70px;background:var(--bb-surface);border-bottom:1px solid var(--bb-border);z-index:10}\
.bb-nav__menu{display:flex;gap:1rem;margin-left:auto}\
.bb-nav__link{color:var(--bb-muted);text-decoration:none}\
.bb-nav__link.is-active{color:var(--bb-primary);font-weight:600}\
.bb-nav__toggle{display:none}\
.bb-section{padding:4rem 1.5rem;max-width:1100px;margin:0 auto}\
.bb-features__grid,.bb-pricing__grid,.bb-stats{display:grid;gap:1.5rem;grid-template-columns:repeat(auto-fit,minmax(220px,1fr))}\
.bb-counter{font-size:2.5rem;font-weight:700;color:var(--bb-primary)}\
.bb-plan--highlighted{border:2px solid var(--bb-primary)}\
.bb-field{display:flex;flex-direction:column;gap:.25rem;margin-bottom:1rem}\
.bb-field__error{color:var(--bb-danger);margin:0}\
.bb-skeleton{display:block;background:var(--bb-skeleton);border-radius:4px;min-height:1em}\
.bb-modal-backdrop{position:fixed;inset:0;background:rgba(15,23,42,.5);display:grid;place-items:center}\
.bb-modal{background:var(--bb-surface);border-radius:12px;padding:1.5rem;min-width:320px}\
@media (max-width:720px){.bb-nav__toggle{display:block;margin-left:auto}.bb-nav__menu{display:none}.bb-nav__menu.is-open{display:flex;flex-direction:column}}\
@media (prefers-reduced-motion:reduce){html{scroll-behavior:auto}}";

/// `<!doctype html>` document with the theme variables inlined.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    title: &'a str,
    theme: &'a Theme,
    hydrate: bool,
}

impl<'a> Document<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            theme,
            hydrate: true,
        }
    }

    /// Include the wasm hydration script (on by default).
    #[must_use]
    pub fn hydrate(mut self, hydrate: bool) -> Self {
        self.hydrate = hydrate;
        self
    }

    pub fn render(&self, body: &(impl Widget + ?Sized)) -> String {
        let mut out = Markup::with_capacity(16 * 1024);
        out.raw("<!doctype html>");
        out.open("html", &Attrs::new().attr("lang", "pt-BR"));
        out.open("head", &Attrs::new());
        out.void("meta", &Attrs::new().attr("charset", "utf-8"));
        out.void(
            "meta",
            &Attrs::new()
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        );
        out.element("title", &Attrs::new(), self.title);
        out.open("style", &Attrs::new());
        out.raw(":root{")
            .raw(&self.theme.css_variables())
            .raw("}")
            .raw(BASE_CSS);
        out.close("style");
        out.close("head");
        out.open("body", &Attrs::new());
        out.child(body);
        if self.hydrate {
            out.open("script", &Attrs::new().attr("type", "module"));
            out.raw(HYDRATE_SCRIPT);
            out.close("script");
        }
        out.close("body");
        out.close("html");
        out.into_string()
    }
}
