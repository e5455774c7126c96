#![forbid(unsafe_code)]

//! Button widget.
//!
//! Renders `<button>` or, with an `href`, an `<a role="button">`. Disabled
//! and loading buttons never carry an `href` and are marked with
//! `disabled` / `aria-disabled`. Loading adds a spinner and `aria-busy`.

use bibliotech_style::{ButtonSize, ButtonVariant, InteractionState, InteractiveStyle, StyleDescriptor, Theme};

use crate::Widget;
use crate::markup::{Attrs, Markup};

/// A clickable button or link styled as one.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    label: String,
    variant: ButtonVariant,
    size: ButtonSize,
    state: InteractionState,
    loading: bool,
    disabled: bool,
    href: Option<String>,
    full_width: bool,
    button_type: &'static str,
    id: Option<String>,
    theme: Theme,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            state: InteractionState::Normal,
            loading: false,
            disabled: false,
            href: None,
            full_width: false,
            button_type: "button",
            id: None,
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    /// Visual state used when neither loading nor disabled.
    #[must_use]
    pub fn state(mut self, state: InteractionState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    #[must_use]
    pub fn full_width(mut self, full: bool) -> Self {
        self.full_width = full;
        self
    }

    /// Mark as a form submit button.
    #[must_use]
    pub fn submit(mut self) -> Self {
        self.button_type = "submit";
        self
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Loading wins over disabled, disabled over the visual state.
    pub fn effective_state(&self) -> InteractionState {
        if self.loading {
            InteractionState::Loading
        } else if self.disabled {
            InteractionState::Disabled
        } else {
            self.state
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.effective_state().is_interactive()
    }

    /// Resolved inline style for the current state.
    pub fn style(&self) -> StyleDescriptor {
        let resolved = InteractiveStyle::for_button_themed(&self.theme, self.variant, self.size)
            .resolve(self.effective_state());
        if self.full_width {
            resolved.full_width(true)
        } else {
            resolved
        }
    }

    fn class_list(&self) -> String {
        let mut class = format!(
            "bb-btn bb-btn--{} bb-btn--{}",
            self.variant.name(),
            self.size.name()
        );
        if self.full_width {
            class.push_str(" bb-btn--block");
        }
        if self.loading {
            class.push_str(" is-loading");
        }
        class
    }
}

impl Widget for Button {
    fn render(&self, out: &mut Markup) {
        let interactive = self.is_interactive();
        let style = self.style().to_css();
        let base = Attrs::new()
            .opt("id", self.id.as_deref())
            .class(self.class_list())
            .style(style);

        match &self.href {
            Some(href) => {
                let attrs = base
                    .attr("role", "button")
                    .opt("href", interactive.then_some(href.as_str()))
                    .opt("aria-disabled", (!interactive).then_some("true"))
                    .opt("aria-busy", self.loading.then_some("true"));
                out.open("a", &attrs);
            }
            None => {
                let attrs = base
                    .attr("type", self.button_type)
                    .flag("disabled", !interactive)
                    .opt("aria-busy", self.loading.then_some("true"));
                out.open("button", &attrs);
            }
        }
        if self.loading {
            out.open(
                "span",
                &Attrs::new().class("bb-spinner").attr("aria-hidden", "true"),
            )
            .close("span");
        }
        out.text(&self.label);
        out.close(if self.href.is_some() { "a" } else { "button" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_button_markup() {
        let html = Button::new("Entrar").to_html();
        assert!(html.starts_with(r#"<button class="bb-btn bb-btn--primary bb-btn--md" style=""#));
        assert!(html.contains(r#"type="button""#));
        assert!(html.ends_with(">Entrar</button>"));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn link_button_keeps_href() {
        let html = Button::new("Começar agora")
            .variant(ButtonVariant::Secondary)
            .size(ButtonSize::Lg)
            .href("#planos")
            .to_html();
        assert!(html.starts_with("<a "));
        assert!(html.contains(r##"href="#planos""##));
        assert!(html.contains("bb-btn--secondary bb-btn--lg"));
    }

    #[test]
    fn disabled_link_drops_href() {
        let html = Button::new("Assinar").href("#planos").disabled(true).to_html();
        assert!(!html.contains("href="));
        assert!(html.contains(r#"aria-disabled="true""#));
    }

    #[test]
    fn loading_renders_spinner_and_busy() {
        let button = Button::new("Salvar").submit().loading(true).disabled(true);
        assert_eq!(button.effective_state(), InteractionState::Loading);
        let html = button.to_html();
        assert!(html.contains(r#"type="submit""#));
        assert!(html.contains(" disabled"));
        assert!(html.contains(r#"aria-busy="true""#));
        assert!(html.contains(r#"<span class="bb-spinner" aria-hidden="true"></span>Salvar"#));
        assert!(html.contains("cursor: progress"));
    }

    #[test]
    fn full_width_adds_class_and_width() {
        let button = Button::new("Enviar").full_width(true);
        assert_eq!(button.style().full_width, Some(true));
        assert!(button.to_html().contains("bb-btn--block"));
        assert!(button.to_html().contains("width: 100%"));
    }

    #[test]
    fn label_is_escaped() {
        let html = Button::new("<script>").to_html();
        assert!(html.contains("&lt;script&gt;"));
    }
}
