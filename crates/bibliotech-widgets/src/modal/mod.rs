#![forbid(unsafe_code)]

//! Dialog overlay.
//!
//! A [`Modal`] renders a backdrop and a `role="dialog"` container. Dismissal
//! is decided by [`Modal::should_dismiss`] from a [`ModalEvent`]; the host
//! then starts the closing transition on its [`ModalAnimationState`].

mod animation;

pub use animation::{ModalAnimationConfig, ModalAnimationPhase, ModalAnimationState};

use crate::Widget;
use crate::markup::{Attrs, Markup};

/// User actions that may close a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    BackdropClick,
    Escape,
    CloseButton,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Modal {
    id: String,
    title: String,
    body: Markup,
    dismiss_on_backdrop: bool,
    dismiss_on_escape: bool,
    state: ModalAnimationState,
    config: ModalAnimationConfig,
}

impl Modal {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: Markup::new(),
            dismiss_on_backdrop: true,
            dismiss_on_escape: true,
            state: ModalAnimationState::new(),
            config: ModalAnimationConfig::default(),
        }
    }

    /// Body markup, rendered verbatim inside the dialog.
    #[must_use]
    pub fn body(mut self, body: Markup) -> Self {
        self.body = body;
        self
    }

    /// Shortcut for a fully open or fully closed modal.
    #[must_use]
    pub fn open(mut self, open: bool) -> Self {
        self.state = if open {
            ModalAnimationState::open()
        } else {
            ModalAnimationState::new()
        };
        self
    }

    #[must_use]
    pub fn animation(mut self, state: ModalAnimationState, config: ModalAnimationConfig) -> Self {
        self.state = state;
        self.config = config;
        self
    }

    #[must_use]
    pub fn dismiss_on_backdrop(mut self, dismiss: bool) -> Self {
        self.dismiss_on_backdrop = dismiss;
        self
    }

    #[must_use]
    pub fn dismiss_on_escape(mut self, dismiss: bool) -> Self {
        self.dismiss_on_escape = dismiss;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    /// Whether `event` should start the closing transition.
    pub fn should_dismiss(&self, event: ModalEvent) -> bool {
        if !self.state.is_visible() || self.state.phase() == ModalAnimationPhase::Closing {
            return false;
        }
        match event {
            ModalEvent::BackdropClick => self.dismiss_on_backdrop,
            ModalEvent::Escape => self.dismiss_on_escape,
            ModalEvent::CloseButton => true,
        }
    }

    fn title_id(&self) -> String {
        format!("{}-title", self.id)
    }
}

impl Widget for Modal {
    fn render(&self, out: &mut Markup) {
        if !self.state.is_visible() {
            return;
        }
        let opacity = self.state.opacity(&self.config);
        let scale = self.state.scale(&self.config);
        let title_id = self.title_id();

        out.open(
            "div",
            &Attrs::new()
                .class("bb-modal-backdrop")
                .style(format!("opacity: {opacity:.3}"))
                .opt(
                    "data-dismiss",
                    self.dismiss_on_backdrop.then_some("backdrop"),
                ),
        );
        out.open(
            "div",
            &Attrs::new()
                .attr("id", self.id.as_str())
                .class("bb-modal")
                .style(format!("opacity: {opacity:.3}; transform: scale({scale:.3})"))
                .attr("role", "dialog")
                .attr("aria-modal", "true")
                .attr("aria-labelledby", title_id.as_str())
                .opt(
                    "data-dismiss-escape",
                    self.dismiss_on_escape.then_some("true"),
                ),
        );
        out.open("header", &Attrs::new().class("bb-modal__header"));
        out.element(
            "h2",
            &Attrs::new().attr("id", title_id.as_str()).class("bb-modal__title"),
            &self.title,
        );
        out.element(
            "button",
            &Attrs::new()
                .attr("type", "button")
                .class("bb-modal__close")
                .attr("aria-label", "Fechar")
                .flag("data-modal-close", true),
            "×",
        );
        out.close("header");
        out.open("div", &Attrs::new().class("bb-modal__body"))
            .raw(self.body.as_str())
            .close("div");
        out.close("div").close("div");
    }
}

impl Default for Modal {
    fn default() -> Self {
        Self::new("bb-modal", "")
    }
}
