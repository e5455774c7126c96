//! Interaction-state style variants.
//!
//! [`InteractiveStyle`] holds optional overrides for hover, focus, active
//! (pressed), disabled and loading. Resolving a state patches the matching
//! override on top of the base descriptor with [`StyleDescriptor::patch`], so
//! the more specific state wins for every property it sets.
//!
//! # Example
//!
//! ```
//! use bibliotech_style::{ButtonSize, ButtonVariant, InteractionState, InteractiveStyle};
//!
//! let button = InteractiveStyle::for_button(ButtonVariant::Primary, ButtonSize::Md);
//! let disabled = button.resolve(InteractionState::Disabled);
//! assert_eq!(disabled.opacity, Some(0.5));
//! ```

#![forbid(unsafe_code)]

use crate::descriptor::{Cursor, StyleDescriptor};
use crate::theme::Theme;
use crate::variant::{ButtonSize, ButtonVariant, style_for_theme};

/// The interaction state of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionState {
    #[default]
    Normal,
    Hovered,
    Focused,
    Active,
    Disabled,
    /// An async action is in flight; behaves like disabled with a busy cursor.
    Loading,
    FocusedHovered,
}

impl InteractionState {
    /// Whether the component accepts input in this state.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        !matches!(self, InteractionState::Disabled | InteractionState::Loading)
    }
}

/// Style overrides keyed by interaction state.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveStyle {
    pub normal: StyleDescriptor,
    pub hover: Option<StyleDescriptor>,
    pub focus: Option<StyleDescriptor>,
    pub active: Option<StyleDescriptor>,
    pub disabled: Option<StyleDescriptor>,
    pub loading: Option<StyleDescriptor>,
}

impl InteractiveStyle {
    pub fn new(normal: StyleDescriptor) -> Self {
        Self {
            normal,
            hover: None,
            focus: None,
            active: None,
            disabled: None,
            loading: None,
        }
    }

    /// Button states for the default theme.
    #[must_use]
    pub fn for_button(variant: ButtonVariant, size: ButtonSize) -> Self {
        Self::for_button_themed(&Theme::default(), variant, size)
    }

    /// Button states: hover darkens the fill 10%, active 20%, focus adds a
    /// ring in the primary color, disabled and loading fade to 50%.
    #[must_use]
    pub fn for_button_themed(theme: &Theme, variant: ButtonVariant, size: ButtonSize) -> Self {
        let normal = style_for_theme(theme, variant, size);
        let shade = |amount: f64| {
            let mut s = StyleDescriptor::new();
            s.background = normal.background.map(|p| p.darken(amount));
            s
        };
        Self::new(normal)
            .hover(shade(0.1))
            .active(shade(0.2))
            .focused(StyleDescriptor::new().outline(theme.primary.lighten(0.4)))
            .disabled(StyleDescriptor::new().opacity(0.5).cursor(Cursor::NotAllowed))
            .loading(StyleDescriptor::new().opacity(0.5).cursor(Cursor::Progress))
    }

    #[must_use]
    pub fn hover(mut self, style: StyleDescriptor) -> Self {
        self.hover = Some(style);
        self
    }

    #[must_use]
    pub fn focused(mut self, style: StyleDescriptor) -> Self {
        self.focus = Some(style);
        self
    }

    #[must_use]
    pub fn active(mut self, style: StyleDescriptor) -> Self {
        self.active = Some(style);
        self
    }

    #[must_use]
    pub fn disabled(mut self, style: StyleDescriptor) -> Self {
        self.disabled = Some(style);
        self
    }

    #[must_use]
    pub fn loading(mut self, style: StyleDescriptor) -> Self {
        self.loading = Some(style);
        self
    }

    /// Resolve the descriptor for `state`.
    ///
    /// `FocusedHovered` applies focus then hover, so hover wins conflicts.
    #[must_use]
    pub fn resolve(&self, state: InteractionState) -> StyleDescriptor {
        let overlay = |base: StyleDescriptor, layer: &Option<StyleDescriptor>| match layer {
            Some(l) => base.patch(l),
            None => base,
        };
        let base = self.normal;
        match state {
            InteractionState::Normal => base,
            InteractionState::Hovered => overlay(base, &self.hover),
            InteractionState::Focused => overlay(base, &self.focus),
            InteractionState::Active => overlay(base, &self.active),
            InteractionState::Disabled => overlay(base, &self.disabled),
            InteractionState::Loading => overlay(base, &self.loading),
            InteractionState::FocusedHovered => overlay(overlay(base, &self.focus), &self.hover),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::descriptor::Paint;

    #[test]
    fn normal_is_base() {
        let style = InteractiveStyle::for_button(ButtonVariant::Primary, ButtonSize::Md);
        assert_eq!(
            style.resolve(InteractionState::Normal),
            style_for_theme(&Theme::default(), ButtonVariant::Primary, ButtonSize::Md)
        );
    }

    #[test]
    fn missing_override_falls_back() {
        let style = InteractiveStyle::new(StyleDescriptor::new().foreground(Rgb::WHITE));
        assert_eq!(style.resolve(InteractionState::Hovered), style.normal);
        assert_eq!(style.resolve(InteractionState::FocusedHovered), style.normal);
    }

    #[test]
    fn hover_darkens_solid_fill() {
        let style = InteractiveStyle::for_button(ButtonVariant::Primary, ButtonSize::Md);
        let normal = style.resolve(InteractionState::Normal).background;
        let hovered = style.resolve(InteractionState::Hovered).background;
        let (Some(Paint::Color(a)), Some(Paint::Color(b))) = (normal, hovered) else {
            panic!("primary buttons are solid");
        };
        assert!(b.relative_luminance() < a.relative_luminance());
    }

    #[test]
    fn focused_hovered_keeps_ring_and_hover_fill() {
        let style = InteractiveStyle::for_button(ButtonVariant::Secondary, ButtonSize::Sm);
        let both = style.resolve(InteractionState::FocusedHovered);
        assert!(both.outline.is_some());
        assert_eq!(both.background, style.resolve(InteractionState::Hovered).background);
    }

    #[test]
    fn loading_is_not_interactive() {
        assert!(!InteractionState::Loading.is_interactive());
        assert!(!InteractionState::Disabled.is_interactive());
        assert!(InteractionState::Hovered.is_interactive());
        let style = InteractiveStyle::for_button(ButtonVariant::Ghost, ButtonSize::Lg);
        assert_eq!(
            style.resolve(InteractionState::Loading).cursor,
            Some(Cursor::Progress)
        );
    }
}
