#![forbid(unsafe_code)]

//! Variant/size keyed style functions for buttons and badges.
//!
//! [`style_for`] is a pure function of `(variant, size)` against a theme. The
//! widgets layer calls it at render time; nothing here knows about HTML.

use crate::color::{Rgb, best_text_color};
use crate::descriptor::{Cursor, Paint, StyleDescriptor};
use crate::theme::Theme;

/// Visual emphasis of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Ghost,
    Danger,
}

impl ButtonVariant {
    pub const ALL: [ButtonVariant; 5] = [
        ButtonVariant::Primary,
        ButtonVariant::Secondary,
        ButtonVariant::Outline,
        ButtonVariant::Ghost,
        ButtonVariant::Danger,
    ];

    /// Modifier used in `bb-btn--<name>` class names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Outline => "outline",
            ButtonVariant::Ghost => "ghost",
            ButtonVariant::Danger => "danger",
        }
    }
}

/// Button size step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl ButtonSize {
    pub const ALL: [ButtonSize; 3] = [ButtonSize::Sm, ButtonSize::Md, ButtonSize::Lg];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ButtonSize::Sm => "sm",
            ButtonSize::Md => "md",
            ButtonSize::Lg => "lg",
        }
    }

    /// `(vertical, horizontal)` padding, font size and radius in px.
    #[must_use]
    pub const fn metrics(self) -> ((u16, u16), u16, u16) {
        match self {
            ButtonSize::Sm => ((6, 12), 14, 6),
            ButtonSize::Md => ((10, 20), 16, 8),
            ButtonSize::Lg => ((14, 28), 18, 10),
        }
    }
}

/// Tone of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BadgeTone {
    #[default]
    Neutral,
    Success,
    Warning,
    Danger,
    Info,
}

impl BadgeTone {
    pub const ALL: [BadgeTone; 5] = [
        BadgeTone::Neutral,
        BadgeTone::Success,
        BadgeTone::Warning,
        BadgeTone::Danger,
        BadgeTone::Info,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            BadgeTone::Neutral => "neutral",
            BadgeTone::Success => "success",
            BadgeTone::Warning => "warning",
            BadgeTone::Danger => "danger",
            BadgeTone::Info => "info",
        }
    }

    fn color(self, theme: &Theme) -> Rgb {
        match self {
            BadgeTone::Neutral => theme.muted,
            BadgeTone::Success => theme.success,
            BadgeTone::Warning => theme.warning,
            BadgeTone::Danger => theme.danger,
            BadgeTone::Info => theme.info,
        }
    }
}

/// Button style for the default theme.
#[must_use]
pub fn style_for(variant: ButtonVariant, size: ButtonSize) -> StyleDescriptor {
    style_for_theme(&Theme::default(), variant, size)
}

/// Button style for an explicit theme.
#[must_use]
pub fn style_for_theme(theme: &Theme, variant: ButtonVariant, size: ButtonSize) -> StyleDescriptor {
    let ((pad_v, pad_h), font, radius) = size.metrics();
    let base = StyleDescriptor::new()
        .padding(pad_v, pad_h)
        .font_size(font)
        .font_weight(600)
        .radius(radius)
        .cursor(Cursor::Pointer);

    let solid = |bg: Rgb| {
        StyleDescriptor::new()
            .background(Paint::Color(bg))
            .foreground(best_text_color(bg))
            .border(Paint::Color(bg))
    };

    let colors = match variant {
        ButtonVariant::Primary => solid(theme.primary),
        ButtonVariant::Secondary => solid(theme.secondary),
        ButtonVariant::Danger => solid(theme.danger),
        ButtonVariant::Outline => StyleDescriptor::new()
            .background(Paint::Transparent)
            .foreground(theme.primary)
            .border(Paint::Color(theme.primary)),
        ButtonVariant::Ghost => StyleDescriptor::new()
            .background(Paint::Transparent)
            .foreground(theme.text)
            .border(Paint::Transparent),
    };
    base.patch(&colors)
}

/// Badge style: tinted background, tone-colored text, pill radius.
#[must_use]
pub fn badge_style(theme: &Theme, tone: BadgeTone) -> StyleDescriptor {
    let color = tone.color(theme);
    StyleDescriptor::new()
        .background(Paint::Color(color.lighten(0.85)))
        .foreground(color.darken(0.2))
        .padding(2, 10)
        .font_size(12)
        .font_weight(600)
        .radius(999)
}
