#![forbid(unsafe_code)]

//! Theme with semantic color slots.
//!
//! Components never hard-code colors; they read slots from a [`Theme`]. The
//! default theme is the Bibliotech brand palette.

use crate::color::Rgb;

/// Semantic color slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Theme {
    /// Main brand color (primary buttons, links, active nav item).
    pub primary: Rgb,
    /// Secondary brand color (secondary buttons, gradient end).
    pub secondary: Rgb,
    /// Accent used by gradient text highlights.
    pub accent: Rgb,
    /// Page background.
    pub background: Rgb,
    /// Card and input background.
    pub surface: Rgb,
    /// Borders and dividers.
    pub border: Rgb,
    /// Body text.
    pub text: Rgb,
    /// Secondary text (captions, placeholders).
    pub muted: Rgb,
    pub success: Rgb,
    pub warning: Rgb,
    pub danger: Rgb,
    pub info: Rgb,
    /// Skeleton placeholder base color.
    pub skeleton: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Rgb::from_hex(0x2563eb),
            secondary: Rgb::from_hex(0x7c3aed),
            accent: Rgb::from_hex(0x06b6d4),
            background: Rgb::from_hex(0xffffff),
            surface: Rgb::from_hex(0xf8fafc),
            border: Rgb::from_hex(0xe2e8f0),
            text: Rgb::from_hex(0x0f172a),
            muted: Rgb::from_hex(0x64748b),
            success: Rgb::from_hex(0x16a34a),
            warning: Rgb::from_hex(0xd97706),
            danger: Rgb::from_hex(0xdc2626),
            info: Rgb::from_hex(0x0284c7),
            skeleton: Rgb::from_hex(0xe2e8f0),
        }
    }
}

impl Theme {
    /// Start a builder from the default palette.
    #[must_use]
    pub fn builder() -> ThemeBuilder {
        ThemeBuilder {
            theme: Theme::default(),
        }
    }

    /// CSS custom properties (`--bb-primary: #2563eb; ...`) for a `:root` rule.
    #[must_use]
    pub fn css_variables(&self) -> String {
        let slots = [
            ("primary", self.primary),
            ("secondary", self.secondary),
            ("accent", self.accent),
            ("background", self.background),
            ("surface", self.surface),
            ("border", self.border),
            ("text", self.text),
            ("muted", self.muted),
            ("success", self.success),
            ("warning", self.warning),
            ("danger", self.danger),
            ("info", self.info),
            ("skeleton", self.skeleton),
        ];
        slots
            .iter()
            .map(|(name, color)| format!("--bb-{name}: {};", color.to_css()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Builder for [`Theme`].
#[derive(Debug, Clone)]
pub struct ThemeBuilder {
    theme: Theme,
}

impl ThemeBuilder {
    /// Start from an existing theme.
    #[must_use]
    pub fn from_theme(theme: Theme) -> Self {
        Self { theme }
    }

    #[must_use]
    pub fn primary(mut self, color: Rgb) -> Self {
        self.theme.primary = color;
        self
    }

    #[must_use]
    pub fn secondary(mut self, color: Rgb) -> Self {
        self.theme.secondary = color;
        self
    }

    #[must_use]
    pub fn accent(mut self, color: Rgb) -> Self {
        self.theme.accent = color;
        self
    }

    #[must_use]
    pub fn text(mut self, color: Rgb) -> Self {
        self.theme.text = color;
        self
    }

    #[must_use]
    pub fn build(self) -> Theme {
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::contrast_ratio;

    #[test]
    fn builder_from_theme_preserves_base_fields() {
        let base = Theme::builder().primary(Rgb::new(10, 20, 30)).build();
        let updated = ThemeBuilder::from_theme(base).text(Rgb::new(70, 80, 90)).build();
        assert_eq!(updated.primary, base.primary);
        assert_eq!(updated.background, base.background);
        assert_eq!(updated.text, Rgb::new(70, 80, 90));
    }

    #[test]
    fn css_variables_lists_every_slot() {
        let vars = Theme::default().css_variables();
        assert!(vars.starts_with("--bb-primary: #2563eb;"));
        assert_eq!(vars.matches("--bb-").count(), 13);
    }

    #[test]
    fn default_text_is_readable_on_background() {
        let theme = Theme::default();
        assert!(contrast_ratio(theme.text, theme.background) >= 4.5);
    }
}
