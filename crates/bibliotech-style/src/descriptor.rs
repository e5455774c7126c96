#![forbid(unsafe_code)]

//! Backend-agnostic style descriptors.
//!
//! A [`StyleDescriptor`] is a flat set of optional properties. `None` means
//! "inherit"; [`StyleDescriptor::patch`] overlays one descriptor on another
//! with the same semantics as CSS specificity (the patch wins for every field
//! it sets). [`StyleDescriptor::to_css`] serializes the set fields into an
//! inline `style` attribute value in a fixed property order.

use crate::color::{Rgb, trim_float};

/// A fill: a solid color or transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Color(Rgb),
    Transparent,
}

impl Paint {
    fn to_css(self) -> String {
        match self {
            Paint::Color(c) => c.to_css(),
            Paint::Transparent => "transparent".to_string(),
        }
    }

    /// Darken a solid color; transparent stays transparent.
    #[must_use]
    pub fn darken(self, amount: f64) -> Paint {
        match self {
            Paint::Color(c) => Paint::Color(c.darken(amount)),
            Paint::Transparent => Paint::Transparent,
        }
    }
}

/// Pointer cursor hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Pointer,
    NotAllowed,
    Progress,
}

impl Cursor {
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Cursor::Pointer => "pointer",
            Cursor::NotAllowed => "not-allowed",
            Cursor::Progress => "progress",
        }
    }
}

/// Flat, mergeable style properties.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StyleDescriptor {
    pub background: Option<Paint>,
    pub foreground: Option<Rgb>,
    /// 1px solid border color.
    pub border: Option<Paint>,
    /// Focus ring color (2px outline).
    pub outline: Option<Rgb>,
    /// Vertical and horizontal padding in px.
    pub padding_px: Option<(u16, u16)>,
    pub font_size_px: Option<u16>,
    pub font_weight: Option<u16>,
    pub radius_px: Option<u16>,
    pub opacity: Option<f64>,
    pub cursor: Option<Cursor>,
    pub full_width: Option<bool>,
}

impl StyleDescriptor {
    /// An empty descriptor (every property inherits).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            background: None,
            foreground: None,
            border: None,
            outline: None,
            padding_px: None,
            font_size_px: None,
            font_weight: None,
            radius_px: None,
            opacity: None,
            cursor: None,
            full_width: None,
        }
    }

    #[must_use]
    pub const fn background(mut self, paint: Paint) -> Self {
        self.background = Some(paint);
        self
    }

    #[must_use]
    pub const fn foreground(mut self, color: Rgb) -> Self {
        self.foreground = Some(color);
        self
    }

    #[must_use]
    pub const fn border(mut self, paint: Paint) -> Self {
        self.border = Some(paint);
        self
    }

    #[must_use]
    pub const fn outline(mut self, color: Rgb) -> Self {
        self.outline = Some(color);
        self
    }

    #[must_use]
    pub const fn padding(mut self, vertical: u16, horizontal: u16) -> Self {
        self.padding_px = Some((vertical, horizontal));
        self
    }

    #[must_use]
    pub const fn font_size(mut self, px: u16) -> Self {
        self.font_size_px = Some(px);
        self
    }

    #[must_use]
    pub const fn font_weight(mut self, weight: u16) -> Self {
        self.font_weight = Some(weight);
        self
    }

    #[must_use]
    pub const fn radius(mut self, px: u16) -> Self {
        self.radius_px = Some(px);
        self
    }

    #[must_use]
    pub const fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    #[must_use]
    pub const fn cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    #[must_use]
    pub const fn full_width(mut self, full: bool) -> Self {
        self.full_width = Some(full);
        self
    }

    /// Overlay `other` on `self`; fields set in `other` win.
    #[must_use]
    pub fn patch(self, other: &StyleDescriptor) -> StyleDescriptor {
        StyleDescriptor {
            background: other.background.or(self.background),
            foreground: other.foreground.or(self.foreground),
            border: other.border.or(self.border),
            outline: other.outline.or(self.outline),
            padding_px: other.padding_px.or(self.padding_px),
            font_size_px: other.font_size_px.or(self.font_size_px),
            font_weight: other.font_weight.or(self.font_weight),
            radius_px: other.radius_px.or(self.radius_px),
            opacity: other.opacity.or(self.opacity),
            cursor: other.cursor.or(self.cursor),
            full_width: other.full_width.or(self.full_width),
        }
    }

    /// True if no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == StyleDescriptor::new()
    }

    /// Serialize as an inline `style` attribute value.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut decls: Vec<String> = Vec::new();
        if let Some(bg) = self.background {
            decls.push(format!("background: {}", bg.to_css()));
        }
        if let Some(fg) = self.foreground {
            decls.push(format!("color: {}", fg.to_css()));
        }
        if let Some(border) = self.border {
            decls.push(format!("border: 1px solid {}", border.to_css()));
        }
        if let Some(outline) = self.outline {
            decls.push(format!("outline: 2px solid {}", outline.to_css()));
        }
        if let Some((v, h)) = self.padding_px {
            decls.push(format!("padding: {v}px {h}px"));
        }
        if let Some(size) = self.font_size_px {
            decls.push(format!("font-size: {size}px"));
        }
        if let Some(weight) = self.font_weight {
            decls.push(format!("font-weight: {weight}"));
        }
        if let Some(radius) = self.radius_px {
            decls.push(format!("border-radius: {radius}px"));
        }
        if let Some(opacity) = self.opacity {
            let opacity = if opacity.is_nan() { 1.0 } else { opacity.clamp(0.0, 1.0) };
            decls.push(format!("opacity: {}", trim_float(opacity)));
        }
        if let Some(cursor) = self.cursor {
            decls.push(format!("cursor: {}", cursor.as_css()));
        }
        if self.full_width == Some(true) {
            decls.push("width: 100%".to_string());
        }
        decls.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_descriptor_serializes_to_nothing() {
        assert!(StyleDescriptor::new().is_empty());
        assert_eq!(StyleDescriptor::new().to_css(), "");
    }

    #[test]
    fn patch_overrides_only_set_fields() {
        let base = StyleDescriptor::new()
            .background(Paint::Color(Rgb::BLACK))
            .foreground(Rgb::WHITE)
            .radius(8);
        let over = StyleDescriptor::new().background(Paint::Transparent);
        let merged = base.patch(&over);
        assert_eq!(merged.background, Some(Paint::Transparent));
        assert_eq!(merged.foreground, Some(Rgb::WHITE));
        assert_eq!(merged.radius_px, Some(8));
    }

    #[test]
    fn css_property_order_is_stable() {
        let css = StyleDescriptor::new()
            .cursor(Cursor::Pointer)
            .padding(10, 20)
            .foreground(Rgb::WHITE)
            .opacity(0.5)
            .full_width(true)
            .to_css();
        assert_eq!(
            css,
            "color: #ffffff; padding: 10px 20px; opacity: 0.5; cursor: pointer; width: 100%"
        );
    }

    #[test]
    fn transparent_paint_ignores_darken() {
        assert_eq!(Paint::Transparent.darken(0.5), Paint::Transparent);
        assert_eq!(
            Paint::Color(Rgb::WHITE).darken(1.0),
            Paint::Color(Rgb::BLACK)
        );
    }
}
