#![forbid(unsafe_code)]

//! Loading placeholders.
//!
//! Skeletons are decorative: every element carries `aria-hidden="true"`.
//! A multi-line skeleton shortens its last line to 60% so it reads as a
//! paragraph.

use bibliotech_style::Theme;

use crate::Widget;
use crate::markup::{Attrs, Markup};

/// Width of the last line in a multi-line skeleton, in percent.
pub const LAST_LINE_PERCENT: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkeletonShape {
    #[default]
    Line,
    Circle,
    Block,
}

impl SkeletonShape {
    const fn name(self) -> &'static str {
        match self {
            SkeletonShape::Line => "line",
            SkeletonShape::Circle => "circle",
            SkeletonShape::Block => "block",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    shape: SkeletonShape,
    /// Width in px; `None` fills the container.
    width_px: Option<u16>,
    height_px: u16,
    lines: usize,
    theme: Theme,
}

impl Skeleton {
    pub fn new(shape: SkeletonShape) -> Self {
        let height_px = match shape {
            SkeletonShape::Line => 16,
            SkeletonShape::Circle => 48,
            SkeletonShape::Block => 120,
        };
        Self {
            shape,
            width_px: None,
            height_px,
            lines: 1,
            theme: Theme::default(),
        }
    }

    /// A paragraph of `lines` text lines.
    pub fn lines(lines: usize) -> Self {
        Self::new(SkeletonShape::Line).line_count(lines)
    }

    #[must_use]
    pub fn width(mut self, px: u16) -> Self {
        self.width_px = Some(px);
        self
    }

    #[must_use]
    pub fn height(mut self, px: u16) -> Self {
        self.height_px = px;
        self
    }

    /// Only meaningful for [`SkeletonShape::Line`]; clamped to at least 1.
    #[must_use]
    pub fn line_count(mut self, lines: usize) -> Self {
        self.lines = lines.max(1);
        self
    }

    fn element_style(&self, width: &str) -> String {
        let radius = match self.shape {
            SkeletonShape::Circle => "50%",
            SkeletonShape::Line => "4px",
            SkeletonShape::Block => "8px",
        };
        // Circles are square boxes.
        let height = match (self.shape, self.width_px) {
            (SkeletonShape::Circle, Some(w)) => w,
            _ => self.height_px,
        };
        format!(
            "width: {width}; height: {height}px; border-radius: {radius}; background: {}",
            self.theme.skeleton.to_css()
        )
    }

    fn render_one(&self, out: &mut Markup, width: &str) {
        out.open(
            "div",
            &Attrs::new()
                .class(format!("bb-skeleton bb-skeleton--{}", self.shape.name()))
                .style(self.element_style(width))
                .attr("aria-hidden", "true"),
        )
        .close("div");
    }
}

impl Widget for Skeleton {
    fn render(&self, out: &mut Markup) {
        let full = match (self.shape, self.width_px) {
            (_, Some(w)) => format!("{w}px"),
            (SkeletonShape::Circle, None) => format!("{}px", self.height_px),
            (_, None) => "100%".to_string(),
        };
        if self.shape != SkeletonShape::Line || self.lines == 1 {
            self.render_one(out, &full);
            return;
        }
        out.open(
            "div",
            &Attrs::new()
                .class("bb-skeleton-group")
                .attr("aria-hidden", "true"),
        );
        for i in 0..self.lines {
            if i + 1 == self.lines {
                self.render_one(out, &format!("{LAST_LINE_PERCENT}%"));
            } else {
                self.render_one(out, &full);
            }
        }
        out.close("div");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_shortens_last_line() {
        let html = Skeleton::lines(3).to_html();
        assert_eq!(html.matches("bb-skeleton--line").count(), 3);
        assert_eq!(html.matches("width: 100%").count(), 2);
        assert_eq!(html.matches("width: 60%").count(), 1);
        assert!(html.starts_with(r#"<div class="bb-skeleton-group" aria-hidden="true">"#));
    }

    #[test]
    fn single_line_is_full_width() {
        let html = Skeleton::lines(0).to_html();
        assert_eq!(html.matches("bb-skeleton--line").count(), 1);
        assert!(html.contains("width: 100%"));
    }

    #[test]
    fn circle_is_square() {
        let html = Skeleton::new(SkeletonShape::Circle).width(32).to_html();
        assert!(html.contains("width: 32px; height: 32px; border-radius: 50%"));
    }

    #[test]
    fn every_element_is_hidden_from_assistive_tech() {
        let html = Skeleton::lines(4).to_html();
        assert_eq!(html.matches(r#"aria-hidden="true""#).count(), 5);
    }
}
