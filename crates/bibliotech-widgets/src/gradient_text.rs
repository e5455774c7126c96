#![forbid(unsafe_code)]

//! Text painted with a gradient that follows the pointer once hydrated.
//!
//! The static markup carries the resting linear gradient. The stops are also
//! serialized into `data-gradient-stops` (`#rrggbb@pos;...`) so the web layer
//! can recompute [`bibliotech_style::gradient_for_pointer`] on pointer moves.

use bibliotech_style::{ColorGradient, GradientSpec, RESTING_ANGLE_DEG, Theme};

use crate::Widget;
use crate::markup::{Attrs, Markup};

#[derive(Debug, Clone, PartialEq)]
pub struct GradientText {
    text: String,
    tag: &'static str,
    gradient: ColorGradient,
}

impl GradientText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: "span",
            gradient: ColorGradient::brand(&Theme::default()),
        }
    }

    /// Wrap in a different element (e.g. `h1`).
    #[must_use]
    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }

    #[must_use]
    pub fn gradient(mut self, gradient: ColorGradient) -> Self {
        self.gradient = gradient;
        self
    }

    /// `#rrggbb@pos` pairs joined by `;`.
    pub fn stops_attr(&self) -> String {
        self.gradient
            .stops()
            .iter()
            .map(|(pos, color)| format!("{}@{}", color.to_css(), pos))
            .collect::<Vec<_>>()
            .join(";")
    }

    fn resting_style(&self) -> String {
        let spec = GradientSpec::Linear {
            angle_deg: RESTING_ANGLE_DEG,
            stops: self.gradient.clone(),
        };
        format!(
            "background-image: {}; -webkit-background-clip: text; background-clip: text; color: transparent",
            spec.to_css()
        )
    }
}

impl Widget for GradientText {
    fn render(&self, out: &mut Markup) {
        out.element(
            self.tag,
            &Attrs::new()
                .class("bb-gradient-text")
                .style(self.resting_style())
                .flag("data-gradient-text", true)
                .attr("data-gradient-stops", self.stops_attr()),
            &self.text,
        );
    }
}
