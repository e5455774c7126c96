#![forbid(unsafe_code)]

//! Status badge.

use bibliotech_style::{BadgeTone, Theme, badge_style};

use crate::Widget;
use crate::markup::{Attrs, Markup};

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    text: String,
    tone: BadgeTone,
    theme: Theme,
}

impl Badge {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: BadgeTone::default(),
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub fn tone(mut self, tone: BadgeTone) -> Self {
        self.tone = tone;
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

impl Widget for Badge {
    fn render(&self, out: &mut Markup) {
        out.element(
            "span",
            &Attrs::new()
                .class(format!("bb-badge bb-badge--{}", self.tone.name()))
                .style(badge_style(&self.theme, self.tone).to_css()),
            &self.text,
        );
    }
}
