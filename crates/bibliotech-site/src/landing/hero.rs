use bibliotech_style::{ButtonSize, ButtonVariant, ColorGradient, Theme};
use bibliotech_widgets::{Attrs, Button, GradientText, Markup, Widget};

/// The `#inicio` section.
#[derive(Debug, Clone, PartialEq)]
pub struct Hero {
    pub headline: String,
    pub subtitle: String,
    pub gradient: ColorGradient,
}

impl Hero {
    pub fn new(theme: &Theme) -> Self {
        Self {
            headline: "A biblioteca da sua escola, organizada".to_string(),
            subtitle: "Catálogo, empréstimos e devoluções num só lugar, sem planilhas."
                .to_string(),
            gradient: ColorGradient::brand(theme),
        }
    }
}

impl Widget for Hero {
    fn render(&self, out: &mut Markup) {
        out.open(
            "section",
            &Attrs::new().attr("id", "inicio").class("bb-section bb-hero"),
        );
        out.child(
            &GradientText::new(self.headline.as_str())
                .tag("h1")
                .gradient(self.gradient.clone()),
        );
        out.element("p", &Attrs::new().class("bb-hero__subtitle"), &self.subtitle);
        out.open("div", &Attrs::new().class("bb-hero__actions"));
        out.child(
            &Button::new("Começar agora")
                .size(ButtonSize::Lg)
                .href("#planos"),
        );
        out.child(
            &Button::new("Fale conosco")
                .variant(ButtonVariant::Outline)
                .size(ButtonSize::Lg)
                .href("#contato"),
        );
        out.close("div");
        out.close("section");
    }
}
