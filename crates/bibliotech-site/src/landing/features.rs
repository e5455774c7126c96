//! The `#produto` section: feature cards plus the animated stats band.

use std::time::Duration;

use bibliotech_core::Easing;
use bibliotech_widgets::{Attrs, CounterDisplay, Markup, Widget, staggered_request};

use crate::config::CounterConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    /// Icon name, rendered as `data-icon` for the stylesheet.
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub label: &'static str,
    pub value: u64,
    pub suffix: &'static str,
}

pub fn default_features() -> Vec<Feature> {
    vec![
        Feature {
            icon: "book",
            title: "Catálogo completo",
            description: "Cadastre livros por ISBN e encontre qualquer exemplar em segundos.",
        },
        Feature {
            icon: "swap",
            title: "Empréstimos sem papel",
            description: "Registre retiradas e devoluções com prazos e lembretes automáticos.",
        },
        Feature {
            icon: "users",
            title: "Alunos e funcionários",
            description: "Importe turmas e acompanhe o histórico de leitura de cada aluno.",
        },
        Feature {
            icon: "chart",
            title: "Relatórios",
            description: "Veja os títulos mais lidos e os atrasos da semana num só painel.",
        },
    ]
}

pub fn default_stats() -> Vec<Stat> {
    vec![
        Stat {
            label: "Escolas atendidas",
            value: 120,
            suffix: "+",
        },
        Stat {
            label: "Livros catalogados",
            value: 85_000,
            suffix: "+",
        },
        Stat {
            label: "Empréstimos por mês",
            value: 2_330,
            suffix: "",
        },
        Stat {
            label: "Satisfação",
            value: 98,
            suffix: "%",
        },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSection {
    pub features: Vec<Feature>,
    pub stats: Vec<Stat>,
    pub duration: Duration,
    pub stagger: Duration,
    pub easing: Easing,
}

impl FeatureSection {
    pub fn new(counters: &CounterConfig) -> Self {
        Self {
            features: default_features(),
            stats: default_stats(),
            duration: counters.duration(),
            stagger: counters.stagger(),
            easing: counters.easing,
        }
    }

    /// One placeholder per stat, delayed by `index * stagger`.
    pub fn counters(&self) -> Vec<CounterDisplay> {
        self.stats
            .iter()
            .enumerate()
            .map(|(index, stat)| {
                let request =
                    staggered_request(stat.value, index, self.duration, self.stagger, self.easing);
                CounterDisplay::new(request)
                    .suffix(stat.suffix)
                    .label(stat.label)
            })
            .collect()
    }
}

impl Widget for FeatureSection {
    fn render(&self, out: &mut Markup) {
        out.open(
            "section",
            &Attrs::new().attr("id", "produto").class("bb-section bb-features"),
        );
        out.element(
            "h2",
            &Attrs::new().class("bb-section__title"),
            "Tudo o que a biblioteca da sua escola precisa",
        );
        out.open("div", &Attrs::new().class("bb-features__grid"));
        for feature in &self.features {
            out.open(
                "article",
                &Attrs::new().class("bb-feature").attr("data-icon", feature.icon),
            );
            out.element("h3", &Attrs::new().class("bb-feature__title"), feature.title);
            out.element("p", &Attrs::new(), feature.description);
            out.close("article");
        }
        out.close("div");
        out.open(
            "div",
            &Attrs::new().class("bb-stats").attr("data-counter-group", "stats"),
        );
        for counter in self.counters() {
            out.child(&counter);
        }
        out.close("div");
        out.close("section");
    }
}
