//! Pricing cards for the `#planos` section.

use bibliotech_style::{BadgeTone, ButtonSize, ButtonVariant};
use bibliotech_widgets::{Attrs, Badge, Button, Markup, Widget, format_counter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BillingCycle {
    #[default]
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    const fn period_label(self) -> &'static str {
        match self {
            Self::Monthly => "/mês",
            Self::Yearly => "/ano",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Monthly => Self::Yearly,
            Self::Yearly => Self::Monthly,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub id: &'static str,
    pub name: &'static str,
    pub monthly_cents: u64,
    pub yearly_cents: u64,
    pub features: Vec<&'static str>,
    pub highlighted: bool,
}

impl Plan {
    pub fn price_cents(&self, cycle: BillingCycle) -> u64 {
        match cycle {
            BillingCycle::Monthly => self.monthly_cents,
            BillingCycle::Yearly => self.yearly_cents,
        }
    }
}

/// Whole percent saved by paying yearly instead of twelve monthly payments.
///
/// Zero when the yearly price is not cheaper or the plan is free.
pub fn yearly_savings_percent(plan: &Plan) -> u8 {
    let twelve = plan.monthly_cents.saturating_mul(12);
    if twelve == 0 || plan.yearly_cents >= twelve {
        return 0;
    }
    let saved = twelve - plan.yearly_cents;
    u8::try_from(saved.saturating_mul(100) / twelve).unwrap_or(100)
}

/// `123450` -> `R$ 1.234,50`.
pub fn format_brl(cents: u64) -> String {
    format!("R$ {},{:02}", format_counter(cents / 100, ""), cents % 100)
}

/// The three plans offered to schools.
pub fn default_plans() -> Vec<Plan> {
    vec![
        Plan {
            id: "basico",
            name: "Básico",
            monthly_cents: 14_990,
            yearly_cents: 149_900,
            features: vec!["1 biblioteca", "Até 500 alunos", "Controle de empréstimos"],
            highlighted: false,
        },
        Plan {
            id: "escolar",
            name: "Escolar",
            monthly_cents: 29_990,
            yearly_cents: 299_900,
            features: vec![
                "Até 3 bibliotecas",
                "Alunos ilimitados",
                "Relatórios de leitura",
                "Suporte por WhatsApp",
            ],
            highlighted: true,
        },
        Plan {
            id: "rede",
            name: "Rede",
            monthly_cents: 59_990,
            yearly_cents: 599_900,
            features: vec![
                "Bibliotecas ilimitadas",
                "Painel da rede de ensino",
                "Integração com secretaria",
                "Gerente de conta",
            ],
            highlighted: false,
        },
    ]
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingSection {
    pub plans: Vec<Plan>,
    pub cycle: BillingCycle,
}

impl Default for PricingSection {
    fn default() -> Self {
        Self {
            plans: default_plans(),
            cycle: BillingCycle::Monthly,
        }
    }
}

impl PricingSection {
    fn render_plan(&self, plan: &Plan, out: &mut Markup) {
        let class = if plan.highlighted {
            "bb-plan bb-plan--highlighted"
        } else {
            "bb-plan"
        };
        out.open(
            "article",
            &Attrs::new().class(class).attr("data-plan", plan.id),
        );
        if plan.highlighted {
            out.child(&Badge::new("Mais escolhido").tone(BadgeTone::Info));
        }
        out.element("h3", &Attrs::new().class("bb-plan__name"), plan.name);
        out.open("p", &Attrs::new().class("bb-plan__price"));
        out.element(
            "strong",
            &Attrs::new(),
            &format_brl(plan.price_cents(self.cycle)),
        );
        out.element("span", &Attrs::new(), self.cycle.period_label());
        out.close("p");
        let savings = yearly_savings_percent(plan);
        if self.cycle == BillingCycle::Yearly && savings > 0 {
            out.child(&Badge::new(format!("Economize {savings}%")).tone(BadgeTone::Success));
        }
        out.open("ul", &Attrs::new().class("bb-plan__features"));
        for feature in &plan.features {
            out.element("li", &Attrs::new(), feature);
        }
        out.close("ul");
        let variant = if plan.highlighted {
            ButtonVariant::Primary
        } else {
            ButtonVariant::Outline
        };
        out.child(
            &Button::new("Quero este plano")
                .variant(variant)
                .size(ButtonSize::Md)
                .href("#contato")
                .full_width(true),
        );
        out.close("article");
    }
}

impl Widget for PricingSection {
    fn render(&self, out: &mut Markup) {
        out.open(
            "section",
            &Attrs::new()
                .attr("id", "planos")
                .class("bb-section bb-pricing")
                .attr("data-billing", self.cycle.name()),
        );
        out.element("h2", &Attrs::new().class("bb-section__title"), "Planos");
        out.open(
            "div",
            &Attrs::new().class("bb-pricing__toggle").attr("role", "group"),
        );
        for cycle in [BillingCycle::Monthly, BillingCycle::Yearly] {
            let label = match cycle {
                BillingCycle::Monthly => "Mensal",
                BillingCycle::Yearly => "Anual",
            };
            let variant = if cycle == self.cycle {
                ButtonVariant::Secondary
            } else {
                ButtonVariant::Ghost
            };
            out.child(&Button::new(label).variant(variant).size(ButtonSize::Sm));
        }
        out.close("div");
        out.open("div", &Attrs::new().class("bb-pricing__grid"));
        for plan in &self.plans {
            self.render_plan(plan, out);
        }
        out.close("div");
        out.close("section");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn brl_formatting() {
        assert_eq!(format_brl(0), "R$ 0,00");
        assert_eq!(format_brl(5), "R$ 0,05");
        assert_eq!(format_brl(14_990), "R$ 149,90");
        assert_eq!(format_brl(123_450), "R$ 1.234,50");
        assert_eq!(format_brl(123_456_789), "R$ 1.234.567,89");
    }

    #[test]
    fn brl_groups_reais_like_counters() {
        for reais in [0u64, 7, 999, 1_000, 85_000, 1_234_567] {
            let expected = format!("R$ {},42", format_counter(reais, ""));
            assert_eq!(format_brl(reais * 100 + 42), expected);
        }
    }

    #[test]
    fn savings() {
        let plans = default_plans();
        // 12 * 149,90 = 1798,80 vs 1499,00.
        assert_eq!(yearly_savings_percent(&plans[0]), 16);
        let free = Plan {
            monthly_cents: 0,
            yearly_cents: 0,
            ..plans[0].clone()
        };
        assert_eq!(yearly_savings_percent(&free), 0);
        let pricier = Plan {
            yearly_cents: 200_000,
            ..plans[0].clone()
        };
        assert_eq!(yearly_savings_percent(&pricier), 0);
    }

    #[test]
    fn exactly_one_plan_is_highlighted() {
        assert_eq!(default_plans().iter().filter(|p| p.highlighted).count(), 1);
    }

    #[test]
    fn yearly_cycle_shows_prices_and_savings() {
        let section = PricingSection {
            cycle: BillingCycle::Yearly,
            ..PricingSection::default()
        };
        let html = section.to_html();
        assert!(html.contains(r#"data-billing="yearly""#));
        assert!(html.contains("R$ 2.999,00"));
        assert!(html.contains("/ano"));
        assert!(html.contains("Economize 16%"));
        assert!(!html.contains("/mês"));
    }

    #[test]
    fn monthly_cycle_hides_savings() {
        let html = PricingSection::default().to_html();
        assert!(html.contains("R$ 299,90"));
        assert!(!html.contains("Economize"));
        assert_eq!(html.matches("bb-plan--highlighted").count(), 1);
        assert_eq!(BillingCycle::Monthly.toggled(), BillingCycle::Yearly);
    }
}
