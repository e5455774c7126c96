//! `components.html`: every kit component in each of its variants.

use std::time::Duration;

use bibliotech_core::{AnimationRequest, Easing};
use bibliotech_style::{BadgeTone, ButtonSize, ButtonVariant, InteractionState, Theme};
use bibliotech_widgets::{
    Attrs, Badge, Button, Checkbox, CounterDisplay, GradientText, InputKind, Markup, Modal,
    ModalAnimationConfig, ModalAnimationState, Skeleton, SkeletonShape, TextInput, Widget,
};

#[derive(Debug, Clone)]
pub struct ComponentGallery {
    theme: Theme,
}

impl ComponentGallery {
    pub fn new(theme: &Theme) -> Self {
        Self {
            theme: theme.clone(),
        }
    }

    fn section(out: &mut Markup, id: &str, title: &str, body: impl FnOnce(&mut Markup)) {
        out.open(
            "section",
            &Attrs::new().attr("id", id).class("bb-section bb-gallery__group"),
        );
        out.element("h2", &Attrs::new(), title);
        out.open("div", &Attrs::new().class("bb-gallery__row"));
        body(out);
        out.close("div");
        out.close("section");
    }
}

impl Widget for ComponentGallery {
    fn render(&self, out: &mut Markup) {
        let theme = &self.theme;
        out.open("main", &Attrs::new().class("bb-gallery"));
        out.child(&GradientText::new("Componentes Bibliotech").tag("h1"));

        Self::section(out, "buttons", "Botões", |out| {
            for variant in ButtonVariant::ALL {
                for size in ButtonSize::ALL {
                    out.child(
                        &Button::new(format!("{} {}", variant.name(), size.name()))
                            .variant(variant)
                            .size(size)
                            .theme(theme.clone()),
                    );
                }
            }
            out.child(&Button::new("Focado").state(InteractionState::Focused));
            out.child(&Button::new("Desabilitado").disabled(true));
            out.child(&Button::new("Salvando").loading(true));
            out.child(&Button::new("Link").variant(ButtonVariant::Ghost).href("#inputs"));
        });

        Self::section(out, "inputs", "Campos", |out| {
            out.child(&TextInput::new("g-name", "Nome").placeholder("Ana Souza"));
            out.child(
                &TextInput::new("g-email", "E-mail")
                    .kind(InputKind::Email)
                    .value("ana@escola")
                    .error(Some("Informe um e-mail válido")),
            );
            out.child(&TextInput::new("g-password", "Senha").kind(InputKind::Password));
            out.child(&TextInput::new("g-phone", "Telefone").kind(InputKind::Tel).disabled(true));
            out.child(
                &TextInput::new("g-message", "Mensagem")
                    .kind(InputKind::TextArea)
                    .max_length(280),
            );
            out.child(&Checkbox::new("g-remember", "Lembrar de mim").checked(true));
            out.child(&Checkbox::new("g-locked", "Bloqueado").disabled(true));
        });

        Self::section(out, "badges", "Selos", |out| {
            for (tone, text) in [
                (BadgeTone::Neutral, "Rascunho"),
                (BadgeTone::Success, "Devolvido"),
                (BadgeTone::Warning, "Vence hoje"),
                (BadgeTone::Danger, "Atrasado"),
                (BadgeTone::Info, "Reservado"),
            ] {
                out.child(&Badge::new(text).tone(tone).theme(theme.clone()));
            }
        });

        Self::section(out, "skeletons", "Carregamento", |out| {
            out.child(&Skeleton::new(SkeletonShape::Circle).width(48).height(48));
            out.child(&Skeleton::new(SkeletonShape::Block).width(240).height(120));
            out.child(&Skeleton::lines(3));
        });

        Self::section(out, "counters", "Contadores", |out| {
            for (i, easing) in Easing::ALL.into_iter().enumerate() {
                let request = AnimationRequest::new(2330, Duration::from_millis(1500))
                    .with_delay(Duration::from_millis(200 * i as u64))
                    .with_easing(easing);
                out.child(&CounterDisplay::new(request).label(easing.name()));
            }
        });

        Self::section(out, "modal", "Modal", |out| {
            let mut body = Markup::new();
            body.element(
                "p",
                &Attrs::new(),
                "Tem certeza que deseja registrar a devolução?",
            );
            out.child(
                &Modal::new("gallery-modal", "Confirmar devolução")
                    .body(body)
                    .open(true)
                    .animation(ModalAnimationState::open(), ModalAnimationConfig::default()),
            );
        });

        out.close("main");
    }
}
