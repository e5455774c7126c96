//! Contact section: form model, validation and the WhatsApp hand-off.
//!
//! The form never posts anywhere. A valid submission becomes a prefilled
//! WhatsApp conversation: `https://wa.me/<digits>?text=<percent-encoded>`.

use bibliotech_style::{ButtonSize, ButtonVariant};
use bibliotech_widgets::{Attrs, Button, InputKind, Markup, TextInput, Widget};
use thiserror::Error;

use crate::validation::{is_valid_email, is_valid_phone};

/// Default longest message, in characters.
pub const MAX_MESSAGE_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactFormError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid e-mail address")]
    InvalidEmail,
    #[error("invalid phone number")]
    InvalidPhone,
    #[error("message longer than {max} characters")]
    MessageTooLong { max: usize },
}

impl ContactFormError {
    /// Form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } => field,
            Self::InvalidEmail => "email",
            Self::InvalidPhone => "phone",
            Self::MessageTooLong { .. } => "message",
        }
    }

    /// Message shown under the field.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingField { .. } => "Campo obrigatório".to_string(),
            Self::InvalidEmail => "Informe um e-mail válido".to_string(),
            Self::InvalidPhone => "Informe um telefone com DDD".to_string(),
            Self::MessageTooLong { max } => format!("Use no máximo {max} caracteres"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub school: String,
    pub phone: Option<String>,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ContactFormError> {
        self.validate_with(MAX_MESSAGE_LEN)
    }

    /// Checks in field order; the first failure wins.
    pub fn validate_with(&self, max_message_len: usize) -> Result<(), ContactFormError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("school", &self.school),
        ] {
            if value.trim().is_empty() {
                return Err(ContactFormError::MissingField { field });
            }
        }
        if !is_valid_email(&self.email) {
            return Err(ContactFormError::InvalidEmail);
        }
        if let Some(phone) = self.phone() {
            if !is_valid_phone(phone) {
                return Err(ContactFormError::InvalidPhone);
            }
        }
        if self.message.trim().is_empty() {
            return Err(ContactFormError::MissingField { field: "message" });
        }
        if self.message.chars().count() > max_message_len {
            return Err(ContactFormError::MessageTooLong {
                max: max_message_len,
            });
        }
        Ok(())
    }

    /// Phone, if given and not blank.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }

    /// Multi-line message sent to the sales WhatsApp.
    pub fn whatsapp_message(&self) -> String {
        let mut lines = vec![
            "Olá! Gostaria de conhecer o Bibliotech.".to_string(),
            String::new(),
            format!("Nome: {}", self.name.trim()),
            format!("E-mail: {}", self.email.trim()),
            format!("Escola: {}", self.school.trim()),
        ];
        if let Some(phone) = self.phone() {
            lines.push(format!("Telefone: {phone}"));
        }
        lines.push(format!("Mensagem: {}", self.message.trim()));
        lines.join("\n")
    }

    /// `https://wa.me/<digits>?text=<encoded message>`.
    pub fn whatsapp_url(&self, number: &str) -> String {
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        format!(
            "https://wa.me/{digits}?text={}",
            urlencoding::encode(&self.whatsapp_message())
        )
    }

    /// Validate, then build the URL.
    pub fn submit(&self, number: &str, max_message_len: usize) -> Result<String, ContactFormError> {
        self.validate_with(max_message_len)?;
        let url = self.whatsapp_url(number);
        tracing::info!(school = %self.school.trim(), "contact form handed off to WhatsApp");
        Ok(url)
    }
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// The `#contato` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSection {
    pub form: ContactForm,
    pub error: Option<ContactFormError>,
    pub whatsapp_number: String,
    pub max_message_len: usize,
}

impl ContactSection {
    pub fn new(whatsapp_number: impl Into<String>, max_message_len: usize) -> Self {
        Self {
            form: ContactForm::default(),
            error: None,
            whatsapp_number: whatsapp_number.into(),
            max_message_len,
        }
    }

    fn error_for(&self, field: &str) -> Option<String> {
        self.error
            .as_ref()
            .filter(|e| e.field() == field)
            .map(ContactFormError::user_message)
    }
}

impl Widget for ContactSection {
    fn render(&self, out: &mut Markup) {
        let max = self.max_message_len.to_string();
        out.open(
            "section",
            &Attrs::new().attr("id", "contato").class("bb-section bb-contact"),
        );
        out.element("h2", &Attrs::new().class("bb-section__title"), "Fale conosco");
        out.element(
            "p",
            &Attrs::new().class("bb-section__lead"),
            "Conte sobre a sua escola e responderemos pelo WhatsApp.",
        );
        out.open(
            "form",
            &Attrs::new()
                .class("bb-contact__form")
                .attr("data-whatsapp-number", self.whatsapp_number.as_str())
                .attr("data-max-message", max.as_str())
                .flag("novalidate", true),
        );
        let fields = [
            ("name", "Nome", InputKind::Text, self.form.name.as_str(), true),
            ("email", "E-mail", InputKind::Email, self.form.email.as_str(), true),
            ("school", "Escola", InputKind::Text, self.form.school.as_str(), true),
            (
                "phone",
                "Telefone (opcional)",
                InputKind::Tel,
                self.form.phone.as_deref().unwrap_or_default(),
                false,
            ),
        ];
        for (name, label, kind, value, required) in fields {
            out.child(
                &TextInput::new(name, label)
                    .kind(kind)
                    .value(value)
                    .required(required)
                    .error(self.error_for(name)),
            );
        }
        out.child(
            &TextInput::new("message", "Mensagem")
                .kind(InputKind::TextArea)
                .value(self.form.message.as_str())
                .required(true)
                .max_length(self.max_message_len)
                .error(self.error_for("message")),
        );
        out.child(
            &Button::new("Enviar pelo WhatsApp")
                .variant(ButtonVariant::Primary)
                .size(ButtonSize::Lg)
                .submit()
                .full_width(true),
        );
        out.close("form");
        out.close("section");
    }
}
