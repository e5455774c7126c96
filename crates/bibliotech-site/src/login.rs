#![forbid(unsafe_code)]

//! Login page view model.
//!
//! Holds the two editable fields and the guest-login settings it was built
//! with. Authentication itself belongs to the host; [`LoginPage::submit`]
//! only checks that the credentials are well formed.

use bibliotech_style::{ButtonSize, ButtonVariant};
use bibliotech_widgets::{
    Attrs, Button, Checkbox, InputKind, Markup, TextInput, TextInputState, Widget,
};
use thiserror::Error;

use crate::config::GuestLogin;
use crate::routes::Route;
use crate::validation::is_valid_email;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("e-mail is required")]
    MissingEmail,
    #[error("invalid e-mail address")]
    InvalidEmail,
    #[error("password is required")]
    MissingPassword,
}

impl LoginError {
    fn field(self) -> &'static str {
        match self {
            Self::MissingEmail | Self::InvalidEmail => "email",
            Self::MissingPassword => "password",
        }
    }

    fn user_message(self) -> &'static str {
        match self {
            Self::MissingEmail => "Informe o seu e-mail",
            Self::InvalidEmail => "Informe um e-mail válido",
            Self::MissingPassword => "Informe a sua senha",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPage {
    pub email: TextInputState,
    pub password: TextInputState,
    pub remember: Checkbox,
    guest: GuestLogin,
    error: Option<LoginError>,
    submitting: bool,
}

impl LoginPage {
    pub fn new(guest: &GuestLogin) -> Self {
        Self {
            email: TextInputState::new().with_max_length(254),
            password: TextInputState::new().with_max_length(128),
            remember: Checkbox::new("remember", "Manter conectado"),
            guest: guest.clone(),
            error: None,
            submitting: false,
        }
    }

    pub fn guest_button_visible(&self) -> bool {
        self.guest.enabled
    }

    /// Fill both fields with the demo account. No-op when guest login is off.
    pub fn use_guest_credentials(&mut self) -> bool {
        if !self.guest.enabled {
            return false;
        }
        self.email.set_value(self.guest.email.as_str());
        self.password.set_value(self.guest.password.as_str());
        self.error = None;
        true
    }

    pub fn error(&self) -> Option<LoginError> {
        self.error
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate the fields. On success the page shows the loading state
    /// until the host calls [`finish`](Self::finish).
    pub fn submit(&mut self) -> Result<Credentials, LoginError> {
        let email = self.email.value().trim();
        let password = self.password.value();
        let result = if email.is_empty() {
            Err(LoginError::MissingEmail)
        } else if !is_valid_email(email) {
            Err(LoginError::InvalidEmail)
        } else if password.is_empty() {
            Err(LoginError::MissingPassword)
        } else {
            Ok(Credentials {
                email: email.to_string(),
                password: password.to_string(),
            })
        };
        self.error = result.as_ref().err().copied();
        self.submitting = result.is_ok();
        result
    }

    /// The host finished authenticating.
    pub fn finish(&mut self) {
        self.submitting = false;
    }

    fn error_for(&self, field: &str) -> Option<&'static str> {
        self.error
            .filter(|e| e.field() == field)
            .map(LoginError::user_message)
    }
}

impl Widget for LoginPage {
    fn render(&self, out: &mut Markup) {
        out.open("main", &Attrs::new().class("bb-login"));
        out.open("div", &Attrs::new().class("bb-login__card"));
        out.element(
            "a",
            &Attrs::new()
                .class("bb-login__brand")
                .attr("href", Route::Landing.path()),
            "Bibliotech",
        );
        out.element("h1", &Attrs::new(), "Entrar");
        out.open(
            "form",
            &Attrs::new()
                .class("bb-login__form")
                .attr("method", "post")
                .flag("novalidate", true),
        );
        out.child(
            &TextInput::new("email", "E-mail")
                .kind(InputKind::Email)
                .placeholder("voce@escola.br")
                .state(&self.email)
                .required(true)
                .disabled(self.submitting)
                .error(self.error_for("email")),
        );
        out.child(
            &TextInput::new("password", "Senha")
                .kind(InputKind::Password)
                .state(&self.password)
                .required(true)
                .disabled(self.submitting)
                .error(self.error_for("password")),
        );
        out.child(&self.remember);
        out.child(
            &Button::new("Entrar")
                .size(ButtonSize::Lg)
                .submit()
                .full_width(true)
                .loading(self.submitting),
        );
        if self.guest_button_visible() {
            out.child(
                &Button::new("Entrar como visitante")
                    .id("bb-guest-login")
                    .variant(ButtonVariant::Ghost)
                    .full_width(true)
                    .disabled(self.submitting),
            );
        }
        out.close("form");
        out.close("div");
        out.close("main");
    }
}
