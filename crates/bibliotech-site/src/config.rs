#![forbid(unsafe_code)]

//! Site configuration as data.
//!
//! [`SiteConfig`] is loaded from TOML or JSON, then overridden from the
//! environment through [`SiteConfig::apply_env`], then checked with
//! [`SiteConfig::validate`]. Every section has defaults, so an empty file is
//! a valid configuration.
//!
//! ```toml
//! [guest_login]
//! enabled = true
//! email = "visitante@bibliotech.app"
//! password = "demo1234"
//!
//! [contact]
//! whatsapp_number = "5511999999999"
//!
//! [counters]
//! duration_ms = 2000
//! easing = "ease-out"
//! ```

use std::path::Path;
use std::time::Duration;

use bibliotech_core::{Easing, TrackerConfig};
use bibliotech_style::Theme;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{Result, SiteError};

pub const ENV_GUEST_LOGIN: &str = "BIBLIOTECH_GUEST_LOGIN";
pub const ENV_GUEST_EMAIL: &str = "BIBLIOTECH_GUEST_EMAIL";
pub const ENV_GUEST_PASSWORD: &str = "BIBLIOTECH_GUEST_PASSWORD";
pub const ENV_WHATSAPP_NUMBER: &str = "BIBLIOTECH_WHATSAPP_NUMBER";

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Demo account offered on the login page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestLogin {
    pub enabled: bool,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// International number, digits only after normalization.
    pub whatsapp_number: String,
    /// Longest accepted contact message, in characters.
    pub max_message_len: usize,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: "5511999999999".to_string(),
            max_message_len: 1000,
        }
    }
}

/// Stats band counter timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: u64,
    /// Extra delay per counter, so the band counts up left to right.
    pub stagger_ms: u64,
    pub easing: Easing,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            stagger_ms: 150,
            easing: Easing::EaseOut,
        }
    }
}

impl CounterConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub guest_login: GuestLogin,
    pub contact: ContactConfig,
    pub tracker: TrackerConfig,
    pub counters: CounterConfig,
    pub theme: Theme,
}

#[derive(Debug, Error)]
pub enum SiteConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: String, value: String },
}

impl SiteConfig {
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, SiteConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> std::result::Result<Self, SiteConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_json_str(s: &str) -> std::result::Result<Self, SiteConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> std::result::Result<Self, SiteConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load by extension (`.json` is JSON, anything else TOML).
    pub fn from_file(path: impl AsRef<Path>) -> std::result::Result<Self, SiteConfigError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_toml_file(path)
        }
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> std::result::Result<(), SiteConfigError> {
        if let Some(raw) = lookup(ENV_GUEST_LOGIN) {
            self.guest_login.enabled = parse_bool(&raw).ok_or_else(|| SiteConfigError::InvalidEnv {
                key: ENV_GUEST_LOGIN.to_string(),
                value: raw.clone(),
            })?;
        }
        if let Some(email) = lookup(ENV_GUEST_EMAIL) {
            self.guest_login.email = email;
        }
        if let Some(password) = lookup(ENV_GUEST_PASSWORD) {
            self.guest_login.password = password;
        }
        if let Some(number) = lookup(ENV_WHATSAPP_NUMBER) {
            self.contact.whatsapp_number = number;
        }
        Ok(())
    }

    /// Validate all parameters. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.guest_login.enabled {
            if self.guest_login.email.trim().is_empty() {
                errors.push("guest_login.email must not be empty when guest login is enabled".into());
            }
            if self.guest_login.password.is_empty() {
                errors.push(
                    "guest_login.password must not be empty when guest login is enabled".into(),
                );
            }
        }

        let digits = self.whatsapp_digits();
        if !(10..=15).contains(&digits.len()) {
            errors.push(format!(
                "contact.whatsapp_number must have 10-15 digits, got {}",
                digits.len()
            ));
        }
        if self.contact.max_message_len == 0 {
            errors.push("contact.max_message_len must be > 0".into());
        }

        for (name, value) in [
            ("tracker.activation_offset_px", self.tracker.activation_offset_px),
            ("tracker.header_offset_px", self.tracker.header_offset_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be finite and >= 0, got {value}"));
            }
        }

        if self.counters.duration_ms == 0 {
            errors.push("counters.duration_ms must be > 0".into());
        }

        errors
    }

    /// The WhatsApp number with every non-digit removed.
    pub fn whatsapp_digits(&self) -> String {
        self.contact
            .whatsapp_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect()
    }

    /// File (optional) + process environment + validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    pub fn load_with(path: Option<&Path>, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading site config");
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply_env(lookup)?;
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(SiteError::invalid_config(errors))
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
