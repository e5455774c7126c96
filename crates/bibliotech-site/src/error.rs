use thiserror::Error;

use crate::config::SiteConfigError;
use crate::landing::contact::ContactFormError;

pub type Result<T> = std::result::Result<T, SiteError>;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid environment override {key}={value:?}")]
    InvalidEnv { key: String, value: String },

    #[error("invalid configuration:\n  - {}", .messages.join("\n  - "))]
    InvalidConfig { messages: Vec<String> },

    #[error("invalid contact form: {0}")]
    Validation(#[from] ContactFormError),

    #[error("unknown route: {path}")]
    UnknownRoute { path: String },
}

impl SiteError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfig { .. } | Self::InvalidEnv { .. } => 2,
            Self::Validation(_) => 3,
            Self::UnknownRoute { .. } => 4,
            Self::Io(_) | Self::Toml(_) | Self::Json(_) => 1,
        }
    }

    #[must_use]
    pub fn invalid_config(messages: Vec<String>) -> Self {
        Self::InvalidConfig { messages }
    }
}

impl From<SiteConfigError> for SiteError {
    fn from(error: SiteConfigError) -> Self {
        match error {
            SiteConfigError::Io(e) => Self::Io(e),
            SiteConfigError::Toml(e) => Self::Toml(e),
            SiteConfigError::Json(e) => Self::Json(e),
            SiteConfigError::InvalidEnv { key, value } => Self::InvalidEnv { key, value },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SiteError;
    use crate::landing::contact::ContactFormError;

    #[test]
    fn exit_codes_by_category() {
        assert_eq!(SiteError::invalid_config(vec!["x".into()]).exit_code(), 2);
        assert_eq!(
            SiteError::from(ContactFormError::InvalidEmail).exit_code(),
            3
        );
        assert_eq!(
            SiteError::UnknownRoute {
                path: "/nope".into()
            }
            .exit_code(),
            4
        );
        let io = std::io::Error::other("disk");
        assert_eq!(SiteError::from(io).exit_code(), 1);
    }

    #[test]
    fn invalid_config_lists_every_message() {
        let error = SiteError::invalid_config(vec![
            "guest_login.email must not be empty".into(),
            "counters.duration_ms must be > 0".into(),
        ]);
        let text = error.to_string();
        assert!(text.contains("  - guest_login.email must not be empty"));
        assert!(text.contains("  - counters.duration_ms must be > 0"));
    }
}
