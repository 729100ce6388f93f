use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_OWNER_WHATSAPP: &str = "+5521992739496";
pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: &str = "587";

/// Full replacement record sent to `POST /notification-config`.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationConfig {
    pub owner_email: String,
    #[serde(default = "default_whatsapp")]
    pub owner_whatsapp: String,
    pub smtp_user: String,
    pub smtp_password: String,
    #[serde(default = "default_smtp_server")]
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: String,
}

fn default_whatsapp() -> String {
    DEFAULT_OWNER_WHATSAPP.to_string()
}

fn default_smtp_server() -> String {
    DEFAULT_SMTP_SERVER.to_string()
}

fn default_smtp_port() -> String {
    DEFAULT_SMTP_PORT.to_string()
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            owner_email: String::new(),
            owner_whatsapp: default_whatsapp(),
            smtp_user: String::new(),
            smtp_password: String::new(),
            smtp_server: default_smtp_server(),
            smtp_port: default_smtp_port(),
        }
    }
}

impl NotificationConfig {
    /// Pre-fill the editable form from what the backend reports.
    pub fn prefilled(status: &NotificationStatus) -> Self {
        let mut config = Self::default();
        if let Some(owner_email) = &status.owner_email {
            config.owner_email = owner_email.clone();
            config.smtp_user = status.smtp_user.clone().unwrap_or_default();
        }
        config
    }
}

// The SMTP password must never reach the logs.
impl fmt::Debug for NotificationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationConfig")
            .field("owner_email", &self.owner_email)
            .field("owner_whatsapp", &self.owner_whatsapp)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_password", &"<redacted>")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}

/// Shape returned by `GET /notification-config`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationStatus {
    pub email_configured: bool,
    #[serde(default)]
    pub owner_email: Option<String>,
    #[serde(default)]
    pub smtp_user: Option<String>,
    #[serde(default = "default_whatsapp")]
    pub owner_whatsapp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NotificationConfig::default();
        assert_eq!(config.owner_whatsapp, "+5521992739496");
        assert_eq!(config.smtp_server, "smtp.gmail.com");
        assert_eq!(config.smtp_port, "587");
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = NotificationConfig {
            smtp_password: "hunter2".to_string(),
            ..Default::default()
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_prefill_requires_owner_email() {
        let status = NotificationStatus {
            email_configured: false,
            owner_email: None,
            smtp_user: Some("smtp@x.com".to_string()),
            owner_whatsapp: DEFAULT_OWNER_WHATSAPP.to_string(),
        };
        assert_eq!(NotificationConfig::prefilled(&status).smtp_user, "");

        let status = NotificationStatus {
            owner_email: Some("dono@x.com".to_string()),
            ..status
        };
        let config = NotificationConfig::prefilled(&status);
        assert_eq!(config.owner_email, "dono@x.com");
        assert_eq!(config.smtp_user, "smtp@x.com");
    }

    #[test]
    fn test_status_tolerates_nulls() {
        let json = r#"{"email_configured":false,"owner_email":null,"smtp_user":null,"owner_whatsapp":"+5521992739496"}"#;
        let status: NotificationStatus = serde_json::from_str(json).unwrap();
        assert!(!status.email_configured);
        assert!(status.owner_email.is_none());
    }
}
