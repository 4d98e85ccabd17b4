// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::infra::errors::ClientError;
use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub payment: PaymentConfig,

    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
            timeout_seconds: 30,
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Message sent automatically when the chat opens.
    pub greeting: String,
    pub send_greeting: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: "Hi".into(),
            send_greeting: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    pub gst_percent: u32,
    pub currency: String,
    /// Fallback wait before requesting the invoice when no payment
    /// confirmation arrives first.
    pub invoice_delay_ms: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            gst_percent: 18,
            currency: "INR".into(),
            invoice_delay_ms: 2000,
        }
    }
}

impl PaymentConfig {
    pub fn invoice_delay(&self) -> Duration {
        Duration::from_millis(self.invoice_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub chat_limit: u32,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self { chat_limit: 20 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub notification_ttl_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_ttl_ms: 3000,
        }
    }
}

impl UiConfig {
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply a base URL override (CLI flag or HOTELCHAT_SERVER).
    pub fn with_base_url(mut self, base_url: Option<String>) -> Result<Self, ClientError> {
        if let Some(url) = base_url {
            self.server.base_url = url;
            self.validate()?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        let parsed = url::Url::parse(&self.server.base_url).map_err(|e| {
            ClientError::Config(format!("invalid base_url '{}': {}", self.server.base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "base_url must be http(s), got '{}'",
                parsed.scheme()
            )));
        }
        if self.admin.chat_limit == 0 {
            return Err(ClientError::Config("admin.chat_limit must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reasonable() {
        let c = Config::default();
        assert_eq!(c.server.base_url, "http://127.0.0.1:8000");
        assert_eq!(c.server.timeout(), Duration::from_secs(30));
        assert_eq!(c.payment.gst_percent, 18);
        assert_eq!(c.payment.currency, "INR");
        assert_eq!(c.payment.invoice_delay(), Duration::from_secs(2));
        assert_eq!(c.admin.chat_limit, 20);
        assert_eq!(c.ui.notification_ttl_ms, 3000);
        assert_eq!(c.chat.greeting, "Hi");
        assert!(c.chat.send_greeting);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.admin.chat_limit, 20);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[server]
base_url = "https://hotels.example.com"
timeout_seconds = 10

[chat]
greeting = "Hello"
send_greeting = false

[payment]
gst_percent = 12
currency = "INR"
invoice_delay_ms = 500

[admin]
chat_limit = 50

[ui]
notification_ttl_ms = 1000
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.base_url, "https://hotels.example.com");
        assert_eq!(config.server.timeout_seconds, 10);
        assert_eq!(config.chat.greeting, "Hello");
        assert!(!config.chat.send_greeting);
        assert_eq!(config.payment.gst_percent, 12);
        assert_eq!(config.payment.invoice_delay_ms, 500);
        assert_eq!(config.admin.chat_limit, 50);
        assert_eq!(config.ui.notification_ttl_ms, 1000);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: Config = toml::from_str("[payment]\ninvoice_delay_ms = 250\n").unwrap();
        assert_eq!(config.payment.invoice_delay(), Duration::from_millis(250));
        assert_eq!(config.payment.gst_percent, 18);
        assert_eq!(config.payment.currency, "INR");
    }

    #[test]
    fn test_base_url_override() {
        let c = Config::default()
            .with_base_url(Some("http://10.0.0.5:9000".into()))
            .unwrap();
        assert_eq!(c.server.base_url, "http://10.0.0.5:9000");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(Config::default()
            .with_base_url(Some("not a url".into()))
            .is_err());
        assert!(Config::default()
            .with_base_url(Some("ftp://files.example.com".into()))
            .is_err());
    }

    #[test]
    fn test_zero_chat_limit_rejected() {
        let mut c = Config::default();
        c.admin.chat_limit = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.server.base_url, config.server.base_url);
        assert_eq!(deserialized.payment.gst_percent, config.payment.gst_percent);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }
}
