//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Shared check configuration
    #[serde(default)]
    pub common: CommonSection,

    /// Pushover notification configuration
    #[serde(default)]
    pub pushover: PushoverSection,

    /// Saved-IP persistence configuration
    #[serde(default)]
    pub state: StateSection,
}

/// Shared check configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommonSection {
    /// Hostname whose A-records serve as the dns-mode reference
    pub domain: Option<String>,

    /// IP echo endpoint URL
    pub ip_endpoint: Option<String>,

    /// Timeout for each external call in seconds
    pub timeout: Option<u64>,
}

/// Pushover notification configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PushoverSection {
    /// Recipient user key (required)
    pub user_key: Option<String>,

    /// Application API token (required)
    pub token: Option<String>,

    /// Notification sound override
    pub sound: Option<String>,

    /// Message API endpoint override
    pub api_url: Option<String>,

    /// Handlebars template overriding the default message format
    pub message_template: Option<String>,
}

/// Saved-IP persistence configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateSection {
    /// Path to the change-mode saved-IP file (leading `~` is expanded)
    pub file: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ipwatch Configuration File

[common]
# Hostname whose A-records the external IP is checked against (dns mode)
# domain = "home.example.com"

# IP echo endpoint (default: https://api.ipify.org)
# ip_endpoint = "https://api.ipify.org"

# Timeout for each external call in seconds (default: 10)
# timeout = 10

[pushover]
# Recipient user key (required)
# user_key = "your-user-key"

# Application API token (required)
# token = "your-app-token"

# Notification sound (default: the device's setting)
# sound = "pushover"

# Handlebars template overriding the default message format.
# Available variables: {{mode}}, {{current}}, {{previous}}, {{domain}}, {{records}}
# message_template = "IP is now {{current}}"

[state]
# Saved-IP file for change mode (default: <config dir>/ipwatch/saved_ip.txt)
# file = "~/.config/ipwatch/saved_ip.txt"
"#
    .to_string()
}
