//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use handlebars::Handlebars;
use url::Url;

use crate::notify::PushoverCredentials;

use super::cli::{Cli, Command};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// The check mode selected by the subcommand, with its resolved parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Compare against the domain's DNS A-record set.
    Dns {
        /// Hostname whose A-records serve as the reference.
        domain: String,
    },

    /// Compare against the previously saved value.
    Change {
        /// Path to the saved-IP file.
        state_file: PathBuf,
    },
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dns { domain } => write!(f, "dns({domain})"),
            Self::Change { state_file } => write!(f, "change({})", state_file.display()),
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// This struct represents a complete, validated configuration where all
/// required fields are present and all values have been validated.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Check mode with its resolved parameter
    pub mode: Mode,

    /// IP echo endpoint
    pub ip_endpoint: Url,

    /// Pushover message API endpoint
    pub pushover_api_url: Url,

    /// Timeout applied to every external call
    pub timeout: Duration,

    /// Pushover credentials (never logged)
    pub credentials: PushoverCredentials,

    /// Optional Handlebars message template (syntax-checked)
    pub message_template: Option<String>,

    /// Dry-run mode (log the would-be notification without sending)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    /// Formats a config summary for the startup log line.
    ///
    /// Credentials are deliberately absent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ mode: {}, ip_endpoint: {}, timeout: {}s, template: {}, dry_run: {} }}",
            self.mode,
            self.ip_endpoint,
            self.timeout.as_secs(),
            if self.message_template.is_some() {
                "custom"
            } else {
                "default"
            },
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing (mode parameter, Pushover credentials)
    /// - A URL is invalid
    /// - The timeout is zero
    /// - The message template has invalid syntax
    ///
    /// # Panics
    ///
    /// Panics if called with the `init` subcommand, which is handled
    /// before configuration loading.
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let mode = Self::resolve_mode(cli, toml)?;
        let ip_endpoint = Self::resolve_ip_endpoint(cli, toml)?;
        let pushover_api_url = Self::resolve_pushover_api_url(toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;
        let credentials = Self::resolve_credentials(toml)?;
        let message_template = Self::resolve_message_template(toml)?;

        Ok(Self {
            mode,
            ip_endpoint,
            pushover_api_url,
            timeout,
            credentials,
            message_template,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_mode(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Mode, ConfigError> {
        match &cli.command {
            Command::Dns { domain } => {
                // CLI takes precedence
                let domain = domain
                    .as_deref()
                    .or_else(|| toml.and_then(|t| t.common.domain.as_deref()))
                    .ok_or_else(|| {
                        ConfigError::missing(
                            field::DOMAIN,
                            "Use --domain or set common.domain in config file",
                        )
                    })?;

                Ok(Mode::Dns {
                    domain: domain.to_string(),
                })
            }
            Command::Change { state_file } => {
                let state_file = state_file
                    .clone()
                    .or_else(|| {
                        toml.and_then(|t| t.state.file.as_deref().map(expand_tilde))
                    })
                    .or_else(defaults::state_file)
                    .ok_or_else(|| {
                        ConfigError::missing(
                            field::STATE_FILE,
                            "Use --state-file or set state.file in config file",
                        )
                    })?;

                Ok(Mode::Change { state_file })
            }
            Command::Init { .. } => unreachable!("init is handled before configuration loading"),
        }
    }

    fn resolve_ip_endpoint(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let url_str = cli
            .ip_endpoint
            .as_deref()
            .or_else(|| toml.and_then(|t| t.common.ip_endpoint.as_deref()))
            .unwrap_or(defaults::IP_ENDPOINT);

        parse_url(url_str)
    }

    fn resolve_pushover_api_url(toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = toml
            .and_then(|t| t.pushover.api_url.as_deref())
            .unwrap_or(defaults::PUSHOVER_API_URL);

        parse_url(url_str)
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.common.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_credentials(toml: Option<&TomlConfig>) -> Result<PushoverCredentials, ConfigError> {
        let pushover = toml.map(|t| &t.pushover);

        let user_key = pushover
            .and_then(|p| p.user_key.as_deref())
            .ok_or_else(|| {
                ConfigError::missing(field::USER_KEY, "Set pushover.user_key in config file")
            })?;

        let token = pushover.and_then(|p| p.token.as_deref()).ok_or_else(|| {
            ConfigError::missing(field::TOKEN, "Set pushover.token in config file")
        })?;

        Ok(PushoverCredentials {
            user_key: user_key.to_string(),
            token: token.to_string(),
            sound: pushover.and_then(|p| p.sound.clone()),
        })
    }

    fn resolve_message_template(toml: Option<&TomlConfig>) -> Result<Option<String>, ConfigError> {
        let template = toml.and_then(|t| t.pushover.message_template.clone());

        // Validate Handlebars syntax if a template is provided
        if let Some(ref tmpl) = template {
            Self::validate_template(tmpl)?;
        }

        Ok(template)
    }

    fn validate_template(template: &str) -> Result<(), ConfigError> {
        let hbs = Handlebars::new();
        // Compile-check only; render with empty context to validate syntax
        hbs.render_template(template, &serde_json::json!({}))
            .map_err(|e| ConfigError::InvalidTemplate {
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_url(url_str: &str) -> Result<Url, ConfigError> {
    Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
        url: url_str.to_string(),
        reason: e.to_string(),
    })
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and `~` when no home directory can be
/// determined, pass through unchanged.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }

    PathBuf::from(path)
}
