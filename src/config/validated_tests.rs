//! Tests for configuration merging and validation.

use super::cli::Cli;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;
use super::validated::{Mode, ValidatedConfig};
use std::time::Duration;

/// Minimal TOML carrying the required credentials.
fn base_toml() -> TomlConfig {
    TomlConfig::parse(
        r#"
        [pushover]
        user_key = "uk"
        token = "tk"
    "#,
    )
    .unwrap()
}

fn dns_cli() -> Cli {
    Cli::parse_from_iter(["ipwatch", "dns", "--domain", "home.example.com"])
}

mod mode_resolution {
    use super::*;

    #[test]
    fn dns_domain_from_cli() {
        let config = ValidatedConfig::from_raw(&dns_cli(), Some(&base_toml())).unwrap();

        assert_eq!(
            config.mode,
            Mode::Dns {
                domain: "home.example.com".to_string()
            }
        );
    }

    #[test]
    fn dns_domain_from_toml() {
        let cli = Cli::parse_from_iter(["ipwatch", "dns"]);
        let toml = TomlConfig::parse(
            r#"
            [common]
            domain = "toml.example.com"

            [pushover]
            user_key = "uk"
            token = "tk"
        "#,
        )
        .unwrap();

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(
            config.mode,
            Mode::Dns {
                domain: "toml.example.com".to_string()
            }
        );
    }

    #[test]
    fn cli_domain_wins_over_toml() {
        let toml = TomlConfig::parse(
            r#"
            [common]
            domain = "toml.example.com"

            [pushover]
            user_key = "uk"
            token = "tk"
        "#,
        )
        .unwrap();

        let config = ValidatedConfig::from_raw(&dns_cli(), Some(&toml)).unwrap();

        assert_eq!(
            config.mode,
            Mode::Dns {
                domain: "home.example.com".to_string()
            }
        );
    }

    #[test]
    fn missing_domain_is_an_error() {
        let cli = Cli::parse_from_iter(["ipwatch", "dns"]);

        let error = ValidatedConfig::from_raw(&cli, Some(&base_toml())).unwrap_err();

        match error {
            ConfigError::MissingRequired { field: f, .. } => assert_eq!(f, field::DOMAIN),
            other => panic!("expected MissingRequired, got {other:?}"),
        }
    }

    #[test]
    fn change_state_file_from_cli() {
        let cli = Cli::parse_from_iter(["ipwatch", "change", "--state-file", "/tmp/ip.txt"]);

        let config = ValidatedConfig::from_raw(&cli, Some(&base_toml())).unwrap();

        assert_eq!(
            config.mode,
            Mode::Change {
                state_file: "/tmp/ip.txt".into()
            }
        );
    }

    #[test]
    fn change_state_file_from_toml() {
        let cli = Cli::parse_from_iter(["ipwatch", "change"]);
        let toml = TomlConfig::parse(
            r#"
            [pushover]
            user_key = "uk"
            token = "tk"

            [state]
            file = "/var/lib/ipwatch/saved_ip.txt"
        "#,
        )
        .unwrap();

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(
            config.mode,
            Mode::Change {
                state_file: "/var/lib/ipwatch/saved_ip.txt".into()
            }
        );
    }

    #[test]
    fn change_state_file_expands_tilde() {
        let cli = Cli::parse_from_iter(["ipwatch", "change"]);
        let toml = TomlConfig::parse(
            r#"
            [pushover]
            user_key = "uk"
            token = "tk"

            [state]
            file = "~/.config/ipwatch/saved_ip.txt"
        "#,
        )
        .unwrap();

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        match config.mode {
            Mode::Change { state_file } => {
                let rendered = state_file.display().to_string();
                assert!(rendered.ends_with(".config/ipwatch/saved_ip.txt"));
                // Expanded whenever a home directory exists
                if dirs::home_dir().is_some() {
                    assert!(!rendered.starts_with('~'));
                }
            }
            other => panic!("expected change mode, got {other:?}"),
        }
    }

    #[test]
    fn change_without_any_path_falls_back_to_default() {
        let cli = Cli::parse_from_iter(["ipwatch", "change"]);

        let result = ValidatedConfig::from_raw(&cli, Some(&base_toml()));

        // On platforms with a config directory the default path is used;
        // otherwise a MissingRequired error points at state.file
        match result {
            Ok(config) => match config.mode {
                Mode::Change { state_file } => {
                    assert!(state_file.ends_with("ipwatch/saved_ip.txt"));
                }
                other => panic!("expected change mode, got {other:?}"),
            },
            Err(ConfigError::MissingRequired { field: f, .. }) => {
                assert_eq!(f, field::STATE_FILE);
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
}

mod credentials {
    use super::*;

    #[test]
    fn credentials_come_from_toml() {
        let toml = TomlConfig::parse(
            r#"
            [pushover]
            user_key = "uk"
            token = "tk"
            sound = "siren"
        "#,
        )
        .unwrap();

        let config = ValidatedConfig::from_raw(&dns_cli(), Some(&toml)).unwrap();

        assert_eq!(config.credentials.user_key, "uk");
        assert_eq!(config.credentials.token, "tk");
        assert_eq!(config.credentials.sound.as_deref(), Some("siren"));
    }

    #[test]
    fn missing_user_key_is_an_error() {
        let toml = TomlConfig::parse(
            r#"
            [pushover]
            token = "tk"
        "#,
        )
        .unwrap();

        let error = ValidatedConfig::from_raw(&dns_cli(), Some(&toml)).unwrap_err();

        match error {
            ConfigError::MissingRequired { field: f, .. } => assert_eq!(f, field::USER_KEY),
            other => panic!("expected MissingRequired, got {other:?}"),
        }
    }

    #[test]
    fn missing_token_is_an_error() {
        let toml = TomlConfig::parse(
            r#"
            [pushover]
            user_key = "uk"
        "#,
        )
        .unwrap();

        let error = ValidatedConfig::from_raw(&dns_cli(), Some(&toml)).unwrap_err();

        match error {
            ConfigError::MissingRequired { field: f, .. } => assert_eq!(f, field::TOKEN),
            other => panic!("expected MissingRequired, got {other:?}"),
        }
    }

    #[test]
    fn missing_config_file_entirely_reports_credentials() {
        let error = ValidatedConfig::from_raw(&dns_cli(), None).unwrap_err();

        assert!(matches!(error, ConfigError::MissingRequired { .. }));
    }

    #[test]
    fn sound_defaults_to_none() {
        let config = ValidatedConfig::from_raw(&dns_cli(), Some(&base_toml())).unwrap();

        assert!(config.credentials.sound.is_none());
    }
}

mod endpoints_and_timeout {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = ValidatedConfig::from_raw(&dns_cli(), Some(&base_toml())).unwrap();

        assert_eq!(config.ip_endpoint.as_str(), "https://api.ipify.org/");
        assert_eq!(
            config.pushover_api_url.as_str(),
            "https://api.pushover.net/1/messages.json"
        );
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(!config.dry_run);
        assert!(!config.verbose);
    }

    #[test]
    fn cli_timeout_wins_over_toml() {
        let cli = Cli::parse_from_iter([
            "ipwatch",
            "dns",
            "--domain",
            "home.example.com",
            "--timeout",
            "3",
        ]);
        let toml = TomlConfig::parse(
            r#"
            [common]
            timeout = 30

            [pushover]
            user_key = "uk"
            token = "tk"
        "#,
        )
        .unwrap();

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cli = Cli::parse_from_iter([
            "ipwatch",
            "dns",
            "--domain",
            "home.example.com",
            "--timeout",
            "0",
        ]);

        let error = ValidatedConfig::from_raw(&cli, Some(&base_toml())).unwrap_err();

        assert!(matches!(error, ConfigError::InvalidDuration { .. }));
    }

    #[test]
    fn invalid_ip_endpoint_is_rejected() {
        let cli = Cli::parse_from_iter([
            "ipwatch",
            "dns",
            "--domain",
            "home.example.com",
            "--ip-endpoint",
            "not a url",
        ]);

        let error = ValidatedConfig::from_raw(&cli, Some(&base_toml())).unwrap_err();

        assert!(matches!(error, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn custom_pushover_api_url_is_used() {
        let toml = TomlConfig::parse(
            r#"
            [pushover]
            user_key = "uk"
            token = "tk"
            api_url = "https://pushover.local/1/messages.json"
        "#,
        )
        .unwrap();

        let config = ValidatedConfig::from_raw(&dns_cli(), Some(&toml)).unwrap();

        assert_eq!(
            config.pushover_api_url.as_str(),
            "https://pushover.local/1/messages.json"
        );
    }
}

mod templates {
    use super::*;

    #[test]
    fn valid_template_is_kept() {
        let toml = TomlConfig::parse(
            r#"
            [pushover]
            user_key = "uk"
            token = "tk"
            message_template = "IP is now {{current}}"
        "#,
        )
        .unwrap();

        let config = ValidatedConfig::from_raw(&dns_cli(), Some(&toml)).unwrap();

        assert_eq!(
            config.message_template.as_deref(),
            Some("IP is now {{current}}")
        );
    }

    #[test]
    fn invalid_template_is_rejected() {
        let toml = TomlConfig::parse(
            r#"
            [pushover]
            user_key = "uk"
            token = "tk"
            message_template = "{{#if}}"
        "#,
        )
        .unwrap();

        let error = ValidatedConfig::from_raw(&dns_cli(), Some(&toml)).unwrap_err();

        assert!(matches!(error, ConfigError::InvalidTemplate { .. }));
    }
}

mod display {
    use super::*;

    #[test]
    fn summary_contains_mode_and_endpoint() {
        let config = ValidatedConfig::from_raw(&dns_cli(), Some(&base_toml())).unwrap();

        let summary = config.to_string();
        assert!(summary.contains("dns(home.example.com)"));
        assert!(summary.contains("api.ipify.org"));
    }

    #[test]
    fn summary_never_leaks_credentials() {
        let toml = TomlConfig::parse(
            r#"
            [pushover]
            user_key = "secret-user-key"
            token = "secret-token"
        "#,
        )
        .unwrap();

        let config = ValidatedConfig::from_raw(&dns_cli(), Some(&toml)).unwrap();

        let summary = config.to_string();
        assert!(!summary.contains("secret-user-key"));
        assert!(!summary.contains("secret-token"));
    }
}
