//! Process settings loaded via OrthoConfig.

#[cfg(feature = "example-data")]
use std::ffi::OsString;
use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use skillx::domain::TransitionPolicy;

use super::config::DEFAULT_STATS_OUTBOX_CAPACITY;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings that cannot be turned into a server configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
    /// `transition_policy` is neither `strict` nor `permissive`.
    #[error("invalid transition policy {value:?}")]
    TransitionPolicy { value: String },
}

/// Top-level service settings, prefixed `SKILLX_` in the environment.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SKILLX")]
pub struct AppSettings {
    /// Listen address, `0.0.0.0:8080` when unset.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Bound on queued stats events.
    pub stats_outbox_capacity: Option<usize>,
    /// `strict` or `permissive`.
    pub transition_policy: Option<String>,
}

impl AppSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Stats queue bound, or the default.
    pub fn stats_outbox_capacity(&self) -> usize {
        self.stats_outbox_capacity
            .unwrap_or(DEFAULT_STATS_OUTBOX_CAPACITY)
    }

    /// Parsed transition policy, `strict` when unset.
    pub fn transition_policy(&self) -> Result<TransitionPolicy, SettingsError> {
        match self.transition_policy.as_deref() {
            None => Ok(TransitionPolicy::default()),
            Some(raw) => raw
                .parse()
                .map_err(|_| SettingsError::TransitionPolicy {
                    value: raw.to_owned(),
                }),
        }
    }
}

/// Command line for settings that take no flags of their own.
///
/// Only [`AppSettings`] parses process flags. Seeding settings read
/// `EXAMPLE_DATA_*` and config files, so they see just the program name.
#[cfg(feature = "example-data")]
pub fn program_only(args: &[OsString]) -> [OsString; 1] {
    [args
        .first()
        .cloned()
        .unwrap_or_else(|| OsString::from("skillx"))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "SKILLX_BIND_ADDR",
        "SKILLX_DATABASE_URL",
        "SKILLX_STATS_OUTBOX_CAPACITY",
        "SKILLX_TRANSITION_POLICY",
    ];

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("skillx")]).expect("settings should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("address")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.stats_outbox_capacity(), DEFAULT_STATS_OUTBOX_CAPACITY);
        assert_eq!(
            settings.transition_policy().expect("default policy"),
            TransitionPolicy::Strict
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SKILLX_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "SKILLX_DATABASE_URL",
                Some("postgres://localhost/skillx".to_owned()),
            ),
            ("SKILLX_STATS_OUTBOX_CAPACITY", Some("16".to_owned())),
            ("SKILLX_TRANSITION_POLICY", Some("Permissive".to_owned())),
        ]);

        let settings = load();
        assert_eq!(
            settings.bind_addr().expect("address").port(),
            9090
        );
        assert_eq!(settings.database_url(), Some("postgres://localhost/skillx"));
        assert_eq!(settings.stats_outbox_capacity(), 16);
        assert_eq!(
            settings.transition_policy().expect("policy"),
            TransitionPolicy::Permissive
        );
    }

    #[rstest]
    #[case(Some("not-an-address"), None)]
    #[case(None, Some("lenient"))]
    fn malformed_values_are_rejected(
        #[case] bind_addr: Option<&str>,
        #[case] policy: Option<&str>,
    ) {
        let settings = AppSettings {
            bind_addr: bind_addr.map(str::to_owned),
            database_url: Some("   ".to_owned()),
            stats_outbox_capacity: None,
            transition_policy: policy.map(str::to_owned),
        };

        assert!(settings.database_url().is_none());
        assert_eq!(settings.bind_addr().is_err(), bind_addr.is_some());
        assert_eq!(settings.transition_policy().is_err(), policy.is_some());
    }

    #[rstest]
    fn server_flags_parse_from_the_full_command_line() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let args = ["skillx", "--bind-addr", "127.0.0.1:9000"].map(OsString::from);
        let settings = AppSettings::load_from_iter(args).expect("server flags parse");
        assert_eq!(settings.bind_addr().expect("address").port(), 9000);
    }

    #[cfg(feature = "example-data")]
    #[rstest]
    fn seeding_settings_ignore_server_flags() {
        use skillx::example_data::ExampleDataSettings;

        let mut vars: Vec<(&str, Option<String>)> =
            VARS.iter().map(|name| (*name, None)).collect();
        vars.push(("EXAMPLE_DATA_SEED_NAME", Some("snowy-penguin".to_owned())));
        let _guard = lock_env(vars);

        let args = ["skillx", "--bind-addr", "127.0.0.1:9000"].map(OsString::from);
        AppSettings::load_from_iter(args.clone()).expect("server flags parse");
        let seeding = ExampleDataSettings::load_from_iter(program_only(&args))
            .expect("seeding settings load beside server flags");
        assert_eq!(seeding.seed_name(), "snowy-penguin");
    }
}
