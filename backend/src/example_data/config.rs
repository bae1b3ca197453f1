//! Example data settings loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_SEED_NAME: &str = "mossy-owl";

fn default_registry_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("example-data")
        .join("seeds.json")
}

/// Controls whether sample skill-exchange entries are inserted at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMPLE_DATA")]
pub struct ExampleDataSettings {
    /// Enable seeding on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Registry seed to generate from.
    pub seed_name: Option<String>,
    /// Overrides the seed's entry count.
    #[ortho_config(file_key = "entry_count")]
    pub count: Option<usize>,
    /// Registry file; defaults to the bundled fixture.
    pub registry_path: Option<PathBuf>,
}

impl ExampleDataSettings {
    /// Configured seed name, or `mossy-owl`.
    pub fn seed_name(&self) -> &str {
        self.seed_name.as_deref().unwrap_or(DEFAULT_SEED_NAME)
    }

    /// Configured registry path, or the bundled `fixtures/example-data/seeds.json`.
    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(default_registry_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "EXAMPLE_DATA_ENABLED",
        "EXAMPLE_DATA_SEED_NAME",
        "EXAMPLE_DATA_COUNT",
        "EXAMPLE_DATA_REGISTRY_PATH",
    ];

    fn load(args: &[&str]) -> ExampleDataSettings {
        let argv = std::iter::once("skillx")
            .chain(args.iter().copied())
            .map(OsString::from);
        ExampleDataSettings::load_from_iter(argv).expect("config should load")
    }

    #[rstest]
    fn defaults_point_at_bundled_registry() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load(&[]);
        assert!(!settings.enabled);
        assert_eq!(settings.seed_name(), DEFAULT_SEED_NAME);
        assert_eq!(settings.registry_path(), default_registry_path());
        assert!(settings.registry_path().ends_with("fixtures/example-data/seeds.json"));
        assert!(settings.count.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("EXAMPLE_DATA_ENABLED", Some("true".to_owned())),
            ("EXAMPLE_DATA_SEED_NAME", Some("snowy-penguin".to_owned())),
            ("EXAMPLE_DATA_COUNT", Some("2".to_owned())),
            (
                "EXAMPLE_DATA_REGISTRY_PATH",
                Some("/tmp/skillx_seeds.json".to_owned()),
            ),
        ]);

        let settings = load(&[]);
        assert!(settings.enabled);
        assert_eq!(settings.seed_name(), "snowy-penguin");
        assert_eq!(
            settings.registry_path(),
            PathBuf::from("/tmp/skillx_seeds.json")
        );
        assert_eq!(settings.count, Some(2));
    }
}
