//! Noah Ward core library
//!
//! Hospital administration state: doctors, patients, appointments, beds and
//! emergency alerts, kept in memory and written to a key-value store after
//! every change.

pub mod core;
pub mod db;
pub mod hospital;
pub mod models;
pub mod ui;

pub use hospital::{Booking, Hospital, HospitalError};

/// Application configuration
pub mod config {
    use std::path::{Path, PathBuf};

    use serde::Deserialize;

    #[derive(Debug, Clone, Deserialize)]
    pub struct Config {
        pub storage: StorageConfig,
        pub logging: LoggingConfig,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct StorageConfig {
        pub data_dir: PathBuf,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct LoggingConfig {
        pub level: String,
        pub json: bool,
    }

    /// Load configuration from `config/` relative to the working directory
    pub fn load_config() -> Result<Config, config::ConfigError> {
        load_config_from(Path::new("config"))
    }

    /// Load configuration, layering files from `dir` over built-in defaults
    pub fn load_config_from(dir: &Path) -> Result<Config, config::ConfigError> {
        let env = std::env::var("NOAH_ENV").unwrap_or_else(|_| "development".into());

        config::Config::builder()
            .set_default("storage.data_dir", ".noah-ward")?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(config::File::with_name(&dir.join("default").to_string_lossy()).required(false))
            .add_source(config::File::with_name(&dir.join(&env).to_string_lossy()).required(false))
            // e.g. NOAH__STORAGE__DATA_DIR
            .add_source(config::Environment::with_prefix("NOAH").separator("__"))
            .build()?
            .try_deserialize()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn defaults_apply_without_files() {
            let dir = tempfile::tempdir().unwrap();
            let config = load_config_from(dir.path()).unwrap();
            assert_eq!(config.logging.level, "info");
            assert!(!config.logging.json);
        }

        #[test]
        fn default_file_overrides_builtins() {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(
                dir.path().join("default.toml"),
                "[storage]\ndata_dir = \"/var/lib/ward\"\n\n[logging]\nlevel = \"debug\"\n",
            )
            .unwrap();

            let config = load_config_from(dir.path()).unwrap();
            assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/ward"));
            assert_eq!(config.logging.level, "debug");
        }
    }
}
