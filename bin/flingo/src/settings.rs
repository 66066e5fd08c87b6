//! Runtime configuration.
//!
//! Layered: built-in defaults, then an optional `flingo.toml` in the working
//! directory, then `FLINGO_*` environment variables (e.g. `FLINGO_PORT=9000`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Root of the content store; relative paths resolve against the
    /// working directory.
    pub upload_dir: PathBuf,
    /// Front-end assets served at `/` when set.
    pub static_dir: Option<PathBuf>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_config(
            Config::builder()
                .add_source(File::with_name("flingo").required(false))
                .add_source(Environment::with_prefix("FLINGO").try_parsing(true)),
        )
    }

    fn from_config(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("database_url", "sqlite:flingo.db?mode=rwc")?
            .set_default("upload_dir", "uploads")?
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_config(Config::builder()).unwrap();
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.database_url, "sqlite:flingo.db?mode=rwc");
        assert_eq!(settings.upload_dir, PathBuf::from("uploads"));
        assert!(settings.static_dir.is_none());
    }

    #[test]
    fn test_overrides_win_over_defaults() {
        let builder = Config::builder()
            .set_override("port", 9000)
            .unwrap()
            .set_override("upload_dir", "/srv/flingo/uploads")
            .unwrap()
            .set_override("static_dir", "public")
            .unwrap();
        let settings = Settings::from_config(builder).unwrap();
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.upload_dir, PathBuf::from("/srv/flingo/uploads"));
        assert_eq!(settings.static_dir, Some(PathBuf::from("public")));
    }
}
