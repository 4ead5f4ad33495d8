use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use tracing::info;

use crate::error::{Result, StoreError};

/// Default location of the configuration, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "properties/tuin_migrate.toml";

/// Application configuration.
///
/// ```toml
/// [Main]
/// db = "/data/tuin/tuin.db"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "Main")]
    pub main: MainSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainSection {
    /// SQLite database file.
    pub db: PathBuf,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| StoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = text.parse()?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }
}

impl FromStr for Config {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        if config.main.db.as_os_str().is_empty() {
            return Err(StoreError::Config("Main.db must not be empty".to_string()));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_main_db() -> Result<()> {
        let config: Config = "[Main]\ndb = \"/tmp/tuin.db\"\n".parse()?;
        assert_eq!(config.main.db, PathBuf::from("/tmp/tuin.db"));
        Ok(())
    }

    #[test]
    fn test_missing_db_key() {
        let err = "[Main]\nlogdir = \"/tmp\"\n".parse::<Config>().unwrap_err();
        assert!(matches!(err, StoreError::ConfigParse(_)));
        assert!(err.to_string().contains("db"));
    }

    #[test]
    fn test_missing_main_section() {
        let err = "[Other]\ndb = \"x.db\"\n".parse::<Config>().unwrap_err();
        assert!(matches!(err, StoreError::ConfigParse(_)));
    }

    #[test]
    fn test_empty_db_rejected() {
        let err = "[Main]\ndb = \"\"\n".parse::<Config>().unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "[Main]")?;
        writeln!(file, "db = \"tuin.db\"")?;

        let config = Config::load(file.path())?;
        assert_eq!(config.main.db, PathBuf::from("tuin.db"));
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("does/not/exist.toml")).unwrap_err();
        match &err {
            StoreError::ConfigRead { path, source } => {
                assert_eq!(path, Path::new("does/not/exist.toml"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(std::error::Error::source(&err).is_some());
    }
}
