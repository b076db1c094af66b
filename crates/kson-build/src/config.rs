use crate::error::BuildError;
use kson_codegen::Granularity;
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Optional config file, read from the manifest directory.
pub const CONFIG_FILE: &str = "kson.toml";

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub granularity: GranularityConfig,
    pub root: Option<PathBuf>,
    pub module: Option<String>,
}

impl Config {
    /// Load `kson.toml` from `dir`; a missing file yields the defaults.
    pub fn load(dir: &Path) -> Result<Self, BuildError> {
        let path = dir.join(CONFIG_FILE);

        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(BuildError::Io { path, source }),
        };

        Self::parse(&source).map_err(|source| BuildError::Config { path, source })
    }

    pub fn parse(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

///
/// GranularityConfig
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum GranularityConfig {
    Aggregate,

    #[default]
    PerType,
}

impl From<GranularityConfig> for Granularity {
    fn from(value: GranularityConfig) -> Self {
        match value {
            GranularityConfig::Aggregate => Self::Aggregate,
            GranularityConfig::PerType => Self::PerType,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn every_key_parses() {
        let config = Config::parse(
            r#"
            granularity = "aggregate"
            root = "src/main.rs"
            module = "adapters"
            "#,
        )
        .unwrap();

        assert_eq!(config.granularity, GranularityConfig::Aggregate);
        assert_eq!(config.root, Some(PathBuf::from("src/main.rs")));
        assert_eq!(config.module.as_deref(), Some("adapters"));
    }

    #[test]
    fn unknown_keys_and_values_are_rejected() {
        assert!(Config::parse("granularity = \"flat\"").is_err());
        assert!(Config::parse("granularity = \"per-type\"\nverbose = true").is_err());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();

        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn broken_file_names_its_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "granularity = ").unwrap();

        let err = Config::load(dir.path()).unwrap_err();

        assert!(matches!(err, BuildError::Config { ref path, .. } if path.ends_with(CONFIG_FILE)));
    }
}
