//! YAML configuration loading for the self-play binary.

use thiserror::Error;

use crate::selfplay::SelfPlayConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub enum ConfigSource<'a> {
    Defaults,
    Path(String),
    Yaml(&'a str),
}

/// Every field is optional in the file; anything absent falls back to the
/// struct defaults.
pub fn load_selfplay_config(source: ConfigSource<'_>) -> Result<SelfPlayConfig, ConfigError> {
    match source {
        ConfigSource::Defaults => Ok(SelfPlayConfig::default()),
        ConfigSource::Path(path) => {
            let yaml = std::fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&yaml)?)
        }
        ConfigSource::Yaml(yaml) => Ok(serde_yaml::from_str(yaml)?),
    }
}
