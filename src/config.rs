//! Loading mission configuration from TOML.

use std::path::Path;

use thiserror::Error;

use crate::vehicle::MissionConfig;

/// Errors that can occur while loading a mission file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read mission file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid mission: {0}")]
    Invalid(String),
}

/// Parse and validate a mission from TOML text. Missing keys take defaults.
pub fn parse_mission(contents: &str) -> Result<MissionConfig, ConfigError> {
    let mission: MissionConfig = toml::from_str(contents)?;
    mission.validate()?;
    Ok(mission)
}

/// Load and validate a mission from a TOML file.
pub fn load_mission<P: AsRef<Path>>(path: P) -> Result<MissionConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    parse_mission(&contents)
}
