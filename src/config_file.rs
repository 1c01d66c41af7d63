//! Loading [`GameConfig`] from a YAML file

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::game::GameConfig;

/// Read a YAML config file; missing fields keep their defaults
pub fn load_config(path: &Path) -> Result<GameConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    parse_config(&content).with_context(|| format!("Invalid config file {:?}", path))
}

pub fn parse_config(content: &str) -> Result<GameConfig> {
    let config: GameConfig =
        serde_yaml_ng::from_str(content).context("Failed to deserialize config")?;
    config.validate()?;
    Ok(config)
}
