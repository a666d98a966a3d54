//! Engine configuration
//!
//! Loaded from YAML; every section and field falls back to its default.

use crate::algo::RecommendConfig;
use crate::dataset::GroupAxis;
use crate::tags::TagConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Graph cache settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached graphs
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tags: TagConfig,
    pub recommend: RecommendConfig,
    pub cache: CacheConfig,
    /// Row attribute used as the bipartite group key
    pub axis: GroupAxis,
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        info!("Loading engine config from {:?}", path);
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.tags.delimiters.is_empty() {
            return Err(ConfigError::Invalid("tags.delimiters must not be empty".to_string()));
        }
        let rec = &self.recommend;
        if rec.max_top_n < 1 {
            return Err(ConfigError::Invalid("recommend.max_top_n must be at least 1".to_string()));
        }
        if rec.default_top_n < 1 || rec.default_top_n > rec.max_top_n {
            return Err(ConfigError::Invalid(format!(
                "recommend.default_top_n must be within 1..={}",
                rec.max_top_n
            )));
        }
        if self.cache.capacity < 1 {
            return Err(ConfigError::Invalid("cache.capacity must be at least 1".to_string()));
        }
        Ok(())
    }
}
