//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! batch_size = 500
//! default_max_nodes = 500
//! label_property = "http://www.w3.org/2000/01/rdf-schema#label"
//! enhanced_labels = true
//! max_history_sessions = 1024
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::graph::builder::DEFAULT_BATCH_SIZE;
use crate::graph::dataset::RDFS_LABEL;
use crate::history::DEFAULT_MAX_SESSIONS;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Configuration for the semviz [`Engine`](crate::engine::Engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Triples processed per accumulation batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Node cap applied when a request does not name one.
    #[serde(default = "default_max_nodes")]
    pub default_max_nodes: usize,
    /// Property consulted for explicit node labels in neighborhood queries.
    #[serde(default = "default_label_property")]
    pub label_property: String,
    /// Whether neighborhood queries consult `label_property` at all.
    #[serde(default = "default_true")]
    pub enhanced_labels: bool,
    /// Click-history sessions kept before the least recently used is evicted.
    #[serde(default = "default_max_history_sessions")]
    pub max_history_sessions: usize,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}
fn default_max_nodes() -> usize {
    500
}
fn default_label_property() -> String {
    RDFS_LABEL.into()
}
fn default_true() -> bool {
    true
}
fn default_max_history_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            default_max_nodes: default_max_nodes(),
            label_property: default_label_property(),
            enhanced_labels: default_true(),
            max_history_sessions: default_max_history_sessions(),
        }
    }
}

impl EngineConfig {
    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid {
                message: "batch_size must be > 0".into(),
            });
        }
        if self.max_history_sessions == 0 {
            return Err(ConfigError::Invalid {
                message: "max_history_sessions must be > 0".into(),
            });
        }
        if self.enhanced_labels && self.label_property.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "label_property must be set when enhanced_labels is on".into(),
            });
        }
        Ok(())
    }

    /// Load from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid {
            message: format!("failed to serialize config: {e}"),
        })
    }
}
