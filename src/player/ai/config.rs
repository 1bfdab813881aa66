use super::eval::WIN_SCORE;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "engine_config.json";

/// Narrowest root window that still contains every terminal score.
pub const MIN_WINDOW: i32 = WIN_SCORE + 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    pub version: String,
    pub search: SearchConfig,
    pub cluster: ClusterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Upper bound on the depth table; `None` keeps the table as is.
    pub depth_cap: Option<u8>,
    /// Root window is (-window, window).
    pub window: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ClusterConfig {
    /// Worker count; `None` means one per spare core.
    pub workers: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth_cap: None,
            window: 10000,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            version: "1.0".to_string(),
            search: SearchConfig::default(),
            cluster: ClusterConfig::default(),
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.window < MIN_WINDOW {
            anyhow::bail!(
                "search window {} must be at least {}",
                self.window,
                MIN_WINDOW
            );
        }
        Ok(())
    }
}

impl ClusterConfig {
    /// Resolved worker count: the configured one, or available cores minus
    /// the scheduler's own.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get().saturating_sub(1))
                .unwrap_or(0)
        })
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&config_str)?;
        config.search.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            if path.exists() {
                log::warn!("ignoring config {}: {}", path.display(), e);
            }
            Self::default()
        })
    }
}
