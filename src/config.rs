use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

static ENV_CONFIG: &str = "PLANNER_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Reject tasks without a category.
    pub require_category: bool,
    /// How long the splash screen stays up, in milliseconds. `0` skips it.
    pub splash_ms: u64,
    pub show_calendar: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            require_category: true,
            splash_ms: 3000,
            show_calendar: true,
        }
    }
}

impl PlannerConfig {
    /// Loads the config from `path_override`, then `$PLANNER_CONFIG`, falling
    /// back to defaults when neither is set.
    pub fn discover(path_override: Option<PathBuf>) -> Result<Self> {
        match path_override.or_else(|| env::var_os(ENV_CONFIG).map(PathBuf::from)) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn splash_delay(&self) -> Duration {
        Duration::from_millis(self.splash_ms)
    }
}
