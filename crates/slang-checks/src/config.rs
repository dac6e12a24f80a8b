use crate::errors::{CheckError, CheckResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Default maximum cognitive complexity of a function
pub const DEFAULT_COMPLEXITY_THRESHOLD: u32 = 15;

/// Configuration of a check run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksConfig {
    /// Rule keys that are not run
    pub disabled_rules: BTreeSet<String>,

    /// Maximum cognitive complexity allowed per function
    pub complexity_threshold: u32,

    /// Analyse files in parallel (for `analyze_all`)
    pub parallel: bool,

    /// Number of parallel workers (None = rayon default)
    pub parallel_workers: Option<usize>,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            disabled_rules: BTreeSet::new(),
            complexity_threshold: DEFAULT_COMPLEXITY_THRESHOLD,
            parallel: true,
            parallel_workers: None,
        }
    }
}

impl ChecksConfig {
    /// Create config with a lower complexity threshold
    pub fn strict() -> Self {
        Self {
            complexity_threshold: 10,
            ..Default::default()
        }
    }

    /// Create config tolerating more complex functions
    pub fn lenient() -> Self {
        Self {
            complexity_threshold: 25,
            ..Default::default()
        }
    }

    /// Load a JSON configuration file; missing fields keep their defaults
    pub fn load(path: &Path) -> CheckResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CheckError::IoError(path.to_path_buf(), e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| CheckError::MalformedConfig(path.to_path_buf(), e))?;
        config.validate().map_err(CheckError::InvalidConfig)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.complexity_threshold == 0 {
            return Err("complexity_threshold must be greater than 0".to_string());
        }
        if self.parallel_workers == Some(0) {
            return Err("parallel_workers must be greater than 0".to_string());
        }
        Ok(())
    }

    pub fn is_enabled(&self, rule_key: &str) -> bool {
        !self.disabled_rules.contains(rule_key)
    }

    /// Disable a rule by key
    pub fn with_disabled_rule(mut self, rule_key: impl Into<String>) -> Self {
        self.disabled_rules.insert(rule_key.into());
        self
    }

    /// Set the cognitive complexity threshold
    pub fn with_complexity_threshold(mut self, threshold: u32) -> Self {
        self.complexity_threshold = threshold;
        self
    }

    /// Enable parallel analysis
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the number of parallel workers
    pub fn with_parallel_workers(mut self, workers: usize) -> Self {
        self.parallel_workers = Some(workers);
        self
    }
}
