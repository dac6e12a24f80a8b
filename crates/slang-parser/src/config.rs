use serde::{Deserialize, Serialize};

/// Configuration of the SLang front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Maximum source size in bytes; larger sources are rejected
    pub max_source_size: usize,

    /// Record comments in the top-level tree and metadata
    pub collect_comments: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_source_size: 10 * 1024 * 1024, // 10MB default
            collect_comments: true,
        }
    }
}

impl ParserConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_source_size == 0 {
            return Err("max_source_size must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Set maximum source size
    pub fn with_max_source_size(mut self, size: usize) -> Self {
        self.max_source_size = size;
        self
    }

    /// Enable or disable comment collection
    pub fn with_comments(mut self, collect: bool) -> Self {
        self.collect_comments = collect;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.max_source_size, 10 * 1024 * 1024);
        assert!(config.collect_comments);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders_and_validation() {
        let config = ParserConfig::default()
            .with_max_source_size(0)
            .with_comments(false);
        assert!(!config.collect_comments);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = ParserConfig::default().with_max_source_size(42);
        let json = serde_json::to_string(&config).unwrap();
        let restored: ParserConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
