use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Metrics collected while running checks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetrics {
    /// Files whose tree was scanned
    pub files_analyzed: usize,

    /// Files that could not be converted
    pub files_failed: usize,

    /// Issues reported across all files
    pub total_issues: usize,

    /// Total time spent converting and scanning
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
}

// Helper module for serializing Duration
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis: u64 = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

impl AnalysisMetrics {
    /// Total files processed (analysed + failed)
    pub fn total_files(&self) -> usize {
        self.files_analyzed + self.files_failed
    }

    /// Success rate (0.0 to 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.total_files() == 0 {
            0.0
        } else {
            self.files_analyzed as f64 / self.total_files() as f64
        }
    }

    /// Merge another metrics object into this one
    pub fn merge(&mut self, other: &AnalysisMetrics) {
        self.files_analyzed += other.files_analyzed;
        self.files_failed += other.files_failed;
        self.total_issues += other.total_issues;
        self.total_duration += other.total_duration;
    }
}
