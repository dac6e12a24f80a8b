use serde::{Deserialize, Serialize};
use slang_api::{IssueLocation, SecondaryLocation};

/// A finding reported by a check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Key of the rule that raised the issue, e.g. "S1764"
    pub rule_key: String,

    pub location: IssueLocation,

    pub message: String,

    pub secondaries: Vec<SecondaryLocation>,

    /// Remediation effort, when it depends on the finding
    pub gap: Option<f64>,
}

impl Issue {
    /// Start line of the primary location; `None` for file-level issues
    pub fn line(&self) -> Option<usize> {
        self.location.range().map(|range| range.start.line)
    }
}

/// Issues reported while analysing one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    /// Logical name of the analysed source
    pub file_name: String,

    pub issues: Vec<Issue>,
}

impl FileReport {
    /// Issues raised by one rule
    pub fn issues_for<'r>(&'r self, rule_key: &'r str) -> impl Iterator<Item = &'r Issue> + 'r {
        self.issues.iter().filter(move |issue| issue.rule_key == rule_key)
    }
}
